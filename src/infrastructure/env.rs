//! Secrets captured from the build environment.
//!
//! Values are read with `option_env!` when the plugin is compiled, so a wasm
//! built with `MARQUEE_TMDB_API_KEY=... cargo build` works without any KDL
//! configuration. KDL values always take precedence.

/// Configuration values baked in at compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildEnv {
    pub tmdb_api_key: Option<&'static str>,
    pub appwrite_endpoint: Option<&'static str>,
    pub appwrite_project_id: Option<&'static str>,
    pub appwrite_database_id: Option<&'static str>,
    pub appwrite_collection_id: Option<&'static str>,
    pub appwrite_api_key: Option<&'static str>,
}

impl BuildEnv {
    /// Returns the values present in the environment of the compiling process.
    #[must_use]
    pub const fn captured() -> Self {
        Self {
            tmdb_api_key: option_env!("MARQUEE_TMDB_API_KEY"),
            appwrite_endpoint: option_env!("MARQUEE_APPWRITE_ENDPOINT"),
            appwrite_project_id: option_env!("MARQUEE_APPWRITE_PROJECT_ID"),
            appwrite_database_id: option_env!("MARQUEE_APPWRITE_DATABASE_ID"),
            appwrite_collection_id: option_env!("MARQUEE_APPWRITE_COLLECTION_ID"),
            appwrite_api_key: option_env!("MARQUEE_APPWRITE_API_KEY"),
        }
    }
}
