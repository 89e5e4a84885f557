//! Marquee: a Zellij plugin for browsing movies from a terminal pane.
//!
//! Marquee provides:
//! - The current popular movies from TMDB as soon as the pane opens
//! - Debounced search: typing settles for 800ms before a request is sent
//! - A trending strip of the most searched terms, kept in an Appwrite collection
//! - Keyboard navigation over the result grid with fuzzy match highlighting
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Only code that calls the host
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and debounce                      │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ API Layer     │
//! │ (ui/)         │   │ (storage/)    │   │ (api/)        │
//! │ - Rendering   │   │ - Appwrite    │   │ - TMDB client │
//! │ - Theming     │   │ - Ranking     │   │ - HTTP types  │
//! │ - Components  │   │ - Store trait │   │ - Context map │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths, build secrets (infrastructure/)   │
//! │  - Error types, Movie, TrendingEntry (domain/)      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a JSON lines file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never performs I/O on the network. It builds
//! [`api::HttpRequest`] values and parses [`api::HttpResponse`] values, and the
//! plugin shim hands them to Zellij's `web_request`.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/marquee.wasm" {
//!         tmdb_api_key "eyJhbGciOi..."
//!         appwrite_project_id "6650..."
//!         appwrite_database_id "marquee"
//!         appwrite_collection_id "metrics"
//!         debounce_ms "800"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! Secrets left out of the KDL block fall back to values captured from the
//! build environment; see [`infrastructure::BuildEnv`].
//!
//! # Example
//!
//! ```rust
//! use marquee::{handle_event, initialize, Action, Config, Event};
//! use std::time::Instant;
//!
//! let config = Config {
//!     tmdb_api_key: Some("key".to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::Start, Instant::now())?;
//! assert!(matches!(actions[0], Action::SendRequest(_)));
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus};
pub use domain::{MarqueeError, Movie, Result, TrendingEntry};
pub use ui::Theme;

use api::{tmdb, MovieClient};
use app::debounce::DEFAULT_DEBOUNCE;
use app::state::DEFAULT_TRENDING_LIMIT;
use infrastructure::BuildEnv;
use std::collections::BTreeMap;
use std::time::Duration;
use storage::appwrite::DEFAULT_ENDPOINT;
use storage::{AppwriteConfig, AppwriteStore};

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB read access token, sent as a bearer token.
    ///
    /// Without it every movie fetch settles immediately with an error.
    pub tmdb_api_key: Option<String>,

    /// TMDB API root. Default: `https://api.themoviedb.org/3`
    pub tmdb_base_url: String,

    /// Prefix for poster paths. Default: `https://image.tmdb.org/t/p/w500`
    pub image_base_url: String,

    /// Trending collection settings.
    pub appwrite: AppwriteConfig,

    /// Quiet period before an edit is committed. Default: 800ms
    pub debounce: Duration,

    /// Number of entries in the trending strip. Default: 5
    pub trending_limit: usize,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` is resolved against `/host`.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for traces. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_base_url: tmdb::DEFAULT_BASE_URL.to_string(),
            image_base_url: tmdb::DEFAULT_IMAGE_BASE_URL.to_string(),
            appwrite: AppwriteConfig {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                ..AppwriteConfig::default()
            },
            debounce: DEFAULT_DEBOUNCE,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Secrets missing from the map fall back to [`BuildEnv::captured`].
    ///
    /// # Parsing Rules
    ///
    /// - Blank values are treated as absent
    /// - `debounce_ms`, `trending_limit`: fall back to defaults on parse error
    /// - `trending_limit` of 0 falls back to the default
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use marquee::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "300".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.debounce, Duration::from_millis(300));
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self::from_sources(config, &BuildEnv::captured())
    }

    /// Parses configuration with an explicit build environment.
    #[must_use]
    pub fn from_sources(config: &BTreeMap<String, String>, env: &BuildEnv) -> Self {
        let defaults = Self::default();

        let debounce = setting(config, "debounce_ms", None)
            .and_then(|s| s.parse::<u64>().ok())
            .map_or(defaults.debounce, Duration::from_millis);

        let trending_limit = setting(config, "trending_limit", None)
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.trending_limit);

        let appwrite = AppwriteConfig {
            endpoint: setting(config, "appwrite_endpoint", env.appwrite_endpoint)
                .unwrap_or(defaults.appwrite.endpoint),
            project_id: setting(config, "appwrite_project_id", env.appwrite_project_id),
            database_id: setting(config, "appwrite_database_id", env.appwrite_database_id),
            collection_id: setting(config, "appwrite_collection_id", env.appwrite_collection_id),
            api_key: setting(config, "appwrite_api_key", env.appwrite_api_key),
        };

        Self {
            tmdb_api_key: setting(config, "tmdb_api_key", env.tmdb_api_key),
            tmdb_base_url: setting(config, "tmdb_base_url", None).unwrap_or(defaults.tmdb_base_url),
            image_base_url: setting(config, "image_base_url", None)
                .unwrap_or(defaults.image_base_url),
            appwrite,
            debounce,
            trending_limit,
            theme_name: setting(config, "theme", None),
            theme_file: setting(config, "theme_file", None),
            trace_level: setting(config, "trace_level", None).unwrap_or(defaults.trace_level),
        }
    }
}

/// Looks up `key`, falling back to `fallback`; blank values count as absent.
fn setting(
    config: &BTreeMap<String, String>,
    key: &str,
    fallback: Option<&'static str>,
) -> Option<String> {
    config
        .get(key)
        .map(String::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.map(str::trim).filter(|v| !v.is_empty()))
        .map(String::from)
}

/// Builds the application state from configuration.
///
/// Theme resolution order: `theme_file`, then `theme`, then the default. A
/// theme that fails to load is logged and replaced by the default.
///
/// Does not install tracing; the plugin shim calls
/// [`observability::init_tracing`] first.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing marquee plugin");

    if config.tmdb_api_key.is_none() {
        tracing::warn!("tmdb_api_key is not configured, movie fetches will fail");
    }

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let client = MovieClient::new(
        config.tmdb_base_url.clone(),
        config.image_base_url.clone(),
        config.tmdb_api_key.clone(),
    );
    let store = AppwriteStore::new(config.appwrite.clone());

    AppState::new(client, Box::new(store), theme)
        .with_debounce(config.debounce)
        .with_trending_limit(config.trending_limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        let config = Config::from_sources(&BTreeMap::new(), &BuildEnv::default());
        assert_eq!(config, Config::default());
        assert_eq!(config.debounce, Duration::from_millis(800));
        assert_eq!(config.trending_limit, 5);
        assert_eq!(config.appwrite.endpoint, "https://cloud.appwrite.io/v1");
    }

    #[test]
    fn blank_values_are_absent() {
        let config = Config::from_sources(
            &map(&[("tmdb_api_key", "  "), ("trace_level", ""), ("theme", " ")]),
            &BuildEnv::default(),
        );
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.trace_level, "info");
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn map_values_win_over_build_env() {
        let env = BuildEnv {
            tmdb_api_key: Some("baked"),
            appwrite_project_id: Some("baked-project"),
            appwrite_api_key: Some(""),
            ..BuildEnv::default()
        };
        let config = Config::from_sources(&map(&[("tmdb_api_key", "kdl")]), &env);

        assert_eq!(config.tmdb_api_key.as_deref(), Some("kdl"));
        assert_eq!(config.appwrite.project_id.as_deref(), Some("baked-project"));
        assert!(config.appwrite.api_key.is_none());
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = Config::from_sources(
            &map(&[("debounce_ms", "soon"), ("trending_limit", "0")]),
            &BuildEnv::default(),
        );
        assert_eq!(config.debounce, DEFAULT_DEBOUNCE);
        assert_eq!(config.trending_limit, DEFAULT_TRENDING_LIMIT);

        let config = Config::from_sources(
            &map(&[("debounce_ms", "250"), ("trending_limit", "3")]),
            &BuildEnv::default(),
        );
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.trending_limit, 3);
    }

    #[test]
    fn initialize_applies_settings() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            trending_limit: 3,
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.trending_limit(), 3);
        assert_eq!(state.debouncer.delay(), DEFAULT_DEBOUNCE);
    }

    #[test]
    fn missing_theme_file_falls_back_to_default() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "catppuccin-mocha");
    }
}
