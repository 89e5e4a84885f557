//! Infrastructure layer for filesystem and build environment interactions.
//!
//! - [`paths`]: Sandbox path handling (`/host` prefix, data directory)
//! - [`env`]: Secrets captured at compile time

pub mod env;
pub mod paths;

pub use env::BuildEnv;
pub use paths::{expand_tilde, get_data_dir};
