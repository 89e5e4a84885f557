//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain, api
//! and storage layers. It never calls the host: every side effect leaves as an
//! [`Action`] for the runtime to execute.
//!
//! # Architecture
//!
//! ```text
//! Keys / Timer / Responses → Events → handle_event → State Mutations → Actions
//!                                          ↑                            ↓
//!                                          └──── web_request results ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Settling of search input before a fetch is committed
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Keyboard focus between the search input and the results
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::{Debouncer, Tick};
pub use handler::{handle_event, Event};
pub use modes::Focus;
pub use state::AppState;
