//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input, timers or HTTP
//! responses. Actions bridge pure state transitions and the host calls only the
//! plugin shim may make.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in order.
//!
//! # Example
//!
//! ```rust
//! use marquee::app::Action;
//! use std::time::Duration;
//!
//! let actions = vec![Action::ArmTimer(Duration::from_millis(800)), Action::CloseFocus];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::HttpRequest;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Executes an HTTP request through the host.
    ///
    /// The response comes back as a separate event carrying the request's
    /// context, so the handler can resume the right continuation.
    SendRequest(HttpRequest),

    /// Arms a one-shot host timer that fires after the given duration.
    ArmTimer(Duration),
}
