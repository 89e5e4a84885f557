//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Marquee library and
//! the Zellij plugin system. It is the only code that calls host functions:
//! library [`Action`]s become `web_request`, `set_timeout` and `hide_self`
//! calls, and host events are mapped back into library [`Event`]s.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Timer, `WebRequestResult`, Visible events
//! 3. **Start**: Once `WebAccess` is granted, fetch popular movies and trending
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → editing, navigation and focus events (see below)
//! - `Timer` → `Event::Timer`
//! - `WebRequestResult` → `Event::Response` with the decoded request context
//! - `Visible(false)` → `Event::Hidden`, `Visible(true)` → `Event::Shown`
//! - `PermissionRequestResult(Granted)` → `Event::Start`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//! - `Tab`: Toggle focus between search input and results
//! - `Ctrl+u`: Clear search input
//! - `Backspace`: Delete last character
//! - `Esc`: Close plugin
//!
//! With the results focused:
//! - `j`/`k`: Move down/up
//! - `/`: Return to search input
//!
//! Any other printable character is typed into the search input.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Instant;
use zellij_tile::prelude::*;

use marquee::api::{HttpResponse, RequestContext, Verb};
use marquee::{handle_event, Action, Config, Event, Focus};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: marquee::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: marquee::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests `WebAccess` for the movie provider and the document store.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        marquee::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            debounce_ms = config.debounce.as_millis(),
            trending_limit = config.trending_limit,
            has_tmdb_key = config.tmdb_api_key.is_some(),
            "parsed configuration"
        );
        self.app = marquee::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
            EventType::Visible,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Visible(false) => Event::Hidden,
            zellij_tile::prelude::Event::Visible(true) => Event::Shown,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - starting initial fetches");
                    Event::Start
                }
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied - no movies can be fetched");
                    return false;
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event, Instant::now()) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        marquee::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('u') => Some(Event::ClearInput),
                _ => None,
            };
        }

        let in_results = self.app.focus == Focus::Results;

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Char('j') if in_results => Event::KeyDown,
            BareKey::Char('k') if in_results => Event::KeyUp,
            BareKey::Char('/') if in_results => Event::ToggleFocus,
            BareKey::Tab => Event::ToggleFocus,
            BareKey::Esc => Event::CloseFocus,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Maps a finished web request back to the library response event.
    ///
    /// Responses whose context map was not written by this plugin are logged
    /// and ignored.
    fn map_web_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        match RequestContext::from_context_map(context) {
            Ok(context) => Some(Event::Response(HttpResponse {
                status,
                body,
                context,
            })),
            Err(e) => {
                tracing::warn!(status, error = %e, "dropping response with unreadable context");
                None
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// # Actions
    ///
    /// - `SendRequest`: Issue a `web_request` with the context map attached
    /// - `ArmTimer`: Schedule a `Timer` event
    /// - `CloseFocus`: Hide plugin pane
    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(action: Action) {
        match action {
            Action::SendRequest(request) => {
                let context = match request.context.to_context_map() {
                    Ok(context) => context,
                    Err(e) => {
                        tracing::warn!(url = %request.url, error = %e, "cannot encode request context");
                        return;
                    }
                };
                let verb = match request.verb {
                    Verb::Get => HttpVerb::Get,
                    Verb::Post => HttpVerb::Post,
                    Verb::Put => HttpVerb::Put,
                };
                tracing::debug!(url = %request.url, verb = ?request.verb, "sending web request");
                web_request(request.url, verb, request.headers, request.body, context);
            }
            Action::ArmTimer(delay) => {
                set_timeout(delay.as_secs_f64());
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
