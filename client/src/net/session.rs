//! Reactive handle around the page's single `SessionHook`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hook and its connector are not `Send`, so both live in local
//! `StoredValue`s. `ChatSession` is the `Copy` handle components get from
//! context. Socket callbacks re-enter through the connector's event sink,
//! always from a spawned task and never while the hook is borrowed.

use leptos::prelude::*;

use kabaw_chat::{SessionAddress, SessionHook, SessionObserver, SessionState};

use crate::net::browser_transport::{BrowserConnector, BrowserTransport};
use crate::state::settings::SettingsState;

/// Mirrors hook state into signals.
struct SignalObserver {
    state: RwSignal<SessionState>,
    settings: RwSignal<SettingsState>,
}

impl SessionObserver for SignalObserver {
    fn on_state_changed(&mut self, state: &SessionState) {
        self.state.set(state.clone());
    }

    fn on_disconnected(&mut self) {
        // Unplanned close: flip the toggle back so the user can reconnect.
        self.settings.update(|s| s.should_connect = false);
    }
}

/// Copyable handle to the page's chat session.
#[derive(Clone, Copy)]
pub struct ChatSession {
    hook: StoredValue<SessionHook<BrowserTransport>, LocalStorage>,
    connector: StoredValue<BrowserConnector, LocalStorage>,
}

impl ChatSession {
    pub fn new(state: RwSignal<SessionState>, settings: RwSignal<SettingsState>) -> Self {
        let mut session_hook = SessionHook::new();
        session_hook.add_observer(Box::new(SignalObserver { state, settings }));
        let hook = StoredValue::new_local(session_hook);

        let connector = StoredValue::new_local(BrowserConnector::new(move |id, event| {
            hook.update_value(|hook| {
                hook.handle(id, event);
            });
        }));

        Self { hook, connector }
    }

    /// Follow `target`: connect, switch address, or tear down on `None`.
    pub fn retarget(&self, target: Option<SessionAddress>) {
        let hook = self.hook;
        self.connector.with_value(|connector| {
            hook.update_value(|hook| {
                hook.retarget(connector, target);
            });
        });
    }

    /// Send a chat line. Returns `false` when nothing is open.
    pub fn send(&self, content: &str) -> bool {
        self.hook.try_update_value(|hook| hook.send_message(content)).unwrap_or(false)
    }

    pub fn disconnect(&self) {
        self.hook.update_value(|hook| {
            hook.disconnect();
        });
    }
}
