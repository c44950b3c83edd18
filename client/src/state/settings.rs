//! Connection settings edited in the settings modal.
//!
//! DESIGN
//! ======
//! `should_connect` is the user's intent. The session follows it: setting it
//! builds a target address, clearing it tears the transport down. A remote
//! close clears it again so the Connect button comes back.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use kabaw_chat::config::DEFAULT_SERVER_URL;
use kabaw_chat::{AddressError, ChatConfig, SessionAddress};

/// Settings state for the connection modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsState {
    pub config: ChatConfig,
    pub should_connect: bool,
    pub show_settings: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::with_config(ChatConfig::default())
    }
}

impl SettingsState {
    /// Settings for `config`; the modal starts open while the identity is
    /// still a default one.
    pub fn with_config(config: ChatConfig) -> Self {
        let show_settings = config.has_default_identity();
        Self { config, should_connect: false, show_settings }
    }

    /// Defaults with the server URL taken from the page location.
    pub fn for_page() -> Self {
        Self::with_config(ChatConfig { server_url: page_server_url(), ..ChatConfig::default() })
    }

    /// Address the session should be connected to, if any.
    pub fn target(&self) -> Option<SessionAddress> {
        if !self.should_connect {
            return None;
        }
        match self.config.address() {
            Ok(address) => Some(address),
            Err(e) => {
                leptos::logging::warn!("not connecting; invalid settings: {e}");
                None
            }
        }
    }

    /// Commit a new identity and ask to connect.
    ///
    /// # Errors
    ///
    /// Returns the validation error and leaves `self` untouched when the
    /// identity cannot form an address.
    pub fn connect_as(&self, username: &str, channel: &str) -> Result<Self, AddressError> {
        let config = ChatConfig {
            server_url: self.config.server_url.clone(),
            username: username.trim().to_owned(),
            channel: channel.trim().to_owned(),
        };
        config.address()?;
        Ok(Self { config, should_connect: true, show_settings: false })
    }

    /// Drop the connect intent and close the modal.
    pub fn disconnect(&mut self) {
        self.should_connect = false;
        self.show_settings = false;
    }
}

/// WebSocket URL served next to the page at `/ws`.
///
/// `protocol` is `window.location.protocol` (with trailing colon). Pages
/// without a host (e.g. `file:`) fall back to [`DEFAULT_SERVER_URL`].
pub fn server_url_for_page(protocol: &str, host: &str) -> String {
    if host.is_empty() {
        return DEFAULT_SERVER_URL.to_owned();
    }
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}/ws")
}

#[cfg(feature = "csr")]
fn page_server_url() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return DEFAULT_SERVER_URL.to_owned();
    };
    let protocol = location.protocol().unwrap_or_default();
    let host = location.host().unwrap_or_default();
    server_url_for_page(&protocol, &host)
}

#[cfg(not(feature = "csr"))]
fn page_server_url() -> String {
    DEFAULT_SERVER_URL.to_owned()
}
