//! Connection settings shared by the front-ends.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::address::{AddressError, SessionAddress};

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8080/ws";
pub const DEFAULT_USERNAME: &str = "Anonymous";
pub const DEFAULT_CHANNEL: &str = "general";

/// Raw, user-editable connection settings.
///
/// Nothing is validated until [`ChatConfig::address`] is called, so a form
/// can hold half-typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub server_url: String,
    pub username: String,
    pub channel: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            username: DEFAULT_USERNAME.to_owned(),
            channel: DEFAULT_CHANNEL.to_owned(),
        }
    }
}

impl ChatConfig {
    /// Whether the username or the channel is still an out-of-the-box value.
    #[must_use]
    pub fn has_default_identity(&self) -> bool {
        self.username.trim() == DEFAULT_USERNAME || self.channel.trim() == DEFAULT_CHANNEL
    }

    /// Validate the settings into a connectable address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] when the URL is unusable or a name is blank.
    pub fn address(&self) -> Result<SessionAddress, AddressError> {
        SessionAddress::new(&self.server_url, &self.username, &self.channel)
    }
}
