//! Validated connection target: server endpoint plus username and channel.

#[cfg(test)]
#[path = "address_test.rs"]
mod address_test;

use std::fmt;

use url::Url;

/// Error returned by [`SessionAddress::new`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported server URL scheme `{0}` (expected ws, wss, http, or https)")]
    UnsupportedScheme(String),
    #[error("username cannot be empty")]
    EmptyUsername,
    #[error("channel cannot be empty")]
    EmptyChannel,
}

/// Where a session connects: the socket endpoint and the identity it joins with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionAddress {
    endpoint: Url,
    username: String,
    channel: String,
}

impl SessionAddress {
    /// Build an address from a server URL and the user-supplied identity.
    ///
    /// `http`/`https` endpoints are mapped to `ws`/`wss`. Username and channel
    /// are trimmed and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] when the URL does not parse, uses another
    /// scheme, or either identity field is blank.
    pub fn new(server_url: &str, username: &str, channel: &str) -> Result<Self, AddressError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AddressError::EmptyUsername);
        }
        let channel = channel.trim();
        if channel.is_empty() {
            return Err(AddressError::EmptyChannel);
        }

        let endpoint = websocket_endpoint(server_url.trim())?;
        Ok(Self {
            endpoint,
            username: username.to_owned(),
            channel: channel.to_owned(),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Socket endpoint without the identity query.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full socket URL with `username` and `channel` query parameters.
    #[must_use]
    pub fn url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("username", &self.username)
            .append_pair("channel", &self.channel);
        url
    }
}

impl fmt::Display for SessionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}

fn websocket_endpoint(raw: &str) -> Result<Url, AddressError> {
    let mut url = Url::parse(raw)?;
    let scheme = match url.scheme() {
        "ws" | "http" => "ws",
        "wss" | "https" => "wss",
        other => return Err(AddressError::UnsupportedScheme(other.to_owned())),
    };
    if url.scheme() != scheme && url.set_scheme(scheme).is_err() {
        return Err(AddressError::UnsupportedScheme(url.scheme().to_owned()));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
