//! Embed-code page configuration.

use url::Url;

/// Where the hosted wizard is reachable, for the `<iframe>` snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedConfig {
    pub origin: Url,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

/// Origin used when none is configured.
pub fn default_origin() -> Url {
    Url::parse("http://localhost:8080").expect("valid default origin")
}
