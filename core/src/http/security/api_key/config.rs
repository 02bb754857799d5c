//! Header API key configuration.

use serde::Deserialize;

/// Header read when none is configured.
pub const DEFAULT_HEADER: &str = "X-Api-Key";

/// Which header carries the API key, and which literal must precede it.
///
/// The header name is compared case-insensitively; [`HeaderConfig::normalized`]
/// lowercases it. An empty prefix means no prefix is required.
///
/// Can be deserialized from a host configuration file; missing fields fall
/// back to the defaults:
///
/// ```
/// use actix_apikey_core::http::security::api_key::HeaderConfig;
///
/// let config: HeaderConfig = serde_json::from_str(r#"{"prefix": "Bearer "}"#).unwrap();
/// assert_eq!(config.get_header(), "X-Api-Key");
/// assert_eq!(config.get_prefix(), "Bearer ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    header: String,
    prefix: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            prefix: String::new(),
        }
    }
}

impl HeaderConfig {
    /// Creates a configuration reading the given header, with no prefix.
    pub fn header(name: impl Into<String>) -> Self {
        Self {
            header: name.into(),
            ..Default::default()
        }
    }

    /// Sets the literal the header value must start with (e.g. `"Bearer "`).
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns the header name.
    pub fn get_header(&self) -> &str {
        &self.header
    }

    /// Returns the required prefix.
    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    /// Applies the defaulting rules: an empty header becomes `X-Api-Key`,
    /// and the header name is lowercased for lookups.
    pub fn normalized(mut self) -> Self {
        if self.header.is_empty() {
            self.header = DEFAULT_HEADER.to_string();
        }
        self.header = self.header.to_lowercase();
        self
    }
}

/// Complete strategy configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyConfig {
    header: HeaderConfig,
    pass_request_to_verifier: bool,
}

impl StrategyConfig {
    /// Builds the configuration from optional parts, applying defaults.
    pub fn new(header: Option<HeaderConfig>, pass_request_to_verifier: bool) -> Self {
        Self {
            header: header.unwrap_or_default().normalized(),
            pass_request_to_verifier,
        }
    }

    /// Returns the lowercased header name.
    pub fn get_header(&self) -> &str {
        self.header.get_header()
    }

    /// Returns the required prefix.
    pub fn get_prefix(&self) -> &str {
        self.header.get_prefix()
    }

    /// Whether the verifier is called with the request as well as the key.
    pub fn passes_request_to_verifier(&self) -> bool {
        self.pass_request_to_verifier
    }
}

/// Same as `StrategyConfig::new(None, false)`: `x-api-key`, no prefix,
/// key-only verifier.
impl Default for StrategyConfig {
    fn default() -> Self {
        Self::new(None, false)
    }
}
