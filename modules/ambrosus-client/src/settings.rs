//! Client configuration. Injected per instance, never global.

/// Gateway connection settings.
///
/// `secret` is only consulted by write operations; reads work without one.
/// `address` overrides the account address otherwise derived from the secret.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_endpoint: String,
    pub secret: Option<String>,
    pub address: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: "https://gateway-test.ambrosus.com".to_string(),
            secret: None,
            address: None,
        }
    }
}

impl Settings {
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
