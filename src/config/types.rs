//! Configuration types and structures.

use super::endpoint::normalize_endpoint;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Path every resolved endpoint is forced onto.
pub const API_ROOT_PATH: &str = "/vco/api";

/// Directory under the user's home holding the default config file.
pub const DEFAULT_CONFIG_DIR: &str = ".vcoworkflows";

/// File name of the default config file.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// On-disk shape of a configuration file.
///
/// Every key is optional; unknown keys are ignored. The same shape is
/// produced by the export renderings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_ssl: Option<bool>,
}

/// Validated connection settings for the vCO REST API.
///
/// Fields are fixed at construction. To change a setting, build a new value
/// with [`ConnectionConfig::new`]. `Debug` and `Display` mask the password.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    endpoint: String,
    username: String,
    password: String,
    verify_tls: bool,
}

impl ConnectionConfig {
    /// Normalize `url` and validate all fields.
    ///
    /// Checks run in a fixed order (url, username, password) so that only
    /// the first missing field is reported.
    pub fn new(
        url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
        verify_tls: bool,
    ) -> ConfigResult<Self> {
        let endpoint = non_empty(Some(url))
            .map(normalize_endpoint)
            .transpose()?;
        Self::validated(endpoint, Some(username.into()), Some(password.into()), verify_tls)
    }

    /// Validate already-resolved parts. `endpoint` must be normalized.
    pub(crate) fn validated(
        endpoint: Option<String>,
        username: Option<String>,
        password: Option<String>,
        verify_tls: bool,
    ) -> ConfigResult<Self> {
        let endpoint = endpoint
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;
        let username = username
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingUsername)?;
        let password = password
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingPassword)?;

        Ok(Self {
            endpoint,
            username,
            password,
            verify_tls,
        })
    }

    /// Normalized API endpoint, always ending in [`API_ROOT_PATH`].
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password in clear text.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether TLS certificates should be verified.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }
}

/// `Some(s)` only for non-empty strings.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_normalizes_endpoint() {
        let config =
            ConnectionConfig::new("https://vco.example.com:8281/foo", "bob", "pw", true).unwrap();
        assert_eq!(config.endpoint(), "https://vco.example.com:8281/vco/api");
        assert_eq!(config.username(), "bob");
        assert_eq!(config.password(), "pw");
        assert!(config.verify_tls());
    }

    #[test]
    fn test_new_validation_order() {
        let err = ConnectionConfig::new("", "", "", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingEndpoint);

        let err = ConnectionConfig::new("https://h", "", "", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingUsername);

        let err = ConnectionConfig::new("https://h", "bob", "", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPassword);
    }

    #[test]
    fn test_document_ignores_unknown_keys() {
        let doc: ConfigDocument =
            serde_json::from_str(r#"{"url":"https://h","extra":42,"verify_ssl":false}"#).unwrap();
        assert_eq!(doc.url.as_deref(), Some("https://h"));
        assert_eq!(doc.username, None);
        assert_eq!(doc.verify_ssl, Some(false));
    }

    #[test]
    fn test_document_rejects_wrong_types() {
        let result = serde_json::from_str::<ConfigDocument>(r#"{"verify_ssl":"yes"}"#);
        assert!(result.is_err());
    }
}
