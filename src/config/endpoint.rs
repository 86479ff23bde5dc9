//! Endpoint URL normalization.

use super::types::API_ROOT_PATH;
use crate::error::{ConfigError, ConfigResult};
use url::Url;

/// Parse `raw` and force its path onto [`API_ROOT_PATH`].
///
/// Scheme, credentials, host, port and query survive; whatever path the
/// caller supplied does not. Applying this to its own output is a no-op.
pub fn normalize_endpoint(raw: &str) -> ConfigResult<String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::invalid_url(raw, e))?;

    // `mailto:x`, `host:8281` and friends have no hierarchical path to replace
    if url.cannot_be_a_base() || !url.has_host() {
        return Err(ConfigError::invalid_url(raw, "not an absolute server URL"));
    }

    url.set_path(API_ROOT_PATH);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_path_is_replaced() {
        assert_eq!(
            normalize_endpoint("https://host:8281/some/other/path").unwrap(),
            "https://host:8281/vco/api"
        );
    }

    #[test]
    fn test_already_normalized() {
        assert_eq!(
            normalize_endpoint("https://host:8281/vco/api").unwrap(),
            "https://host:8281/vco/api"
        );
    }

    #[test]
    fn test_bare_host_gets_api_root() {
        assert_eq!(
            normalize_endpoint("https://vco.example.com").unwrap(),
            "https://vco.example.com/vco/api"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_endpoint("http://vco.local:8280/x/y/").unwrap();
        let twice = normalize_endpoint(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_query_survives() {
        assert_eq!(
            normalize_endpoint("https://vco.example.com/foo?tenant=a").unwrap(),
            "https://vco.example.com/vco/api?tenant=a"
        );
    }

    #[test]
    fn test_rejects_garbage() {
        let err = normalize_endpoint("not a url").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }

    #[test]
    fn test_rejects_schemeless_host_port() {
        // parses as scheme "vco.example.com", which has no path to replace
        let err = normalize_endpoint("vco.example.com:8281").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }
}
