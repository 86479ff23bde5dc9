//! Connection config resolution.
//!
//! Picks explicit or file mode from the request, gathers the raw values and
//! hands them to [`ConnectionConfig`] for normalization and validation.

use super::endpoint::normalize_endpoint;
use super::env::{ENV_PASSWD, ENV_USER, Environment, ProcessEnv};
use super::show::DocumentFormat;
use super::types::{
    ConfigDocument, ConnectionConfig, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, non_empty,
};
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Which source a resolution draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// URL and credentials from the caller, credentials falling back to env.
    Explicit,
    /// Everything from a config file.
    File,
}

impl std::fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveMode::Explicit => write!(f, "explicit"),
            ResolveMode::File => write!(f, "file"),
        }
    }
}

/// Caller-supplied inputs. Empty strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub config_file: Option<PathBuf>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Defaults to `true` in explicit mode.
    pub verify_tls: Option<bool>,
}

impl ResolveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Explicit mode needs a URL and no config file.
    pub fn mode(&self) -> ResolveMode {
        let has_url = non_empty(self.url.as_deref()).is_some();
        let has_file = self
            .config_file
            .as_ref()
            .is_some_and(|p| !p.as_os_str().is_empty());

        if has_url && !has_file {
            ResolveMode::Explicit
        } else {
            ResolveMode::File
        }
    }
}

/// `~/.vcoworkflows/config.json`, or a relative fallback without a home dir.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
        .join(DEFAULT_CONFIG_FILE)
}

/// Resolves a [`ConnectionConfig`] from a request, a config file and the
/// environment.
#[derive(Clone)]
pub struct ConfigResolver {
    /// Used in file mode when the request names no file.
    default_path: PathBuf,
    /// Credential fallback for explicit mode.
    env: Arc<dyn Environment>,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("default_path", &self.default_path)
            .finish_non_exhaustive()
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::from_process()
    }
}

impl ConfigResolver {
    /// Create a resolver with an explicit default path and environment.
    pub fn new(default_path: impl Into<PathBuf>, env: impl Environment + 'static) -> Self {
        Self {
            default_path: default_path.into(),
            env: Arc::new(env),
        }
    }

    /// Resolver backed by the process environment and [`default_config_path`].
    pub fn from_process() -> Self {
        Self::new(default_config_path(), ProcessEnv)
    }

    /// The file read in file mode when the request names none.
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Resolve and validate.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable or malformed config file, an unparseable URL,
    /// or a missing url/username/password (reported in that order).
    pub fn resolve(&self, request: &ResolveRequest) -> ConfigResult<ConnectionConfig> {
        let mode = request.mode();
        debug!(%mode, "Resolving vCO connection config");

        match mode {
            ResolveMode::Explicit => self.resolve_explicit(request),
            ResolveMode::File => {
                let path = request
                    .config_file
                    .as_deref()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(&self.default_path);
                self.resolve_file(path)
            }
        }
    }

    /// Convenience for [`ConfigResolver::resolve`] on a file-mode request.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<ConnectionConfig> {
        self.resolve_file(path.as_ref())
    }

    fn resolve_explicit(&self, request: &ResolveRequest) -> ConfigResult<ConnectionConfig> {
        let endpoint = non_empty(request.url.as_deref())
            .map(normalize_endpoint)
            .transpose()?;
        let username = self.explicit_or_env(request.username.as_deref(), ENV_USER);
        let password = self.explicit_or_env(request.password.as_deref(), ENV_PASSWD);

        ConnectionConfig::validated(
            endpoint,
            username,
            password,
            request.verify_tls.unwrap_or(true),
        )
    }

    fn explicit_or_env(&self, given: Option<&str>, key: &str) -> Option<String> {
        match non_empty(given) {
            Some(value) => Some(value.to_string()),
            None => {
                debug!(var = key, "Falling back to environment");
                self.env.var(key)
            }
        }
    }

    fn resolve_file(&self, path: &Path) -> ConfigResult<ConnectionConfig> {
        debug!(path = %path.display(), "Loading vCO connection config file");

        let document = read_document(path)?.unwrap_or_default();
        let endpoint = non_empty(document.url.as_deref())
            .map(normalize_endpoint)
            .transpose()?;

        ConnectionConfig::validated(
            endpoint,
            document.username,
            document.password,
            document.verify_ssl.unwrap_or(true),
        )
    }
}

/// Read and parse a config file. `Ok(None)` for a null or blank document.
///
/// `.json` is JSON only and `.yaml`/`.yml` YAML only; any other extension
/// accepts either.
fn read_document(path: &Path) -> ConfigResult<Option<ConfigDocument>> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::from_io(path, e))?;

    if content.trim().is_empty() {
        return Ok(None);
    }

    let extension = path.extension().and_then(|e| e.to_str());
    match extension.and_then(DocumentFormat::from_str) {
        Some(DocumentFormat::Json) => {
            serde_json::from_str(&content).map_err(|e| ConfigError::malformed(path, e))
        }
        Some(DocumentFormat::Yaml) => {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::malformed(path, e))
        }
        // Unknown extension: JSON first, then YAML. Report the JSON error.
        None => serde_json::from_str::<Option<ConfigDocument>>(&content).or_else(|json_err| {
            serde_yaml::from_str(&content).map_err(|_| ConfigError::malformed(path, json_err))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MapEnv;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn resolver(temp: &TempDir) -> ConfigResolver {
        ConfigResolver::new(temp.path().join("config.json"), MapEnv::new())
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(ResolveRequest::new().mode(), ResolveMode::File);
        assert_eq!(
            ResolveRequest::new().with_url("https://h").mode(),
            ResolveMode::Explicit
        );
        assert_eq!(
            ResolveRequest::new()
                .with_url("https://h")
                .with_config_file("c.json")
                .mode(),
            ResolveMode::File
        );
        assert_eq!(ResolveRequest::new().with_url("").mode(), ResolveMode::File);
        assert_eq!(
            ResolveRequest::new()
                .with_url("https://h")
                .with_config_file("")
                .mode(),
            ResolveMode::Explicit
        );
    }

    #[test]
    fn test_default_config_path_shape() {
        let path = default_config_path();
        assert!(path.ends_with(".vcoworkflows/config.json"));
    }

    #[test]
    fn test_explicit_defaults_verify_tls() {
        let temp = TempDir::new().unwrap();
        let request = ResolveRequest::new()
            .with_url("https://vco.example.com")
            .with_username("bob")
            .with_password("pw");

        let config = resolver(&temp).resolve(&request).unwrap();
        assert!(config.verify_tls());
    }

    #[test]
    fn test_explicit_given_values_beat_env() {
        let temp = TempDir::new().unwrap();
        let env = MapEnv::new().with(ENV_USER, "alice").with(ENV_PASSWD, "s3cret");
        let resolver = ConfigResolver::new(temp.path().join("config.json"), env);
        let request = ResolveRequest::new()
            .with_url("https://vco.example.com")
            .with_username("bob")
            .with_password("pw");

        let config = resolver.resolve(&request).unwrap();
        assert_eq!(config.username(), "bob");
        assert_eq!(config.password(), "pw");
    }

    #[test]
    fn test_file_mode_ignores_env() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{"url":"https://vco.example.com"}"#).unwrap();
        let env = MapEnv::new().with(ENV_USER, "alice").with(ENV_PASSWD, "s3cret");
        let resolver = ConfigResolver::new(&path, env);

        let err = resolver.resolve(&ResolveRequest::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingUsername);
    }

    #[test]
    fn test_file_missing_verify_ssl_defaults_true() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"url":"https://vco.example.com","username":"bob","password":"pw"}"#,
        )
        .unwrap();

        let config = resolver(&temp).load(&path).unwrap();
        assert!(config.verify_tls());
    }

    #[test]
    fn test_null_document_reports_url_unset() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "null").unwrap();

        let err = resolver(&temp).load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingEndpoint);
    }

    #[test]
    fn test_blank_document_reports_url_unset() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "  \n").unwrap();

        let err = resolver(&temp).load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingEndpoint);
    }

    #[test]
    fn test_malformed_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{ url: ").unwrap();

        let err = resolver(&temp).load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
    }

    #[test]
    fn test_yaml_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vco.yaml");
        let content = r#"
url: https://vco.example.com:8281/whatever
username: bob
password: pw
verify_ssl: false
"#;
        std::fs::write(&path, content).unwrap();

        let config = resolver(&temp).load(&path).unwrap();
        assert_eq!(config.endpoint(), "https://vco.example.com:8281/vco/api");
        assert!(!config.verify_tls());
    }

    #[test]
    fn test_unknown_extension_accepts_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vco.conf");
        std::fs::write(&path, "url: https://vco.example.com\nusername: bob\npassword: pw\n").unwrap();

        let config = resolver(&temp).load(&path).unwrap();
        assert_eq!(config.endpoint(), "https://vco.example.com/vco/api");
    }

    #[test]
    fn test_unknown_extension_garbage_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vco.conf");
        std::fs::write(&path, "{ url: [").unwrap();

        let err = resolver(&temp).load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
    }
}
