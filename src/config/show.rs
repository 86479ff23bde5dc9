//! Text and document renderings of a resolved config.
//!
//! The password is masked unless the caller asks for [`Secrets::Reveal`].
//! Revealed output exists for troubleshooting and for writing a file that
//! loads back; it is not a hardened export.

use super::types::{ConfigDocument, ConnectionConfig};
use crate::error::{ConfigError, ConfigResult};
use std::fmt;
use std::path::Path;

/// Placeholder printed instead of the password.
pub const REDACTED: &str = "***";

/// Whether a rendering shows the password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Secrets {
    #[default]
    Redact,
    Reveal,
}

/// Structured document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    /// YAML for `.yaml`/`.yml`, JSON for everything else.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_str)
            .unwrap_or_default()
    }
}

impl ConnectionConfig {
    fn password_for(&self, secrets: Secrets) -> &str {
        match secrets {
            Secrets::Redact => REDACTED,
            Secrets::Reveal => self.password(),
        }
    }

    /// Multi-line dump of all four fields.
    pub fn render_text(&self, secrets: Secrets) -> String {
        let mut out = String::new();
        out.push_str(&format!("url:        {}\n", self.endpoint()));
        out.push_str(&format!("username:   {}\n", self.username()));
        out.push_str(&format!("password:   {}\n", self.password_for(secrets)));
        out.push_str(&format!("verify_ssl: {}\n", self.verify_tls()));
        out
    }

    /// The config in file shape.
    ///
    /// Redacted documents leave `password` out, so loading one fails with
    /// `password unset` instead of authenticating with the placeholder.
    pub fn to_document(&self, secrets: Secrets) -> ConfigDocument {
        let password = match secrets {
            Secrets::Redact => None,
            Secrets::Reveal => Some(self.password().to_string()),
        };

        ConfigDocument {
            url: Some(self.endpoint().to_string()),
            username: Some(self.username().to_string()),
            password,
            verify_ssl: Some(self.verify_tls()),
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self, secrets: Secrets) -> ConfigResult<String> {
        self.render_document(DocumentFormat::Json, secrets)
    }

    /// YAML document.
    pub fn to_yaml(&self, secrets: Secrets) -> ConfigResult<String> {
        self.render_document(DocumentFormat::Yaml, secrets)
    }

    pub fn render_document(
        &self,
        format: DocumentFormat,
        secrets: Secrets,
    ) -> ConfigResult<String> {
        let document = self.to_document(secrets);
        match format {
            DocumentFormat::Json => {
                serde_json::to_string_pretty(&document).map_err(ConfigError::serialize)
            }
            DocumentFormat::Yaml => serde_yaml::to_string(&document).map_err(ConfigError::serialize),
        }
    }

    /// Write the clear-text document to `path` so it can be loaded back.
    ///
    /// The format follows the extension. Missing parent directories are
    /// created.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        self.save_as(path, DocumentFormat::from_path(path))
    }

    /// Like [`ConnectionConfig::save`] with an explicit format.
    pub fn save_as(&self, path: impl AsRef<Path>, format: DocumentFormat) -> ConfigResult<()> {
        let path = path.as_ref();
        let mut content = self.render_document(format, Secrets::Reveal)?;
        if !content.ends_with('\n') {
            content.push('\n');
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::from_io(parent, e))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::from_io(path, e))?;
        tracing::debug!(path = %path.display(), "Saved vCO connection config");
        Ok(())
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(Secrets::Redact))
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint())
            .field("username", &self.username())
            .field("password", &REDACTED)
            .field("verify_tls", &self.verify_tls())
            .finish()
    }
}
