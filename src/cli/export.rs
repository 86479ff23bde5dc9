//! Export subcommand for vco-config
//!
//! Renders the resolved configuration as a structured document, either to
//! stdout or to a file that can later be passed back with `--config`.

use crate::config::{DocumentFormat, Secrets};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Document format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl From<ExportFormat> for DocumentFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => DocumentFormat::Json,
            ExportFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

/// Arguments for the export subcommand
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (default: stdout)
    ///
    /// Files are written with the password in clear text so they load back.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Document format (auto-detected from the output extension otherwise)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Include the password in clear text on stdout
    ///
    /// Without this the `password` key is left out of the document.
    #[arg(long)]
    pub reveal: bool,
}

impl ExportArgs {
    /// Explicit --format wins, then the output extension, then JSON.
    pub fn document_format(&self) -> DocumentFormat {
        if let Some(format) = self.format {
            return format.into();
        }

        self.output
            .as_deref()
            .map(DocumentFormat::from_path)
            .unwrap_or_default()
    }

    /// Secret handling for stdout output.
    pub fn secrets(&self) -> Secrets {
        if self.reveal {
            Secrets::Reveal
        } else {
            Secrets::Redact
        }
    }
}
