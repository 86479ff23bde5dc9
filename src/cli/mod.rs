//! CLI command definitions for vco-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod export;

use crate::config::ResolveRequest;
use clap::{Parser, Subcommand};
use export::ExportArgs;
use std::path::PathBuf;

/// Resolve and inspect vCenter Orchestrator connection settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: ~/.vcoworkflows/config.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// VMware vCenter Orchestrator server URL
    #[arg(short, long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// vCO user name (falls back to $VCO_USER)
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// vCO password (falls back to $VCO_PASSWD)
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub no_verify_ssl: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Resolver inputs from the global flags.
    pub fn resolve_request(&self) -> ResolveRequest {
        ResolveRequest {
            config_file: self.config.clone(),
            url: self.server.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            verify_tls: self.no_verify_ssl.then_some(false),
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration (default if no subcommand given)
    Show {
        /// Print the password in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Write the resolved configuration as a structured document
    Export(ExportArgs),

    /// Resolve the configuration and report whether it is complete
    Check,
}
