//! vCenter Orchestrator connection configuration.
//!
//! Resolves the endpoint, credentials and TLS policy a workflow client needs
//! before it talks to vCO. See [`config::ConfigResolver`].

pub mod cli;
pub mod config;
pub mod error;

pub use config::{ConfigResolver, ConnectionConfig, ResolveRequest};
pub use error::{ConfigError, ConfigResult, ErrorKind};
