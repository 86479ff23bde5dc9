//! Connection configuration for the vCenter Orchestrator REST API.
//!
//! A [`ConnectionConfig`] is resolved from one of two mutually exclusive
//! sources:
//! 1. **Explicit** - a server URL plus credentials given by the caller, with
//!    credentials falling back to the environment
//! 2. **File** - a JSON (or YAML) document, either the path given by the
//!    caller or `~/.vcoworkflows/config.json`
//!
//! Every resolved endpoint is forced onto the API root path `/vco/api`.
//!
//! ## Environment Variables
//! - `VCO_USER` - Username fallback (explicit mode only)
//! - `VCO_PASSWD` - Password fallback (explicit mode only)

pub mod endpoint;
pub mod env;
mod loader;
mod show;
mod types;

pub use endpoint::normalize_endpoint;
pub use env::{Environment, MapEnv, ProcessEnv};
pub use loader::{ConfigResolver, ResolveMode, ResolveRequest, default_config_path};
pub use show::{DocumentFormat, Secrets};
pub use types::*;
