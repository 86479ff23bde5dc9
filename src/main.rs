//! vco-config
//!
//! Resolves vCenter Orchestrator connection settings the same way workflow
//! clients do and prints the result, for troubleshooting.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{debug, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vco_config::cli::export::ExportArgs;
use vco_config::cli::{Cli, Command};
use vco_config::config::{ConfigResolver, ConnectionConfig, Secrets};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let resolver = ConfigResolver::from_process();
    let request = cli.resolve_request();
    debug!(
        mode = %request.mode(),
        default_path = %resolver.default_path().display(),
        "Starting vco-config"
    );

    match cli.command {
        Some(Command::Check) => {
            // Exit 2 for an incomplete config, 1 for anything else
            match resolver.resolve(&request) {
                Ok(config) => println!("ok: {}", config.endpoint()),
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(if e.is_validation() { 2 } else { 1 });
                }
            }
        }
        Some(Command::Export(args)) => {
            let config = resolver.resolve(&request)?;
            run_export(&config, &args)?;
        }
        Some(Command::Show { reveal }) => {
            let config = resolver.resolve(&request)?;
            run_show(&config, reveal);
        }
        None => {
            let config = resolver.resolve(&request)?;
            run_show(&config, false);
        }
    }

    Ok(())
}

/// Initialize logging based on the --log and --verbose options.
///
/// `RUST_LOG` overrides the level picked by --verbose.
fn init_logging(cli: &Cli) -> Result<()> {
    let (writer, ansi) = match cli.log.as_str() {
        "0" | "off" => return Ok(()),
        "1" | "stdout" => (BoxMakeWriter::new(std::io::stdout), true),
        "2" | "stderr" => (BoxMakeWriter::new(std::io::stderr), true),
        filename => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)
                .with_context(|| format!("Failed to open log file {}", filename))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Run the show command
fn run_show(config: &ConnectionConfig, reveal: bool) {
    let secrets = if reveal {
        warn!("Printing vCO password in clear text");
        Secrets::Reveal
    } else {
        Secrets::Redact
    };
    print!("{}", config.render_text(secrets));
}

/// Run the export command
fn run_export(config: &ConnectionConfig, args: &ExportArgs) -> Result<()> {
    let format = args.document_format();

    if let Some(ref path) = args.output {
        config.save_as(path, format)?;
        eprintln!("Exported connection config to {}", path.display());
        return Ok(());
    }

    let document = config.render_document(format, args.secrets())?;
    if document.ends_with('\n') {
        print!("{}", document);
    } else {
        println!("{}", document);
    }
    Ok(())
}
