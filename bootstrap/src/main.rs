//! tightlock-env - create the Tightlock `.env` file on first run
//!
//! Writes the host uid, gid `0`, and an API key chosen by the operator or
//! generated from the OS random source. Does nothing if the file exists.

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use tightlock_env::config::DEFAULT_ENV_FILE;
use tightlock_env::{EnvBootstrapper, Settings};

#[derive(Parser)]
#[command(name = "tightlock-env")]
#[command(author, version, about = "Create the Tightlock environment file", long_about = None)]
struct Cli {
    /// Environment file to create
    #[arg(long, value_name = "FILE", default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// `--non-interactive` skips all prompts; any other value prompts
    #[arg(value_name = "MODE", allow_hyphen_values = true)]
    mode: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let settings = Settings::from_cli(Some(cli.env_file.as_path()), cli.mode.as_deref())?;
    debug!("Running with {:?}", settings);

    let bootstrapper = EnvBootstrapper::new(settings);
    let outcome = bootstrapper
        .run(io::stdin().lock(), io::stdout().lock())
        .with_context(|| {
            format!(
                "failed to bootstrap {}",
                bootstrapper.env_file().path().display()
            )
        })?;

    println!("{}", outcome);
    Ok(())
}
