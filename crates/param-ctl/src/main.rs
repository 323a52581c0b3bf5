//! `paramctl` entry point.
//!
//! Installs the tracing subscriber, registers the extra formats, and hands
//! the parsed arguments to [`param_ctl::run`].  Logs go to stderr so stdout
//! carries only command output.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use param_ctl::{register_formats, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `RUST_LOG` takes precedence over `--log-level`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    register_formats()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}
