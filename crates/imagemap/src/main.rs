//! Imagemap CLI - Interactive image map renderer.
//!
//! Provides commands for:
//! - `render`: Render an image map block to HTML
//! - `check`: Validate an image map block and list its areas

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs};
use output::Output;

/// Log filter for `--verbose`: debug events from the imagemap crates, info
/// from everything else.
const VERBOSE_FILTER: &str =
    "info,imagemap=debug,imagemap_renderer=debug,imagemap_config=debug,imagemap_storage_fs=debug";

/// Imagemap - Interactive image map renderer.
#[derive(Parser)]
#[command(name = "imagemap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an image map block to HTML.
    Render(RenderArgs),
    /// Validate an image map block.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.input.verbose,
            Self::Check(args) => args.input.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        if !err.is_reported() {
            output.error(&format!("Error: {err}"));
        }
        std::process::exit(1);
    }
}

/// `--verbose` enables [`VERBOSE_FILTER`], otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::from_default_env()
    }
}
