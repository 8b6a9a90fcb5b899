//! `imagemap render` command implementation.

use std::path::PathBuf;

use clap::Args;
use imagemap_renderer::{FormatOutcome, StringSink};

use super::InputArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Write plain text instead of HTML.
    #[arg(long)]
    text: bool,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.input.open()?;

        let mut sink = if self.text {
            StringSink::text()
        } else {
            StringSink::html()
        };
        let outcome = session
            .renderer()
            .format(&session.block, &session.page, &mut sink);

        match &self.output {
            Some(path) => {
                std::fs::write(path, sink.as_str())?;
                if outcome.is_ok() {
                    output.success(&format!("Rendered to {}", path.display()));
                }
            }
            None => output.result(sink.as_str())?,
        }

        outcome_result(&outcome)
    }
}

/// Map a format outcome to the command result.
///
/// A failed build already wrote its report line through the sink.
fn outcome_result(outcome: &FormatOutcome) -> Result<(), CliError> {
    match outcome {
        FormatOutcome::Failed(err) => {
            tracing::debug!(error = %err, "Build failed, report written to output");
            Err(CliError::Reported)
        }
        FormatOutcome::Rendered | FormatOutcome::Degraded => Ok(()),
    }
}
