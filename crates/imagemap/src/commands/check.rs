//! `imagemap check` command implementation.

use clap::Args;
use imagemap_renderer::Document;

use super::InputArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Print the parsed document as JSON.
    #[arg(long)]
    json: bool,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.input.open()?;

        let doc = session.renderer().parse(&session.block, &session.page)?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&doc)?)?;
        } else {
            output.highlight(&format!("{} ({})", doc.image.id, doc.image.src));
            for line in area_lines(&doc) {
                output.info(&line);
            }
            output.success(&format!("{} areas OK", doc.len()));
        }
        Ok(())
    }
}

/// One summary line per area, in document order.
fn area_lines(doc: &Document) -> Vec<String> {
    doc.areas
        .values()
        .map(|area| format!("  {} {} [{}]", area.name, area.shape, area.coords))
        .collect()
}
