use super::{print, Input};
use crate::app::Context;
use anyhow::Result;
use clap::Parser;

/// Print the styled ranges of a file as JSON.
#[derive(Parser, Debug, Clone)]
pub struct Highlight {
    #[clap(flatten)]
    input: Input,

    /// Use the dark colour tables.
    #[clap(long)]
    dark: bool,
}

impl Highlight {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let mut ctx = ctx.clone();
        if self.dark {
            ctx.highlight.dark_mode = true;
        }

        let bundle = self.input.bundle(&ctx.registry());
        let text = self.input.load_text(&bundle)?;
        let ranges = bundle.highlight(&text);

        tracing::debug!(format = %bundle.id(), ranges = ranges.len(), "Highlighted file");

        print(serde_json::to_string(&ranges)?)
    }
}
