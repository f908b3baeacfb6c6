use super::{print, Input};
use crate::app::Context;
use anyhow::{Context as _, Result};
use clap::Parser;

/// Run the change watcher of the file's format over the whole file.
#[derive(Parser, Debug, Clone)]
pub struct AutoFormat {
    #[clap(flatten)]
    input: Input,

    /// Rewrite the file instead of printing the result.
    #[clap(long)]
    in_place: bool,
}

impl AutoFormat {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let bundle = self.input.bundle(&ctx.registry());
        let text = self.input.load_text(&bundle)?;

        let formatted = bundle
            .change_watcher()
            .and_then(|watcher| watcher.on_change(&text, text.len()));

        let Some(formatted) = formatted else {
            tracing::debug!(format = %bundle.id(), "Nothing to reformat");
            if !self.in_place {
                print(text.trim_end_matches('\n'))?;
            }
            return Ok(());
        };

        if self.in_place {
            std::fs::write(&self.input.file, formatted)
                .with_context(|| format!("failed to write {}", self.input.file.display()))?;
        } else {
            print(formatted.trim_end_matches('\n'))?;
        }

        Ok(())
    }
}
