use super::{print, Input};
use crate::app::Context;
use anyhow::Result;
use clap::Parser;
use serde_json::json;

/// List the toolbar actions available for a file.
#[derive(Parser, Debug, Clone)]
pub struct Actions {
    #[clap(flatten)]
    input: Input,
}

impl Actions {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let bundle = self.input.bundle(&ctx.registry());
        print(json!({
            "format": bundle.id(),
            "label_prefix": bundle.label_prefix(),
            "actions": bundle.actions(),
        }))
    }
}
