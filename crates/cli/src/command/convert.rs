use super::{print, Input};
use crate::app::Context;
use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use markor_core::PreviewChannel;
use std::path::PathBuf;
use std::sync::Arc;

/// Convert a file to a complete HTML preview document.
#[derive(Parser, Debug, Clone)]
pub struct Convert {
    #[clap(flatten)]
    pub(crate) input: Input,

    /// Render with the dark page theme.
    #[clap(long)]
    pub(crate) dark: bool,

    /// Show line numbers in code blocks.
    #[clap(long)]
    pub(crate) line_numbers: bool,

    /// Write the document to this file instead of stdout.
    #[clap(long)]
    pub(crate) output: Option<PathBuf>,
}

impl Convert {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let mut options = ctx.render.clone();
        if self.dark {
            options.light_mode = false;
        }
        if self.line_numbers {
            options.show_line_numbers = true;
        }

        let bundle = self.input.bundle(&ctx.registry());
        let text = self.input.load_text(&bundle)?;

        let channel = PreviewChannel::new();
        if !channel.render(Arc::new(bundle), text, options).await {
            return Err(anyhow!("failed to convert {}", self.input.file.display()));
        }
        let html = channel.latest().html;

        match self.output {
            Some(output) => std::fs::write(&output, html)
                .with_context(|| format!("failed to write {}", output.display()))?,
            None => print(html)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_convert_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paper.tex");
        std::fs::write(&file, "\\section{Intro}").unwrap();
        let output = dir.path().join("paper.html");

        let convert = Convert {
            input: Input { file, format: None },
            dark: true,
            line_numbers: false,
            output: Some(output.clone()),
        };
        convert.run(&Context::default()).await.unwrap();

        let html = std::fs::read_to_string(output).unwrap();
        assert!(html.contains("<h1>Intro</h1>"));
        assert!(html.contains("</html>"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let convert = Convert {
            input: Input {
                file: dir.path().join("missing.md"),
                format: None,
            },
            dark: false,
            line_numbers: false,
            output: None,
        };
        assert!(convert.run(&Context::default()).await.is_err());
    }
}
