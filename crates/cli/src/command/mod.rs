pub mod actions;
pub mod autoformat;
pub mod convert;
pub mod detect;
pub mod formats;
pub mod highlight;

use anyhow::{Context as _, Result};
use clap::Parser;
use markor_core::{Document, FormatBundle, FormatId, FormatRegistry};
use std::io::Write;
use std::path::PathBuf;

/// The file to open and an optional format overriding the detection.
#[derive(Parser, Debug, Clone)]
pub struct Input {
    /// File to open.
    #[clap(index = 1)]
    pub file: PathBuf,

    /// Format id to use instead of the detected one, e.g. `markdown` or `todotxt`.
    #[clap(long)]
    pub format: Option<FormatId>,
}

impl Input {
    pub fn document(&self) -> Document {
        Document::open(&self.file, None)
    }

    pub fn bundle(&self, registry: &FormatRegistry) -> FormatBundle {
        registry.select_format(self.format, &self.document())
    }

    /// Text of the file, empty for binary media which are never read as text.
    pub fn load_text(&self, bundle: &FormatBundle) -> Result<String> {
        if bundle.id() == FormatId::EmbedBinary {
            return Ok(String::new());
        }
        bundle
            .document()
            .load_text()
            .with_context(|| format!("failed to read {}", self.file.display()))
    }
}

/// Writes `content` followed by a newline to stdout.
pub(crate) fn print(content: impl std::fmt::Display) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    writeln!(lock, "{content}")?;
    Ok(())
}
