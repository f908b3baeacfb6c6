use super::print;
use anyhow::Result;
use clap::Parser;
use markor_core::{Document, FormatRegistry};
use serde_json::json;
use std::path::PathBuf;

/// Print the detected format of a file.
#[derive(Parser, Debug, Clone)]
pub struct Detect {
    /// File to inspect, it does not need to exist.
    #[clap(index = 1)]
    file: PathBuf,
}

impl Detect {
    pub fn run(self) -> Result<()> {
        let id = FormatRegistry::detect(&Document::open(&self.file, None));
        let format = FormatRegistry::format(id);
        print(json!({
            "format": id,
            "name": format.name,
            "supported": FormatRegistry::is_file_supported(&self.file, false),
            "external": FormatRegistry::is_external_file(&self.file),
        }))
    }
}
