use super::print;
use anyhow::Result;
use clap::Parser;
use markor_core::FormatRegistry;

/// List the registered formats in detection order.
#[derive(Parser, Debug, Clone)]
pub struct Formats;

impl Formats {
    pub fn run(self) -> Result<()> {
        for format in FormatRegistry::formats() {
            print(format_args!(
                "{:<17}{:<10}{}",
                format.id, format.default_extension, format.name
            ))?;
        }
        Ok(())
    }
}
