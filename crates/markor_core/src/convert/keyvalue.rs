use super::markdown::MarkdownConverter;
use super::plaintext::code_fence;
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use std::borrow::Cow;
use std::path::Path;

const EXTENSIONS: &[&str] = &[
    ".yml", ".yaml", ".toml", ".vcf", ".ics", ".ini", ".json", ".zim",
];

fn fence_language(extension: &str) -> &str {
    match extension {
        ".yml" => "yaml",
        ".vcf" | ".ics" | ".zim" => "properties",
        ext => ext.trim_start_matches('.'),
    }
}

/// Pretty prints `text` when it is valid JSON.
fn pretty_json(text: &str) -> Cow<'_, str> {
    match serde_json::from_str::<serde_json::Value>(text)
        .and_then(|value| serde_json::to_string_pretty(&value))
    {
        Ok(pretty) => Cow::Owned(pretty),
        Err(err) => {
            tracing::debug!(?err, "Keeping JSON as-is");
            Cow::Borrowed(text)
        }
    }
}

/// YAML, TOML, INI, JSON and other key-value files as highlighted source.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueConverter;

impl TextConverter for KeyValueConverter {
    fn render(&self, markup: &str, options: &RenderOptions, file: Option<&Path>) -> ConvertOutput {
        let extension = file_extension(file);
        let text = if extension == ".json" {
            pretty_json(markup)
        } else {
            Cow::Borrowed(markup)
        };
        MarkdownConverter.render(&code_fence(fence_language(&extension), &text), options, file)
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        EXTENSIONS.contains(&file_extension(Some(path)).as_str())
    }
}
