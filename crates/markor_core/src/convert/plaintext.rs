use super::binary::EmbedBinaryConverter;
use super::markdown::MarkdownConverter;
use super::template::escape_html;
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from a file to sniff text from binary content.
const SNIFF_LEN: u64 = 1024;

pub(crate) const EXT_TEXT: &[&str] = &[
    ".txt", ".taskpaper", ".org", ".ldg", ".ledger", ".m3u", ".m3u8", ".svg", ".lrc", ".fen",
];

pub(crate) const EXT_HTML: &[&str] = &[".html", ".htm"];

pub(crate) const EXT_CODE: &[&str] = &[
    ".py", ".cpp", ".h", ".c", ".js", ".mjs", ".css", ".cs", ".kt", ".lua", ".perl", ".java",
    ".qml", ".diff", ".php", ".r", ".patch", ".rs", ".swift", ".ts", ".mm", ".go", ".sh", ".rb",
    ".tex", ".xml", ".xlf",
];

const EXT_EMBED: &[&str] = &[".m3u", ".m3u8", ".svg"];

/// Whether `extension` (lower-cased, with dot) is a known source code extension.
pub fn is_code_extension(extension: &str) -> bool {
    EXT_CODE.contains(&extension)
}

/// Fenced code block language for `extension`.
fn fence_language(extension: &str) -> &str {
    match extension {
        ".sh" => "bash",
        ext => ext.trim_start_matches('.'),
    }
}

/// Wraps `text` into a markdown code fence longer than any backtick run inside.
pub(crate) fn code_fence(language: &str, text: &str) -> String {
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or_default();
    let fence = "`".repeat(longest_run.max(2) + 1);
    let newline = if text.ends_with('\n') { "" } else { "\n" };
    format!("{fence}{language}\n{text}{newline}{fence}\n")
}

/// Whether the first [`SNIFF_LEN`] bytes of `path` look like text.
fn sniffs_as_text(path: &Path) -> bool {
    let mut buffer = Vec::with_capacity(SNIFF_LEN as usize);
    let read = File::open(path).and_then(|file| file.take(SNIFF_LEN).read_to_end(&mut buffer));
    match read {
        Ok(_) => content_inspector::inspect(&buffer).is_text(),
        Err(err) => {
            tracing::debug!(path = %path.display(), ?err, "Failed to sniff file content");
            false
        }
    }
}

/// Plain text and source code.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextConverter;

impl TextConverter for PlaintextConverter {
    fn render(&self, markup: &str, options: &RenderOptions, file: Option<&Path>) -> ConvertOutput {
        let extension = file_extension(file);
        let extension = extension.as_str();

        if EXT_HTML.contains(&extension) {
            ConvertOutput::Document(markup.to_string())
        } else if EXT_EMBED.contains(&extension) {
            EmbedBinaryConverter.render(markup, options, file)
        } else if is_code_extension(extension) {
            MarkdownConverter.render(&code_fence(fence_language(extension), markup), options, file)
        } else {
            ConvertOutput::page(format!(
                "<pre style='white-space: pre-wrap;'>{}</pre>",
                escape_html(markup)
            ))
        }
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        let extension = file_extension(Some(path));
        let extension = extension.as_str();
        EXT_TEXT.contains(&extension)
            || EXT_HTML.contains(&extension)
            || is_code_extension(extension)
            || sniffs_as_text(path)
    }
}
