use super::template::escape_html;
use super::{ConvertOutput, RenderOptions, TextConverter};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static TODOTXT_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:todo[-.]?.*|.*[-.]todo\.(?:txt|text))$").unwrap());

/// Whether `name` is a todo.txt file name such as `todo.txt` or `work.todo.txt`.
pub fn is_todotxt_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "todo.txt"
        || (TODOTXT_FILE_NAME.is_match(name)
            && (lower.ends_with(".txt") || lower.ends_with(".text")))
}

/// Task lines separated by rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoTxtConverter;

impl TextConverter for TodoTxtConverter {
    fn render(&self, markup: &str, _options: &RenderOptions, _file: Option<&Path>) -> ConvertOutput {
        let tasks = escape_html(markup).replace("\n", "<br/><hr/>");
        ConvertOutput::page(format!(
            "<pre style='white-space: pre-wrap; font-family: monospace'>{tasks}</pre>"
        ))
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| is_todotxt_file_name(&name.to_string_lossy()))
            .unwrap_or(false)
    }
}
