//! Format specific toolbar snippets and their effect on a text buffer.

mod lists;

use crate::document::Document;
use crate::format::FormatId;
use serde::Serialize;
use std::ops::Range;

/// What a snippet does to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    /// Inserts text at the cursor, replacing the selection.
    Insert { text: &'static str },
    /// Wraps the selection, or unwraps it when already wrapped.
    Surround {
        open: &'static str,
        close: &'static str,
    },
    /// Toggles a prefix on each selected line, after its indentation.
    LinePrefix { prefix: &'static str },
}

/// An insertable toolbar snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionSnippet {
    /// Stable id, e.g. `markdown_bold`.
    pub id: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: ActionKind,
}

/// Replacement of `range` in the buffer, with the cursor afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
    pub cursor: usize,
}

impl TextEdit {
    /// Applies this edit to `buffer`.
    pub fn apply_to(&self, buffer: &str) -> String {
        let mut edited = String::with_capacity(buffer.len() + self.replacement.len());
        edited.push_str(&buffer[..self.range.start]);
        edited.push_str(&self.replacement);
        edited.push_str(&buffer[self.range.end..]);
        edited
    }
}

/// Largest char boundary not after `index`.
fn floor_char_boundary(buffer: &str, index: usize) -> usize {
    let mut index = index.min(buffer.len());
    while !buffer.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl ActionSnippet {
    pub const fn insert(id: &'static str, label: &'static str, text: &'static str) -> Self {
        Self {
            id,
            label,
            kind: ActionKind::Insert { text },
        }
    }

    pub const fn surround(id: &'static str, label: &'static str, delimiter: &'static str) -> Self {
        Self::enclose(id, label, delimiter, delimiter)
    }

    pub const fn enclose(
        id: &'static str,
        label: &'static str,
        open: &'static str,
        close: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            kind: ActionKind::Surround { open, close },
        }
    }

    pub const fn line_prefix(id: &'static str, label: &'static str, prefix: &'static str) -> Self {
        Self {
            id,
            label,
            kind: ActionKind::LinePrefix { prefix },
        }
    }

    /// Computes the edit of this snippet on `buffer` with `selection` as byte range.
    ///
    /// The selection is clamped to the buffer and to char boundaries.
    ///
    /// # Examples
    ///
    /// ```
    /// use markor_core::actions::ActionSnippet;
    ///
    /// let bold = ActionSnippet::surround("markdown_bold", "Bold", "**");
    /// let edit = bold.apply("a word", 2..6);
    /// assert_eq!(edit.apply_to("a word"), "a **word**");
    ///
    /// let undo = bold.apply("a **word**", 4..8);
    /// assert_eq!(undo.apply_to("a **word**"), "a word");
    /// ```
    pub fn apply(&self, buffer: &str, selection: Range<usize>) -> TextEdit {
        let end = floor_char_boundary(buffer, selection.end);
        let start = floor_char_boundary(buffer, selection.start.min(end));
        let selected = &buffer[start..end];

        match self.kind {
            ActionKind::Insert { text } => TextEdit {
                range: start..end,
                replacement: text.to_string(),
                cursor: start + text.len(),
            },
            ActionKind::Surround { open, close } => {
                let wrapped = start
                    .checked_sub(open.len())
                    .and_then(|before| buffer.get(before..start))
                    == Some(open)
                    && buffer[end..].starts_with(close);
                if wrapped {
                    let outer = start - open.len();
                    TextEdit {
                        range: outer..end + close.len(),
                        replacement: selected.to_string(),
                        cursor: outer + selected.len(),
                    }
                } else {
                    let replacement = format!("{open}{selected}{close}");
                    let cursor = if selected.is_empty() {
                        start + open.len()
                    } else {
                        start + replacement.len()
                    };
                    TextEdit {
                        range: start..end,
                        replacement,
                        cursor,
                    }
                }
            }
            ActionKind::LinePrefix { prefix } => {
                let line_start = buffer[..start].rfind('\n').map_or(0, |i| i + 1);
                let line_end = buffer[end..].find('\n').map_or(buffer.len(), |i| end + i);
                let replacement = buffer[line_start..line_end]
                    .split('\n')
                    .map(|line| toggle_prefix(line, prefix))
                    .collect::<Vec<_>>()
                    .join("\n");
                TextEdit {
                    range: line_start..line_end,
                    cursor: line_start + replacement.len(),
                    replacement,
                }
            }
        }
    }
}

fn toggle_prefix(line: &str, prefix: &str) -> String {
    let content = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - content.len()];
    match content.strip_prefix(prefix) {
        Some(rest) => format!("{indent}{rest}"),
        None => format!("{indent}{prefix}{content}"),
    }
}

/// Supplies the toolbar of one format.
pub trait ActionProvider: Send + Sync {
    /// Ordered snippets for `document`.
    fn actions(&self, document: &Document) -> Vec<ActionSnippet>;

    /// Prefix shown before snippet labels, e.g. `LaTeX: `.
    fn label_prefix(&self) -> &str {
        ""
    }
}

/// The built-in toolbar of a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatActions {
    id: FormatId,
}

impl FormatActions {
    pub fn new(id: FormatId) -> Self {
        Self { id }
    }
}

impl ActionProvider for FormatActions {
    fn actions(&self, document: &Document) -> Vec<ActionSnippet> {
        lists::actions(self.id, document)
    }

    fn label_prefix(&self) -> &str {
        lists::label_prefix(self.id)
    }
}
