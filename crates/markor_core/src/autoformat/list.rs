use super::{ChangeWatcher, InputFilter};
use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)([-*+]) \[[ xX]\] (.*)$").unwrap());
static MARKDOWN_UNORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)([-*+]) (.*)$").unwrap());
static ORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)(\d{1,9})([.)]) (.*)$").unwrap());

static WIKITEXT_CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\t*)\[[ x*<>]\] (.*)$").unwrap());
static WIKITEXT_UNORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([ \t]*)\* (.*)$").unwrap());
static WIKITEXT_ORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)(\d{1,9}|[a-zA-Z])\. (.*)$").unwrap());
static WIKITEXT_NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)(\d{1,9})(\.) (.*)$").unwrap());

/// List markers understood by [`ListContinuation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSyntax {
    /// `- item`, `- [ ] task`, `1. item`, `1) item`; also used for org-mode and plain text.
    Markdown,
    /// Zim wiki `* item`, `[ ] task`, `1. item`, `a. item`.
    Wikitext,
}

/// Next ordered list label, `9` → `10`, `a` → `b`.
fn next_label(label: &str) -> Option<String> {
    if let Ok(number) = label.parse::<u32>() {
        return Some((number + 1).to_string());
    }
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() && !matches!(c, 'z' | 'Z') => {
            Some(((c as u8) + 1) as char).map(String::from)
        }
        _ => None,
    }
}

impl ListSyntax {
    /// Numbered item with indent, number, delimiter and content groups.
    fn numbered_item(&self) -> &'static Regex {
        match self {
            Self::Markdown => &ORDERED,
            Self::Wikitext => &WIKITEXT_NUMBERED,
        }
    }

    /// Marker of the item following `line`, `None` when `line` is no list item
    /// or an empty one.
    fn continuation(&self, line: &str) -> Option<String> {
        let (indent, marker, content) = match self {
            Self::Markdown => {
                if let Some(caps) = MARKDOWN_CHECKBOX.captures(line) {
                    (caps.get(1)?, format!("{} [ ] ", &caps[2]), caps.get(3)?)
                } else if let Some(caps) = MARKDOWN_UNORDERED.captures(line) {
                    (caps.get(1)?, format!("{} ", &caps[2]), caps.get(3)?)
                } else {
                    let caps = ORDERED.captures(line)?;
                    let label = next_label(&caps[2])?;
                    (caps.get(1)?, format!("{label}{} ", &caps[3]), caps.get(4)?)
                }
            }
            Self::Wikitext => {
                if let Some(caps) = WIKITEXT_CHECKBOX.captures(line) {
                    (caps.get(1)?, "[ ] ".to_string(), caps.get(2)?)
                } else if let Some(caps) = WIKITEXT_UNORDERED.captures(line) {
                    (caps.get(1)?, "* ".to_string(), caps.get(2)?)
                } else {
                    let caps = WIKITEXT_ORDERED.captures(line)?;
                    let label = next_label(&caps[2])?;
                    (caps.get(1)?, format!("{label}. "), caps.get(3)?)
                }
            }
        };

        if content.as_str().trim().is_empty() {
            return None;
        }
        Some(format!("{}{marker}", indent.as_str()))
    }
}

/// Repeats indentation and list marker when Enter is pressed after a list item.
#[derive(Debug, Clone, Copy)]
pub struct ListContinuation {
    syntax: ListSyntax,
}

impl ListContinuation {
    pub fn new(syntax: ListSyntax) -> Self {
        Self { syntax }
    }
}

impl InputFilter for ListContinuation {
    fn filter(&self, buffer: &str, edit_position: usize, inserted: &str) -> Option<String> {
        if inserted != "\n" {
            return None;
        }
        let line_end = edit_position.min(buffer.len());
        let before = buffer.get(..line_end)?;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before[line_start..].trim_end_matches('\r');

        self.syntax
            .continuation(line)
            .map(|marker| format!("\n{marker}"))
    }
}

/// Renumbers runs of numbered list items at the same indentation.
///
/// A run keeps the number of its first item. Deeper lines do not break a run,
/// blank lines and shallower text do. Lettered wikitext items are not renumbered.
#[derive(Debug, Clone, Copy)]
pub struct OrderedListRenumber {
    syntax: ListSyntax,
}

impl OrderedListRenumber {
    pub fn new(syntax: ListSyntax) -> Self {
        Self { syntax }
    }

    /// The renumbered text, `None` if it is already numbered correctly.
    ///
    /// ```
    /// use markor_core::autoformat::{ListSyntax, OrderedListRenumber};
    ///
    /// let text = "3. a\n3. b\n   1. x\n   5. y\n9. c\n\n2. new";
    /// assert_eq!(
    ///     OrderedListRenumber::new(ListSyntax::Markdown).renumber(text).as_deref(),
    ///     Some("3. a\n4. b\n   1. x\n   2. y\n5. c\n\n2. new")
    /// );
    /// ```
    pub fn renumber(&self, buffer: &str) -> Option<String> {
        let numbered_item = self.syntax.numbered_item();

        // (indentation width, next number) of the open runs, innermost last.
        let mut runs: Vec<(usize, u64)> = Vec::new();
        let mut changed = false;
        let mut lines = Vec::new();

        for line in buffer.split('\n') {
            let content = line.trim_start_matches([' ', '\t']);
            let indent = line.len() - content.len();

            if content.trim().is_empty() {
                runs.clear();
                lines.push(line.to_string());
                continue;
            }

            let Some(caps) = numbered_item.captures(line) else {
                runs.retain(|(run_indent, _)| *run_indent < indent);
                lines.push(line.to_string());
                continue;
            };

            runs.retain(|(run_indent, _)| *run_indent <= indent);
            let number: u64 = caps[2].parse().unwrap_or_default();
            let expected = match runs.last_mut() {
                Some((run_indent, next)) if *run_indent == indent => {
                    let expected = *next;
                    *next += 1;
                    expected
                }
                _ => {
                    runs.push((indent, number + 1));
                    number
                }
            };

            if expected == number {
                lines.push(line.to_string());
            } else {
                changed = true;
                lines.push(format!("{}{expected}{} {}", &caps[1], &caps[3], &caps[4]));
            }
        }

        changed.then(|| lines.join("\n"))
    }
}

impl ChangeWatcher for OrderedListRenumber {
    fn on_change(&self, buffer: &str, _cursor: usize) -> Option<String> {
        self.renumber(buffer)
    }
}
