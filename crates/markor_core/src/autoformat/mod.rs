//! Editing helpers reacting to typed text: list continuation, ordered list
//! renumbering and todo.txt creation dates.

mod list;
mod todotxt;

use crate::format::FormatId;

pub use self::list::{ListContinuation, ListSyntax, OrderedListRenumber};
pub use self::todotxt::TodoTxtDate;

/// Rewrites text while it is being inserted.
pub trait InputFilter: Send + Sync {
    /// Replacement for `inserted` typed at byte offset `edit_position` of
    /// `buffer`, `None` to keep it as typed.
    fn filter(&self, buffer: &str, edit_position: usize, inserted: &str) -> Option<String>;
}

/// Corrects the buffer after a change.
pub trait ChangeWatcher: Send + Sync {
    /// The corrected buffer, `None` when nothing needs to change.
    ///
    /// Applying a watcher to its own output returns `None`.
    fn on_change(&self, buffer: &str, cursor: usize) -> Option<String>;
}

/// Which auto-format collaborators are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoFormatOptions {
    pub list_continuation: bool,
    pub renumber_ordered_lists: bool,
    pub todotxt_auto_date: bool,
}

impl Default for AutoFormatOptions {
    fn default() -> Self {
        Self {
            list_continuation: true,
            renumber_ordered_lists: true,
            todotxt_auto_date: true,
        }
    }
}

/// The input filter of format `id`, if it has one.
pub fn input_filter_for(id: FormatId, options: &AutoFormatOptions) -> Option<Box<dyn InputFilter>> {
    match id {
        FormatId::Markdown
        | FormatId::Plaintext
        | FormatId::Orgmode
        | FormatId::Csv
        | FormatId::AsciiDoc
            if options.list_continuation =>
        {
            Some(Box::new(ListContinuation::new(ListSyntax::Markdown)))
        }
        FormatId::Wikitext if options.list_continuation => {
            Some(Box::new(ListContinuation::new(ListSyntax::Wikitext)))
        }
        FormatId::TodoTxt if options.todotxt_auto_date => Some(Box::new(TodoTxtDate::today())),
        _ => None,
    }
}

/// The change watcher of format `id`, if it has one.
pub fn change_watcher_for(
    id: FormatId,
    options: &AutoFormatOptions,
) -> Option<Box<dyn ChangeWatcher>> {
    match id {
        FormatId::Markdown
        | FormatId::Plaintext
        | FormatId::Orgmode
        | FormatId::Csv
        | FormatId::AsciiDoc
            if options.renumber_ordered_lists =>
        {
            Some(Box::new(OrderedListRenumber::new(ListSyntax::Markdown)))
        }
        FormatId::Wikitext if options.renumber_ordered_lists => {
            Some(Box::new(OrderedListRenumber::new(ListSyntax::Wikitext)))
        }
        _ => None,
    }
}
