//! Syntax highlighting: buffer text in, styled ranges out.
//!
//! Every highlighter first runs the base pass (tabs, URLs, hex colours) and
//! then paints its ordered rule list on top. Ranges are recomputed from
//! scratch on every call.

mod asciidoc;
mod base;
mod csv;
mod keyvalue;
mod latex;
mod loader;
mod markdown;
mod orgmode;
mod plaintext;
mod rst;
mod rule;
mod span;
mod todotxt;
mod wikitext;

use crate::document::Document;
use crate::format::FormatId;
use std::path::PathBuf;
use std::sync::Arc;

pub use self::csv::CsvHighlighter;
pub use self::loader::{HighlightConfigLoader, LoadError};
pub use self::rule::{Rule, Theme};
pub use self::span::{Color, SpanSet, Style, StyledRange};

/// Turns a buffer snapshot into styled ranges.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, buffer: &str) -> Vec<StyledRange>;
}

/// Options shared by all highlighters.
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    /// Selects the dark colour table where a format has one.
    pub dark_mode: bool,
    pub tab_width: u8,
    /// Theme used by the data driven plaintext highlighter.
    pub theme: String,
    /// Directory holding `languages/` and `themes/` definitions.
    pub syntax_dir: Option<PathBuf>,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            dark_mode: false,
            tab_width: 4,
            theme: "default".to_string(),
            syntax_dir: None,
        }
    }
}

/// Base pass plus an ordered rule list styled by one active theme.
#[derive(Debug, Clone)]
pub struct RuleHighlighter {
    rules: Arc<[Rule]>,
    theme: Theme,
    tab_width: u8,
}

impl RuleHighlighter {
    pub fn new(rules: Arc<[Rule]>, theme: Theme, tab_width: u8) -> Self {
        Self {
            rules,
            theme,
            tab_width,
        }
    }

    /// A highlighter running the base pass only.
    pub fn base_only(tab_width: u8) -> Self {
        Self::new(Arc::from(Vec::new()), Theme::default(), tab_width)
    }

    /// Replaces the active theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn paint_rules(&self, spans: &mut SpanSet<'_>) {
        for rule in self.rules.iter() {
            if let Some(style) = self.theme.style(rule.token()) {
                rule.paint(spans, style);
            }
        }
    }
}

impl Highlighter for RuleHighlighter {
    fn highlight(&self, buffer: &str) -> Vec<StyledRange> {
        let mut spans = SpanSet::new(buffer);
        base::paint(&mut spans, self.tab_width);
        self.paint_rules(&mut spans);
        spans.into_ranges()
    }
}

/// Builds the highlighter of format `id` for `document`.
pub fn highlighter_for(
    id: FormatId,
    document: &Document,
    options: &HighlightOptions,
    loader: &HighlightConfigLoader,
) -> Box<dyn Highlighter> {
    match id {
        FormatId::Markdown => Box::new(markdown::highlighter(options)),
        FormatId::Csv => Box::new(CsvHighlighter::new(options)),
        FormatId::Wikitext => Box::new(wikitext::highlighter(options)),
        FormatId::TodoTxt => Box::new(todotxt::highlighter(options)),
        FormatId::KeyValue => Box::new(keyvalue::highlighter(options)),
        FormatId::AsciiDoc => Box::new(asciidoc::highlighter(options)),
        FormatId::Orgmode => Box::new(orgmode::highlighter(options)),
        FormatId::Latex => Box::new(latex::highlighter(options)),
        FormatId::Restructuredtext => Box::new(rst::highlighter(options)),
        FormatId::Plaintext => Box::new(plaintext::highlighter(
            document.extension(),
            options,
            loader,
        )),
        FormatId::EmbedBinary | FormatId::Unknown => {
            Box::new(RuleHighlighter::base_only(options.tab_width))
        }
    }
}
