//! Format detection and the engines bundled for an opened document.

use crate::actions::{ActionProvider, ActionSnippet, FormatActions};
use crate::autoformat::{
    change_watcher_for, input_filter_for, AutoFormatOptions, ChangeWatcher, InputFilter,
};
use crate::convert::{MarkdownConverter, RenderOptions, TextConverter};
use crate::document::{extension_of, Document};
use crate::format::{Format, FormatId, FORMATS};
use crate::highlight::{
    highlighter_for, HighlightConfigLoader, HighlightOptions, Highlighter, StyledRange,
};
use std::fmt;
use std::path::Path;

/// Files handed to an external viewer instead of being opened as text.
const EXTERNAL_EXTENSIONS: &[&str] = &[".pdf"];

/// Used when an explicitly requested format has no converter.
static FALLBACK_CONVERTER: MarkdownConverter = MarkdownConverter;

/// Converter, highlighter, toolbar and auto-format collaborators of one document.
pub struct FormatBundle {
    id: FormatId,
    document: Document,
    converter: &'static dyn TextConverter,
    highlighter: Box<dyn Highlighter>,
    actions: Box<dyn ActionProvider>,
    input_filter: Option<Box<dyn InputFilter>>,
    change_watcher: Option<Box<dyn ChangeWatcher>>,
}

impl fmt::Debug for FormatBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatBundle")
            .field("id", &self.id)
            .field("document", &self.document)
            .field("input_filter", &self.input_filter.is_some())
            .field("change_watcher", &self.change_watcher.is_some())
            .finish_non_exhaustive()
    }
}

impl FormatBundle {
    pub fn id(&self) -> FormatId {
        self.id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn converter(&self) -> &'static dyn TextConverter {
        self.converter
    }

    /// Styled ranges of `buffer`, recomputed from scratch.
    pub fn highlight(&self, buffer: &str) -> Vec<StyledRange> {
        self.highlighter.highlight(buffer)
    }

    /// Complete HTML preview of `markup`, the text of the bundled document.
    pub fn convert(&self, markup: &str, options: &RenderOptions) -> String {
        self.converter
            .convert(markup, options, Some(self.document.path()))
    }

    pub fn actions(&self) -> Vec<ActionSnippet> {
        self.actions.actions(&self.document)
    }

    pub fn label_prefix(&self) -> &str {
        self.actions.label_prefix()
    }

    pub fn input_filter(&self) -> Option<&dyn InputFilter> {
        self.input_filter.as_deref()
    }

    pub fn change_watcher(&self) -> Option<&dyn ChangeWatcher> {
        self.change_watcher.as_deref()
    }
}

/// Looks up formats and builds [`FormatBundle`]s.
#[derive(Debug)]
pub struct FormatRegistry {
    loader: HighlightConfigLoader,
    highlight: HighlightOptions,
    autoformat: AutoFormatOptions,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new(HighlightOptions::default(), AutoFormatOptions::default())
    }
}

impl FormatRegistry {
    pub fn new(highlight: HighlightOptions, autoformat: AutoFormatOptions) -> Self {
        Self {
            loader: HighlightConfigLoader::new(highlight.syntax_dir.clone()),
            highlight,
            autoformat,
        }
    }

    /// Registered formats in detection order.
    pub fn formats() -> &'static [Format] {
        &FORMATS
    }

    /// The registered entry of `id`.
    pub fn format(id: FormatId) -> &'static Format {
        FORMATS
            .iter()
            .find(|format| format.id == id)
            .unwrap_or(&FORMATS[FORMATS.len() - 1])
    }

    /// First format claiming `path`, `None` if no format does.
    fn claiming_format(path: &Path, text_only: bool) -> Option<&'static Format> {
        FORMATS.iter().find(|format| {
            if text_only && format.id == FormatId::EmbedBinary {
                return false;
            }
            format
                .converter
                .map_or(false, |converter| converter.is_file_out_of_this_format(path))
        })
    }

    /// Format of `document`, Markdown when no format claims it.
    ///
    /// # Examples
    ///
    /// ```
    /// use markor_core::{Document, FormatId, FormatRegistry};
    ///
    /// assert_eq!(FormatRegistry::detect(&Document::open("notes.todo.txt", None)), FormatId::TodoTxt);
    /// assert_eq!(FormatRegistry::detect(&Document::open("paper.tex", None)), FormatId::Latex);
    /// ```
    pub fn detect(document: &Document) -> FormatId {
        Self::claiming_format(document.path(), false)
            .map(|format| format.id)
            .unwrap_or(FormatId::Markdown)
    }

    /// Builds the engines for `document`.
    ///
    /// An explicit id other than [`FormatId::Unknown`] wins over detection.
    pub fn select_format(&self, explicit: Option<FormatId>, document: &Document) -> FormatBundle {
        let id = match explicit {
            Some(id) if id != FormatId::Unknown => id,
            _ => {
                let id = Self::detect(document);
                tracing::debug!(path = %document.path().display(), format = %id, "Detected format");
                id
            }
        };

        FormatBundle {
            id,
            document: document.clone(),
            converter: Self::format(id).converter.unwrap_or(&FALLBACK_CONVERTER),
            highlighter: highlighter_for(id, document, &self.highlight, &self.loader),
            actions: Box::new(FormatActions::new(id)),
            input_filter: input_filter_for(id, &self.autoformat),
            change_watcher: change_watcher_for(id, &self.autoformat),
        }
    }

    /// Whether any registered format claims `path`; binary media are skipped
    /// when `text_only` is set.
    pub fn is_file_supported(path: &Path, text_only: bool) -> bool {
        Self::claiming_format(path, text_only).is_some()
    }

    /// Whether `path` should be opened by an external application.
    pub fn is_external_file(path: &Path) -> bool {
        EXTERNAL_EXTENSIONS.contains(&extension_of(path).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(name: &str) -> FormatId {
        FormatRegistry::detect(&Document::open(name, None))
    }

    #[test]
    fn test_detection() {
        let cases = [
            ("README.md", FormatId::Markdown),
            ("notes.md.txt", FormatId::Markdown),
            ("todo.txt", FormatId::TodoTxt),
            ("notes.todo.txt", FormatId::TodoTxt),
            ("table.csv", FormatId::Csv),
            ("page.wikitext", FormatId::Wikitext),
            ("config.yaml", FormatId::KeyValue),
            ("book.adoc", FormatId::AsciiDoc),
            ("agenda.org", FormatId::Orgmode),
            ("paper.tex", FormatId::Latex),
            ("index.rst", FormatId::Restructuredtext),
            ("photo.jpg", FormatId::EmbedBinary),
            ("notes.txt", FormatId::Plaintext),
            ("main.rs", FormatId::Plaintext),
        ];
        for (name, id) in cases {
            assert_eq!(detect(name), id, "{name}");
        }
    }

    #[test]
    fn test_canonical_extension_not_claimed_earlier() {
        for format in FORMATS.iter() {
            let Some(converter) = format.converter else {
                continue;
            };
            if format.default_extension == ".txt" {
                continue;
            }
            let path = Path::new("note").with_extension(format.default_extension.trim_start_matches('.'));
            assert!(converter.is_file_out_of_this_format(&path), "{path:?}");
            assert_eq!(detect(&path.to_string_lossy()), format.id, "{path:?}");
        }
    }

    #[test]
    fn test_fallback_to_markdown() {
        assert_eq!(detect("no_such_file.unknownext"), FormatId::Markdown);
        let bundle = FormatRegistry::default().select_format(None, &Document::open("Makefile.xyz", None));
        assert_eq!(bundle.id(), FormatId::Markdown);
    }

    #[test]
    fn test_detection_is_order_stable() {
        let first: Vec<_> = ["a.md", "b.csv", "todo.txt", "c.txt"].map(detect).to_vec();
        for _ in 0..3 {
            assert_eq!(["a.md", "b.csv", "todo.txt", "c.txt"].map(detect).to_vec(), first);
        }
    }

    #[test]
    fn test_explicit_format_wins() {
        let registry = FormatRegistry::default();
        let document = Document::open("notes.md", None);
        assert_eq!(
            registry.select_format(Some(FormatId::Latex), &document).id(),
            FormatId::Latex
        );
        assert_eq!(
            registry.select_format(Some(FormatId::Unknown), &document).id(),
            FormatId::Markdown
        );
    }

    #[test]
    fn test_bundle() {
        let registry = FormatRegistry::default();
        let bundle = registry.select_format(None, &Document::open("paper.tex", None));
        assert_eq!(bundle.label_prefix(), "LaTeX: ");
        assert!(bundle.actions().iter().any(|action| action.id == "latex_bold"));
        assert!(bundle.input_filter().is_none());

        let html = bundle.convert("\\section{Intro}", &RenderOptions::default());
        assert!(html.contains("<h1>Intro</h1>"));

        let ranges = bundle.highlight("Visit http://example.com now");
        assert_eq!(ranges.iter().filter(|r| r.start == 6 && r.end == 24).count(), 1);

        let markdown = registry.select_format(None, &Document::open("a.md", None));
        assert!(markdown.input_filter().is_some());
        assert!(markdown.change_watcher().is_some());
    }

    #[test]
    fn test_supported_and_external() {
        assert!(FormatRegistry::is_file_supported(Path::new("a.md"), true));
        assert!(FormatRegistry::is_file_supported(Path::new("a.png"), false));
        assert!(!FormatRegistry::is_file_supported(Path::new("a.png"), true));
        assert!(!FormatRegistry::is_file_supported(Path::new("missing.bin"), false));

        assert!(FormatRegistry::is_external_file(Path::new("report.pdf")));
        assert!(FormatRegistry::is_external_file(Path::new("REPORT.PDF")));
        assert!(!FormatRegistry::is_external_file(Path::new("report.md")));
    }
}
