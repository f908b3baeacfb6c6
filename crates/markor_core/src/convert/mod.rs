//! Markup to HTML conversion for preview.
//!
//! Every converter produces a complete HTML document. Converters either
//! render server side (Markdown, the regex [`pipeline`]s of LaTeX and
//! reStructuredText) or embed the raw markup for a client side renderer
//! (AsciiDoc, Org-mode).

mod asciidoc;
mod binary;
pub mod csv;
mod keyvalue;
mod latex;
pub mod markdown;
mod orgmode;
pub mod pipeline;
mod plaintext;
mod rst;
pub mod template;
mod todotxt;
pub mod wikitext;

use std::path::Path;

pub use self::asciidoc::AsciidocConverter;
pub use self::binary::EmbedBinaryConverter;
pub use self::csv::{CsvConverter, CsvDialect};
pub use self::keyvalue::KeyValueConverter;
pub use self::latex::LatexConverter;
pub use self::markdown::{slugify, MarkdownConverter};
pub use self::orgmode::OrgmodeConverter;
pub use self::pipeline::{Pipeline, PipelineError, Stage, StageLevel};
pub use self::plaintext::{is_code_extension, PlaintextConverter};
pub use self::rst::RestructuredtextConverter;
pub use self::template::Page;
pub use self::todotxt::TodoTxtConverter;
pub use self::wikitext::WikitextConverter;

/// Default prefix of bundled JS/CSS assets.
pub const DEFAULT_ASSET_ROOT: &str = "assets/";

/// Options for rendering markup to HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Light or dark page theme.
    pub light_mode: bool,
    /// Line numbers in code blocks where the renderer supports them.
    pub show_line_numbers: bool,
    /// Prefix for bundled scripts and stylesheets such as KaTeX and Prism.
    pub asset_root: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            light_mode: true,
            show_line_numbers: false,
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
        }
    }
}

/// Rendered output of a converter before it is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutput {
    /// Body and head includes, wrapped into the shared template.
    Page(Page),
    /// A complete document delivered as-is, e.g. an `.html` file.
    Document(String),
}

impl ConvertOutput {
    pub fn page(body: impl Into<String>) -> Self {
        Self::Page(Page::new(body))
    }

    /// The final HTML document.
    pub fn into_html(self, options: &RenderOptions) -> String {
        match self {
            Self::Page(page) => template::wrap(&page, options),
            Self::Document(html) => html,
        }
    }

    /// The page body, or the whole document.
    pub fn body(&self) -> &str {
        match self {
            Self::Page(page) => &page.body,
            Self::Document(html) => html,
        }
    }
}

/// Converts markup of one format to HTML and claims the files of that format.
pub trait TextConverter: Send + Sync {
    /// Renders non-empty `markup`. `file` is the document being previewed.
    fn render(&self, markup: &str, options: &RenderOptions, file: Option<&Path>) -> ConvertOutput;

    /// Whether `path` belongs to this format.
    ///
    /// Checks the name first, content checks read at most a bounded prefix.
    fn is_file_out_of_this_format(&self, path: &Path) -> bool;

    /// Whether empty markup is still rendered, e.g. when the content comes from `file`.
    fn renders_empty_markup(&self) -> bool {
        false
    }

    /// Converts `markup` to a complete HTML document, never fails.
    fn convert(&self, markup: &str, options: &RenderOptions, file: Option<&Path>) -> String {
        if markup.is_empty() && !self.renders_empty_markup() {
            return template::empty_document(options);
        }
        self.render(markup, options, file).into_html(options)
    }

    /// [`TextConverter::convert`] where `None` stands for empty markup.
    fn convert_opt(
        &self,
        markup: Option<&str>,
        options: &RenderOptions,
        file: Option<&Path>,
    ) -> String {
        self.convert(markup.unwrap_or_default(), options, file)
    }
}

/// Lower-cased extension of `file`, `""` without a file.
pub(crate) fn file_extension(file: Option<&Path>) -> String {
    file.map(crate::document::extension_of).unwrap_or_default()
}
