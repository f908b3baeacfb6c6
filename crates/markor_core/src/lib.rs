//! Markup engine of the Markor note editor.
//!
//! For every supported format this crate provides syntax highlighting of an
//! editable buffer, conversion of the markup to an HTML preview and the
//! format's toolbar snippets. The [`FormatRegistry`] detects the format of a
//! [`Document`] and bundles its engines.
//!
//! # Modules
//!
//! - [`document`] - The opened file: path, name, extension and title
//! - [`format`] - Format ids and the ordered list of registered formats
//! - [`registry`] - Format detection and per-document engine bundles
//! - [`convert`] - Markup to HTML conversion
//! - [`highlight`] - Styled ranges over a text buffer
//! - [`actions`] - Toolbar snippets and the edits they produce
//! - [`autoformat`] - List continuation, renumbering and todo.txt dates
//! - [`preview`] - Delivery of the newest preview conversion

pub mod actions;
pub mod autoformat;
pub mod convert;
pub mod document;
pub mod format;
pub mod highlight;
pub mod preview;
pub mod registry;

// Re-export commonly used types at crate root
pub use actions::{ActionKind, ActionProvider, ActionSnippet, TextEdit};
pub use autoformat::{AutoFormatOptions, ChangeWatcher, InputFilter};
pub use convert::{RenderOptions, TextConverter};
pub use document::Document;
pub use format::{Format, FormatId, FORMATS};
pub use highlight::{HighlightConfigLoader, HighlightOptions, Highlighter, Style, StyledRange};
pub use preview::{Preview, PreviewChannel};
pub use registry::{FormatBundle, FormatRegistry};
