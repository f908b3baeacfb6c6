//! The HTML page every converter output is wrapped into.
//!
//! The template carries placeholder comments which are replaced with the
//! embedded stylesheets, the converter specific head includes and the body:
//!
//! - `/*__BASE_CSS__*/` -> base.css
//! - `/*__THEME_CSS__*/` -> light.css or dark.css
//! - `<!--__HEAD__-->` -> head includes plus the onload script
//! - `__BODY_CLASS__` -> `light` or `dark`
//! - `<!--__BODY__-->` -> converted markup

use super::RenderOptions;

/// HTML template with placeholders for CSS, head and body.
pub const HTML_TEMPLATE: &str = include_str!("../../assets/template.html");

/// Layout shared by both themes.
pub const BASE_CSS: &str = include_str!("../../assets/base.css");

pub const LIGHT_CSS: &str = include_str!("../../assets/light.css");

pub const DARK_CSS: &str = include_str!("../../assets/dark.css");

/// Converter specific additions to the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Raw HTML placed at the end of `<head>`.
    pub head: String,
    /// Raw HTML placed inside `<body>`.
    pub body: String,
    /// Script run once the page has loaded.
    pub on_load: String,
}

impl Page {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn head(mut self, head: impl Into<String>) -> Self {
        self.head = head.into();
        self
    }

    pub fn on_load(mut self, on_load: impl Into<String>) -> Self {
        self.on_load = on_load.into();
        self
    }
}

/// Builds the complete HTML document for `page`.
///
/// The body is substituted last so markup which happens to contain one of
/// the placeholder comments is never expanded.
///
/// # Example
///
/// ```
/// use markor_core::convert::template::{wrap, Page};
/// use markor_core::convert::RenderOptions;
///
/// let html = wrap(&Page::new("<p>Hi</p>"), &RenderOptions::default());
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// assert!(html.contains("<body class=\"light\">\n<p>Hi</p>"));
/// ```
pub fn wrap(page: &Page, options: &RenderOptions) -> String {
    let mut head = page.head.clone();
    if !page.on_load.is_empty() {
        head.push_str("<script>window.addEventListener('load', function() {\n");
        head.push_str(&page.on_load);
        head.push_str("\n});</script>");
    }

    let (theme_css, body_class) = if options.light_mode {
        (LIGHT_CSS, "light")
    } else {
        (DARK_CSS, "dark")
    };

    HTML_TEMPLATE
        .replace("/*__BASE_CSS__*/", BASE_CSS)
        .replace("/*__THEME_CSS__*/", theme_css)
        .replace("__BODY_CLASS__", body_class)
        .replace("<!--__HEAD__-->", &head)
        .replace("<!--__BODY__-->", &page.body)
}

/// The minimal well formed document, used for empty markup.
pub fn empty_document(options: &RenderOptions) -> String {
    wrap(&Page::default(), options)
}

/// Escapes the five HTML special characters.
///
/// ```
/// use markor_core::convert::template::escape_html;
///
/// assert_eq!(escape_html("<a href=\"x\">&'</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// `<link>` for a stylesheet bundled under the asset root.
pub(crate) fn css_include(options: &RenderOptions, path: &str) -> String {
    format!(
        "<link rel='stylesheet' href='{}{path}'/>",
        options.asset_root
    )
}

/// `<script>` for a script bundled under the asset root.
pub(crate) fn js_include(options: &RenderOptions, path: &str) -> String {
    format!("<script src='{}{path}'></script>", options.asset_root)
}

/// JS expression evaluating to `markup`, carried base64 encoded so it needs no escaping.
pub(crate) fn embedded_markup_js(markup: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    format!(
        "new TextDecoder().decode(Uint8Array.from(atob('{}'), function(c) {{ return c.charCodeAt(0); }}))",
        STANDARD.encode(markup.as_bytes())
    )
}
