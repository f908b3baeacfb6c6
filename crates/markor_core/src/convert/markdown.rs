//! Markdown to HTML with GitHub style heading ids.
//!
//! Besides the CommonMark extensions enabled in [`parser_options`], the
//! converter:
//! - escapes spaces in link destinations,
//! - replaces a `[TOC]: #` reference definition with a table of contents,
//! - adds KaTeX, Prism, Mermaid and admonition includes when the text uses them.

use super::template::{css_include, escape_html, js_include, Page};
use super::{ConvertOutput, RenderOptions, TextConverter};
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

const EXTENSIONS: &[&str] = &[
    ".md", ".markdown", ".mkd", ".mdown", ".mkdn", ".mdwn", ".mdx", ".text", ".rmd",
];

/// Link destinations only get their spaces encoded.
const LINK_SPACE: &AsciiSet = &CONTROLS.add(b' ');

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[(.*?)\]\((.*?)(\s+".*")?\)"#).unwrap());

/// Converts heading text to a URL-safe slug following GitHub's convention.
///
/// GitHub's algorithm:
/// 1. Convert to lowercase
/// 2. Replace spaces with hyphens
/// 3. Remove all characters except alphanumeric, hyphens, and underscores
/// 4. Collapse multiple consecutive hyphens into one
///
/// # Example
///
/// ```
/// use markor_core::convert::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("API Reference (v2)"), "api-reference-v2");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '_' {
                Some(c)
            } else if c == ' ' || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// A heading of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 for `<h1>` up to 6.
    pub level: u8,
    pub title: String,
    pub slug: String,
}

/// Result of rendering markdown to HTML.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub html: String,
    pub headings: Vec<Heading>,
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Escapes spaces in `[title](link with spaces "Title")` destinations.
fn escape_spaces_in_links(markup: &str) -> Cow<'_, str> {
    LINK.replace_all(markup, |caps: &Captures<'_>| {
        let url = caps.get(2).map_or("", |m| m.as_str()).trim();
        format!(
            "[{}]({}{})",
            &caps[1],
            utf8_percent_encode(url, LINK_SPACE),
            caps.get(3).map_or("", |m| m.as_str())
        )
    })
}

/// Headings in document order, explicit `{#id}` attributes win over slugs.
fn collect_headings(events: &[(Event<'_>, Range<usize>)]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    let mut i = 0;
    while i < events.len() {
        if let Event::Start(Tag::Heading { level, id, .. }) = &events[i].0 {
            let mut title = String::new();
            i += 1;
            while i < events.len() {
                match &events[i].0 {
                    Event::Text(text) | Event::Code(text) => title.push_str(text),
                    Event::End(TagEnd::Heading(_)) => break,
                    _ => {}
                }
                i += 1;
            }

            let slug = match id {
                Some(id) => id.to_string(),
                None => {
                    let slug = slugify(&title);
                    let count = seen.entry(slug.clone()).or_insert(0);
                    *count += 1;
                    if *count == 1 {
                        slug
                    } else {
                        format!("{slug}-{}", *count - 1)
                    }
                }
            };

            headings.push(Heading {
                level: *level as u8,
                title,
                slug,
            });
        }
        i += 1;
    }

    headings
}

/// Nested list of links to `headings`.
fn toc_html(headings: &[Heading]) -> String {
    let mut html = String::from("<div class=\"markor-table-of-contents toc\">\n");
    let base = headings.iter().map(|h| h.level).min().unwrap_or(1);
    let mut depth = 0;

    for heading in headings {
        let target = usize::from(heading.level - base) + 1;
        while depth < target {
            html.push_str("<ul class=\"markor-table-of-contents-list\">\n");
            depth += 1;
        }
        while depth > target {
            html.push_str("</ul>\n");
            depth -= 1;
        }
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>\n",
            heading.slug,
            escape_html(&heading.title)
        ));
    }
    for _ in 0..depth {
        html.push_str("</ul>\n");
    }

    html.push_str("</div>\n");
    html
}

/// Renders `markdown` to an HTML fragment.
///
/// # Example
///
/// ```
/// use markor_core::convert::markdown::to_html;
///
/// let rendered = to_html("# Hello\n\nWorld");
/// assert!(rendered.html.contains("<h1 id=\"hello\">Hello</h1>"));
/// assert_eq!(rendered.headings[0].slug, "hello");
/// ```
pub fn to_html(markdown: &str) -> Rendered {
    let parser = Parser::new_ext(markdown, parser_options());
    let toc_offset = parser
        .reference_definitions()
        .get("TOC")
        .filter(|def| def.dest.as_ref() == "#")
        .map(|def| def.span.start);

    let events: Vec<(Event, Range<usize>)> = parser.into_offset_iter().collect();
    let headings = collect_headings(&events);

    let mut processed = Vec::with_capacity(events.len() + 1);
    let mut slugs = headings.iter().map(|heading| heading.slug.clone());
    let mut pending_toc = toc_offset;
    let mut depth = 0usize;

    for (event, range) in events {
        if let Some(offset) = pending_toc {
            if depth == 0 && range.start >= offset {
                processed.push(Event::Html(CowStr::from(toc_html(&headings))));
                pending_toc = None;
            }
        }

        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }

        let event = match event {
            Event::Start(Tag::Heading {
                level,
                id: _,
                classes,
                attrs,
            }) => Event::Start(Tag::Heading {
                level,
                id: slugs.next().map(CowStr::from),
                classes,
                attrs,
            }),
            event => event,
        };
        processed.push(event);
    }

    if pending_toc.is_some() {
        processed.push(Event::Html(CowStr::from(toc_html(&headings))));
    }

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, processed.into_iter());

    tracing::trace!(headings = headings.len(), toc = toc_offset.is_some(), "Rendered markdown");

    Rendered { html, headings }
}

fn prism_includes(options: &RenderOptions) -> String {
    let theme = if options.light_mode { "" } else { "-tomorrow" };
    let mut head = [
        css_include(options, &format!("prism/themes/prism{theme}.min.css")),
        css_include(options, "prism/prism-markor.css"),
        css_include(options, "prism/plugins/toolbar/prism-toolbar.css"),
        js_include(options, "prism/prism.js"),
        js_include(options, "prism/components.js"),
        js_include(options, "prism/prism-markor.js"),
        js_include(options, "prism/plugins/autoloader/prism-autoloader.min.js"),
        js_include(options, "prism/plugins/toolbar/prism-toolbar.min.js"),
        js_include(
            options,
            "prism/plugins/copy-to-clipboard/prism-copy-to-clipboard.min.js",
        ),
    ]
    .concat();

    if options.show_line_numbers {
        head.push_str(&css_include(
            options,
            "prism/plugins/line-numbers/prism-line-numbers-markor.css",
        ));
        head.push_str(&js_include(
            options,
            "prism/plugins/line-numbers/prism-line-numbers.min.js",
        ));
        head.push_str(&js_include(
            options,
            "prism/plugins/line-numbers/prism-line-numbers-markor.js",
        ));
    }

    head
}

/// Markdown, also the backend of CSV, Wikitext and source code previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl TextConverter for MarkdownConverter {
    fn render(&self, markup: &str, options: &RenderOptions, _file: Option<&Path>) -> ConvertOutput {
        let markup = markup
            .replace("{{ site.baseurl }}", "..")
            .replace("](@attachment/", "](../attachements/");
        let markup = escape_spaces_in_links(&markup);

        let mut head = String::new();
        let mut on_load = String::new();

        if markup.contains('$') {
            head.push_str(&css_include(options, "katex/katex.min.css"));
            head.push_str(&js_include(options, "katex/katex.min.js"));
            head.push_str(&js_include(options, "katex/katex-render.js"));
            head.push_str(&js_include(options, "katex/mhchem.min.js"));
            head.push_str("<style>.katex { font-size: inherit; }</style>");
        }

        if markup.contains("```") {
            head.push_str(&prism_includes(options));
            on_load.push_str("usePrismCodeBlock();");
            if options.show_line_numbers {
                on_load.push_str("enableLineNumbers(); adjustLineNumbers();");
            }
        }

        if markup.contains("```mermaid") {
            let theme = if options.light_mode { "default" } else { "dark" };
            head.push_str(&js_include(options, "mermaid/mermaid.min.js"));
            head.push_str(&format!(
                "<script>mermaid.initialize({{theme:'{theme}',logLevel:5,securityLevel:'loose'}});</script>"
            ));
        }

        if markup.contains("!!!") || markup.contains("???") {
            head.push_str(&css_include(options, "flexmark/admonition.css"));
            head.push_str(&js_include(options, "flexmark/admonition.js"));
        }

        let rendered = to_html(&markup);
        ConvertOutput::Page(Page::new(rendered.html).head(head).on_load(on_load))
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        name.ends_with(".md.txt")
            || EXTENSIONS
                .iter()
                .any(|ext| name.len() > ext.len() && name.ends_with(ext))
    }
}
