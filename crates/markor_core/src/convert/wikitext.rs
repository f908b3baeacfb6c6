//! Zim wiki text, transpiled line by line to markdown.

use super::markdown::MarkdownConverter;
use super::template::escape_html;
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use fancy_regex::{Captures, Regex};
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

const NOTEBOOK_FILE: &str = "notebook.zim";

static ZIM_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^Content-Type: text/x-zim-wiki(?:\r\n|\r|\n)Wiki-Format: zim \d+\.\d+(?:\r\n|\r|\n)Creation-Date: \d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[.+:\d]+",
    )
    .unwrap()
});
static ZIM_CONTENT_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*Content-Type:\s*text/x-zim-wiki").unwrap());
static LINE_BREAK: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"\r\n|\r|\n").unwrap());

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|(?<=\s))(==+)[ \t]+(.*?)[ \t]\1(?=$|\s)").unwrap());
static ITALICS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|(?<=[\s/]))(/{2})[^/\s](.*?)[^/\s]?\1(?=$|[\s/])").unwrap());
static HIGHLIGHTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|(?<=[\s_]))(_{2})[^_\s](.*?)[^_\s]?\1(?=$|[\s_])").unwrap());
static PREFORMATTED_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"''(?!')(.+?)''").unwrap());
static PREFORMATTED_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'''$").unwrap());
static LIST_ORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s{0,10})(?:\d+|[a-zA-Z])\.(?= )").unwrap());
static CHECKLIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\t*)\[([ x*><])\](?= )").unwrap());
static SUPERSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^\{(?!~)(.+?)\}").unwrap());
static SUBSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"_\{(?!~)(.+?)\}").unwrap());
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(?!\[)((.+?)(\|(.+?))?\]*)\]\]").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(?!\{)(.*?)\}\}").unwrap());

static WEB_LINK: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"^[a-z]+://.+").unwrap());
static IMAGE_OPTION: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?i)^(id|width|height|href)=(.+)$").unwrap());

/// Replaces every match of `regex` in `line`, keeping the line when matching fails.
fn replace_all<'t>(
    regex: &Regex,
    line: &'t str,
    replacement: impl FnMut(&Captures) -> String,
) -> Cow<'t, str> {
    match regex.try_replacen(line, 0, replacement) {
        Ok(replaced) => replaced,
        Err(err) => {
            tracing::trace!(?err, pattern = regex.as_str(), "Skipping wikitext rule");
            Cow::Borrowed(line)
        }
    }
}

/// `Page:Sub Page` becomes `Page/Sub_Page.txt`.
fn page_path_to_file(page_path: &str) -> PathBuf {
    let path = page_path.replace(' ', "_");
    let mut file: PathBuf = path.split(':').filter(|part| !part.is_empty()).collect();
    file.set_extension("txt");
    file
}

/// Closest ancestor of `page` holding a `notebook.zim`, else the folder of `page`.
fn notebook_root(page: &Path) -> Option<PathBuf> {
    page.ancestors()
        .skip(1)
        .find(|dir| dir.join(NOTEBOOK_FILE).exists())
        .or_else(|| page.parent())
        .map(Path::to_path_buf)
}

/// Folder holding the attachments and sub pages of `page`.
fn attachment_dir(page: &Path) -> PathBuf {
    let parent = page.parent().unwrap_or(page);
    match page.file_stem() {
        Some(stem) => parent.join(stem),
        None => parent.to_path_buf(),
    }
}

/// A `[[target|description]]` link resolved against the page it appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    pub target: String,
    pub description: Option<String>,
    pub resolved: Option<String>,
    pub is_web_link: bool,
}

impl WikiLink {
    /// Resolves `link`, a complete `[[...]]` expression. `page` is the current page file.
    pub fn resolve(link: &str, page: Option<&Path>) -> Option<Self> {
        let captures = LINK.captures(link).ok().flatten()?;
        let whole = captures.get(0)?;
        if whole.start() != 0 || whole.end() != link.len() {
            return None;
        }
        let target = captures.get(2)?.as_str().to_string();
        let description = captures.get(4).map(|m| m.as_str().to_string());

        if WEB_LINK.is_match(&target) {
            return Some(Self {
                resolved: Some(target.clone()),
                target,
                description,
                is_web_link: true,
            });
        }

        let resolved = page.and_then(|page| resolve_page_path(&target, page));
        Some(Self {
            target,
            description,
            resolved,
            is_web_link: false,
        })
    }

    /// The equivalent markdown link.
    fn to_markdown(&self) -> String {
        let href = if self.is_web_link {
            self.target.replace(' ', "%20")
        } else {
            match &self.resolved {
                Some(resolved) => format!("file://{resolved}"),
                None => self.target.replace(' ', "%20"),
            }
        };
        let description = self
            .description
            .as_deref()
            .unwrap_or(&self.target)
            .replace('+', "&#43;");
        format!("[{description}]({href})")
    }
}

fn resolve_page_path(target: &str, page: &Path) -> Option<String> {
    // Anchors inside a page are dropped, the link points at the page.
    let path = match target.split_once('#') {
        Some((path, anchor)) if !anchor.is_empty() => path,
        _ => target,
    };
    if path.is_empty() {
        return None;
    }

    if let Some(sub_page) = path.strip_prefix('+') {
        let folder = page.to_string_lossy().replace(".txt", "");
        let resolved = Path::new(&folder).join(page_path_to_file(sub_page));
        return Some(resolved.display().to_string());
    }

    let root = notebook_root(page)?;

    if let Some(top_level) = path.strip_prefix(':') {
        return Some(root.join(page_path_to_file(top_level)).display().to_string());
    }

    if !path.contains('/') {
        let relative = page_path_to_file(path);
        let mut current = page;
        while current != root {
            let parent = current.parent()?;
            let candidate = parent.join(&relative);
            if candidate.exists() {
                return Some(candidate.display().to_string());
            }
            current = parent;
        }
        return None;
    }

    if path.starts_with("./") || path.starts_with("../") {
        let file = attachment_dir(page).join(path);
        let file = file.canonicalize().unwrap_or(file);
        return Some(file.display().to_string());
    }

    Some(path.to_string())
}

/// `{{image}}` relative to the attachment folder of the page, with optional
/// `?id=..&width=..&height=..&href=..` options.
fn convert_image(image: &str, page: Option<&Path>) -> String {
    let page_name = page
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let page_folder = page_name.strip_suffix(".txt").unwrap_or(&page_name);
    let path = if image.starts_with('/') || page_folder.is_empty() {
        image.to_string()
    } else {
        Path::new(page_folder).join(image).display().to_string()
    };

    let Some((image, options)) = path.split_once('?') else {
        return format!("![{page_name}]({path})");
    };

    let mut link = None;
    let mut attributes = String::new();
    for option in options.split('&') {
        let Some(captures) = IMAGE_OPTION.captures(option) else {
            continue;
        };
        let key = captures[1].to_lowercase();
        let value = escape_html(&percent_decode_str(&captures[2]).decode_utf8_lossy());
        if key == "href" {
            link = Some(value);
        } else {
            attributes.push_str(&format!("{key}=\"{value}\" "));
        }
    }

    let html = format!("<img src=\"{image}\" alt=\"{page_name}\" {attributes}/>");
    match link {
        Some(link) => format!("<a href=\"{link}\">{html}</a>"),
        None => html,
    }
}

fn convert_line(line: &str, page: Option<&Path>, light_mode: bool) -> String {
    let line = replace_all(&HEADING, line, |caps| {
        let level = 7 - caps[1].len().min(6);
        format!("{} {}", "#".repeat(level), caps[2].trim())
    });
    let line = replace_all(&ITALICS, &line, |caps| {
        format!("*{}*", caps[0].trim_matches('/'))
    });
    let line = replace_all(&HIGHLIGHTED, &line, |caps| {
        let color = if light_mode { "#ffff00" } else { "#FFA062" };
        let text = &caps[0];
        format!(
            "<span style=\"background-color: {color}\">{}</span>",
            &text[2..text.len() - 2]
        )
    });
    let line = replace_all(&PREFORMATTED_INLINE, &line, |caps| format!("`{}`", &caps[1]));
    let line = replace_all(&PREFORMATTED_FENCE, &line, |_| "```".to_string());
    let line = replace_all(&LIST_ORDERED, &line, |caps| format!("{}1.", &caps[1]));
    let line = replace_all(&CHECKLIST, &line, |caps| {
        let mark = if &caps[2] == "*" { "x" } else { " " };
        format!("{}- [{mark}]", &caps[1])
    });
    let line = replace_all(&SUPERSCRIPT, &line, |caps| format!("<sup>{}</sup>", &caps[1]));
    let line = replace_all(&SUBSCRIPT, &line, |caps| format!("<sub>{}</sub>", &caps[1]));
    let line = replace_all(&LINK, &line, |caps| match WikiLink::resolve(&caps[0], page) {
        Some(link) => link.to_markdown(),
        None => caps[0].to_string(),
    });
    let line = replace_all(&IMAGE, &line, |caps| convert_image(&caps[1], page));
    line.into_owned()
}

/// Transpiles zim wiki text to markdown.
///
/// ```
/// use markor_core::convert::wikitext::to_markdown;
///
/// assert_eq!(to_markdown("====== Title ======", None, true), "# Title  \n");
/// assert_eq!(to_markdown("[*] done //now//", None, true), "- [x] done *now*  \n");
/// ```
pub fn to_markdown(markup: &str, page: Option<&Path>, light_mode: bool) -> String {
    let content = match ZIM_HEADER.find(markup) {
        Ok(Some(header)) => &markup[header.end()..],
        _ => markup,
    };
    let content = content.trim_start_matches(['\r', '\n']);

    let mut markdown = String::with_capacity(content.len() + content.len() / 4);
    for line in LINE_BREAK.split(content) {
        markdown.push_str(&convert_line(line, page, light_mode));
        markdown.push_str("  \n");
    }
    markdown
}

/// Whether the first line of `path` declares the zim content type.
fn has_zim_header(path: &Path) -> bool {
    let mut first_line = String::new();
    let read = File::open(path)
        .and_then(|file| BufReader::new(file.take(1024)).read_line(&mut first_line));
    match read {
        Ok(_) => ZIM_CONTENT_TYPE.is_match(&first_line).unwrap_or(false),
        Err(err) => {
            tracing::debug!(path = %path.display(), ?err, "Failed to read first line");
            false
        }
    }
}

/// Zim wiki pages rendered through markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct WikitextConverter;

impl TextConverter for WikitextConverter {
    fn render(&self, markup: &str, options: &RenderOptions, file: Option<&Path>) -> ConvertOutput {
        let markdown = to_markdown(markup, file, options.light_mode);
        MarkdownConverter.render(&markdown, options, file)
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        match file_extension(Some(path)).as_str() {
            ".wikitext" => true,
            ".txt" => has_zim_header(path),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> String {
        convert_line(text, None, true)
    }

    #[test]
    fn test_headings() {
        assert_eq!(line("====== Top ======"), "# Top");
        assert_eq!(line("===== Second ====="), "## Second");
        assert_eq!(line("== Small =="), "##### Small");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(line("an //italic// word"), "an *italic* word");
        assert_eq!(
            line("__marked__"),
            "<span style=\"background-color: #ffff00\">marked</span>"
        );
        assert_eq!(
            convert_line("__marked__", None, false),
            "<span style=\"background-color: #FFA062\">marked</span>"
        );
        assert_eq!(line("run ''ls -l'' now"), "run `ls -l` now");
        assert_eq!(line("'''"), "```");
        assert_eq!(line("x^{2} and H_{2}O"), "x<sup>2</sup> and H<sub>2</sub>O");
    }

    #[test]
    fn test_lists() {
        assert_eq!(line("3. third"), "1. third");
        assert_eq!(line("  b. nested"), "  1. nested");
        assert_eq!(line("[*] done"), "- [x] done");
        assert_eq!(line("\t[x] crossed"), "\t- [ ] crossed");
        assert_eq!(line("[ ] open"), "- [ ] open");
    }

    #[test]
    fn test_web_link() {
        assert_eq!(
            line("see [[https://example.com/a b|the site+more]]"),
            "see [the site&#43;more](https://example.com/a%20b)"
        );
    }

    #[test]
    fn test_page_links() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join(NOTEBOOK_FILE), "").unwrap();
        std::fs::create_dir_all(root.join("Journal")).unwrap();
        std::fs::write(root.join("Ideas.txt"), "").unwrap();
        let page = root.join("Journal").join("Today.txt");
        std::fs::write(&page, "").unwrap();

        let resolve = |target: &str| {
            WikiLink::resolve(&format!("[[{target}]]"), Some(&page))
                .unwrap()
                .resolved
        };

        assert_eq!(
            resolve(":Projects:Big Plan"),
            Some(root.join("Projects").join("Big_Plan.txt").display().to_string())
        );
        assert_eq!(
            resolve("+Sub Page"),
            Some(root.join("Journal").join("Today").join("Sub_Page.txt").display().to_string())
        );
        assert_eq!(resolve("Ideas#Later"), Some(root.join("Ideas.txt").display().to_string()));
        assert_eq!(resolve("Missing"), None);

        let markdown = to_markdown("[[:Home|home]]", Some(&page), true);
        assert_eq!(
            markdown,
            format!("[home](file://{})  \n", root.join("Home.txt").display())
        );
    }

    #[test]
    fn test_images() {
        let page = Path::new("/notes/Trip.txt");
        assert_eq!(line("{{photo.png}}"), "![](photo.png)");
        assert_eq!(
            convert_line("{{./beach.jpg}}", Some(page), true),
            "![Trip.txt](Trip/./beach.jpg)"
        );
        assert_eq!(
            convert_line("{{/abs/a.png?width=200&href=x%20y}}", Some(page), true),
            "<a href=\"x y\"><img src=\"/abs/a.png\" alt=\"Trip.txt\" width=\"200\" /></a>"
        );
    }

    #[test]
    fn test_image_options_are_escaped() {
        let html = line("{{/a.png?width=1%22onerror%3D%22x&href=%22%3E%3Cb%3E}}");
        assert_eq!(
            html,
            "<a href=\"&quot;&gt;&lt;b&gt;\"><img src=\"/a.png\" alt=\"\" width=\"1&quot;onerror=&quot;x\" /></a>"
        );
    }

    #[test]
    fn test_header_is_stripped() {
        let markup = "Content-Type: text/x-zim-wiki\nWiki-Format: zim 0.6\nCreation-Date: 2020-01-01T10:00:00+01:00\n\n====== Page ======\ntext";
        assert_eq!(to_markdown(markup, None, true), "# Page  \ntext  \n");
    }

    #[test]
    fn test_render() {
        let output = WikitextConverter.render("== Part ==\n**bold**", &RenderOptions::default(), None);
        assert!(output.body().contains("<h5"));
        assert!(output.body().contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_claims() {
        let dir = tempfile::tempdir().unwrap();
        let zim = dir.path().join("page.txt");
        std::fs::write(&zim, "Content-Type: text/x-zim-wiki\nWiki-Format: zim 0.6\n").unwrap();
        let plain = dir.path().join("plain.txt");
        std::fs::write(&plain, "just text").unwrap();

        assert!(WikitextConverter.is_file_out_of_this_format(&zim));
        assert!(!WikitextConverter.is_file_out_of_this_format(&plain));
        assert!(WikitextConverter.is_file_out_of_this_format(Path::new("x.wikitext")));
        assert!(!WikitextConverter.is_file_out_of_this_format(Path::new("missing.txt")));
    }
}
