//! CSV as a markdown table.

use super::markdown::MarkdownConverter;
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use std::path::Path;

const EXTENSIONS: &[&str] = &[".csv", ".tsv", ".tab", ".psv"];

const DELIMITER_CANDIDATES: [char; 5] = [',', ';', '\t', ':', '|'];
const QUOTE_CANDIDATES: [char; 2] = ['"', '\''];

/// Field delimiter and quote character of a CSV text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvDialect {
    pub delimiter: char,
    pub quote: char,
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}

impl CsvDialect {
    /// Infers the dialect from the first non-empty line not starting with `#`.
    ///
    /// # Examples
    ///
    /// ```
    /// use markor_core::convert::CsvDialect;
    ///
    /// let dialect = CsvDialect::infer("# a, comment\n\nname;'age'\nbob;42");
    /// assert_eq!(dialect.delimiter, ';');
    /// assert_eq!(dialect.quote, '\'');
    /// assert_eq!(CsvDialect::infer(""), CsvDialect::default());
    /// ```
    pub fn infer(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Self::infer_from_line)
            .unwrap_or_default()
    }

    /// The first delimiter and quote candidate found in `line`, or the defaults.
    pub fn infer_from_line(line: &str) -> Self {
        let first_of = |candidates: &[char]| line.chars().find(|c| candidates.contains(c));
        Self {
            delimiter: first_of(&DELIMITER_CANDIDATES[..]).unwrap_or(DELIMITER_CANDIDATES[0]),
            quote: first_of(&QUOTE_CANDIDATES[..]).unwrap_or(QUOTE_CANDIDATES[0]),
        }
    }

    /// Splits `text` into rows of fields.
    ///
    /// Quoted fields may contain delimiters and line breaks, a doubled
    /// quote inside a quoted field is a literal quote.
    pub fn parse(&self, text: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut row_has_content = false;

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if in_quotes {
                if c == self.quote {
                    if chars.peek() == Some(&self.quote) {
                        chars.next();
                        field.push(c);
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(c);
                }
                continue;
            }

            match c {
                c if c == self.quote => {
                    in_quotes = true;
                    row_has_content = true;
                }
                c if c == self.delimiter => {
                    row.push(std::mem::take(&mut field));
                    row_has_content = true;
                }
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' | '\r' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                    row_has_content = false;
                }
                c => {
                    field.push(c);
                    row_has_content = true;
                }
            }
        }

        if row_has_content || !field.is_empty() {
            row.push(field);
            rows.push(row);
        }

        rows
    }
}

/// Empty lines and rows whose first field starts with `#`.
fn is_comment(columns: &[String]) -> bool {
    match columns {
        [] => true,
        [only] if only.trim().is_empty() => true,
        [first, ..] => first.starts_with('#'),
    }
}

fn push_cell(markdown: &mut String, cell: &str) {
    let cell = cell.replace('|', "!");
    let lines: Vec<_> = cell
        .split('\n')
        .map(|line| line.trim_end_matches('\r').trim())
        .map(|line| if line.is_empty() { "&nbsp;" } else { line })
        .collect();
    markdown.push('|');
    markdown.push_str(&lines.join("<br/>"));
}

fn push_row(markdown: &mut String, columns: &[String], header_len: usize) {
    for i in 0..header_len.max(columns.len()) {
        push_cell(markdown, columns.get(i).map_or("", String::as_str));
    }
    markdown.push_str("|\n");
}

/// Renders `text` as a markdown table, the first row being the header.
///
/// ```
/// use markor_core::convert::csv::to_markdown_table;
///
/// assert_eq!(
///     to_markdown_table("name,note\nbob,\"a|b\"\nann"),
///     "|name|note|\n|:---|:---|\n|bob|a!b|\n|ann|&nbsp;|\n"
/// );
/// ```
pub fn to_markdown_table(text: &str) -> String {
    let dialect = CsvDialect::infer(text);
    let mut rows = dialect
        .parse(text)
        .into_iter()
        .filter(|columns| !is_comment(columns));

    let Some(header) = rows.next() else {
        return String::new();
    };

    let mut markdown = String::with_capacity(text.len() * 2);
    push_row(&mut markdown, &header, header.len());
    for _ in 0..header.len() {
        markdown.push_str("|:---");
    }
    markdown.push_str("|\n");

    for columns in rows {
        push_row(&mut markdown, &columns, header.len());
    }

    markdown
}

/// CSV, TSV and friends rendered as a table through markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvConverter;

impl TextConverter for CsvConverter {
    fn render(&self, markup: &str, options: &RenderOptions, file: Option<&Path>) -> ConvertOutput {
        MarkdownConverter.render(&to_markdown_table(markup), options, file)
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        EXTENSIONS.contains(&file_extension(Some(path)).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer() {
        assert_eq!(
            CsvDialect::infer("a\tb|c"),
            CsvDialect {
                delimiter: '\t',
                quote: '"'
            }
        );
        assert_eq!(CsvDialect::infer("plain").delimiter, ',');
        assert_eq!(CsvDialect::infer("  \n#x;y\n 'a':b").delimiter, ':');
    }

    #[test]
    fn test_parse_quotes_and_newlines() {
        let dialect = CsvDialect::default();
        let rows = dialect.parse("a,\"b \"\"q\"\"\",\"multi\nline\"\r\nc,,\n");
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b \"q\"".to_string(), "multi\nline".to_string()],
                vec!["c".to_string(), String::new(), String::new()],
            ]
        );
    }

    #[test]
    fn test_table_skips_comments_and_pads() {
        let table = to_markdown_table("# generated\nh1;h2;h3\n\n1;2\n# note\n4;\"x\ny\";6;7");
        assert_eq!(
            table,
            "|h1|h2|h3|\n|:---|:---|:---|\n|1|2|&nbsp;|\n|4|x<br/>y|6|7|\n"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_markdown_table(""), "");
        assert_eq!(to_markdown_table("# only a comment\n"), "");
    }

    #[test]
    fn test_render_table() {
        let output = CsvConverter.render("a,b\n1,2", &RenderOptions::default(), None);
        assert!(output.body().contains("<table>"));
        assert!(output.body().contains(">2</td>"));
    }

    #[test]
    fn test_claims() {
        for name in ["a.csv", "b.TSV", "c.tab", "d.psv"] {
            assert!(CsvConverter.is_file_out_of_this_format(Path::new(name)), "{name}");
        }
        assert!(!CsvConverter.is_file_out_of_this_format(Path::new("a.txt")));
    }
}
