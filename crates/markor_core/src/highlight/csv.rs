use super::span::{SpanSet, Style, StyledRange};
use super::{base, markdown, HighlightOptions, Highlighter, RuleHighlighter};
use crate::convert::csv::CsvDialect;

/// Cycled per column, the first column of a row stays uncoloured.
const COLUMN_COLORS: [u32; 5] = [0xffff0000, 0xff9696ff, 0xffff00ff, 0xff00b04c, 0xffdaa500];

/// Markdown rules plus one coloured range per column.
#[derive(Debug, Clone)]
pub struct CsvHighlighter {
    markdown: RuleHighlighter,
    tab_width: u8,
}

impl CsvHighlighter {
    pub fn new(options: &HighlightOptions) -> Self {
        Self {
            markdown: markdown::highlighter(options),
            tab_width: options.tab_width,
        }
    }
}

impl Highlighter for CsvHighlighter {
    fn highlight(&self, buffer: &str) -> Vec<StyledRange> {
        let mut spans = SpanSet::new(buffer);
        base::paint(&mut spans, self.tab_width);
        self.markdown.paint_rules(&mut spans);

        let dialect = CsvDialect::infer(buffer);
        for (start, end, column) in column_ranges(buffer, &dialect) {
            if column > 0 {
                let color = COLUMN_COLORS[(column - 1) % COLUMN_COLORS.len()];
                spans.add(start, end, &Style::fg(color));
            }
        }

        spans.into_ranges()
    }
}

/// Splits `buffer` into `(start, end, column)` triples.
///
/// A column after the first starts at its leading delimiter. Quoted cells
/// may contain delimiters and newlines, `""` is an escaped quote. Rows
/// starting with `#` are comments and form a single column.
fn column_ranges(buffer: &str, dialect: &CsvDialect) -> Vec<(usize, usize, usize)> {
    let mut ranges = Vec::new();
    let mut column = 0;
    let mut column_start = 0;
    let mut in_quotes = false;
    let mut at_row_start = true;
    let mut is_comment = false;

    let mut chars = buffer.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if at_row_start {
            at_row_start = false;
            is_comment = c == '#';
        }

        if in_quotes {
            if c == dialect.quote {
                if chars.peek().map(|&(_, next)| next) == Some(dialect.quote) {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        if c == '\n' {
            ranges.push((column_start, idx, column));
            column = 0;
            column_start = idx + 1;
            at_row_start = true;
        } else if is_comment {
            continue;
        } else if c == dialect.quote {
            in_quotes = true;
        } else if c == dialect.delimiter {
            ranges.push((column_start, idx, column));
            column += 1;
            column_start = idx;
        }
    }

    if column_start < buffer.len() {
        ranges.push((column_start, buffer.len(), column));
    }

    ranges
}
