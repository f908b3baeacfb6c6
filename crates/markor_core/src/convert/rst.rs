use super::pipeline::{paragraph_stage, wrap_paragraph, Pipeline, Stage, StageLevel};
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use once_cell::sync::Lazy;
use std::path::Path;

const EXTENSIONS: &[&str] = &[".rst", ".rest"];

static PIPELINE: Lazy<Pipeline> = Lazy::new(|| {
    use StageLevel::{Block, Inline};

    Pipeline::new(vec![
        Stage::replace("title", Block, r"(?m)^(.+)\n=+$", "<h1>${1}</h1>").unwrap(),
        Stage::replace("section", Block, r"(?m)^(.+)\n-+$", "<h2>${1}</h2>").unwrap(),
        Stage::seal(
            "literal_block",
            Block,
            r"(?s)::[ \t]*\n[ \t]*\n(.*?)(?P<tail>\n\n|\z)",
            "<pre><code>${1}</code></pre>",
        )
        .unwrap(),
        Stage::replace("list_item", Block, r"(?m)^\* (.*)$", "<li>${1}</li>").unwrap(),
        Stage::replace("list", Block, r"((?:<li>.*</li>\s*)+)", "<ul>${1}</ul>").unwrap(),
        Stage::seal("literal", Inline, r"``([^`]+)``", "<code>${1}</code>").unwrap(),
        Stage::replace("bold", Inline, r"\*\*([^*]+)\*\*", "<strong>${1}</strong>").unwrap(),
        Stage::replace("italic", Inline, r"\*([^*]+)\*", "<em>${1}</em>").unwrap(),
        paragraph_stage(),
    ])
    .unwrap()
});

/// Server side reStructuredText subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestructuredtextConverter;

impl RestructuredtextConverter {
    pub fn pipeline() -> &'static Pipeline {
        &PIPELINE
    }
}

impl TextConverter for RestructuredtextConverter {
    fn render(&self, markup: &str, _options: &RenderOptions, _file: Option<&Path>) -> ConvertOutput {
        ConvertOutput::page(wrap_paragraph(PIPELINE.run(markup)))
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        EXTENSIONS.contains(&file_extension(Some(path)).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::pipeline::Fragment;

    fn run(markup: &str) -> String {
        wrap_paragraph(PIPELINE.run(markup))
    }

    #[test]
    fn test_headings() {
        assert_eq!(run("Title\n====="), "<h1>Title</h1>");
        assert_eq!(run("Part\n----\n\ntext"), "<h2>Part</h2></p><p>text");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            run("Use ``a*b*`` **bold** *it*"),
            "<p>Use <code>a*b*</code> <strong>bold</strong> <em>it</em></p>"
        );
    }

    #[test]
    fn test_literal_block_is_sealed() {
        let html = run("Example::\n\n  *not italic*\n\nafter *it*");
        assert_eq!(
            html,
            "<p>Example<pre><code>  *not italic*</code></pre></p><p>after <em>it</em></p>"
        );
    }

    #[test]
    fn test_list() {
        assert_eq!(run("* one\n* two"), "<ul><li>one</li>\n<li>two</li></ul>");
    }

    #[test]
    fn test_stage_alone() {
        let stage = PIPELINE.stage("list_item").unwrap();
        assert_eq!(
            stage.apply("* a"),
            vec![Fragment::Open("<li>a</li>".into())]
        );
    }

    #[test]
    fn test_claims() {
        assert!(RestructuredtextConverter.is_file_out_of_this_format(Path::new("index.rst")));
        assert!(RestructuredtextConverter.is_file_out_of_this_format(Path::new("index.rest")));
        assert!(!RestructuredtextConverter.is_file_out_of_this_format(Path::new("index.txt")));
    }
}
