use super::pipeline::{paragraph_stage, wrap_paragraph, Pipeline, Stage, StageLevel};
use super::template::{css_include, js_include, Page};
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use once_cell::sync::Lazy;
use std::path::Path;

const EXTENSIONS: &[&str] = &[".tex", ".latex"];

/// Math delimiters the KaTeX auto-render extension looks for.
const KATEX_AUTO_RENDER: &str = r"renderMathInElement(document.body, {
    delimiters: [
        {left: '$$', right: '$$', display: true},
        {left: '$', right: '$', display: false},
        {left: '\\[', right: '\\]', display: true},
        {left: '\\(', right: '\\)', display: false}
    ]
});";

static PIPELINE: Lazy<Pipeline> = Lazy::new(|| {
    use StageLevel::{Block, Inline};

    Pipeline::new(vec![
        Stage::seal("inline_math", Block, r"\$([^$]+)\$", r"\(${1}\)").unwrap(),
        Stage::seal("display_math", Block, r"\$\$([^$]+)\$\$", r"\[${1}\]").unwrap(),
        Stage::replace("section", Block, r"\\section\{([^}]+)\}", "<h1>${1}</h1>").unwrap(),
        Stage::replace(
            "subsection",
            Block,
            r"\\subsection\{([^}]+)\}",
            "<h2>${1}</h2>",
        )
        .unwrap(),
        Stage::replace(
            "subsubsection",
            Block,
            r"\\subsubsection\{([^}]+)\}",
            "<h3>${1}</h3>",
        )
        .unwrap(),
        Stage::replace("bold", Inline, r"\\textbf\{([^}]+)\}", "<strong>${1}</strong>").unwrap(),
        Stage::replace("italic", Inline, r"\\textit\{([^}]+)\}", "<em>${1}</em>").unwrap(),
        Stage::replace("monospace", Inline, r"\\texttt\{([^}]+)\}", "<code>${1}</code>").unwrap(),
        Stage::replace("line_break", Inline, r"\\\\", "<br/>").unwrap(),
        paragraph_stage(),
    ])
    .unwrap()
});

/// Server side LaTeX subset, math is left to KaTeX.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexConverter;

impl LatexConverter {
    pub fn pipeline() -> &'static Pipeline {
        &PIPELINE
    }
}

impl TextConverter for LatexConverter {
    fn render(&self, markup: &str, options: &RenderOptions, _file: Option<&Path>) -> ConvertOutput {
        let body = wrap_paragraph(PIPELINE.run(markup));
        let head = [
            css_include(options, "katex/katex.min.css"),
            js_include(options, "katex/katex.min.js"),
            js_include(options, "katex/auto-render.min.js"),
        ]
        .concat();

        ConvertOutput::Page(Page::new(body).head(head).on_load(KATEX_AUTO_RENDER))
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        EXTENSIONS.contains(&file_extension(Some(path)).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::pipeline::Fragment;

    #[test]
    fn test_section_and_bold() {
        let output = LatexConverter.render(
            "\\section{Intro}\\textbf{Hi}",
            &RenderOptions::default(),
            None,
        );
        assert_eq!(output.body(), "<h1>Intro</h1><strong>Hi</strong>");
    }

    #[test]
    fn test_math_is_sealed() {
        let html = PIPELINE.run("Let $\\textbf{x}$ and $$a\n\nb$$ hold.");
        assert_eq!(html, "Let \\(\\textbf{x}\\) and $\\(a\n\nb\\)$ hold.");
    }

    #[test]
    fn test_inline_math_runs_before_display_math() {
        assert_eq!(PIPELINE.run("$$a$$"), "$\\(a\\)$");
        let display = PIPELINE.stage("display_math").unwrap();
        assert_eq!(
            display.apply("$$a$$"),
            vec![Fragment::Sealed("\\[a\\]".into())]
        );
    }

    #[test]
    fn test_paragraphs_and_breaks() {
        let html = wrap_paragraph(PIPELINE.run("one\\\\two\n\n\\textit{three}"));
        assert_eq!(html, "<p>one<br/>two</p><p><em>three</em></p>");
    }

    #[test]
    fn test_stages_alone() {
        let stage = PIPELINE.stage("subsection").unwrap();
        assert_eq!(
            stage.apply("\\subsection{Two}"),
            vec![Fragment::Open("<h2>Two</h2>".into())]
        );
        let stage = PIPELINE.stage("inline_math").unwrap();
        assert_eq!(
            stage.apply("$x$"),
            vec![Fragment::Sealed("\\(x\\)".into())]
        );
        let names: Vec<_> = PIPELINE.stages().iter().map(Stage::name).collect();
        assert_eq!(names.last(), Some(&"paragraphs"));
    }

    #[test]
    fn test_katex_head() {
        let html = LatexConverter.convert("$x$", &RenderOptions::default(), None);
        assert!(html.contains("assets/katex/katex.min.js"));
        assert!(html.contains("renderMathInElement"));
    }

    #[test]
    fn test_claims() {
        assert!(LatexConverter.is_file_out_of_this_format(Path::new("paper.TEX")));
        assert!(LatexConverter.is_file_out_of_this_format(Path::new("paper.latex")));
        assert!(!LatexConverter.is_file_out_of_this_format(Path::new("paper.md")));
    }
}
