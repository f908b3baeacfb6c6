//! Ordered regex transform stages for the server side converters.
//!
//! A pipeline runs block level stages before inline ones. Content a stage
//! must protect from later stages (code, math) is emitted as a
//! [`Fragment::Sealed`] which no later stage sees.

use regex::{Captures, Regex};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageLevel {
    Block,
    Inline,
}

/// A piece of the document in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Still subject to the remaining stages.
    Open(String),
    /// Final output, skipped by the remaining stages.
    Sealed(String),
}

impl Fragment {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open(text) | Self::Sealed(text) => text,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("block stage `{stage}` is declared after inline stage `{after}`")]
    BlockAfterInline {
        stage: &'static str,
        after: &'static str,
    },

    #[error("invalid pattern in stage `{stage}`: {source}")]
    Pattern {
        stage: &'static str,
        #[source]
        source: regex::Error,
    },
}

type Transform = Box<dyn Fn(&str) -> Vec<Fragment> + Send + Sync>;

/// One named transform of open text.
pub struct Stage {
    name: &'static str,
    level: StageLevel,
    transform: Transform,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

fn compile(stage: &'static str, pattern: &str) -> Result<Regex, PipelineError> {
    Regex::new(pattern).map_err(|source| PipelineError::Pattern { stage, source })
}

impl Stage {
    pub fn new(
        name: &'static str,
        level: StageLevel,
        transform: impl Fn(&str) -> Vec<Fragment> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            level,
            transform: Box::new(transform),
        }
    }

    /// Replaces every match of `pattern`, the result stays open.
    ///
    /// `replacement` uses the `regex` crate syntax (`${1}`).
    pub fn replace(
        name: &'static str,
        level: StageLevel,
        pattern: &str,
        replacement: &'static str,
    ) -> Result<Self, PipelineError> {
        let regex = compile(name, pattern)?;
        Ok(Self::new(name, level, move |text| {
            vec![Fragment::Open(regex.replace_all(text, replacement).into_owned())]
        }))
    }

    /// Replaces every match of `pattern` and seals the replacement.
    ///
    /// A capture group named `tail` is matched but left open, it lets a
    /// pattern require a terminator without consuming it.
    pub fn seal(
        name: &'static str,
        level: StageLevel,
        pattern: &str,
        replacement: &'static str,
    ) -> Result<Self, PipelineError> {
        let regex = compile(name, pattern)?;
        Ok(Self::new(name, level, move |text| {
            seal_matches(&regex, text, |caps| {
                let mut sealed = String::new();
                caps.expand(replacement, &mut sealed);
                sealed
            })
        }))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn level(&self) -> StageLevel {
        self.level
    }

    /// Runs this stage alone on open `text`.
    pub fn apply(&self, text: &str) -> Vec<Fragment> {
        (self.transform)(text)
    }
}

fn seal_matches(
    regex: &Regex,
    text: &str,
    replace: impl Fn(&Captures<'_>) -> String,
) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for caps in regex.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let end = caps.name("tail").map_or(whole.end(), |tail| tail.start());
        if whole.start() > last {
            fragments.push(Fragment::Open(text[last..whole.start()].to_string()));
        }
        fragments.push(Fragment::Sealed(replace(&caps)));
        last = end;
    }

    if last < text.len() || fragments.is_empty() {
        fragments.push(Fragment::Open(text[last..].to_string()));
    }

    fragments
}

/// Stages in run order.
#[derive(Debug)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Fails if a block stage follows an inline stage.
    pub fn new(stages: Vec<Stage>) -> Result<Self, PipelineError> {
        let mut first_inline: Option<&'static str> = None;
        for stage in &stages {
            match (stage.level, first_inline) {
                (StageLevel::Inline, None) => first_inline = Some(stage.name),
                (StageLevel::Block, Some(after)) => {
                    return Err(PipelineError::BlockAfterInline {
                        stage: stage.name,
                        after,
                    });
                }
                _ => {}
            }
        }
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.name == name)
    }

    /// Runs every stage over the open fragments of `text`.
    pub fn run(&self, text: &str) -> String {
        let mut fragments = vec![Fragment::Open(text.to_string())];

        for stage in &self.stages {
            let mut next = Vec::with_capacity(fragments.len());
            for fragment in fragments {
                match fragment {
                    Fragment::Open(open) => {
                        for produced in stage.apply(&open) {
                            push_merged(&mut next, produced);
                        }
                    }
                    sealed => next.push(sealed),
                }
            }
            fragments = next;
        }

        fragments.iter().map(Fragment::as_str).collect()
    }
}

/// Adjacent open fragments are joined so later patterns see them as one.
fn push_merged(fragments: &mut Vec<Fragment>, fragment: Fragment) {
    if let (Some(Fragment::Open(last)), Fragment::Open(text)) = (fragments.last_mut(), &fragment) {
        last.push_str(text);
        return;
    }
    fragments.push(fragment);
}

/// Blank lines become paragraph breaks.
pub fn paragraph_stage() -> Stage {
    Stage::new("paragraphs", StageLevel::Inline, |text| {
        vec![Fragment::Open(text.replace("\n\n", "</p><p>"))]
    })
}

/// Wraps `html` into a paragraph unless it already starts with a tag.
///
/// ```
/// use markor_core::convert::pipeline::wrap_paragraph;
///
/// assert_eq!(wrap_paragraph("plain".into()), "<p>plain</p>");
/// assert_eq!(wrap_paragraph(" <h1>x</h1>".into()), " <h1>x</h1>");
/// ```
pub fn wrap_paragraph(html: String) -> String {
    if html.trim_start().starts_with('<') {
        html
    } else {
        format!("<p>{html}</p>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(name: &'static str) -> Stage {
        Stage::replace(name, StageLevel::Inline, r"\*(\w+)\*", "<em>${1}</em>").unwrap()
    }

    #[test]
    fn test_block_after_inline_is_rejected() {
        let block = Stage::replace("block", StageLevel::Block, "x", "y").unwrap();
        let err = Pipeline::new(vec![inline("emphasis"), block]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::BlockAfterInline { stage: "block", after: "emphasis" }
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Stage::replace("broken", StageLevel::Inline, "(", "").unwrap_err();
        assert!(matches!(err, PipelineError::Pattern { stage: "broken", .. }));
    }

    #[test]
    fn test_sealed_fragments_are_skipped() {
        let code = Stage::seal("code", StageLevel::Block, r"`([^`]+)`", "<code>${1}</code>").unwrap();
        let pipeline = Pipeline::new(vec![code, inline("emphasis")]).unwrap();
        assert_eq!(
            pipeline.run("*a* `*b*` *c*"),
            "<em>a</em> <code>*b*</code> <em>c</em>"
        );
    }

    #[test]
    fn test_tail_group_stays_open() {
        let stage = Stage::seal(
            "block",
            StageLevel::Block,
            r"(?s)::\n(.*?)(?P<tail>\n\n|\z)",
            "<pre>${1}</pre>",
        )
        .unwrap();
        assert_eq!(
            stage.apply("a::\ncode\n\nrest"),
            vec![
                Fragment::Open("a".into()),
                Fragment::Sealed("<pre>code</pre>".into()),
                Fragment::Open("\n\nrest".into()),
            ]
        );
    }

    #[test]
    fn test_seal_without_match() {
        let stage = Stage::seal("math", StageLevel::Block, r"\$([^$]+)\$", "${1}").unwrap();
        assert_eq!(stage.apply("none"), vec![Fragment::Open("none".into())]);
        assert_eq!(stage.apply(""), vec![Fragment::Open(String::new())]);
    }

    #[test]
    fn test_paragraphs() {
        let pipeline = Pipeline::new(vec![paragraph_stage()]).unwrap();
        assert_eq!(
            wrap_paragraph(pipeline.run("one\n\ntwo")),
            "<p>one</p><p>two</p>"
        );
    }
}
