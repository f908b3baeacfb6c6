use super::ActionSnippet;
use crate::convert::is_code_extension;
use crate::document::Document;
use crate::format::FormatId;

const MARKDOWN: &[ActionSnippet] = &[
    ActionSnippet::line_prefix("markdown_checkbox_list", "Checklist", "- [ ] "),
    ActionSnippet::line_prefix("markdown_unordered_list", "Unordered list", "- "),
    ActionSnippet::line_prefix("markdown_ordered_list", "Ordered list", "1. "),
    ActionSnippet::surround("markdown_bold", "Bold", "**"),
    ActionSnippet::surround("markdown_italic", "Italic", "_"),
    ActionSnippet::surround("markdown_strikeout", "Strikeout", "~~"),
    ActionSnippet::surround("markdown_code_inline", "Inline code", "`"),
    ActionSnippet::line_prefix("markdown_quote", "Quote", "> "),
    ActionSnippet::line_prefix("markdown_h1", "Heading 1", "# "),
    ActionSnippet::line_prefix("markdown_h2", "Heading 2", "## "),
    ActionSnippet::line_prefix("markdown_h3", "Heading 3", "### "),
    ActionSnippet::insert("markdown_horizontal_line", "Horizontal line", "----\n"),
    ActionSnippet::insert("markdown_table_row", "Table", "|  |  |\n"),
];

const ORGMODE: &[ActionSnippet] = &[
    ActionSnippet::line_prefix("orgmode_checkbox_list", "Checklist", "- [ ] "),
    ActionSnippet::line_prefix("orgmode_unordered_list", "Unordered list", "- "),
    ActionSnippet::line_prefix("orgmode_ordered_list", "Ordered list", "1. "),
    ActionSnippet::surround("orgmode_bold", "Bold", "*"),
    ActionSnippet::surround("orgmode_italic", "Italic", "/"),
    ActionSnippet::surround("orgmode_strikeout", "Strikeout", "+"),
    ActionSnippet::surround("orgmode_underline", "Underline", "_"),
    ActionSnippet::surround("orgmode_code_inline", "Inline code", "="),
    ActionSnippet::line_prefix("orgmode_h1", "Heading 1", "* "),
    ActionSnippet::line_prefix("orgmode_h2", "Heading 2", "** "),
    ActionSnippet::line_prefix("orgmode_h3", "Heading 3", "*** "),
];

const WIKITEXT: &[ActionSnippet] = &[
    ActionSnippet::line_prefix("wikitext_checkbox_list", "Checklist", "[ ] "),
    ActionSnippet::line_prefix("wikitext_unordered_list", "Unordered list", "* "),
    ActionSnippet::surround("wikitext_bold", "Bold", "**"),
    ActionSnippet::surround("wikitext_strikeout", "Strikeout", "~~"),
    ActionSnippet::surround("wikitext_italic", "Italic", "//"),
    ActionSnippet::surround("wikitext_highlight", "Highlight", "__"),
    ActionSnippet::surround("wikitext_code_inline", "Inline code", "''"),
    ActionSnippet::enclose("wikitext_h1", "Heading 1", "====== ", " ======"),
    ActionSnippet::enclose("wikitext_h2", "Heading 2", "===== ", " ====="),
    ActionSnippet::enclose("wikitext_h3", "Heading 3", "==== ", " ===="),
    ActionSnippet::enclose("wikitext_h4", "Heading 4", "=== ", " ==="),
    ActionSnippet::enclose("wikitext_h5", "Heading 5", "== ", " =="),
    ActionSnippet::line_prefix("wikitext_ordered_list", "Ordered list", "1. "),
];

const ASCIIDOC: &[ActionSnippet] = &[
    ActionSnippet::line_prefix("asciidoc_checkbox_list", "Checklist", "* [ ] "),
    ActionSnippet::line_prefix("asciidoc_unordered_list", "Unordered list", "* "),
    ActionSnippet::line_prefix("asciidoc_ordered_list", "Ordered list", ". "),
    ActionSnippet::line_prefix("asciidoc_h1", "Heading 1", "= "),
    ActionSnippet::line_prefix("asciidoc_h2", "Heading 2", "== "),
    ActionSnippet::line_prefix("asciidoc_h3", "Heading 3", "=== "),
    ActionSnippet::surround("asciidoc_bold", "Bold", "*"),
    ActionSnippet::surround("asciidoc_italic", "Italic", "_"),
    ActionSnippet::surround("asciidoc_monospace", "Monospace", "`"),
    ActionSnippet::surround("asciidoc_highlight", "Highlight", "#"),
    ActionSnippet::insert("asciidoc_thematic_break", "Thematic break", "'''\n"),
    ActionSnippet::enclose("asciidoc_quote_block", "Quote block", "____\n", "\n____"),
];

const TODOTXT: &[ActionSnippet] = &[
    ActionSnippet::line_prefix("todotxt_toggle_done", "Done", "x "),
    ActionSnippet::insert("todotxt_add_context", "Context", " @"),
    ActionSnippet::insert("todotxt_add_project", "Project", " +"),
    ActionSnippet::line_prefix("todotxt_set_priority", "Priority", "(A) "),
    ActionSnippet::insert("todotxt_set_due_date", "Due date", " due:"),
];

const LATEX: &[ActionSnippet] = &[
    ActionSnippet::enclose("latex_bold", "Bold", "\\textbf{", "}"),
    ActionSnippet::enclose("latex_italic", "Italic", "\\textit{", "}"),
    ActionSnippet::enclose("latex_monospace", "Monospace", "\\texttt{", "}"),
    ActionSnippet::enclose("latex_section", "Section", "\\section{", "}"),
    ActionSnippet::enclose("latex_subsection", "Subsection", "\\subsection{", "}"),
    ActionSnippet::enclose("latex_subsubsection", "Subsubsection", "\\subsubsection{", "}"),
    ActionSnippet::surround("latex_inline_math", "Inline math", "$"),
    ActionSnippet::enclose("latex_display_math", "Display math", "$$ ", " $$"),
    ActionSnippet::insert(
        "latex_itemize",
        "Itemize",
        "\\begin{itemize}\n  \\item \n\\end{itemize}\n",
    ),
    ActionSnippet::insert(
        "latex_enumerate",
        "Enumerate",
        "\\begin{enumerate}\n  \\item \n\\end{enumerate}\n",
    ),
];

const RESTRUCTUREDTEXT: &[ActionSnippet] = &[
    ActionSnippet::surround("rst_bold", "Bold", "**"),
    ActionSnippet::surround("rst_italic", "Italic", "*"),
    ActionSnippet::surround("rst_literal", "Literal", "``"),
    ActionSnippet::insert("rst_directive", "Directive", ".. note::\n\n   "),
    ActionSnippet::line_prefix("rst_unordered_list", "Unordered list", "* "),
];

const PLAINTEXT: &[ActionSnippet] = &[
    ActionSnippet::line_prefix("plaintext_checkbox_list", "Checklist", "- [ ] "),
    ActionSnippet::line_prefix("plaintext_unordered_list", "Unordered list", "- "),
    ActionSnippet::line_prefix("plaintext_ordered_list", "Ordered list", "1. "),
];

const CODE_FENCE: ActionSnippet =
    ActionSnippet::enclose("plaintext_code_block", "Code block", "```\n", "\n```");

const KEYVALUE: &[ActionSnippet] = &[
    ActionSnippet::line_prefix("keyvalue_unordered_list", "Unordered list", "- "),
    ActionSnippet::line_prefix("keyvalue_ordered_list", "Ordered list", "1. "),
];

pub(super) fn actions(id: FormatId, document: &Document) -> Vec<ActionSnippet> {
    match id {
        FormatId::Markdown => MARKDOWN.to_vec(),
        FormatId::Orgmode => ORGMODE.to_vec(),
        FormatId::Wikitext => WIKITEXT.to_vec(),
        FormatId::AsciiDoc => ASCIIDOC.to_vec(),
        FormatId::TodoTxt => TODOTXT.to_vec(),
        FormatId::Latex => LATEX.to_vec(),
        FormatId::Restructuredtext => RESTRUCTUREDTEXT.to_vec(),
        FormatId::Plaintext | FormatId::Csv | FormatId::EmbedBinary => {
            let mut actions = PLAINTEXT.to_vec();
            if is_code_extension(document.extension()) {
                actions.push(CODE_FENCE);
            }
            actions
        }
        FormatId::KeyValue => KEYVALUE.to_vec(),
        FormatId::Unknown => Vec::new(),
    }
}

pub(super) fn label_prefix(id: FormatId) -> &'static str {
    match id {
        FormatId::Latex => "LaTeX: ",
        FormatId::Restructuredtext => "RST: ",
        _ => "",
    }
}
