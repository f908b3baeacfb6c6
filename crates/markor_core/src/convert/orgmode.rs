use super::template::{css_include, embedded_markup_js, js_include, Page};
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use std::path::Path;

/// Org-mode rendered client side by org-js.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrgmodeConverter;

impl TextConverter for OrgmodeConverter {
    fn render(&self, markup: &str, options: &RenderOptions, _file: Option<&Path>) -> ConvertOutput {
        let stylesheet = if options.light_mode {
            "orgmode/org.css"
        } else {
            "orgmode/org-dark.css"
        };
        let head = [
            js_include(options, "orgmode/org-bundle.js"),
            css_include(options, stylesheet),
        ]
        .concat();
        let on_load = format!(
            "var doc = new org.Parser().parse({});\n\
             var result = doc.convert(org.ConverterHTML, {{headerOffset: 0, exportFromLineNumber: {}, suppressSubScriptHandling: false, suppressAutoLink: false}});\n\
             document.getElementById('orgmode_content').innerHTML = result.contentHTML;",
            embedded_markup_js(markup),
            options.show_line_numbers,
        );

        ConvertOutput::Page(
            Page::new("<div id='orgmode_content'></div>")
                .head(head)
                .on_load(on_load),
        )
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        file_extension(Some(path)) == ".org"
    }
}
