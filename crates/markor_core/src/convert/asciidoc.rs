use super::template::{embedded_markup_js, js_include, Page};
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use std::path::Path;

const EXTENSIONS: &[&str] = &[".adoc", ".asciidoc", ".asc"];

/// AsciiDoc rendered client side by Asciidoctor.js.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciidocConverter;

impl TextConverter for AsciidocConverter {
    fn render(&self, markup: &str, options: &RenderOptions, _file: Option<&Path>) -> ConvertOutput {
        let stylesheet = if options.light_mode {
            "asciidoc/asciidoctor.css"
        } else {
            "asciidoc/dark.css"
        };
        let on_load = format!(
            "var markup = {};\n\
             var html = Asciidoctor().convert(markup, {{standalone: true, attributes: {{nofooter: true, stylesheet: '{}{stylesheet}'}}}});\n\
             document.getElementById('asciidoc_content').innerHTML = html;",
            embedded_markup_js(markup),
            options.asset_root,
        );

        ConvertOutput::Page(
            Page::new("<div id='asciidoc_content'></div>")
                .head(js_include(options, "asciidoc/asciidoctor.min.js"))
                .on_load(on_load),
        )
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        EXTENSIONS.contains(&file_extension(Some(path)).as_str())
    }
}
