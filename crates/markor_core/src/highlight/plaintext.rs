use super::loader::{HighlightConfigLoader, LoadError};
use super::{HighlightOptions, RuleHighlighter};

const DEFAULT_THEME: &str = "default";
const DARK_THEME: &str = "dark";

/// The configured theme, the bundled dark one in dark mode unless a theme was chosen.
fn theme_name(options: &HighlightOptions) -> &str {
    if options.dark_mode && options.theme == DEFAULT_THEME {
        DARK_THEME
    } else {
        &options.theme
    }
}

/// Data driven highlighter for source code, the base pass for anything else.
pub fn highlighter(
    extension: &str,
    options: &HighlightOptions,
    loader: &HighlightConfigLoader,
) -> RuleHighlighter {
    let rules = match loader.syntax(extension) {
        Ok(rules) => rules,
        Err(LoadError::UnknownLanguage(ext)) => {
            tracing::debug!(%ext, "No syntax definition, using the base pass only");
            return RuleHighlighter::base_only(options.tab_width);
        }
        Err(err) => {
            tracing::warn!(?err, %extension, "Failed to load syntax definition");
            return RuleHighlighter::base_only(options.tab_width);
        }
    };

    let theme_name = theme_name(options);
    match loader.theme(theme_name) {
        Ok(theme) => RuleHighlighter::new(rules, theme, options.tab_width),
        Err(err) => {
            tracing::warn!(?err, theme = %theme_name, "Failed to load theme");
            RuleHighlighter::base_only(options.tab_width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Color, Highlighter};

    #[test]
    fn test_rust_source() {
        let loader = HighlightConfigLoader::embedded();
        let h = highlighter(".rs", &HighlightOptions::default(), &loader);
        let buffer = "fn main() { // entry\n    let s = \"hi\";\n}";
        let ranges = h.highlight(buffer);
        let color_of = |text: &str| {
            ranges
                .iter()
                .find(|r| &buffer[r.start..r.end] == text)
                .and_then(|r| r.style.foreground)
        };
        assert_eq!(color_of("fn"), Some(Color(0xff0033b3)));
        assert_eq!(color_of("// entry"), Some(Color(0xff8c8c8c)));
        assert_eq!(color_of("\"hi\""), Some(Color(0xff067d17)));
    }

    #[test]
    fn test_dark_mode_picks_dark_theme() {
        let loader = HighlightConfigLoader::embedded();
        let dark = HighlightOptions {
            dark_mode: true,
            ..Default::default()
        };
        assert_eq!(theme_name(&dark), "dark");
        let ranges = highlighter(".rs", &dark, &loader).highlight("fn main() {}");
        let keyword = ranges.iter().find(|r| r.start == 0 && r.end == 2).unwrap();
        assert_eq!(keyword.style.foreground, Some(Color(0xffcc7832)));

        let chosen = HighlightOptions {
            dark_mode: true,
            theme: "default".to_string(),
            ..Default::default()
        };
        assert_eq!(theme_name(&chosen), "dark");
        let custom = HighlightOptions {
            dark_mode: true,
            theme: "solarized".to_string(),
            ..Default::default()
        };
        assert_eq!(theme_name(&custom), "solarized");
        assert_eq!(theme_name(&HighlightOptions::default()), "default");
    }

    #[test]
    fn test_missing_theme_degrades_to_base_pass() {
        let loader = HighlightConfigLoader::embedded();
        let options = HighlightOptions {
            theme: "missing".to_string(),
            ..Default::default()
        };
        let h = highlighter(".py", &options, &loader);
        assert!(h.rules().is_empty());
        assert_eq!(h.highlight("def f():\n\treturn 1").len(), 1);
    }

    #[test]
    fn test_unknown_extension() {
        let loader = HighlightConfigLoader::embedded();
        let h = highlighter(".txt", &HighlightOptions::default(), &loader);
        assert!(h.rules().is_empty());
    }
}
