use dirs::Dirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

static CONFIG: OnceLock<ConfigInner> = OnceLock::new();

#[derive(Debug)]
struct ConfigInner {
    config: Config,
    file_path: PathBuf,
}

struct LoadedConfig {
    config: Config,
    file_path: PathBuf,
    maybe_error: Option<toml::de::Error>,
}

/// Default location of `config.toml`.
///
/// Linux: ~/.config/markor/config.toml
/// macOS: ~/Library/Application\ Support/net.gsantner.Markor/config.toml
/// Windows: ~\AppData\Roaming\gsantner\Markor\config\config.toml
pub fn default_config_file() -> Option<PathBuf> {
    Dirs::project().map(|project| project.config_dir().join("config.toml"))
}

fn load_config(specified_config_file: Option<PathBuf>) -> LoadedConfig {
    let config_file = specified_config_file
        .or_else(default_config_file)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let mut maybe_error = None;
    let config = match std::fs::read_to_string(&config_file) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            maybe_error.replace(err);
            Config::default()
        }),
        Err(_) => Config::default(),
    };

    LoadedConfig {
        config,
        file_path: config_file,
        maybe_error,
    }
}

fn init(
    specified_config_file: Option<PathBuf>,
    maybe_error: &mut Option<toml::de::Error>,
) -> &'static ConfigInner {
    CONFIG.get_or_init(|| {
        let LoadedConfig {
            config,
            file_path,
            maybe_error: error,
        } = load_config(specified_config_file);
        *maybe_error = error;
        ConfigInner { config, file_path }
    })
}

/// Loads the configuration once, from `specified_config_file` or the default location.
///
/// A malformed file yields the default config alongside the parse error.
pub fn load_config_on_startup(
    specified_config_file: Option<PathBuf>,
) -> (&'static Config, Option<toml::de::Error>) {
    let mut maybe_error = None;
    let inner = init(specified_config_file, &mut maybe_error);
    (&inner.config, maybe_error)
}

/// Path of the loaded config file, the default location before
/// [`load_config_on_startup`] ran.
pub fn config_file() -> &'static PathBuf {
    &init(None, &mut None).file_path
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LogConfig {
    /// Specify the log file path.
    ///
    /// This path must be an absolute path.
    pub log_file: Option<String>,

    /// Specify the max log level.
    pub max_level: String,

    /// Specify the log target to enable more detailed logging.
    ///
    /// ```toml
    /// [log]
    /// log-target = "markor_core::highlight=trace"
    /// ```
    pub log_target: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            max_level: "debug".into(),
            log_target: "".into(),
        }
    }
}

/// HTML preview.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Light or dark preview theme.
    pub light_mode: bool,

    /// Line numbers in code blocks.
    pub show_line_numbers: bool,

    /// Prefix of the bundled scripts and stylesheets, e.g. `file:///android_asset/`.
    pub asset_root: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            light_mode: true,
            show_line_numbers: false,
            asset_root: "assets/".into(),
        }
    }
}

/// Syntax highlighting.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Use the dark colour tables.
    pub dark_mode: bool,

    /// Width of a tab character in spaces.
    pub tab_width: u8,

    /// Theme of the data driven highlighter.
    pub theme: String,

    /// Directory with `languages/` and `themes/` overriding the bundled definitions.
    pub syntax_dir: Option<PathBuf>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            tab_width: 4,
            theme: "default".into(),
            syntax_dir: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct TodoTxtConfig {
    /// Prefix new tasks with today's date.
    pub auto_date: bool,
}

impl Default for TodoTxtConfig {
    fn default() -> Self {
        Self { auto_date: true }
    }
}

/// Markdown like list editing, also used for plain text, org-mode and wikitext.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Continue lists on Enter.
    pub list_continuation: bool,

    /// Renumber ordered lists after changes.
    pub renumber_ordered_lists: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            list_continuation: true,
            renumber_ordered_lists: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Log configuration.
    pub log: LogConfig,

    /// Preview rendering configuration.
    pub render: RenderConfig,

    /// Highlighting configuration.
    pub highlight: HighlightConfig,

    /// todo.txt configuration.
    pub todotxt: TodoTxtConfig,

    /// List editing configuration.
    pub markdown: MarkdownConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        let toml_content = r#"
          [log]
          max-level = "trace"
          log-file = "/tmp/markor.log"

          [render]
          light-mode = false
          asset-root = "file:///android_asset/"

          [highlight]
          tab-width = 8
          syntax-dir = "/etc/markor/syntax"

          [todotxt]
          auto-date = false
"#;
        let user_config: Config =
            toml::from_str(toml_content).expect("Failed to deserialize config");

        assert_eq!(
            user_config,
            Config {
                log: LogConfig {
                    log_file: Some("/tmp/markor.log".to_string()),
                    max_level: "trace".to_string(),
                    ..Default::default()
                },
                render: RenderConfig {
                    light_mode: false,
                    asset_root: "file:///android_asset/".to_string(),
                    ..Default::default()
                },
                highlight: HighlightConfig {
                    tab_width: 8,
                    syntax_dir: Some(PathBuf::from("/etc/markor/syntax")),
                    ..Default::default()
                },
                todotxt: TodoTxtConfig { auto_date: false },
                markdown: MarkdownConfig::default(),
            }
        );
    }

    #[test]
    fn test_config_deserialize() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).expect("Deserialize config is okay");
        let parsed: Config = toml::from_str(&serialized).expect("Round trip of the default config");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_default_config_location() {
        let loaded = load_config(None);
        let expected = default_config_file().unwrap_or_else(|| PathBuf::from("config.toml"));
        assert_eq!(loaded.file_path, expected);
        assert!(loaded.file_path.ends_with("config.toml"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(toml::from_str::<Config>("[render]\nlight = true").is_err());
    }

    #[test]
    fn test_malformed_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "[highlight]\ntab-width = \"wide\"").unwrap();

        let loaded = load_config(Some(file.clone()));
        assert_eq!(loaded.config, Config::default());
        assert!(loaded.maybe_error.is_some());
        assert_eq!(loaded.file_path, file);

        let missing = load_config(Some(dir.path().join("missing.toml")));
        assert!(missing.maybe_error.is_none());
    }
}
