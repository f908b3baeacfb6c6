//! Data driven highlight definitions.
//!
//! Layout, both on disk and embedded in the crate:
//!
//! - `languages/map.properties`: `extension=language` lines
//! - `languages/<language>.json`: `{"language": .., "rules": [{"type": .., "regex": ..}]}`
//! - `themes/<name>.json`: `{"name": .., "styles": {"<type>": {"color": "#rrggbb"}}}`

use super::rule::{Rule, Theme};
use super::span::{Color, Style};
use lru::LruCache;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Number of compiled language definitions kept around.
pub const SYNTAX_CACHE_SIZE: usize = 5;

const MAP_PATH: &str = "languages/map.properties";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid definition {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pattern for `{token}` in {language}: {source}")]
    Regex {
        language: String,
        token: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("no language registered for extension `{0}`")]
    UnknownLanguage(String),
}

#[derive(Debug, Deserialize)]
struct SyntaxDefinition {
    language: String,
    #[serde(default)]
    rules: Vec<RuleDefinition>,
}

#[derive(Debug, Deserialize)]
struct RuleDefinition {
    #[serde(rename = "type")]
    token: String,
    regex: String,
}

#[derive(Debug, Deserialize)]
struct ThemeDefinition {
    name: String,
    #[serde(default)]
    styles: HashMap<String, ThemeValue>,
}

#[derive(Debug, Deserialize)]
struct ThemeValue {
    color: String,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
}

fn embedded(path: &str) -> Option<&'static str> {
    let content = match path {
        MAP_PATH => include_str!("../../assets/highlight/languages/map.properties"),
        "languages/c.json" => include_str!("../../assets/highlight/languages/c.json"),
        "languages/go.json" => include_str!("../../assets/highlight/languages/go.json"),
        "languages/java.json" => include_str!("../../assets/highlight/languages/java.json"),
        "languages/javascript.json" => {
            include_str!("../../assets/highlight/languages/javascript.json")
        }
        "languages/python.json" => include_str!("../../assets/highlight/languages/python.json"),
        "languages/rust.json" => include_str!("../../assets/highlight/languages/rust.json"),
        "languages/shell.json" => include_str!("../../assets/highlight/languages/shell.json"),
        "themes/default.json" => include_str!("../../assets/highlight/themes/default.json"),
        "themes/dark.json" => include_str!("../../assets/highlight/themes/dark.json"),
        _ => return None,
    };
    Some(content)
}

fn parse_map(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| line.split_once(['=', ':']))
        .map(|(ext, lang)| {
            (
                ext.trim().trim_start_matches('.').to_lowercase(),
                lang.trim().to_string(),
            )
        })
        .collect()
}

/// Loads language and theme definitions from a directory, falling back to
/// the definitions embedded in the crate.
pub struct HighlightConfigLoader {
    dir: Option<PathBuf>,
    map: OnceCell<HashMap<String, String>>,
    syntax_cache: Mutex<LruCache<String, Arc<[Rule]>>>,
}

impl std::fmt::Debug for HighlightConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightConfigLoader")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl HighlightConfigLoader {
    pub fn new(dir: Option<PathBuf>) -> Self {
        let capacity = NonZeroUsize::new(SYNTAX_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            dir,
            map: OnceCell::new(),
            syntax_cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// A loader using the embedded definitions only.
    pub fn embedded() -> Self {
        Self::new(None)
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn read(&self, relative: &str) -> Result<String, LoadError> {
        if let Some(dir) = &self.dir {
            let path = dir.join(relative);
            match std::fs::read_to_string(&path) {
                Ok(content) => return Ok(content),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    tracing::trace!(path = %path.display(), "Falling back to embedded definition");
                }
                Err(err) => return Err(err.into()),
            }
        }

        embedded(relative).map(str::to_string).ok_or_else(|| {
            LoadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{relative} not found"),
            ))
        })
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, relative: &str) -> Result<T, LoadError> {
        let content = self.read(relative)?;
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: relative.to_string(),
            source,
        })
    }

    /// Resolves a file extension (with or without leading dots) to a language name.
    pub fn language_for(&self, extension: &str) -> Result<String, LoadError> {
        let map = self
            .map
            .get_or_try_init(|| self.read(MAP_PATH).map(|content| parse_map(&content)))?;
        let ext = extension.trim_start_matches('.').to_lowercase();
        map.get(&ext)
            .cloned()
            .ok_or(LoadError::UnknownLanguage(ext))
    }

    /// Returns the compiled rules of the language registered for `extension`.
    pub fn syntax(&self, extension: &str) -> Result<Arc<[Rule]>, LoadError> {
        let language = self.language_for(extension)?;

        if let Some(rules) = self.syntax_cache.lock().get(&language) {
            return Ok(rules.clone());
        }

        let definition: SyntaxDefinition = self.read_json(&format!("languages/{language}.json"))?;
        let rules = definition
            .rules
            .into_iter()
            .map(|rule| {
                Rule::new(rule.token.clone(), &rule.regex).map_err(|source| LoadError::Regex {
                    language: definition.language.clone(),
                    token: rule.token,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let rules: Arc<[Rule]> = Arc::from(rules);

        tracing::debug!(%language, rules = rules.len(), "Loaded syntax definition");
        self.syntax_cache.lock().put(language, rules.clone());

        Ok(rules)
    }

    pub fn theme(&self, name: &str) -> Result<Theme, LoadError> {
        let definition: ThemeDefinition = self.read_json(&format!("themes/{name}.json"))?;
        let mut theme = Theme::new(definition.name);
        for (token, value) in definition.styles {
            let Some(color) = Color::parse(&value.color) else {
                tracing::warn!(%token, color = %value.color, "Ignoring invalid theme colour");
                continue;
            };
            let mut style = Style::new().foreground(color.0);
            style.bold = value.bold;
            style.italic = value.italic;
            theme.insert(token, style);
        }
        Ok(theme)
    }

    pub fn cached_languages(&self) -> usize {
        self.syntax_cache.lock().len()
    }
}
