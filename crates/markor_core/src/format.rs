//! Format identifiers and the ordered list of registered formats.
//!
//! [`FORMATS`] is the single source of truth for detection order: the first
//! format whose converter claims a file wins.

use crate::convert::{
    AsciidocConverter, CsvConverter, EmbedBinaryConverter, KeyValueConverter, LatexConverter,
    MarkdownConverter, OrgmodeConverter, PlaintextConverter, RestructuredtextConverter,
    TextConverter, TodoTxtConverter, WikitextConverter,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of supported formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatId {
    Unknown,
    Plaintext,
    Markdown,
    TodoTxt,
    Csv,
    Wikitext,
    KeyValue,
    AsciiDoc,
    Orgmode,
    Latex,
    Restructuredtext,
    EmbedBinary,
}

impl FormatId {
    /// All format ids.
    pub const ALL: &'static [FormatId] = &[
        Self::Unknown,
        Self::Plaintext,
        Self::Markdown,
        Self::TodoTxt,
        Self::Csv,
        Self::Wikitext,
        Self::KeyValue,
        Self::AsciiDoc,
        Self::Orgmode,
        Self::Latex,
        Self::Restructuredtext,
        Self::EmbedBinary,
    ];

    /// Serialized name of this id.
    ///
    /// # Examples
    ///
    /// ```
    /// use markor_core::FormatId;
    ///
    /// assert_eq!(FormatId::TodoTxt.name(), "todotxt");
    /// assert_eq!("embedbinary".parse::<FormatId>(), Ok(FormatId::EmbedBinary));
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Plaintext => "plaintext",
            Self::Markdown => "markdown",
            Self::TodoTxt => "todotxt",
            Self::Csv => "csv",
            Self::Wikitext => "wikitext",
            Self::KeyValue => "keyvalue",
            Self::AsciiDoc => "asciidoc",
            Self::Orgmode => "orgmode",
            Self::Latex => "latex",
            Self::Restructuredtext => "restructuredtext",
            Self::EmbedBinary => "embedbinary",
        }
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format id `{0}`")]
pub struct ParseFormatIdError(String);

impl FromStr for FormatId {
    type Err = ParseFormatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name() == lower)
            .ok_or(ParseFormatIdError(s.to_string()))
    }
}

/// A registered format.
#[derive(Clone, Copy)]
pub struct Format {
    pub id: FormatId,
    pub name: &'static str,
    pub default_extension: &'static str,
    /// `None` only for the terminal `unknown` entry.
    pub converter: Option<&'static dyn TextConverter>,
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("default_extension", &self.default_extension)
            .finish_non_exhaustive()
    }
}

/// Registered formats in detection order.
pub static FORMATS: [Format; 12] = [
    Format {
        id: FormatId::Markdown,
        name: "Markdown",
        default_extension: ".md",
        converter: Some(&MarkdownConverter),
    },
    Format {
        id: FormatId::TodoTxt,
        name: "todo.txt",
        default_extension: ".txt",
        converter: Some(&TodoTxtConverter),
    },
    Format {
        id: FormatId::Csv,
        name: "CSV",
        default_extension: ".csv",
        converter: Some(&CsvConverter),
    },
    Format {
        id: FormatId::Wikitext,
        name: "Wikitext",
        default_extension: ".txt",
        converter: Some(&WikitextConverter),
    },
    Format {
        id: FormatId::KeyValue,
        name: "Key-Value",
        default_extension: ".yaml",
        converter: Some(&KeyValueConverter),
    },
    Format {
        id: FormatId::AsciiDoc,
        name: "AsciiDoc",
        default_extension: ".adoc",
        converter: Some(&AsciidocConverter),
    },
    Format {
        id: FormatId::Orgmode,
        name: "Org-mode",
        default_extension: ".org",
        converter: Some(&OrgmodeConverter),
    },
    Format {
        id: FormatId::Latex,
        name: "LaTeX",
        default_extension: ".tex",
        converter: Some(&LatexConverter),
    },
    Format {
        id: FormatId::Restructuredtext,
        name: "reStructuredText",
        default_extension: ".rst",
        converter: Some(&RestructuredtextConverter),
    },
    Format {
        id: FormatId::EmbedBinary,
        name: "Embed Binary",
        default_extension: ".jpg",
        converter: Some(&EmbedBinaryConverter),
    },
    Format {
        id: FormatId::Plaintext,
        name: "Plain Text",
        default_extension: ".txt",
        converter: Some(&PlaintextConverter),
    },
    Format {
        id: FormatId::Unknown,
        name: "Unknown",
        default_extension: "",
        converter: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_registered_once() {
        for id in FormatId::ALL {
            assert_eq!(
                FORMATS.iter().filter(|format| format.id == *id).count(),
                1,
                "{id}"
            );
        }
    }

    #[test]
    fn test_declaration_order() {
        let order: Vec<_> = FORMATS.iter().map(|format| format.id).collect();
        assert_eq!(order.first(), Some(&FormatId::Markdown));
        assert_eq!(order.last(), Some(&FormatId::Unknown));
        let position = |id| order.iter().position(|x| *x == id).unwrap();
        assert!(position(FormatId::Latex) < position(FormatId::Plaintext));
        assert!(position(FormatId::TodoTxt) < position(FormatId::Wikitext));
        assert!(position(FormatId::EmbedBinary) < position(FormatId::Plaintext));
    }

    #[test]
    fn test_parse_and_display() {
        for id in FormatId::ALL {
            assert_eq!(id.to_string().parse::<FormatId>(), Ok(*id));
        }
        assert_eq!("Markdown".parse::<FormatId>(), Ok(FormatId::Markdown));
        assert!("docx".parse::<FormatId>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&FormatId::KeyValue).unwrap(),
            r#""keyvalue""#
        );
        let id: FormatId = serde_json::from_str(r#""restructuredtext""#).unwrap();
        assert_eq!(id, FormatId::Restructuredtext);
    }
}
