//! The document an editing session is opened on.

use std::path::{Path, PathBuf};

/// Lower-cased extension of `path` including the leading dot, `""` if none.
///
/// Only the last extension counts and dotfiles have none.
///
/// # Examples
///
/// ```
/// use markor_core::document::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("README.MD")), ".md");
/// assert_eq!(extension_of(Path::new("notes.todo.txt")), ".txt");
/// assert_eq!(extension_of(Path::new(".bashrc")), "");
/// assert_eq!(extension_of(Path::new("Makefile")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Path, name and title of an opened file.
///
/// Opening never touches the filesystem, the text is loaded separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    file_name: String,
    extension: String,
    title: String,
    line: Option<usize>,
}

impl Document {
    /// Opens `path`, optionally positioned at the 1-based `line`.
    ///
    /// ```
    /// use markor_core::Document;
    ///
    /// let document = Document::open("/notes/Shopping List.md", Some(3));
    /// assert_eq!(document.file_name(), "Shopping List.md");
    /// assert_eq!(document.extension(), ".md");
    /// assert_eq!(document.title(), "Shopping List");
    /// assert_eq!(document.line(), Some(3));
    /// ```
    pub fn open(path: impl Into<PathBuf>, line: Option<usize>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&path);
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());

        Self {
            path,
            file_name,
            extension,
            title,
            line: line.filter(|&line| line > 0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Lower-cased extension with the leading dot, e.g. `.md`.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name without its extension.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Reads the whole file as UTF-8, replacing invalid sequences.
    pub fn load_text(&self) -> std::io::Result<String> {
        let bytes = std::fs::read(&self.path)?;
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }
}
