use super::markdown::to_html;
use super::template::escape_html;
use super::{file_extension, ConvertOutput, RenderOptions, TextConverter};
use std::path::Path;

const EXT_IMAGE: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".bmp", ".gif", ".webp", ".heic", ".heif", ".avif", ".svg",
];

const EXT_VIDEO: &[&str] = &[
    ".webm", ".mp4", ".mpeg4", ".mpeg", ".mpg", ".mkv", ".3gp", ".ts", ".m4v", ".m3u", ".m3u8",
];

const EXT_AUDIO: &[&str] = &[
    ".mp3", ".ogg", ".flac", ".opus", ".oga", ".wma", ".m4a", ".aac", ".wav", ".amr", ".mid",
    ".midi", ".pcm",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Media {
    Image,
    Video,
    Audio,
}

impl Media {
    fn of(extension: &str) -> Option<Self> {
        if EXT_IMAGE.contains(&extension) {
            Some(Self::Image)
        } else if EXT_VIDEO.contains(&extension) {
            Some(Self::Video)
        } else if EXT_AUDIO.contains(&extension) {
            Some(Self::Audio)
        } else {
            None
        }
    }

    fn element(&self, src: &str) -> String {
        match self {
            Self::Image => format!("<img src='{src}' style='max-width: 100%;'/>"),
            Self::Video => {
                format!("<video src='{src}' controls style='max-width: 100%;'></video>")
            }
            Self::Audio => format!("<audio src='{src}' controls></audio>"),
        }
    }
}

/// Formats a byte count, e.g. `1.5 KiB`.
fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

fn info_table(path: &Path, extension: &str) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().replace('|', "!"))
        .unwrap_or_default();
    let size = std::fs::metadata(path)
        .map(|metadata| human_size(metadata.len()))
        .unwrap_or_else(|_| "-".to_string());
    let markdown = format!(
        "| | |\n|:---|:---|\n|Name|{name}|\n|Extension|{}|\n|Size|{size}|\n",
        if extension.is_empty() { "-" } else { extension }
    );
    to_html(&markdown).html
}

/// Images, videos and audio embedded by their file path.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedBinaryConverter;

impl TextConverter for EmbedBinaryConverter {
    fn render(&self, _markup: &str, _options: &RenderOptions, file: Option<&Path>) -> ConvertOutput {
        let Some(path) = file else {
            return ConvertOutput::page("");
        };

        let extension = file_extension(file);
        let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let src = escape_html(&format!("file://{}", absolute.display()));

        let media = Media::of(&extension)
            .map(|media| media.element(&src))
            .unwrap_or_default();

        ConvertOutput::page(format!("<div>{media}</div>{}", info_table(path, &extension)))
    }

    fn is_file_out_of_this_format(&self, path: &Path) -> bool {
        Media::of(&file_extension(Some(path))).is_some()
    }

    fn renders_empty_markup(&self) -> bool {
        true
    }
}
