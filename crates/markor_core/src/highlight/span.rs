//! Styled ranges produced by a highlighting pass.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// An ARGB colour, `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const fn argb(value: u32) -> Self {
        Self(value)
    }

    /// Parses `#rgb`, `#rrggbb` and `#aarrggbb` (the `#` is optional).
    ///
    /// # Examples
    ///
    /// ```
    /// use markor_core::highlight::Color;
    ///
    /// assert_eq!(Color::parse("#fff"), Some(Color(0xffffffff)));
    /// assert_eq!(Color::parse("#1ea3fe"), Some(Color(0xff1ea3fe)));
    /// assert_eq!(Color::parse("#801ea3fe"), Some(Color(0x801ea3fe)));
    /// assert_eq!(Color::parse("#12"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16)
                    .ok()
                    .map(|rgb| Self(0xff00_0000 | rgb))
            }
            6 => u32::from_str_radix(hex, 16)
                .ok()
                .map(|rgb| Self(0xff00_0000 | rgb)),
            8 => u32::from_str_radix(hex, 16).ok().map(Self),
            _ => None,
        }
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Visual attributes of a range, every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub monospace: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Color>,
    #[serde(skip_serializing_if = "is_false")]
    pub superscript: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub subscript: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u8>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(color: u32) -> Self {
        Self::new().foreground(color)
    }

    pub fn bg(color: u32) -> Self {
        Self::new().background(color)
    }

    pub fn foreground(mut self, color: u32) -> Self {
        self.foreground = Some(Color(color));
        self
    }

    pub fn background(mut self, color: u32) -> Self {
        self.background = Some(Color(color));
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn monospace(mut self) -> Self {
        self.monospace = true;
        self
    }

    pub fn underline(mut self, color: Color) -> Self {
        self.underline = Some(color);
        self
    }

    pub fn superscript(mut self) -> Self {
        self.superscript = true;
        self
    }

    pub fn subscript(mut self) -> Self {
        self.subscript = true;
        self
    }

    pub fn relative_size(mut self, size: f32) -> Self {
        self.relative_size = Some(size);
        self
    }

    pub fn tab_width(mut self, width: u8) -> Self {
        self.tab_width = Some(width);
        self
    }

    /// Paints `other` over `self`: set fields of `other` win.
    pub fn overlay(&mut self, other: &Style) {
        if other.foreground.is_some() {
            self.foreground = other.foreground;
        }
        if other.background.is_some() {
            self.background = other.background;
        }
        if other.underline.is_some() {
            self.underline = other.underline;
        }
        if other.relative_size.is_some() {
            self.relative_size = other.relative_size;
        }
        if other.tab_width.is_some() {
            self.tab_width = other.tab_width;
        }
        self.bold |= other.bold;
        self.italic |= other.italic;
        self.strikethrough |= other.strikethrough;
        self.monospace |= other.monospace;
        self.superscript |= other.superscript;
        self.subscript |= other.subscript;
    }
}

/// A styled byte range `[start, end)` of the buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRange {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

impl StyledRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Accumulates the ranges of one highlighting pass.
///
/// Ranges covering the same interval are merged into one, later styles
/// painted over earlier ones. Everything else is kept in paint order.
#[derive(Debug)]
pub struct SpanSet<'a> {
    buffer: &'a str,
    ranges: Vec<StyledRange>,
    by_interval: HashMap<(usize, usize), usize>,
}

impl<'a> SpanSet<'a> {
    pub fn new(buffer: &'a str) -> Self {
        Self {
            buffer,
            ranges: Vec::new(),
            by_interval: HashMap::new(),
        }
    }

    pub fn buffer(&self) -> &'a str {
        self.buffer
    }

    /// Adds a range, silently ignoring empty or out-of-buffer intervals.
    pub fn add(&mut self, start: usize, end: usize, style: &Style) {
        if start >= end
            || end > self.buffer.len()
            || !self.buffer.is_char_boundary(start)
            || !self.buffer.is_char_boundary(end)
        {
            return;
        }

        match self.by_interval.get(&(start, end)) {
            Some(&idx) => self.ranges[idx].style.overlay(style),
            None => {
                self.by_interval.insert((start, end), self.ranges.len());
                self.ranges.push(StyledRange {
                    start,
                    end,
                    style: style.clone(),
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn into_ranges(self) -> Vec<StyledRange> {
        self.ranges
    }
}
