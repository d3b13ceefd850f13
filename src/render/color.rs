//! Terminal colors.
//!
//! `Color` covers the terminal default, the 16 named ANSI colors, the xterm
//! 256-color palette and 24-bit RGB. Escape sequences are produced through
//! crossterm so the renderer and the tests agree on the exact bytes.
//! Colors parse from strings such as `red`, `bright_blue`, `#ff8800`, `#f80`
//! or `xterm:208`.

use std::fmt;
use std::str::FromStr;

use crossterm::style::{self, SetBackgroundColor, SetForegroundColor};
use crossterm::Command;

// ---------------------------------------------------------------------------
// AnsiColor
// ---------------------------------------------------------------------------

/// The 16 named ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    const BASE_NAMES: [(&'static str, AnsiColor, AnsiColor); 8] = [
        ("black", AnsiColor::Black, AnsiColor::BrightBlack),
        ("red", AnsiColor::Red, AnsiColor::BrightRed),
        ("green", AnsiColor::Green, AnsiColor::BrightGreen),
        ("yellow", AnsiColor::Yellow, AnsiColor::BrightYellow),
        ("blue", AnsiColor::Blue, AnsiColor::BrightBlue),
        ("magenta", AnsiColor::Magenta, AnsiColor::BrightMagenta),
        ("cyan", AnsiColor::Cyan, AnsiColor::BrightCyan),
        ("white", AnsiColor::White, AnsiColor::BrightWhite),
    ];

    /// Look up a color by name: `red`, `bright_red`, `grey` (bright black).
    pub fn from_name(name: &str) -> Option<AnsiColor> {
        let name = name.to_ascii_lowercase();
        if name == "grey" || name == "gray" {
            return Some(AnsiColor::BrightBlack);
        }
        let (base, bright) = match name
            .strip_prefix("bright_")
            .or_else(|| name.strip_prefix("bright-"))
        {
            Some(rest) => (rest, true),
            None => (name.as_str(), false),
        };
        Self::BASE_NAMES
            .iter()
            .find(|(n, _, _)| *n == base)
            .map(|&(_, normal, light)| if bright { light } else { normal })
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's own default foreground or background.
    #[default]
    Default,
    Ansi(AnsiColor),
    /// An index into the xterm 256-color palette.
    Xterm(u8),
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// The SGR sequence selecting this color as foreground.
    pub fn foreground_escape(self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = SetForegroundColor(self.into()).write_ansi(&mut out);
        out
    }

    /// The SGR sequence selecting this color as background.
    pub fn background_escape(self) -> String {
        let mut out = String::new();
        let _ = SetBackgroundColor(self.into()).write_ansi(&mut out);
        out
    }
}

impl From<AnsiColor> for Color {
    fn from(color: AnsiColor) -> Self {
        Color::Ansi(color)
    }
}

impl From<Color> for style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Default => style::Color::Reset,
            Color::Xterm(index) => style::Color::AnsiValue(index),
            Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
            Color::Ansi(ansi) => match ansi {
                AnsiColor::Black => style::Color::Black,
                AnsiColor::Red => style::Color::DarkRed,
                AnsiColor::Green => style::Color::DarkGreen,
                AnsiColor::Yellow => style::Color::DarkYellow,
                AnsiColor::Blue => style::Color::DarkBlue,
                AnsiColor::Magenta => style::Color::DarkMagenta,
                AnsiColor::Cyan => style::Color::DarkCyan,
                AnsiColor::White => style::Color::Grey,
                AnsiColor::BrightBlack => style::Color::DarkGrey,
                AnsiColor::BrightRed => style::Color::Red,
                AnsiColor::BrightGreen => style::Color::Green,
                AnsiColor::BrightYellow => style::Color::Yellow,
                AnsiColor::BrightBlue => style::Color::Blue,
                AnsiColor::BrightMagenta => style::Color::Magenta,
                AnsiColor::BrightCyan => style::Color::Cyan,
                AnsiColor::BrightWhite => style::Color::White,
            },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Default => f.write_str("default"),
            Color::Ansi(ansi) => write!(f, "{ansi:?}"),
            Color::Xterm(index) => write!(f, "xterm:{index}"),
            Color::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Why a color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    #[error("unknown color name `{0}`")]
    UnknownName(String),
    #[error("invalid hex color `#{0}`: expected 3 or 6 hex digits")]
    InvalidHex(String),
    #[error("invalid xterm palette index `{0}`: expected 0-255")]
    InvalidXterm(String),
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError::InvalidHex(hex.to_owned()));
        }

        let lower = s.to_ascii_lowercase();
        if let Some(index) = lower.strip_prefix("xterm:") {
            return index
                .parse::<u8>()
                .map(Color::Xterm)
                .map_err(|_| ParseColorError::InvalidXterm(index.to_owned()));
        }
        if lower == "default" {
            return Ok(Color::Default);
        }

        AnsiColor::from_name(&lower)
            .map(Color::Ansi)
            .ok_or_else(|| ParseColorError::UnknownName(s.to_owned()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb { r, g, b })
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some(Color::Rgb { r: digit(0)?, g: digit(1)?, b: digit(2)? })
        }
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
