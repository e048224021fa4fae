//! Semantic color tones and terminal color policy.

#![allow(missing_docs)]

use std::env;

use crossterm::style::Color;

/// Semantic tone used by widgets; mapped to a concrete color per theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Cyan,
    Magenta,
    Yellow,
    Green,
    Red,
    Blue,
    White,
    Grey,
}

impl Tone {
    /// Concrete terminal color for this tone.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Cyan => Color::Cyan,
            Self::Magenta => Color::Magenta,
            Self::Yellow => Color::Yellow,
            Self::Green => Color::Green,
            Self::Red => Color::Red,
            Self::Blue => Color::Blue,
            Self::White => Color::White,
            Self::Grey => Color::DarkGrey,
        }
    }

    /// Plain style in this tone.
    #[must_use]
    pub const fn style(self) -> TextStyle {
        TextStyle {
            tone: self,
            bold: false,
            dim: false,
            reverse: false,
        }
    }
}

/// Attribute bundle applied to one drawn run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub tone: Tone,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl TextStyle {
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Muted variant, used for unavailable placeholders.
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Color output mode for compatibility with `NO_COLOR` and terminal policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Enabled,
    Disabled,
}

/// Rendering policy consumed by the terminal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub color: ColorMode,
}

impl Theme {
    #[must_use]
    pub const fn from_no_color_flag(no_color: bool) -> Self {
        Self {
            color: if no_color {
                ColorMode::Disabled
            } else {
                ColorMode::Enabled
            },
        }
    }

    #[must_use]
    pub fn from_environment() -> Self {
        Self::from_no_color_flag(env::var_os("NO_COLOR").is_some())
    }

    #[must_use]
    pub const fn no_color(self) -> bool {
        matches!(self.color, ColorMode::Disabled)
    }
}
