//! Explicitly-passed drawing surface.
//!
//! Every renderer receives a `&mut dyn DrawSurface` instead of touching a
//! process-wide terminal handle, so the whole compositor can be exercised
//! against [`RecordingSurface`] in tests. [`TermSurface`] is the production
//! implementation over crossterm's queued commands.
//!
//! All implementations clip writes to the surface bounds: rows outside the
//! terminal are dropped, overlong runs are truncated. Renderers may therefore
//! be invoked on degenerate regions without faulting.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;

use crate::core::errors::{JdError, Result};
use crate::tui::theme::{TextStyle, Theme, Tone};

/// Shared drawing contract for terminal and test surfaces.
pub trait DrawSurface {
    /// Current dimensions as `(columns, rows)`.
    fn size(&self) -> (u16, u16);

    /// Clear the whole surface.
    fn clear(&mut self) -> Result<()>;

    /// Draw `text` starting at `(row, col)`, clipped to the surface.
    fn put_str(&mut self, row: u16, col: u16, text: &str, style: TextStyle) -> Result<()>;

    /// Flush any queued output.
    fn flush(&mut self) -> Result<()>;

    /// Draw a horizontal run of `glyph`, clipped to the surface.
    fn hline(&mut self, row: u16, col: u16, width: u16, glyph: char, style: TextStyle) -> Result<()> {
        if width == 0 {
            return Ok(());
        }
        let run: String = std::iter::repeat_n(glyph, width as usize).collect();
        self.put_str(row, col, &run, style)
    }
}

/// Truncate `text` to at most `avail` characters.
fn clip(text: &str, avail: usize) -> &str {
    match text.char_indices().nth(avail) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ──────────────────── production surface ────────────────────

/// Crossterm-backed surface writing to any `Write` sink (normally stdout).
pub struct TermSurface<W: Write> {
    out: W,
    theme: Theme,
    cols: u16,
    rows: u16,
}

impl TermSurface<io::Stdout> {
    /// Surface over stdout, sized from the live terminal.
    pub fn stdout(theme: Theme) -> Result<Self> {
        let (cols, rows) = terminal::size().map_err(|e| JdError::terminal("size query", e))?;
        Ok(Self::with_size(io::stdout(), theme, cols, rows))
    }
}

impl<W: Write> TermSurface<W> {
    /// Surface over an arbitrary sink with fixed dimensions.
    pub fn with_size(out: W, theme: Theme, cols: u16, rows: u16) -> Self {
        Self {
            out,
            theme,
            cols,
            rows,
        }
    }

    /// Re-query terminal dimensions; called once per frame since the
    /// terminal may be resized between frames.
    pub fn resize_to_terminal(&mut self) -> Result<()> {
        let (cols, rows) = terminal::size().map_err(|e| JdError::terminal("size query", e))?;
        self.cols = cols;
        self.rows = rows;
        Ok(())
    }

    fn queue_style(&mut self, style: TextStyle) -> io::Result<()> {
        if !self.theme.no_color() {
            queue!(self.out, SetForegroundColor(style.tone.color()))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        if style.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl<W: Write> DrawSurface for TermSurface<W> {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))
            .map_err(|e| JdError::terminal("clear", e))
    }

    fn put_str(&mut self, row: u16, col: u16, text: &str, style: TextStyle) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Ok(());
        }
        let avail = (self.cols - col) as usize;
        let clipped = clip(text, avail);
        if clipped.is_empty() {
            return Ok(());
        }
        queue!(self.out, MoveTo(col, row)).map_err(|e| JdError::terminal("move", e))?;
        self.queue_style(style)
            .map_err(|e| JdError::terminal("style", e))?;
        queue!(self.out, Print(clipped), SetAttribute(Attribute::Reset))
            .map_err(|e| JdError::terminal("print", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(|e| JdError::terminal("flush", e))
    }
}

// ──────────────────── recording surface (tests) ────────────────────

/// One clipped draw operation captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// Full-surface clear.
    Clear,
    /// Text run after clipping.
    Text {
        row: u16,
        col: u16,
        text: String,
        style: TextStyle,
    },
}

/// In-memory surface recording the exact op sequence for assertions.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    cols: u16,
    rows: u16,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            ops: Vec::new(),
        }
    }

    /// All recorded operations in draw order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text ops drawn on `row`, left to right.
    #[must_use]
    pub fn texts_on_row(&self, row: u16) -> Vec<&DrawOp> {
        let mut on_row: Vec<&DrawOp> = self
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { row: r, .. } if *r == row))
            .collect();
        on_row.sort_by_key(|op| match op {
            DrawOp::Text { col, .. } => *col,
            DrawOp::Clear => 0,
        });
        on_row
    }

    /// Whether any text op contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.ops.iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text.contains(needle)),
        )
    }

    /// Find the first text op containing `needle`.
    #[must_use]
    pub fn find(&self, needle: &str) -> Option<(u16, u16, &str, TextStyle)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text {
                row,
                col,
                text,
                style,
            } if text.contains(needle) => Some((*row, *col, text.as_str(), *style)),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> Result<()> {
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn put_str(&mut self, row: u16, col: u16, text: &str, style: TextStyle) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Ok(());
        }
        let avail = (self.cols - col) as usize;
        let clipped = clip(text, avail);
        if clipped.is_empty() {
            return Ok(());
        }
        self.ops.push(DrawOp::Text {
            row,
            col,
            text: clipped.to_string(),
            style,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Surface that fails every draw; used to exercise panel-failure containment.
#[cfg(test)]
pub struct FailingSurface {
    cols: u16,
    rows: u16,
}

#[cfg(test)]
impl FailingSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

#[cfg(test)]
impl DrawSurface for FailingSurface {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    fn put_str(&mut self, _row: u16, _col: u16, _text: &str, _style: TextStyle) -> Result<()> {
        Err(JdError::terminal(
            "test surface",
            io::Error::other("injected draw failure"),
        ))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Default style for structural chrome (dividers, headers).
#[must_use]
pub const fn chrome_style() -> TextStyle {
    Tone::White.style()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        Tone::White.style()
    }

    #[test]
    fn recording_surface_clips_to_width() {
        let mut s = RecordingSurface::new(10, 5);
        s.put_str(0, 6, "abcdefgh", style()).unwrap();
        match &s.ops()[0] {
            DrawOp::Text { text, .. } => assert_eq!(text, "abcd"),
            DrawOp::Clear => panic!("expected text op"),
        }
    }

    #[test]
    fn recording_surface_drops_out_of_bounds() {
        let mut s = RecordingSurface::new(10, 5);
        s.put_str(5, 0, "below", style()).unwrap();
        s.put_str(0, 10, "right", style()).unwrap();
        assert!(s.ops().is_empty());
    }

    #[test]
    fn hline_emits_single_run() {
        let mut s = RecordingSurface::new(20, 5);
        s.hline(2, 3, 5, '─', style()).unwrap();
        match &s.ops()[0] {
            DrawOp::Text { row, col, text, .. } => {
                assert_eq!((*row, *col), (2, 3));
                assert_eq!(text, "─────");
            }
            DrawOp::Clear => panic!("expected text op"),
        }
    }

    #[test]
    fn term_surface_respects_no_color() {
        let mut sink = Vec::new();
        {
            let theme = Theme::from_no_color_flag(true);
            let mut s = TermSurface::with_size(&mut sink, theme, 40, 10);
            s.put_str(0, 0, "hello", Tone::Red.style()).unwrap();
            s.flush().unwrap();
        }
        let rendered = String::from_utf8(sink).unwrap();
        assert!(rendered.contains("hello"));
        // No SGR foreground color sequence when NO_COLOR is honored.
        assert!(!rendered.contains("\x1b[38;5;"));
    }

    #[test]
    fn term_surface_clips_like_recording_surface() {
        let mut sink = Vec::new();
        {
            let theme = Theme::from_no_color_flag(true);
            let mut s = TermSurface::with_size(&mut sink, theme, 8, 4);
            s.put_str(1, 4, "abcdefgh", Tone::White.style()).unwrap();
            s.put_str(9, 0, "invisible", Tone::White.style()).unwrap();
            s.flush().unwrap();
        }
        let rendered = String::from_utf8(sink).unwrap();
        assert!(rendered.contains("abcd"));
        assert!(!rendered.contains("abcde"));
        assert!(!rendered.contains("invisible"));
    }

    #[test]
    fn clip_is_char_aware() {
        assert_eq!(clip("▼▼▼▼", 2), "▼▼");
        assert_eq!(clip("ab", 5), "ab");
    }
}
