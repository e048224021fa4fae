//! Pure layout math for the compact page.
//!
//! Nothing here draws: builders produce placement plans that the page
//! renderer consumes, which keeps the arithmetic testable for every
//! terminal size and subsystem combination.

#![allow(missing_docs)]

/// Rows reserved at the bottom for the mini menu region.
pub const MENU_ROWS: u16 = 6;

/// Minimum terminal width below which the dashboard shows a "too small" message.
pub const MIN_USABLE_COLS: u16 = 30;
/// Minimum terminal height below which the dashboard shows a "too small" message.
pub const MIN_USABLE_ROWS: u16 = 10;

/// Check whether the terminal is large enough to render usefully.
#[must_use]
pub const fn is_terminal_too_small(cols: u16, rows: u16) -> bool {
    cols < MIN_USABLE_COLS || rows < MIN_USABLE_ROWS
}

/// Rectangular sub-region handed to a panel renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub row: u16,
    pub col: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    #[must_use]
    pub const fn new(row: u16, col: u16, width: u16, height: u16) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }
}

/// Bottom-strip column identity, in fixed draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomColumn {
    Engines,
    Temperatures,
    Power,
}

/// One allocated bottom-strip column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    pub kind: BottomColumn,
    /// Panel origin column.
    pub col: u16,
    /// Panel width after per-kind margins.
    pub width: u16,
    /// Origin of the overflow-indicator run for this column.
    pub arrow_col: u16,
    /// Width of the overflow-indicator run; 0 when the column never shows one.
    pub arrow_width: u16,
}

/// Placement plan for the bottom strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Nominal width of each column, `total_width / n_columns`.
    pub column_width: u16,
    pub slots: Vec<ColumnSlot>,
}

/// Split `width` into bottom-strip columns.
///
/// `n_columns` is the divisor frozen at page construction; the boolean flags
/// reflect the current snapshot, so a subsystem that stops reporting simply
/// leaves its slot out while the division stays put. The horizontal cursor
/// advances by `column_width + 1` per included column.
#[must_use]
pub fn bottom_strip_plan(
    width: u16,
    n_columns: u16,
    engines: bool,
    temperatures: bool,
    power: bool,
) -> ColumnPlan {
    if n_columns == 0 {
        return ColumnPlan {
            column_width: 0,
            slots: Vec::new(),
        };
    }
    let column_width = width / n_columns;
    let mut slots = Vec::new();
    let mut cursor = 0u16;

    if engines {
        slots.push(ColumnSlot {
            kind: BottomColumn::Engines,
            col: cursor,
            width: column_width + 2,
            arrow_col: cursor + 1,
            arrow_width: column_width + 1,
        });
        cursor += column_width + 1;
    }
    if temperatures {
        slots.push(ColumnSlot {
            kind: BottomColumn::Temperatures,
            col: cursor,
            width: column_width.saturating_sub(4),
            arrow_col: cursor + 3,
            arrow_width: column_width.saturating_sub(5),
        });
        cursor += column_width + 1;
    }
    if power {
        slots.push(ColumnSlot {
            kind: BottomColumn::Power,
            col: cursor,
            width: column_width.saturating_sub(4),
            arrow_col: cursor,
            arrow_width: 0,
        });
    }

    ColumnPlan {
        column_width,
        slots,
    }
}

/// Height available to a bottom-strip column.
///
/// `height - main_rows_used - 3`, clamped to zero; `first` is the top offset
/// of the page content below the header chrome.
#[must_use]
pub const fn bottom_column_height(height: u16, first: u16, line_counter: u16) -> u16 {
    (height + first).saturating_sub(line_counter + 3)
}
