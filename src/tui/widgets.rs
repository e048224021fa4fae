//! Leaf renderers and format helpers shared by all panels.
//!
//! The central primitive is [`basic_gauge`]: one labeled bar row that either
//! shows stacked percentage segments or, when the backing device is offline,
//! a muted placeholder message. Every caller passes an explicit width and the
//! gauge never draws outside it.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::core::errors::Result;
use crate::tui::surface::DrawSurface;
use crate::tui::theme::{TextStyle, Tone};

/// Inputs for one gauge row.
#[derive(Debug, Clone)]
pub struct GaugeData<'a> {
    /// Left-hand label, e.g. `"FAN"`.
    pub name: &'a str,
    /// Tone for the label and frame.
    pub tone: Tone,
    /// When `false`, `message` is shown instead of a bar.
    pub online: bool,
    /// Placeholder text for the offline case.
    pub message: &'a str,
    /// Stacked segments as `(percent, style)`; percents sum to ≤ 100.
    pub values: &'a [(u8, TextStyle)],
    /// Right-aligned annotation inside the bar; defaults to the total percent.
    pub mright: Option<&'a str>,
}

/// Bar cells taken by `percent` of a `bar_width`-cell gauge.
#[must_use]
pub fn gauge_fill(bar_width: u16, percent: u8) -> u16 {
    let pct = u16::from(percent.min(100));
    ((u32::from(bar_width) * u32::from(pct) + 50) / 100) as u16
}

/// Draw one labeled bar row. Returns without drawing when `width` cannot fit
/// a label plus a bracketed bar.
pub fn basic_gauge(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    data: &GaugeData<'_>,
    bar: char,
) -> Result<()> {
    let label_w = 4u16;
    if width < label_w + 3 {
        return Ok(());
    }
    let bar_w = width - label_w - 2;

    let label = format!("{:<width$}", fit(data.name, label_w as usize), width = label_w as usize);
    surface.put_str(row, col, &label, data.tone.style().bold())?;

    let frame_col = col + label_w;
    if data.online {
        let frame = format!("[{:bar$}]", "", bar = bar_w as usize);
        surface.put_str(row, frame_col, &frame, data.tone.style())?;

        let mut filled = 0u16;
        let mut total_pct = 0u16;
        for (pct, style) in data.values {
            total_pct += u16::from(*pct);
            let end = gauge_fill(bar_w, total_pct.min(100) as u8);
            if end > filled {
                let run: String =
                    std::iter::repeat_n(bar, (end - filled) as usize).collect();
                surface.put_str(row, frame_col + 1 + filled, &run, *style)?;
                filled = end;
            }
        }

        let default_right = format!("{}%", total_pct.min(100));
        let right = data.mright.unwrap_or(&default_right);
        let right_len = right.chars().count() as u16;
        if right_len <= bar_w {
            let right_col = frame_col + 1 + bar_w - right_len;
            surface.put_str(row, right_col, right, data.tone.style())?;
        }
    } else {
        let message = fit(data.message, bar_w as usize);
        let frame = format!("[{message:^bar$}]", bar = bar_w as usize);
        surface.put_str(row, frame_col, &frame, data.tone.style().dim())?;
    }
    Ok(())
}

/// Draw one `label: value` text row.
pub fn plot_name_info(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    label: &str,
    value: &str,
) -> Result<()> {
    surface.put_str(row, col, &format!("{label}: "), Tone::White.style().bold())?;
    let offset = label.chars().count() as u16 + 2;
    surface.put_str(row, col + offset, value, Tone::White.style())
}

/// Uptime as `"{days} days {H}:{M}:{S}"`, fields unpadded.
#[must_use]
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{days} days {hours}:{minutes}:{seconds}")
}

/// Size with its unit label, e.g. `"18.4GB"`.
#[must_use]
pub fn size_to_string(value: f64, unit: &str) -> String {
    if value >= 100.0 {
        format!("{value:.0}{unit}")
    } else {
        format!("{value:.1}{unit}")
    }
}

/// Truncate `text` to at most `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
