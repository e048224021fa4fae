//! The compact "ALL" page: every subsystem on one screen.
//!
//! `AllPage` is the frame compositor. Each redraw it stacks the CPU grid,
//! the memory/status pair, GPU, disk and process panels top to bottom,
//! advancing a running row cursor by whatever each panel reports, then hands
//! the remaining bottom strip to the column allocator. Panels that fail are
//! recorded in the [`FrameReport`] and treated as zero rows so the frame
//! still completes.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crossterm::event::{KeyEvent, MouseEvent};

use crate::core::errors::Result;
use crate::telemetry::snapshot::{ClockState, DiskStats, TelemetrySnapshot, percent_of};
use crate::tui::layout::{
    BottomColumn, MENU_ROWS, bottom_column_height, bottom_strip_plan, is_terminal_too_small,
};
use crate::tui::panels::{
    compact_cpus, compact_engines, compact_gpu, compact_memory, compact_processes,
    plot_temperatures, plot_watts,
};
use crate::tui::surface::{DrawSurface, chrome_style};
use crate::tui::theme::Tone;
use crate::tui::widgets::{GaugeData, basic_gauge, format_uptime, plot_name_info, size_to_string};

/// Rows reserved above the page for header chrome.
const PAGE_TOP: u16 = 1;

/// Input events observed during the tick that produced this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Key pressed this tick, if any.
    pub key: Option<KeyEvent>,
    /// Mouse event this tick, if any.
    pub mouse: Option<MouseEvent>,
}

impl FrameInput {
    /// A tick with no input.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            key: None,
            mouse: None,
        }
    }
}

/// A panel render failure contained by the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFailure {
    /// Stable panel name.
    pub panel: &'static str,
    /// Rendered error message.
    pub details: String,
}

/// Outcome of one composited frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Rows consumed by the main panel stack.
    pub rows_used: u16,
    /// Panels that failed this frame; each counted as zero rows.
    pub failures: Vec<PanelFailure>,
}

// ──────────────────── status strip ────────────────────

/// Fan, jetson_clocks, power-mode and uptime rows stacked into one strip.
/// Returns the rows drawn.
pub fn compact_status(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    snapshot: &TelemetrySnapshot,
) -> Result<u16> {
    let mut line = 0u16;

    if let Some(fans) = &snapshot.fans {
        for fan in fans {
            for (idx, speed) in fan.speeds.iter().enumerate() {
                let name = if fan.speeds.len() > 1 {
                    format!("Fan {idx}")
                } else {
                    "FAN".to_string()
                };
                let rpm = fan.rpm.as_ref().and_then(|r| r.get(idx));
                if let Some(rpm) = rpm {
                    let text = format!("{rpm}RPM");
                    surface.put_str(
                        row + line,
                        col + width.saturating_sub(9),
                        &text,
                        Tone::Magenta.style(),
                    )?;
                }
                // RPM annotation reserves 9 columns of gauge width.
                let gauge_width = if rpm.is_some() {
                    width.saturating_sub(12)
                } else {
                    width.saturating_sub(3)
                };
                let values = [(
                    speed.clamp(0.0, 100.0) as u8,
                    Tone::Magenta.style().bold(),
                )];
                basic_gauge(
                    surface,
                    row + line,
                    col + 1,
                    gauge_width,
                    &GaugeData {
                        name: &name,
                        tone: Tone::Magenta,
                        online: true,
                        message: "",
                        values: &values,
                        mright: None,
                    },
                    '|',
                )?;
                line += 1;
            }
        }
    } else {
        basic_gauge(
            surface,
            row + line,
            col + 1,
            width.saturating_sub(3),
            &GaugeData {
                name: "Fan",
                tone: Tone::Magenta,
                online: false,
                message: "NOT AVAILABLE",
                values: &[],
                mright: None,
            },
            '|',
        )?;
        line += 1;
    }

    if let Some(clocks) = snapshot.jetson_clocks {
        let label = "Jetson Clocks: ";
        surface.put_str(row + line, col + 1, label, Tone::White.style().bold())?;
        let value_style = match clocks {
            ClockState::Active => Tone::Green.style().bold(),
            ClockState::Inactive => Tone::White.style(),
            ClockState::Unknown => Tone::Grey.style().dim(),
        };
        surface.put_str(
            row + line,
            col + 1 + label.chars().count() as u16,
            clocks.label(),
            value_style,
        )?;
        line += 1;
    }

    if let Some(mode) = &snapshot.power_mode {
        plot_name_info(surface, row + line, col + 1, "NV Power", mode)?;
        line += 1;
    }

    plot_name_info(
        surface,
        row + line,
        col + 1,
        "Uptime",
        &format_uptime(snapshot.uptime_secs),
    )?;
    Ok(line + 1)
}

// ──────────────────── disk panel ────────────────────

/// One disk usage gauge row. A zero total is defined as 0% with a `0/0<unit>`
/// label rather than a fault.
pub fn disk_gauge(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    disk: &DiskStats,
) -> Result<u16> {
    let percent = percent_of(disk.used, disk.total);
    let label = if disk.total <= 0.0 {
        format!("0/0{}", disk.unit)
    } else {
        format!(
            "{}/{}",
            size_to_string(disk.used, &disk.unit),
            size_to_string(disk.total, &disk.unit)
        )
    };
    let values = [(percent, Tone::Yellow.style())];
    basic_gauge(
        surface,
        row,
        col,
        width.saturating_sub(2),
        &GaugeData {
            name: "Dsk",
            tone: Tone::Yellow,
            online: true,
            message: "",
            values: &values,
            mright: Some(&label),
        },
        '#',
    )?;
    Ok(1)
}

// ──────────────────── frame compositor ────────────────────

/// The compact page. The bottom-strip column count is frozen when the page is
/// constructed and never recomputed, even if a subsystem starts reporting
/// later; this mirrors the page's lifetime contract.
#[derive(Debug, Clone, Copy)]
pub struct AllPage {
    n_columns: u16,
}

impl AllPage {
    /// Build the page, freezing the column count from the first snapshot.
    #[must_use]
    pub fn new(snapshot: &TelemetrySnapshot) -> Self {
        let mut n_columns = 0;
        if snapshot.has_engines() {
            n_columns += 1;
        }
        if snapshot.has_temperatures() {
            n_columns += 1;
        }
        if snapshot.has_power() {
            n_columns += 1;
        }
        Self { n_columns }
    }

    /// Column count frozen at construction.
    #[must_use]
    pub const fn n_columns(&self) -> u16 {
        self.n_columns
    }

    /// Compose one full frame. Key and mouse events are accepted for contract
    /// parity with the page shell; navigation and quit handling live in the
    /// runtime, and no per-frame input state survives the call.
    pub fn draw(
        &self,
        _input: &FrameInput,
        surface: &mut dyn DrawSurface,
        snapshot: &TelemetrySnapshot,
    ) -> Result<FrameReport> {
        let (width, height) = surface.size();
        let mut report = FrameReport::default();

        if is_terminal_too_small(width, height) {
            surface.put_str(0, 0, "terminal too small", Tone::White.style().bold())?;
            return Ok(report);
        }

        let first = PAGE_TOP;
        let mut line = first + 1;

        line += run_panel(
            &mut report,
            "cpu",
            compact_cpus(surface, line, 0, width, snapshot),
        );

        // Memory and the status strip share the same vertical span, so the
        // cursor advances by the taller of the two.
        let half = width / 2;
        let size_memory = run_panel(
            &mut report,
            "memory",
            compact_memory(surface, line, 0, half, snapshot),
        );
        let size_status = run_panel(
            &mut report,
            "status",
            compact_status(surface, line, half, half, snapshot),
        );
        line += size_memory.max(size_status);

        line += run_panel(
            &mut report,
            "gpu",
            compact_gpu(surface, line, 0, width, snapshot),
        );
        line += run_panel(
            &mut report,
            "disk",
            disk_gauge(surface, line, 0, width, &snapshot.disk),
        );
        line += run_panel(
            &mut report,
            "processes",
            compact_processes(surface, line, 0, width, height, &snapshot.processes),
        );
        report.rows_used = line.saturating_sub(first + 1);

        if self.n_columns == 0 {
            return Ok(report);
        }

        let menu_row = height.saturating_sub(1 + MENU_ROWS);
        surface.hline(menu_row, 0, width, '─', chrome_style())?;

        let column_height = bottom_column_height(height, first, line);
        let strip_row = menu_row + 1;
        let arrow_row = height.saturating_sub(2);
        let plan = bottom_strip_plan(
            width,
            self.n_columns,
            snapshot.has_engines(),
            snapshot.has_temperatures(),
            snapshot.has_power(),
        );

        for slot in &plan.slots {
            let content_rows = match slot.kind {
                BottomColumn::Engines => run_panel(
                    &mut report,
                    "engines",
                    compact_engines(surface, strip_row, slot.col, slot.width, column_height, snapshot),
                ),
                BottomColumn::Temperatures => run_panel(
                    &mut report,
                    "temperatures",
                    plot_temperatures(surface, strip_row, slot.col, slot.width, column_height, snapshot),
                ),
                BottomColumn::Power => {
                    if let Err(err) = plot_watts(
                        surface,
                        strip_row,
                        slot.col,
                        slot.width,
                        column_height,
                        snapshot,
                    ) {
                        report.failures.push(PanelFailure {
                            panel: "power",
                            details: err.to_string(),
                        });
                    }
                    0
                }
            };
            if slot.arrow_width > 0 && content_rows > column_height {
                surface.hline(
                    arrow_row,
                    slot.arrow_col,
                    slot.arrow_width,
                    '▼',
                    Tone::White.style().reverse().bold(),
                )?;
            }
        }

        Ok(report)
    }
}

/// Contain a panel failure: record it and count the panel as zero rows.
fn run_panel(report: &mut FrameReport, panel: &'static str, outcome: Result<u16>) -> u16 {
    match outcome {
        Ok(rows) => rows,
        Err(err) => {
            report.failures.push(PanelFailure {
                panel,
                details: err.to_string(),
            });
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::telemetry::provider::{SimulatedProvider, TelemetryProvider};
    use crate::telemetry::snapshot::{
        CpuCore, DiskStats, Engine, Fan, GpuStats, MemoryStats, TelemetrySnapshot,
    };
    use crate::tui::surface::{DrawOp, FailingSurface, RecordingSurface};

    /// Board with no fan, no clocks service, no power mode and no optional
    /// bottom-strip subsystems.
    fn bare_snapshot() -> TelemetrySnapshot {
        TelemetrySnapshot {
            captured_at: Utc::now(),
            uptime_secs: 3661,
            fans: None,
            jetson_clocks: None,
            power_mode: None,
            disk: DiskStats {
                used: 8.0,
                total: 29.0,
                unit: "GB".into(),
            },
            cpus: vec![
                CpuCore {
                    online: true,
                    load_pct: 20.0,
                    freq_mhz: Some(1400),
                },
                CpuCore {
                    online: true,
                    load_pct: 40.0,
                    freq_mhz: Some(1400),
                },
            ],
            memory: MemoryStats {
                ram_used: 1.0,
                ram_total: 4.0,
                swap_used: 0.0,
                swap_total: 2.0,
                unit: "GB".into(),
            },
            gpus: vec![GpuStats {
                name: "gpu".into(),
                load_pct: 10.0,
            }],
            engines: Vec::new(),
            temperatures: Vec::new(),
            power_rails: Vec::new(),
            processes: Vec::new(),
        }
    }

    fn full_snapshot() -> TelemetrySnapshot {
        SimulatedProvider::from_seed(21).sample().unwrap()
    }

    // ── status strip ──

    #[test]
    fn status_without_fan_clocks_or_mode_is_two_rows() {
        let mut s = RecordingSurface::new(100, 30);
        let rows = compact_status(&mut s, 0, 50, 50, &bare_snapshot()).unwrap();
        assert_eq!(rows, 2);
        assert!(s.contains("NOT AVAILABLE"));
        assert!(s.contains("0 days 1:1:1"));
    }

    #[test]
    fn status_counts_every_optional_row() {
        let mut s = RecordingSurface::new(100, 40);
        let mut snap = bare_snapshot();
        snap.fans = Some(vec![Fan {
            name: "pwmfan".into(),
            speeds: vec![40.0, 60.0, 80.0],
            rpm: None,
        }]);
        snap.jetson_clocks = Some(ClockState::Active);
        snap.power_mode = Some("MAXN".into());
        // 3 fan channels + clocks + power mode + uptime.
        let rows = compact_status(&mut s, 0, 0, 60, &snap).unwrap();
        assert_eq!(rows, 6);
        assert!(s.contains("Fan 0"));
        assert!(s.contains("Fan 2"));
        assert!(s.contains("running"));
        assert!(s.contains("MAXN"));
    }

    #[test]
    fn single_channel_fan_is_labeled_fan() {
        let mut s = RecordingSurface::new(100, 30);
        let mut snap = bare_snapshot();
        snap.fans = Some(vec![Fan {
            name: "pwmfan".into(),
            speeds: vec![50.0],
            rpm: None,
        }]);
        let rows = compact_status(&mut s, 0, 0, 50, &snap).unwrap();
        assert_eq!(rows, 2);
        assert!(s.contains("FAN"));
        assert!(!s.contains("Fan 0"));
    }

    #[test]
    fn fan_rpm_is_right_aligned_and_shrinks_gauge() {
        let mut s = RecordingSurface::new(100, 30);
        let mut snap = bare_snapshot();
        snap.fans = Some(vec![Fan {
            name: "pwmfan".into(),
            speeds: vec![50.0],
            rpm: Some(vec![1200]),
        }]);
        compact_status(&mut s, 0, 0, 50, &snap).unwrap();

        let (row, col, text, _) = s.find("1200RPM").unwrap();
        assert_eq!((row, col), (0, 41)); // width 50, reserve 9
        assert_eq!(text, "1200RPM");

        // Gauge frame: width 50 - 12 = 38 -> interior 32 plus brackets.
        let frame = s
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, .. } if text.starts_with('[') => Some(text.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(frame.chars().count(), 34);
    }

    #[test]
    fn rpm_missing_for_channel_falls_back_to_wide_gauge() {
        let mut s = RecordingSurface::new(100, 30);
        let mut snap = bare_snapshot();
        snap.fans = Some(vec![Fan {
            name: "pwmfan".into(),
            speeds: vec![50.0, 70.0],
            rpm: Some(vec![900]), // only channel 0 has a tachometer
        }]);
        let rows = compact_status(&mut s, 0, 0, 50, &snap).unwrap();
        assert_eq!(rows, 3);
        assert!(s.contains("900RPM"));
        assert!(!s.contains("RPM "));
    }

    // ── disk ──

    #[test]
    fn disk_gauge_formats_used_over_total() {
        let mut s = RecordingSurface::new(100, 5);
        let disk = DiskStats {
            used: 18.4,
            total: 59.0,
            unit: "GB".into(),
        };
        assert_eq!(disk_gauge(&mut s, 0, 0, 60, &disk).unwrap(), 1);
        assert!(s.contains("Dsk"));
        assert!(s.contains("18.4GB/59.0GB"));
        // percent = floor(18.4/59*100) = 31 -> 31% of 52-cell interior = 16 cells.
        let fill = s
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, .. }
                    if !text.is_empty() && text.chars().all(|c| c == '#') =>
                {
                    Some(text.chars().count())
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(fill, 16);
    }

    #[test]
    fn disk_gauge_zero_total_is_defined() {
        let mut s = RecordingSurface::new(100, 5);
        let disk = DiskStats {
            used: 0.0,
            total: 0.0,
            unit: "GB".into(),
        };
        assert_eq!(disk_gauge(&mut s, 0, 0, 60, &disk).unwrap(), 1);
        assert!(s.contains("0/0GB"));
        assert!(!s.ops().iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text.contains('#'))
        ));
    }

    // ── compositor ──

    #[test]
    fn bare_snapshot_omits_bottom_strip() {
        let snap = bare_snapshot();
        let page = AllPage::new(&snap);
        assert_eq!(page.n_columns(), 0);

        let mut s = RecordingSurface::new(100, 30);
        let report = page.draw(&FrameInput::idle(), &mut s, &snap).unwrap();
        assert!(report.failures.is_empty());
        assert!(!s.contains("─"));
        assert!(!s.contains("▼"));
    }

    #[test]
    fn full_snapshot_draws_divider_and_three_columns() {
        let snap = full_snapshot();
        let page = AllPage::new(&snap);
        assert_eq!(page.n_columns(), 3);

        let mut s = RecordingSurface::new(120, 40);
        let report = page.draw(&FrameInput::idle(), &mut s, &snap).unwrap();
        assert!(report.failures.is_empty());
        assert!(report.rows_used > 0);

        // Divider at height - 1 - MENU_ROWS.
        let divider_row = 40 - 1 - MENU_ROWS;
        let divider = s.texts_on_row(divider_row);
        assert!(matches!(
            divider.first().unwrap(),
            DrawOp::Text { text, .. } if text.starts_with('─')
        ));
        assert!(s.contains("HW engines"));
        assert!(s.contains("Sensor"));
        assert!(s.contains("Power"));
    }

    #[test]
    fn column_count_is_frozen_at_construction() {
        let bare = bare_snapshot();
        let page = AllPage::new(&bare);

        let mut busy = full_snapshot();
        busy.processes.clear();
        let mut s = RecordingSurface::new(100, 30);
        page.draw(&FrameInput::idle(), &mut s, &busy).unwrap();
        // Engines/temps/power now report data, but the page was built without
        // them: no divider, no strip.
        assert!(!s.contains("─"));
        assert!(!s.contains("HW engines"));
    }

    #[test]
    fn overflowing_column_shows_arrow_row() {
        let mut snap = full_snapshot();
        snap.engines = (0..40)
            .map(|i| Engine {
                name: format!("ENG{i}"),
                online: true,
                freq_mhz: Some(100),
            })
            .collect();
        let page = AllPage::new(&snap);
        let mut s = RecordingSurface::new(120, 30);
        page.draw(&FrameInput::idle(), &mut s, &snap).unwrap();

        let (row, _, _, style) = s.find("▼").unwrap();
        assert_eq!(row, 28); // one row above the bottom edge
        assert!(style.reverse && style.bold);
    }

    #[test]
    fn fitting_columns_show_no_arrow_row() {
        let snap = full_snapshot(); // 3 engines, 3 sensors: fits comfortably
        let page = AllPage::new(&snap);
        let mut s = RecordingSurface::new(120, 40);
        page.draw(&FrameInput::idle(), &mut s, &snap).unwrap();
        assert!(!s.contains("▼"));
    }

    #[test]
    fn identical_inputs_produce_identical_op_sequences() {
        let snap = full_snapshot();
        let page = AllPage::new(&snap);
        let mut a = RecordingSurface::new(100, 30);
        let mut b = RecordingSurface::new(100, 30);
        page.draw(&FrameInput::idle(), &mut a, &snap).unwrap();
        page.draw(&FrameInput::idle(), &mut b, &snap).unwrap();
        assert_eq!(a.ops(), b.ops());
    }

    #[test]
    fn tiny_terminal_short_circuits() {
        let snap = full_snapshot();
        let page = AllPage::new(&snap);
        let mut s = RecordingSurface::new(20, 5);
        let report = page.draw(&FrameInput::idle(), &mut s, &snap).unwrap();
        assert_eq!(report.rows_used, 0);
        assert!(s.contains("terminal too small"));
    }

    #[test]
    fn one_by_one_terminal_does_not_panic() {
        let snap = full_snapshot();
        let page = AllPage::new(&snap);
        let mut s = RecordingSurface::new(1, 1);
        page.draw(&FrameInput::idle(), &mut s, &snap).unwrap();
    }

    #[test]
    fn failing_panels_are_contained() {
        let snap = bare_snapshot();
        let page = AllPage::new(&snap);
        let mut s = FailingSurface::new(100, 30);
        let report = page.draw(&FrameInput::idle(), &mut s, &snap).unwrap();

        let failed: Vec<&str> = report.failures.iter().map(|f| f.panel).collect();
        assert!(failed.contains(&"cpu"));
        assert!(failed.contains(&"status"));
        assert!(failed.contains(&"disk"));
        assert_eq!(report.rows_used, 0);
    }
}
