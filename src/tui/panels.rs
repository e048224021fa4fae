//! Self-contained panel renderers.
//!
//! Every renderer follows the same contract: it receives an origin and a
//! width (and a height where clipping matters), draws only inside that
//! region, and reports the number of rows its content needs. Callers add the
//! returned counts to a running vertical cursor, so a panel must report
//! exactly what it claims even when part of it was clipped away.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::core::errors::Result;
use crate::telemetry::snapshot::{Process, TelemetrySnapshot};
use crate::tui::surface::DrawSurface;
use crate::tui::theme::Tone;
use crate::tui::widgets::{GaugeData, basic_gauge, fit, size_to_string};

/// Per-core CPU gauges, two per row. Returns rows used.
pub fn compact_cpus(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    snapshot: &TelemetrySnapshot,
) -> Result<u16> {
    if snapshot.cpus.is_empty() || width < 2 {
        return Ok(0);
    }
    let half = width / 2;
    for (i, core) in snapshot.cpus.iter().enumerate() {
        let r = row + (i as u16) / 2;
        let c = col + (i as u16 % 2) * half;
        let name = format!("CPU{}", i + 1);
        let values = [(
            core.load_pct.clamp(0.0, 100.0) as u8,
            Tone::Cyan.style().bold(),
        )];
        let data = GaugeData {
            name: &name,
            tone: Tone::Cyan,
            online: core.online,
            message: "OFF",
            values: &values,
            mright: None,
        };
        basic_gauge(surface, r, c, half.saturating_sub(1), &data, '|')?;
    }
    Ok((snapshot.cpus.len() as u16).div_ceil(2))
}

/// RAM and swap gauges. Returns rows used (always 2).
pub fn compact_memory(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    snapshot: &TelemetrySnapshot,
) -> Result<u16> {
    let mem = &snapshot.memory;
    let gauge_width = width.saturating_sub(2);

    let ram_label = format!(
        "{}/{}",
        size_to_string(mem.ram_used, ""),
        size_to_string(mem.ram_total, &mem.unit)
    );
    let ram_values = [(mem.ram_percent(), Tone::Green.style().bold())];
    basic_gauge(
        surface,
        row,
        col,
        gauge_width,
        &GaugeData {
            name: "Mem",
            tone: Tone::Green,
            online: true,
            message: "",
            values: &ram_values,
            mright: Some(&ram_label),
        },
        '|',
    )?;

    let swap_label = format!(
        "{}/{}",
        size_to_string(mem.swap_used, ""),
        size_to_string(mem.swap_total, &mem.unit)
    );
    let swap_values = [(mem.swap_percent(), Tone::Cyan.style().bold())];
    basic_gauge(
        surface,
        row + 1,
        col,
        gauge_width,
        &GaugeData {
            name: "Swp",
            tone: Tone::Cyan,
            online: true,
            message: "",
            values: &swap_values,
            mright: Some(&swap_label),
        },
        '|',
    )?;
    Ok(2)
}

/// One gauge per GPU. Returns rows used.
pub fn compact_gpu(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    snapshot: &TelemetrySnapshot,
) -> Result<u16> {
    for (i, gpu) in snapshot.gpus.iter().enumerate() {
        let name = if snapshot.gpus.len() > 1 {
            format!("GPU{}", i + 1)
        } else {
            "GPU".to_string()
        };
        let values = [(
            gpu.load_pct.clamp(0.0, 100.0) as u8,
            Tone::Green.style().bold(),
        )];
        basic_gauge(
            surface,
            row + i as u16,
            col,
            width.saturating_sub(2),
            &GaugeData {
                name: &name,
                tone: Tone::Green,
                online: true,
                message: "",
                values: &values,
                mright: None,
            },
            '|',
        )?;
    }
    Ok(snapshot.gpus.len() as u16)
}

/// Process table, heaviest CPU consumers first, clipped to the page height.
/// Returns rows used. Stateless: no scroll position survives the frame.
pub fn compact_processes(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    height: u16,
    processes: &[Process],
) -> Result<u16> {
    let bottom = height.saturating_sub(1);
    if row >= bottom || width == 0 {
        return Ok(0);
    }
    let avail = bottom - row;

    let header = format!("{:>6} {:>5} {:>9}  NAME", "PID", "CPU%", "MEM");
    let padded = format!("{:<width$}", header, width = width as usize);
    surface.put_str(row, col, fit(&padded, width as usize), Tone::White.style().reverse())?;

    let mut sorted: Vec<&Process> = processes.iter().collect();
    sorted.sort_by(|a, b| {
        b.cpu_pct
            .total_cmp(&a.cpu_pct)
            .then_with(|| a.pid.cmp(&b.pid))
    });

    let body_rows = (avail - 1).min(sorted.len() as u16);
    for (i, proc) in sorted.iter().take(body_rows as usize).enumerate() {
        let mem = size_to_string(proc.mem_kb as f64 / 1024.0, "MB");
        let line = format!(
            "{:>6} {:>5.1} {:>9}  {}",
            proc.pid, proc.cpu_pct, mem, proc.name
        );
        surface.put_str(
            row + 1 + i as u16,
            col,
            fit(&line, width as usize),
            Tone::White.style(),
        )?;
    }
    Ok(1 + body_rows)
}

/// Hardware engine list for the bottom strip. Draws at most `height` rows but
/// returns the rows the full content needs, so the caller can detect overflow.
pub fn compact_engines(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    height: u16,
    snapshot: &TelemetrySnapshot,
) -> Result<u16> {
    let needed = 1 + snapshot.engines.len() as u16;
    if width == 0 || height == 0 {
        return Ok(needed);
    }
    surface.put_str(
        row,
        col,
        fit("HW engines", width as usize),
        Tone::Blue.style().bold(),
    )?;
    for (i, engine) in snapshot.engines.iter().enumerate() {
        let offset = 1 + i as u16;
        if offset >= height {
            break;
        }
        let line = if engine.online {
            let freq = engine
                .freq_mhz
                .map_or_else(|| "-".to_string(), |f| format!("{f}MHz"));
            format!("{:<8} {:>7}", engine.name, freq)
        } else {
            format!("{:<8} {:>7}", engine.name, "[OFF]")
        };
        let style = if engine.online {
            Tone::Blue.style()
        } else {
            Tone::Blue.style().dim()
        };
        surface.put_str(row + offset, col, fit(&line, width as usize), style)?;
    }
    Ok(needed)
}

/// Temperature sensor table for the bottom strip. Same clipping contract as
/// [`compact_engines`].
pub fn plot_temperatures(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    height: u16,
    snapshot: &TelemetrySnapshot,
) -> Result<u16> {
    let needed = 1 + snapshot.temperatures.len() as u16;
    if width == 0 || height == 0 {
        return Ok(needed);
    }
    let header = format!("{:<10} {:>7}", "Sensor", "Temp");
    surface.put_str(row, col, fit(&header, width as usize), Tone::Red.style().bold())?;
    for (i, sensor) in snapshot.temperatures.iter().enumerate() {
        let offset = 1 + i as u16;
        if offset >= height {
            break;
        }
        let line = format!("{:<10} {:>6.2}C", sensor.name, sensor.temp_c);
        let style = if sensor.is_hot() {
            Tone::Red.style().bold()
        } else {
            Tone::White.style()
        };
        surface.put_str(row + offset, col, fit(&line, width as usize), style)?;
    }
    Ok(needed)
}

/// Power rail table for the bottom strip: current and average draw per rail
/// plus a totals row. Clips to `height`; reports nothing back because the
/// power column never shows an overflow indicator.
pub fn plot_watts(
    surface: &mut dyn DrawSurface,
    row: u16,
    col: u16,
    width: u16,
    height: u16,
    snapshot: &TelemetrySnapshot,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Ok(());
    }
    let header = format!("{:<10} {:>6} {:>6}", "Power", "Cur", "Avg");
    surface.put_str(row, col, fit(&header, width as usize), Tone::Blue.style().bold())?;

    let mut cur_total = 0u64;
    let mut avg_total = 0u64;
    for (i, rail) in snapshot.power_rails.iter().enumerate() {
        cur_total += rail.power_mw;
        avg_total += rail.avg_mw;
        let offset = 1 + i as u16;
        if offset >= height {
            continue;
        }
        let line = format!("{:<10} {:>6} {:>6}", rail.name, rail.power_mw, rail.avg_mw);
        surface.put_str(row + offset, col, fit(&line, width as usize), Tone::White.style())?;
    }

    let total_offset = 1 + snapshot.power_rails.len() as u16;
    if total_offset < height {
        let line = format!("{:<10} {:>6} {:>6}", "ALL", cur_total, avg_total);
        surface.put_str(
            row + total_offset,
            col,
            fit(&line, width as usize),
            Tone::Blue.style().bold(),
        )?;
    }
    Ok(())
}
