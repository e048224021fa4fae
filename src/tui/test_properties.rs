//! Property-based tests for layout and compositor invariants.
//!
//! Uses `proptest` to verify the row-accounting contract of the status
//! strip, the disk percent arithmetic, bottom-strip column allocation, and
//! the clamping + idempotence guarantees of the full compositor.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use crate::telemetry::snapshot::{
    ClockState, CpuCore, DiskStats, Engine, Fan, GpuStats, MemoryStats, PowerRail, Process,
    TelemetrySnapshot, TempSensor, percent_of,
};
use crate::tui::layout::bottom_strip_plan;
use crate::tui::page_all::{AllPage, FrameInput, compact_status};
use crate::tui::surface::{DrawOp, RecordingSurface};

// ──────────────────── strategies ────────────────────

fn arb_fan() -> impl Strategy<Value = Fan> {
    (1usize..4, any::<bool>()).prop_flat_map(|(channels, with_rpm)| {
        let speeds = proptest::collection::vec(0.0f64..100.0, channels);
        let rpm = if with_rpm {
            proptest::collection::vec(0u32..6000, channels)
                .prop_map(Some)
                .boxed()
        } else {
            Just(None).boxed()
        };
        (speeds, rpm).prop_map(|(speeds, rpm)| Fan {
            name: "pwmfan".into(),
            speeds,
            rpm,
        })
    })
}

fn arb_clock_state() -> impl Strategy<Value = ClockState> {
    prop_oneof![
        Just(ClockState::Unknown),
        Just(ClockState::Inactive),
        Just(ClockState::Active),
    ]
}

fn arb_snapshot() -> impl Strategy<Value = TelemetrySnapshot> {
    (
        proptest::option::of(proptest::collection::vec(arb_fan(), 1..3)),
        proptest::option::of(arb_clock_state()),
        proptest::option::of(Just("15W".to_string())),
        0u64..10_000_000,
        (0.0f64..200.0, 0.0f64..100.0),
        0usize..8,
        0usize..6,
        0usize..6,
        0usize..4,
    )
        .prop_map(
            |(fans, clocks, mode, uptime, (disk_used, disk_total), cpus, engines, temps, rails)| {
                TelemetrySnapshot {
                    captured_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                    uptime_secs: uptime,
                    fans,
                    jetson_clocks: clocks,
                    power_mode: mode,
                    disk: DiskStats {
                        used: disk_used,
                        total: disk_total,
                        unit: "GB".into(),
                    },
                    cpus: (0..cpus)
                        .map(|i| CpuCore {
                            online: i % 4 != 3,
                            load_pct: (i as f64) * 12.5,
                            freq_mhz: Some(1400),
                        })
                        .collect(),
                    memory: MemoryStats {
                        ram_used: 1.0,
                        ram_total: 4.0,
                        swap_used: 0.5,
                        swap_total: 2.0,
                        unit: "GB".into(),
                    },
                    gpus: vec![GpuStats {
                        name: "gpu".into(),
                        load_pct: 33.0,
                    }],
                    engines: (0..engines)
                        .map(|i| Engine {
                            name: format!("ENG{i}"),
                            online: true,
                            freq_mhz: Some(100),
                        })
                        .collect(),
                    temperatures: (0..temps)
                        .map(|i| TempSensor {
                            name: format!("zone{i}"),
                            temp_c: 40.0 + i as f64,
                            warning_c: Some(84.0),
                        })
                        .collect(),
                    power_rails: (0..rails)
                        .map(|i| PowerRail {
                            name: format!("VDD{i}"),
                            power_mw: 1000 + i as u64,
                            avg_mw: 1100,
                        })
                        .collect(),
                    processes: vec![Process {
                        pid: 100,
                        name: "proc".into(),
                        cpu_pct: 10.0,
                        mem_kb: 1024,
                    }],
                }
            },
        )
}

// ──────────────────── properties ────────────────────

proptest! {
    /// Status strip rows = fan channels (or 1 placeholder) + optional clocks
    /// row + optional power-mode row + 1 uptime row, and the returned count
    /// matches the rows actually touched.
    #[test]
    fn status_strip_row_accounting(snapshot in arb_snapshot()) {
        let mut surface = RecordingSurface::new(200, 100);
        let rows = compact_status(&mut surface, 0, 0, 90, &snapshot).unwrap();

        let fan_rows: u16 = snapshot.fans.as_ref().map_or(1, |fans| {
            fans.iter().map(|f| f.speeds.len() as u16).sum()
        });
        let expected = fan_rows
            + u16::from(snapshot.jetson_clocks.is_some())
            + u16::from(snapshot.power_mode.is_some())
            + 1;
        prop_assert_eq!(rows, expected);

        for op in surface.ops() {
            if let DrawOp::Text { row, .. } = op {
                prop_assert!(*row < expected);
            }
        }
    }

    /// Disk percent is always in 0..=100 and matches floor(100*used/total);
    /// zero totals are pinned to zero.
    #[test]
    fn disk_percent_bounds(used in 0.0f64..500.0, total in 0.0f64..500.0) {
        let pct = percent_of(used, total);
        prop_assert!(pct <= 100);
        if total > 0.0 {
            let expected = ((used / total) * 100.0).floor().clamp(0.0, 100.0) as u8;
            prop_assert_eq!(pct, expected);
        } else {
            prop_assert_eq!(pct, 0);
        }
    }

    /// Exactly one slot per active subsystem, each nominal width
    /// total/n, origins spaced by column_width + 1.
    #[test]
    fn column_allocation_matches_active_subsystems(
        width in 12u16..300,
        engines in any::<bool>(),
        temps in any::<bool>(),
        power in any::<bool>(),
    ) {
        let n = u16::from(engines) + u16::from(temps) + u16::from(power);
        let plan = bottom_strip_plan(width, n, engines, temps, power);
        prop_assert_eq!(plan.slots.len(), n as usize);
        if n > 0 {
            prop_assert_eq!(plan.column_width, width / n);
            for (i, slot) in plan.slots.iter().enumerate() {
                prop_assert_eq!(slot.col, (i as u16) * (plan.column_width + 1));
            }
        }
    }

    /// Two draws with identical snapshot and size yield identical op
    /// sequences: no hidden state beyond the frozen column count.
    #[test]
    fn compositor_is_idempotent(
        snapshot in arb_snapshot(),
        cols in 30u16..160,
        rows in 10u16..50,
    ) {
        let page = AllPage::new(&snapshot);
        let mut a = RecordingSurface::new(cols, rows);
        let mut b = RecordingSurface::new(cols, rows);
        page.draw(&FrameInput::idle(), &mut a, &snapshot).unwrap();
        page.draw(&FrameInput::idle(), &mut b, &snapshot).unwrap();
        prop_assert_eq!(a.ops(), b.ops());
    }

    /// Every op a frame emits fits the surface, whatever the terminal size.
    #[test]
    fn frames_never_draw_out_of_bounds(
        snapshot in arb_snapshot(),
        cols in 1u16..200,
        rows in 1u16..60,
    ) {
        let page = AllPage::new(&snapshot);
        let mut surface = RecordingSurface::new(cols, rows);
        page.draw(&FrameInput::idle(), &mut surface, &snapshot).unwrap();
        for op in surface.ops() {
            if let DrawOp::Text { row, col, text, .. } = op {
                prop_assert!(*row < rows);
                prop_assert!(*col < cols);
                prop_assert!(col + text.chars().count() as u16 <= cols);
            }
        }
    }
}
