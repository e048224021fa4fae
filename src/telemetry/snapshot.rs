//! Immutable per-frame telemetry snapshot model.
//!
//! One [`TelemetrySnapshot`] is produced per redraw tick by a
//! [`TelemetryProvider`](crate::telemetry::provider::TelemetryProvider) and
//! only ever read by the renderer. Optional subsystems are modeled as
//! `Option` (fan, clocks, power mode) or emptiness (engines, temperatures,
//! power rails) so presence is an explicit, matchable state.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable read of current device telemetry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetrySnapshot {
    /// When this snapshot was captured.
    pub captured_at: DateTime<Utc>,
    /// Seconds since device boot.
    pub uptime_secs: u64,
    /// Fan controllers, `None` when the board exposes no fan.
    pub fans: Option<Vec<Fan>>,
    /// jetson_clocks service state, `None` when the service is not installed.
    pub jetson_clocks: Option<ClockState>,
    /// Active power-mode (nvpmodel) name, `None` when unavailable.
    pub power_mode: Option<String>,
    /// Root filesystem usage.
    pub disk: DiskStats,
    pub cpus: Vec<CpuCore>,
    pub memory: MemoryStats,
    pub gpus: Vec<GpuStats>,
    pub engines: Vec<Engine>,
    pub temperatures: Vec<TempSensor>,
    pub power_rails: Vec<PowerRail>,
    pub processes: Vec<Process>,
}

impl TelemetrySnapshot {
    /// Engine column participates in the bottom strip.
    #[must_use]
    pub fn has_engines(&self) -> bool {
        !self.engines.is_empty()
    }

    /// Temperature column participates in the bottom strip.
    #[must_use]
    pub fn has_temperatures(&self) -> bool {
        !self.temperatures.is_empty()
    }

    /// Power column participates in the bottom strip.
    #[must_use]
    pub fn has_power(&self) -> bool {
        !self.power_rails.is_empty()
    }
}

/// One fan controller with one or more PWM speed channels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fan {
    pub name: String,
    /// Speed per channel, percent.
    pub speeds: Vec<f64>,
    /// Measured RPM per channel, when the tachometer is wired.
    pub rpm: Option<Vec<u32>>,
}

/// jetson_clocks tri-state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// Service state not yet readable (typically right after boot).
    Unknown,
    Inactive,
    Active,
}

impl ClockState {
    /// Human label shown in the status strip.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "booting",
            Self::Inactive => "inactive",
            Self::Active => "running",
        }
    }
}

/// Disk usage in a fixed unit chosen by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiskStats {
    pub used: f64,
    pub total: f64,
    /// Unit label appended to sizes, e.g. `"GB"`.
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CpuCore {
    pub online: bool,
    pub load_pct: f64,
    pub freq_mhz: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryStats {
    pub ram_used: f64,
    pub ram_total: f64,
    pub swap_used: f64,
    pub swap_total: f64,
    /// Unit label for all four fields, e.g. `"GB"`.
    pub unit: String,
}

impl MemoryStats {
    /// RAM usage percent, 0 when total is unreported.
    #[must_use]
    pub fn ram_percent(&self) -> u8 {
        percent_of(self.ram_used, self.ram_total)
    }

    /// Swap usage percent, 0 when no swap is configured.
    #[must_use]
    pub fn swap_percent(&self) -> u8 {
        percent_of(self.swap_used, self.swap_total)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpuStats {
    pub name: String,
    pub load_pct: f64,
}

/// One hardware engine (NVENC, NVDEC, APE, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Engine {
    pub name: String,
    pub online: bool,
    pub freq_mhz: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TempSensor {
    pub name: String,
    pub temp_c: f64,
    /// Threshold above which the sensor row is highlighted.
    pub warning_c: Option<f64>,
}

impl TempSensor {
    /// Whether the current reading is at or above the warning threshold.
    #[must_use]
    pub fn is_hot(&self) -> bool {
        self.warning_c.is_some_and(|w| self.temp_c >= w)
    }
}

/// One measured power rail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PowerRail {
    pub name: String,
    pub power_mw: u64,
    pub avg_mw: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Process {
    pub pid: u32,
    pub name: String,
    pub cpu_pct: f64,
    pub mem_kb: u64,
}

/// Integer percent of `used/total`, truncated; zero totals yield zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent_of(used: f64, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    let pct = (used / total * 100.0).floor();
    pct.clamp(0.0, 100.0) as u8
}
