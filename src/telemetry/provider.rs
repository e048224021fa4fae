//! Snapshot providers feeding the dashboard one frame at a time.
//!
//! Hardware acquisition is out of scope for this crate; the two providers
//! here exist to feed the renderer realistic data shapes. [`ReplayProvider`]
//! reads recorded JSON snapshots (one object or an array) and cycles through
//! them. [`SimulatedProvider`] synthesizes a plausible Jetson-class board
//! with seeded jitter so demo runs and tests stay deterministic.

use std::fs;
use std::path::Path;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::errors::{JdError, Result};
use crate::telemetry::snapshot::{
    ClockState, CpuCore, DiskStats, Engine, Fan, GpuStats, MemoryStats, PowerRail, Process,
    TelemetrySnapshot, TempSensor,
};

/// Source of one telemetry snapshot per redraw tick.
pub trait TelemetryProvider {
    /// Produce the next snapshot.
    fn sample(&mut self) -> Result<TelemetrySnapshot>;

    /// Short label shown in the dashboard header.
    fn label(&self) -> &'static str;
}

/// Replays snapshots recorded to a JSON file, wrapping around at the end.
#[derive(Debug)]
pub struct ReplayProvider {
    frames: Vec<TelemetrySnapshot>,
    cursor: usize,
}

impl ReplayProvider {
    /// Load a replay file containing one snapshot object or an array of them.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| JdError::io(path, e))?;
        let frames = parse_frames(&raw, path)?;
        Ok(Self { frames, cursor: 0 })
    }
}

fn parse_frames(raw: &str, path: &Path) -> Result<Vec<TelemetrySnapshot>> {
    let frames: Vec<TelemetrySnapshot> = match serde_json::from_str(raw) {
        Ok(frames) => frames,
        Err(_) => {
            let single: TelemetrySnapshot =
                serde_json::from_str(raw).map_err(|e| JdError::SnapshotDecode {
                    context: "replay file",
                    details: e.to_string(),
                })?;
            vec![single]
        }
    };
    if frames.is_empty() {
        return Err(JdError::EmptyReplay {
            path: path.to_path_buf(),
        });
    }
    Ok(frames)
}

impl TelemetryProvider for ReplayProvider {
    fn sample(&mut self) -> Result<TelemetrySnapshot> {
        let frame = self.frames[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.frames.len();
        Ok(frame)
    }

    fn label(&self) -> &'static str {
        "REPLAY"
    }
}

/// Synthesizes a plausible six-core board with fan, engines, thermals and rails.
#[derive(Debug)]
pub struct SimulatedProvider {
    rng: StdRng,
    tick: u64,
}

impl SimulatedProvider {
    /// Seeded constructor so tests and demos are reproducible.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            tick: 0,
        }
    }

    fn jitter(&mut self, base: f64, spread: f64) -> f64 {
        (base + self.rng.random_range(-spread..spread)).clamp(0.0, 100.0)
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::from_seed(0x6a65_7464)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
impl TelemetryProvider for SimulatedProvider {
    fn sample(&mut self) -> Result<TelemetrySnapshot> {
        self.tick += 1;
        let fan_speed = self.jitter(40.0, 5.0);
        let cpus = (0..6)
            .map(|i| CpuCore {
                online: i != 5,
                load_pct: self.jitter(35.0, 20.0),
                freq_mhz: Some(1420 + (i as u32) * 19),
            })
            .collect();
        let gpu_load = self.jitter(55.0, 25.0);
        let soc_temp = self.jitter(52.0, 4.0);

        Ok(TelemetrySnapshot {
            captured_at: Utc::now(),
            uptime_secs: 3600 * 24 + self.tick,
            fans: Some(vec![Fan {
                name: "pwmfan".into(),
                speeds: vec![fan_speed],
                rpm: Some(vec![(fan_speed * 40.0) as u32]),
            }]),
            jetson_clocks: Some(ClockState::Inactive),
            power_mode: Some("15W".into()),
            disk: DiskStats {
                used: 18.4,
                total: 59.0,
                unit: "GB".into(),
            },
            cpus,
            memory: MemoryStats {
                ram_used: 3.1,
                ram_total: 7.6,
                swap_used: 0.2,
                swap_total: 3.8,
                unit: "GB".into(),
            },
            gpus: vec![GpuStats {
                name: "gpu".into(),
                load_pct: gpu_load,
            }],
            engines: vec![
                Engine {
                    name: "APE".into(),
                    online: true,
                    freq_mhz: Some(150),
                },
                Engine {
                    name: "NVENC".into(),
                    online: false,
                    freq_mhz: None,
                },
                Engine {
                    name: "NVDEC".into(),
                    online: false,
                    freq_mhz: None,
                },
            ],
            temperatures: vec![
                TempSensor {
                    name: "cpu".into(),
                    temp_c: soc_temp + 3.0,
                    warning_c: Some(84.0),
                },
                TempSensor {
                    name: "gpu".into(),
                    temp_c: soc_temp + 1.5,
                    warning_c: Some(84.0),
                },
                TempSensor {
                    name: "soc".into(),
                    temp_c: soc_temp,
                    warning_c: Some(84.0),
                },
            ],
            power_rails: vec![
                PowerRail {
                    name: "VDD_CPU".into(),
                    power_mw: 2100 + self.tick % 300,
                    avg_mw: 2200,
                },
                PowerRail {
                    name: "VDD_GPU".into(),
                    power_mw: 3400 + self.tick % 500,
                    avg_mw: 3300,
                },
            ],
            processes: vec![
                Process {
                    pid: 1201,
                    name: "python3".into(),
                    cpu_pct: self.jitter(60.0, 10.0),
                    mem_kb: 412_000,
                },
                Process {
                    pid: 980,
                    name: "gnome-shell".into(),
                    cpu_pct: self.jitter(12.0, 5.0),
                    mem_kb: 250_000,
                },
                Process {
                    pid: 1534,
                    name: "jetdash".into(),
                    cpu_pct: self.jitter(2.0, 1.0),
                    mem_kb: 18_000,
                },
            ],
        })
    }

    fn label(&self) -> &'static str {
        "SIM"
    }
}
