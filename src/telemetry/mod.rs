//! Telemetry snapshot model and per-tick snapshot providers.

pub mod provider;
pub mod snapshot;

pub use provider::{ReplayProvider, SimulatedProvider, TelemetryProvider};
pub use snapshot::TelemetrySnapshot;
