//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use jetdash::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{JdError, Result};

// Telemetry
pub use crate::telemetry::provider::{ReplayProvider, SimulatedProvider, TelemetryProvider};
pub use crate::telemetry::snapshot::TelemetrySnapshot;

// TUI
pub use crate::tui::page_all::{AllPage, FrameInput, FrameReport};
pub use crate::tui::runtime::{RuntimeOptions, run_dashboard};
pub use crate::tui::surface::{DrawSurface, RecordingSurface, TermSurface};
pub use crate::tui::theme::Theme;
