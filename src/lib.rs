#![forbid(unsafe_code)]

//! jetdash — terminal dashboard for NVIDIA Jetson-class device telemetry.
//!
//! One compact page shows fans, jetson_clocks and power-mode state, uptime,
//! CPU, memory, GPU, disk, the process table, and an optional bottom strip
//! of engine/temperature/power columns. The compositor reads one immutable
//! [`telemetry::TelemetrySnapshot`] per tick and draws through an explicit
//! surface handle, so the whole layout is testable without a terminal.
//!
//! # Library usage
//!
//! ```rust,no_run
//! use jetdash::prelude::*;
//!
//! let mut provider = SimulatedProvider::default();
//! let snapshot = provider.sample()?;
//! let _page = AllPage::new(&snapshot);
//! # Ok::<(), jetdash::core::errors::JdError>(())
//! ```

pub mod prelude;

pub mod core;
pub mod telemetry;
pub mod tui;
