//! Tick-driven dashboard loop.
//!
//! One full redraw executes synchronously per input or timer tick: poll for
//! a key, sample the provider, compose the frame, flush. The page chrome
//! (header row and bottom key-hint row) is drawn here; everything between
//! belongs to [`AllPage`].

use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use crate::core::errors::{JdError, Result};
use crate::telemetry::provider::TelemetryProvider;
use crate::telemetry::snapshot::TelemetrySnapshot;
use crate::tui::input::{InputAction, resolve_key};
use crate::tui::page_all::{AllPage, FrameInput, PanelFailure};
use crate::tui::surface::{DrawSurface, TermSurface};
use crate::tui::terminal_guard::TerminalGuard;
use crate::tui::theme::{Theme, Tone};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runtime knobs resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// Redraw interval.
    pub refresh: Duration,
    /// Color policy for the terminal surface.
    pub theme: Theme,
}

/// Run the dashboard until the user quits.
pub fn run_dashboard(
    provider: &mut dyn TelemetryProvider,
    options: &RuntimeOptions,
) -> Result<()> {
    let _guard = TerminalGuard::new().map_err(|e| JdError::terminal("setup", e))?;
    let mut surface = TermSurface::stdout(options.theme)?;

    let mut snapshot = provider.sample()?;
    let page = AllPage::new(&snapshot);

    let mut stale = false;
    let mut last_failures: Vec<PanelFailure> = Vec::new();
    let mut last_render = Instant::now();
    let mut force = true;

    loop {
        let mut input = FrameInput::idle();
        if event::poll(POLL_INTERVAL).map_err(|e| JdError::terminal("poll", e))? {
            match event::read().map_err(|e| JdError::terminal("read event", e))? {
                Event::Key(key) => {
                    match resolve_key(&key) {
                        Some(InputAction::Quit) => return Ok(()),
                        Some(InputAction::ForceRefresh) => force = true,
                        None => {}
                    }
                    input.key = Some(key);
                }
                Event::Mouse(mouse) => input.mouse = Some(mouse),
                Event::Resize(..) => force = true,
                _ => {}
            }
        }

        if !force && last_render.elapsed() < options.refresh {
            continue;
        }
        force = false;
        last_render = Instant::now();

        // A failing provider keeps the last snapshot on screen rather than
        // tearing the dashboard down mid-session.
        match provider.sample() {
            Ok(fresh) => {
                snapshot = fresh;
                stale = false;
            }
            Err(_) => stale = true,
        }

        surface.resize_to_terminal()?;
        surface.clear()?;
        draw_header(
            &mut surface,
            provider.label(),
            &snapshot,
            stale,
            &last_failures,
        )?;
        let report = page.draw(&input, &mut surface, &snapshot)?;
        draw_menu(&mut surface)?;
        last_failures = report.failures;
        surface.flush()?;
    }
}

/// Header chrome: title, telemetry source, capture time, health marker.
pub(crate) fn draw_header(
    surface: &mut dyn DrawSurface,
    source: &str,
    snapshot: &TelemetrySnapshot,
    stale: bool,
    failures: &[PanelFailure],
) -> Result<()> {
    let time = snapshot.captured_at.format("%H:%M:%S");
    let mut header = format!(" jetdash  [{source}]  {time}");
    if stale {
        header.push_str("  STALE");
    }
    if !failures.is_empty() {
        header.push_str(&format!("  {} panel error(s)", failures.len()));
    }
    let tone = if stale || !failures.is_empty() {
        Tone::Yellow
    } else {
        Tone::Cyan
    };
    surface.put_str(0, 0, &header, tone.style().bold())
}

/// Bottom key-hint row.
pub(crate) fn draw_menu(surface: &mut dyn DrawSurface) -> Result<()> {
    let (_, rows) = surface.size();
    let bottom = rows.saturating_sub(1);
    surface.put_str(bottom, 0, " q quit   r refresh ", Tone::Grey.style().dim())
}
