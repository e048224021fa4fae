//! RAII terminal lifecycle guard.
//!
//! [`TerminalGuard`] enters raw mode and the alternate screen on construction
//! and restores the terminal on [`Drop`], even during panics or early error
//! returns. A custom panic hook restores the terminal *before* the default
//! panic message prints, so the backtrace lands on a readable screen.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

/// Raw mode is active; checked by the panic hook to decide whether terminal
/// restoration is needed.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

const ALT_SCREEN_LEAVE: &[u8] = b"\x1b[?1049l";
const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

/// RAII guard around raw mode and the alternate screen.
pub struct TerminalGuard {
    hook_installed: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen, installing a panic-safe
    /// cleanup hook.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal_best_effort();
            prev(info);
        }));

        Ok(Self {
            hook_installed: true,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        if self.hook_installed {
            // The previous hook was moved into the closure and cannot be
            // restored exactly; reset to the default.
            let _ = panic::take_hook();
        }
    }
}

/// Write raw escape sequences so restoration works even when crossterm's
/// state tracking was torn down by the unwinding itself.
fn restore_terminal_best_effort() {
    if !RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        return;
    }
    let _ = terminal::disable_raw_mode();
    let mut out = io::stdout();
    let _ = out.write_all(ALT_SCREEN_LEAVE);
    let _ = out.write_all(CURSOR_SHOW);
    let _ = out.flush();
}
