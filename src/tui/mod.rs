//! Terminal dashboard: drawing surface, layout, panels, and the tick loop.

pub mod input;
pub mod layout;
pub mod page_all;
pub mod panels;
pub mod runtime;
pub mod surface;
pub mod terminal_guard;
pub mod theme;
pub mod widgets;

#[cfg(test)]
mod test_properties;

pub use page_all::{AllPage, FrameInput, FrameReport};
pub use runtime::{RuntimeOptions, run_dashboard};
