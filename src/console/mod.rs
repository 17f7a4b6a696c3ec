//! Console TUI - a terminal pane showing the output of a project's tasks.
//!
//! Output of every task in the project is interleaved in append order and
//! banded with alternating row colors. The pane follows new output as it
//! arrives and can be narrowed to a single task.
//!
//! Keyboard:
//! - t / Tab, T / Shift-Tab: cycle the "Show Output of" picker
//! - a: show all tasks, 1-9: show one task
//! - ↑↓ PgUp PgDn Home End: scroll
//! - f: jump back to the latest followed line
//! - c / Delete: clear the visible output
//! - q / Esc: quit

pub mod app;
pub mod filter;
pub mod links;
pub mod scroll;
pub mod selection;

pub use app::{run_console, ConsoleApp};
pub use filter::{clear, filter, IndexedOutputRecord};
pub use scroll::{ScrollFollower, Viewport};
pub use selection::{Selector, ViewSelection};
