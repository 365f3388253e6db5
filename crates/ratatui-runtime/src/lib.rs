//! Minimal terminal driver loop for ratatui applications.
//!
//! [`Runtime`] owns the event loop. It polls crossterm for input, issues
//! clock ticks carrying the milliseconds elapsed since the loop started, and
//! redraws according to a [`RenderMode`]. Applications plug in through the
//! [`App`] trait.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
