use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for applications driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure the tick rate and
    /// render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key input, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application clock.
    ///
    /// `now_millis` is the monotonic time since the runtime started, in
    /// milliseconds. It never decreases between calls.
    fn update(&mut self, runtime: &mut Runtime, now_millis: u64);
}
