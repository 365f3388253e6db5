use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// When the runtime redraws.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Redraw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Redraw after state changes, at most once per interval.
    ///
    /// Changes arriving faster than the interval are batched into one redraw.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from a frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Schedules ticks, redraws and terminal input.
#[derive(Debug)]
pub(super) struct EventLoop {
    started_at: Instant,
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Option<Instant>,
    last_render: Option<Instant>,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            started_at: Instant::now(),
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: None,
            last_render: None,
            // The first frame is drawn immediately.
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Milliseconds since the loop was created.
    pub(super) fn elapsed_millis(&self) -> u64 {
        millis_between(self.started_at, Instant::now())
    }

    /// Blocks until the next tick, redraw or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.tick_due(now) {
                self.last_tick = Some(now);
                self.dirty = true;
                return Ok(TuiEvent::Tick(millis_between(self.started_at, now)));
            }
            if self.render_due(now) {
                self.last_render = Some(now);
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn tick_due(&self, now: Instant) -> bool {
        match (self.tick_interval, self.last_tick) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(interval), Some(last)) => now.duration_since(last) >= interval,
        }
    }

    fn render_due(&self, now: Instant) -> bool {
        if !self.dirty {
            return false;
        }
        match (self.render_mode, self.last_render) {
            (RenderMode::OnDirty, _) | (RenderMode::Throttled(_), None) => true,
            (RenderMode::Throttled(interval), Some(last)) => now.duration_since(last) >= interval,
        }
    }

    /// Time to wait for input before the next scheduled tick or redraw.
    /// `None` waits indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self
            .tick_interval
            .map(|interval| self.last_tick.map_or(now, |last| last + interval));
        let next_render_at = self.dirty.then(|| match (self.render_mode, self.last_render) {
            (RenderMode::Throttled(interval), Some(last)) => last + interval,
            _ => now,
        });
        let deadline = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}

fn millis_between(start: Instant, now: Instant) -> u64 {
    u64::try_from(now.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_between() {
        let start = Instant::now();
        assert_eq!(millis_between(start, start), 0);
        assert_eq!(millis_between(start, start + Duration::from_millis(1500)), 1500);
        // An earlier instant clamps to zero instead of going negative.
        assert_eq!(millis_between(start + Duration::from_secs(1), start), 0);
    }

    #[test]
    fn test_first_tick_and_render_are_due_immediately() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(16)));
        let now = Instant::now();
        assert!(events.tick_due(now));
        assert!(events.render_due(now));
        assert_eq!(events.timeout(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(100)));
        let last = Instant::now();
        events.last_tick = Some(last);
        events.dirty = false;

        assert!(!events.tick_due(last + Duration::from_millis(99)));
        assert!(events.tick_due(last + Duration::from_millis(100)));
        assert_eq!(
            events.timeout(last + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
    }

    #[test]
    fn test_throttled_render_batches_changes() {
        let mut events = EventLoop::new();
        events.set_render_mode(RenderMode::Throttled(Duration::from_millis(50)));
        let last = Instant::now();
        events.last_render = Some(last);

        events.dirty = true;
        assert!(!events.render_due(last + Duration::from_millis(10)));
        assert!(events.render_due(last + Duration::from_millis(50)));

        events.dirty = false;
        assert!(!events.render_due(last + Duration::from_millis(60)));
    }

    #[test]
    fn test_no_schedule_waits_for_input() {
        let mut events = EventLoop::new();
        events.dirty = false;
        assert_eq!(events.timeout(Instant::now()), None);
    }
}
