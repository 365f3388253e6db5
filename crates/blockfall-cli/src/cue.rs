//! Sound cues for engine effects.
//!
//! The terminal has no mixer, so "playing" a cue means either ringing the
//! terminal bell or doing nothing. Every cue is also kept in a short log that
//! the side panel shows, together with the background music state the effects
//! imply.

use std::{
    collections::VecDeque,
    io::{self, Write},
};

use blockfall_engine::Effect;

/// Something that can play the sound for an effect.
pub trait CuePlayer {
    fn play(&mut self, effect: Effect) -> io::Result<()>;
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _effect: Effect) -> io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell on line clears and game over.
#[derive(Debug)]
pub struct TerminalBell<W> {
    writer: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> TerminalBell<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> CuePlayer for TerminalBell<W>
where
    W: Write,
{
    fn play(&mut self, effect: Effect) -> io::Result<()> {
        if matches!(effect, Effect::Clear | Effect::GameOver) {
            self.writer.write_all(b"\x07")?;
            self.writer.flush()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MusicState {
    #[display("playing")]
    Playing,
    #[display("paused")]
    Paused,
    #[display("stopped")]
    Stopped,
}

/// Routes effects to a [`CuePlayer`] and remembers the most recent ones.
pub struct SoundBoard {
    player: Box<dyn CuePlayer>,
    recent: RingBuffer<Effect>,
    music: MusicState,
}

impl SoundBoard {
    pub fn new(player: Box<dyn CuePlayer>, history_size: usize) -> Self {
        Self {
            player,
            recent: RingBuffer::with_capacity(history_size),
            music: MusicState::Playing,
        }
    }

    /// Plays every effect in order. Playback errors are ignored.
    pub fn play_all(&mut self, effects: &[Effect]) {
        for &effect in effects {
            _ = self.player.play(effect);
            self.music = match effect {
                Effect::Restart | Effect::Resume => MusicState::Playing,
                Effect::Pause => MusicState::Paused,
                Effect::GameOver => MusicState::Stopped,
                _ => self.music,
            };
            self.recent.push(effect);
        }
    }

    pub fn music(&self) -> MusicState {
        self.music
    }

    /// Returns logged effects, newest first.
    pub fn recent(&self) -> impl Iterator<Item = Effect> + '_ {
        self.recent.iter_newest_first().copied()
    }
}

/// A fixed-capacity buffer that drops the oldest entry when full.
#[derive(Debug)]
struct RingBuffer<T> {
    capacity: usize,
    buf: VecDeque<T>,
}

impl<T> RingBuffer<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            buf: VecDeque::with_capacity(capacity),
        }
    }

    fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buf.len() >= self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(item);
    }

    fn iter_newest_first(&self) -> impl Iterator<Item = &T> {
        self.buf.iter().rev()
    }
}
