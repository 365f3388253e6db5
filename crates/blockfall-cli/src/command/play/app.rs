use blockfall_engine::{GameSeed, GameSession, GameSnapshot, SessionState};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use ratatui_runtime::{App, RenderMode, Runtime};

use super::keymap::{self, Action};
use crate::{
    cue::{CuePlayer, SoundBoard},
    ui::widgets::{KeyBindingDisplay, SessionDisplay},
};

const CUE_HISTORY_SIZE: usize = 8;

pub struct PlayApp {
    session: GameSession,
    sounds: SoundBoard,
    fps: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(seed: GameSeed, fps: f64, player: Box<dyn CuePlayer>) -> Self {
        Self {
            session: GameSession::with_seed(seed),
            sounds: SoundBoard::new(player, CUE_HISTORY_SIZE),
            fps,
            is_exiting: false,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(self.fps));
        runtime.set_render_mode(RenderMode::throttled_from_rate(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        match keymap::action_for_key(key.code) {
            Some(Action::Game(command)) => {
                let effects = self.session.process_command(command);
                self.sounds.play_all(&effects);
            }
            Some(Action::Quit) => self.is_exiting = true,
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let recent_cues = self.sounds.recent().collect::<Vec<_>>();
        let session_display = SessionDisplay::new(&snapshot)
            .cues(&recent_cues)
            .music(self.sounds.music());
        let bindings = match snapshot.state {
            SessionState::Playing => keymap::PLAYING_BINDINGS,
            SessionState::Paused => keymap::PAUSED_BINDINGS,
            SessionState::GameOver => keymap::GAME_OVER_BINDINGS,
        };

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, now_millis: u64) {
        let effects = self.session.process_gravity_tick(now_millis);
        self.sounds.play_all(&effects);
    }
}
