use std::iter;

use blockfall_engine::Effect;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{
    cue::MusicState,
    ui::widgets::{color, style},
};

/// Music state plus the most recent sound cues, newest on top.
pub struct CueLogDisplay<'a> {
    cues: &'a [Effect],
    music: MusicState,
    rows: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> CueLogDisplay<'a> {
    pub fn new(cues: &'a [Effect], music: MusicState, rows: u16) -> Self {
        Self {
            cues,
            music,
            rows,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        10 + super::block_horizontal_margin(self.block.as_ref())
    }

    /// One line for the music state, a blank line, then the cue rows.
    pub fn height(&self) -> u16 {
        2 + self.rows + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for CueLogDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let [music_area, _, cues_area] = area.layout(&Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ]));
        let music_style = match self.music {
            MusicState::Playing => style::DEFAULT,
            MusicState::Paused => Style::new().fg(color::YELLOW),
            MusicState::Stopped => Style::new().fg(color::RED),
        };
        Line::styled(format!("♪ {}", self.music), music_style).render(music_area, buf);

        let row_areas = cues_area.layout_vec(&Layout::vertical(
            (0..self.rows).map(|_| Constraint::Length(1)),
        ));
        for (cue, area) in iter::zip(self.cues, row_areas) {
            Line::styled(cue.to_string(), style::EMPTY_DOT).render(area, buf);
        }
    }
}
