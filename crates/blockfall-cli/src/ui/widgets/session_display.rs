use blockfall_engine::{Effect, GameSnapshot, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::{
    cue::MusicState,
    ui::widgets::{BoardDisplay, CueLogDisplay, PieceDisplay, SessionStatsDisplay, color, style},
};

const CUE_ROWS: u16 = 6;

/// Full game screen: hold and stats on the left, the board in the middle,
/// next piece and sound log on the right.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a GameSnapshot,
    cues: &'a [Effect],
    music: MusicState,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
            cues: &[],
            music: MusicState::Playing,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn cues(self, cues: &'a [Effect]) -> Self {
        Self { cues, ..self }
    }

    pub fn music(self, music: MusicState) -> Self {
        Self { music, ..self }
    }

    pub fn height(&self) -> u16 {
        BoardDisplay::new(&self.snapshot.grid)
            .block(Block::bordered())
            .height()
    }

    /// The falling piece and its ghost are hidden once the game is over, as
    /// the blocked spawn overlaps locked cells.
    fn game_board(&self, border_style: Color) -> BoardDisplay<'a> {
        let snapshot = self.snapshot;
        let board = BoardDisplay::new(&snapshot.grid).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        if snapshot.game_over {
            return board;
        }
        board
            .ghost(snapshot.ghost_piece)
            .current_piece(snapshot.current_piece)
    }

    fn panel(&self, title: &'a str, border_style: Color) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(border_style)
            .style(style::DEFAULT)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.snapshot;
        let border_style = match snapshot.state {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let game_board = self.game_board(border_style);
        let hold_panel = {
            let panel = PieceDisplay::new().block(self.panel("HOLD", border_style));
            match snapshot.held_piece {
                Some(piece) => panel.piece(piece),
                None => panel,
            }
        };
        let next_panel = PieceDisplay::new()
            .piece(snapshot.next_piece)
            .block(self.panel("NEXT", border_style));
        let stats_panel =
            SessionStatsDisplay::new(snapshot).block(self.panel("STATS", border_style));
        let cue_panel = CueLogDisplay::new(self.cues, self.music, CUE_ROWS)
            .block(self.panel("SOUND", border_style));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), stats_panel.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(u16::max(next_panel.width(), cue_panel.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(stats_panel.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(stats_panel.width())]).flex(Flex::End),
        )[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);

        let [next_area, cue_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(cue_panel.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let next_area = next_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(next_panel.width())]).flex(Flex::Start),
        )[0];
        let cue_area = cue_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(cue_panel.width())]).flex(Flex::Start),
        )[0];

        let game_board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        stats_panel.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);
        cue_panel.render(cue_area, buf);

        let banner = match snapshot.state {
            SessionState::Playing => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = banner {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
