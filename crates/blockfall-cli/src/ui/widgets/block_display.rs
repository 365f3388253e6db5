use blockfall_engine::Color;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::{color, style};

/// What a single grid cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Empty,
    Ghost,
    Filled(Color),
}

/// One grid cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: CellView, show_dots: bool) -> Self {
        let (style, symbol) = match cell {
            CellView::Empty if show_dots => (style::EMPTY_DOT, "."),
            CellView::Empty => (style::EMPTY, ""),
            CellView::Ghost => (style::GHOST, "[]"),
            CellView::Filled(piece_color) => (style::bg_only(color::piece(piece_color)), ""),
        };
        Self { style, symbol }
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the symbol cells
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
