use blockfall_engine::{MAX_SHAPE_EXTENT, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{BlockDisplay, CellView};

/// A single piece preview (next or held), centered in a fixed-size panel.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cell_count(MAX_SHAPE_EXTENT) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cell_count(MAX_SHAPE_EXTENT) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_block = BlockDisplay::from_cell(CellView::Empty, false);
        empty_block.render(area, buf);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();
        let piece_area = area.centered(
            Constraint::Length(super::cell_count(shape.cols()) * BlockDisplay::width()),
            Constraint::Length(super::cell_count(shape.rows()) * BlockDisplay::height()),
        );

        let col_constraints =
            (0..shape.cols()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..shape.rows()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let screen_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_block = BlockDisplay::from_cell(CellView::Filled(piece.color()), false);
        for (r, screen_row) in screen_rows.enumerate() {
            for (c, screen_cell) in screen_row.into_iter().enumerate() {
                if shape.is_occupied(r, c) {
                    occupied_block.render(screen_cell, buf);
                }
            }
        }
    }
}
