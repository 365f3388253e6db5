use std::iter;

use blockfall_engine::{Grid, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{BlockDisplay, CellView};

/// The playing grid with the ghost and the falling piece drawn on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<Piece>,
    current_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            current_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn current_piece(self, piece: Piece) -> Self {
        Self {
            current_piece: Some(piece),
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
        super::cell_count(Grid::WIDTH) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cell_count(Grid::HEIGHT) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    pub(super) fn cells(&self) -> [[CellView; Grid::WIDTH]; Grid::HEIGHT] {
        let mut cells = [[CellView::Empty; Grid::WIDTH]; Grid::HEIGHT];
        for (cell_row, grid_row) in iter::zip(&mut cells, self.grid.rows()) {
            for (cell, block) in iter::zip(cell_row, grid_row) {
                if let Some(color) = block {
                    *cell = CellView::Filled(*color);
                }
            }
        }
        let overlays = [
            self.ghost.map(|piece| (piece, CellView::Ghost)),
            self.current_piece
                .map(|piece| (piece, CellView::Filled(piece.color()))),
        ];
        for (piece, view) in overlays.into_iter().flatten() {
            for (x, y) in piece.occupied_cells() {
                // Cells above the top row are not drawn
                if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                    && let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x))
                {
                    *cell = view;
                }
            }
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..Grid::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Grid::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let screen_cells = area
            .layout::<{ Grid::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Grid::WIDTH }>(&horizontal));

        for (screen_row, row) in iter::zip(screen_cells, self.cells()) {
            for (screen_cell, cell) in iter::zip(screen_row, row) {
                BlockDisplay::from_cell(cell, true).render(screen_cell, buf);
            }
        }
    }
}
