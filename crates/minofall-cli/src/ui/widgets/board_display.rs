use std::iter;

use minofall_engine::Grid;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Draws a grid as produced by `GameBoard::rendered_grid`.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::to_u16(self.grid.width())
            .saturating_mul(CellDisplay::width())
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        super::to_u16(self.grid.height())
            .saturating_mul(CellDisplay::height())
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.width()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..self.grid.height()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = vertical.split(area);
        for (grid_row, row) in iter::zip(grid_rows.iter(), self.grid.rows()) {
            let grid_cells = horizontal.split(*grid_row);
            for (grid_cell, cell) in iter::zip(grid_cells.iter(), row.cells()) {
                CellDisplay::from_cell(*cell).render(*grid_cell, buf);
            }
        }
    }
}
