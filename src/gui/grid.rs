//! Grid layout
//!
//! A [`Grid`] splits its rectangle into `rows x columns` [`Cell`]s once, at
//! construction. Cells tile the grid exactly: every pixel of the grid belongs
//! to one cell. Row heights and column widths are either even, absolute
//! pixel lists or proportional weights (see [`Sizes`]).
//!
//! Items added to a cell are positioned relative to the cell rectangle:
//!
//! 1. alignment, space separated tokens applied in order (`centre` first):
//!    `left`, `right`, `top`, `bottom`, `centre`. Defaults to `centre`.
//! 2. padding, comma separated `side amount` pairs such as `"left 5, top 2"`.
//!    `top` and `left` push the item inwards from those edges, `bottom` and
//!    `right` from the opposite ones.
//!
//! Unknown tokens are skipped with a warning.
//!
//! # Example
//!
//! ```ignore
//! let mut grid = Grid::with_sizes(
//!     (0, 0),
//!     (640, 360),
//!     3,
//!     1,
//!     Some(Sizes::Proportional(vec![2.0, 1.0, 1.0])),
//!     None,
//! )?;
//! grid.add_item(title, 0, 0, Some("centre"), None)?;
//! grid.add_item(back, 2, 0, Some("left bottom"), Some("left 10, bottom 10"))?;
//! ```

use super::item::{Item, Widget};
use crate::controller::Context;
use crate::error::{Axis, GridError, ItemError};
use crate::render::Surface;
use sdl2::pixels::Color;
use std::ops::Index;
use tracing::{debug, warn};

/// Row heights or column widths of a grid
#[derive(Debug, Clone, PartialEq)]
pub enum Sizes {
    /// Pixel sizes, must sum to the grid extent
    Absolute(Vec<u32>),
    /// Relative weights, normalized to the grid extent
    Proportional(Vec<f32>),
}

impl Sizes {
    fn len(&self) -> usize {
        match self {
            Sizes::Absolute(sizes) => sizes.len(),
            Sizes::Proportional(weights) => weights.len(),
        }
    }

    /// Offsets of each slot along an axis of length `extent`
    ///
    /// Returns `count + 1` boundaries, the first 0 and the last `extent`.
    pub fn partition(&self, axis: Axis, count: usize, extent: u32) -> Result<Vec<u32>, GridError> {
        if self.len() != count {
            return Err(GridError::SizeCount {
                axis,
                expected: count,
                found: self.len(),
            });
        }

        match self {
            Sizes::Absolute(sizes) => {
                // Summed wide so long lists cannot overflow
                let found: u64 = sizes.iter().map(|size| u64::from(*size)).sum();
                if found != u64::from(extent) {
                    return Err(GridError::SizeSum {
                        axis,
                        expected: extent,
                        found,
                    });
                }
                // Prefix sums stay within `extent` once the total matches
                let mut boundaries = Vec::with_capacity(count + 1);
                let mut offset = 0;
                boundaries.push(offset);
                for size in sizes {
                    offset += size;
                    boundaries.push(offset);
                }
                Ok(boundaries)
            }
            Sizes::Proportional(weights) => {
                if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
                    return Err(GridError::InvalidProportion { axis });
                }
                let total: f64 = weights.iter().map(|w| f64::from(*w)).sum();
                let mut boundaries = Vec::with_capacity(count + 1);
                let mut cumulative = 0.0;
                boundaries.push(0);
                for weight in &weights[..count - 1] {
                    cumulative += f64::from(*weight);
                    boundaries.push((f64::from(extent) * cumulative / total).round() as u32);
                }
                boundaries.push(extent);
                Ok(boundaries)
            }
        }
    }
}

/// Even split of `extent` into `count` slots
fn even_partition(count: usize, extent: u32) -> Vec<u32> {
    (0..=count as u64)
        .map(|i| (u64::from(extent) * i / count as u64) as u32)
        .collect()
}

/// Placement of an item inside its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    Centre,
}

impl Alignment {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "left" => Some(Alignment::Left),
            "right" => Some(Alignment::Right),
            "top" => Some(Alignment::Top),
            "bottom" => Some(Alignment::Bottom),
            "centre" | "center" => Some(Alignment::Centre),
            _ => None,
        }
    }
}

/// Cell edge a padding amount is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "top" => Some(Side::Top),
            "bottom" => Some(Side::Bottom),
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }

    /// Offset applied to the item for `amount` pixels of padding
    fn offset(self, amount: i32) -> (i32, i32) {
        match self {
            Side::Top => (0, amount),
            Side::Bottom => (0, -amount),
            Side::Left => (amount, 0),
            Side::Right => (-amount, 0),
        }
    }
}

/// Alignment tokens in application order; `centre` goes first
fn parse_alignment(alignment: &str) -> Vec<Alignment> {
    let mut parsed: Vec<Alignment> = alignment
        .split_whitespace()
        .filter_map(|token| {
            let parsed = Alignment::parse(token);
            if parsed.is_none() {
                warn!(target: "grid", token, "unknown_alignment_ignored");
            }
            parsed
        })
        .collect();
    // Stable sort keeps the order of the other tokens
    parsed.sort_by_key(|a| *a != Alignment::Centre);
    parsed
}

fn parse_padding(padding: &str) -> Vec<(Side, i32)> {
    padding
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let mut parts = entry.split_whitespace();
            let side = parts.next().and_then(Side::parse);
            let amount = parts.next().and_then(|a| a.parse::<i32>().ok());
            match (side, amount, parts.next()) {
                (Some(side), Some(amount), None) => Some((side, amount)),
                _ => {
                    warn!(target: "grid", entry, "malformed_padding_ignored");
                    None
                }
            }
        })
        .collect()
}

/// One addressable sub-rectangle of a grid
pub struct Cell {
    base: Item,
    row: usize,
    column: usize,
}

impl Cell {
    fn new(position: (i32, i32), size: (u32, u32), row: usize, column: usize) -> Self {
        Cell {
            base: Item::new(position, size),
            row,
            column,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn items(&self) -> &[Box<dyn Widget>] {
        self.base.items()
    }

    /// Add an item, then align and pad it within the cell
    pub fn add_item<W: Widget + 'static>(
        &mut self,
        item: W,
        alignment: Option<&str>,
        padding: Option<&str>,
    ) {
        self.base.add_item(item);

        let cell = (self.base.position(), self.base.size());
        let alignments = parse_alignment(alignment.unwrap_or("centre"));
        let paddings = padding.map(parse_padding).unwrap_or_default();

        let Some(item) = self.base.items_mut().last_mut() else {
            return;
        };
        for alignment in alignments {
            align(item.as_mut(), cell, alignment);
        }
        for (side, amount) in paddings {
            let (dx, dy) = side.offset(amount);
            item.translate(dx, dy);
        }

        debug!(
            target: "grid",
            row = self.row,
            column = self.column,
            x = item.position().0,
            y = item.position().1,
            "item_placed"
        );
    }
}

fn align(item: &mut dyn Widget, cell: ((i32, i32), (u32, u32)), alignment: Alignment) {
    let ((cell_x, cell_y), (cell_width, cell_height)) = cell;
    let (x, y) = item.position();
    let (width, height) = item.size();
    let spare_x = cell_width as i32 - width as i32;
    let spare_y = cell_height as i32 - height as i32;

    let (new_x, new_y) = match alignment {
        Alignment::Left => (cell_x, y),
        Alignment::Right => (cell_x + spare_x, y),
        Alignment::Top => (x, cell_y),
        Alignment::Bottom => (x, cell_y + spare_y),
        Alignment::Centre => (cell_x + spare_x / 2, cell_y + spare_y / 2),
    };
    item.set_position(new_x, new_y);
}

impl Widget for Cell {
    fn item(&self) -> &Item {
        &self.base
    }

    fn item_mut(&mut self) -> &mut Item {
        &mut self.base
    }

    fn resize(&mut self, _width: u32, _height: u32) -> Result<(), ItemError> {
        Err(ItemError::NotResizable("cell"))
    }
}

/// Cells of one grid row, left to right
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn get_mut(&mut self, column: usize) -> Option<&mut Cell> {
        self.cells.get_mut(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Index<usize> for Row {
    type Output = Cell;

    fn index(&self, column: usize) -> &Cell {
        &self.cells[column]
    }
}

pub struct Grid {
    base: Item,
    rows: Vec<Row>,
    columns: usize,
    outline: Option<Color>,
}

impl Grid {
    /// Evenly sized cells
    pub fn new(
        position: (i32, i32),
        size: (u32, u32),
        rows: usize,
        columns: usize,
    ) -> Result<Self, GridError> {
        Self::with_sizes(position, size, rows, columns, None, None)
    }

    pub fn with_sizes(
        position: (i32, i32),
        size: (u32, u32),
        rows: usize,
        columns: usize,
        row_sizes: Option<Sizes>,
        column_sizes: Option<Sizes>,
    ) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::ZeroDimension);
        }

        let (width, height) = size;
        let ys = match row_sizes {
            Some(sizes) => sizes.partition(Axis::Rows, rows, height)?,
            None => even_partition(rows, height),
        };
        let xs = match column_sizes {
            Some(sizes) => sizes.partition(Axis::Columns, columns, width)?,
            None => even_partition(columns, width),
        };

        let (x, y) = position;
        let rows = (0..rows)
            .map(|row| Row {
                cells: (0..columns)
                    .map(|column| {
                        Cell::new(
                            (x + xs[column] as i32, y + ys[row] as i32),
                            (xs[column + 1] - xs[column], ys[row + 1] - ys[row]),
                            row,
                            column,
                        )
                    })
                    .collect(),
            })
            .collect();

        Ok(Grid {
            base: Item::new(position, size),
            rows,
            columns,
            outline: None,
        })
    }

    /// Draw every cell border in `color`
    pub fn with_outline(mut self, color: Color) -> Self {
        self.outline = Some(color);
        self
    }

    pub fn add_item<W: Widget + 'static>(
        &mut self,
        item: W,
        row: usize,
        column: usize,
        alignment: Option<&str>,
        padding: Option<&str>,
    ) -> Result<(), GridError> {
        let cell = self
            .cell_mut(row, column)
            .ok_or(GridError::OutOfBounds { row, column })?;
        cell.add_item(item, alignment, padding);
        Ok(())
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.get_mut(column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().flat_map(|row| row.cells.iter_mut())
    }
}

impl Widget for Grid {
    fn item(&self) -> &Item {
        &self.base
    }

    fn item_mut(&mut self) -> &mut Item {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut Context) {
        self.base.update(ctx);
        if !self.base.visible {
            return;
        }
        for cell in self.cells_mut() {
            cell.update(ctx);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        if !self.base.visible {
            return Ok(());
        }
        for cell in self.rows.iter().flat_map(Row::iter) {
            if let Some(color) = self.outline {
                surface.draw_rect(cell.rect(), color)?;
            }
            cell.draw(surface)?;
        }
        self.base.draw(surface)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        for cell in self.cells_mut() {
            cell.translate(dx, dy);
        }
    }

    fn resize(&mut self, _width: u32, _height: u32) -> Result<(), ItemError> {
        Err(ItemError::NotResizable("grid"))
    }
}
