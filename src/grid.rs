// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::ops::{Index, IndexMut};

use crate::color::Color;
use crate::error::{Error, Result};

mod key;
mod led;

pub use key::Key;
pub use led::GridLed;

/// Keyboard custom effect grid, 6 rows of 22 columns.
pub type KeyboardGrid = ColorGrid<6, 22>;
/// Mouse custom effect grid, 9 rows of 7 columns.
pub type MouseGrid = ColorGrid<9, 7>;
/// Keypad custom effect grid, 4 rows of 5 columns.
pub type KeypadGrid = ColorGrid<4, 5>;
/// Mousepad custom effect strip.
pub type MousepadGrid = ColorGrid<1, 15>;
/// Headset custom effect strip.
pub type HeadsetGrid = ColorGrid<1, 5>;
/// Chroma Link custom effect strip.
pub type ChromaLinkGrid = ColorGrid<1, 5>;

/// A fixed-capacity buffer of colors for one device family.
///
/// Every cell is always initialized. Cells can be addressed linearly
/// (`row * COLUMNS + column`) or by coordinate. Strip-shaped families use a
/// single row, so their linear and coordinate views coincide.
///
/// Cloning produces a fully independent copy; the grid owns its storage
/// inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorGrid<const ROWS: usize, const COLUMNS: usize> {
    cells: [[Color; COLUMNS]; ROWS],
}

impl<const ROWS: usize, const COLUMNS: usize> ColorGrid<ROWS, COLUMNS> {
    pub const MAX_ROWS: usize = ROWS;
    pub const MAX_COLUMNS: usize = COLUMNS;
    pub const MAX_LEDS: usize = ROWS * COLUMNS;

    /// Creates an all black grid.
    pub fn new() -> Self {
        Self::filled(Color::BLACK)
    }

    /// Creates a grid with every cell set to the given color.
    pub fn filled(color: Color) -> Self {
        ColorGrid {
            cells: [[color; COLUMNS]; ROWS],
        }
    }

    /// Copies a linear array of exactly `MAX_LEDS` colors into a new grid.
    pub fn from_slice(colors: &[Color]) -> Result<Self> {
        if colors.len() != Self::MAX_LEDS {
            return Err(Error::InvalidLength {
                parameter: "colors",
                expected: Self::MAX_LEDS,
                actual: colors.len(),
            });
        }

        let mut grid = Self::new();
        for (cell, color) in grid.cells.iter_mut().flatten().zip(colors) {
            *cell = *color;
        }
        Ok(grid)
    }

    /// Copies a row-major 2D array into a new grid.
    ///
    /// The outer length must be `MAX_ROWS` and every row must be
    /// `MAX_COLUMNS` long. All rows are checked before anything is copied.
    pub fn from_rows<R: AsRef<[Color]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != ROWS {
            return Err(Error::InvalidLength {
                parameter: "rows",
                expected: ROWS,
                actual: rows.len(),
            });
        }
        if let Some(row) = rows.iter().find(|row| row.as_ref().len() != COLUMNS) {
            return Err(Error::InvalidLength {
                parameter: "columns",
                expected: COLUMNS,
                actual: row.as_ref().len(),
            });
        }

        let mut grid = Self::new();
        for (target, source) in grid.cells.iter_mut().zip(rows) {
            target.copy_from_slice(source.as_ref());
        }
        Ok(grid)
    }

    /// The number of addressable cells.
    pub const fn len(&self) -> usize {
        Self::MAX_LEDS
    }

    pub const fn is_empty(&self) -> bool {
        Self::MAX_LEDS == 0
    }

    /// Gets the color at a linear index.
    pub fn get(&self, index: usize) -> Result<Color> {
        let (row, column) = Self::split(index)?;
        Ok(self.cells[row][column])
    }

    /// Sets the color at a linear index.
    pub fn set(&mut self, index: usize, color: Color) -> Result<()> {
        let (row, column) = Self::split(index)?;
        self.cells[row][column] = color;
        Ok(())
    }

    /// Gets the color at a coordinate.
    pub fn get_at(&self, row: usize, column: usize) -> Result<Color> {
        Self::check(row, column)?;
        Ok(self.cells[row][column])
    }

    /// Sets the color at a coordinate.
    pub fn set_at(&mut self, row: usize, column: usize, color: Color) -> Result<()> {
        Self::check(row, column)?;
        self.cells[row][column] = color;
        Ok(())
    }

    /// Overwrites every cell.
    pub fn fill(&mut self, color: Color) {
        self.cells = [[color; COLUMNS]; ROWS];
    }

    /// Sets every cell to black.
    pub fn clear(&mut self) {
        self.fill(Color::BLACK);
    }

    /// Iterates the cells in linear order.
    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.cells.iter().flatten()
    }

    /// The grid as rows.
    pub fn as_rows(&self) -> &[[Color; COLUMNS]; ROWS] {
        &self.cells
    }

    fn split(index: usize) -> Result<(usize, usize)> {
        if index >= Self::MAX_LEDS {
            return Err(Error::IndexOutOfRange {
                parameter: "index",
                value: index,
                limit: Self::MAX_LEDS,
            });
        }
        Ok((index / COLUMNS, index % COLUMNS))
    }

    fn check(row: usize, column: usize) -> Result<()> {
        if row >= ROWS {
            return Err(Error::IndexOutOfRange {
                parameter: "row",
                value: row,
                limit: ROWS,
            });
        }
        if column >= COLUMNS {
            return Err(Error::IndexOutOfRange {
                parameter: "column",
                value: column,
                limit: COLUMNS,
            });
        }
        Ok(())
    }
}

impl<const ROWS: usize, const COLUMNS: usize> Default for ColorGrid<ROWS, COLUMNS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLUMNS: usize> Index<usize> for ColorGrid<ROWS, COLUMNS> {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        assert!(index < Self::MAX_LEDS, "index {index} out of range");
        &self.cells[index / COLUMNS][index % COLUMNS]
    }
}

impl<const ROWS: usize, const COLUMNS: usize> IndexMut<usize> for ColorGrid<ROWS, COLUMNS> {
    fn index_mut(&mut self, index: usize) -> &mut Color {
        assert!(index < Self::MAX_LEDS, "index {index} out of range");
        &mut self.cells[index / COLUMNS][index % COLUMNS]
    }
}

impl<const ROWS: usize, const COLUMNS: usize> Index<(usize, usize)> for ColorGrid<ROWS, COLUMNS> {
    type Output = Color;

    fn index(&self, (row, column): (usize, usize)) -> &Color {
        &self.cells[row][column]
    }
}

impl<const ROWS: usize, const COLUMNS: usize> IndexMut<(usize, usize)>
    for ColorGrid<ROWS, COLUMNS>
{
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Color {
        &mut self.cells[row][column]
    }
}

impl<const ROWS: usize, const COLUMNS: usize> PartialEq<[Color]> for ColorGrid<ROWS, COLUMNS> {
    fn eq(&self, other: &[Color]) -> bool {
        other.len() == Self::MAX_LEDS && self.iter().eq(other.iter())
    }
}

impl<const ROWS: usize, const COLUMNS: usize> PartialEq<&[Color]> for ColorGrid<ROWS, COLUMNS> {
    fn eq(&self, other: &&[Color]) -> bool {
        *self == **other
    }
}

impl<const ROWS: usize, const COLUMNS: usize> PartialEq<Vec<Color>> for ColorGrid<ROWS, COLUMNS> {
    fn eq(&self, other: &Vec<Color>) -> bool {
        *self == **other
    }
}
