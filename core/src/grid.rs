use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible value of a single cell in a [`Grid`] snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridCell {
    #[default]
    Hidden,
    Revealed(u8),
    Flagged,
    /// Only shown once the game is lost.
    Mine,
}

impl GridCell {
    pub const HIDDEN_CODE: i8 = -1;
    pub const MINE_CODE: i8 = -2;
    pub const FLAG_CODE: i8 = -3;

    /// Integer encoding: the adjacent mine count for revealed cells, a negative sentinel otherwise.
    pub const fn code(self) -> i8 {
        match self {
            Self::Hidden => Self::HIDDEN_CODE,
            Self::Revealed(count) => count as i8,
            Self::Flagged => Self::FLAG_CODE,
            Self::Mine => Self::MINE_CODE,
        }
    }

    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            Self::HIDDEN_CODE => Some(Self::Hidden),
            Self::MINE_CODE => Some(Self::Mine),
            Self::FLAG_CODE => Some(Self::Flagged),
            0..=8 => Some(Self::Revealed(code as u8)),
            _ => None,
        }
    }

    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

/// Read-only `width × height` snapshot produced by [`Engine::grid`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<GridCell>,
}

impl Grid {
    pub(crate) fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub(crate) fn set(&mut self, coords: Coord2, cell: GridCell) {
        self.cells[coords.to_nd_index()] = cell;
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn get(&self, coords: Coord2) -> Option<GridCell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Rows top to bottom, each yielding cells left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = GridCell> + '_> + '_ {
        let (width, height) = self.size();
        (0..height).map(move |y| (0..width).map(move |x| self[(x, y)]))
    }

    /// Integer-coded rows, see [`GridCell::code`].
    pub fn codes(&self) -> Vec<Vec<i8>> {
        self.rows()
            .map(|row| row.map(GridCell::code).collect())
            .collect()
    }
}

impl Index<Coord2> for Grid {
    type Output = GridCell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}
