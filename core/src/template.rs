use core::ops::Index;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular mine mask used for bulk placement.
///
/// Rows are given top to bottom, so `rows[y][x]` marks the cell at `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineTemplate {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineTemplate {
    /// Builds a template from rows of `0`/`1` markers.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(GameError::MalformedTemplate);
        }
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }
        let size: Coord2 = (
            width.try_into().map_err(|_| GameError::InvalidSize)?,
            height.try_into().map_err(|_| GameError::InvalidSize)?,
        );

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for (y, row) in rows.iter().enumerate() {
            for (x, &marker) in row.as_ref().iter().enumerate() {
                mine_mask[[x, y]] = match marker {
                    0 => false,
                    1 => true,
                    _ => return Err(GameError::MalformedTemplate),
                };
            }
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Builds a template of `size` with mines at `mine_coords`; repeated coordinates collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.mine_mask.dim();
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Coordinates of every marked cell, row by row.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }
}

impl Index<Coord2> for MineTemplate {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

/// Text form: one row per line, `1`, `*` or `x` for a mine and `0` or `.` for a clear cell.
/// Blank lines and whitespace are ignored.
impl FromStr for MineTemplate {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        '1' | '*' | 'x' | 'X' => Ok(1),
                        '0' | '.' => Ok(0),
                        _ => Err(GameError::MalformedTemplate),
                    })
                    .collect::<Result<Vec<u8>>>()
            })
            .filter(|row| !matches!(row, Ok(markers) if markers.is_empty()))
            .collect::<Result<Vec<_>>>()?;

        Self::from_rows(&rows)
    }
}
