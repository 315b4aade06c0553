use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of random mines seeded by [`Engine::reset`].
pub const DEFAULT_MINE_COUNT: CellCount = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }
}

/// Single-player minesweeper board.
///
/// Mines, flags and revealed cells are kept as masks over the board, so membership checks and
/// updates are constant time. The game state and the [`Grid`] snapshot are derived from them on
/// demand.
#[derive(Clone, Debug)]
pub struct Engine {
    size: Coord2,
    mines: Array2<bool>,
    flags: Array2<bool>,
    revealed: Array2<bool>,
    mine_count: CellCount,
    flag_count: CellCount,
    revealed_count: CellCount,
    detonated: bool,
    rng: SmallRng,
}

impl Engine {
    /// Empty board, random placement seeded from the clock.
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        Self::with_seed(width, height, generator::seed_from_time())
    }

    /// Empty board with reproducible random placement.
    pub fn with_seed(width: Coord, height: Coord, seed: u64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }
        let size = (width, height);
        log::debug!("New {}x{} board, seed: {}", width, height, seed);

        Ok(Self {
            size,
            mines: Array2::default(size.to_nd_index()),
            flags: Array2::default(size.to_nd_index()),
            revealed: Array2::default(size.to_nd_index()),
            mine_count: 0,
            flag_count: 0,
            revealed_count: 0,
            detonated: false,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Board sized after `template` with its mines placed.
    pub fn from_template(template: &MineTemplate) -> Result<Self> {
        let mut engine = Self::new(template.width(), template.height())?;
        engine.place_template(template)?;
        Ok(engine)
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// How many mines have not been flagged yet, negative when there are more flags than mines.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flag_count)
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        mask_contains(&self.mines, coords)
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        mask_contains(&self.flags, coords)
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        mask_contains(&self.revealed, coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Mines among the up to 8 cells around `coords`.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.mines[pos.to_nd_index()])
            .count() as u8
    }

    pub fn state(&self) -> GameState {
        if self.detonated {
            GameState::Lost
        } else if self.mine_count > 0
            && self.flag_count == self.mine_count
            && self.flags == self.mines
        {
            GameState::Won
        } else {
            GameState::Playing
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn place_mine(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if self.mines[coords.to_nd_index()] {
            return Err(GameError::DuplicateMine);
        }

        self.mines[coords.to_nd_index()] = true;
        self.mine_count += 1;
        Ok(())
    }

    /// Places every mine marked in `template`, which must match the board size.
    ///
    /// Nothing is placed when any marked cell already holds a mine.
    pub fn place_template(&mut self, template: &MineTemplate) -> Result<()> {
        if template.size() != self.size {
            return Err(GameError::InvalidSize);
        }
        if template.iter_mines().any(|coords| self.has_mine_at(coords)) {
            return Err(GameError::DuplicateMine);
        }

        for coords in template.iter_mines() {
            self.place_mine(coords)?;
        }
        log::debug!("Placed {} mines from template", template.mine_count());
        Ok(())
    }

    /// Places `count` mines on distinct cells that hold no mine yet, chosen uniformly at random.
    pub fn place_random_mines(&mut self, count: CellCount) -> Result<()> {
        if count > self.total_cells() {
            return Err(GameError::InvalidSize);
        }

        let cells = generator::pick_free_cells(&self.mines, self.size, count, &mut self.rng)?;
        for coords in cells {
            self.place_mine(coords)?;
        }
        log::debug!("Placed {} random mines", count);
        Ok(())
    }

    /// Reveals a cell, flood-filling from it when it has no adjacent mines.
    ///
    /// Returns the adjacent mine count of the targeted cell, [`RevealOutcome::HitMine`] when it
    /// holds a mine, or [`RevealOutcome::GameOver`] without touching the board once a mine has
    /// gone off.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.detonated {
            return Ok(RevealOutcome::GameOver);
        }

        if self.mines[coords.to_nd_index()] {
            self.detonated = true;
            log::debug!("Hit mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let count = self.open_cell(coords);
        log::debug!("Revealed cell at {:?}, mine count: {}", coords, count);
        if count == 0 {
            self.flood_fill(coords);
        }

        Ok(RevealOutcome::Revealed(count))
    }

    pub fn place_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.revealed[coords.to_nd_index()] || self.flags[coords.to_nd_index()] {
            return Ok(MarkOutcome::NoChange);
        }

        self.flags[coords.to_nd_index()] = true;
        self.flag_count += 1;
        Ok(MarkOutcome::Changed)
    }

    pub fn remove_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if !self.flags[coords.to_nd_index()] {
            return Ok(MarkOutcome::NoChange);
        }

        self.flags[coords.to_nd_index()] = false;
        self.flag_count -= 1;
        Ok(MarkOutcome::Changed)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        if self.is_flagged(self.validate_coords(coords)?) {
            self.remove_flag(coords)
        } else {
            self.place_flag(coords)
        }
    }

    /// Starts over on the same board size with [`DEFAULT_MINE_COUNT`] random mines.
    pub fn reset(&mut self) {
        self.mines.fill(false);
        self.flags.fill(false);
        self.revealed.fill(false);
        self.mine_count = 0;
        self.flag_count = 0;
        self.revealed_count = 0;
        self.detonated = false;

        let count = DEFAULT_MINE_COUNT.min(self.total_cells());
        if count < DEFAULT_MINE_COUNT {
            log::warn!(
                "Board only fits {} mines, requested {}",
                count,
                DEFAULT_MINE_COUNT
            );
        }
        if let Err(err) = self.place_random_mines(count) {
            log::warn!("Could not seed mines on reset: {}", err);
        }
        log::debug!("Game reset");
    }

    /// Builds a fresh snapshot: hidden cells, then revealed counts, then flags, then mines when
    /// the game is lost.
    pub fn grid(&self) -> Grid {
        let mut grid = Grid::new(self.size);

        for coords in iter_coords(self.size) {
            if self.revealed[coords.to_nd_index()] {
                grid.set(coords, GridCell::Revealed(self.adjacent_mines(coords)));
            }
        }

        for coords in iter_coords(self.size) {
            if self.flags[coords.to_nd_index()] {
                grid.set(coords, GridCell::Flagged);
            }
        }

        if self.state() == GameState::Lost {
            for coords in iter_coords(self.size) {
                if self.mines[coords.to_nd_index()] {
                    grid.set(coords, GridCell::Mine);
                }
            }
        }

        grid
    }

    /// Marks a safe cell revealed and drops any flag on it.
    fn open_cell(&mut self, coords: Coord2) -> u8 {
        let index = coords.to_nd_index();
        if !self.revealed[index] {
            self.revealed[index] = true;
            self.revealed_count += 1;
        }
        if self.flags[index] {
            self.flags[index] = false;
            self.flag_count -= 1;
        }
        self.adjacent_mines(coords)
    }

    /// Opens the zero-count region around `origin`, stopping at numbered cells, flags and edges.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit: Vec<Coord2> = self
            .iter_neighbors(origin)
            .filter(|&pos| self.is_fillable(pos))
            .collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop() {
            // may have been queued twice
            if !self.is_fillable(visit_coords) {
                continue;
            }

            let visit_count = self.open_cell(visit_coords);
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                visit_count
            );

            if visit_count == 0 {
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|&pos| self.is_fillable(pos)),
                );
            }
        }
    }

    fn is_fillable(&self, coords: Coord2) -> bool {
        let index = coords.to_nd_index();
        !self.revealed[index] && !self.mines[index] && !self.flags[index]
    }

    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }
}

fn mask_contains(mask: &Array2<bool>, coords: Coord2) -> bool {
    mask.get(coords.to_nd_index()).copied().unwrap_or(false)
}
