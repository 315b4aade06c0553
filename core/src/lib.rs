use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use grid::*;
pub use template::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod template;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of [`Engine::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// A safe cell was opened, with this many adjacent mines.
    Revealed(u8),
    /// The cell held a mine and the game is now lost.
    HitMine,
    /// The game had already ended, nothing changed.
    GameOver,
}

impl RevealOutcome {
    /// Integer form of the terminal outcomes.
    pub const TERMINAL_CODE: i8 = -1;

    pub const fn code(self) -> i8 {
        match self {
            Self::Revealed(count) => count as i8,
            Self::HitMine | Self::GameOver => Self::TERMINAL_CODE,
        }
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            Self::HitMine | Self::GameOver => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::GameOver)
    }

    pub const fn has_update(self) -> bool {
        match self {
            Self::Revealed(_) => true,
            Self::HitMine => true,
            Self::GameOver => false,
        }
    }
}
