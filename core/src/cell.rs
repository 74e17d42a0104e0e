use serde::{Deserialize, Serialize};

use crate::*;

/// One position of the grid and everything the engine knows about it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    pub(crate) has_mine: bool,
    pub(crate) flagged: bool,
    pub(crate) uncovered: bool,
    pub(crate) exploded: bool,
    pub(crate) number_of_mines: Option<u8>,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self {
            row,
            col,
            has_mine: false,
            flagged: false,
            uncovered: false,
            exploded: false,
            number_of_mines: None,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_uncovered(&self) -> bool {
        self.uncovered
    }

    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Mines among the adjacent cells, `None` until mines are planted.
    pub const fn number_of_mines(&self) -> Option<u8> {
        self.number_of_mines
    }

    /// Neither flagged nor uncovered, what the win check looks for.
    pub const fn is_unresolved(&self) -> bool {
        !self.flagged && !self.uncovered
    }

    /// How the cell should be drawn while the game is in `state`.
    pub fn view(&self, state: GameState) -> CellView {
        use CellView::*;

        if self.exploded {
            return Exploded;
        }
        if self.uncovered {
            return Uncovered(self.number_of_mines.unwrap_or(0));
        }
        match (state, self.flagged, self.has_mine) {
            (GameState::Lost, true, false) => IncorrectFlag,
            (GameState::Lost, false, true) => Mine,
            (_, true, _) => Flagged,
            (_, false, _) => Covered,
        }
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Flagged,
    Uncovered(u8),
    /// The mine whose reveal lost the game
    Exploded,
    /// Unflagged mine, only shown after a loss
    Mine,
    /// Flag on a safe cell, only shown after a loss
    IncorrectFlag,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Covered
    }
}
