use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw the board, detached from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub config: GameConfig,
    pub state: GameState,
    pub hidden_mines: isize,
    pub elapsed_seconds: u32,
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn from_board<G: MinefieldGenerator>(board: &Board<G>) -> Self {
        let state = board.state();
        Self {
            config: board.config(),
            state,
            hidden_mines: board.hidden_mines(),
            elapsed_seconds: board.elapsed_seconds(),
            cells: board.grid().map(|cell| cell.view(state)),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

impl<G: MinefieldGenerator> Board<G> {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self)
    }
}
