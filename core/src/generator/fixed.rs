use super::*;

/// Places mines on a predetermined set of cells, wherever the first reveal lands.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    mine_coords: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(mine_coords: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mine_coords: mine_coords.into(),
        }
    }
}

impl From<&MineLayout> for FixedMinefieldGenerator {
    fn from(layout: &MineLayout) -> Self {
        Self::new(layout.mine_coords().collect::<Vec<_>>())
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, _origin: Coord2) -> MineLayout {
        let size = config.size();
        let in_bounds: Vec<Coord2> = self
            .mine_coords
            .iter()
            .copied()
            .filter(|&(row, col)| row < size.0 && col < size.1)
            .collect();
        if in_bounds.len() != self.mine_coords.len() {
            log::warn!(
                "Dropped {} preset mines outside of {:?}",
                self.mine_coords.len() - in_bounds.len(),
                size
            );
        }

        let layout = MineLayout::from_mine_coords(size, &in_bounds)
            .unwrap_or_else(|_| MineLayout::from_mine_mask(Array2::default(size.to_nd_index())));
        if layout.mine_count() != config.mines() {
            log::warn!(
                "Preset minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines()
            );
        }
        layout
    }
}
