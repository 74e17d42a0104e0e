use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Cells kept free of mines around the first reveal.
#[derive(Copy, Clone, Debug, PartialEq)]
enum SafeZone {
    Unrestricted,
    Origin,
    Neighborhood,
}

/// Generation strategy that keeps the first revealed cell and its neighbors free of mines, but other than that is
/// purely random.
///
/// Mines are a uniform sample of the eligible cells, drawn from a seeded `SmallRng` so a game can be replayed.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMinefieldGenerator {
    fn default() -> Self {
        Self::new(rand::random())
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, origin: Coord2) -> MineLayout {
        use SafeZone::*;

        log::debug!("generating minefield from seed {}", self.seed);
        let size = config.size();
        let total_cells = config.total_cells();
        let neighborhood = clamped_neighbors(origin, size);
        let zone_cells = neighborhood.len() as CellCount + 1;

        let safe_zone = if config.mines().saturating_add(zone_cells) <= total_cells {
            Neighborhood
        } else if config.mines() < total_cells {
            log::warn!("Cannot keep neighbors of {:?} safe, fallback to safe origin", origin);
            Origin
        } else {
            log::warn!("Minefield is full, {:?} cannot be kept safe", origin);
            Unrestricted
        };

        let eligible: Vec<Coord2> = (0..size.0)
            .flat_map(|row| (0..size.1).map(move |col| (row, col)))
            .filter(|&pos| match safe_zone {
                Unrestricted => true,
                Origin => pos != origin,
                Neighborhood => pos != origin && !neighborhood.contains(&pos),
            })
            .collect();

        let amount = usize::from(config.mines()).min(eligible.len());
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for i in index::sample(&mut self.rng, eligible.len(), amount) {
            mine_mask[eligible[i].to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        // double check mine count
        if layout.mine_count() != config.mines() {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines()
            );
        }
        layout
    }
}
