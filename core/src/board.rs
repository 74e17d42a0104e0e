use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> Running
/// - Running -> Won
/// - Running -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No reveal yet, mines are not planted
    NotStarted,
    /// Mines planted and timer running
    Running,
    /// Game ended and player won
    Won,
    /// Game ended and player lost
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Represents a game from start to finish.
///
/// Mines are only planted on the first reveal, so that reveal and its
/// neighbors are always safe. Moves on a finished game are accepted and
/// ignored; only coordinates outside the grid are reported as errors.
#[derive(Clone, Debug)]
pub struct Board<G = RandomMinefieldGenerator> {
    config: GameConfig,
    grid: Array2<Cell>,
    generator: G,
    mines_planted: bool,
    hidden_mines: isize,
    state: GameState,
    timer: ElapsedTimer,
    exploded_cell: Option<Coord2>,
}

impl Board<RandomMinefieldGenerator> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, RandomMinefieldGenerator::default())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }
}

impl Board<FixedMinefieldGenerator> {
    /// Board of `width` x `height` whose mines go exactly on `mine_coords`.
    pub fn from_mine_coords(width: Coord, height: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let layout = MineLayout::from_mine_coords((height, width), mine_coords)?;
        let config = GameConfig::new(width, height, layout.mine_count())?;
        Ok(Self::with_generator(config, FixedMinefieldGenerator::from(&layout)))
    }
}

fn fresh_grid(config: GameConfig) -> Array2<Cell> {
    Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
        Cell::new(row as Coord, col as Coord)
    })
}

impl<G: MinefieldGenerator> Board<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        log::debug!(
            "new board {}x{} with {} mines",
            config.width(),
            config.height(),
            config.mines()
        );
        Self {
            config,
            grid: fresh_grid(config),
            generator,
            mines_planted: false,
            hidden_mines: config.mines() as isize,
            state: Default::default(),
            timer: ElapsedTimer::new(),
            exploded_cell: None,
        }
    }

    /// Starts over with a new grid, keeping the generator.
    ///
    /// On an invalid configuration the current game is left untouched.
    pub fn reset(&mut self, width: Coord, height: Coord, mines: CellCount) -> Result<()> {
        let config = GameConfig::new(width, height, mines)?;
        log::debug!("reset board to {}x{} with {} mines", width, height, mines);
        self.config = config;
        self.grid = fresh_grid(config);
        self.mines_planted = false;
        self.hidden_mines = mines as isize;
        self.state = GameState::NotStarted;
        self.timer = ElapsedTimer::new();
        self.exploded_cell = None;
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn game_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn game_lost(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    pub fn game_over(&self) -> bool {
        self.state.is_final()
    }

    pub fn mines_planted(&self) -> bool {
        self.mines_planted
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn hidden_mines(&self) -> isize {
        self.hidden_mines
    }

    /// Seconds as of the last tick, 0 before the first reveal
    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn start_time(&self) -> Option<Instant> {
        self.timer.started_at()
    }

    pub fn exploded_cell(&self) -> Option<Coord2> {
        self.exploded_cell
    }

    pub fn grid(&self) -> &Array2<Cell> {
        &self.grid
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.grid.get(coords.to_nd_index())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.config.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn adjacent_cells(&self, coords: Coord2) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(self.grid.adjacent(coords))
    }

    /// Places the mines around `origin` and numbers every cell, once per game.
    pub fn plant_mines(&mut self, origin: Coord2) -> Result<()> {
        let origin = self.validate_coords(origin)?;
        if self.mines_planted {
            log::debug!("mines already planted, ignoring origin {:?}", origin);
            return Ok(());
        }

        let layout = self.generator.generate(self.config, origin);
        for cell in self.grid.iter_mut() {
            let coords = cell.coords();
            cell.has_mine = layout.contains_mine(coords);
            cell.number_of_mines = Some(layout.adjacent_mine_count(coords));
        }
        self.mines_planted = true;
        log::debug!(
            "planted {} mines, first reveal at {:?}",
            layout.mine_count(),
            origin
        );
        Ok(())
    }

    /// Primary click, reads the clock for the start time.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.reveal_at(coords, Instant::now())
    }

    /// Primary click happening at `now`.
    pub fn reveal_at(&mut self, coords: Coord2, now: Instant) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;
        if self.state.is_final() {
            return Ok(NoChange);
        }

        if !self.mines_planted {
            self.plant_mines(coords)?;
        }
        self.mark_started(now);

        let cell = &mut self.grid[coords.to_nd_index()];
        if cell.flagged || cell.uncovered {
            return Ok(NoChange);
        }
        if cell.has_mine {
            cell.exploded = true;
            self.exploded_cell = Some(coords);
            log::debug!("hit mine at {:?}", coords);
            self.end_game(false);
            return Ok(HitMine);
        }

        self.uncover(coords, true);
        Ok(if self.check_win() { Won } else { Revealed })
    }

    /// Secondary click.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_final() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.grid[coords.to_nd_index()];
        if cell.uncovered {
            return Ok(MarkOutcome::NoChange);
        }
        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.hidden_mines -= 1;
        } else {
            self.hidden_mines += 1;
        }
        log::debug!("flag at {:?} set to {}", coords, cell.flagged);

        self.check_win();
        Ok(MarkOutcome::Changed)
    }

    /// Advances the elapsed time, ignored unless the game is running.
    pub fn tick(&mut self, now: Instant) {
        if matches!(self.state, GameState::Running) {
            self.timer.tick(now);
        }
    }

    /// Cells a reveal of the zero cell `origin` would uncover besides itself.
    ///
    /// Expands through every covered zero cell and stops at the numbered border.
    /// Flagged cells keep their flag and are left out, but the region still
    /// expands through them. Already uncovered cells are skipped.
    pub fn flood_region(&self, origin: Coord2) -> Vec<Coord2> {
        let mut region = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(origin);
        let mut to_visit: VecDeque<Coord2> = self.grid.adjacent(origin).into_iter().collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let cell = &self.grid[visit_coords.to_nd_index()];
            if cell.uncovered {
                continue;
            }
            if !cell.flagged {
                log::trace!(
                    "flood reaches cell at {:?}, mine count: {:?}",
                    visit_coords,
                    cell.number_of_mines
                );
                region.push(visit_coords);
            }

            if cell.number_of_mines == Some(0) {
                to_visit.extend(
                    self.grid
                        .adjacent(visit_coords)
                        .into_iter()
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        log::trace!("flood-fill from {:?} reached {} cells", origin, region.len());
        region
    }

    fn uncover(&mut self, coords: Coord2, propagate: bool) {
        let cell = &mut self.grid[coords.to_nd_index()];
        debug_assert!(!cell.has_mine, "uncovering a mine at {coords:?}");
        cell.uncovered = true;

        if propagate && cell.number_of_mines == Some(0) {
            for pos in self.flood_region(coords) {
                self.uncover(pos, false);
            }
        }
    }

    /// Full-grid win check: nothing left unresolved and no wrong flags.
    fn check_win(&mut self) -> bool {
        if !matches!(self.state, GameState::Running) {
            return self.game_won();
        }

        let all_resolved = self.grid.iter().all(|cell| !cell.is_unresolved());
        let flags_correct = self
            .grid
            .iter()
            .filter(|cell| cell.flagged)
            .all(|cell| cell.has_mine);

        if all_resolved && flags_correct {
            self.end_game(true);
            true
        } else {
            false
        }
    }

    /// Checks if the state is initial and changes to running, recording the start time
    fn mark_started(&mut self, now: Instant) {
        if self.state.is_initial() {
            self.timer.start(now);
            self.state = GameState::Running;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_final() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        self.timer.stop();
        log::debug!(
            "game {} after {}s",
            if won { "won" } else { "lost" },
            self.timer.elapsed_secs()
        );
    }
}
