use core::time::Duration;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sapper_core::*;
use web_time::Instant;

const CONFIGS: [(Coord, Coord, CellCount); 4] = [(9, 9, 10), (16, 16, 40), (30, 16, 99), (5, 3, 6)];

fn all_coords(board: &Board<impl MinefieldGenerator>) -> Vec<Coord2> {
    board.grid().iter().map(Cell::coords).collect()
}

fn uncovered_mask(board: &Board<impl MinefieldGenerator>) -> Vec<bool> {
    board.grid().iter().map(Cell::is_uncovered).collect()
}

#[test]
fn first_reveal_is_always_safe() {
    for (width, height, mines) in CONFIGS {
        let config = GameConfig::new(width, height, mines).unwrap();
        for seed in 0..40u64 {
            let mut board = Board::with_seed(config, seed);
            let origin = (
                (seed % u64::from(height)) as Coord,
                (seed * 7 % u64::from(width)) as Coord,
            );

            let outcome = board.reveal(origin).unwrap();

            assert_ne!(outcome, RevealOutcome::HitMine, "seed {seed} on {config:?}");
            let mined = board.grid().iter().filter(|cell| cell.has_mine()).count();
            assert_eq!(mined, usize::from(mines));
            assert!(!board.cell(origin).unwrap().has_mine());
            for pos in board.adjacent_cells(origin).unwrap() {
                assert!(!board.cell(pos).unwrap().has_mine(), "seed {seed}: mine at {pos:?}");
            }
        }
    }
}

#[test]
fn numbers_match_adjacent_mines() {
    let mut board = Board::with_seed(GameConfig::new(30, 16, 99).unwrap(), 42);
    board.plant_mines((8, 15)).unwrap();

    for coords in all_coords(&board) {
        let expected = board
            .adjacent_cells(coords)
            .unwrap()
            .into_iter()
            .filter(|&pos| board.cell(pos).unwrap().has_mine())
            .count() as u8;
        assert_eq!(board.cell(coords).unwrap().number_of_mines(), Some(expected));
    }
}

#[test]
fn adjacency_is_symmetric_and_bounded() {
    let board = Board::with_seed(GameConfig::new(7, 4, 0).unwrap(), 0);

    for a in all_coords(&board) {
        let neighbors = board.adjacent_cells(a).unwrap();
        assert!(!neighbors.contains(&a));

        let on_row_edge = a.0 == 0 || a.0 == 3;
        let on_col_edge = a.1 == 0 || a.1 == 6;
        let expected = match (on_row_edge, on_col_edge) {
            (true, true) => 3,
            (true, false) | (false, true) => 5,
            (false, false) => 8,
        };
        assert_eq!(neighbors.len(), expected, "{a:?}");

        for b in neighbors {
            assert!(board.adjacent_cells(b).unwrap().contains(&a));
        }
    }
}

#[test]
fn flood_fill_uncovers_exactly_the_closure() {
    for seed in 0..30u64 {
        let mut board = Board::with_seed(GameConfig::new(16, 16, 40).unwrap(), seed);
        board.reveal((8, 8)).unwrap();

        // reference closure, recomputed from the final numbers
        let mut expected = vec![(8, 8)];
        let mut frontier = vec![(8, 8)];
        while let Some(pos) = frontier.pop() {
            if board.cell(pos).unwrap().number_of_mines() != Some(0) {
                continue;
            }
            for next in board.adjacent_cells(pos).unwrap() {
                if !expected.contains(&next) {
                    expected.push(next);
                    frontier.push(next);
                }
            }
        }

        for coords in all_coords(&board) {
            let cell = board.cell(coords).unwrap();
            assert_eq!(
                cell.is_uncovered(),
                expected.contains(&coords),
                "seed {seed}: {coords:?}"
            );
            if cell.is_uncovered() && cell.number_of_mines() == Some(0) {
                for pos in board.adjacent_cells(coords).unwrap() {
                    assert!(board.cell(pos).unwrap().is_uncovered());
                }
            }
        }
    }
}

#[test]
fn random_play_keeps_invariants() {
    for seed in 0..20u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::with_seed(GameConfig::new(12, 10, 25).unwrap(), seed);
        let mut before = uncovered_mask(&board);

        for _ in 0..200 {
            let coords = (rng.random_range(0..10), rng.random_range(0..12));
            let finished = board.game_over();
            let grid_before = board.grid().clone();

            if rng.random_bool(0.2) {
                board.toggle_flag(coords).unwrap();
            } else {
                board.reveal(coords).unwrap();
            }

            if finished {
                assert_eq!(board.grid(), &grid_before, "seed {seed}: move after game over");
            }
            let after = uncovered_mask(&board);
            for (was, is) in before.iter().zip(&after) {
                assert!(!was || *is, "seed {seed}: cell covered again");
            }
            assert!(!(board.game_won() && board.game_lost()));
            before = after;
        }
    }
}

#[test]
fn lost_game_ignores_further_moves() {
    let mut board = Board::from_mine_coords(4, 4, &[(0, 0), (3, 3)]).unwrap();
    board.reveal((0, 0)).unwrap();
    assert!(board.game_lost());
    let snapshot = board.snapshot();

    for coords in all_coords(&board) {
        assert_eq!(board.reveal(coords).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag(coords).unwrap(), MarkOutcome::NoChange);
    }

    assert_eq!(board.snapshot(), snapshot);
}

#[test]
fn two_by_two_win_needs_correct_flag() {
    let mut board = Board::from_mine_coords(2, 2, &[(0, 0)]).unwrap();
    board.toggle_flag((0, 0)).unwrap();
    for coords in [(0, 1), (1, 0), (1, 1)] {
        board.reveal(coords).unwrap();
    }
    assert!(board.game_won());

    let mut board = Board::from_mine_coords(2, 2, &[(0, 0)]).unwrap();
    board.reveal((1, 1)).unwrap();
    for coords in [(0, 0), (0, 1), (1, 0)] {
        board.toggle_flag(coords).unwrap();
    }
    assert!(board.grid().iter().all(|cell| cell.is_flagged() || cell.is_uncovered()));
    assert!(!board.game_won());
}

#[test]
fn too_many_mines_is_rejected() {
    assert_eq!(
        GameConfig::new(2, 2, 5),
        Err(GameError::InvalidConfiguration {
            width: 2,
            height: 2,
            mines: 5
        })
    );

    let mut board = Board::with_seed(GameConfig::new(3, 3, 1).unwrap(), 0);
    assert!(board.reset(2, 2, 5).is_err());
    assert_eq!(board.config(), GameConfig::new(3, 3, 1).unwrap());
    assert_eq!(board.grid().dim(), (3, 3));
}

#[test]
fn timer_freezes_on_game_end() {
    let start = Instant::now();
    let mut board = Board::from_mine_coords(3, 3, &[(1, 1)]).unwrap();

    board.reveal_at((0, 0), start).unwrap();
    board.tick(start + Duration::from_secs(12));
    assert_eq!(board.elapsed_seconds(), 12);

    board.reveal_at((1, 1), start + Duration::from_secs(13)).unwrap();
    for later in [20, 500, 5000] {
        board.tick(start + Duration::from_secs(later));
        assert_eq!(board.elapsed_seconds(), 12);
    }
}
