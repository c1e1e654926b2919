use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};
use super::engine::merged_value;
use super::state::GameOutcome;

/// Tile value that ends the game as a win.
pub const DEFAULT_WIN_TILE: u32 = 128;

/// Chance that a spawned tile is a 4 instead of a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Game setup, loadable from the `[game]` table of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_tile: u32,
    pub four_probability: f64,
    /// Maximum number of undo steps kept; 0 keeps every step.
    pub history_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 4,
            cols: 4,
            win_tile: DEFAULT_WIN_TILE,
            four_probability: DEFAULT_FOUR_PROBABILITY,
            history_limit: 256,
        }
    }
}

impl GameConfig {
    pub fn rules(&self) -> Rules {
        Rules {
            rows: self.rows,
            cols: self.cols,
            win_tile: self.win_tile,
            four_probability: self.four_probability,
        }
    }
}

/// The parameters a game session plays by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub rows: usize,
    pub cols: usize,
    pub win_tile: u32,
    pub four_probability: f64,
}

impl Default for Rules {
    fn default() -> Self {
        GameConfig::default().rules()
    }
}

impl Rules {
    /// Whether `board` has the dimensions these rules play on.
    pub fn fits(&self, board: &Board) -> bool {
        board.row_count() == self.rows && board.col_count() == self.cols
    }
}

impl Board {
    /// Place a 2 (or a 4, with `four_probability`) on a uniformly random
    /// empty cell. A full board is returned unchanged.
    pub fn with_random_tile<R: Rng + ?Sized>(&self, rng: &mut R, four_probability: f64) -> Board {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return self.clone();
        }

        let (row, col) = empty[rng.random_range(0..empty.len())];
        let value = if rng.random_bool(four_probability) { 4 } else { 2 };
        self.with_cell(row, col, Some(value))
    }
}

/// Points gained going from `prev` to `next`: the sum of every positive
/// per-cell increase, with empty cells counting as zero.
///
/// Both boards are expected to have the same dimensions.
pub fn score_delta(prev: &Board, next: &Board) -> u64 {
    let mut gained = 0u64;
    for (before_row, after_row) in prev.rows().iter().zip(next.rows()) {
        for (before, after) in before_row.iter().zip(after_row) {
            if let Some(after) = *after {
                let before = before.unwrap_or(0);
                if after > before {
                    gained += u64::from(after - before);
                }
            }
        }
    }
    gained
}

/// Decide whether the game has ended on `board`.
///
/// Reaching `win_tile` wins. Otherwise the game continues while any cell is
/// empty or any two horizontal or vertical neighbours can merge.
pub fn game_outcome(board: &Board, win_tile: u32) -> Option<GameOutcome> {
    if board.tiles().any(|v| v >= win_tile) {
        return Some(GameOutcome::Won);
    }
    if !board.is_full() {
        return None;
    }

    let rows = board.row_count();
    let cols = board.col_count();
    for r in 0..rows {
        for c in 0..cols {
            let can_merge = |other: Cell| match (board.get(r, c), other) {
                (Some(a), Some(b)) => merged_value(a, b).is_some(),
                _ => false,
            };
            if r + 1 < rows && can_merge(board.get(r + 1, c)) {
                return None;
            }
            if c + 1 < cols && can_merge(board.get(r, c + 1)) {
                return None;
            }
        }
    }

    Some(GameOutcome::Stuck)
}

pub fn is_game_over(board: &Board, win_tile: u32) -> bool {
    game_outcome(board, win_tile).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::MAX_TILE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(rows: Vec<Vec<Cell>>) -> Board {
        Board::new(rows).unwrap()
    }

    fn stuck_board() -> Board {
        board(vec![
            vec![Some(2), Some(4), Some(2), Some(4)],
            vec![Some(4), Some(2), Some(4), Some(2)],
            vec![Some(2), Some(4), Some(2), Some(4)],
            vec![Some(4), Some(2), Some(4), Some(2)],
        ])
    }

    #[test]
    fn test_random_tile_fills_one_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let b = Board::empty(4, 4).unwrap();
        let next = b.with_random_tile(&mut rng, DEFAULT_FOUR_PROBABILITY);

        assert_eq!(next.empty_cells().len(), 15);
        let tiles: Vec<u32> = next.tiles().collect();
        assert_eq!(tiles.len(), 1);
        assert!(tiles[0] == 2 || tiles[0] == 4);
        assert_eq!(b.empty_cells().len(), 16);
    }

    #[test]
    fn test_random_tile_only_uses_empty_cells() {
        let mut rng = StdRng::seed_from_u64(11);
        let b = board(vec![vec![Some(8), None, Some(8)]]);
        for _ in 0..50 {
            let next = b.with_random_tile(&mut rng, 0.5);
            assert_eq!(next.get(0, 0), Some(8));
            assert_eq!(next.get(0, 2), Some(8));
            assert!(matches!(next.get(0, 1), Some(2) | Some(4)));
        }
    }

    #[test]
    fn test_random_tile_full_board_is_noop() {
        let mut rng = StdRng::seed_from_u64(3);
        let b = stuck_board();
        assert_eq!(b.with_random_tile(&mut rng, 0.1), b);
    }

    #[test]
    fn test_random_tile_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(5);
        let b = Board::empty(2, 2).unwrap();
        assert_eq!(b.with_random_tile(&mut rng, 0.0).max_tile(), Some(2));
        assert_eq!(b.with_random_tile(&mut rng, 1.0).max_tile(), Some(4));
    }

    #[test]
    fn test_random_tile_is_deterministic_with_seed() {
        let b = Board::empty(4, 4).unwrap();
        let mut a = StdRng::seed_from_u64(42);
        let mut c = StdRng::seed_from_u64(42);
        assert_eq!(
            b.with_random_tile(&mut a, 0.1).with_random_tile(&mut a, 0.1),
            b.with_random_tile(&mut c, 0.1).with_random_tile(&mut c, 0.1)
        );
    }

    #[test]
    fn test_score_delta_counts_increases() {
        let prev = board(vec![vec![Some(2), Some(2), None, None]]);
        let next = board(vec![vec![Some(4), None, None, None]]);
        assert_eq!(score_delta(&prev, &next), 2);
    }

    #[test]
    fn test_score_delta_counts_tiles_moved_into_empty_cells() {
        let prev = board(vec![vec![None, Some(2)], vec![Some(4), Some(4)]]);
        let next = board(vec![vec![Some(2), None], vec![Some(8), None]]);
        assert_eq!(score_delta(&prev, &next), 2 + 4);
    }

    #[test]
    fn test_score_delta_unchanged_board() {
        let b = stuck_board();
        assert_eq!(score_delta(&b, &b), 0);
    }

    #[test]
    fn test_game_over_when_stuck() {
        let b = stuck_board();
        assert_eq!(game_outcome(&b, DEFAULT_WIN_TILE), Some(GameOutcome::Stuck));
        assert!(is_game_over(&b, DEFAULT_WIN_TILE));
    }

    #[test]
    fn test_not_over_with_one_empty_cell() {
        let b = stuck_board().with_cell(2, 1, None);
        assert!(!is_game_over(&b, DEFAULT_WIN_TILE));
    }

    #[test]
    fn test_not_over_with_equal_neighbours() {
        let b = stuck_board().with_cell(0, 0, Some(4));
        assert!(!is_game_over(&b, DEFAULT_WIN_TILE));

        let b = stuck_board().with_cell(3, 3, Some(4));
        assert!(!is_game_over(&b, DEFAULT_WIN_TILE));
    }

    #[test]
    fn test_largest_tiles_leave_board_stuck() {
        let b = board(vec![vec![Some(MAX_TILE), Some(MAX_TILE)]]);
        assert!(b.legal_directions().is_empty());
        assert_eq!(game_outcome(&b, u32::MAX), Some(GameOutcome::Stuck));
    }

    #[test]
    fn test_win_tile_ends_game() {
        let b = Board::empty(4, 4).unwrap().with_cell(1, 1, Some(128));
        assert_eq!(game_outcome(&b, 128), Some(GameOutcome::Won));
        assert_eq!(game_outcome(&b, 2048), None);
    }

    #[test]
    fn test_rules_fit() {
        let rules = Rules::default();
        assert!(rules.fits(&Board::empty(4, 4).unwrap()));
        assert!(!rules.fits(&Board::empty(4, 5).unwrap()));
    }
}
