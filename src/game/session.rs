use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use super::board::Board;
use super::direction::Direction;
use super::history::{History, Snapshot};
use super::rules::Rules;
use super::state::{GameState, MoveError, Turn};
use crate::error::BoardError;

/// What a directional input did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReport {
    Moved { gained: u64 },
    Unchanged,
}

/// A running game: the current state, its undo history and the RNG used to
/// spawn tiles. Inputs are applied one at a time through `&mut self`.
pub struct Session<R: Rng = StdRng> {
    state: GameState,
    history: History,
    rules: Rules,
    blank: Board,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Start a fresh game.
    pub fn new(rules: Rules, history_limit: usize, mut rng: R) -> Result<Self, BoardError> {
        let blank = Board::empty(rules.rows, rules.cols)?;
        let state = GameState::start(&blank, &rules, &mut rng);
        Ok(Session {
            state,
            history: History::new(history_limit),
            rules,
            blank,
            rng,
        })
    }

    /// Continue a saved game. The history starts empty.
    pub fn resume(snapshot: Snapshot, rules: Rules, history_limit: usize, rng: R) -> Self {
        let blank = Board::from_validated(vec![
            vec![None; snapshot.board.col_count()];
            snapshot.board.row_count()
        ]);
        Session {
            state: GameState::from_snapshot(snapshot, &rules),
            history: History::new(history_limit),
            rules,
            blank,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Number of moves that can currently be undone.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Apply one directional input. The previous snapshot is pushed onto the
    /// history only when the board actually changes.
    pub fn apply(&mut self, direction: Direction) -> Result<MoveReport, MoveError> {
        match self.state.apply_move(direction, &self.rules, &mut self.rng)? {
            Turn::Unchanged => {
                debug!("{} did not move any tile", direction.name());
                Ok(MoveReport::Unchanged)
            }
            Turn::Moved { state, gained } => {
                self.history.push(self.state.snapshot());
                self.state = state;
                if let Some(outcome) = self.state.outcome() {
                    info!("game over ({outcome:?}) with score {}", self.state.score());
                }
                Ok(MoveReport::Moved { gained })
            }
        }
    }

    /// Restore the most recent snapshot. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                debug!("undo to score {}", snapshot.score);
                self.state = GameState::from_snapshot(snapshot, &self.rules);
                true
            }
            None => false,
        }
    }

    /// Throw away the current game and its history and start over.
    pub fn reset(&mut self) {
        self.state = GameState::start(&self.blank, &self.rules, &mut self.rng);
        self.history.clear();
        info!(
            "new {}x{} game",
            self.blank.row_count(),
            self.blank.col_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Cell;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    fn snapshot(rows: Vec<Vec<Cell>>, score: u64) -> Snapshot {
        Snapshot {
            board: Board::new(rows).unwrap(),
            score,
        }
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(Rules::default(), 8, seeded()).unwrap();
        assert_eq!(session.state().board().tiles().count(), 2);
        assert_eq!(session.undo_depth(), 0);
    }

    #[test]
    fn test_new_session_rejects_zero_columns() {
        let rules = Rules {
            cols: 0,
            ..Rules::default()
        };
        assert!(Session::new(rules, 8, seeded()).is_err());
    }

    #[test]
    fn test_moved_input_pushes_history() {
        let snap = snapshot(vec![vec![None, Some(2)], vec![None, None]], 0);
        let rules = Rules {
            rows: 2,
            cols: 2,
            ..Rules::default()
        };
        let mut session = Session::resume(snap.clone(), rules, 0, seeded());

        let report = session.apply(Direction::Left).unwrap();
        assert_eq!(report, MoveReport::Moved { gained: 2 });
        assert_eq!(session.undo_depth(), 1);
        assert_eq!(session.state().score(), 2);

        assert!(session.undo());
        assert_eq!(session.snapshot(), snap);
        assert!(!session.undo());
    }

    #[test]
    fn test_unmoved_input_keeps_history() {
        let snap = snapshot(vec![vec![Some(2), None], vec![Some(4), None]], 6);
        let mut session = Session::resume(snap.clone(), Rules::default(), 0, seeded());

        assert_eq!(session.apply(Direction::Left), Ok(MoveReport::Unchanged));
        assert_eq!(session.undo_depth(), 0);
        assert_eq!(session.snapshot(), snap);
    }

    #[test]
    fn test_game_over_blocks_input_and_undo_clears_it() {
        let snap = snapshot(vec![vec![Some(64), Some(64), None]], 0);
        let mut session = Session::resume(snap.clone(), Rules::default(), 0, seeded());

        session.apply(Direction::Left).unwrap();
        assert!(session.state().is_terminal());
        assert_eq!(session.apply(Direction::Right), Err(MoveError::GameOver));

        assert!(session.undo());
        assert!(!session.state().is_terminal());
        assert_eq!(session.snapshot(), snap);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut session = Session::new(Rules::default(), 0, seeded()).unwrap();
        let legal = session.state().legal_directions();
        session.apply(legal[0]).unwrap();
        assert_eq!(session.undo_depth(), 1);

        session.reset();
        assert_eq!(session.undo_depth(), 0);
        assert_eq!(session.state().score(), 0);
        assert_eq!(session.state().board().tiles().count(), 2);
    }

    #[test]
    fn test_resume_keeps_saved_dimensions_on_reset() {
        let snap = snapshot(vec![vec![Some(2), None, None]], 0);
        let mut session = Session::resume(snap, Rules::default(), 0, seeded());
        session.reset();
        assert_eq!(session.state().board().row_count(), 1);
        assert_eq!(session.state().board().col_count(), 3);
    }

    #[test]
    fn test_history_limit_bounds_undo() {
        let mut session = Session::new(Rules::default(), 2, seeded()).unwrap();
        let mut moves = 0;
        while moves < 5 && !session.state().is_terminal() {
            let direction = session.state().legal_directions()[0];
            session.apply(direction).unwrap();
            moves += 1;
        }
        assert_eq!(session.undo_depth(), 2);
    }
}
