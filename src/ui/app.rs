use crate::game::{Direction, GameOutcome, MoveError, MoveReport, Session};
use crate::store::SaveStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    session: Session,
    store: Option<SaveStore>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// `store` is written after every change when present.
    pub fn new(session: Session, store: Option<SaveStore>) -> Self {
        App {
            session,
            store,
            should_quit: false,
            message: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => self.slide(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
                self.slide(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => {
                self.slide(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
                self.slide(Direction::Right)
            }
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('r') => {
                self.session.reset();
                self.message = Some("New game started!".to_string());
                self.persist();
            }
            _ => {}
        }
    }

    fn slide(&mut self, direction: Direction) {
        match self.session.apply(direction) {
            Ok(MoveReport::Moved { gained }) => {
                if gained > 0 {
                    self.message = Some(format!("+{gained}"));
                }
                if let Some(outcome) = self.session.state().outcome() {
                    self.message = Some(match outcome {
                        GameOutcome::Won => format!(
                            "You reached {}! Press 'u' to undo or 'r' to restart.",
                            self.session.rules().win_tile
                        ),
                        GameOutcome::Stuck => {
                            "No moves left! Press 'u' to undo or 'r' to restart.".to_string()
                        }
                    });
                }
                self.persist();
            }
            Ok(MoveReport::Unchanged) => {}
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'u' to undo or 'r' to restart.".to_string());
            }
        }
    }

    fn undo(&mut self) {
        if self.session.undo() {
            self.message = Some("Undone.".to_string());
            self.persist();
        } else {
            self.message = Some("Nothing to undo.".to_string());
        }
    }

    /// Save the current board and score, if a store is attached.
    fn persist(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(&self.session.snapshot()) {
            warn!("failed to save game to {}: {e}", store.path().display());
            self.message = Some(format!("Save failed: {e}"));
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            self.session.state(),
            self.session.undo_depth(),
            &self.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Rules, Snapshot};
    use crossterm::event::KeyModifiers;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(rows: Vec<Vec<Option<u32>>>, store: Option<SaveStore>) -> App {
        let snapshot = Snapshot {
            board: Board::new(rows).unwrap(),
            score: 0,
        };
        let session = Session::resume(snapshot, Rules::default(), 0, StdRng::seed_from_u64(5));
        App::new(session, store)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(vec![vec![Some(2), None]], None);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = app_with(vec![vec![Some(2), None]], None);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_arrow_moves_and_undo_restores() {
        let mut app = app_with(vec![vec![Some(2), Some(2), None, None]], None);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.session().state().board().get(0, 0), Some(4));
        assert_eq!(app.session().state().score(), 2);
        assert_eq!(app.message(), Some("+2"));

        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.session().state().board().get(0, 0), Some(2));
        assert_eq!(app.session().state().score(), 0);

        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.message(), Some("Nothing to undo."));
    }

    #[test]
    fn test_vim_and_wasd_keys() {
        let mut app = app_with(vec![vec![None, Some(2)], vec![None, None]], None);
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.session().state().board().get(0, 0), Some(2));

        let mut app = app_with(vec![vec![None, Some(2)], vec![None, None]], None);
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.session().state().board().get(1, 1), Some(2));
    }

    #[test]
    fn test_win_message() {
        let mut app = app_with(vec![vec![Some(64), Some(64), None]], None);
        app.handle_key(key(KeyCode::Left));
        assert!(app.session().state().is_terminal());
        assert!(app.message().unwrap().starts_with("You reached 128!"));

        app.handle_key(key(KeyCode::Right));
        assert!(app.message().unwrap().starts_with("Game over!"));
    }

    #[test]
    fn test_moves_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let mut app = app_with(
            vec![vec![Some(2), Some(2), None, None]],
            Some(SaveStore::new(&path)),
        );

        app.handle_key(key(KeyCode::Left));
        let saved = SaveStore::new(&path).load().unwrap().unwrap();
        assert_eq!(saved, app.session().snapshot());
        assert_eq!(saved.score, 2);
    }

    #[test]
    fn test_unchanged_move_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let mut app = app_with(vec![vec![Some(2), None]], Some(SaveStore::new(&path)));

        app.handle_key(key(KeyCode::Left));
        assert!(!path.exists());
    }

    #[test]
    fn test_reset() {
        let mut app = app_with(vec![vec![Some(8), Some(8), None, None]], None);
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.session().state().score(), 0);
        assert_eq!(app.session().undo_depth(), 0);
        assert_eq!(app.message(), Some("New game started!"));
    }
}
