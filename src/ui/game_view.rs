use crate::game::{GameOutcome, GameState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    undo_depth: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, undo_depth, chunks[0]);
    render_board(frame, game_state, chunks[1]);
    render_message(frame, game_state, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, game_state: &GameState, undo_depth: usize, area: Rect) {
    let best = game_state.board().max_tile().unwrap_or(0);
    let line = Line::from(vec![
        Span::styled(
            format!("Score: {}", game_state.score()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  |  Best tile: {best}  |  Undo: {undo_depth}")),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("2048"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    board_widget::render_board(frame, game_state.board(), inner);
}

fn render_message(
    frame: &mut Frame,
    game_state: &GameState,
    message: &Option<String>,
    area: Rect,
) {
    // The game-over banner wins over transient messages
    let (text, color) = match game_state.outcome() {
        Some(GameOutcome::Won) => ("You win! Game over.".to_string(), Color::Green),
        Some(GameOutcome::Stuck) => ("No moves left. Game over.".to_string(), Color::Red),
        None => (message.clone().unwrap_or_default(), Color::Yellow),
    };

    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←↑↓→ / WASD / HJKL: Slide  |  U: Undo  |  R: New game  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Rules};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(state: &GameState, message: Option<String>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| render(f, state, 3, &message))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_score() {
        let board = Board::new(vec![vec![Some(2), Some(8)], vec![None, None]]).unwrap();
        let state = GameState::new(board, 44, &Rules::default());
        let text = screen_text(&state, Some("hello".into()));
        assert!(text.contains("Score: 44"));
        assert!(text.contains("Best tile: 8"));
        assert!(text.contains("Undo: 3"));
        assert!(text.contains("hello"));
    }

    #[test]
    fn test_game_over_banner() {
        let board = Board::new(vec![vec![Some(2), Some(4)], vec![Some(4), Some(2)]]).unwrap();
        let state = GameState::new(board, 0, &Rules::default());
        let text = screen_text(&state, Some("hidden".into()));
        assert!(text.contains("No moves left"));
        assert!(!text.contains("hidden"));
    }
}
