use crate::game::{Board, Cell};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of one rendered tile, in terminal columns.
pub const TILE_WIDTH: usize = 7;

/// Colour scheme for a cell, brighter and warmer as tiles grow.
pub fn tile_style(cell: Cell) -> Style {
    let (fg, bg) = match cell {
        None => (Color::DarkGray, Color::Reset),
        Some(2) => (Color::Black, Color::Rgb(238, 228, 218)),
        Some(4) => (Color::Black, Color::Rgb(237, 224, 200)),
        Some(8) => (Color::White, Color::Rgb(242, 177, 121)),
        Some(16) => (Color::White, Color::Rgb(245, 149, 99)),
        Some(32) => (Color::White, Color::Rgb(246, 124, 95)),
        Some(64) => (Color::White, Color::Rgb(246, 94, 59)),
        Some(128) => (Color::White, Color::Rgb(237, 207, 114)),
        Some(256) => (Color::White, Color::Rgb(237, 204, 97)),
        Some(512) => (Color::White, Color::Rgb(237, 200, 80)),
        Some(1024) => (Color::White, Color::Rgb(237, 197, 63)),
        Some(_) => (Color::White, Color::Rgb(237, 194, 46)),
    };
    let style = Style::default().fg(fg).bg(bg);
    if cell.is_some() {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Text shown inside a tile, centred to [`TILE_WIDTH`].
pub fn tile_label(cell: Cell) -> String {
    match cell {
        Some(v) => format!("{:^width$}", v, width = TILE_WIDTH),
        None => format!("{:^width$}", "·", width = TILE_WIDTH),
    }
}

/// Render the board as a grid of coloured tiles, three lines per row.
pub fn render_board(frame: &mut Frame, board: &Board, area: Rect) {
    let mut lines = Vec::new();

    for row in board.rows() {
        let padding: Vec<Span> = row
            .iter()
            .flat_map(|&cell| {
                [
                    Span::styled(" ".repeat(TILE_WIDTH), tile_style(cell)),
                    Span::raw(" "),
                ]
            })
            .collect();
        let labels: Vec<Span> = row
            .iter()
            .flat_map(|&cell| [Span::styled(tile_label(cell), tile_style(cell)), Span::raw(" ")])
            .collect();

        lines.push(Line::from(padding.clone()));
        lines.push(Line::from(labels));
        lines.push(Line::from(padding));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
