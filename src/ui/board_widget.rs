use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::game::{Board, Cell, Player};

pub fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

fn cell_span(cell: Cell) -> Span<'static> {
    let (symbol, color) = match cell {
        Cell::Empty => (" . ", Color::DarkGray),
        Cell::One => (" \u{25cf} ", player_color(Player::One)),
        Cell::Two => (" \u{25cf} ", player_color(Player::Two)),
    };
    Span::styled(symbol, Style::default().fg(color))
}

/// Render the framed board with column numbers above and a marker under
/// `selected_column`.
pub fn render_board(frame: &mut Frame, board: &Board, selected_column: usize, area: Rect) {
    let cols = board.cols();
    let mut lines = Vec::with_capacity(board.rows() + 4);

    // 3 chars of padding to line up with "  ║"
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..cols {
        let label = format!("{:^3}", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "\u{2550}".repeat(cols * 3 + 1);
    lines.push(Line::from(format!("  \u{2554}{rule}\u{2557}")));
    for row in board.iter_rows() {
        let mut spans = vec![Span::raw("  \u{2551}")];
        spans.extend(row.iter().map(|&cell| cell_span(cell)));
        spans.push(Span::raw(" \u{2551}"));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(format!("  \u{255a}{rule}\u{255d}")));

    let mut indicator = vec![Span::raw("   ")];
    for col in 0..cols {
        if col == selected_column {
            indicator.push(Span::styled(" \u{25b2} ", Style::default().fg(Color::Cyan)));
        } else {
            indicator.push(Span::raw("   "));
        }
    }
    indicator.push(Span::raw("  "));
    lines.push(Line::from(indicator));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
