use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::board_widget::player_color;
use crate::ledger::{ScoreEntry, ScoreLedger};

const HEADERS: [&str; 5] = [
    "Player 1",
    "Player 2",
    "Winner",
    "Number of Moves",
    "Total Game Time",
];

pub fn render(frame: &mut Frame, ledger: &ScoreLedger) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(format!("Scoreboard  |  {} finished games", ledger.len()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(title, chunks[0]);

    if ledger.is_empty() {
        let empty = Paragraph::new("No finished games yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Results"));
        frame.render_widget(empty, chunks[1]);
    } else {
        let header = Row::new(HEADERS.map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().fg(Color::Yellow));

        let widths = [
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ];

        let table = Table::new(ledger.list().map(entry_row), widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Results"));
        frame.render_widget(table, chunks[1]);
    }

    let help = Paragraph::new("S / Esc: Back to the board (clock paused)  |  Q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}

fn entry_row(entry: &ScoreEntry) -> Row<'_> {
    let winner_color = entry.winner.map_or(Color::DarkGray, player_color);
    Row::new(vec![
        Cell::from(entry.player_one_name.as_str()),
        Cell::from(entry.player_two_name.as_str()),
        Cell::from(entry.winner_name()).style(Style::default().fg(winner_color)),
        Cell::from(entry.move_count.to_string()),
        Cell::from(entry.duration()),
    ])
}
