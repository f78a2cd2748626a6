use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{player_color, render_board};
use crate::game::{GameSession, GameStatus};
use crate::players::PlayersDetails;
use crate::timer::{format_elapsed, Timer};

pub fn render<T: Timer>(
    frame: &mut Frame,
    session: &GameSession<T>,
    players: &PlayersDetails,
    selected_column: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(session.board().rows() as u16 + 4), // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, session, players, chunks[0]);
    render_board(frame, session.board(), selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header<T: Timer>(
    frame: &mut Frame,
    session: &GameSession<T>,
    players: &PlayersDetails,
    area: Rect,
) {
    let (status, color) = match session.status() {
        GameStatus::InProgress => {
            let turn = session.turn();
            (format!("{}'s turn", players.name_of(turn)), player_color(turn))
        }
        GameStatus::Won(player) => (
            format!("{} is the winner!", players.name_of(player)),
            player_color(player),
        ),
        GameStatus::Tied => ("It's a tie!".to_string(), Color::White),
    };
    let text = format!(
        "Game {}  |  {}  |  {}",
        session.game_id(),
        status,
        format_elapsed(session.elapsed_seconds())
    );

    let header = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("\u{2190}/\u{2192}: Move  |  Enter/1-9: Drop  |  N: New game");
    let line2 = Line::from("S: Scoreboard  |  C: Clear saved data  |  Q: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
