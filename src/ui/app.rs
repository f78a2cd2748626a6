use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::info;

use crate::app::App;
use crate::game::{CoinFlip, GameStatus, MoveRejected, Player};
use crate::store::PersistenceAdapter;
use crate::timer::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    Scoreboard,
}

/// Keyboard-driven front end over an [`App`].
pub struct TerminalApp<S: PersistenceAdapter, T: Timer, C: CoinFlip> {
    app: App<S, T>,
    coin: C,
    view: View,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl<S: PersistenceAdapter, T: Timer, C: CoinFlip> TerminalApp<S, T, C> {
    pub fn new(app: App<S, T>, coin: C) -> Self {
        let selected_column = app.session().board().cols() / 2;
        TerminalApp {
            app,
            coin,
            view: View::Board,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    pub fn app(&self) -> &App<S, T> {
        &self.app
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
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

    fn handle_events(&mut self) -> io::Result<()> {
        // Redraw at least every 100ms so the clock keeps moving.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.view {
            View::Board => self.handle_board_key(key),
            View::Scoreboard => self.handle_scoreboard_key(key),
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        self.message = None;
        let last_column = self.app.session().board().cols().saturating_sub(1);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                self.selected_column = (self.selected_column + 1).min(last_column);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.drop_piece(),
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column <= last_column {
                    self.selected_column = column;
                }
                self.drop_piece_at(column);
            }
            KeyCode::Char('n') | KeyCode::Char('r') => {
                self.app.new_game();
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char('s') => {
                self.app.open_scoreboard();
                self.view = View::Scoreboard;
            }
            KeyCode::Char('c') => {
                self.app.clear(&mut self.coin);
                self.message = Some("All stored data cleared.".to_string());
            }
            _ => {}
        }
    }

    fn handle_scoreboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') | KeyCode::Esc | KeyCode::Char('b') => {
                self.app.close_scoreboard();
                self.view = View::Board;
            }
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    fn quit(&mut self) {
        let snapshot = self.app.checkpoint();
        info!(game_id = snapshot.game_id, "saved game on exit");
        self.should_quit = true;
    }

    fn drop_piece(&mut self) {
        self.drop_piece_at(self.selected_column);
    }

    fn drop_piece_at(&mut self, column: usize) {
        self.message = match self.app.drop_piece(column) {
            Ok(_) => match self.app.session().status() {
                GameStatus::Won(player) => Some(format!("{} wins!", self.name_of(player))),
                GameStatus::Tied => Some("It's a tie!".to_string()),
                GameStatus::InProgress => None,
            },
            Err(MoveRejected::ColumnFull(_)) => Some("Column is full!".to_string()),
            Err(MoveRejected::InvalidColumn { .. }) => Some("Invalid column!".to_string()),
            Err(MoveRejected::GameOver) => {
                Some("Game over! Press 'n' to start a new game.".to_string())
            }
        };
    }

    fn name_of(&self, player: Player) -> String {
        self.app
            .players()
            .map(|p| p.name_of(player).to_string())
            .unwrap_or_else(|| player.name().to_string())
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        match self.view {
            View::Board => {
                let players = self.app.players().cloned().unwrap_or_default();
                super::game_view::render(
                    frame,
                    self.app.session(),
                    &players,
                    self.selected_column,
                    &self.message,
                );
            }
            View::Scoreboard => super::scoreboard_view::render(frame, self.app.ledger()),
        }
    }
}
