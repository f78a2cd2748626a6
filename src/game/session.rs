use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::Board;
use super::coin::CoinFlip;
use super::engine;
use super::player::{turn_index, winner_flag, Player};
use crate::config::GameConfig;
use crate::error::SnapshotError;
use crate::timer::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    fn tag(self) -> StatusTag {
        match self {
            GameStatus::InProgress => StatusTag::InProgress,
            GameStatus::Won(_) => StatusTag::Won,
            GameStatus::Tied => StatusTag::Tied,
        }
    }
}

/// Persisted form of the status; the winner travels in its own field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTag {
    InProgress,
    Won,
    Tied,
}

impl StatusTag {
    fn name(self) -> &'static str {
        match self {
            StatusTag::InProgress => "InProgress",
            StatusTag::Won => "Won",
            StatusTag::Tied => "Tied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejected {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {column} is off the board (columns: {columns})")]
    InvalidColumn { column: usize, columns: usize },

    #[error("the game is already over")]
    GameOver,
}

/// Everything needed to resume a session after a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub game_id: u64,
    pub board: Board,
    #[serde(with = "turn_index")]
    pub turn: Player,
    pub move_count: usize,
    pub status: StatusTag,
    #[serde(default, with = "winner_flag")]
    pub winner: Option<Player>,
    pub elapsed_seconds: u64,
}

impl Snapshot {
    /// Check the snapshot against `config` and decode its status.
    pub fn validate(&self, config: &GameConfig) -> Result<GameStatus, SnapshotError> {
        if self.game_id == 0 {
            return Err(SnapshotError::InvalidGameId);
        }
        if self.board.rows() != config.rows || self.board.cols() != config.columns {
            return Err(SnapshotError::DimensionMismatch {
                rows: self.board.rows(),
                cols: self.board.cols(),
                expected_rows: config.rows,
                expected_cols: config.columns,
            });
        }
        if let Some((row, col)) = self.board.floating_cell() {
            return Err(SnapshotError::FloatingToken { row, col });
        }
        let filled = self.board.filled_count();
        if self.move_count != filled {
            return Err(SnapshotError::MoveCountMismatch {
                move_count: self.move_count,
                filled,
            });
        }

        let status = match (self.status, self.winner) {
            // Once won, `turn` stays on the winner.
            (StatusTag::Won, Some(player)) if player == self.turn => GameStatus::Won(player),
            (StatusTag::InProgress, None) => GameStatus::InProgress,
            (StatusTag::Tied, None) => GameStatus::Tied,
            (status, winner) => {
                return Err(SnapshotError::WinnerMismatch {
                    status: status.name(),
                    winner: winner.map(Player::winner_flag),
                    turn: self.turn.turn_index(),
                })
            }
        };
        if status == GameStatus::InProgress && self.board.is_full() {
            return Err(SnapshotError::FullBoardInProgress);
        }
        Ok(status)
    }

    pub fn is_terminal(&self) -> bool {
        self.status != StatusTag::InProgress
    }
}

/// One game's lifecycle: turn order, move count and end state, with the
/// timer paused and resumed on transitions.
///
/// `turn` is the player to move while the game is in progress and the last
/// mover once it has ended.
pub struct GameSession<T: Timer> {
    config: GameConfig,
    game_id: u64,
    board: Board,
    turn: Player,
    move_count: usize,
    status: GameStatus,
    timer: T,
}

impl<T: Timer> GameSession<T> {
    /// Start a fresh game with the opener picked by `coin`.
    pub fn new(config: GameConfig, game_id: u64, coin: &mut dyn CoinFlip, timer: T) -> Self {
        let starter = coin.flip();
        let mut session = GameSession {
            board: Board::new(config.rows, config.columns),
            config,
            game_id,
            turn: starter,
            move_count: 0,
            status: GameStatus::InProgress,
            timer,
        };
        session.start_new(game_id, starter);
        session
    }

    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    /// The player who opened this game, recovered from the move parity.
    pub fn starting_player(&self) -> Player {
        // In progress, `turn` makes move `move_count + 1`; once over, it made
        // move `move_count`. Odd-numbered moves belong to the opener.
        let next_move = if self.is_terminal() {
            self.move_count
        } else {
            self.move_count + 1
        };
        if next_move % 2 == 1 {
            self.turn
        } else {
            self.turn.other()
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            game_id: self.game_id,
            board: self.board.clone(),
            turn: self.turn,
            move_count: self.move_count,
            status: self.status.tag(),
            winner: self.status.winner(),
            elapsed_seconds: self.timer.elapsed_seconds(),
        }
    }

    /// Drop the current player's token into `column`.
    ///
    /// Rejected moves leave the session untouched.
    pub fn apply_move(&mut self, column: usize) -> Result<Snapshot, MoveRejected> {
        if self.is_terminal() {
            return Err(MoveRejected::GameOver);
        }
        if column >= self.board.cols() {
            return Err(MoveRejected::InvalidColumn {
                column,
                columns: self.board.cols(),
            });
        }

        let outcome =
            engine::apply_move(&self.board, column, self.turn, self.config.winning_count);
        if !outcome.placed {
            return Err(MoveRejected::ColumnFull(column));
        }

        self.board = outcome.board;
        self.move_count += 1;

        if outcome.win {
            self.status = GameStatus::Won(self.turn);
            self.timer.pause();
            info!(
                game_id = self.game_id,
                winner = self.turn.name(),
                moves = self.move_count,
                "game won"
            );
        } else if outcome.tie {
            self.status = GameStatus::Tied;
            self.timer.pause();
            info!(game_id = self.game_id, moves = self.move_count, "game tied");
        } else {
            self.turn = self.turn.other();
        }

        Ok(self.snapshot())
    }

    /// Begin the next game with the opposite opener.
    pub fn reset(&mut self) -> Snapshot {
        let starter = self.starting_player().other();
        self.start_new(self.game_id + 1, starter)
    }

    /// Replace the current game with an empty one under `game_id`, opened
    /// by `starter`.
    pub fn start_new(&mut self, game_id: u64, starter: Player) -> Snapshot {
        self.game_id = game_id;
        self.board = Board::new(self.config.rows, self.config.columns);
        self.turn = starter;
        self.move_count = 0;
        self.status = GameStatus::InProgress;
        self.timer.reset();
        self.timer.start();
        info!(game_id, starter = starter.name(), "new game");
        self.snapshot()
    }

    /// Load a persisted snapshot verbatim.
    ///
    /// On error the session is left exactly as it was.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let status = snapshot.validate(&self.config)?;

        self.game_id = snapshot.game_id;
        self.board = snapshot.board.clone();
        self.turn = snapshot.turn;
        self.move_count = snapshot.move_count;
        self.status = status;
        self.timer.set_elapsed(snapshot.elapsed_seconds);
        if status.is_terminal() {
            self.timer.pause();
        } else {
            self.timer.start();
        }
        debug!(game_id = self.game_id, moves = self.move_count, "session restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, FixedCoin};
    use crate::timer::ManualTimer;

    fn session(starter: Player) -> GameSession<ManualTimer> {
        GameSession::new(
            GameConfig::default(),
            1,
            &mut FixedCoin(starter),
            ManualTimer::new(),
        )
    }

    #[test]
    fn test_initial_state() {
        let s = session(Player::Two);
        assert_eq!(s.game_id(), 1);
        assert_eq!(s.turn(), Player::Two);
        assert_eq!(s.move_count(), 0);
        assert_eq!(s.status(), GameStatus::InProgress);
        assert_eq!(s.starting_player(), Player::Two);
        assert!(s.timer().is_running());
    }

    #[test]
    fn test_apply_move_flips_turn() {
        let mut s = session(Player::One);
        let snap = s.apply_move(3).unwrap();

        assert_eq!(snap.turn, Player::Two);
        assert_eq!(snap.move_count, 1);
        assert_eq!(s.board().get(5, 3), Cell::One);
        assert_eq!(s.starting_player(), Player::One);
    }

    #[test]
    fn test_move_count_tracks_filled_cells() {
        let mut s = session(Player::One);
        for col in [0, 1, 1, 5, 6, 6, 6] {
            s.apply_move(col).unwrap();
            assert_eq!(s.move_count(), s.board().filled_count());
        }
    }

    #[test]
    fn test_full_column_rejected_without_mutation() {
        let mut s = session(Player::One);
        for _ in 0..6 {
            s.apply_move(0).unwrap();
        }
        let before = s.snapshot();

        for _ in 0..3 {
            assert_eq!(s.apply_move(0), Err(MoveRejected::ColumnFull(0)));
        }
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_invalid_column_rejected() {
        let mut s = session(Player::One);
        assert_eq!(
            s.apply_move(7),
            Err(MoveRejected::InvalidColumn {
                column: 7,
                columns: 7
            })
        );
        assert_eq!(s.move_count(), 0);
    }

    #[test]
    fn test_win_pauses_timer_and_keeps_mover() {
        let mut s = session(Player::One);
        s.timer_mut().tick();
        // Player one stacks column 2, player two answers in column 4.
        for col in [2, 4, 2, 4, 2, 4] {
            s.apply_move(col).unwrap();
        }
        let snap = s.apply_move(2).unwrap();

        assert_eq!(snap.status, StatusTag::Won);
        assert_eq!(snap.winner, Some(Player::One));
        assert_eq!(snap.move_count, 7);
        assert_eq!(snap.turn, Player::One);
        assert_eq!(snap.elapsed_seconds, 1);
        assert!(!s.timer().is_running());
        assert_eq!(s.apply_move(0), Err(MoveRejected::GameOver));
        assert_eq!(s.starting_player(), Player::One);
    }

    #[test]
    fn test_tie_on_full_board() {
        let config = GameConfig {
            rows: 2,
            columns: 2,
            winning_count: 3,
        };
        let mut s = GameSession::new(config, 1, &mut FixedCoin(Player::One), ManualTimer::new());
        for col in [0, 0, 1] {
            s.apply_move(col).unwrap();
            assert_eq!(s.status(), GameStatus::InProgress);
        }
        let snap = s.apply_move(1).unwrap();
        assert_eq!(snap.status, StatusTag::Tied);
        assert_eq!(snap.winner, None);
        assert!(!s.timer().is_running());
    }

    #[test]
    fn test_reset_flips_starting_player() {
        let mut s = session(Player::One);
        for col in [2, 4, 2, 4, 2, 4, 2] {
            s.apply_move(col).unwrap();
        }
        s.timer_mut().tick();

        let snap = s.reset();
        assert_eq!(snap.game_id, 2);
        assert_eq!(snap.turn, Player::Two);
        assert_eq!(snap.move_count, 0);
        assert_eq!(snap.status, StatusTag::InProgress);
        assert_eq!(snap.board.filled_count(), 0);
        assert_eq!(snap.elapsed_seconds, 0);
        assert!(s.timer().is_running());

        // Mid-game reset still flips relative to the opener, not the mover.
        s.apply_move(0).unwrap();
        let snap = s.reset();
        assert_eq!(snap.game_id, 3);
        assert_eq!(snap.turn, Player::One);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut s = session(Player::Two);
        s.apply_move(0).unwrap();
        let json = serde_json::to_value(s.snapshot()).unwrap();

        assert_eq!(json["gameId"], 1);
        assert_eq!(json["turn"], 0);
        assert_eq!(json["moveCount"], 1);
        assert_eq!(json["status"], "InProgress");
        assert!(json["winner"].is_null());
        assert_eq!(json["elapsedSeconds"], 0);
        assert_eq!(json["board"][5][0], -1);
    }

    #[test]
    fn test_restore_won_snapshot_pauses_and_rejects() {
        let mut finished = session(Player::One);
        for col in [2, 4, 2, 4, 2, 4, 2] {
            finished.apply_move(col).unwrap();
        }
        let mut snap = finished.snapshot();
        snap.elapsed_seconds = 42;

        let mut s = session(Player::Two);
        s.restore(&snap).unwrap();

        assert_eq!(s.status(), GameStatus::Won(Player::One));
        assert_eq!(s.elapsed_seconds(), 42);
        assert!(!s.timer().is_running());
        assert_eq!(s.apply_move(0), Err(MoveRejected::GameOver));
        assert_eq!(s.snapshot(), snap);
    }

    #[test]
    fn test_restore_in_progress_resumes_timer() {
        let mut source = session(Player::One);
        source.apply_move(3).unwrap();
        source.apply_move(3).unwrap();
        let mut snap = source.snapshot();
        snap.game_id = 9;
        snap.elapsed_seconds = 65;

        let mut s = session(Player::Two);
        s.timer_mut().pause();
        s.restore(&snap).unwrap();

        assert_eq!(s.game_id(), 9);
        assert_eq!(s.turn(), Player::One);
        assert_eq!(s.move_count(), 2);
        assert!(s.timer().is_running());
        s.timer_mut().tick();
        assert_eq!(s.elapsed_seconds(), 66);

        s.apply_move(3).unwrap();
        assert_eq!(s.board().get(3, 3), Cell::One);
    }

    #[test]
    fn test_restore_rejects_malformed_snapshot() {
        let mut s = session(Player::One);
        s.apply_move(1).unwrap();
        let before = s.snapshot();

        let mut bad_count = before.clone();
        bad_count.move_count = 3;
        assert!(matches!(
            s.restore(&bad_count),
            Err(SnapshotError::MoveCountMismatch { .. })
        ));

        let mut bad_winner = before.clone();
        bad_winner.status = StatusTag::Won;
        assert!(matches!(
            s.restore(&bad_winner),
            Err(SnapshotError::WinnerMismatch { .. })
        ));

        let mut bad_dims = before.clone();
        bad_dims.board = Board::new(5, 7);
        bad_dims.move_count = 0;
        assert!(matches!(
            s.restore(&bad_dims),
            Err(SnapshotError::DimensionMismatch { .. })
        ));

        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_restore_rejects_floating_token() {
        let mut s = session(Player::One);
        let mut snap = s.snapshot();
        let mut grid: Vec<Vec<i8>> = snap.board.clone().into();
        grid[0][3] = 1;
        snap.board = Board::try_from(grid).unwrap();
        snap.move_count = 1;

        assert_eq!(
            s.restore(&snap),
            Err(SnapshotError::FloatingToken { row: 0, col: 3 })
        );
        // The fresh session is untouched and still plays normally.
        s.apply_move(3).unwrap();
        assert_eq!(s.board().get(5, 3), Cell::One);
    }

    #[test]
    fn test_restore_rejects_full_board_in_progress() {
        let mut s = session(Player::One);
        let mut snap = s.snapshot();
        let grid: Vec<Vec<i8>> = (0..6)
            .map(|row| (0..7).map(|col| if (row + col) % 2 == 0 { 1 } else { -1 }).collect())
            .collect();
        snap.board = Board::try_from(grid).unwrap();
        snap.move_count = 42;

        assert_eq!(s.restore(&snap), Err(SnapshotError::FullBoardInProgress));
        assert_eq!(s.move_count(), 0);
    }

    #[test]
    fn test_restore_rejects_won_with_loser_to_move() {
        let mut finished = session(Player::One);
        for col in [2, 4, 2, 4, 2, 4, 2] {
            finished.apply_move(col).unwrap();
        }
        let mut snap = finished.snapshot();
        snap.turn = Player::Two;

        let mut s = session(Player::One);
        assert!(matches!(
            s.restore(&snap),
            Err(SnapshotError::WinnerMismatch { status: "Won", .. })
        ));
        assert_eq!(s.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_snapshot_rejects_bad_turn() {
        let json = r#"{"gameId":1,"board":[[0]],"turn":2,"moveCount":0,
            "status":"InProgress","winner":null,"elapsedSeconds":0}"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }
}
