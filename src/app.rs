//! Wires a session to its store and ledger. Every session transition is
//! followed by explicit side effects: a ledger record attempt when the game
//! just ended, then a snapshot write.

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::game::{CoinFlip, GameSession, MoveRejected, Snapshot};
use crate::ledger::{ScoreEntry, ScoreLedger};
use crate::players::PlayersDetails;
use crate::store::{PersistenceAdapter, TypedStore, BOARD_KEY, PLAYERS_KEY, SCOREBOARD_KEY};
use crate::timer::Timer;

pub struct App<S: PersistenceAdapter, T: Timer> {
    store: S,
    session: GameSession<T>,
    ledger: ScoreLedger,
    players: Option<PlayersDetails>,
}

impl<S: PersistenceAdapter, T: Timer> App<S, T> {
    /// Load whatever `store` holds and resume from it.
    ///
    /// A missing or malformed snapshot starts a fresh game whose id follows
    /// the last recorded result.
    pub fn open(config: GameConfig, store: S, timer: T, coin: &mut dyn CoinFlip) -> Self {
        let players: Option<PlayersDetails> = store.load(PLAYERS_KEY);
        let ledger = ScoreLedger::load(&store);
        let next_id = ledger.last_game_id().map_or(1, |id| id + 1);
        let mut session = GameSession::new(config, next_id, coin, timer);

        match store.load::<Snapshot>(BOARD_KEY) {
            Some(snapshot) => match session.restore(&snapshot) {
                Ok(()) => info!(game_id = snapshot.game_id, "resumed saved game"),
                Err(e) => warn!(error = %e, "saved game is unusable, starting fresh"),
            },
            None => debug!("no saved game"),
        }

        let mut app = App {
            store,
            session,
            ledger,
            players,
        };
        // A finished game may have been persisted without its result.
        if app.session.is_terminal() {
            app.record_result();
        }
        app
    }

    pub fn session(&self) -> &GameSession<T> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<T> {
        &mut self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn players(&self) -> Option<&PlayersDetails> {
        self.players.as_ref()
    }

    pub fn register_players(&mut self, details: PlayersDetails) {
        if let Err(e) = self.store.save(PLAYERS_KEY, &details) {
            warn!(error = %e, "failed to persist player details");
        }
        self.players = Some(details);
    }

    /// Play `column` for whoever's turn it is.
    pub fn drop_piece(&mut self, column: usize) -> Result<Snapshot, MoveRejected> {
        let snapshot = self.session.apply_move(column).inspect_err(|e| {
            debug!(column, reason = %e, "move rejected");
        })?;
        if snapshot.is_terminal() {
            self.record_result();
        }
        self.persist(&snapshot);
        Ok(snapshot)
    }

    pub fn new_game(&mut self) -> Snapshot {
        let snapshot = self.session.reset();
        self.persist(&snapshot);
        snapshot
    }

    /// Write the current snapshot, e.g. to save elapsed time before exit.
    pub fn checkpoint(&mut self) -> Snapshot {
        let snapshot = self.session.snapshot();
        self.persist(&snapshot);
        snapshot
    }

    pub fn scores(&self) -> std::slice::Iter<'_, ScoreEntry> {
        self.ledger.list()
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// The clock stands still while the scoreboard covers the board.
    pub fn open_scoreboard(&mut self) {
        self.session.timer_mut().pause();
        debug!(elapsed = self.session.elapsed_seconds(), "scoreboard opened");
    }

    /// Back to the board. A finished game keeps its clock stopped.
    pub fn close_scoreboard(&mut self) {
        if !self.session.is_terminal() {
            self.session.timer_mut().start();
        }
    }

    /// Forget players, results and the saved game, then start game 1.
    pub fn clear(&mut self, coin: &mut dyn CoinFlip) -> Snapshot {
        for key in [PLAYERS_KEY, BOARD_KEY, SCOREBOARD_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "failed to remove stored data");
            }
        }
        self.players = None;
        self.ledger = ScoreLedger::new();
        info!("cleared stored data");
        self.session.start_new(1, coin.flip())
    }

    /// Append the finished game to the ledger and persist it. The ledger drops
    /// the entry if this game is already its last result.
    fn record_result(&mut self) {
        let players = self.players.clone().unwrap_or_default();
        let entry = ScoreEntry::new(
            self.session.game_id(),
            &players,
            self.session.move_count(),
            self.session.status().winner(),
            self.session.elapsed_seconds(),
        );
        if self.ledger.record(entry) {
            if let Err(e) = self.ledger.save(&mut self.store) {
                warn!(error = %e, "failed to persist scoreboard");
            }
        }
    }

    fn persist(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.store.save(BOARD_KEY, snapshot) {
            warn!(error = %e, "failed to persist game snapshot");
        }
    }
}
