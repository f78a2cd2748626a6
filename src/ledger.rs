//! Append-only record of finished games.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::game::{winner_flag, Player};
use crate::players::PlayersDetails;
use crate::store::{PersistenceAdapter, TypedStore, SCOREBOARD_KEY};
use crate::timer::format_elapsed;

/// Result of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub game_id: u64,
    pub player_one_name: String,
    pub player_one_age: u32,
    pub player_two_name: String,
    pub player_two_age: u32,
    pub move_count: usize,
    /// `None` for a tie.
    #[serde(default, with = "winner_flag")]
    pub winner: Option<Player>,
    pub elapsed_seconds: u64,
}

impl ScoreEntry {
    pub fn new(
        game_id: u64,
        players: &PlayersDetails,
        move_count: usize,
        winner: Option<Player>,
        elapsed_seconds: u64,
    ) -> Self {
        ScoreEntry {
            game_id,
            player_one_name: players.player_one_name.clone(),
            player_one_age: players.player_one_age,
            player_two_name: players.player_two_name.clone(),
            player_two_age: players.player_two_age,
            move_count,
            winner,
            elapsed_seconds,
        }
    }

    /// Winner's name, or "Draw".
    pub fn winner_name(&self) -> &str {
        match self.winner {
            Some(Player::One) => &self.player_one_name,
            Some(Player::Two) => &self.player_two_name,
            None => "Draw",
        }
    }

    pub fn duration(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// Ordered, append-only list of results. Consecutive entries never share a
/// game id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    entries: Vec<ScoreEntry>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the ledger from `store`. A missing or corrupt blob yields an empty
    /// ledger; the next save overwrites whatever was there.
    pub fn load<S: TypedStore + ?Sized>(store: &S) -> Self {
        let entries: Vec<ScoreEntry> = store.load(SCOREBOARD_KEY).unwrap_or_else(|| {
            if store.get(SCOREBOARD_KEY).is_some() {
                warn!("scoreboard is corrupt, starting an empty ledger");
            }
            Vec::new()
        });
        ScoreLedger { entries }
    }

    pub fn save<S: TypedStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store.save(SCOREBOARD_KEY, &self.entries)
    }

    /// Append `entry` unless the last entry is for the same game. Returns
    /// whether it was appended.
    ///
    /// Only the last entry is compared.
    pub fn record(&mut self, entry: ScoreEntry) -> bool {
        if self.last_game_id() == Some(entry.game_id) {
            debug!(game_id = entry.game_id, "result already recorded");
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Entries in insertion order.
    pub fn list(&self) -> std::slice::Iter<'_, ScoreEntry> {
        self.entries.iter()
    }

    pub fn last_game_id(&self) -> Option<u64> {
        self.entries.last().map(|e| e.game_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn entry(game_id: u64, winner: Option<Player>) -> ScoreEntry {
        ScoreEntry::new(
            game_id,
            &PlayersDetails::new("Ann", 31, "Bo", 12),
            9,
            winner,
            75,
        )
    }

    #[test]
    fn test_same_game_recorded_once() {
        let mut ledger = ScoreLedger::new();
        assert!(ledger.record(entry(1, Some(Player::One))));
        assert!(!ledger.record(entry(1, Some(Player::One))));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_distinct_games_kept_in_call_order() {
        let mut ledger = ScoreLedger::new();
        ledger.record(entry(2, None));
        ledger.record(entry(1, Some(Player::Two)));

        let ids: Vec<u64> = ledger.list().map(|e| e.game_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_only_last_entry_is_compared() {
        let mut ledger = ScoreLedger::new();
        ledger.record(entry(1, None));
        ledger.record(entry(2, None));
        assert!(ledger.record(entry(1, None)));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_list_is_restartable() {
        let mut ledger = ScoreLedger::new();
        ledger.record(entry(1, None));
        ledger.record(entry(2, None));

        let listing = ledger.list();
        assert_eq!(listing.clone().count(), 2);
        assert_eq!(listing.count(), 2);
        assert_eq!(ledger.list().next().map(|e| e.game_id), Some(1));
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut ledger = ScoreLedger::new();
        ledger.record(entry(1, Some(Player::Two)));
        ledger.record(entry(2, None));
        ledger.save(&mut store).unwrap();

        let loaded = ScoreLedger::load(&store);
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_corrupt_blob_loads_empty_and_is_overwritten() {
        let mut store = MemoryStore::new();
        store.set(SCOREBOARD_KEY, "[{\"gameId\":".to_string()).unwrap();

        let mut ledger = ScoreLedger::load(&store);
        assert!(ledger.is_empty());

        ledger.record(entry(5, None));
        ledger.save(&mut store).unwrap();
        assert_eq!(ScoreLedger::load(&store).len(), 1);
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_value(entry(3, Some(Player::Two))).unwrap();
        assert_eq!(json["gameId"], 3);
        assert_eq!(json["playerOneName"], "Ann");
        assert_eq!(json["playerTwoAge"], 12);
        assert_eq!(json["moveCount"], 9);
        assert_eq!(json["winner"], true);
        assert_eq!(json["elapsedSeconds"], 75);

        let tie = serde_json::to_value(entry(4, None)).unwrap();
        assert!(tie["winner"].is_null());
    }

    #[test]
    fn test_winner_name_and_duration() {
        assert_eq!(entry(1, Some(Player::One)).winner_name(), "Ann");
        assert_eq!(entry(1, Some(Player::Two)).winner_name(), "Bo");
        assert_eq!(entry(1, None).winner_name(), "Draw");
        assert_eq!(entry(1, None).duration(), "1 minutes 15 seconds");
    }
}
