use serde::{Deserialize, Serialize};

use crate::game::Player;

/// Names and ages of the two players, persisted as
/// `[playerOneName, playerOneAge, playerTwoName, playerTwoAge]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u32, String, u32)", into = "(String, u32, String, u32)")]
pub struct PlayersDetails {
    pub player_one_name: String,
    pub player_one_age: u32,
    pub player_two_name: String,
    pub player_two_age: u32,
}

impl PlayersDetails {
    pub fn new(
        player_one_name: impl Into<String>,
        player_one_age: u32,
        player_two_name: impl Into<String>,
        player_two_age: u32,
    ) -> Self {
        PlayersDetails {
            player_one_name: player_one_name.into(),
            player_one_age,
            player_two_name: player_two_name.into(),
            player_two_age,
        }
    }

    pub fn name_of(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_one_name,
            Player::Two => &self.player_two_name,
        }
    }
}

impl Default for PlayersDetails {
    fn default() -> Self {
        PlayersDetails::new(Player::One.name(), 0, Player::Two.name(), 0)
    }
}

impl From<(String, u32, String, u32)> for PlayersDetails {
    fn from((one_name, one_age, two_name, two_age): (String, u32, String, u32)) -> Self {
        PlayersDetails::new(one_name, one_age, two_name, two_age)
    }
}

impl From<PlayersDetails> for (String, u32, String, u32) {
    fn from(details: PlayersDetails) -> Self {
        (
            details.player_one_name,
            details.player_one_age,
            details.player_two_name,
            details.player_two_age,
        )
    }
}
