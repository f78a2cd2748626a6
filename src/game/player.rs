use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::One,
            Player::Two => Cell::Two,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }

    /// Persisted turn index: 0 for player one, 1 for player two.
    pub fn turn_index(self) -> u8 {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn from_turn_index(index: u8) -> Option<Player> {
        match index {
            0 => Some(Player::One),
            1 => Some(Player::Two),
            _ => None,
        }
    }

    /// Persisted winner flag: `false` for player one, `true` for player two.
    pub fn winner_flag(self) -> bool {
        self == Player::Two
    }

    pub fn from_winner_flag(flag: bool) -> Player {
        if flag {
            Player::Two
        } else {
            Player::One
        }
    }
}

/// Serde adapter for `Player` stored as a 0/1 turn index.
pub(crate) mod turn_index {
    use super::Player;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(player: &Player, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(player.turn_index())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Player, D::Error> {
        let index = u8::deserialize(deserializer)?;
        Player::from_turn_index(index)
            .ok_or_else(|| D::Error::custom(format!("turn must be 0 or 1, got {index}")))
    }
}

/// Serde adapter for an optional winner stored as `bool | null`.
pub(crate) mod winner_flag {
    use super::Player;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        winner: &Option<Player>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match winner {
            Some(player) => serializer.serialize_bool(player.winner_flag()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Player>, D::Error> {
        Ok(Option::<bool>::deserialize(deserializer)?.map(Player::from_winner_flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
    }

    #[test]
    fn test_turn_index() {
        assert_eq!(Player::from_turn_index(Player::One.turn_index()), Some(Player::One));
        assert_eq!(Player::from_turn_index(1), Some(Player::Two));
        assert_eq!(Player::from_turn_index(2), None);
    }

    #[test]
    fn test_winner_flag() {
        assert!(!Player::One.winner_flag());
        assert!(Player::Two.winner_flag());
        assert_eq!(Player::from_winner_flag(true), Player::Two);
    }
}
