//! Players.

use serde::{Deserialize, Serialize};

use super::ids::ComputerId;
use super::weapon::Weapon;

/// PlayerKind はプレイヤーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerKind {
    Human,
    Computer,
}

/// Player in the roster.
///
/// # 不変条件
/// - COMPUTER は空でない `computer_id` を持つ（生成後は変わらない）
/// - HUMAN は `computer_id` を持たない
/// - `score` はセッション中に減らない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlayerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computer_id: Option<ComputerId>,
    pub chosen_weapon: Option<Weapon>,
    pub score: u32,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
            computer_id: None,
            chosen_weapon: None,
            score: 0,
        }
    }

    pub fn computer(name: impl Into<String>, computer_id: ComputerId) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Computer,
            computer_id: Some(computer_id),
            chosen_weapon: None,
            score: 0,
        }
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    pub fn is_computer(&self) -> bool {
        self.kind == PlayerKind::Computer
    }

    /// 武器を持たせたコピーを返す
    pub fn with_weapon(&self, weapon: Weapon) -> Self {
        Self {
            chosen_weapon: Some(weapon),
            ..self.clone()
        }
    }

    /// Does `winner` (a copy produced by round resolution) refer to this player?
    ///
    /// HUMAN 同士は種類で、COMPUTER 同士は `computer_id` で照合します。
    pub fn is_same_player(&self, winner: &Player) -> bool {
        match (self.kind, winner.kind) {
            (PlayerKind::Human, PlayerKind::Human) => true,
            (PlayerKind::Computer, PlayerKind::Computer) => {
                self.computer_id.is_some() && self.computer_id == winner.computer_id
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ComputerId {
        ComputerId::parse(value).unwrap()
    }

    #[test]
    fn human_has_no_computer_id() {
        let alice = Player::human("Alice");
        assert!(alice.is_human());
        assert_eq!(alice.computer_id, None);
        assert_eq!(alice.score, 0);
        assert_eq!(alice.chosen_weapon, None);
    }

    #[test]
    fn computers_are_matched_by_id() {
        let angry = Player::computer("Angry Computer", id("a1"));
        let happy = Player::computer("Happy Computer", id("h1"));
        let winner = Player {
            score: 1,
            ..angry.clone()
        };

        assert!(angry.is_same_player(&winner));
        assert!(!happy.is_same_player(&winner));
        assert!(!Player::human("Alice").is_same_player(&winner));
    }

    #[test]
    fn humans_are_matched_by_kind() {
        let alice = Player::human("Alice");
        let winner = Player {
            score: 3,
            ..alice.clone()
        };
        assert!(alice.is_same_player(&winner));
        assert!(!Player::computer("Angry Computer", id("a1")).is_same_player(&winner));
    }

    #[test]
    fn serializes_kind_as_type_field() {
        let json = serde_json::to_value(Player::human("Alice")).unwrap();
        assert_eq!(json["type"], "HUMAN");
        assert_eq!(json["chosenWeapon"], serde_json::Value::Null);
        assert!(json.get("computerId").is_none());
    }
}
