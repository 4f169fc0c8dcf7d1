//! Saved game - 永続化するゲーム状態の部分集合
//!
//! # ペイロード
//! ```json
//! { "started": true, "mode": "HUMAN_VS_COMPUTER",
//!   "players": [{ "name": "Alice", "type": "HUMAN", "chosenWeapon": null, "score": 2 }] }
//! ```
//! - 選択中の武器は保存しない（常に null）
//! - weapon_catalog と winner_board は含めない
//! - 読み込み時は存在するフィールドだけを既定の状態に上書きする（shallow merge）

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::ComputerId;
use super::player::{Player, PlayerKind};
use super::state::{GameMode, GameState};
use super::weapon::Weapon;

pub const DEFAULT_STORAGE_KEY: &str = "rockItGameState";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("saved game is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("saved computer player '{0}' has no computer id")]
    MissingComputerId(String),

    #[error("computer id '{0}' is used by more than one saved player")]
    DuplicateComputerId(String),
}

/// SavedGame は永続化ペイロード
///
/// 読み込み側は部分的なペイロードも受け付けるため、全フィールドが Option です。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedGame {
    #[serde(alias = "gameStarted", skip_serializing_if = "Option::is_none")]
    pub started: Option<bool>,
    #[serde(alias = "gameMode", skip_serializing_if = "Option::is_none")]
    pub mode: Option<GameMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<SavedPlayer>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlayer {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlayerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computer_id: Option<String>,
    /// 書き込み時は常に null、読み込み時は無視
    #[serde(default)]
    pub chosen_weapon: Option<Weapon>,
    #[serde(default)]
    pub score: u32,
}

impl SavedGame {
    /// 現在の状態から保存対象（started, mode, players）を取り出す
    pub fn capture(state: &GameState) -> Self {
        Self {
            started: Some(state.started),
            mode: Some(state.mode),
            players: Some(state.players.iter().map(SavedPlayer::from).collect()),
        }
    }

    pub fn encode(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a payload and validate its players.
    ///
    /// COMPUTER は必ず id を持ち、id は roster 内で一意であること。
    pub fn decode(payload: &str) -> Result<Self, SnapshotError> {
        let saved: SavedGame = serde_json::from_str(payload)?;
        if let Some(players) = &saved.players {
            let mut seen = HashSet::new();
            for player in players {
                if let Some(id) = player.to_player()?.computer_id {
                    if !seen.insert(id.as_str().to_owned()) {
                        return Err(SnapshotError::DuplicateComputerId(id.to_string()));
                    }
                }
            }
        }
        Ok(saved)
    }

    /// Shallow-merge the present fields over `base`.
    pub fn merge_into(self, base: GameState) -> Result<GameState, SnapshotError> {
        let players = match self.players {
            Some(players) => players
                .iter()
                .map(SavedPlayer::to_player)
                .collect::<Result<Vec<_>, _>>()?,
            None => base.players.clone(),
        };

        Ok(GameState {
            started: self.started.unwrap_or(base.started),
            mode: self.mode.unwrap_or(base.mode),
            players,
            ..base
        })
    }
}

impl SavedPlayer {
    fn to_player(&self) -> Result<Player, SnapshotError> {
        let computer_id = match self.kind {
            PlayerKind::Human => None,
            PlayerKind::Computer => Some(
                self.computer_id
                    .clone()
                    .and_then(ComputerId::parse)
                    .ok_or_else(|| SnapshotError::MissingComputerId(self.name.clone()))?,
            ),
        };

        Ok(Player {
            name: self.name.clone(),
            kind: self.kind,
            computer_id,
            chosen_weapon: None,
            score: self.score,
        })
    }
}

impl From<&Player> for SavedPlayer {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            kind: player.kind,
            computer_id: player.computer_id.as_ref().map(|id| id.to_string()),
            chosen_weapon: None,
            score: player.score,
        }
    }
}
