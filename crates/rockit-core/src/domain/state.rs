//! State - ゲーム状態
//!
//! `GameState` は遷移のたびに丸ごと置き換えられるスナップショットです。
//! 一度作られたスナップショットは変更されません（購読者は `Arc<GameState>` を受け取る）。

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::weapon::Weapon;

pub const WIN_MESSAGE: &str = "Congrats!";
pub const TIE_MESSAGE: &str = "It's a tie!";

/// GameMode はゲームの対戦形式
///
/// # 対戦者の位置（固定）
/// - HumanVsComputer: roster の (0, 1)
/// - ComputerVsComputer: roster の (1, 2)。0 番は表示用に残した HUMAN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    #[default]
    HumanVsComputer,
    ComputerVsComputer,
}

impl GameMode {
    /// Roster positions of the two contestants.
    pub fn contestant_indices(self) -> (usize, usize) {
        match self {
            GameMode::HumanVsComputer => (0, 1),
            GameMode::ComputerVsComputer => (1, 2),
        }
    }

    /// `start_game` で追加する COMPUTER の数
    pub fn computers_needed(self) -> usize {
        match self {
            GameMode::HumanVsComputer => 1,
            GameMode::ComputerVsComputer => 2,
        }
    }
}

/// WinnerBoard は直近のラウンド結果
///
/// `winner` はスコア加算済みのコピー。`None` かつ tie メッセージなら引き分け。
/// 初期状態では `winner = None` でメッセージは空です。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WinnerBoard {
    pub winner: Option<Player>,
    pub message: String,
}

impl WinnerBoard {
    pub fn from_round(winner: Option<Player>) -> Self {
        let message = if winner.is_some() {
            WIN_MESSAGE
        } else {
            TIE_MESSAGE
        };
        Self {
            winner,
            message: message.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.winner.is_none() && self.message.is_empty()
    }

    pub fn is_tie(&self) -> bool {
        self.winner.is_none() && self.message == TIE_MESSAGE
    }
}

/// Engine-level lifecycle.
///
/// NotStarted → InProgress（`start_game`）、InProgress はラウンドをまたいで再入、
/// InProgress → NotStarted は `finish_game` のみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
}

/// GameState は権威あるゲーム状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub started: bool,
    pub mode: GameMode,
    pub weapon_catalog: Vec<Weapon>,
    pub players: Vec<Player>,
    pub winner_board: WinnerBoard,
}

impl GameState {
    /// 未開始・HumanVsComputer・空 roster・空の WinnerBoard
    pub fn initial(weapon_catalog: Vec<Weapon>) -> Self {
        Self {
            started: false,
            mode: GameMode::default(),
            weapon_catalog,
            players: Vec::new(),
            winner_board: WinnerBoard::default(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.started {
            GamePhase::InProgress
        } else {
            GamePhase::NotStarted
        }
    }

    /// Players a game view shows: computers only in ComputerVsComputer mode.
    pub fn visible_players(&self) -> Vec<&Player> {
        match self.mode {
            GameMode::ComputerVsComputer => {
                self.players.iter().filter(|p| p.is_computer()).collect()
            }
            GameMode::HumanVsComputer => self.players.iter().collect(),
        }
    }

    pub fn human_name(&self) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.is_human())
            .map(|p| p.name.as_str())
    }

    pub fn total_score(&self) -> u32 {
        self.players.iter().map(|p| p.score).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::ComputerId;
    use crate::domain::weapon::classic_catalog;
    use rstest::rstest;

    fn cvc_state() -> GameState {
        GameState {
            started: true,
            mode: GameMode::ComputerVsComputer,
            players: vec![
                Player::human("Alice"),
                Player::computer("Angry Computer", ComputerId::parse("a").unwrap()),
                Player::computer("Happy Computer", ComputerId::parse("h").unwrap()),
            ],
            ..GameState::initial(classic_catalog())
        }
    }

    #[rstest]
    #[case::human_vs_computer(GameMode::HumanVsComputer, (0, 1), 1)]
    #[case::computer_vs_computer(GameMode::ComputerVsComputer, (1, 2), 2)]
    fn mode_conventions(
        #[case] mode: GameMode,
        #[case] indices: (usize, usize),
        #[case] computers: usize,
    ) {
        assert_eq!(mode.contestant_indices(), indices);
        assert_eq!(mode.computers_needed(), computers);
    }

    #[test]
    fn initial_state_is_not_started() {
        let state = GameState::initial(classic_catalog());
        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert_eq!(state.mode, GameMode::HumanVsComputer);
        assert!(state.players.is_empty());
        assert!(state.winner_board.is_empty());
        assert_eq!(state.weapon_catalog.len(), 3);
    }

    #[test]
    fn computer_vs_computer_hides_the_human() {
        let state = cvc_state();
        let names: Vec<_> = state.visible_players().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Angry Computer", "Happy Computer"]);
        assert_eq!(state.human_name(), Some("Alice"));
    }

    #[test]
    fn winner_board_messages() {
        assert!(WinnerBoard::from_round(None).is_tie());
        let board = WinnerBoard::from_round(Some(Player::human("Alice")));
        assert_eq!(board.message, WIN_MESSAGE);
        assert!(!board.is_tie());
    }

    #[test]
    fn mode_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&GameMode::ComputerVsComputer).unwrap();
        assert_eq!(json, "\"COMPUTER_VS_COMPUTER\"");
    }
}
