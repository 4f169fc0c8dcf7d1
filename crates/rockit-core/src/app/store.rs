//! GameStateStore - 権威あるゲーム状態の保持と遷移
//!
//! # 遷移の流れ（全操作共通）
//! 1. 現在のスナップショットと入力から次の GameState を作る（純粋）
//! 2. 現在値を置き換える（in-place の変更はしない）
//! 3. 永続化（best-effort。失敗はログのみ）
//! 4. 全購読者へ配信（遅延つき、StateStream 参照）
//!
//! # 状態遷移
//! - NotStarted --start_game--> InProgress
//! - InProgress --play_with_weapon / computer_play--> InProgress
//! - InProgress --finish_game--> NotStarted
//!
//! 単一の書き手（`&mut self`）なので、遷移同士が交互に実行されることはありません。

use std::sync::Arc;

use crate::config::GameConfig;
use crate::domain::decision::DecisionEngine;
use crate::domain::errors::GameError;
use crate::domain::player::Player;
use crate::domain::saved::SavedGame;
use crate::domain::state::{GameMode, GameState, WinnerBoard};
use crate::domain::weapon::Weapon;
use crate::ports::{IdGenerator, KeyValueStore, Navigator, Route};

use super::builder::StoreBuilder;
use super::stream::{Broadcaster, StateStream};

/// GameStateStore はゲーム状態の唯一の所有者
///
/// 構築は `GameStateStore::builder()` から行います。
pub struct GameStateStore {
    engine: DecisionEngine,
    storage: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
    ids: Arc<dyn IdGenerator>,
    config: GameConfig,
    /// 構築時の既定値（保存データをマージする前）。finish_game で戻る先
    initial: Arc<GameState>,
    current: Arc<GameState>,
    broadcaster: Broadcaster,
}

/// StoreBuilder から組み立てに必要な部品
pub(crate) struct StoreParts {
    pub engine: DecisionEngine,
    pub storage: Arc<dyn KeyValueStore>,
    pub navigator: Arc<dyn Navigator>,
    pub ids: Arc<dyn IdGenerator>,
    pub config: GameConfig,
    pub broadcaster: Broadcaster,
}

impl GameStateStore {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// 既定の状態を作り、保存済みのゲームがあればその上にマージする
    pub(crate) fn from_parts(parts: StoreParts) -> Self {
        let StoreParts {
            engine,
            storage,
            navigator,
            ids,
            config,
            broadcaster,
        } = parts;

        let initial = Arc::new(GameState::initial(config.weapon_catalog()));
        let current = Arc::new(restore(storage.as_ref(), &config.storage_key, &initial));

        Self {
            engine,
            storage,
            navigator,
            ids,
            config,
            initial,
            current,
            broadcaster,
        }
    }

    /// 現在のスナップショット
    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.current)
    }

    /// 状態の購読を開始する（最初に現在の状態が届く）
    pub fn subscribe(&mut self) -> StateStream {
        self.broadcaster.subscribe(self.state())
    }

    /// HUMAN プレイヤーを roster の末尾に追加する
    ///
    /// 開始前（NotStarted）にだけ呼ぶこと。強制はしない。
    pub fn create_human(&mut self, name: impl Into<String>) {
        let mut players = self.current.players.clone();
        players.push(Player::human(name));

        self.commit(GameState {
            players,
            ..(*self.current).clone()
        });
    }

    /// Start a game in `mode` and navigate to the game view.
    ///
    /// roster は既存の HUMAN を先頭に残し、mode に必要な数の COMPUTER を新しく作り直します。
    pub fn start_game(&mut self, mode: GameMode) {
        let mut players: Vec<Player> = self
            .current
            .players
            .iter()
            .filter(|player| player.is_human())
            .cloned()
            .collect();
        for ordinal in 0..mode.computers_needed() {
            players.push(Player::computer(
                self.config.computer_name(ordinal),
                self.ids.generate_computer_id(),
            ));
        }

        self.commit(GameState {
            started: true,
            mode,
            players,
            ..(*self.current).clone()
        });
        self.navigate(Route::Game);
    }

    /// HUMAN には `weapon` を、COMPUTER にはそれぞれ独立にランダムな武器を持たせてラウンドを解決する
    pub fn play_with_weapon(&mut self, weapon: Weapon) -> Result<(), GameError> {
        let players = self
            .current
            .players
            .iter()
            .map(|player| {
                if player.is_human() {
                    Ok(player.with_weapon(weapon.clone()))
                } else {
                    self.random_weapon().map(|w| player.with_weapon(w))
                }
            })
            .collect::<Result<Vec<_>, GameError>>()?;

        self.resolve_round(players)
    }

    /// COMPUTER だけに武器を持たせてラウンドを解決する（HUMAN の武器はそのまま）
    pub fn computer_play(&mut self) -> Result<(), GameError> {
        let players = self
            .current
            .players
            .iter()
            .map(|player| {
                if player.is_computer() {
                    self.random_weapon().map(|w| player.with_weapon(w))
                } else {
                    Ok(player.clone())
                }
            })
            .collect::<Result<Vec<_>, GameError>>()?;

        self.resolve_round(players)
    }

    /// 保存データを消し、構築時の既定値に戻してランディングへ遷移する
    pub fn finish_game(&mut self) {
        if let Err(e) = self.storage.remove(&self.config.storage_key) {
            tracing::warn!(error = %e, "failed to erase saved game");
        }
        let initial = Arc::clone(&self.initial);
        self.publish(initial);
        self.navigate(Route::Root);
    }

    fn random_weapon(&self) -> Result<Weapon, GameError> {
        Ok(self
            .engine
            .choose_random_weapon(&self.current.weapon_catalog)?)
    }

    /// Round resolution shared by both play operations.
    ///
    /// スコアと WinnerBoard は 1 回の置き換えで同時に反映します。
    fn resolve_round(&mut self, players: Vec<Player>) -> Result<(), GameError> {
        let winner = self
            .engine
            .determine_round_winner(&players, self.current.mode)?;

        let players = players
            .into_iter()
            .map(|player| match &winner {
                Some(winner) if player.is_same_player(winner) => Player {
                    score: player.score + 1,
                    ..player
                },
                _ => player,
            })
            .collect();

        self.commit(GameState {
            players,
            winner_board: WinnerBoard::from_round(winner),
            ..(*self.current).clone()
        });
        Ok(())
    }

    /// 置き換え + 永続化 + 配信
    fn commit(&mut self, next: GameState) {
        self.publish(Arc::new(next));
        self.persist();
    }

    fn publish(&mut self, next: Arc<GameState>) {
        tracing::debug!(
            started = next.started,
            mode = ?next.mode,
            players = next.players.len(),
            message = %next.winner_board.message,
            "game state updated"
        );
        self.current = next;
        self.broadcaster.publish(&self.current);
    }

    fn persist(&self) {
        let payload = match SavedGame::capture(&self.current).encode() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode game state");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.config.storage_key, &payload) {
            tracing::warn!(error = %e, "failed to save game state");
        }
    }

    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "navigate");
        self.navigator.go_to(route);
    }
}

/// 保存済みのゲームを既定値にマージする。読めなければ既定値のまま（エラーにしない）
fn restore(storage: &dyn KeyValueStore, key: &str, initial: &GameState) -> GameState {
    let payload = match storage.get(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return initial.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read saved game");
            return initial.clone();
        }
    };

    match SavedGame::decode(&payload).and_then(|saved| saved.merge_into(initial.clone())) {
        Ok(state) => {
            tracing::info!(
                started = state.started,
                players = state.players.len(),
                "restored saved game"
            );
            state
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable saved game");
            initial.clone()
        }
    }
}
