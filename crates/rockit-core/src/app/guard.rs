//! GameGuard - ゲーム画面への入場制御

use std::sync::Arc;

use crate::domain::state::GameState;
use crate::ports::{Navigator, Route};

/// GameGuard はゲーム画面（`/game`）に入れるかを判定
///
/// - 開始前なら `/welcome` へリダイレクトして入場を拒否する
/// - ランディング表示時、復元した状態がすでに開始済みならゲーム画面へ戻す
pub struct GameGuard {
    navigator: Arc<dyn Navigator>,
}

impl GameGuard {
    pub fn new(navigator: impl Navigator + 'static) -> Self {
        Self {
            navigator: Arc::new(navigator),
        }
    }

    pub fn can_enter(&self, state: &GameState) -> bool {
        if state.started {
            return true;
        }
        tracing::info!(route = %Route::Welcome, "game view blocked: game not started");
        self.navigator.go_to(Route::Welcome);
        false
    }

    /// 開始済みのゲームがあればゲーム画面へ遷移して `true`
    pub fn resume(&self, state: &GameState) -> bool {
        if state.started {
            self.navigator.go_to(Route::Game);
        }
        state.started
    }
}
