//! Navigator implementations.

use std::sync::{Arc, Mutex};

use crate::ports::{Navigator, Route};

/// 何もしない Navigator（画面を持たない利用者向け）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn go_to(&self, _route: Route) {}
}

/// RecordingNavigator は遷移の意図を記録する
///
/// clone したハンドル同士で履歴を共有します。テストでは遷移の確認に、
/// CLI では「いまどの画面か」の判定に使います。
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    history: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    /// 最後に要求された遷移先（まだ無ければ Root）
    pub fn current(&self) -> Route {
        self.history().last().copied().unwrap_or(Route::Root)
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: Route) {
        if let Ok(mut history) = self.history.lock() {
            history.push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_routes_in_order() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.current(), Route::Root);

        let handle = navigator.clone();
        navigator.go_to(Route::Game);
        navigator.go_to(Route::Root);

        assert_eq!(handle.history(), vec![Route::Game, Route::Root]);
        assert_eq!(handle.current(), Route::Root);
    }
}
