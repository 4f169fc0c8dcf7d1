//! Navigator port - 画面遷移の意図を外部ルーターに伝える

use std::fmt;

/// Route は遷移先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`（ランディング。`/welcome` にリダイレクトされる）
    Root,
    /// `/welcome`
    Welcome,
    /// `/game`
    Game,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Welcome => "/welcome",
            Route::Game => "/game",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Navigator は遷移の意図を受け取る
///
/// コアは意図を発行するだけで、実際の画面遷移は行いません。
pub trait Navigator: Send + Sync {
    fn go_to(&self, route: Route);
}
