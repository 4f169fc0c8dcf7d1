//! App - アプリケーション層
//!
//! このモジュールは、domain と ports を組み合わせてゲームを動かします。
//!
//! # 主要コンポーネント
//! - **StoreBuilder**: ストアの構築とワイヤリング（起動時検証）
//! - **GameStateStore**: 状態の保持・遷移・永続化・配信
//! - **StateStream**: 遅延つきの状態配信
//! - **GameGuard**: ゲーム画面への入場制御

pub mod builder;
pub mod store;
pub mod stream;
pub mod guard;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, StoreBuilder};
pub use self::store::GameStateStore;
pub use self::stream::StateStream;
pub use self::guard::GameGuard;
