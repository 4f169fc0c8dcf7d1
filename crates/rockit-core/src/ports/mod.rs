//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait はコアの外側にある能力（永続化、画面遷移、乱数、時刻、ID 生成）への
//! インターフェースを提供し、実装の詳細を隠蔽します。

pub mod storage;
pub mod navigator;
pub mod random;
pub mod clock;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::storage::{KeyValueStore, StorageError};
pub use self::navigator::{Navigator, Route};
pub use self::random::RandomSource;
pub use self::clock::{Clock, SystemClock, FixedClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
