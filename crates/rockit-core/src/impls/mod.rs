//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryStore** / **FileStore**: KeyValueStore
//! - **NoopNavigator** / **RecordingNavigator**: Navigator
//! - **ThreadRandom** / **ScriptedRandom**: RandomSource

pub mod memory_store;
pub mod file_store;
pub mod navigation;
pub mod random;

// 主要な型を再エクスポート
pub use self::memory_store::InMemoryStore;
pub use self::file_store::FileStore;
pub use self::navigation::{NoopNavigator, RecordingNavigator};
pub use self::random::{ScriptedRandom, ThreadRandom};
