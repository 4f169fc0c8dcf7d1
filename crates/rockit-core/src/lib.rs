//! rockit-core
//!
//! Game state & decision engine for a two-player rock-paper-scissors game.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（weapon, player, state, decision, saved, errors）
//! - **ports**: 抽象化レイヤー（KeyValueStore, Navigator, RandomSource, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（builder, store, stream, guard）
//! - **impls**: ports の実装（InMemoryStore, FileStore, RecordingNavigator など）
//! - **config**: GameConfig

pub mod domain;
pub mod ports;
pub mod app;
pub mod impls;
pub mod config;
