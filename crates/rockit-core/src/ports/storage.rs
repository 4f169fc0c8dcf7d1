//! KeyValueStore port - 永続化の抽象化
//!
//! ブラウザの local storage に相当する、キーごとに文字列を保存するストアです。
//! コアは特定のバックエンドを前提にしません。
//!
//! # 実装
//! - **InMemoryStore**: テスト・一時的なプレイ用
//! - **FileStore**: 1 キー 1 ファイル（CLI 用）

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// KeyValueStore は文字列のキー・バリューストア
///
/// # 設計原則
/// - 同期・ローカル書き込み（高速で通常は失敗しない）
/// - 呼び出し側（GameStateStore）は失敗を best-effort として扱う
/// - `Send + Sync` を要求（複数スレッドから共有できる）
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 存在しないキーの削除は成功扱い
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
