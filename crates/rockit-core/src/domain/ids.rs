//! Domain identifiers.
//!
//! # ComputerId
//! COMPUTER プレイヤーを一意に識別する不透明な ID です。
//! 生成は `IdGenerator`（ULID ベース）が担当し、保存データから復元された ID は
//! 中身を解釈せずにそのまま保持します。
//!
//! ## なぜ String を包むのか？
//! - 過去のセッションで保存された ID は形式が決まっていない（opaque）
//! - 新規生成分は ULID なので、時刻順にソート可能で衝突しない

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of a COMPUTER player.
///
/// HUMAN プレイヤーは ID を持ちません（`Player::computer_id` が `None`）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComputerId(String);

impl ComputerId {
    /// 既存の文字列から ComputerId を作成
    ///
    /// 空文字列は ID として扱えないので `None` を返します。
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Ulid> for ComputerId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid.to_string())
    }
}

impl fmt::Display for ComputerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
