//! Errors - エラー型と分類
//!
//! - DecisionError: 判定ロジックの前提条件違反（本来は到達しない）
//! - GameError: GameStateStore の公開操作が返すエラー
//!
//! 永続化の失敗は best-effort として扱い、ここには含めません（ログのみ）。

use thiserror::Error;

use super::weapon::WeaponKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("weapon catalog is empty")]
    EmptyCatalog,

    #[error("player '{0}' has not chosen a weapon")]
    WeaponNotChosen(String),

    #[error("weapon kind '{0}' is missing from the power relation")]
    UnknownKind(WeaponKind),

    #[error("weapon kind '{0}' appears more than once")]
    DuplicateKind(WeaponKind),

    #[error("power relation does not form a single cycle over all weapon kinds")]
    BrokenCycle,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Decision(#[from] DecisionError),
}
