//! RandomSource port - 乱数の抽象化
//!
//! # テスト容易性
//! - 本番は ThreadRandom（`rand::thread_rng`）
//! - テストは ScriptedRandom で COMPUTER の武器や配信遅延を固定する

/// RandomSource は `[0, upper)` の一様な整数を返す
pub trait RandomSource: Send + Sync {
    /// `upper` は 1 以上
    fn index(&self, upper: usize) -> usize;
}
