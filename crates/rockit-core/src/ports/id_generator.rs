//! IdGenerator port - ID 生成の抽象化
//!
//! COMPUTER プレイヤーの `computer_id` を生成します。
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::ids::ComputerId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は COMPUTER プレイヤーの ID を生成
///
/// # ULID の特性
/// - 時刻でソート可能
/// - 調整なしで一意（同じミリ秒でもランダム部分で区別される）
pub trait IdGenerator: Send + Sync {
    fn generate_computer_id(&self) -> ComputerId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_computer_id(&self) -> ComputerId {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        ComputerId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}
