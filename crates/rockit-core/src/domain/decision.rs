//! Decision engine: random weapon choice, weapon power and round winner.
//!
//! DecisionEngine は状態を持たない純粋な判定ロジックです。
//! 唯一の入力源は乱数（`RandomSource` port）で、テストでは台本どおりの値に差し替えます。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::errors::DecisionError;
use super::player::Player;
use super::state::GameMode;
use super::weapon::{Weapon, WeaponKind};
use crate::ports::RandomSource;

/// PowerTable は「各種類が倒すただ一つの種類」の対応表
///
/// 全種類を一周する単一の巡回になっていることがゲーム成立の前提です。
/// `from_pairs` はこれを検証しますが、DecisionEngine 自体は実行時に検証しません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerTable {
    beats: HashMap<WeaponKind, WeaponKind>,
}

impl PowerTable {
    /// ROCK → SCISSORS, PAPER → ROCK, SCISSORS → PAPER
    pub fn classic() -> Self {
        let beats = HashMap::from([
            (WeaponKind::rock(), WeaponKind::scissors()),
            (WeaponKind::paper(), WeaponKind::rock()),
            (WeaponKind::scissors(), WeaponKind::paper()),
        ]);
        Self { beats }
    }

    /// Build a table from `(kind, beaten_kind)` pairs, checking it is a single cycle.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (WeaponKind, WeaponKind)>,
    ) -> Result<Self, DecisionError> {
        let mut beats = HashMap::new();
        for (kind, beaten) in pairs {
            if beats.contains_key(&kind) {
                return Err(DecisionError::DuplicateKind(kind));
            }
            beats.insert(kind, beaten);
        }
        let table = Self { beats };
        table.validate_cycle()?;
        Ok(table)
    }

    pub fn beats(&self, kind: &WeaponKind) -> Option<&WeaponKind> {
        self.beats.get(kind)
    }

    fn validate_cycle(&self) -> Result<(), DecisionError> {
        let Some(start) = self.beats.keys().next() else {
            return Err(DecisionError::EmptyCatalog);
        };
        if let Some(unknown) = self.beats.values().find(|k| !self.beats.contains_key(*k)) {
            return Err(DecisionError::UnknownKind(unknown.clone()));
        }
        if self.beats.len() < 2 {
            return Err(DecisionError::BrokenCycle);
        }

        let mut seen = HashSet::new();
        let mut current = start;
        for _ in 0..self.beats.len() {
            if !seen.insert(current) {
                return Err(DecisionError::BrokenCycle);
            }
            current = self
                .beats
                .get(current)
                .ok_or_else(|| DecisionError::UnknownKind(current.clone()))?;
        }

        if current == start && seen.len() == self.beats.len() {
            Ok(())
        } else {
            Err(DecisionError::BrokenCycle)
        }
    }
}

impl Default for PowerTable {
    fn default() -> Self {
        Self::classic()
    }
}

/// DecisionEngine は勝敗判定のロジック
///
/// # 設計原則
/// - 状態を持たない（power table は構築後に変わらない）
/// - 乱数は `RandomSource` から取得（非決定的。テストはメンバーシップを確認する）
pub struct DecisionEngine {
    power: PowerTable,
    random: Arc<dyn RandomSource>,
}

impl DecisionEngine {
    pub fn new(power: PowerTable, random: Arc<dyn RandomSource>) -> Self {
        Self { power, random }
    }

    /// カタログから一様に 1 つ選ぶ
    ///
    /// 空のカタログは前提条件違反なので `DecisionError::EmptyCatalog`。
    pub fn choose_random_weapon(&self, catalog: &[Weapon]) -> Result<Weapon, DecisionError> {
        if catalog.is_empty() {
            return Err(DecisionError::EmptyCatalog);
        }
        let index = self.random.index(catalog.len()) % catalog.len();
        Ok(catalog[index].clone())
    }

    /// Return whichever of the two weapons defeats the other.
    ///
    /// 呼び出し側が `a.kind != b.kind` を保証します（引き分けは先に判定済み）。
    pub fn resolve_weapon_power<'a>(&self, a: &'a Weapon, b: &'a Weapon) -> &'a Weapon {
        if self.power.beats(&a.kind) == Some(&b.kind) {
            a
        } else {
            b
        }
    }

    /// ラウンドの勝者を決める
    ///
    /// 対戦者は mode ごとの固定位置（`GameMode::contestant_indices`）から取ります。
    ///
    /// # Returns
    /// - `Ok(None)`: 引き分け（同じ種類）、または対戦者が揃っていない roster
    /// - `Ok(Some(winner))`: 勝者のコピー（score + 1 済み）
    /// - `Err(WeaponNotChosen)`: 片方だけ武器を持っていない
    pub fn determine_round_winner(
        &self,
        players: &[Player],
        mode: GameMode,
    ) -> Result<Option<Player>, DecisionError> {
        let (first_index, second_index) = mode.contestant_indices();
        let (Some(first), Some(second)) = (players.get(first_index), players.get(second_index))
        else {
            tracing::warn!(
                ?mode,
                roster = players.len(),
                "roster has no contestant at the expected positions"
            );
            return Ok(None);
        };

        let (first_weapon, second_weapon) = match (&first.chosen_weapon, &second.chosen_weapon) {
            (None, None) => return Ok(None),
            (Some(_), None) => return Err(DecisionError::WeaponNotChosen(second.name.clone())),
            (None, Some(_)) => return Err(DecisionError::WeaponNotChosen(first.name.clone())),
            (Some(a), Some(b)) => (a, b),
        };

        if first_weapon.kind == second_weapon.kind {
            return Ok(None);
        }

        let winner = if self.resolve_weapon_power(first_weapon, second_weapon).kind
            == first_weapon.kind
        {
            first
        } else {
            second
        };

        Ok(Some(Player {
            score: winner.score + 1,
            ..winner.clone()
        }))
    }
}
