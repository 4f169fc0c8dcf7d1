//! StoreBuilder - GameStateStore の構築とワイヤリング
//!
//! # 起動時検証（Fail-fast 設計）
//! - build() 時に設定を検証し、不正なら BuildError を返す
//! - 武器カタログが空、power relation が単一の巡回でない、遅延の範囲が逆転、など
//! - これにより、実行中の「空カタログ」は到達不能になる

use std::sync::Arc;

use crate::config::GameConfig;
use crate::domain::decision::DecisionEngine;
use crate::domain::errors::DecisionError;
use crate::impls::{InMemoryStore, NoopNavigator, ThreadRandom};
use crate::ports::{IdGenerator, KeyValueStore, Navigator, RandomSource, SystemClock, UlidGenerator};

use super::store::{GameStateStore, StoreParts};
use super::stream::Broadcaster;

/// BuildError はストア構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid weapon configuration: {0}")]
    InvalidWeapons(#[from] DecisionError),

    #[error("invalid delivery delay: min {min}ms is greater than max {max}ms")]
    InvalidDelay { min: u64, max: u64 },

    #[error("storage key must not be empty")]
    EmptyStorageKey,
}

/// StoreBuilder は GameStateStore を構築
///
/// # 使用例
/// ```ignore
/// let store = GameStateStore::builder()
///     .config(config)
///     .storage(FileStore::new(".rockit"))
///     .navigator(navigator.clone())
///     .build()?;
/// ```
///
/// 指定しなかった port は既定の実装を使います。
/// - storage: InMemoryStore
/// - navigator: NoopNavigator
/// - random / delivery_random: ThreadRandom
/// - id_generator: UlidGenerator<SystemClock>
pub struct StoreBuilder {
    config: GameConfig,
    storage: Option<Arc<dyn KeyValueStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    random: Option<Arc<dyn RandomSource>>,
    delivery_random: Option<Arc<dyn RandomSource>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            storage: None,
            navigator: None,
            random: None,
            delivery_random: None,
            ids: None,
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn storage(mut self, storage: impl KeyValueStore + 'static) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    /// COMPUTER の武器選択に使う乱数
    pub fn random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Some(Arc::new(random));
        self
    }

    /// 配信遅延に使う乱数
    pub fn delivery_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.delivery_random = Some(Arc::new(random));
        self
    }

    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    /// 設定を検証して GameStateStore を構築し、保存済みのゲームを復元する
    pub fn build(self) -> Result<GameStateStore, BuildError> {
        let config = self.config;
        if config.storage_key.is_empty() {
            return Err(BuildError::EmptyStorageKey);
        }
        let delay = config.delivery_delay_ms;
        if !delay.is_valid() {
            return Err(BuildError::InvalidDelay {
                min: delay.min,
                max: delay.max,
            });
        }
        let power = config.power_table()?;

        let random = self.random.unwrap_or_else(|| Arc::new(ThreadRandom));
        let delivery_random = self.delivery_random.unwrap_or_else(|| Arc::new(ThreadRandom));

        Ok(GameStateStore::from_parts(StoreParts {
            engine: DecisionEngine::new(power, random),
            storage: self.storage.unwrap_or_else(|| Arc::new(InMemoryStore::new())),
            navigator: self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator)),
            ids: self
                .ids
                .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock))),
            broadcaster: Broadcaster::new(delay, delivery_random),
            config,
        }))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DelayRange, WeaponSpec};
    use crate::domain::ids::ComputerId;
    use crate::domain::state::GameMode;
    use crate::domain::weapon::WeaponKind;

    fn spec(kind: &str, beats: &str) -> WeaponSpec {
        WeaponSpec {
            kind: kind.to_string(),
            icon: kind.to_lowercase(),
            beats: beats.to_string(),
        }
    }

    struct FixedIds;

    impl IdGenerator for FixedIds {
        fn generate_computer_id(&self) -> ComputerId {
            ComputerId::parse("cpu-fixed").unwrap()
        }
    }

    #[test]
    fn test_build_with_defaults() {
        let store = StoreBuilder::new().build();
        assert!(store.is_ok());
    }

    #[test]
    fn test_build_empty_catalog() {
        let config = GameConfig {
            weapons: vec![],
            ..GameConfig::default()
        };
        let store = StoreBuilder::new().config(config).build();
        assert!(matches!(
            store,
            Err(BuildError::InvalidWeapons(DecisionError::EmptyCatalog))
        ));
    }

    #[test]
    fn test_build_broken_cycle() {
        let config = GameConfig {
            weapons: vec![spec("A", "B"), spec("B", "A"), spec("C", "A")],
            ..GameConfig::default()
        };
        let store = StoreBuilder::new().config(config).build();
        assert!(matches!(
            store,
            Err(BuildError::InvalidWeapons(DecisionError::BrokenCycle))
        ));
    }

    #[test]
    fn test_build_inverted_delay() {
        let config = GameConfig {
            delivery_delay_ms: DelayRange { min: 10, max: 5 },
            ..GameConfig::default()
        };
        let store = StoreBuilder::new().config(config).build();
        assert!(matches!(
            store,
            Err(BuildError::InvalidDelay { min: 10, max: 5 })
        ));
    }

    #[test]
    fn test_build_empty_storage_key() {
        let config = GameConfig {
            storage_key: String::new(),
            ..GameConfig::default()
        };
        assert!(matches!(
            StoreBuilder::new().config(config).build(),
            Err(BuildError::EmptyStorageKey)
        ));
    }

    #[test]
    fn test_build_custom_catalog_and_ids() {
        let config = GameConfig {
            weapons: vec![spec("FIRE", "GRASS"), spec("GRASS", "WATER"), spec("WATER", "FIRE")],
            ..GameConfig::default()
        };
        let mut store = StoreBuilder::new()
            .config(config)
            .id_generator(FixedIds)
            .build()
            .unwrap();

        let kinds: Vec<_> = store
            .state()
            .weapon_catalog
            .iter()
            .map(|w| w.kind.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![WeaponKind::new("FIRE"), WeaponKind::new("GRASS"), WeaponKind::new("WATER")]
        );

        store.start_game(GameMode::HumanVsComputer);
        assert_eq!(
            store.state().players[0].computer_id.as_ref().map(|id| id.as_str()),
            Some("cpu-fixed")
        );
    }
}
