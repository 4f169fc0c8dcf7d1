//! Game configuration.
//!
//! すべてのフィールドに既定値があるので、設定ファイルは必要な部分だけ書けば十分です。
//!
//! ```json
//! { "delivery_delay_ms": { "min": 0, "max": 50 } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::decision::PowerTable;
use crate::domain::errors::DecisionError;
use crate::domain::saved::DEFAULT_STORAGE_KEY;
use crate::domain::weapon::{Weapon, WeaponKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配信遅延の範囲（ミリ秒、両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    pub const fn fixed(ms: u64) -> Self {
        Self { min: ms, max: ms }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// `pick(span)` には `[0, span)` の乱数を返す関数を渡す
    pub fn sample(&self, pick: impl FnOnce(usize) -> usize) -> Duration {
        let span = self.max.saturating_sub(self.min).saturating_add(1);
        let offset = pick(usize::try_from(span).unwrap_or(usize::MAX)) as u64;
        Duration::from_millis(self.min + offset.min(span - 1))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: 600,
            max: 1100,
        }
    }
}

/// WeaponSpec はカタログの 1 エントリと、それが倒す種類
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub kind: String,
    pub icon: String,
    pub beats: String,
}

impl WeaponSpec {
    fn new(kind: &str, icon: &str, beats: &str) -> Self {
        Self {
            kind: kind.to_string(),
            icon: icon.to_string(),
            beats: beats.to_string(),
        }
    }
}

/// GameConfig はエンジンの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub storage_key: String,
    pub delivery_delay_ms: DelayRange,
    pub computer_names: Vec<String>,
    pub weapons: Vec<WeaponSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            delivery_delay_ms: DelayRange::default(),
            computer_names: vec!["Angry Computer".to_string(), "Happy Computer".to_string()],
            weapons: vec![
                WeaponSpec::new(WeaponKind::ROCK, "✊", WeaponKind::SCISSORS),
                WeaponSpec::new(WeaponKind::PAPER, "✋", WeaponKind::ROCK),
                WeaponSpec::new(WeaponKind::SCISSORS, "✌️", WeaponKind::PAPER),
            ],
        }
    }
}

impl GameConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// 表示順のカタログ
    pub fn weapon_catalog(&self) -> Vec<Weapon> {
        self.weapons
            .iter()
            .map(|spec| Weapon::new(WeaponKind::new(spec.kind.clone()), spec.icon.clone()))
            .collect()
    }

    /// カタログの power relation（単一の巡回かどうかを検証する）
    pub fn power_table(&self) -> Result<PowerTable, DecisionError> {
        if self.weapons.is_empty() {
            return Err(DecisionError::EmptyCatalog);
        }
        PowerTable::from_pairs(self.weapons.iter().map(|spec| {
            (
                WeaponKind::new(spec.kind.clone()),
                WeaponKind::new(spec.beats.clone()),
            )
        }))
    }

    /// `ordinal` 番目（0 始まり）に作られる COMPUTER の名前
    pub fn computer_name(&self, ordinal: usize) -> String {
        self.computer_names
            .get(ordinal)
            .cloned()
            .unwrap_or_else(|| format!("Computer {}", ordinal + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::weapon::classic_catalog;
    use std::io::Write;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = GameConfig::default();
        assert_eq!(config.storage_key, "rockItGameState");
        assert_eq!(config.delivery_delay_ms, DelayRange { min: 600, max: 1100 });
        assert_eq!(config.weapon_catalog(), classic_catalog());
        assert_eq!(config.power_table().unwrap(), PowerTable::classic());
        assert_eq!(config.computer_name(0), "Angry Computer");
        assert_eq!(config.computer_name(1), "Happy Computer");
        assert_eq!(config.computer_name(2), "Computer 3");
    }

    #[test]
    fn delay_sample_stays_in_bounds() {
        let range = DelayRange { min: 600, max: 1100 };
        assert_eq!(range.sample(|_| 0), Duration::from_millis(600));
        assert_eq!(range.sample(|span| span - 1), Duration::from_millis(1100));
        assert_eq!(range.sample(|_| 10_000), Duration::from_millis(1100));
        assert_eq!(DelayRange::fixed(0).sample(|_| 0), Duration::ZERO);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "delivery_delay_ms": {{ "min": 0, "max": 50 }} }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.delivery_delay_ms, DelayRange { min: 0, max: 50 });
        assert_eq!(config.storage_key, "rockItGameState");
        assert_eq!(config.weapons.len(), 3);
    }

    #[test]
    fn unreadable_and_invalid_files_are_errors() {
        assert!(matches!(
            GameConfig::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::Read { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ nope").unwrap();
        assert!(matches!(
            GameConfig::from_json_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
