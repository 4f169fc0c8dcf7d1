//! Weapons and the weapon catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// WeaponKind は武器の種類
///
/// 種類の集合は設定（`GameConfig::weapons`）で拡張できるため、enum ではなく
/// 文字列の newtype として表現します。標準の 3 種は定数で提供します。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponKind(String);

impl WeaponKind {
    pub const ROCK: &'static str = "ROCK";
    pub const PAPER: &'static str = "PAPER";
    pub const SCISSORS: &'static str = "SCISSORS";

    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn rock() -> Self {
        Self::new(Self::ROCK)
    }

    pub fn paper() -> Self {
        Self::new(Self::PAPER)
    }

    pub fn scissors() -> Self {
        Self::new(Self::SCISSORS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weapon is an immutable `(kind, icon)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub icon: String,
}

impl Weapon {
    pub fn new(kind: WeaponKind, icon: impl Into<String>) -> Self {
        Self {
            kind,
            icon: icon.into(),
        }
    }

    pub fn rock() -> Self {
        Self::new(WeaponKind::rock(), "✊")
    }

    pub fn paper() -> Self {
        Self::new(WeaponKind::paper(), "✋")
    }

    pub fn scissors() -> Self {
        Self::new(WeaponKind::scissors(), "✌️")
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.kind)
    }
}

/// 標準の武器カタログ（表示順 = 挿入順）
pub fn classic_catalog() -> Vec<Weapon> {
    vec![Weapon::rock(), Weapon::paper(), Weapon::scissors()]
}

/// カタログから種類で武器を探す（大文字小文字は区別しない）
pub fn find_weapon<'a>(catalog: &'a [Weapon], kind: &str) -> Option<&'a Weapon> {
    catalog
        .iter()
        .find(|weapon| weapon.kind.as_str().eq_ignore_ascii_case(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_catalog_keeps_display_order() {
        let kinds: Vec<_> = classic_catalog()
            .into_iter()
            .map(|weapon| weapon.kind.to_string())
            .collect();
        assert_eq!(kinds, vec!["ROCK", "PAPER", "SCISSORS"]);
    }

    #[test]
    fn find_weapon_ignores_case() {
        let catalog = classic_catalog();
        assert_eq!(find_weapon(&catalog, "paper"), Some(&Weapon::paper()));
        assert_eq!(find_weapon(&catalog, "lizard"), None);
    }
}
