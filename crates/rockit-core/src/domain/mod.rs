//! Domain model (weapons, players, game state, decisions, saved games).

pub mod ids;
pub mod weapon;
pub mod player;
pub mod state;
pub mod decision;
pub mod saved;
pub mod errors;

pub use self::ids::ComputerId;
pub use self::weapon::{Weapon, WeaponKind, classic_catalog, find_weapon};
pub use self::player::{Player, PlayerKind};
pub use self::state::{GameMode, GamePhase, GameState, WinnerBoard, TIE_MESSAGE, WIN_MESSAGE};
pub use self::decision::{DecisionEngine, PowerTable};
pub use self::saved::{SavedGame, SavedPlayer, SnapshotError, DEFAULT_STORAGE_KEY};
pub use self::errors::{DecisionError, GameError};
