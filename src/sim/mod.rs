//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{at_patrol_edge, is_stomp, resolve_landing};
pub use level::{Level, LevelDef, LEVELS};
pub use state::{
    DefeatCause, DefeatState, Flag, GameEvent, GamePhase, GameState, Player, PowerUp, PowerUpKind,
    Skunk, Theme, Wave,
};
pub use tick::{tick, TickInput};
