//! Cookie Raccoon - a side-scrolling raccoon platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `render`: Canvas2D rendering (camera, themes, entities)
//! - `audio`: Procedural Web Audio sound effects
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical canvas size
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 400.0;

    /// Gravity (px/s², downward)
    pub const GRAVITY: f32 = 1800.0;
    /// Jump launch velocity (px/s, negative is up)
    pub const JUMP_SPEED: f32 = -720.0;
    /// Horizontal run speed (px/s)
    pub const MOVE_SPEED: f32 = 300.0;
    /// Vertical speed while flying (px/s)
    pub const FLY_SPEED: f32 = 300.0;
    /// Horizontal damping per tick with no direction held
    pub const GROUND_FRICTION: f32 = 0.8;
    /// Vertical damping per tick while hovering in fly mode
    pub const FLY_DAMPING: f32 = 0.9;

    /// Entity sizes (square hitboxes)
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const SKUNK_SIZE: f32 = 35.0;
    pub const POWERUP_SIZE: f32 = 30.0;

    /// Player spawn point (every level)
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y: f32 = 200.0;

    /// Skunk patrol speed (px/s)
    pub const SKUNK_SPEED: f32 = 60.0;
    /// Vertical tolerance for the patrol "standing on platform" test
    pub const PATROL_FOOT_TOLERANCE: f32 = 5.0;

    /// Tsunami wave projectile
    pub const WAVE_WIDTH: f32 = 20.0;
    pub const WAVE_HEIGHT: f32 = 60.0;
    pub const WAVE_SPEED: f32 = 480.0;
    pub const WAVE_LIFETIME_TICKS: u32 = 60;

    /// Power-up effect duration (10 seconds at 60 Hz)
    pub const POWERUP_DURATION_TICKS: u32 = 600;
    /// Earthquake blast range (horizontal, px)
    pub const QUAKE_RANGE: f32 = 300.0;
    /// Screen shake magnitude set by an earthquake (px)
    pub const QUAKE_SHAKE: f32 = 30.0;

    /// Scoring
    pub const STOMP_SCORE: u64 = 50;
    pub const BLAST_SCORE: u64 = 100;

    /// Enemy defeat animation length (ticks)
    pub const DEFEAT_ANIM_TICKS: u32 = 30;
    /// Flag raise animation length (ticks)
    pub const FLAG_RAISE_TICKS: u32 = 30;
    /// Delay between touching the flag and the level-complete card (1.5 s)
    pub const FLAG_PAUSE_TICKS: u32 = 90;
    /// How long the level-complete card is shown (2 s)
    pub const LEVEL_CARD_TICKS: u32 = 120;

    pub const STARTING_LIVES: u8 = 3;
    pub const LEVEL_COUNT: u32 = 3;
}
