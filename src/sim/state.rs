//! Game state and core simulation types
//!
//! Everything the renderer, audio, and HUD read lives here. The whole state
//! is serializable for debugging and determinism checks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::level::{Level, LEVELS};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (includes the flag-raise pause at level end)
    Playing,
    /// Level-complete card is showing; counts down to the next level
    LevelComplete { ticks: u32 },
    /// Out of lives
    GameOver,
    /// Third flag reached - the run is won
    GameComplete,
}

/// Cosmetic level theme, consumed only by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Grass,
    Snow,
    Ice,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Defeats every skunk within horizontal blast range
    Earthquake,
    /// Free vertical movement until the timer runs out
    Fly,
    /// Launches a wave projectile that sweeps skunks away
    Tsunami,
}

impl PowerUpKind {
    /// Pickup/HUD color
    pub fn css_color(&self) -> &'static str {
        match self {
            PowerUpKind::Earthquake => "#00FF00",
            PowerUpKind::Fly => "#FF69B4",
            PowerUpKind::Tsunami => "#0000FF",
        }
    }

    /// Single-letter glyph drawn on the pickup
    pub fn glyph(&self) -> &'static str {
        match self {
            PowerUpKind::Earthquake => "E",
            PowerUpKind::Fly => "F",
            PowerUpKind::Tsunami => "T",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Earthquake => "earthquake",
            PowerUpKind::Fly => "fly",
            PowerUpKind::Tsunami => "tsunami",
        }
    }
}

/// What defeated a skunk (drives scoring, animation, and audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatCause {
    Stomp,
    Earthquake,
    Tsunami,
}

/// Skunk defeat/animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatState {
    Alive,
    /// Stomped from above - removed immediately
    Stomped,
    /// Earthquake victim - bounces in place for the animation
    Shaken { ticks: u32 },
    /// Tsunami victim - flies off-screen, fading
    Swept { ticks: u32 },
}

/// Gameplay events for external sinks (audio cues, HUD refresh).
/// Drained once per frame; they never feed back into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    EnemyDefeated { cause: DefeatCause },
    PlayerDied,
    PowerUpCollected(PowerUpKind),
    PowerUpExpired,
    Earthquake,
    Tsunami,
    FlyStarted,
    FlyStopped,
    FlagReached,
    LevelComplete,
    GameOver,
    GameComplete,
}

/// The player-controlled raccoon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Held power-up (None after expiry or death)
    pub power_up: Option<PowerUpKind>,
    /// Ticks remaining on the held power-up
    pub power_timer: u32,
    /// Fly power-up is actively steering vertical movement
    pub fly_mode: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SPAWN_X, SPAWN_Y),
            vel: Vec2::ZERO,
            on_ground: false,
            power_up: None,
            power_timer: 0,
            fly_mode: false,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_pos(self.pos, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Reset to the spawn point, dropping any held power-up
    pub fn reset_to_spawn(&mut self) {
        self.pos = Vec2::new(SPAWN_X, SPAWN_Y);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.power_up = None;
        self.power_timer = 0;
        self.fly_mode = false;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A patrolling skunk enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skunk {
    pub id: u32,
    pub rect: Aabb,
    /// Patrol velocity (px/s, sign is direction)
    pub vel_x: f32,
    pub defeat: DefeatState,
}

impl Skunk {
    pub fn alive(&self) -> bool {
        self.defeat == DefeatState::Alive
    }
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub rect: Aabb,
    pub kind: PowerUpKind,
    pub collected: bool,
}

/// The goal flag at the end of each level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    /// Top-left of the pole zone
    pub pos: Vec2,
    pub touched: bool,
    /// Flag raise animation progress (0..=FLAG_RAISE_TICKS)
    pub raise_ticks: u32,
    /// Ticks since touch, counting toward the level-complete card
    pub pause_ticks: u32,
}

impl Flag {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            touched: false,
            raise_ticks: 0,
            pause_ticks: 0,
        }
    }

    /// Collision zone covering the pole area
    pub fn zone(&self) -> Aabb {
        Aabb::from_pos(self.pos, 60.0, 160.0)
    }

    /// Raise animation fraction for rendering (0.0 = down, 1.0 = up)
    pub fn raise_fraction(&self) -> f32 {
        self.raise_ticks as f32 / FLAG_RAISE_TICKS as f32
    }
}

/// A tsunami wave projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wave {
    pub id: u32,
    pub rect: Aabb,
    /// Ticks remaining before the wave dissipates
    pub lifetime: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG (screen shake jitter only)
    pub rng: Pcg32,
    /// Current level index (0-based)
    pub level_index: u32,
    /// Instantiated level geometry
    pub level: Level,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Camera scroll (px, clamped to level bounds)
    pub camera_x: f32,
    /// Screen shake magnitude (px, decays each tick)
    pub screen_shake: f32,
    /// Current shake displacement applied by the renderer
    pub shake_offset: Vec2,
    pub player: Player,
    pub skunks: Vec<Skunk>,
    pub power_ups: Vec<PowerUp>,
    pub waves: Vec<Wave>,
    pub flag: Flag,
    /// Pending events for the shell (audio/HUD)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game at level 1 with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level_index: 0,
            level: LEVELS[0].instantiate(),
            score: 0,
            lives: STARTING_LIVES,
            phase: GamePhase::Playing,
            time_ticks: 0,
            camera_x: 0.0,
            screen_shake: 0.0,
            shake_offset: Vec2::ZERO,
            player: Player::new(),
            skunks: Vec::new(),
            power_ups: Vec::new(),
            waves: Vec::new(),
            flag: Flag::new(Vec2::ZERO),
            events: Vec::new(),
            next_id: 1,
        };
        state.load_level(0);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// (Re)populate entities for the given level and reset the run-through
    /// state. Score and lives are preserved.
    pub fn load_level(&mut self, index: u32) {
        let def = &LEVELS[index as usize];
        self.level_index = index;
        self.level = def.instantiate();

        self.skunks.clear();
        self.power_ups.clear();
        self.waves.clear();

        for &(x, y) in def.skunks {
            let id = self.next_entity_id();
            self.skunks.push(Skunk {
                id,
                rect: Aabb::new(x, y, SKUNK_SIZE, SKUNK_SIZE),
                vel_x: -SKUNK_SPEED,
                defeat: DefeatState::Alive,
            });
        }
        for &(x, y, kind) in def.power_ups {
            let id = self.next_entity_id();
            self.power_ups.push(PowerUp {
                id,
                rect: Aabb::new(x, y, POWERUP_SIZE, POWERUP_SIZE),
                kind,
                collected: false,
            });
        }

        self.flag = Flag::new(Vec2::new(def.width - 150.0, 230.0));
        self.player.reset_to_spawn();
        self.camera_x = 0.0;
        self.screen_shake = 0.0;
        self.shake_offset = Vec2::ZERO;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events (called once per frame by the shell)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.skunks.sort_by_key(|s| s.id);
        self.power_ups.sort_by_key(|p| p.id);
        self.waves.sort_by_key(|w| w.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_at_level_one() {
        let state = GameState::new(42);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.skunks.len(), 5);
        assert_eq!(state.power_ups.len(), 3);
        assert!(state.skunks.iter().all(|s| s.alive()));
    }

    #[test]
    fn test_load_level_preserves_score_and_lives() {
        let mut state = GameState::new(42);
        state.score = 350;
        state.lives = 2;
        state.load_level(1);

        assert_eq!(state.level_index, 1);
        assert_eq!(state.score, 350);
        assert_eq!(state.lives, 2);
        assert_eq!(state.skunks.len(), 6);
        assert_eq!(state.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(state.camera_x, 0.0);
    }

    #[test]
    fn test_flag_zone_position() {
        let state = GameState::new(1);
        let zone = state.flag.zone();
        assert_eq!(zone.x, state.level.width - 150.0);
        assert_eq!(zone.w, 60.0);
        assert_eq!(zone.h, 160.0);
    }

    #[test]
    fn test_entity_ids_unique() {
        let state = GameState::new(7);
        let mut ids: Vec<u32> = state
            .skunks
            .iter()
            .map(|s| s.id)
            .chain(state.power_ups.iter().map(|p| p.id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.skunks.len() + state.power_ups.len());
    }
}
