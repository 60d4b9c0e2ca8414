//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call per
//! 60 Hz tick; the shell owns the accumulator.

use glam::Vec2;
use rand::Rng;

use super::aabb::Aabb;
use super::collision::{at_patrol_edge, is_stomp, resolve_landing};
use super::state::{
    DefeatCause, DefeatState, GameEvent, GamePhase, GameState, PowerUpKind, Wave,
};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Jump (held is fine; only acts when grounded)
    pub jump: bool,
    /// One-shot: trigger the held power-up
    pub use_power: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::GameOver | GamePhase::GameComplete => return,
        GamePhase::LevelComplete { ticks } => {
            // Card timer; the world is frozen underneath it
            if ticks > 1 {
                state.phase = GamePhase::LevelComplete { ticks: ticks - 1 };
            } else if state.level_index + 1 >= LEVEL_COUNT {
                state.phase = GamePhase::GameComplete;
                state.push_event(GameEvent::GameComplete);
            } else {
                let next = state.level_index + 1;
                state.load_level(next);
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    decay_screen_shake(state);
    update_player(state, input, dt);
    if state.phase != GamePhase::Playing {
        return; // died in a pit with no lives left
    }

    update_waves(state, dt);
    update_skunks(state, dt);
    resolve_player_contacts(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    collect_power_ups(state);
    if input.use_power {
        use_power_up(state);
    }
    age_defeated_skunks(state);
    update_flag(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Per-tick exponential shake decay, plus the jitter the renderer applies
fn decay_screen_shake(state: &mut GameState) {
    state.screen_shake *= 0.9;
    if state.screen_shake < 1.0 {
        state.screen_shake = 0.0;
        state.shake_offset = Vec2::ZERO;
    } else {
        let jx: f32 = state.rng.random::<f32>() - 0.5;
        let jy: f32 = state.rng.random::<f32>() - 0.5;
        state.shake_offset = Vec2::new(jx, jy) * state.screen_shake;
    }
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let flying = state.player.fly_mode && state.player.power_up == Some(PowerUpKind::Fly);

    // Horizontal movement
    if input.left {
        state.player.vel.x = -MOVE_SPEED;
    } else if input.right {
        state.player.vel.x = MOVE_SPEED;
    } else {
        state.player.vel.x *= GROUND_FRICTION;
    }

    // Vertical movement
    if flying {
        if input.up {
            state.player.vel.y = -FLY_SPEED;
        } else if input.down {
            state.player.vel.y = FLY_SPEED;
        } else {
            state.player.vel.y *= FLY_DAMPING;
        }
    } else {
        if input.jump && state.player.on_ground {
            state.player.vel.y = JUMP_SPEED;
            state.player.on_ground = false;
            state.push_event(GameEvent::Jump);
        }
        state.player.vel.y += GRAVITY * dt;
    }

    state.player.pos += state.player.vel * dt;

    // Keep inside the level horizontally
    state.player.pos.x = state.player.pos.x.clamp(0.0, state.level.width - PLAYER_SIZE);

    // One-way platform landings
    state.player.on_ground = false;
    for i in 0..state.level.platforms.len() {
        let platform = state.level.platforms[i];
        let hitbox = state.player.hitbox();
        if let Some(y) = resolve_landing(&hitbox, state.player.vel.y, &platform) {
            state.player.pos.y = y;
            state.player.vel.y = 0.0;
            state.player.on_ground = true;
        }
    }

    // Fell into a pit
    if state.player.pos.y > VIEW_HEIGHT {
        kill_player(state);
        if state.phase != GamePhase::Playing {
            return;
        }
    }

    // Power-up expiry
    if state.player.power_timer > 0 {
        state.player.power_timer -= 1;
        if state.player.power_timer == 0 {
            let was_flying = state.player.fly_mode;
            state.player.power_up = None;
            state.player.fly_mode = false;
            state.push_event(GameEvent::PowerUpExpired);
            if was_flying {
                state.push_event(GameEvent::FlyStopped);
            }
        }
    }

    // Camera follows, clamped to the level
    state.camera_x =
        (state.player.pos.x - VIEW_WIDTH / 2.0).clamp(0.0, state.level.width - VIEW_WIDTH);
}

/// Lose a life and respawn, or end the run
fn kill_player(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    if state.player.fly_mode {
        state.push_event(GameEvent::FlyStopped);
    }
    state.push_event(GameEvent::PlayerDied);
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver);
    } else {
        state.player.reset_to_spawn();
    }
}

fn update_waves(state: &mut GameState, dt: f32) {
    for wave in &mut state.waves {
        wave.rect.x += WAVE_SPEED * dt;
        wave.lifetime = wave.lifetime.saturating_sub(1);
    }
    state.waves.retain(|w| w.lifetime > 0);

    // Wave fronts sweep any skunk whose span they enter
    let fronts: Vec<f32> = state.waves.iter().map(|w| w.rect.x).collect();
    for i in 0..state.skunks.len() {
        if !state.skunks[i].alive() {
            continue;
        }
        if fronts.iter().any(|&x| state.skunks[i].rect.spans_x(x)) {
            state.skunks[i].defeat = DefeatState::Swept { ticks: 0 };
            state.score += BLAST_SCORE;
            state.push_event(GameEvent::EnemyDefeated {
                cause: DefeatCause::Tsunami,
            });
        }
    }
}

fn update_skunks(state: &mut GameState, dt: f32) {
    for skunk in &mut state.skunks {
        if !skunk.alive() {
            continue;
        }
        skunk.rect.x += skunk.vel_x * dt;
        for platform in &state.level.platforms {
            if at_patrol_edge(&skunk.rect, platform) {
                skunk.vel_x = -skunk.vel_x;
                break;
            }
        }
    }
}

/// Player touching a live skunk: stomp from above, otherwise lose a life
fn resolve_player_contacts(state: &mut GameState) {
    for i in 0..state.skunks.len() {
        if !state.skunks[i].alive() {
            continue;
        }
        let hitbox = state.player.hitbox();
        if !hitbox.overlaps(&state.skunks[i].rect) {
            continue;
        }
        if is_stomp(&hitbox, state.player.vel.y, &state.skunks[i].rect) {
            state.skunks[i].defeat = DefeatState::Stomped;
            state.player.vel.y = JUMP_SPEED / 2.0;
            state.score += STOMP_SCORE;
            state.push_event(GameEvent::EnemyDefeated {
                cause: DefeatCause::Stomp,
            });
        } else {
            kill_player(state);
            return;
        }
    }
}

fn collect_power_ups(state: &mut GameState) {
    for i in 0..state.power_ups.len() {
        if state.power_ups[i].collected {
            continue;
        }
        let hitbox = state.player.hitbox();
        if !hitbox.overlaps(&state.power_ups[i].rect) {
            continue;
        }
        let kind = state.power_ups[i].kind;
        state.power_ups[i].collected = true;

        // Picking up a different power-up while flying lands the raccoon
        if state.player.fly_mode && kind != PowerUpKind::Fly {
            state.player.fly_mode = false;
            state.push_event(GameEvent::FlyStopped);
        }

        state.player.power_up = Some(kind);
        state.player.power_timer = POWERUP_DURATION_TICKS;
        state.push_event(GameEvent::PowerUpCollected(kind));

        // Fly activates on pickup
        if kind == PowerUpKind::Fly && !state.player.fly_mode {
            state.player.fly_mode = true;
            state.player.vel.y = -FLY_SPEED;
            state.push_event(GameEvent::FlyStarted);
        }
    }
}

/// Trigger the held power-up. Holding it does not consume it; the timer does.
fn use_power_up(state: &mut GameState) {
    let Some(kind) = state.player.power_up else {
        return;
    };
    match kind {
        PowerUpKind::Earthquake => {
            state.screen_shake = QUAKE_SHAKE;
            state.push_event(GameEvent::Earthquake);
            let px = state.player.pos.x;
            for i in 0..state.skunks.len() {
                if state.skunks[i].alive() && (state.skunks[i].rect.x - px).abs() < QUAKE_RANGE {
                    state.skunks[i].defeat = DefeatState::Shaken { ticks: 0 };
                    state.score += BLAST_SCORE;
                    state.push_event(GameEvent::EnemyDefeated {
                        cause: DefeatCause::Earthquake,
                    });
                }
            }
        }
        PowerUpKind::Fly => {
            if !state.player.fly_mode {
                state.player.fly_mode = true;
                state.player.vel.y = -FLY_SPEED;
                state.push_event(GameEvent::FlyStarted);
            }
        }
        PowerUpKind::Tsunami => {
            state.push_event(GameEvent::Tsunami);
            let id = state.next_entity_id();
            let hitbox = state.player.hitbox();
            state.waves.push(Wave {
                id,
                rect: Aabb::new(hitbox.right(), state.player.pos.y, WAVE_WIDTH, WAVE_HEIGHT),
                lifetime: WAVE_LIFETIME_TICKS,
            });
        }
    }
}

/// Age defeat animations and drop finished skunks
fn age_defeated_skunks(state: &mut GameState) {
    for skunk in &mut state.skunks {
        match skunk.defeat {
            DefeatState::Shaken { ref mut ticks } | DefeatState::Swept { ref mut ticks } => {
                *ticks += 1;
            }
            _ => {}
        }
    }
    state.skunks.retain(|s| match s.defeat {
        DefeatState::Alive => true,
        DefeatState::Stomped => false,
        DefeatState::Shaken { ticks } | DefeatState::Swept { ticks } => ticks < DEFEAT_ANIM_TICKS,
    });
}

/// Flag touch, raise animation, and the timed hand-off to the level card
fn update_flag(state: &mut GameState) {
    if !state.flag.touched && state.player.hitbox().overlaps(&state.flag.zone()) {
        state.flag.touched = true;
        state.push_event(GameEvent::FlagReached);
    }
    if !state.flag.touched {
        return;
    }
    if state.flag.raise_ticks < FLAG_RAISE_TICKS {
        state.flag.raise_ticks += 1;
    }
    state.flag.pause_ticks += 1;
    if state.flag.pause_ticks >= FLAG_PAUSE_TICKS {
        state.phase = GamePhase::LevelComplete {
            ticks: LEVEL_CARD_TICKS,
        };
        state.push_event(GameEvent::LevelComplete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{PowerUp, Skunk};
    use proptest::prelude::*;

    fn run_ticks(state: &mut GameState, input: &TickInput, n: u32) {
        for _ in 0..n {
            tick(state, input, SIM_DT);
        }
    }

    /// Let the freshly spawned player fall onto the first platform
    fn settled_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        run_ticks(&mut state, &TickInput::default(), 60);
        assert!(state.player.on_ground);
        state.drain_events();
        state
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = settled_state(1);
        let ground_y = state.player.pos.y;

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(state.player.vel.y < 0.0);
        assert!(state.drain_events().contains(&GameEvent::Jump));

        // Mid-air jump does nothing
        tick(&mut state, &jump, SIM_DT);
        assert!(!state.drain_events().contains(&GameEvent::Jump));

        // And gravity brings the raccoon back down eventually
        run_ticks(&mut state, &TickInput::default(), 120);
        assert!(state.player.on_ground);
        assert!((state.player.pos.y - ground_y).abs() < 1.0);
    }

    #[test]
    fn test_pit_fall_costs_a_life() {
        let mut state = settled_state(2);
        state.player.pos = Vec2::new(320.0, VIEW_HEIGHT + 10.0);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.player.pos.x, SPAWN_X);
        assert!(state.drain_events().contains(&GameEvent::PlayerDied));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_on_last_life() {
        let mut state = settled_state(3);
        state.lives = 1;
        state.player.pos.y = VIEW_HEIGHT + 10.0;
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver));

        // Frozen after game over
        let ticks = state.time_ticks;
        run_ticks(&mut state, &TickInput::default(), 10);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_stomp_defeats_skunk() {
        let mut state = settled_state(4);
        state.skunks.clear();
        state.player.on_ground = false;
        state.player.vel.y = 200.0;
        state.player.pos.y -= 20.0;
        let id = state.next_entity_id();
        // Just below the falling player so the very next step makes contact
        state.skunks.push(Skunk {
            id,
            rect: Aabb::new(state.player.pos.x, state.player.pos.y + 40.0, SKUNK_SIZE, SKUNK_SIZE),
            vel_x: 0.0,
            defeat: DefeatState::Alive,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.skunks.is_empty()); // stomped skunks vanish immediately
        assert_eq!(state.score, STOMP_SCORE);
        assert!(state.player.vel.y < 0.0); // bounce
        assert!(state
            .drain_events()
            .contains(&GameEvent::EnemyDefeated { cause: DefeatCause::Stomp }));
    }

    #[test]
    fn test_side_contact_kills_player() {
        let mut state = settled_state(5);
        state.skunks.clear();
        let id = state.next_entity_id();
        // Level with the grounded player
        state.skunks.push(Skunk {
            id,
            rect: Aabb::new(
                state.player.pos.x + 30.0,
                state.player.pos.y + 5.0,
                SKUNK_SIZE,
                SKUNK_SIZE,
            ),
            vel_x: 0.0,
            defeat: DefeatState::Alive,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.skunks.len(), 1);
    }

    #[test]
    fn test_powerup_collect_and_expiry() {
        let mut state = settled_state(6);
        state.power_ups.clear();
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            rect: Aabb::new(state.player.pos.x, state.player.pos.y, POWERUP_SIZE, POWERUP_SIZE),
            kind: PowerUpKind::Earthquake,
            collected: false,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.power_up, Some(PowerUpKind::Earthquake));
        assert_eq!(state.player.power_timer, POWERUP_DURATION_TICKS);
        assert!(state
            .drain_events()
            .contains(&GameEvent::PowerUpCollected(PowerUpKind::Earthquake)));

        run_ticks(&mut state, &TickInput::default(), POWERUP_DURATION_TICKS);
        assert_eq!(state.player.power_up, None);
        assert!(state.drain_events().contains(&GameEvent::PowerUpExpired));
    }

    #[test]
    fn test_fly_activates_on_pickup() {
        let mut state = settled_state(7);
        state.power_ups.clear();
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            rect: Aabb::new(state.player.pos.x, state.player.pos.y, POWERUP_SIZE, POWERUP_SIZE),
            kind: PowerUpKind::Fly,
            collected: false,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.fly_mode);
        assert!(state.player.vel.y < 0.0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::FlyStarted));

        // Up input climbs, no gravity
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        let y0 = state.player.pos.y;
        run_ticks(&mut state, &up, 30);
        assert!(state.player.pos.y < y0);
    }

    #[test]
    fn test_earthquake_defeats_only_nearby() {
        let mut state = settled_state(8);
        state.skunks.clear();
        let near_id = state.next_entity_id();
        let far_id = state.next_entity_id();
        state.skunks.push(Skunk {
            id: near_id,
            rect: Aabb::new(state.player.pos.x + 200.0, 100.0, SKUNK_SIZE, SKUNK_SIZE),
            vel_x: 0.0,
            defeat: DefeatState::Alive,
        });
        state.skunks.push(Skunk {
            id: far_id,
            rect: Aabb::new(state.player.pos.x + 500.0, 100.0, SKUNK_SIZE, SKUNK_SIZE),
            vel_x: 0.0,
            defeat: DefeatState::Alive,
        });
        state.player.power_up = Some(PowerUpKind::Earthquake);
        state.player.power_timer = POWERUP_DURATION_TICKS;

        let input = TickInput {
            use_power: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        assert_eq!(state.screen_shake, QUAKE_SHAKE);
        assert_eq!(state.score, BLAST_SCORE);
        let near = state.skunks.iter().find(|s| s.id == near_id).unwrap();
        let far = state.skunks.iter().find(|s| s.id == far_id).unwrap();
        assert!(matches!(near.defeat, DefeatState::Shaken { .. }));
        assert!(far.alive());

        // Animation finishes and the victim disappears
        run_ticks(&mut state, &TickInput::default(), DEFEAT_ANIM_TICKS);
        assert!(state.skunks.iter().all(|s| s.id != near_id));
    }

    #[test]
    fn test_tsunami_wave_sweeps_ahead() {
        let mut state = settled_state(9);
        state.skunks.clear();
        let id = state.next_entity_id();
        state.skunks.push(Skunk {
            id,
            rect: Aabb::new(state.player.pos.x + 150.0, 100.0, SKUNK_SIZE, SKUNK_SIZE),
            vel_x: 0.0,
            defeat: DefeatState::Alive,
        });
        state.player.power_up = Some(PowerUpKind::Tsunami);
        state.player.power_timer = POWERUP_DURATION_TICKS;

        let input = TickInput {
            use_power: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.waves.len(), 1);
        state.drain_events();

        // The wave (480 px/s) reaches the skunk well within its lifetime
        run_ticks(&mut state, &TickInput::default(), 30);
        assert_eq!(state.score, BLAST_SCORE);
        assert!(state
            .drain_events()
            .contains(&GameEvent::EnemyDefeated { cause: DefeatCause::Tsunami }));

        // Waves dissipate
        run_ticks(&mut state, &TickInput::default(), WAVE_LIFETIME_TICKS);
        assert!(state.waves.is_empty());
    }

    #[test]
    fn test_flag_sequence_advances_level() {
        let mut state = settled_state(10);
        state.score = 250;
        state.skunks.clear(); // don't let a patrol interfere
        state.player.pos = Vec2::new(state.flag.pos.x + 10.0, state.flag.pos.y + 50.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.flag.touched);
        assert!(state.drain_events().contains(&GameEvent::FlagReached));

        // 1.5 s pause (raise included) before the card
        run_ticks(&mut state, &TickInput::default(), FLAG_PAUSE_TICKS);
        assert!(matches!(state.phase, GamePhase::LevelComplete { .. }));
        assert_eq!(state.flag.raise_ticks, FLAG_RAISE_TICKS);
        assert!(state.drain_events().contains(&GameEvent::LevelComplete));

        // 2 s card, then the next level loads with score and lives intact
        run_ticks(&mut state, &TickInput::default(), LEVEL_CARD_TICKS);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 250);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(!state.flag.touched);
    }

    #[test]
    fn test_final_flag_completes_game() {
        let mut state = settled_state(11);
        state.load_level(2);
        state.skunks.clear();
        state.player.pos = Vec2::new(state.flag.pos.x + 10.0, state.flag.pos.y + 50.0);

        run_ticks(
            &mut state,
            &TickInput::default(),
            FLAG_PAUSE_TICKS + LEVEL_CARD_TICKS + 2,
        );
        assert_eq!(state.phase, GamePhase::GameComplete);
        assert!(state.drain_events().contains(&GameEvent::GameComplete));
    }

    #[test]
    fn test_patrol_reverses_at_edge() {
        let mut state = settled_state(12);
        state.skunks.clear();
        let id = state.next_entity_id();
        // On the first platform (x 0..300, top 350), walking left near the edge
        state.skunks.push(Skunk {
            id,
            rect: Aabb::new(5.0, 315.0, SKUNK_SIZE, SKUNK_SIZE),
            vel_x: -SKUNK_SPEED,
            defeat: DefeatState::Alive,
        });
        // Keep the player well away
        state.player.pos = Vec2::new(600.0, 100.0);

        run_ticks(&mut state, &TickInput::default(), 30);
        let skunk = &state.skunks[0];
        assert!(skunk.vel_x > 0.0, "skunk should have turned around");
        assert!(skunk.rect.x >= 0.0);
    }

    #[test]
    fn test_determinism() {
        let script = [
            TickInput { right: true, ..Default::default() },
            TickInput { right: true, jump: true, ..Default::default() },
            TickInput::default(),
            TickInput { left: true, ..Default::default() },
            TickInput { use_power: true, ..Default::default() },
        ];

        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        for _ in 0..60 {
            for input in &script {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.shake_offset, b.shake_offset);
        assert_eq!(a.skunks.len(), b.skunks.len());
    }

    proptest! {
        /// The camera never shows anything outside the level.
        #[test]
        fn camera_stays_in_bounds(x in -100.0_f32..3000.0) {
            let mut state = GameState::new(0);
            state.player.pos.x = x;
            tick(&mut state, &TickInput::default(), SIM_DT);
            prop_assert!(state.camera_x >= 0.0);
            prop_assert!(state.camera_x <= state.level.width - VIEW_WIDTH);
        }
    }
}
