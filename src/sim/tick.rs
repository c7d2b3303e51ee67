//! Per-frame simulation step
//!
//! One call to [`tick`] advances the whole world by one rendered frame, in a
//! fixed order: difficulty, player orbit/aim, firing, spawn timers, then the
//! entity/collision pass. Later steps see the player's position for *this*
//! frame, not the previous one.

use glam::Vec3;

use super::collision::{bullet_escaped, enemy_hits_sun, sun_absorbs, within_range};
use super::state::{GameState, difficulty_for_score, enemy_spawn_interval_ms};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Input sampled by the windowing collaborator, read once per frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Speed the orbit up (counter-clockwise)
    pub orbit_ccw: bool,
    /// Slow the orbit down / push clockwise
    pub orbit_cw: bool,
    /// Move toward the sun
    pub dive: bool,
    /// Move away from the sun
    pub climb: bool,
    /// Keyboard fire control
    pub fire_key: bool,
    /// Pointer fire control
    pub fire_pointer: bool,
    /// Ground-plane aim point from the camera collaborator's unprojection;
    /// `None` when the pointer ray misses the plane
    pub aim: Option<Vec3>,
    /// Demo mode: the sim synthesizes its own input
    pub autopilot: bool,
}

/// Advance the game by one frame.
///
/// `now_ms` is the caller's wall clock in milliseconds; the sim never reads
/// a clock itself. Outside the playing phase only the camera shake decays.
pub fn tick(state: &mut GameState, input: &FrameInput, now_ms: f64) {
    // Shake runs down every frame, playing or not.
    state.shake *= SHAKE_DECAY;
    if state.shake < 0.1 {
        state.shake = 0.0;
    }

    if !state.is_playing() {
        return;
    }

    let input = if input.autopilot {
        autopilot(state)
    } else {
        input.clone()
    };

    // Difficulty follows score.
    state.difficulty = difficulty_for_score(state.score);

    // Orbit integration, hard-clamped to the legal annulus.
    let mut orbit_mod = 0.0;
    if input.orbit_ccw {
        orbit_mod += ORBIT_INPUT_SPEED;
    }
    if input.orbit_cw {
        orbit_mod -= ORBIT_INPUT_SPEED;
    }
    let mut radial = 0.0;
    if input.dive {
        radial -= 1.0;
    }
    if input.climb {
        radial += 1.0;
    }
    let player = &mut state.player;
    player.orbit_angle += PLAYER_ORBIT_SPEED + orbit_mod;
    player.orbit_radius = (player.orbit_radius + radial * PLAYER_ACCEL_RADIUS)
        .clamp(SUN_RADIUS + ORBIT_MIN_MARGIN, ARENA_SIZE * 1.5);
    player.pos = polar_to_cartesian(player.orbit_radius, player.orbit_angle);

    state.heat_warning = state.player.orbit_radius < SUN_RADIUS + HEAT_WARNING_MARGIN;

    // Aiming is horizontal-only; a missing target keeps the previous facing.
    if let Some(target) = input.aim {
        let target = Vec3::new(target.x, state.player.pos.y, target.z);
        let dir = (target - state.player.pos).normalize_or_zero();
        if dir != Vec3::ZERO {
            state.player.facing = dir;
        }
    }

    // Rapid fire expires against the frame clock; there is no deferred timer
    // to cancel, so a reset can never resurrect a stale expiry.
    if state.active.rapid_fire && now_ms >= state.rapid_fire_until_ms {
        state.active.rapid_fire = false;
        log::debug!("rapid fire expired");
    }

    // Firing.
    let cooldown = if state.active.rapid_fire {
        BULLET_COOLDOWN_MS / RAPID_FIRE_FACTOR
    } else {
        BULLET_COOLDOWN_MS
    };
    if (input.fire_key || input.fire_pointer) && now_ms - state.last_shot_ms > cooldown {
        state.fire_bullet();
        state.last_shot_ms = now_ms;
    }

    // Spawn timers.
    if now_ms - state.last_enemy_spawn_ms > enemy_spawn_interval_ms(state.difficulty) {
        state.spawn_enemy();
        state.last_enemy_spawn_ms = now_ms;
    }
    if now_ms - state.last_powerup_ms > POWERUP_SPAWN_RATE_MS {
        // The timestamp resets whether or not the roll spawns anything, so
        // the effective rate sits below the nominal interval. Intentional;
        // do not move the reset inside the branch.
        if state.roll() > POWERUP_SKIP_CHANCE {
            state.spawn_powerup();
        }
        state.last_powerup_ms = now_ms;
    }

    update_entities(state, now_ms);
}

/// Advance bullets, power-ups, enemies, then particles, resolving collisions
/// in place. Reverse-index iteration keeps mid-loop removal safe without
/// skipping or double-visiting. A fatal player hit returns immediately:
/// nothing else advances that frame.
fn update_entities(state: &mut GameState, now_ms: f64) {
    // Bullets fly straight until they leave the field or graze the sun.
    // The sun absorbs them silently: no explosion, no score.
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet = &mut state.bullets[i];
        bullet.pos += bullet.vel;
        if bullet_escaped(bullet.pos) || sun_absorbs(bullet.pos) {
            state.bullets.remove(i);
        }
    }

    // Power-ups spin in place until the player sweeps one up.
    let mut i = state.powerups.len();
    while i > 0 {
        i -= 1;
        state.powerups[i].spin += state.powerups[i].spin_speed;
        if within_range(state.powerups[i].pos, state.player.pos, PICKUP_RANGE) {
            let powerup = state.powerups.remove(i);
            state.activate_powerup(powerup.kind, now_ms);
            state.spawn_explosion(powerup.pos, powerup.kind.color(), 5);
        }
    }

    // Enemies steer toward where the player is *this* frame.
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;

        let enemy_pos = {
            let player_pos = state.player.pos;
            let difficulty = state.difficulty;
            let enemy = &mut state.enemies[i];
            let dir = (player_pos - enemy.pos).normalize_or_zero();
            // The additive term keeps a nonzero closing speed regardless of
            // difficulty.
            let speed = ENEMY_SPEED * 0.15 * difficulty + 0.15;
            enemy.pos += dir * speed;
            enemy.yaw = dir.z.atan2(dir.x);
            enemy.spin += enemy.spin_speed;
            enemy.pos
        };

        if enemy_hits_sun(enemy_pos) {
            state.enemies.remove(i);
            state.spawn_explosion(enemy_pos, colors::SUN, 8);
            state.shake = 0.5;
            continue;
        }

        if within_range(enemy_pos, state.player.pos, ENEMY_HIT_RANGE) {
            if state.active.shield {
                state.active.shield = false;
                state.enemies.remove(i);
                state.spawn_explosion(enemy_pos, colors::SHIELD, 15);
                state.shake = 2.0;
                log::debug!("shield absorbed a hit");
            } else {
                let player_pos = state.player.pos;
                state.spawn_explosion(player_pos, colors::PLAYER, 20);
                state.end_game();
                // Fatal: the frame ends here.
                return;
            }
            continue;
        }

        // First bullet found in range kills; the scan stops for this enemy.
        let mut j = state.bullets.len();
        while j > 0 {
            j -= 1;
            if within_range(state.bullets[j].pos, enemy_pos, BULLET_HIT_RANGE) {
                state.enemies.remove(i);
                state.bullets.remove(j);
                state.spawn_explosion(enemy_pos, colors::ENEMY, 10);
                state.shake = 0.8;
                state.score += KILL_SCORE;
                break;
            }
        }
    }

    // Particles fade out and shrink.
    let mut i = state.particles.len();
    while i > 0 {
        i -= 1;
        let particle = &mut state.particles[i];
        particle.pos += particle.vel;
        particle.opacity -= PARTICLE_FADE;
        particle.scale *= PARTICLE_SHRINK;
        if particle.opacity <= 0.0 {
            state.particles.remove(i);
        }
    }

    // Final check: the sun itself.
    if state.player.orbit_radius < SUN_RADIUS + SUN_KILL_MARGIN {
        if state.active.shield {
            // The shield flings the craft back outward.
            state.player.orbit_radius += SHIELD_BOUNCE;
            state.active.shield = false;
            state.shake = 5.0;
        } else {
            let player_pos = state.player.pos;
            state.spawn_explosion(player_pos, colors::SUN, 30);
            state.end_game();
        }
    }
}

/// Synthesized input for demo and soak runs: aim at the nearest enemy, fire
/// while anything is alive, and keep the orbit out of the heat zone.
fn autopilot(state: &GameState) -> FrameInput {
    let nearest = state.enemies.iter().min_by(|a, b| {
        let da = a.pos.distance_squared(state.player.pos);
        let db = b.pos.distance_squared(state.player.pos);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    let climb = state.heat_warning || state.player.orbit_radius < PLAYER_ORBIT_RADIUS - 10.0;
    let dive = !climb && state.player.orbit_radius > PLAYER_ORBIT_RADIUS + 10.0;

    FrameInput {
        orbit_ccw: true,
        dive,
        climb,
        fire_key: nearest.is_some(),
        aim: nearest.map(|e| e.pos),
        ..FrameInput::default()
    }
}
