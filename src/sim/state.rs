//! Game state and core simulation types
//!
//! One `GameState` owns everything: the player, the per-kind entity
//! collections, the spawn/shot timers, and the seeded RNG. Entities are
//! never shared between collections; removal happens in-place during the
//! frame that detects it.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::polar_to_cartesian;

/// Current phase of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting on the start screen
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended by a fatal collision
    GameOver,
}

/// The player's craft, always on its orbit around the sun
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Orbit angle (radians)
    pub orbit_angle: f32,
    /// Distance from the sun's center
    pub orbit_radius: f32,
    /// Position derived from the orbit each frame (ground plane, y = 0)
    pub pos: Vec3,
    /// Horizontal unit aim direction; kept when unprojection yields no target
    pub facing: Vec3,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            orbit_angle: 0.0,
            orbit_radius: PLAYER_ORBIT_RADIUS,
            pos: polar_to_cartesian(PLAYER_ORBIT_RADIUS, 0.0),
            facing: Vec3::Z,
        }
    }
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec3,
    /// Displacement per frame (not time-scaled)
    pub vel: Vec3,
    /// Fired while rapid fire was active (renderer tints these)
    pub rapid: bool,
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec3,
    /// Yaw toward the player, refreshed as it steers
    pub yaw: f32,
    /// Accumulated self-rotation
    pub spin: f32,
    /// Per-instance rotation speed (radians per frame)
    pub spin_speed: f32,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    RapidFire,
    Shield,
}

impl PowerupKind {
    /// Color used for the pickup burst
    pub fn color(&self) -> u32 {
        match self {
            PowerupKind::RapidFire => colors::RAPID_FIRE,
            PowerupKind::Shield => colors::SHIELD,
        }
    }
}

/// A collectible power-up, spinning in place until picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec3,
    pub kind: PowerupKind,
    pub spin: f32,
    pub spin_speed: f32,
}

/// A short-lived explosion fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// RGB hex color
    pub color: u32,
    /// Fades by a fixed decrement per frame; removed at <= 0
    pub opacity: f32,
    /// Shrinks multiplicatively per frame
    pub scale: f32,
}

/// Currently active power-up effects
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActivePowerups {
    /// Absorbs one enemy hit or one sun graze, then drops
    pub shield: bool,
    /// Firing cooldown divided while active; expires on a timestamp
    pub rapid_fire: bool,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Difficulty multiplier, recomputed from score every frame
    pub difficulty: f32,
    /// Camera shake impulse for the presenter; decays every frame
    pub shake: f32,
    /// True while the player orbits inside the heat zone
    pub heat_warning: bool,

    /// Wall-clock timestamps (ms), compared against the caller's frame clock
    pub last_shot_ms: f64,
    pub last_enemy_spawn_ms: f64,
    pub last_powerup_ms: f64,
    /// Rapid fire expires when the frame clock passes this; latest pickup wins
    pub rapid_fire_until_ms: f64,

    pub player: Player,
    pub active: ActivePowerups,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,

    rng: Pcg32,
}

impl GameState {
    /// Create a fresh state in the idle phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            difficulty: 1.0,
            shake: 0.0,
            heat_warning: false,
            last_shot_ms: 0.0,
            last_enemy_spawn_ms: 0.0,
            last_powerup_ms: 0.0,
            rapid_fire_until_ms: 0.0,
            player: Player::default(),
            active: ActivePowerups::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a run: reinitialize the player and all run-scoped fields
    pub fn start(&mut self, now_ms: f64) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.difficulty = 1.0;
        self.heat_warning = false;
        self.last_shot_ms = 0.0;
        self.last_enemy_spawn_ms = now_ms;
        self.last_powerup_ms = now_ms;
        self.rapid_fire_until_ms = 0.0;
        self.player = Player::default();
        self.active = ActivePowerups::default();
        log::info!("run started (seed {})", self.seed);
    }

    /// Restart after game over: clear all transient entities and start anew
    pub fn reset(&mut self, now_ms: f64) {
        self.bullets.clear();
        self.enemies.clear();
        self.powerups.clear();
        self.particles.clear();
        self.start(now_ms);
    }

    /// End the run; the final score stays readable until reset
    pub fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!("game over, final score {}", self.score);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Fire a bullet from the player along its current facing
    pub fn fire_bullet(&mut self) {
        self.bullets.push(Bullet {
            pos: self.player.pos,
            vel: self.player.facing * BULLET_SPEED,
            rapid: self.active.rapid_fire,
        });
    }

    /// Spawn an enemy on the outer ring at a random angle
    pub fn spawn_enemy(&mut self) {
        let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
        self.enemies.push(Enemy {
            pos: polar_to_cartesian(ARENA_SIZE * 1.5, angle),
            yaw: 0.0,
            spin: 0.0,
            spin_speed: self.rng.random::<f32>() * 0.1 + 0.02,
        });
    }

    /// Spawn a power-up in the annulus just outside the sun
    pub fn spawn_powerup(&mut self) {
        let kind = if self.rng.random::<f32>() > 0.5 {
            PowerupKind::RapidFire
        } else {
            PowerupKind::Shield
        };
        let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
        let radius = SUN_RADIUS + 20.0 + self.rng.random::<f32>() * 60.0;
        self.powerups.push(Powerup {
            pos: polar_to_cartesian(radius, angle),
            kind,
            spin: 0.0,
            spin_speed: 0.05,
        });
    }

    /// Apply a picked-up power-up.
    ///
    /// Rapid fire replaces any pending expiry: a second pickup restarts the
    /// full duration from `now_ms` rather than stacking.
    pub fn activate_powerup(&mut self, kind: PowerupKind, now_ms: f64) {
        match kind {
            PowerupKind::Shield => {
                self.active.shield = true;
            }
            PowerupKind::RapidFire => {
                self.active.rapid_fire = true;
                self.rapid_fire_until_ms = now_ms + RAPID_FIRE_DURATION_MS;
            }
        }
        log::debug!("power-up {:?} active", kind);
    }

    /// Emit a burst of particles at `pos`
    pub fn spawn_explosion(&mut self, pos: Vec3, color: u32, count: usize) {
        for _ in 0..count {
            let dir = Vec3::new(
                self.rng.random::<f32>() - 0.5,
                self.rng.random::<f32>() - 0.5,
                self.rng.random::<f32>() - 0.5,
            )
            .normalize_or_zero();
            let dir = if dir == Vec3::ZERO { Vec3::Y } else { dir };
            let speed = self.rng.random::<f32>() * 0.8 + 0.2;
            self.particles.push(Particle {
                pos,
                vel: dir * speed,
                color,
                opacity: 1.0,
                scale: 1.0,
            });
        }
    }

    /// Random roll in [0, 1), used by the power-up spawn gate
    pub(crate) fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Difficulty multiplier for a given score: `1 + min(score / 5000, 1.5)`.
///
/// Monotonic non-decreasing, capped at 2.5.
#[inline]
pub fn difficulty_for_score(score: u64) -> f32 {
    1.0 + (score as f32 / DIFFICULTY_SCORE_SCALE).min(DIFFICULTY_MAX_BONUS)
}

/// Enemy spawn interval for a given difficulty, floored at 600 ms
#[inline]
pub fn enemy_spawn_interval_ms(difficulty: f32) -> f64 {
    (ENEMY_SPAWN_RATE_MS / difficulty as f64).max(ENEMY_SPAWN_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_curve() {
        assert_eq!(difficulty_for_score(0), 1.0);
        assert!((difficulty_for_score(2500) - 1.5).abs() < 1e-6);
        assert!((difficulty_for_score(7500) - 2.5).abs() < 1e-6);
        // Capped beyond 7500
        assert_eq!(difficulty_for_score(10_000), 2.5);
        assert_eq!(difficulty_for_score(u64::MAX / 2), 2.5);
    }

    #[test]
    fn test_difficulty_monotonic() {
        let mut prev = 0.0;
        for score in (0..20_000).step_by(250) {
            let d = difficulty_for_score(score);
            assert!(d >= prev);
            assert!((1.0..=2.5).contains(&d));
            prev = d;
        }
    }

    #[test]
    fn test_spawn_interval_shrinks_with_floor() {
        assert_eq!(enemy_spawn_interval_ms(1.0), 2000.0);
        let mut prev = f64::MAX;
        let mut d = 1.0;
        while d <= 4.0 {
            let interval = enemy_spawn_interval_ms(d);
            assert!(interval <= prev);
            assert!(interval >= 600.0);
            prev = interval;
            d += 0.1;
        }
        // Well past the cap the floor holds
        assert_eq!(enemy_spawn_interval_ms(10.0), 600.0);
    }

    #[test]
    fn test_rapid_fire_repickup_replaces_expiry() {
        let mut state = GameState::new(1);
        state.start(0.0);

        state.activate_powerup(PowerupKind::RapidFire, 0.0);
        assert!(state.active.rapid_fire);
        assert_eq!(state.rapid_fire_until_ms, 5000.0);

        // Second pickup at t=2000 restarts the window: expiry at 7000, not 5000+
        state.activate_powerup(PowerupKind::RapidFire, 2000.0);
        assert_eq!(state.rapid_fire_until_ms, 7000.0);
    }

    #[test]
    fn test_shield_activation() {
        let mut state = GameState::new(1);
        state.start(0.0);
        assert!(!state.active.shield);
        state.activate_powerup(PowerupKind::Shield, 0.0);
        assert!(state.active.shield);
        // Shield is not time-limited; nothing to expire
        assert_eq!(state.rapid_fire_until_ms, 0.0);
    }

    #[test]
    fn test_enemy_spawns_on_outer_ring() {
        let mut state = GameState::new(7);
        state.start(0.0);
        for _ in 0..16 {
            state.spawn_enemy();
        }
        for enemy in &state.enemies {
            assert!((enemy.pos.length() - ARENA_SIZE * 1.5).abs() < 1e-3);
            assert_eq!(enemy.pos.y, 0.0);
            assert!(enemy.spin_speed >= 0.02 && enemy.spin_speed < 0.12);
        }
    }

    #[test]
    fn test_powerup_spawns_in_annulus() {
        let mut state = GameState::new(7);
        state.start(0.0);
        for _ in 0..32 {
            state.spawn_powerup();
        }
        for powerup in &state.powerups {
            let r = powerup.pos.length();
            assert!(r >= SUN_RADIUS + 20.0 - 1e-3);
            assert!(r <= SUN_RADIUS + 80.0 + 1e-3);
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = GameState::new(3);
        state.start(0.0);
        state.spawn_enemy();
        state.spawn_powerup();
        state.fire_bullet();
        state.spawn_explosion(Vec3::ZERO, colors::ENEMY, 10);
        state.score = 400;
        state.player.orbit_radius = 90.0;
        state.end_game();
        assert_eq!(state.phase, GamePhase::GameOver);

        state.reset(10_000.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.powerups.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.orbit_radius, PLAYER_ORBIT_RADIUS);
        assert_eq!(state.last_enemy_spawn_ms, 10_000.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for _ in 0..8 {
            a.spawn_enemy();
            b.spawn_enemy();
        }
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.spin_speed, eb.spin_speed);
        }
    }
}
