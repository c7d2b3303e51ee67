//! Sun Grazer - an orbital arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player orbit, spawning, collisions, scoring)
//!
//! Rendering, camera unprojection, and input capture are external
//! collaborators: they feed a [`sim::FrameInput`] into [`sim::tick`] once per
//! rendered frame and draw from [`sim::FrameSnapshot`] afterwards.

pub mod sim;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Arena half-extent; most gameplay happens within this radius
    pub const ARENA_SIZE: f32 = 120.0;
    /// Radius of the central sun
    pub const SUN_RADIUS: f32 = 18.0;

    /// Player starting orbit radius
    pub const PLAYER_ORBIT_RADIUS: f32 = 60.0;
    /// Base angular speed of the orbit (radians per frame)
    pub const PLAYER_ORBIT_SPEED: f32 = 0.005;
    /// Extra angular speed while an orbit key is held (radians per frame)
    pub const ORBIT_INPUT_SPEED: f32 = 0.01;
    /// Radial speed while a climb/dive key is held (units per frame)
    pub const PLAYER_ACCEL_RADIUS: f32 = 0.3;
    /// Closest legal approach above the sun surface
    pub const ORBIT_MIN_MARGIN: f32 = 4.0;
    /// The heat warning lights up below sun radius + this margin
    pub const HEAT_WARNING_MARGIN: f32 = 15.0;
    /// Below sun radius + this margin the sun claims the player
    pub const SUN_KILL_MARGIN: f32 = 1.5;
    /// Radius bump applied when a shield absorbs a sun graze
    pub const SHIELD_BOUNCE: f32 = 10.0;

    /// Bullet displacement per frame
    pub const BULLET_SPEED: f32 = 3.5;
    /// Base firing cooldown (wall-clock ms)
    pub const BULLET_COOLDOWN_MS: f64 = 120.0;
    /// Rapid fire divides the cooldown by this
    pub const RAPID_FIRE_FACTOR: f64 = 3.0;
    /// Rapid fire duration from the most recent pickup (ms)
    pub const RAPID_FIRE_DURATION_MS: f64 = 5000.0;

    /// Base enemy speed; per-frame displacement is speed * 0.15 * difficulty + 0.15
    pub const ENEMY_SPEED: f32 = 1.2;
    /// Base enemy spawn interval (ms); shrinks with difficulty
    pub const ENEMY_SPAWN_RATE_MS: f64 = 2000.0;
    /// Spawn interval floor so difficulty can't cause runaway spawning
    pub const ENEMY_SPAWN_FLOOR_MS: f64 = 600.0;
    /// Power-up spawn interval (ms, fixed)
    pub const POWERUP_SPAWN_RATE_MS: f64 = 8000.0;
    /// Chance an eligible power-up tick spawns nothing (timer resets anyway)
    pub const POWERUP_SKIP_CHANCE: f32 = 0.3;

    /// Pickup radius around the player
    pub const PICKUP_RANGE: f32 = 3.0;
    /// Enemy melee range against the player
    pub const ENEMY_HIT_RANGE: f32 = 2.5;
    /// Bullet kill range against an enemy
    pub const BULLET_HIT_RANGE: f32 = 2.5;

    /// Score per bullet kill
    pub const KILL_SCORE: u64 = 100;
    /// Score divisor in the difficulty formula
    pub const DIFFICULTY_SCORE_SCALE: f32 = 5000.0;
    /// Cap on the difficulty bonus (multiplier tops out at 1 + this)
    pub const DIFFICULTY_MAX_BONUS: f32 = 1.5;

    /// Per-frame camera shake decay factor
    pub const SHAKE_DECAY: f32 = 0.9;
    /// Per-frame particle opacity decrement
    pub const PARTICLE_FADE: f32 = 0.03;
    /// Per-frame particle scale factor
    pub const PARTICLE_SHRINK: f32 = 0.95;

    /// Entity colors (RGB hex), forwarded to the renderer via particles
    pub mod colors {
        pub const PLAYER: u32 = 0x00ff00;
        pub const ENEMY: u32 = 0xff0000;
        pub const BULLET: u32 = 0x00ffff;
        pub const SUN: u32 = 0xffff00;
        pub const RAPID_FIRE: u32 = 0xffff00;
        pub const SHIELD: u32 = 0x0088ff;
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to a point on the ground plane (y = 0)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_polar_to_cartesian_ground_plane() {
        let p = polar_to_cartesian(60.0, 0.0);
        assert!((p.x - 60.0).abs() < 1e-4);
        assert_eq!(p.y, 0.0);
        assert!(p.z.abs() < 1e-4);

        let q = polar_to_cartesian(60.0, PI / 2.0);
        assert!(q.x.abs() < 1e-4);
        assert!((q.z - 60.0).abs() < 1e-4);
    }
}
