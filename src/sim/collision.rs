//! Proximity collision checks
//!
//! Every interaction in the arena resolves through plain Euclidean distance
//! against a fixed threshold. No swept collision: at high relative speed a
//! miss is possible, and that approximation is accepted.

use glam::Vec3;

use crate::consts::*;

/// True when two positions are within `range` of each other
#[inline]
pub fn within_range(a: Vec3, b: Vec3, range: f32) -> bool {
    a.distance(b) < range
}

/// Bullet has left the playfield (beyond twice the arena size)
#[inline]
pub fn bullet_escaped(pos: Vec3) -> bool {
    pos.length() > ARENA_SIZE * 2.0
}

/// The sun absorbs anything inside its radius, silently
#[inline]
pub fn sun_absorbs(pos: Vec3) -> bool {
    pos.length() < SUN_RADIUS
}

/// Enemy has flown into the sun (slightly padded over the raw radius)
#[inline]
pub fn enemy_hits_sun(pos: Vec3) -> bool {
    pos.length() < SUN_RADIUS + 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_range_boundary() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        assert!(within_range(a, Vec3::new(2.0, 0.0, 0.0), 2.5));
        assert!(!within_range(a, Vec3::new(2.5, 0.0, 0.0), 2.5));
        assert!(!within_range(a, Vec3::new(3.0, 0.0, 0.0), 2.5));
    }

    #[test]
    fn test_within_range_uses_all_axes() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(2.0, 2.0, 2.0);
        // sqrt(3) ~= 1.73
        assert!(within_range(a, b, 2.0));
        assert!(!within_range(a, b, 1.7));
    }

    #[test]
    fn test_bullet_escaped() {
        assert!(!bullet_escaped(Vec3::new(ARENA_SIZE, 0.0, 0.0)));
        assert!(bullet_escaped(Vec3::new(ARENA_SIZE * 2.0 + 1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_sun_absorbs() {
        assert!(sun_absorbs(Vec3::new(SUN_RADIUS - 1.0, 0.0, 0.0)));
        assert!(!sun_absorbs(Vec3::new(SUN_RADIUS + 1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_enemy_hits_sun_padded() {
        // Inside the padding but outside the raw radius still counts
        assert!(enemy_hits_sun(Vec3::new(SUN_RADIUS + 1.0, 0.0, 0.0)));
        assert!(!enemy_hits_sun(Vec3::new(SUN_RADIUS + 3.0, 0.0, 0.0)));
    }
}
