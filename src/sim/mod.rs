//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Advanced once per rendered frame via [`tick`]
//! - Wall-clock time is supplied by the caller, never read here
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{bullet_escaped, sun_absorbs, within_range};
pub use snapshot::{FrameSnapshot, HudState};
pub use state::{
    ActivePowerups, Bullet, Enemy, GamePhase, GameState, Particle, Player, Powerup, PowerupKind,
    difficulty_for_score, enemy_spawn_interval_ms,
};
pub use tick::{FrameInput, tick};
