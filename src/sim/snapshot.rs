//! Per-frame render handoff
//!
//! After each [`tick`](super::tick::tick) the presenter pulls a
//! [`FrameSnapshot`]: everything it needs to draw the frame, serializable so
//! a recording or remote viewer can consume the same stream. The snapshot
//! carries no RNG or timer state; it cannot be fed back into the sim.

use serde::{Deserialize, Serialize};

use super::state::{Bullet, Enemy, GamePhase, GameState, Particle, Player, Powerup};

/// Overlay state for the HUD: score, effect indicators, warnings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudState {
    pub score: u64,
    /// Shield indicator (and the blue halo around the craft)
    pub shield: bool,
    /// Rapid fire indicator
    pub rapid_fire: bool,
    /// Proximity warning while orbiting inside the heat zone
    pub heat_warning: bool,
    pub game_over: bool,
    /// Set on the game-over screen only
    pub final_score: Option<u64>,
}

/// Everything the presenter needs to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,
    /// Camera shake magnitude for this frame
    pub shake: f32,
    pub hud: HudState,
}

impl GameState {
    /// Capture the renderable view of the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let game_over = self.phase == GamePhase::GameOver;
        FrameSnapshot {
            player: self.player.clone(),
            bullets: self.bullets.clone(),
            enemies: self.enemies.clone(),
            powerups: self.powerups.clone(),
            particles: self.particles.clone(),
            shake: self.shake,
            hud: HudState {
                score: self.score,
                shield: self.active.shield,
                rapid_fire: self.active.rapid_fire,
                heat_warning: self.heat_warning,
                game_over,
                final_score: game_over.then_some(self.score),
            },
        }
    }
}
