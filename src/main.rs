//! Headless demo runner
//!
//! Runs the sim under autopilot at a simulated 60 Hz and prints the final
//! frame snapshot as JSON. Useful for soak-testing a seed without a window:
//!
//! ```sh
//! sun-grazer            # random seed
//! sun-grazer 42         # fixed seed, reproducible run
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use sun_grazer::sim::{FrameInput, GameState, tick};

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_RUN_MS: f64 = 120_000.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

    let mut state = GameState::new(seed);
    state.start(0.0);

    let input = FrameInput {
        autopilot: true,
        ..FrameInput::default()
    };

    let mut now_ms = 0.0;
    while state.is_playing() && now_ms < MAX_RUN_MS {
        tick(&mut state, &input, now_ms);
        now_ms += FRAME_MS;
    }

    log::info!(
        "seed {} survived {:.1}s, score {}",
        seed,
        now_ms / 1000.0,
        state.score
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}
