//! Screen state and the game-over overlay: `Screen` definition and `MenuPlugin`.
//!
//! ## States
//!
//! | State       | Description                                       |
//! |-------------|---------------------------------------------------|
//! | `Playing`   | Run in progress; HUD only                         |
//! | `GameOver`  | Run ended; world frozen under the overlay         |
//!
//! The screen never drives the run: [`crate::simulation::sync_screen_system`]
//! mirrors [`crate::run::GameState`]'s phase into it.
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                    | Schedule                  | Purpose                          |
//! |---------------------------|---------------------------|----------------------------------|
//! | `setup_game_over`         | `OnEnter(GameOver)`       | Spawn the overlay                |
//! | `cleanup_game_over`       | `OnExit(GameOver)`        | Despawn the overlay              |
//! | `game_over_button_system` | `Update / in GameOver`    | Handle Play Again / Quit clicks  |

use bevy::prelude::*;

mod common;
mod game_over;
mod types;

use crate::run::{GameState, RunInput};
use crate::simulation::PendingInputs;
use common::*;
use game_over::{cleanup_game_over, game_over_button_system, setup_game_over};
pub use types::{GameOverPlayAgainButton, GameOverQuitButton, GameOverRoot, Screen};

/// Registers [`Screen`] and the game-over overlay.
///
/// Must be added before [`crate::simulation::SimulationPlugin`] runs its first
/// fixed tick, so the state resource exists when the phase is mirrored.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Screen>()
            .add_systems(OnEnter(Screen::GameOver), setup_game_over)
            .add_systems(OnExit(Screen::GameOver), cleanup_game_over)
            .add_systems(
                Update,
                game_over_button_system.run_if(in_state(Screen::GameOver)),
            );
    }
}
