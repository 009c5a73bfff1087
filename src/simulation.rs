//! Simulation plugin: drives [`GameState`] from Bevy's fixed-timestep loop.
//!
//! ## Pipeline
//!
//! | System                    | Schedule              | Purpose                                  |
//! |---------------------------|-----------------------|------------------------------------------|
//! | `start_run_system`        | `Startup`             | Insert the first `GameState`             |
//! | `keyboard_input_system`   | `Update`              | Queue `RunInput`s from key edges         |
//! | `quit_system`             | `Update`              | Escape → `AppExit`                       |
//! | `advance_game_system`     | `FixedUpdate` (60 Hz) | Drain inputs, tick the run, log events   |
//! | `sync_screen_system`      | `FixedUpdate`         | Mirror the run phase into [`Screen`]     |
//!
//! Inputs are queued in `Update` and drained in `FixedUpdate`: key edges are
//! only visible for the frame they happen on, and a frame can run zero or
//! several fixed ticks.

use crate::config::{load_game_config, GameConfig};
use crate::constants::TICKS_PER_SECOND;
use crate::menu::Screen;
use crate::run::{GameState, RunInput};
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND))
            .init_resource::<PendingInputs>()
            .add_systems(Startup, start_run_system.after(load_game_config))
            .add_systems(Update, (keyboard_input_system, quit_system))
            .add_systems(
                FixedUpdate,
                (advance_game_system, sync_screen_system).chain(),
            );
    }
}

/// Inputs collected since the last fixed tick, in arrival order.
///
/// Tests and UI buttons push to this directly instead of faking key presses.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct PendingInputs(pub Vec<RunInput>);

impl PendingInputs {
    pub fn push(&mut self, input: RunInput) {
        self.0.push(input);
    }
}

/// Startup system: begin the first run with the loaded configuration.
pub fn start_run_system(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(GameState::new(config.clone()));
    info!("[SETUP] Run started");
}

/// Translate key edges into [`RunInput`]s.
///
/// - **Space** down → `JumpStart`, or `Restart` when the run is over
/// - **Space** up → `JumpRelease`
/// - **Enter** → `Restart`
pub fn keyboard_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    game: Res<GameState>,
    mut pending: ResMut<PendingInputs>,
) {
    if keys.just_pressed(KeyCode::Space) {
        if game.is_game_over() {
            pending.push(RunInput::Restart);
        } else {
            pending.push(RunInput::JumpStart);
        }
    }
    if keys.just_released(KeyCode::Space) {
        pending.push(RunInput::JumpRelease);
    }
    if keys.just_pressed(KeyCode::Enter) {
        pending.push(RunInput::Restart);
    }
}

/// Escape quits; the top score is not persisted.
pub fn quit_system(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

/// Apply queued inputs, then advance the run by one tick.
pub fn advance_game_system(mut game: ResMut<GameState>, mut pending: ResMut<PendingInputs>) {
    for input in pending.0.drain(..) {
        if game.handle_input(input) && input == RunInput::Restart {
            info!("Run restarted (top score {})", game.top_score());
        }
    }

    let outcome = game.tick();

    if let Some(landing) = outcome.landing.filter(|l| l.first_visit) {
        info!("Reached platform {} (score {})", landing.platform, game.score());
    }
    if let Some(id) = outcome.spawned {
        debug!("Spawned platform {id}");
    }
    if outcome.retired > 0 {
        debug!("Retired {} platform(s)", outcome.retired);
    }
    if outcome.game_over {
        info!("Game over: score {}, top score {}", game.score(), game.top_score());
        if outcome.new_best {
            info!("New best score: {}", game.top_score());
        }
    }
}

/// Keep the [`Screen`] state in step with the run phase so overlays can hang
/// off `OnEnter`/`OnExit`.
pub fn sync_screen_system(
    game: Res<GameState>,
    screen: Res<State<Screen>>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let wanted = if game.is_game_over() {
        Screen::GameOver
    } else {
        Screen::Playing
    };
    if *screen.get() != wanted {
        next_screen.set(wanted);
    }
}
