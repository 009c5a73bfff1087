use bevy::prelude::*;
use bevy::window::WindowResolution;
use hopper::config::{self, GameConfig};
use hopper::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use hopper::{graphics, menu, rendering, simulation};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hopper".into(),
                // Default size; fit_window_to_config applies assets/game.toml.
                resolution: WindowResolution::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(graphics::background_color()))
        // Compiled defaults; load_game_config overwrites them from
        // assets/game.toml (if present) before the first run starts.
        .insert_resource(GameConfig::default())
        .add_systems(
            Startup,
            (
                config::load_game_config,
                graphics::setup_camera.after(config::load_game_config),
                graphics::fit_window_to_config.after(config::load_game_config),
            ),
        )
        .add_plugins(menu::MenuPlugin)
        .add_plugins(simulation::SimulationPlugin)
        .add_plugins(rendering::RenderingPlugin)
        .run();
}
