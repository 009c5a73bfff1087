//! Camera setup and world → Bevy coordinate mapping.
//!
//! The simulation works in screen-style world units: origin at the top-left of
//! the 800×600 view when the camera offset is zero, `y` growing downward, and
//! positions naming the top-left corner of a box.  Bevy's 2D camera is centred
//! on the window with `y` growing upward and sprites anchored at their centre.

use crate::config::GameConfig;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d at scale 1.0 maps one world unit to one logical pixel.
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}

/// Size the primary window to the loaded view dimensions, so a tuned
/// `screen_width`/`screen_height` stays in step with what is drawn.
pub fn fit_window_to_config(
    config: Res<GameConfig>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    for mut window in windows.iter_mut() {
        window
            .resolution
            .set(config.screen_width, config.screen_height);
        info!(
            "[SETUP] Window sized to {}x{}",
            config.screen_width, config.screen_height
        );
    }
}

/// Bevy translation of the centre of a world-space box, after subtracting the
/// camera offset from its x.
pub fn world_to_screen(pos: Vec2, size: Vec2, camera_offset: f32, config: &GameConfig) -> Vec2 {
    let screen_left = pos.x - camera_offset;
    Vec2::new(
        screen_left + size.x * 0.5 - config.screen_width * 0.5,
        config.screen_height * 0.5 - (pos.y + size.y * 0.5),
    )
}

pub fn background_color() -> Color {
    Color::srgb(0.133, 0.133, 0.133)
}
pub fn player_color() -> Color {
    Color::srgb(0.204, 0.596, 0.859)
}
pub fn platform_color() -> Color {
    Color::srgb(0.153, 0.682, 0.376)
}
pub fn platform_reached_color() -> Color {
    Color::srgb(0.180, 0.800, 0.443)
}
pub fn player_hitbox_color() -> Color {
    Color::srgb(1.0, 0.0, 0.0)
}
pub fn platform_hitbox_color() -> Color {
    Color::srgb(1.0, 1.0, 0.0)
}
