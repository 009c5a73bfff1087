//! Rendering systems: sprites, score HUD, debug panel, and hitbox gizmos.
//!
//! Everything here reads a [`Snapshot`] of the run; nothing writes back into
//! [`GameState`].
//!
//! ## Layer Model
//!
//! | Layer              | Technology | Default | Controlled by      |
//! |--------------------|------------|---------|--------------------|
//! | Platform fills     | `Sprite`   | ON      | -                  |
//! | Player fill        | `Sprite`   | ON      | -                  |
//! | Hitbox outlines    | Gizmos     | OFF     | `show_hitboxes` F4 |
//! | Score HUD          | Bevy UI    | always  | -                  |
//! | Debug panel        | Bevy UI    | OFF     | `show_debug` F3    |
//!
//! ## System Responsibilities
//!
//! | System                          | Schedule | Purpose                                 |
//! |---------------------------------|----------|-----------------------------------------|
//! | `setup_player_sprite`           | Startup  | Spawn the player sprite                 |
//! | `setup_hud`                     | Startup  | Spawn score HUD and debug panel nodes   |
//! | `overlay_toggle_system`         | Update   | F3 / F4 toggle debug layers             |
//! | `sync_platform_sprites_system`  | Update   | Spawn / move / recolour / despawn       |
//! | `sync_player_sprite_system`     | Update   | Move the player sprite                  |
//! | `hud_score_display_system`      | Update   | Refresh score text                      |
//! | `debug_panel_system`            | Update   | Refresh and show/hide debug text        |
//! | `hitbox_gizmo_system`           | Update   | Draw hitbox outlines                    |

use crate::config::{load_game_config, GameConfig};
use crate::graphics::{
    platform_color, platform_hitbox_color, platform_reached_color, player_color,
    player_hitbox_color, world_to_screen,
};
use crate::platforms::PlatformId;
use crate::run::{GameState, Snapshot};
use bevy::prelude::*;
use std::collections::HashMap;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayState>()
            .add_systems(
                Startup,
                (setup_player_sprite.after(load_game_config), setup_hud),
            )
            .add_systems(
                Update,
                (
                    overlay_toggle_system,
                    sync_platform_sprites_system,
                    sync_player_sprite_system,
                    hud_score_display_system,
                    debug_panel_system,
                    hitbox_gizmo_system,
                ),
            );
    }
}

// ── Overlay state resource ────────────────────────────────────────────────────

/// Controls which debug layers are rendered at runtime.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayState {
    /// Show the text panel with grounded/position/velocity/reached/top score.
    pub show_debug: bool,
    /// Outline the player (red) and every platform (yellow).
    pub show_hitboxes: bool,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Sprite for one live platform.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSprite(pub PlatformId);

/// Marker for the player sprite.
#[derive(Component)]
pub struct PlayerSprite;

/// Marker for the permanent score HUD text.
#[derive(Component)]
pub struct HudScoreDisplay;

/// Marker for the debug panel text.
#[derive(Component)]
pub struct DebugPanel;

// ── Startup ───────────────────────────────────────────────────────────────────

pub fn setup_player_sprite(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        PlayerSprite,
        Sprite::from_color(
            player_color(),
            Vec2::new(config.player_width, config.player_height),
        ),
        Transform::from_xyz(0.0, 0.0, 1.0),
    ));
}

/// Spawn the score HUD (top right) and the hidden debug panel (top left).
pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(20.0),
            top: Val::Px(20.0),
            ..default()
        },
        Text::new("Score: 0"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE),
        HudScoreDisplay,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(20.0),
            ..default()
        },
        Text::new(""),
        TextFont {
            font_size: 11.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Visibility::Hidden,
        DebugPanel,
    ));
}

// ── Update: overlay toggles ───────────────────────────────────────────────────

pub fn overlay_toggle_system(keys: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<OverlayState>) {
    if keys.just_pressed(KeyCode::F3) {
        overlay.show_debug = !overlay.show_debug;
    }
    if keys.just_pressed(KeyCode::F4) {
        overlay.show_hitboxes = !overlay.show_hitboxes;
    }
}

// ── Update: sprites ───────────────────────────────────────────────────────────

/// Keep one sprite per live platform: spawn new ones, move and recolour the
/// rest, despawn sprites whose platform has been retired.
pub fn sync_platform_sprites_system(
    mut commands: Commands,
    game: Res<GameState>,
    config: Res<GameConfig>,
    mut sprites: Query<(Entity, &PlatformSprite, &mut Transform, &mut Sprite)>,
) {
    let snapshot = game.snapshot();
    let mut live: HashMap<PlatformId, usize> = snapshot
        .platforms
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    for (entity, PlatformSprite(id), mut transform, mut sprite) in sprites.iter_mut() {
        match live.remove(id) {
            Some(i) => {
                let p = &snapshot.platforms[i];
                let centre = world_to_screen(p.pos, p.size, snapshot.camera_offset, &config);
                transform.translation = centre.extend(0.0);
                sprite.color = platform_fill(p.reached);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for (_, i) in live {
        let p = &snapshot.platforms[i];
        let centre = world_to_screen(p.pos, p.size, snapshot.camera_offset, &config);
        commands.spawn((
            PlatformSprite(p.id),
            Sprite::from_color(platform_fill(p.reached), p.size),
            Transform::from_translation(centre.extend(0.0)),
        ));
    }
}

fn platform_fill(reached: bool) -> Color {
    if reached {
        platform_reached_color()
    } else {
        platform_color()
    }
}

pub fn sync_player_sprite_system(
    game: Res<GameState>,
    config: Res<GameConfig>,
    mut query: Query<&mut Transform, With<PlayerSprite>>,
) {
    let player = game.player();
    let centre = world_to_screen(player.pos, player.size, game.camera_offset(), &config);
    for mut transform in query.iter_mut() {
        transform.translation = centre.extend(1.0);
    }
}

// ── Update: HUD ───────────────────────────────────────────────────────────────

pub fn hud_score_display_system(
    game: Res<GameState>,
    mut query: Query<&mut Text, With<HudScoreDisplay>>,
) {
    if !game.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        text.0 = format!("Score: {}", game.score());
    }
}

/// Debug panel contents, one line per fact.
pub fn debug_lines(snapshot: &Snapshot) -> String {
    let on_platform = match (snapshot.player.grounded, snapshot.player.current_platform) {
        (true, Some(id)) => format!("Yes (ID: {})", id.0),
        _ => "No".to_string(),
    };
    format!(
        "On Platform: {}\nPosition: ({}, {})\nVelocity: ({:.1}, {:.1})\nPlatforms Reached: {}\nTop Score: {}",
        on_platform,
        snapshot.player.pos.x as i32,
        snapshot.player.pos.y as i32,
        snapshot.player.vel.x,
        snapshot.player.vel.y,
        snapshot.reached_count,
        snapshot.top_score,
    )
}

pub fn debug_panel_system(
    game: Res<GameState>,
    overlay: Res<OverlayState>,
    mut query: Query<(&mut Text, &mut Visibility), With<DebugPanel>>,
) {
    for (mut text, mut visibility) in query.iter_mut() {
        if !overlay.show_debug {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Visible;
        text.0 = debug_lines(&game.snapshot());
    }
}

// ── Update: gizmos ────────────────────────────────────────────────────────────

pub fn hitbox_gizmo_system(
    mut gizmos: Gizmos,
    game: Res<GameState>,
    config: Res<GameConfig>,
    overlay: Res<OverlayState>,
) {
    if !overlay.show_hitboxes {
        return;
    }
    let camera = game.camera_offset();
    for p in game.platforms().iter() {
        let centre = world_to_screen(p.pos, p.size, camera, &config);
        gizmos.rect_2d(centre, p.size, platform_hitbox_color());
    }
    let player = game.player();
    let centre = world_to_screen(player.pos, player.size, camera, &config);
    gizmos.rect_2d(centre, player.size, player_hitbox_color());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_lines_report_resting_player() {
        let game = GameState::with_seed(GameConfig::default(), 5);
        let text = debug_lines(&game.snapshot());

        assert!(text.contains("On Platform: Yes (ID: 0)"), "got: {text}");
        assert!(text.contains("Position: (100, 370)"), "got: {text}");
        assert!(text.contains("Velocity: (0.0, 0.0)"), "got: {text}");
        assert!(text.contains("Platforms Reached: 1"), "got: {text}");
        assert!(text.contains("Top Score: 0"), "got: {text}");
    }

    #[test]
    fn debug_lines_report_airborne_player() {
        let mut game = GameState::with_seed(GameConfig::default(), 5);
        game.handle_input(crate::run::RunInput::JumpStart);
        game.tick();
        let text = debug_lines(&game.snapshot());
        assert!(text.contains("On Platform: No"), "got: {text}");
        assert!(text.contains("Velocity: (4.0, -0.2)"), "got: {text}");
    }

    #[test]
    fn reached_platforms_use_the_brighter_fill() {
        assert_eq!(platform_fill(true), platform_reached_color());
        assert_eq!(platform_fill(false), platform_color());
    }
}
