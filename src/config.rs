//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! The run itself owns a copy of the config (see [`crate::run::GameState`]), so
//! a restart always uses the values the run started with.  Presentation
//! systems read `config: Res<GameConfig>` for screen dimensions.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    require_finite, require_non_negative, require_ordered, require_positive, GameResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable physics and gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Screen ───────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity: f32,
    pub jump_power: f32,
    pub max_jump_hold: u32,
    pub jump_forward_speed: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub player_start_x: f32,
    pub camera_lead: f32,

    // ── Platforms ────────────────────────────────────────────────────────────
    pub platform_width: f32,
    pub platform_height: f32,
    pub start_platform_width_factor: f32,
    pub start_platform_y: f32,
    pub initial_platforms_ahead: usize,
    pub platform_gap_min: f32,
    pub platform_gap_max: f32,
    pub platform_height_variation: f32,
    pub screen_margin: f32,
    pub reach_scale: f32,
    pub generation_lookahead: f32,
    pub retire_margin: f32,

    // ── Collision ────────────────────────────────────────────────────────────
    pub landing_tolerance: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Screen
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            // Physics
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            max_jump_hold: MAX_JUMP_HOLD,
            jump_forward_speed: JUMP_FORWARD_SPEED,
            // Player
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_start_x: PLAYER_START_X,
            camera_lead: CAMERA_LEAD,
            // Platforms
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            start_platform_width_factor: START_PLATFORM_WIDTH_FACTOR,
            start_platform_y: START_PLATFORM_Y,
            initial_platforms_ahead: INITIAL_PLATFORMS_AHEAD,
            platform_gap_min: PLATFORM_GAP_MIN,
            platform_gap_max: PLATFORM_GAP_MAX,
            platform_height_variation: PLATFORM_HEIGHT_VARIATION,
            screen_margin: SCREEN_MARGIN,
            reach_scale: REACH_SCALE,
            generation_lookahead: GENERATION_LOOKAHEAD,
            retire_margin: RETIRE_MARGIN,
            // Collision
            landing_tolerance: LANDING_TOLERANCE,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the generator and physics rely on.
    pub fn validate(&self) -> GameResult<()> {
        require_positive("screen_width", self.screen_width)?;
        require_positive("screen_height", self.screen_height)?;
        require_positive("gravity", self.gravity)?;
        require_non_negative("jump_power", self.jump_power)?;
        require_positive("max_jump_hold", self.max_jump_hold as f32)?;
        require_non_negative("jump_forward_speed", self.jump_forward_speed)?;
        require_positive("player_width", self.player_width)?;
        require_positive("player_height", self.player_height)?;
        require_positive("platform_width", self.platform_width)?;
        require_positive("platform_height", self.platform_height)?;
        require_positive("start_platform_width_factor", self.start_platform_width_factor)?;
        require_non_negative("platform_gap_min", self.platform_gap_min)?;
        require_ordered("platform_gap", self.platform_gap_min, self.platform_gap_max)?;
        require_non_negative("platform_height_variation", self.platform_height_variation)?;
        require_non_negative("reach_scale", self.reach_scale)?;
        require_non_negative("generation_lookahead", self.generation_lookahead)?;
        require_non_negative("retire_margin", self.retire_margin)?;
        require_non_negative("landing_tolerance", self.landing_tolerance)?;
        require_non_negative("screen_margin", self.screen_margin)?;
        require_finite("player_start_x", self.player_start_x)?;
        require_finite("camera_lead", self.camera_lead)?;

        let (top, bottom) = self.usable_band();
        require_ordered("usable_band", top, bottom)?;
        require_ordered("start_platform_y", top, self.start_platform_y)?;
        require_ordered("start_platform_y", self.start_platform_y, bottom)?;
        Ok(())
    }

    /// Largest vertical step between consecutive platforms.
    ///
    /// `max_jump_hold × jump_power × reach_scale`; 84 units with the defaults.
    pub fn max_jump_height(&self) -> f32 {
        self.max_jump_hold as f32 * self.jump_power * self.reach_scale
    }

    /// `(top, bottom)` of the band platforms are allowed to spawn in.
    pub fn usable_band(&self) -> (f32, f32) {
        (
            self.screen_margin,
            self.screen_height - self.screen_margin,
        )
    }

    /// World x of the camera's right edge.
    pub fn visible_right(&self, camera_offset: f32) -> f32 {
        camera_offset + self.screen_width
    }

    /// World y of the player's start pose: standing on the starting platform.
    pub fn player_start_y(&self) -> f32 {
        self.start_platform_y - self.player_height
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse or validation errors are
/// logged but do not abort the game.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("Rejected {CONFIG_PATH}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present; defaults are already in place.
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
