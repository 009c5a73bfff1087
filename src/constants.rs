//! Centralised physics and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::GameConfig`] mirrors every value
//! and uses these as its compiled defaults.
//!
//! ## Coordinate system
//!
//! World units match screen pixels at the 800×600 logical resolution.  The
//! origin is the top-left corner of the screen at camera offset zero, and `y`
//! grows **downward**.  Positions of the player and of platforms refer to the
//! top-left corner of their bounding boxes.

// ── Screen ────────────────────────────────────────────────────────────────────

/// Logical width of the visible play area (world units).
pub const SCREEN_WIDTH: f32 = 800.0;

/// Logical height of the visible play area (world units).
///
/// A player whose top edge passes below this line has fallen out of the run.
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Simulation rate of the fixed-timestep loop.
pub const TICKS_PER_SECOND: f64 = 60.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward acceleration added to the player's vertical velocity every tick.
pub const GRAVITY: f32 = 0.5;

/// Upward thrust subtracted from vertical velocity per tick while jump is held.
pub const JUMP_POWER: f32 = 0.7;

/// Maximum number of ticks a jump can be held before thrust cuts out.
pub const MAX_JUMP_HOLD: u32 = 30;

/// Horizontal velocity set when a jump starts.  Cleared again on landing.
pub const JUMP_FORWARD_SPEED: f32 = 4.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 30.0;
pub const PLAYER_HEIGHT: f32 = 30.0;

/// World x of the player at the start of every run.
pub const PLAYER_START_X: f32 = 100.0;

/// Distance between the camera's left edge and the player's x.
///
/// The camera is locked to the player: `camera_offset = player.x - CAMERA_LEAD`.
pub const CAMERA_LEAD: f32 = 100.0;

// ── Platforms ─────────────────────────────────────────────────────────────────

pub const PLATFORM_WIDTH: f32 = 100.0;
pub const PLATFORM_HEIGHT: f32 = 20.0;

/// The starting platform is this many times wider than a regular one.
pub const START_PLATFORM_WIDTH_FACTOR: f32 = 2.0;

/// Top edge of the starting platform.
pub const START_PLATFORM_Y: f32 = 400.0;

/// Platforms generated ahead of the starting platform on every reset.
pub const INITIAL_PLATFORMS_AHEAD: usize = 10;

/// Horizontal gap range between consecutive platforms.
pub const PLATFORM_GAP_MIN: f32 = 50.0;
pub const PLATFORM_GAP_MAX: f32 = 200.0;

/// Maximum vertical offset of a platform relative to its predecessor.
pub const PLATFORM_HEIGHT_VARIATION: f32 = 60.0;

/// Platforms never spawn closer than this to the top or bottom screen edge.
pub const SCREEN_MARGIN: f32 = 100.0;

/// Multiplier applied to `MAX_JUMP_HOLD × JUMP_POWER` to bound the vertical
/// step between consecutive platforms.
///
/// Empirical value; with the defaults the bound is 84 units, wider than
/// `PLATFORM_HEIGHT_VARIATION`, so it only bites when the config is tuned.
pub const REACH_SCALE: f32 = 4.0;

/// A new platform is appended while the rightmost one ends closer than this to
/// the camera's right edge.
pub const GENERATION_LOOKAHEAD: f32 = 500.0;

/// Platforms whose right edge is further than this left of the camera are retired.
pub const RETIRE_MARGIN: f32 = 100.0;

// ── Collision ─────────────────────────────────────────────────────────────────

/// Slack allowed between the player's pre-move bottom edge and a platform top
/// for a landing to count.
///
/// Empirical value.  Lowering it makes fast falls tunnel through platforms;
/// raising it lets a player who is already below a surface snap back up.
pub const LANDING_TOLERANCE: f32 = 5.0;
