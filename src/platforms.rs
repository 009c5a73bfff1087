//! Procedural platform generation and retirement.
//!
//! The [`PlatformField`] owns the live platform sequence.  It is a FIFO queue
//! ordered by ascending x (and, since ids are handed out in spawn order, by
//! ascending id):
//!
//! ```text
//!   retire ◄── [ P3 ][ P4 ][ P5 ] ... [ P14 ] ◄── extend
//!   (front, camera − retire_margin)     (back, camera + width + lookahead)
//! ```
//!
//! ## Reachability
//!
//! Each new platform is placed relative to its predecessor only:
//!
//! - horizontal gap drawn uniformly from `[platform_gap_min, platform_gap_max]`;
//! - vertical position drawn uniformly from a window around the previous top,
//!   clipped to `±platform_height_variation`, to the usable screen band, and to
//!   `±max_jump_height` so a full-power jump can always climb the step.
//!
//! ## Randomness
//!
//! The field carries its own [`StdRng`].  [`PlatformField::new`] seeds it from
//! OS entropy so runs differ; tests use [`PlatformField::with_seed`].

use crate::config::GameConfig;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Identifier of a platform; unique and increasing within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(pub u64);

impl PlatformId {
    /// The wide platform the player starts on.
    pub const START: PlatformId = PlatformId(0);
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable axis-aligned platform.  `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub id: PlatformId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// Draw a horizontal gap uniformly from the configured range.
pub fn random_gap<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> f32 {
    sample_between(rng, config.platform_gap_min, config.platform_gap_max)
}

/// Draw the top edge of the platform that follows one at `previous_y`.
///
/// Never leaves the usable band, never differs from `previous_y` by more than
/// the height variation or the reachable jump height.
pub fn random_height<R: Rng + ?Sized>(rng: &mut R, previous_y: f32, config: &GameConfig) -> f32 {
    let (min, max) = height_window(previous_y, config);
    sample_between(rng, min, max)
}

/// The `(min, max)` window [`random_height`] samples from.
pub fn height_window(previous_y: f32, config: &GameConfig) -> (f32, f32) {
    let (band_top, band_bottom) = config.usable_band();
    let reach = config.max_jump_height();

    let min = (previous_y - config.platform_height_variation)
        .max(band_top)
        .max(previous_y - reach);
    let max = (previous_y + config.platform_height_variation)
        .min(band_bottom)
        .min(previous_y + reach);

    // A predecessor outside the band (only possible with a tuned config)
    // collapses the window; pin to the nearest legal height.
    if max < min {
        (min, min)
    } else {
        (min, max)
    }
}

fn sample_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// Live platform sequence plus the id counter and random source that extend it.
#[derive(Debug, Clone)]
pub struct PlatformField {
    platforms: VecDeque<Platform>,
    next_id: u64,
    rng: StdRng,
}

impl PlatformField {
    /// Fresh opening layout with an entropy-seeded random source.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Fresh opening layout with a reproducible random source.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Build the opening layout: the double-width start platform under the
    /// player followed by `initial_platforms_ahead` generated platforms.
    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let mut field = Self {
            platforms: VecDeque::with_capacity(config.initial_platforms_ahead + 8),
            next_id: 0,
            rng,
        };

        let start_width = config.platform_width * config.start_platform_width_factor;
        field.push(
            Vec2::new(0.0, config.start_platform_y),
            Vec2::new(start_width, config.platform_height),
        );
        for _ in 0..config.initial_platforms_ahead {
            field.append_next(config);
        }
        field
    }

    /// Start the next run's layout, continuing this field's random stream.
    pub fn regenerate(&self, config: &GameConfig) -> Self {
        Self::with_rng(config, self.rng.clone())
    }

    fn push(&mut self, pos: Vec2, size: Vec2) -> PlatformId {
        let id = PlatformId(self.next_id);
        self.next_id += 1;
        self.platforms.push_back(Platform { id, pos, size });
        id
    }

    /// Append one platform after the current rightmost one.
    fn append_next(&mut self, config: &GameConfig) -> Option<PlatformId> {
        let last = *self.platforms.back()?;
        let x = last.right() + random_gap(&mut self.rng, config);
        let y = random_height(&mut self.rng, last.top(), config);
        Some(self.push(
            Vec2::new(x, y),
            Vec2::new(config.platform_width, config.platform_height),
        ))
    }

    /// Append at most one platform if the rightmost one ends inside the
    /// lookahead zone past the camera's right edge.
    pub fn extend(&mut self, camera_offset: f32, config: &GameConfig) -> Option<PlatformId> {
        let rightmost = self.platforms.back()?;
        let horizon = config.visible_right(camera_offset) + config.generation_lookahead;
        if rightmost.right() < horizon {
            self.append_next(config)
        } else {
            None
        }
    }

    /// Drop platforms from the front whose right edge is more than
    /// `retire_margin` left of the camera.  Returns how many were removed.
    pub fn retire(&mut self, camera_offset: f32, config: &GameConfig) -> usize {
        let cutoff = camera_offset - config.retire_margin;
        let mut retired = 0;
        while self.platforms.front().is_some_and(|p| p.right() < cutoff) {
            self.platforms.pop_front();
            retired += 1;
        }
        retired
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn first(&self) -> Option<&Platform> {
        self.platforms.front()
    }

    pub fn rightmost(&self) -> Option<&Platform> {
        self.platforms.back()
    }

    /// Look up a live platform.  `None` once it has been retired.
    pub fn get(&self, id: PlatformId) -> Option<&Platform> {
        // Ids are ascending, so a binary search over the deque is valid.
        self.platforms
            .binary_search_by(|p| p.id.cmp(&id))
            .ok()
            .map(|i| &self.platforms[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reachable_chain(field: &PlatformField, config: &GameConfig) {
        let (top, bottom) = config.usable_band();
        let platforms: Vec<_> = field.iter().collect();
        for pair in platforms.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let dy = (b.top() - a.top()).abs();
            let gap = b.left() - a.right();
            assert!(b.id > a.id, "ids must ascend: {} then {}", a.id, b.id);
            assert!(dy <= config.platform_height_variation + 1e-3, "dy {dy} between {} and {}", a.id, b.id);
            assert!(dy <= config.max_jump_height() + 1e-3);
            assert!(b.top() >= top - 1e-3 && b.top() <= bottom + 1e-3, "{} at y {}", b.id, b.top());
            assert!(
                gap >= config.platform_gap_min - 1e-2 && gap <= config.platform_gap_max + 1e-2,
                "gap {gap} between {} and {}",
                a.id,
                b.id
            );
        }
    }

    #[test]
    fn opening_layout_has_wide_start_and_ten_ahead() {
        let config = GameConfig::default();
        let field = PlatformField::with_seed(&config, 7);

        assert_eq!(field.len(), 11);
        let start = field.first().unwrap();
        assert_eq!(start.id, PlatformId::START);
        assert_eq!(start.pos, Vec2::new(0.0, 400.0));
        assert_eq!(start.size, Vec2::new(200.0, 20.0));
        assert_eq!(field.rightmost().unwrap().id, PlatformId(10));
        assert_reachable_chain(&field, &config);
    }

    #[test]
    fn height_window_clips_to_band() {
        let config = GameConfig::default();
        assert_eq!(height_window(120.0, &config), (100.0, 180.0));
        assert_eq!(height_window(480.0, &config), (420.0, 500.0));
        assert_eq!(height_window(300.0, &config), (240.0, 360.0));
    }

    #[test]
    fn height_window_clips_to_reach_when_variation_is_wider() {
        let config = GameConfig {
            platform_height_variation: 200.0,
            ..GameConfig::default()
        };
        let (min, max) = height_window(300.0, &config);
        assert!((min - 216.0).abs() < 1e-3, "min {min}");
        assert!((max - 384.0).abs() < 1e-3, "max {max}");
    }

    #[test]
    fn height_window_never_inverts() {
        let config = GameConfig::default();
        let (min, max) = height_window(20.0, &config);
        assert!(min <= max);
        assert_eq!(min, 100.0);
    }

    #[test]
    fn long_generated_chain_stays_reachable() {
        let config = GameConfig::default();
        let mut field = PlatformField::with_seed(&config, 42);
        let mut camera = 0.0;
        for _ in 0..2_000 {
            camera += 4.0;
            field.extend(camera, &config);
        }
        // One append per call keeps the rightmost edge within one platform
        // and one maximal gap of the generation horizon.
        let horizon = config.visible_right(camera) + config.generation_lookahead;
        let rightmost = field.rightmost().expect("field is never empty");
        assert!(
            rightmost.right() >= horizon - config.platform_width - config.platform_gap_max,
            "rightmost edge {} lags horizon {horizon}",
            rightmost.right()
        );
        assert_reachable_chain(&field, &config);
    }

    #[test]
    fn extend_appends_at_most_one_per_call() {
        let config = GameConfig::default();
        let mut field = PlatformField::with_seed(&config, 3);
        let before = field.len();

        // Far ahead of everything: the trigger fires but only one is added.
        let spawned = field.extend(10_000.0, &config);

        assert_eq!(spawned, Some(PlatformId(before as u64)));
        assert_eq!(field.len(), before + 1);
    }

    #[test]
    fn extend_waits_while_rightmost_is_beyond_lookahead() {
        let config = GameConfig::default();
        let mut field = PlatformField::with_seed(&config, 3);
        // Ten platforms ahead span at least 10 × (100 + 50) = 1500 units past 200.
        assert_eq!(field.extend(0.0, &config), None);
        assert_eq!(field.len(), 11);
    }

    #[test]
    fn retire_is_fifo_and_respects_margin() {
        let config = GameConfig::default();
        let mut field = PlatformField::with_seed(&config, 11);
        let start_right = field.first().unwrap().right();

        // Right edge exactly at the cutoff is kept.
        assert_eq!(field.retire(start_right + config.retire_margin, &config), 0);
        assert_eq!(field.retire(start_right + config.retire_margin + 0.5, &config), 1);
        assert_eq!(field.first().unwrap().id, PlatformId(1));
        assert!(field.get(PlatformId::START).is_none());
    }

    #[test]
    fn retire_everything_far_behind() {
        let config = GameConfig::default();
        let mut field = PlatformField::with_seed(&config, 11);
        let n = field.len();
        assert_eq!(field.retire(1.0e6, &config), n);
        assert!(field.is_empty());
        assert_eq!(field.extend(1.0e6, &config), None);
    }

    #[test]
    fn get_finds_live_platforms_by_id() {
        let config = GameConfig::default();
        let field = PlatformField::with_seed(&config, 5);
        let p = field.get(PlatformId(4)).expect("platform 4 is live");
        assert_eq!(p.id, PlatformId(4));
        assert!(field.get(PlatformId(99)).is_none());
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::default();
        let a = PlatformField::with_seed(&config, 99);
        let b = PlatformField::with_seed(&config, 99);
        assert!(a.iter().zip(b.iter()).all(|(p, q)| p == q));
    }

    #[test]
    fn regenerate_restarts_ids_and_keeps_shape() {
        let config = GameConfig::default();
        let mut field = PlatformField::with_seed(&config, 1);
        field.extend(10_000.0, &config);
        field.retire(500.0, &config);

        let fresh = field.regenerate(&config);

        assert_eq!(fresh.len(), 11);
        assert_eq!(fresh.first().unwrap().id, PlatformId::START);
        assert_eq!(fresh.first().unwrap().size.x, 200.0);
        assert_reachable_chain(&fresh, &config);
    }
}
