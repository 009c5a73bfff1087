//! Player/platform landing detection and resolution.
//!
//! Collision is one-way: platforms only catch a player who is falling (or
//! resting, `vel.y == 0`) onto their top surface.  A player rising through a
//! platform from below passes straight through.
//!
//! ## Swept landing test
//!
//! A platform catches the player this tick when all of:
//!
//! - the horizontal extents overlap (strict AABB overlap);
//! - the player's bottom edge is at or below the platform top;
//! - the bottom edge *before* this tick's vertical move (`bottom - vel.y`) was at
//!   or above `top + landing_tolerance`.
//!
//! The last condition stops fast falls from tunnelling through a 20-unit
//! platform and keeps a player who is already beneath a surface from being
//! pulled back up onto it.

use crate::config::GameConfig;
use crate::platforms::{Platform, PlatformField, PlatformId};
use crate::player::Player;
use std::collections::BTreeSet;

/// Ids of every platform landed on during the current run.
///
/// Seeded with the start platform, so `len() - 1` is the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachedSet(BTreeSet<PlatformId>);

impl Default for ReachedSet {
    fn default() -> Self {
        Self(BTreeSet::from([PlatformId::START]))
    }
}

impl ReachedSet {
    /// Record a landing.  Returns `true` the first time `id` is reached.
    pub fn insert(&mut self, id: PlatformId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: PlatformId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Platforms reached beyond the starting one.
    pub fn score(&self) -> u32 {
        self.0.len().saturating_sub(1) as u32
    }
}

/// Result of a resolved landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub platform: PlatformId,
    /// `true` when this landing added the platform to the reached-set.
    pub first_visit: bool,
}

/// Would `player`, after this tick's move, land on `platform`?
pub fn lands_on(player: &Player, platform: &Platform, config: &GameConfig) -> bool {
    if player.vel.y < 0.0 {
        return false;
    }
    let overlaps_x = player.right() > platform.left() && player.left() < platform.right();
    overlaps_x
        && player.bottom() >= platform.top()
        && player.previous_bottom() <= platform.top() + config.landing_tolerance
}

/// Snap `player` onto `platform`: bottom edge on the top surface, motion stopped.
fn settle_on(player: &mut Player, platform: &Platform) {
    player.pos.y = platform.top() - player.size.y;
    player.vel.y = 0.0;
    player.vel.x = 0.0;
    player.grounded = true;
    player.current_platform = Some(platform.id);
}

/// Resolve at most one landing for this tick.
///
/// `grounded` and `current_platform` are cleared up front, so a player who
/// misses every platform is always reported airborne.  Platforms are scanned
/// in sequence order and the first match wins.
pub fn resolve_landing(
    player: &mut Player,
    platforms: &PlatformField,
    reached: &mut ReachedSet,
    config: &GameConfig,
) -> Option<Landing> {
    player.grounded = false;
    player.current_platform = None;

    if player.vel.y < 0.0 {
        return None;
    }

    let platform = platforms.iter().find(|p| lands_on(player, p, config))?;
    settle_on(player, platform);
    let first_visit = reached.insert(platform.id);
    Some(Landing {
        platform: platform.id,
        first_visit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn platform(id: u64, x: f32, y: f32, w: f32) -> Platform {
        Platform {
            id: PlatformId(id),
            pos: Vec2::new(x, y),
            size: Vec2::new(w, 20.0),
        }
    }

    fn falling_player(x: f32, y: f32, vy: f32) -> Player {
        let mut player = Player::at_start(&config());
        player.pos = Vec2::new(x, y);
        player.vel = Vec2::new(4.0, vy);
        player.grounded = false;
        player.current_platform = None;
        player
    }

    #[test]
    fn landing_requires_horizontal_overlap() {
        let p = platform(1, 300.0, 400.0, 100.0);
        let config = config();

        // Bottom at 402, previous bottom at 396.
        assert!(lands_on(&falling_player(350.0, 372.0, 6.0), &p, &config));
        // Touching edges do not overlap.
        assert!(!lands_on(&falling_player(270.0, 372.0, 6.0), &p, &config));
        assert!(!lands_on(&falling_player(400.0, 372.0, 6.0), &p, &config));
    }

    #[test]
    fn ascending_player_passes_through() {
        let p = platform(1, 300.0, 400.0, 100.0);
        let player = falling_player(350.0, 372.0, -3.0);
        assert!(!lands_on(&player, &p, &config()));
    }

    #[test]
    fn fast_fall_is_caught_by_swept_test() {
        let p = platform(1, 300.0, 400.0, 100.0);
        // Fell 40 units this tick: bottom 430 is below the platform's own bottom
        // edge (420), but the pre-move bottom (390) was above the top.
        let player = falling_player(350.0, 400.0, 40.0);
        assert!(lands_on(&player, &p, &config()));
    }

    #[test]
    fn player_already_below_surface_is_not_pulled_up() {
        let p = platform(1, 300.0, 400.0, 100.0);
        // Pre-move bottom at 406: more than the 5-unit tolerance below the top.
        let player = falling_player(350.0, 378.0, 2.0);
        assert!(!lands_on(&player, &p, &config()));
        // Exactly at the tolerance still lands.
        let player = falling_player(350.0, 377.0, 2.0);
        assert!(lands_on(&player, &p, &config()));
    }

    #[test]
    fn landing_snaps_and_records_first_visit() {
        let config = config();
        let field = PlatformField::with_seed(&config, 8);
        let target = *field.get(PlatformId(3)).unwrap();
        let mut player = falling_player(target.left() + 10.0, target.top() - 27.0, 6.0);
        let mut reached = ReachedSet::default();

        let landing = resolve_landing(&mut player, &field, &mut reached, &config);

        assert_eq!(
            landing,
            Some(Landing {
                platform: target.id,
                first_visit: true
            })
        );
        assert_eq!(player.bottom(), target.top());
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(player.grounded);
        assert_eq!(player.current_platform, Some(target.id));
        assert!(reached.contains(target.id));
        assert_eq!(reached.score(), 1);

        // Second landing on the same platform is not a first visit.
        player.vel.y = 0.5;
        player.pos.y += 0.5;
        let again = resolve_landing(&mut player, &field, &mut reached, &config);
        assert_eq!(again.map(|l| l.first_visit), Some(false));
        assert_eq!(reached.score(), 1);
    }

    #[test]
    fn resting_is_idempotent_across_ticks() {
        let config = config();
        let field = PlatformField::with_seed(&config, 2);
        let mut player = Player::at_start(&config);
        let mut reached = ReachedSet::default();

        for _ in 0..120 {
            // What physics does to a resting player each tick.
            player.vel.y += config.gravity;
            player.pos += player.vel;
            let landing = resolve_landing(&mut player, &field, &mut reached, &config);
            assert_eq!(landing.map(|l| l.platform), Some(PlatformId::START));
            assert!(player.grounded);
            assert_eq!(player.bottom(), config.start_platform_y);
        }
        assert_eq!(reached.score(), 0);
    }

    #[test]
    fn miss_clears_grounded_and_current_platform() {
        let config = config();
        let field = PlatformField::with_seed(&config, 2);
        let mut player = Player::at_start(&config);
        player.pos.y = 100.0;
        player.vel.y = 1.0;

        assert_eq!(resolve_landing(&mut player, &field, &mut ReachedSet::default(), &config), None);
        assert!(!player.grounded);
        assert_eq!(player.current_platform, None);
    }

    #[test]
    fn empty_field_never_lands() {
        let config = config();
        let mut field = PlatformField::with_seed(&config, 2);
        field.retire(1.0e6, &config);
        assert!(field.is_empty());
        let mut player = falling_player(0.0, 372.0, 6.0);
        let mut reached = ReachedSet::default();
        assert_eq!(resolve_landing(&mut player, &field, &mut reached, &config), None);
        assert_eq!(reached.len(), 1);
    }

    #[test]
    fn reached_set_starts_with_the_start_platform() {
        let reached = ReachedSet::default();
        assert!(reached.contains(PlatformId::START));
        assert_eq!(reached.score(), 0);
    }
}
