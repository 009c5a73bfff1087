//! The player's body and jump charge.
//!
//! Both types are plain data: [`crate::physics`] integrates them and
//! [`crate::collision`] resolves them against the platform sequence.

use crate::config::GameConfig;
use crate::platforms::PlatformId;
use bevy::prelude::*;

/// The runner.
///
/// `pos` is the top-left corner of the bounding box in world units (`y` grows
/// downward).  `current_platform` is a back-reference by id only: platforms are
/// retired while the player lives on, so callers must look the id up in the
/// platform sequence and tolerate a miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub current_platform: Option<PlatformId>,
}

impl Player {
    /// Player standing at rest on the starting platform.
    pub fn at_start(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.player_start_x, config.player_start_y()),
            vel: Vec2::ZERO,
            size: Vec2::new(config.player_width, config.player_height),
            grounded: true,
            current_platform: Some(PlatformId::START),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Bottom edge before this tick's vertical displacement was applied.
    #[inline]
    pub fn previous_bottom(&self) -> f32 {
        self.bottom() - self.vel.y
    }
}

/// Jump-hold state: whether thrust is active and for how many ticks it has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpState {
    pub holding: bool,
    pub hold_ticks: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pose_stands_on_the_start_platform() {
        let config = GameConfig::default();
        let player = Player::at_start(&config);

        assert_eq!(player.pos, Vec2::new(100.0, 370.0));
        assert_eq!(player.bottom(), config.start_platform_y);
        assert!(player.grounded);
        assert_eq!(player.current_platform, Some(PlatformId::START));
    }

    #[test]
    fn previous_bottom_undoes_vertical_velocity() {
        let mut player = Player::at_start(&GameConfig::default());
        player.pos.y = 380.0;
        player.vel.y = 12.0;

        assert_eq!(player.bottom(), 410.0);
        assert_eq!(player.previous_bottom(), 398.0);
    }
}
