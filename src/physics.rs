//! Player kinematics: jump thrust, gravity, and position integration.
//!
//! ## Per-tick pipeline
//!
//! 1. [`apply_jump_thrust`]: while the jump is held and under the hold cap,
//!    subtract `jump_power` from `vel.y`; at the cap, force the hold off.
//! 2. [`integrate`]: add gravity, move by velocity, and stop horizontal motion
//!    when resting on a platform between jumps.
//!
//! [`begin_jump`] and [`release_jump`] are the edge-triggered inputs that feed
//! the pipeline.  There is no terminal velocity: platform placement already
//! bounds how far a jump can climb (see [`GameConfig::max_jump_height`]).

use crate::config::GameConfig;
use crate::player::{JumpState, Player};

/// Start a jump if the player is grounded and not already jumping.
///
/// Sets the forward jump speed; nothing in this module alters `vel.x` again
/// until the player rests on a platform.  Returns `true` when the jump starts.
pub fn begin_jump(player: &mut Player, jump: &mut JumpState, config: &GameConfig) -> bool {
    if !player.grounded || jump.holding {
        return false;
    }
    jump.holding = true;
    jump.hold_ticks = 0;
    player.vel.x = config.jump_forward_speed;
    true
}

/// Cut jump thrust immediately.
pub fn release_jump(jump: &mut JumpState) {
    jump.holding = false;
}

/// Apply one tick of continuous jump thrust.
///
/// Once `hold_ticks` reaches `max_jump_hold` the hold is forced off regardless
/// of whether the jump key is still down.
pub fn apply_jump_thrust(player: &mut Player, jump: &mut JumpState, config: &GameConfig) {
    if !jump.holding {
        return;
    }
    if jump.hold_ticks < config.max_jump_hold {
        player.vel.y -= config.jump_power;
        jump.hold_ticks += 1;
    } else {
        jump.holding = false;
    }
}

/// Apply gravity, advance the position by one tick of velocity, and clear
/// horizontal velocity while grounded and not jumping.
///
/// `grounded` here is the flag resolved by the previous tick's collision pass.
pub fn integrate(player: &mut Player, jump: &JumpState, config: &GameConfig) {
    player.vel.y += config.gravity;
    player.pos += player.vel;

    if player.grounded && !jump.holding {
        player.vel.x = 0.0;
    }
}

/// Thrust followed by integration: the whole physics sub-step of a tick.
pub fn step(player: &mut Player, jump: &mut JumpState, config: &GameConfig) {
    apply_jump_thrust(player, jump, config);
    integrate(player, jump, config);
}
