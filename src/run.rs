//! Run state machine: the owned [`GameState`] aggregate and its per-tick update.
//!
//! ## Phases
//!
//! | Phase      | Ticks                         | Accepted inputs              |
//! |------------|-------------------------------|------------------------------|
//! | `Running`  | full pipeline every tick      | `JumpStart`, `JumpRelease`   |
//! | `GameOver` | frozen                        | `Restart`                    |
//!
//! `Running → GameOver` fires when the player's top edge passes below the
//! screen.  `GameOver → Running` only happens through [`GameState::restart`],
//! which replaces the aggregate wholesale and carries over nothing but the top
//! score and the random source.
//!
//! ## Tick pipeline (fixed order)
//!
//! 1. jump thrust ([`physics::apply_jump_thrust`])
//! 2. gravity + integration ([`physics::integrate`])
//! 3. camera follows the player
//! 4. landing resolution ([`collision::resolve_landing`])
//! 5. generation ([`PlatformField::extend`])
//! 6. retirement ([`PlatformField::retire`])
//! 7. score
//! 8. game-over check

use crate::collision::{self, Landing, ReachedSet};
use crate::config::GameConfig;
use crate::physics;
use crate::platforms::{PlatformField, PlatformId};
use crate::player::{JumpState, Player};
use bevy::prelude::*;

/// Whether the run is live or waiting for a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunPhase {
    #[default]
    Running,
    GameOver,
}

/// Discrete player inputs delivered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunInput {
    JumpStart,
    JumpRelease,
    Restart,
}

/// What happened during one [`GameState::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub landing: Option<Landing>,
    pub spawned: Option<PlatformId>,
    pub retired: usize,
    /// `true` only on the tick the run ended.
    pub game_over: bool,
    /// `true` only on the tick a new top score was set.
    pub new_best: bool,
}

/// Everything a single run needs, plus the top score that outlives it.
#[derive(Resource, Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    player: Player,
    jump: JumpState,
    platforms: PlatformField,
    reached: ReachedSet,
    camera_offset: f32,
    score: u32,
    top_score: u32,
    phase: RunPhase,
    new_best: bool,
}

impl GameState {
    /// A fresh run with an entropy-seeded platform generator.
    pub fn new(config: GameConfig) -> Self {
        let platforms = PlatformField::new(&config);
        Self::fresh(config, platforms, 0)
    }

    /// A fresh run with a reproducible platform layout.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let platforms = PlatformField::with_seed(&config, seed);
        Self::fresh(config, platforms, 0)
    }

    fn fresh(config: GameConfig, platforms: PlatformField, top_score: u32) -> Self {
        let player = Player::at_start(&config);
        let camera_offset = player.pos.x - config.camera_lead;
        Self {
            player,
            jump: JumpState::default(),
            platforms,
            reached: ReachedSet::default(),
            camera_offset,
            score: 0,
            top_score,
            phase: RunPhase::Running,
            new_best: false,
            config,
        }
    }

    /// Replace this run with a fresh one.  Only the top score and the random
    /// source survive.
    pub fn restart(&mut self) {
        let config = self.config.clone();
        let platforms = self.platforms.regenerate(&config);
        *self = Self::fresh(config, platforms, self.top_score);
    }

    /// Apply one input.  Returns `true` if it had an effect.
    ///
    /// Jump inputs are ignored once the run is over; `Restart` is ignored
    /// while it is still running.
    pub fn handle_input(&mut self, input: RunInput) -> bool {
        match (self.phase, input) {
            (RunPhase::Running, RunInput::JumpStart) => {
                physics::begin_jump(&mut self.player, &mut self.jump, &self.config)
            }
            (RunPhase::Running, RunInput::JumpRelease) => {
                let was_holding = self.jump.holding;
                physics::release_jump(&mut self.jump);
                was_holding
            }
            (RunPhase::GameOver, RunInput::Restart) => {
                self.restart();
                true
            }
            _ => false,
        }
    }

    /// Advance the run by one fixed tick.  A no-op while the run is over.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase == RunPhase::GameOver {
            return outcome;
        }

        physics::step(&mut self.player, &mut self.jump, &self.config);
        self.camera_offset = self.player.pos.x - self.config.camera_lead;

        outcome.landing = collision::resolve_landing(
            &mut self.player,
            &self.platforms,
            &mut self.reached,
            &self.config,
        );
        outcome.spawned = self.platforms.extend(self.camera_offset, &self.config);
        outcome.retired = self.platforms.retire(self.camera_offset, &self.config);

        self.score = self.reached.score();

        if self.player.pos.y > self.config.screen_height {
            outcome.game_over = true;
            outcome.new_best = self.end_run();
        }
        outcome
    }

    /// Enter `GameOver`, updating the top score if it was strictly beaten.
    fn end_run(&mut self) -> bool {
        self.phase = RunPhase::GameOver;
        if self.score > self.top_score {
            self.top_score = self.score;
            self.new_best = true;
        }
        self.new_best
    }

    // ── Read-only accessors ──────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn jump(&self) -> &JumpState {
        &self.jump
    }

    pub fn platforms(&self) -> &PlatformField {
        &self.platforms
    }

    pub fn reached(&self) -> &ReachedSet {
        &self.reached
    }

    pub fn camera_offset(&self) -> f32 {
        self.camera_offset
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn top_score(&self) -> u32 {
        self.top_score
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    pub fn new_best(&self) -> bool {
        self.new_best
    }

    /// Build the read-only view handed to presentation after each tick.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: PlayerView {
                pos: self.player.pos,
                size: self.player.size,
                vel: self.player.vel,
                grounded: self.player.grounded,
                current_platform: self.player.current_platform,
            },
            platforms: self
                .platforms
                .iter()
                .map(|p| PlatformView {
                    id: p.id,
                    pos: p.pos,
                    size: p.size,
                    reached: self.reached.contains(p.id),
                })
                .collect(),
            reached_count: self.reached.len(),
            camera_offset: self.camera_offset,
            score: self.score,
            top_score: self.top_score,
            game_over: self.is_game_over(),
            new_best: self.new_best,
        }
    }

    /// Test hook: move the player without running physics.
    #[doc(hidden)]
    pub fn place_player(&mut self, pos: Vec2, vel: Vec2) {
        self.player.pos = pos;
        self.player.vel = vel;
        self.camera_offset = pos.x - self.config.camera_lead;
    }
}

/// Player pose as drawn by presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    pub current_platform: Option<PlatformId>,
}

/// One platform as drawn by presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformView {
    pub id: PlatformId,
    pub pos: Vec2,
    pub size: Vec2,
    pub reached: bool,
}

/// Read-only copy of everything presentation needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    /// Size of the reached-set, start platform included.
    pub reached_count: usize,
    pub camera_offset: f32,
    pub score: u32,
    pub top_score: u32,
    pub game_over: bool,
    pub new_best: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::with_seed(GameConfig::default(), 1234)
    }

    /// Drop the player far below the screen and tick once.
    fn fall_off(game: &mut GameState) -> TickOutcome {
        game.place_player(Vec2::new(5_000.0, 650.0), Vec2::new(0.0, 10.0));
        game.tick()
    }

    #[test]
    fn camera_tracks_player_with_fixed_lead() {
        let mut game = state();
        assert_eq!(game.camera_offset(), 0.0);
        game.handle_input(RunInput::JumpStart);
        for _ in 0..20 {
            game.tick();
            assert_eq!(game.camera_offset(), game.player().pos.x - 100.0);
        }
    }

    #[test]
    fn resting_tick_keeps_player_grounded_on_start() {
        let mut game = state();
        let outcome = game.tick();

        assert_eq!(outcome.landing.map(|l| l.platform), Some(PlatformId::START));
        assert!(game.player().grounded);
        assert_eq!(game.player().pos, Vec2::new(100.0, 370.0));
        assert_eq!(game.player().vel, Vec2::ZERO);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn jump_release_at_tick_five_stops_thrust() {
        let mut game = state();
        assert!(game.handle_input(RunInput::JumpStart));
        assert_eq!(game.player().vel.x, 4.0);

        for _ in 0..5 {
            game.tick();
        }
        // Five ticks of (−0.7 thrust + 0.5 gravity).
        assert!((game.player().vel.y - -1.0).abs() < 1e-4, "vy = {}", game.player().vel.y);
        assert_eq!(game.jump().hold_ticks, 5);

        assert!(game.handle_input(RunInput::JumpRelease));
        game.tick();

        assert_eq!(game.jump().hold_ticks, 5);
        assert!((game.player().vel.y - -0.5).abs() < 1e-4, "vy = {}", game.player().vel.y);
        assert_eq!(game.player().vel.x, 4.0, "forward speed holds while airborne");
        assert!(!game.player().grounded);
    }

    #[test]
    fn jump_start_ignored_in_the_air() {
        let mut game = state();
        game.handle_input(RunInput::JumpStart);
        game.tick();
        game.handle_input(RunInput::JumpRelease);
        assert!(!game.handle_input(RunInput::JumpStart));
    }

    #[test]
    fn game_over_fires_once_and_freezes() {
        let mut game = state();
        let outcome = fall_off(&mut game);
        assert!(outcome.game_over);
        assert!(game.is_game_over());

        let pos = game.player().pos;
        let frozen = game.tick();
        assert_eq!(frozen, TickOutcome::default());
        assert_eq!(game.player().pos, pos);
        assert!(!game.handle_input(RunInput::JumpStart));
    }

    #[test]
    fn zero_score_never_sets_a_new_best() {
        let mut game = state();
        let outcome = fall_off(&mut game);
        assert!(!outcome.new_best);
        assert!(!game.new_best());
        assert_eq!(game.top_score(), 0);
    }

    #[test]
    fn restart_only_from_game_over() {
        let mut game = state();
        assert!(!game.handle_input(RunInput::Restart));
        fall_off(&mut game);
        assert!(game.handle_input(RunInput::Restart));
        assert_eq!(game.phase(), RunPhase::Running);
        assert_eq!(game.player().pos, Vec2::new(100.0, 370.0));
        assert_eq!(game.platforms().len(), 11);
        assert_eq!(game.reached().len(), 1);
    }

    #[test]
    fn snapshot_marks_reached_platforms() {
        let game = state();
        let snap = game.snapshot();
        assert_eq!(snap.platforms.len(), 11);
        assert!(snap.platforms[0].reached);
        assert!(snap.platforms[1..].iter().all(|p| !p.reached));
        assert_eq!(snap.reached_count, 1);
        assert_eq!(snap.player.current_platform, Some(PlatformId::START));
        assert!(!snap.game_over);
    }
}
