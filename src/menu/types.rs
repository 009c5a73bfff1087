use bevy::prelude::*;

/// Top-level screen state.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// A run is in progress.
    #[default]
    Playing,
    /// The player fell off the screen; game-over overlay shown.
    GameOver,
}

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "Play Again" button.
#[derive(Component)]
pub struct GameOverPlayAgainButton;

/// Tags the "Quit" button.
#[derive(Component)]
pub struct GameOverQuitButton;
