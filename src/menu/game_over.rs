use super::*;

/// Spawn the game-over overlay centred over the frozen world.
///
/// Shows the final score, the top score, a "NEW BEST SCORE!" line when the run
/// just set one, and Play Again / Quit buttons.
pub(super) fn setup_game_over(mut commands: Commands, game: Res<GameState>) {
    let snapshot = game.snapshot();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    padding: UiRect::all(Val::Px(40.0)),
                    row_gap: Val::Px(12.0),
                    min_width: Val::Px(320.0),
                    ..default()
                })
                .with_children(|card| {
                    card.spawn((
                        Text::new("Game Over!"),
                        TextFont {
                            font_size: 36.0,
                            ..default()
                        },
                        TextColor(title_color()),
                    ));

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new(format!("Score: {}", snapshot.score)),
                        TextFont {
                            font_size: 28.0,
                            ..default()
                        },
                        TextColor(subtitle_color()),
                    ));
                    card.spawn((
                        Text::new(format!("Top Score: {}", snapshot.top_score)),
                        TextFont {
                            font_size: 28.0,
                            ..default()
                        },
                        TextColor(subtitle_color()),
                    ));

                    if snapshot.new_best {
                        card.spawn((
                            Text::new("NEW BEST SCORE!"),
                            TextFont {
                                font_size: 32.0,
                                ..default()
                            },
                            TextColor(new_best_color()),
                        ));
                    }

                    spacer(card, 8.0);

                    labelled_button(
                        card,
                        GameOverPlayAgainButton,
                        "PLAY AGAIN",
                        (play_again_bg(), play_again_border(), play_again_text()),
                    );
                    labelled_button(
                        card,
                        GameOverQuitButton,
                        "QUIT",
                        (quit_bg(), quit_border(), quit_text()),
                    );

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new("Press Space to Restart"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

/// Recursively despawn all game-over overlay entities.
pub(super) fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Play Again / Quit clicks in the game-over overlay.
///
/// Play Again only queues a [`RunInput::Restart`]; the screen flips back to
/// `Playing` once the next fixed tick has actually restarted the run.
#[allow(clippy::type_complexity)]
pub(super) fn game_over_button_system(
    play_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<GameOverPlayAgainButton>),
    >,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<GameOverQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut pending: ResMut<PendingInputs>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, children) in play_query.iter() {
        if *interaction == Interaction::Pressed {
            pending.push(RunInput::Restart);
        }
        tint_on_hover(interaction, children, &mut btn_text, play_again_text());
    }

    for (interaction, children) in quit_query.iter() {
        if *interaction == Interaction::Pressed {
            exit.write(AppExit::Success);
        }
        tint_on_hover(interaction, children, &mut btn_text, quit_text());
    }
}
