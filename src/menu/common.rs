use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

pub(super) fn play_again_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
pub(super) fn play_again_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
pub(super) fn play_again_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
pub(super) fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
pub(super) fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
pub(super) fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
pub(super) fn title_color() -> Color {
    Color::WHITE
}
pub(super) fn subtitle_color() -> Color {
    Color::srgb(0.85, 0.85, 0.90)
}
pub(super) fn new_best_color() -> Color {
    Color::srgb(1.0, 0.843, 0.0)
}
pub(super) fn hint_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}

pub(super) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Spawn a bordered button with a single text label.
pub(super) fn labelled_button(
    parent: &mut ChildSpawnerCommands<'_>,
    marker: impl Bundle,
    label: &str,
    (bg, border, text): (Color, Color, Color),
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text),
            ));
        });
}

/// Tint a button's label white on hover and back to `rest` otherwise.
pub(super) fn tint_on_hover(
    interaction: &Interaction,
    children: &Children,
    btn_text: &mut Query<&mut TextColor>,
    rest: Color,
) {
    let color = match interaction {
        Interaction::Hovered => Color::WHITE,
        Interaction::None => rest,
        Interaction::Pressed => return,
    };
    for child in children.iter() {
        if let Ok(mut text_color) = btn_text.get_mut(child) {
            *text_color = TextColor(color);
        }
    }
}
