use bevy::prelude::*;

use super::Screen;
use crate::game::ActiveSession;
use crate::snake_game::Difficulty;
use crate::ui::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::DifficultySelect), enter_difficulty_select);
    app.add_systems(
        Update,
        handle_difficulty_action.run_if(in_state(Screen::DifficultySelect)),
    );
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum DifficultyAction {
    Choose(Difficulty),
    Back,
}

fn enter_difficulty_select(mut commands: Commands) {
    commands
        .ui_root()
        .insert(StateScoped(Screen::DifficultySelect))
        .with_children(|children| {
            children.header("Choose a Difficulty");
            children
                .button("Easy")
                .insert(DifficultyAction::Choose(Difficulty::Easy));
            children
                .button("Hard")
                .insert(DifficultyAction::Choose(Difficulty::Hard));
            children.warning("Hard: the camera rides behind the head and the lights go down.");
            children.button("Back").insert(DifficultyAction::Back);
        });
}

fn handle_difficulty_action(
    mut session: ResMut<ActiveSession>,
    mut button_query: InteractionQuery<&DifficultyAction>,
) {
    for (interaction, action) in &mut button_query {
        if !matches!(interaction, Interaction::Pressed) {
            continue;
        }
        match *action {
            DifficultyAction::Choose(difficulty) => {
                if let Err(err) = session.select_difficulty(difficulty) {
                    warn!("{err}");
                }
            }
            DifficultyAction::Back => session.return_home(),
        }
    }
}
