use bevy::prelude::*;

use super::Screen;
use crate::game::ActiveSession;
use crate::ui::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::GameOver), enter_game_over);
    app.add_systems(
        Update,
        handle_game_over_action.run_if(in_state(Screen::GameOver)),
    );
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum GameOverAction {
    Home,
    #[cfg(not(target_family = "wasm"))]
    Exit,
}

fn enter_game_over(mut commands: Commands, session: Res<ActiveSession>) {
    let (length, apples) = session
        .game()
        .map_or((0, 0), |game| (game.snake().length(), game.apples_eaten()));
    commands
        .ui_root()
        .insert(StateScoped(Screen::GameOver))
        .with_children(|children| {
            children.header("Game Over");
            children.label(format!("Apples eaten: {apples}"));
            children.label(format!("Final length: {length}"));
            children.button("Home Screen").insert(GameOverAction::Home);
            #[cfg(not(target_family = "wasm"))]
            children.button("Exit").insert(GameOverAction::Exit);
        });
}

fn handle_game_over_action(
    mut session: ResMut<ActiveSession>,
    #[cfg(not(target_family = "wasm"))] mut app_exit: EventWriter<AppExit>,
    mut button_query: InteractionQuery<&GameOverAction>,
) {
    for (interaction, action) in &mut button_query {
        if matches!(interaction, Interaction::Pressed) {
            match action {
                GameOverAction::Home => session.return_home(),
                #[cfg(not(target_family = "wasm"))]
                GameOverAction::Exit => {
                    app_exit.send(AppExit::Success);
                }
            }
        }
    }
}
