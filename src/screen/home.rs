//! The title screen, with the controls spelled out underneath.

use bevy::prelude::*;

use super::Screen;
use crate::game::ActiveSession;
use crate::ui::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Home), enter_home);

    app.register_type::<HomeAction>();
    app.add_systems(Update, handle_home_action.run_if(in_state(Screen::Home)));
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
enum HomeAction {
    Start,
    /// Exit doesn't work well with embedded applications.
    #[cfg(not(target_family = "wasm"))]
    Exit,
}

const HOW_TO_PLAY: [&str; 4] = [
    "Left / Right arrows turn the snake",
    "W A S D move the camera, Z / X zoom (Easy only)",
    "Click the apple to change its shape",
    "Eat apples to grow. Don't hit the walls!",
];

fn enter_home(mut commands: Commands) {
    commands
        .ui_root()
        .insert(StateScoped(Screen::Home))
        .with_children(|children| {
            children.header("3D Snake");
            children.button("Start").insert(HomeAction::Start);
            #[cfg(not(target_family = "wasm"))]
            children.button("Exit").insert(HomeAction::Exit);
            for line in HOW_TO_PLAY {
                children.label(line);
            }
        });
}

fn handle_home_action(
    mut session: ResMut<ActiveSession>,
    #[cfg(not(target_family = "wasm"))] mut app_exit: EventWriter<AppExit>,
    mut button_query: InteractionQuery<&HomeAction>,
) {
    for (interaction, action) in &mut button_query {
        if matches!(interaction, Interaction::Pressed) {
            match action {
                HomeAction::Start => {
                    if let Err(err) = session.open_map_select() {
                        warn!("{err}");
                    }
                }
                #[cfg(not(target_family = "wasm"))]
                HomeAction::Exit => {
                    app_exit.send(AppExit::Success);
                }
            }
        }
    }
}
