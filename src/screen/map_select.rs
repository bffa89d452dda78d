use bevy::prelude::*;

use super::Screen;
use crate::game::ActiveSession;
use crate::snake_game::MapKind;
use crate::ui::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::MapSelect), enter_map_select);
    app.add_systems(
        Update,
        handle_map_action.run_if(in_state(Screen::MapSelect)),
    );
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MapAction {
    Choose(MapKind),
    Back,
}

fn enter_map_select(mut commands: Commands) {
    commands
        .ui_root()
        .insert(StateScoped(Screen::MapSelect))
        .with_children(|children| {
            children.header("Choose a Map");
            children
                .button("Ground")
                .insert(MapAction::Choose(MapKind::Ground));
            children
                .button("Ocean")
                .insert(MapAction::Choose(MapKind::Ocean));
            children.button("Back").insert(MapAction::Back);
        });
}

fn handle_map_action(
    mut session: ResMut<ActiveSession>,
    mut button_query: InteractionQuery<&MapAction>,
) {
    for (interaction, action) in &mut button_query {
        if !matches!(interaction, Interaction::Pressed) {
            continue;
        }
        match *action {
            MapAction::Choose(map) => {
                if let Err(err) = session.select_map(map) {
                    warn!("{err}");
                }
            }
            MapAction::Back => session.return_home(),
        }
    }
}
