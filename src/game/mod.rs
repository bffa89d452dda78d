//! Game mechanics and content.

use bevy::prelude::*;

use crate::snake_game::Session;

pub mod assets;
pub mod audio;
pub mod snake_visualizer;
pub mod spawn;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        audio::plugin,
        assets::plugin,
        spawn::plugin,
        snake_visualizer::plugin,
    ));
}

/// The session behind whatever is on screen. Menus and gameplay both drive it.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveSession(pub Session);
