//! The game's main screen states and transitions between them.
//! The session owns the phase; the screen state follows it.

mod difficulty_select;
mod game_over;
mod home;
mod map_select;
mod playing;

use bevy::prelude::*;

use crate::game::ActiveSession;
use crate::snake_game::Phase;
use crate::AppSet;

pub(super) fn plugin(app: &mut App) {
    app.init_state::<Screen>();
    app.enable_state_scoped_entities::<Screen>();

    app.add_systems(Update, follow_session_phase.in_set(AppSet::Update));

    app.add_plugins((
        home::plugin,
        map_select::plugin,
        difficulty_select::plugin,
        playing::plugin,
        game_over::plugin,
    ));
}

/// The game's main screen states.
#[derive(States, Debug, Hash, PartialEq, Eq, Clone, Copy, Default)]
pub enum Screen {
    #[default]
    Home,
    MapSelect,
    DifficultySelect,
    Playing,
    GameOver,
}

impl From<Phase> for Screen {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Home => Screen::Home,
            Phase::MapSelect => Screen::MapSelect,
            Phase::DifficultySelect => Screen::DifficultySelect,
            Phase::Playing => Screen::Playing,
            Phase::GameOver => Screen::GameOver,
        }
    }
}

fn follow_session_phase(
    session: Res<ActiveSession>,
    screen: Res<State<Screen>>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let wanted = Screen::from(session.phase());
    if *screen.get() != wanted {
        next_screen.set(wanted);
    }
}
