//! Development tools for the game. This plugin is only enabled in dev builds.

use bevy::{color::palettes::css, dev_tools::states::log_transitions, prelude::*};

use crate::game::ActiveSession;
use crate::screen::Screen;

pub(super) fn plugin(app: &mut App) {
    // Print state transitions in dev builds
    app.add_systems(Update, log_transitions::<Screen>);
    app.add_systems(
        Update,
        draw_collision_bounds.run_if(in_state(Screen::Playing)),
    );
}

/// Outline the wall limits and the apple's eat radius at head height.
fn draw_collision_bounds(mut gizmos: Gizmos, session: Res<ActiveSession>) {
    let Some(game) = session.game() else {
        return;
    };
    let rules = session.rules();
    let y = game.snake().fixed_y();
    let extent = game.arena().half_extent;
    let corners = [
        Vec3::new(-extent, y, -extent),
        Vec3::new(extent, y, -extent),
        Vec3::new(extent, y, extent),
        Vec3::new(-extent, y, extent),
    ];
    for (i, corner) in corners.iter().enumerate() {
        gizmos.line(*corner, corners[(i + 1) % corners.len()], css::ORANGE);
    }
    gizmos.circle(
        game.apple().location(),
        Dir3::Y,
        rules.eat_threshold,
        css::YELLOW,
    );
}
