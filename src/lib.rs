pub mod autopilot;
pub mod cmdline;
pub mod config;
#[cfg(feature = "dev")]
mod dev_tools;
mod game;
mod screen;
pub mod snake_game;
mod ui;

use bevy::{
    asset::AssetMetaCheck, audio::{AudioPlugin, Volume}, prelude::*, window::WindowResolution
};

use config::GameSettings;
use game::ActiveSession;
use snake_game::{Difficulty, MapKind, Session};

pub const WINDOW_SIZE_X: f32 = 800.0;
pub const WINDOW_SIZE_Y: f32 = 600.0;

pub struct AppPlugin {
    pub settings: GameSettings,
    /// Skip the menus and go straight into a game.
    pub quick_start: Option<(MapKind, Difficulty)>,
}

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        // Order new `AppStep` variants by adding them here:
        app.configure_sets(
            Update,
            (AppSet::TickTimers, AppSet::RecordInput, AppSet::Update).chain(),
        );

        let mut session = Session::new(self.settings.rules());
        if let Some((map, difficulty)) = self.quick_start {
            if let Err(err) = session.start(map, difficulty) {
                warn!("Could not quick start: {err}");
            }
        }
        app.insert_resource(self.settings.clone());
        app.insert_resource(ActiveSession(session));

        // Spawn the main camera, and put it back on the overview whenever the menus come up.
        app.add_systems(Startup, spawn_camera);
        app.add_systems(OnEnter(screen::Screen::Home), reset_camera);

        // Add Bevy plugins.
        app.add_plugins(
            DefaultPlugins
                .set(AssetPlugin {
                    // Wasm builds will check for meta files (that don't exist) if this isn't set.
                    // This causes errors and even panics on web build on itch.
                    // See https://github.com/bevyengine/bevy_github_ci_template/issues/48.
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Window {
                        title: "3D Snake".to_string(),
                        canvas: Some("#bevy".to_string()),
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: true,
                        resolution: WindowResolution::new(WINDOW_SIZE_X, WINDOW_SIZE_Y),
                        ..default()
                    }
                    .into(),
                    ..default()
                })
                .set(AudioPlugin {
                    global_volume: GlobalVolume {
                        volume: Volume::new(0.3),
                    },
                    ..default()
                }),
        );

        // Add other plugins.
        app.add_plugins((game::plugin, screen::plugin, ui::plugin));

        // Enable dev tools for dev builds.
        #[cfg(feature = "dev")]
        app.add_plugins(dev_tools::plugin);
    }
}

/// High-level groupings of systems for the app in the `Update` schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
enum AppSet {
    /// Advance the game session by the frame time.
    TickTimers,
    /// Record player input.
    RecordInput,
    /// Do everything else (consider splitting this into further variants).
    Update,
}

/// The one 3D camera. Its transform is owned by the session's camera rig while playing.
#[derive(Component)]
pub struct MainCamera;

/// The overview pose the orbit camera also starts from: at the orbit eye, facing the snake's start.
fn menu_camera_transform(settings: &GameSettings) -> Transform {
    Transform::from_translation(Vec3::from_array(settings.orbit_eye))
        .looking_at(Vec3::from_array(settings.snake_start), Vec3::Y)
}

fn reset_camera(
    settings: Res<GameSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    for mut transform in &mut camera_query {
        *transform = menu_camera_transform(&settings);
    }
}

fn spawn_camera(mut commands: Commands, settings: Res<GameSettings>) {
    commands.spawn((
        Name::new("Camera"),
        Camera3dBundle {
            transform: menu_camera_transform(&settings),
            ..default()
        },
        MainCamera,
        // Render all UI to this camera.
        // Not strictly necessary since we only use one camera,
        // but if we don't use this component, our UI will disappear as soon
        // as we add another camera. This includes indirect ways of adding cameras like using
        // [ui node outlines](https://bevyengine.org/news/bevy-0-14/#ui-node-outline-gizmos)
        // for debugging. So it's good to have this here for future-proofing.
        IsDefaultUiCamera,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake_game::{CameraMode, CameraRig, Snake};

    #[test]
    fn test_menu_camera_follows_settings() {
        let settings = GameSettings {
            orbit_eye: [3.0, 8.0, -2.0],
            snake_start: [1.0, -0.4, 1.0],
            ..GameSettings::default()
        };
        let transform = menu_camera_transform(&settings);
        assert_eq!(transform.translation, Vec3::new(3.0, 8.0, -2.0));

        // Same pose the orbit rig starts a game with.
        let rules = settings.rules();
        let snake = Snake::new(rules.snake_start, rules.initial_direction);
        let rig = CameraRig::new(CameraMode::OrbitZoom, &rules, &snake);
        assert!(rig.transform().rotation.abs_diff_eq(transform.rotation, 1e-6));
        assert_eq!(rig.transform().translation, transform.translation);
    }
}
