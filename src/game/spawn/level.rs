//! Spawn the arena: ground, border walls, billboard, lights, the apple and the HUD.
//! Snake segments are spawned on demand by the visualizer as the snake grows.

use bevy::prelude::*;

use crate::config::GameSettings;
use crate::game::ActiveSession;
use crate::screen::Screen;
use crate::snake_game::{Difficulty, MapKind};
use crate::ui::palette::LABEL_TEXT;
use crate::{AppSet, MainCamera};

pub(super) fn plugin(app: &mut App) {
    app.observe(spawn_level);
    app.add_systems(
        Update,
        face_billboard_to_camera
            .in_set(AppSet::Update)
            .run_if(in_state(Screen::Playing)),
    );
    app.add_systems(OnExit(Screen::Playing), restore_menu_lighting);
}

#[derive(Event, Debug)]
pub struct SpawnLevel;

/// One body cube, by its index into the snake's chain.
#[derive(Component, Debug)]
pub struct SnakeSegment(pub usize);

#[derive(Component, Debug)]
pub struct AppleModel;

#[derive(Component, Debug)]
pub struct Billboard;

/// Hard mode's spotlight, kept above the head.
#[derive(Component, Debug)]
pub struct ChaseLight;

#[derive(Component, Debug)]
pub struct ScoreText;

/// Shared handles for segments spawned after the level is up.
#[derive(Resource)]
pub struct SceneAssets {
    pub segment_mesh: Handle<Mesh>,
    pub segment_material: Handle<StandardMaterial>,
}

const GROUND_Y: f32 = -0.5;
const BORDER_Y: f32 = -0.45;
const BORDER_THICKNESS: f32 = 0.1;
const SEGMENT_SIZE: f32 = 0.2;
const APPLE_RADIUS: f32 = 0.06;

fn ground_color(map: MapKind) -> Color {
    match map {
        MapKind::Ground => Color::srgb(0.42, 0.55, 0.27),
        MapKind::Ocean => Color::srgb(0.12, 0.36, 0.66),
    }
}

fn spawn_level(
    _trigger: Trigger<SpawnLevel>,
    mut commands: Commands,
    session: Res<ActiveSession>,
    settings: Res<GameSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut clear_color: ResMut<ClearColor>,
    mut ambient: ResMut<AmbientLight>,
) {
    let Some(game) = session.game() else {
        warn!("SpawnLevel with no game in progress");
        return;
    };
    let extent = settings.arena_half_extent;
    let side = extent * 2.0;

    match game.difficulty() {
        Difficulty::Easy => {
            clear_color.0 = Color::srgb(0.2, 0.2, 0.5);
            *ambient = AmbientLight {
                color: Color::WHITE,
                brightness: 600.0,
            };
            commands.spawn((
                Name::new("Sun"),
                DirectionalLightBundle {
                    directional_light: DirectionalLight { illuminance: 4000.0, ..default() },
                    transform: Transform::from_xyz(2.0, 6.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
                    ..default()
                },
                StateScoped(Screen::Playing),
            ));
        }
        Difficulty::Hard => {
            clear_color.0 = Color::srgb(0.1, 0.1, 0.1);
            *ambient = AmbientLight {
                color: Color::WHITE,
                brightness: 40.0,
            };
            commands.spawn((
                Name::new("Chase Light"),
                SpotLightBundle {
                    spot_light: SpotLight {
                        intensity: 200_000.0,
                        range: 6.0,
                        outer_angle: std::f32::consts::FRAC_PI_4,
                        inner_angle: std::f32::consts::FRAC_PI_8,
                        ..default()
                    },
                    transform: Transform::from_xyz(0.0, 0.5, 1.0)
                        .looking_at(Vec3::ZERO, Vec3::Y),
                    ..default()
                },
                ChaseLight,
                StateScoped(Screen::Playing),
            ));
        }
    }

    commands.spawn((
        Name::new("Ground"),
        PbrBundle {
            mesh: meshes.add(Cuboid::new(side, 0.01, side)),
            material: materials.add(ground_color(game.map())),
            transform: Transform::from_xyz(0.0, GROUND_Y, 0.0),
            ..default()
        },
        StateScoped(Screen::Playing),
    ));

    let walls = [
        (
            "Left Border",
            Vec3::new(-extent, BORDER_Y, 0.0),
            Vec3::new(BORDER_THICKNESS, 1.0, side),
            Color::srgb(1.0, 0.0, 0.0),
        ),
        (
            "Right Border",
            Vec3::new(extent, BORDER_Y, 0.0),
            Vec3::new(BORDER_THICKNESS, 1.0, side),
            Color::srgb(0.0, 1.0, 0.0),
        ),
        (
            "Top Border",
            Vec3::new(0.0, BORDER_Y, extent),
            Vec3::new(side, 1.0, BORDER_THICKNESS),
            Color::srgb(0.0, 0.0, 1.0),
        ),
        (
            "Bottom Border",
            Vec3::new(0.0, BORDER_Y, -extent),
            Vec3::new(side, 1.0, BORDER_THICKNESS),
            Color::srgb(1.0, 1.0, 0.0),
        ),
    ];
    for (name, position, size, color) in walls {
        commands.spawn((
            Name::new(name),
            PbrBundle {
                mesh: meshes.add(Cuboid::from_size(size)),
                material: materials.add(StandardMaterial {
                    base_color: color,
                    unlit: true,
                    ..default()
                }),
                transform: Transform::from_translation(position),
                ..default()
            },
            StateScoped(Screen::Playing),
        ));
    }

    commands.spawn((
        Name::new("Billboard"),
        PbrBundle {
            mesh: meshes.add(Rectangle::new(2.0, 2.0)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.0, 0.0),
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            }),
            transform: Transform::from_xyz(0.0, 3.0, -extent).with_scale(Vec3::splat(3.0)),
            ..default()
        },
        Billboard,
        StateScoped(Screen::Playing),
    ));

    commands.spawn((
        Name::new("Apple"),
        PbrBundle {
            mesh: meshes.add(Sphere::new(APPLE_RADIUS)),
            material: materials.add(Color::srgb(1.0, 0.0, 0.0)),
            transform: Transform::from_translation(game.apple().location()),
            ..default()
        },
        AppleModel,
        StateScoped(Screen::Playing),
    ));

    commands.spawn((
        Name::new("Score"),
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 24.0,
                color: LABEL_TEXT,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        }),
        ScoreText,
        StateScoped(Screen::Playing),
    ));

    commands.insert_resource(SceneAssets {
        segment_mesh: meshes.add(Cuboid::from_length(SEGMENT_SIZE)),
        segment_material: materials.add(Color::srgb(0.0, 1.0, 0.0)),
    });
}

/// Keep the billboard's front (+Z) turned toward the camera, pivoting about its center.
fn face_billboard_to_camera(
    camera_query: Query<&Transform, With<MainCamera>>,
    mut billboard_query: Query<&mut Transform, (With<Billboard>, Without<MainCamera>)>,
) {
    let Ok(camera) = camera_query.get_single() else {
        return;
    };
    for mut transform in &mut billboard_query {
        let away = 2.0 * transform.translation - camera.translation;
        transform.look_at(away, Vec3::Y);
    }
}

fn restore_menu_lighting(mut clear_color: ResMut<ClearColor>, mut ambient: ResMut<AmbientLight>) {
    *clear_color = ClearColor::default();
    *ambient = AmbientLight::default();
}
