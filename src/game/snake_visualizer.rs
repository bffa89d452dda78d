//! Feed frame time and player input into the session, and mirror the session back
//! into the scene: segment cubes, the apple, the camera, the chase light and the HUD.

use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::game::assets::SfxKey;
use crate::game::audio::sfx::PlaySfx;
use crate::game::spawn::level::{AppleModel, ChaseLight, SceneAssets, ScoreText, SnakeSegment};
use crate::game::ActiveSession;
use crate::screen::Screen;
use crate::snake_game::{GameEvent, GameKey, InputEvent, TapTarget};
use crate::{AppSet, MainCamera};

/// Clicks within this distance of the apple's center count as a tap.
const APPLE_PICK_RADIUS: f32 = 0.15;
/// Scale of the apple's second shape relative to the first.
const MORPH_SCALE: f32 = 1.5;

const KEY_BINDINGS: [(KeyCode, GameKey); 8] = [
    (KeyCode::ArrowLeft, GameKey::TurnLeft),
    (KeyCode::ArrowRight, GameKey::TurnRight),
    (KeyCode::KeyW, GameKey::CameraForward),
    (KeyCode::KeyS, GameKey::CameraBack),
    (KeyCode::KeyA, GameKey::CameraLeft),
    (KeyCode::KeyD, GameKey::CameraRight),
    (KeyCode::KeyZ, GameKey::ZoomIn),
    (KeyCode::KeyX, GameKey::ZoomOut),
];

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        advance_session
            .in_set(AppSet::TickTimers)
            .run_if(in_state(Screen::Playing)),
    );

    // Register (i.e. record) what the player does via keyboard/mouse.
    app.add_systems(
        Update,
        (record_key_input, record_apple_tap)
            .in_set(AppSet::RecordInput)
            .run_if(in_state(Screen::Playing)),
    );

    app.add_systems(Update, dispatch_game_events.in_set(AppSet::Update));
    app.add_systems(
        Update,
        (sync_segments, sync_apple, sync_camera, sync_chase_light, sync_score)
            .in_set(AppSet::Update)
            .run_if(in_state(Screen::Playing)),
    );
}

fn game_key_of(code: KeyCode) -> Option<GameKey> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == code)
        .map(|(_, key)| *key)
}

fn advance_session(time: Res<Time>, mut session: ResMut<ActiveSession>) {
    session.update(time.delta());
}

/// Every press (including OS key repeat) is one event for the core.
fn record_key_input(
    mut key_events: EventReader<KeyboardInput>,
    mut session: ResMut<ActiveSession>,
) {
    for event in key_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        if event.key_code == KeyCode::Escape {
            session.return_home();
            continue;
        }
        if let Some(key) = game_key_of(event.key_code) {
            session.push_input(InputEvent::Key(key));
        }
    }
}

fn record_apple_tap(
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    apple_query: Query<&GlobalTransform, With<AppleModel>>,
    mut session: ResMut<ActiveSession>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = window_query.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Some(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    for apple in &apple_query {
        if ray_hits_sphere(ray.origin, *ray.direction, apple.translation(), APPLE_PICK_RADIUS) {
            session.push_input(InputEvent::Tap(TapTarget::Apple));
        }
    }
}

/// `direction` must be normalized. Only hits in front of the origin count.
fn ray_hits_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> bool {
    let along = (center - origin).dot(direction);
    if along < 0.0 {
        return false;
    }
    let closest = origin + direction * along;
    closest.distance_squared(center) <= radius * radius
}

fn dispatch_game_events(mut commands: Commands, mut session: ResMut<ActiveSession>) {
    for event in session.drain_events() {
        match event {
            GameEvent::PlaySound(clip) => {
                commands.trigger(PlaySfx::Key(SfxKey::from(clip)));
            }
            GameEvent::GameOver { length, apples } => {
                info!("Final length {length} after {apples} apples");
            }
            // Logged by the session itself, or drawn by the sync systems.
            GameEvent::SessionStarted { .. }
            | GameEvent::AppleEaten { .. }
            | GameEvent::AppleMoved(_)
            | GameEvent::ToggleMorph { .. } => {}
        }
    }
}

fn sync_segments(
    mut commands: Commands,
    session: Res<ActiveSession>,
    scene_assets: Option<Res<SceneAssets>>,
    mut segment_query: Query<(&SnakeSegment, &mut Transform)>,
) {
    let Some(game) = session.game() else {
        return;
    };
    let locations = game.snake().locations();
    let mut spawned = 0;
    for (segment, mut transform) in &mut segment_query {
        if let Some(location) = locations.get(segment.0) {
            transform.translation = *location;
        }
        spawned += 1;
    }
    let Some(scene_assets) = scene_assets else {
        return;
    };
    // Segments only ever get added, so existing entities cover indices 0..spawned.
    for (i, location) in locations.iter().enumerate().skip(spawned) {
        commands.spawn((
            Name::new("Snake Segment"),
            PbrBundle {
                mesh: scene_assets.segment_mesh.clone(),
                material: scene_assets.segment_material.clone(),
                transform: Transform::from_translation(*location),
                ..default()
            },
            SnakeSegment(i),
            StateScoped(Screen::Playing),
        ));
    }
}

fn sync_apple(
    session: Res<ActiveSession>,
    mut apple_query: Query<&mut Transform, With<AppleModel>>,
) {
    let Some(game) = session.game() else {
        return;
    };
    let scale = if game.is_morphed() { MORPH_SCALE } else { 1.0 };
    for mut transform in &mut apple_query {
        transform.translation = game.apple().location();
        transform.scale = Vec3::splat(scale);
    }
}

fn sync_camera(
    session: Res<ActiveSession>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(game) = session.game() else {
        return;
    };
    for mut transform in &mut camera_query {
        *transform = game.camera().transform();
    }
}

/// Hang the spotlight above the head, angled the way the snake is heading.
fn sync_chase_light(
    session: Res<ActiveSession>,
    mut light_query: Query<&mut Transform, With<ChaseLight>>,
) {
    let Some(game) = session.game() else {
        return;
    };
    let head = game.snake().head_location();
    let heading = game.camera().heading();
    let ahead = Vec3::new(heading.cos(), 0.0, heading.sin()) * 0.5;
    for mut transform in &mut light_query {
        *transform = Transform::from_translation(head + Vec3::new(0.0, 0.9, 0.0))
            .looking_at(head + ahead, Vec3::Y);
    }
}

fn sync_score(session: Res<ActiveSession>, mut text_query: Query<&mut Text, With<ScoreText>>) {
    let Some(game) = session.game() else {
        return;
    };
    for mut text in &mut text_query {
        let value = format!(
            "Apples: {}   Length: {}",
            game.apples_eaten(),
            game.snake().length()
        );
        if text.sections[0].value != value {
            text.sections[0].value = value;
        }
    }
}
