use bevy::{prelude::*, utils::HashMap};

use crate::snake_game::Clip;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HandleMap<SfxKey>>();
    app.init_resource::<HandleMap<SfxKey>>();
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Reflect, Debug)]
pub enum SfxKey {
    ButtonHover,
    ButtonPress,
    AppleEaten,
    Crash,
}

impl From<Clip> for SfxKey {
    fn from(clip: Clip) -> Self {
        match clip {
            Clip::AppleEaten => SfxKey::AppleEaten,
            Clip::Crash => SfxKey::Crash,
        }
    }
}

impl AssetKey for SfxKey {
    type Asset = AudioSource;
}

impl FromWorld for HandleMap<SfxKey> {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        [
            ( SfxKey::ButtonHover, asset_server.load("audio/sfx/button_hover.ogg") ),
            ( SfxKey::ButtonPress, asset_server.load("audio/sfx/button_press.ogg") ),
            ( SfxKey::AppleEaten,  asset_server.load("audio/sfx/apple_eaten.ogg") ),
            ( SfxKey::Crash,       asset_server.load("audio/sfx/crash.ogg") ),
        ]
        .into()
    }
}

pub trait AssetKey: Sized {
    type Asset: Asset;
}

#[derive(Resource, Reflect, Deref, DerefMut)]
#[reflect(Resource)]
pub struct HandleMap<K: AssetKey>(HashMap<K, Handle<K::Asset>>);

impl<K: AssetKey, T> From<T> for HandleMap<K>
where
    T: Into<HashMap<K, Handle<K::Asset>>>,
{
    fn from(value: T) -> Self {
        Self(value.into())
    }
}
