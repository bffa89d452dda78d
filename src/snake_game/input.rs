/// Keys the core understands. The host maps physical keys onto these.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum GameKey {
    TurnLeft,
    TurnRight,
    /// Camera W/S/A/D.
    CameraForward,
    CameraBack,
    CameraLeft,
    CameraRight,
    /// Camera Z/X.
    ZoomIn,
    ZoomOut,
}

/// Things the player can click on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TapTarget {
    Apple,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InputEvent {
    Key(GameKey),
    Tap(TapTarget),
}
