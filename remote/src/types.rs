/// One accelerometer reading in m/s².
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Current host viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
}

/// Normalized 4-axis command, every component in [-1, 1].
/// Derived fresh from the current touch and tilt state on each input event.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct ControlVector {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub throttle: f32,
}
