use crate::ControlVector;

/// Speed-based directional primitives a link may expose, one opposite pair
/// per control axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Forward,
    Backward,
    Up,
    Down,
    Clockwise,
    CounterClockwise,
}

/// One directional primitive invocation, magnitude 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCommand {
    pub direction: Direction,
    pub magnitude: u8,
}

/// All four axes packed into one stick update, each axis scaled symmetrically
/// around zero over the signed 16-bit range.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickFrame {
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
    pub throttle: i16,
}

/// Which of the two wire encodings the link collaborator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickEncoding {
    /// One atomic `StickFrame` per update.
    Packed,
    /// One signed-magnitude primitive per axis per update.
    Split,
}

/// Scale a normalized axis value to the packed fixed-point encoding.
/// Symmetric: 1.0 and -1.0 map to ±i16::MAX, never i16::MIN.
pub fn pack_axis(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

/// Fold a signed axis value into a single directional primitive: the sign
/// picks one of the two opposite directions, the magnitude is the clamped
/// absolute value scaled to 0..=100.
pub fn split_axis(value: f32, positive: Direction, negative: Direction) -> AxisCommand {
    let value = value.clamp(-1.0, 1.0);
    AxisCommand {
        direction: if value < 0.0 { negative } else { positive },
        magnitude: (value.abs() * 100.0).round() as u8,
    }
}

/// Split-axis encoding of a full command vector.
pub fn split_vector(vector: ControlVector) -> [AxisCommand; 4] {
    [
        split_axis(vector.roll, Direction::Right, Direction::Left),
        split_axis(vector.pitch, Direction::Forward, Direction::Backward),
        split_axis(vector.throttle, Direction::Up, Direction::Down),
        split_axis(vector.yaw, Direction::Clockwise, Direction::CounterClockwise),
    ]
}

impl From<ControlVector> for StickFrame {
    fn from(vector: ControlVector) -> Self {
        StickFrame {
            roll: pack_axis(vector.roll),
            pitch: pack_axis(vector.pitch),
            yaw: pack_axis(vector.yaw),
            throttle: pack_axis(vector.throttle),
        }
    }
}
