mod controller;
mod dispatch;
mod gesture;
mod link;
mod mapper;
mod types;

pub use controller::Controller;
pub use dispatch::{
    pack_axis, split_axis, split_vector, AxisCommand, Direction, StickEncoding, StickFrame,
};
pub use gesture::{GestureDetector, GRAVITY};
pub use link::{DroneLink, FlightTelemetry, LinkError};
pub use mapper::{map_tilt, map_touch};
pub use types::{AccelSample, ControlVector, TouchPhase, Viewport};
