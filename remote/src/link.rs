use thiserror::Error;

use crate::{AxisCommand, StickFrame};

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("link i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("link is not connected")]
    NotConnected,

    #[error("drone rejected command: {0}")]
    Rejected(String),

    #[error("timed out waiting for drone reply")]
    Timeout,
}

/// Pollable flight state readout from the drone.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightTelemetry {
    pub flying: bool,
    pub battery_low: bool,
    pub battery_critical: bool,
}

/// Wireless control link to the drone.
///
/// Connection management, packet framing and telemetry reception all live
/// behind this seam; the controller only decides what to send and when.
pub trait DroneLink {
    fn connect(&mut self) -> Result<(), LinkError>;

    fn disconnect(&mut self);

    fn take_off(&mut self) -> Result<(), LinkError>;

    fn land(&mut self) -> Result<(), LinkError>;

    /// Stop all motion and hold position.
    fn hover(&mut self) -> Result<(), LinkError>;

    /// Send all four axes atomically as one stick update.
    fn update_sticks(&mut self, sticks: StickFrame) -> Result<(), LinkError>;

    /// Issue one speed-based directional primitive.
    fn steer(&mut self, command: AxisCommand) -> Result<(), LinkError>;

    /// Latest flight telemetry. Never blocks; returns the default readout
    /// until the link has received any.
    fn telemetry(&self) -> FlightTelemetry;
}
