use std::time::Instant;

use crate::dispatch::{split_vector, StickEncoding, StickFrame};
use crate::{
    mapper, AccelSample, ControlVector, DroneLink, FlightTelemetry, GestureDetector, TouchPhase,
    Viewport,
};

/// Handheld controller state, threaded through the host event handlers.
///
/// The host delivers one event at a time (touch, accelerometer sample,
/// lifecycle change); each handler runs to completion and every fallible
/// link call is logged and dropped rather than propagated.
pub struct Controller<L: DroneLink> {
    link: L,
    axes: ControlVector,
    flying: bool,
    detector: GestureDetector,
    encoding: StickEncoding,
    telemetry: FlightTelemetry,
}

impl<L: DroneLink> Controller<L> {
    pub fn new(link: L, encoding: StickEncoding) -> Self {
        Controller {
            link,
            axes: ControlVector::default(),
            flying: false,
            detector: GestureDetector::new(),
            encoding,
            telemetry: FlightTelemetry::default(),
        }
    }

    pub fn is_flying(&self) -> bool {
        self.flying
    }

    pub fn telemetry(&self) -> FlightTelemetry {
        self.telemetry
    }

    pub fn axes(&self) -> ControlVector {
        self.axes
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// Host became visible: bring the link up. Failure is non-fatal, the
    /// control loop keeps running and commands have no effect until the
    /// link recovers.
    pub fn on_visible(&mut self) {
        if let Err(err) = self.link.connect() {
            log::warn!("drone link connect failed: {err}");
        }
    }

    /// Host is going away: stop the drone and drop the link.
    pub fn on_hidden(&mut self) {
        self.reset_controls();
        self.link.disconnect();
    }

    pub fn on_touch(&mut self, phase: TouchPhase, x: f32, y: f32, viewport: Viewport) {
        if phase == TouchPhase::Ended {
            self.axes.yaw = 0.0;
            self.axes.throttle = 0.0;
        } else {
            (self.axes.yaw, self.axes.throttle) = mapper::map_touch(x, y, viewport);
        }
        self.send_controls();
    }

    pub fn on_accel(&mut self, sample: AccelSample, now: Instant) {
        if self.detector.triggered(sample.z, now) {
            self.toggle_flight();
            return;
        }
        (self.axes.roll, self.axes.pitch) = mapper::map_tilt(sample);
        self.send_controls();
        self.telemetry = self.link.telemetry();
    }

    // Accepted gesture: zero the command vector first, then land or take off
    // depending on the current flight state, and flip it.
    fn toggle_flight(&mut self) {
        self.reset_controls();
        let result = if self.flying {
            self.link.land()
        } else {
            self.link.take_off()
        };
        if let Err(err) = result {
            log::warn!("takeoff/land failed: {err}");
        }
        self.flying = !self.flying;
    }

    fn reset_controls(&mut self) {
        self.axes = ControlVector::default();
        self.send_controls();
        if let Err(err) = self.link.hover() {
            log::warn!("hover failed: {err}");
        }
    }

    fn send_controls(&mut self) {
        let result = match self.encoding {
            StickEncoding::Packed => self.link.update_sticks(StickFrame::from(self.axes)),
            StickEncoding::Split => split_vector(self.axes)
                .into_iter()
                .try_for_each(|command| self.link.steer(command)),
        };
        if let Err(err) = result {
            log::warn!("control update failed: {err}");
        }
    }
}
