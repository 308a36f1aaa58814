use crate::{AccelSample, Viewport};

const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

/// Map a touch position to (yaw, throttle), each in [-1, 1].
///
/// The screen is a virtual stick: horizontal position steers yaw, vertical
/// position drives vertical throttle, with the center mapping to zero on both.
/// A degenerate viewport (under 2 px on either side) yields (0, 0).
pub fn map_touch(x: f32, y: f32, viewport: Viewport) -> (f32, f32) {
    if viewport.width < 2.0 || viewport.height < 2.0 {
        return (0.0, 0.0);
    }
    let yaw = 2.0 * x / (viewport.width - 1.0) - 1.0;
    let throttle = -(2.0 * y / (viewport.height - 1.0) - 1.0);
    (yaw.clamp(-1.0, 1.0), throttle.clamp(-1.0, 1.0))
}

/// Map an accelerometer sample to (roll, pitch), each in [-1, 1].
///
/// Each angle is the tilt of one axis against the hypotenuse of the other
/// two, normalized so a quarter turn commands full deflection. A zero
/// hypotenuse defines the angle as zero, so the output is total and finite.
pub fn map_tilt(accel: AccelSample) -> (f32, f32) {
    let mut roll = 0.0;
    let hyp = accel.x.hypot(accel.z);
    if hyp != 0.0 {
        roll = (accel.y / hyp).atan() / HALF_PI;
    }
    let mut pitch = 0.0;
    let hyp = accel.y.hypot(accel.z);
    if hyp != 0.0 {
        pitch = -(accel.x / hyp).atan() / HALF_PI;
    }
    (roll.clamp(-1.0, 1.0), pitch.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 100.0,
        height: 100.0,
    };

    #[test]
    fn test_touch_center_is_neutral() {
        let (yaw, throttle) = map_touch(50.0, 50.0, VIEWPORT);
        assert!(yaw.abs() < 0.02, "center yaw should be near zero, got {yaw}");
        assert!(
            throttle.abs() < 0.02,
            "center throttle should be near zero, got {throttle}"
        );
    }

    #[test]
    fn test_touch_monotonic_and_bounded() {
        let mut last_yaw = f32::NEG_INFINITY;
        for x in 0..100 {
            let (yaw, _) = map_touch(x as f32, 50.0, VIEWPORT);
            assert!(yaw > last_yaw, "yaw should grow with x (x = {x})");
            assert!((-1.0..=1.0).contains(&yaw), "yaw out of range at x = {x}");
            last_yaw = yaw;
        }
        let mut last_throttle = f32::INFINITY;
        for y in 0..100 {
            let (_, throttle) = map_touch(50.0, y as f32, VIEWPORT);
            assert!(throttle < last_throttle, "throttle should fall with y (y = {y})");
            assert!(
                (-1.0..=1.0).contains(&throttle),
                "throttle out of range at y = {y}"
            );
            last_throttle = throttle;
        }
    }

    #[test]
    fn test_touch_edges_saturate() {
        let (yaw, throttle) = map_touch(99.0, 0.0, VIEWPORT);
        assert_eq!(yaw, 1.0);
        assert_eq!(throttle, 1.0);
        let (yaw, throttle) = map_touch(0.0, 99.0, VIEWPORT);
        assert_eq!(yaw, -1.0);
        assert_eq!(throttle, -1.0);
    }

    #[test]
    fn test_touch_degenerate_viewport() {
        let viewport = Viewport {
            width: 1.0,
            height: 0.0,
        };
        assert_eq!(map_touch(10.0, 10.0, viewport), (0.0, 0.0));
    }

    #[test]
    fn test_tilt_level_is_neutral() {
        // Gravity only, device held flat.
        let (roll, pitch) = map_tilt(AccelSample {
            x: 0.0,
            y: 0.0,
            z: 9.8,
        });
        assert!(roll.abs() < 1e-6, "level roll should be zero, got {roll}");
        assert!(pitch.abs() < 1e-6, "level pitch should be zero, got {pitch}");
    }

    #[test]
    fn test_tilt_signs() {
        let (roll, _) = map_tilt(AccelSample {
            x: 0.0,
            y: 4.0,
            z: 9.0,
        });
        assert!(roll > 0.0, "positive y tilt should roll positive");
        let (_, pitch) = map_tilt(AccelSample {
            x: 4.0,
            y: 0.0,
            z: 9.0,
        });
        assert!(pitch < 0.0, "positive x tilt should pitch negative");
    }

    #[test]
    fn test_tilt_zero_hypotenuse_is_finite() {
        // x and z both zero leaves the roll hypotenuse at zero.
        let (roll, pitch) = map_tilt(AccelSample {
            x: 0.0,
            y: 5.0,
            z: 0.0,
        });
        assert!(roll.is_finite() && pitch.is_finite());
        assert_eq!(roll, 0.0, "undefined roll angle should read as zero");

        let (roll, pitch) = map_tilt(AccelSample::default());
        assert_eq!((roll, pitch), (0.0, 0.0));
    }

    #[test]
    fn test_tilt_extreme_sample_stays_in_range() {
        let (roll, pitch) = map_tilt(AccelSample {
            x: -1000.0,
            y: 1000.0,
            z: 0.1,
        });
        assert!((-1.0..=1.0).contains(&roll));
        assert!((-1.0..=1.0).contains(&pitch));
    }
}
