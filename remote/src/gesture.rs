use std::time::{Duration, Instant};

/// Standard gravity, m/s².
pub const GRAVITY: f32 = 9.8;

// A sample has to deviate from gravity by more than this ratio to read as a
// deliberate shake rather than ordinary handling.
const TRIGGER_RATIO: f32 = 3.0;

const DEBOUNCE: Duration = Duration::from_secs(1);

/// Edge-triggered takeoff/land gesture detector on the accelerometer
/// z-component, debounced so one physical motion toggles exactly once.
#[derive(Debug)]
pub struct GestureDetector {
    debounce: Duration,
    last_toggle: Option<Instant>,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDetector {
    pub fn new() -> Self {
        Self::with_debounce(DEBOUNCE)
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        GestureDetector {
            debounce,
            last_toggle: None,
        }
    }

    /// Returns true when the sample is an accepted toggle gesture. The caller
    /// supplies the timestamp so the debounce window is testable.
    pub fn triggered(&mut self, accel_z: f32, now: Instant) -> bool {
        if (accel_z / GRAVITY - 1.0).abs() <= TRIGGER_RATIO {
            return false;
        }
        if let Some(last) = self.last_toggle {
            if now.duration_since(last) < self.debounce {
                return false;
            }
        }
        self.last_toggle = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // > 3x gravity deviation, well past the trigger threshold.
    const SHAKE: f32 = 40.0;

    #[test]
    fn test_gravity_does_not_trigger() {
        let mut detector = GestureDetector::new();
        assert!(!detector.triggered(GRAVITY, Instant::now()));
        assert!(!detector.triggered(0.0, Instant::now()));
    }

    #[test]
    fn test_free_fall_triggers() {
        // Large negative z is a deviation past the threshold too.
        let mut detector = GestureDetector::new();
        assert!(detector.triggered(-30.0, Instant::now()));
    }

    #[test]
    fn test_debounce_window_swallows_second_trigger() {
        let mut detector = GestureDetector::new();
        let t0 = Instant::now();
        assert!(detector.triggered(SHAKE, t0));
        assert!(!detector.triggered(SHAKE, t0 + Duration::from_millis(300)));
        assert!(!detector.triggered(SHAKE, t0 + Duration::from_millis(999)));
    }

    #[test]
    fn test_separated_triggers_both_fire() {
        let mut detector = GestureDetector::new();
        let t0 = Instant::now();
        assert!(detector.triggered(SHAKE, t0));
        assert!(detector.triggered(SHAKE, t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn test_rejected_trigger_does_not_extend_window() {
        let mut detector = GestureDetector::new();
        let t0 = Instant::now();
        assert!(detector.triggered(SHAKE, t0));
        // Swallowed, so it must not push the window forward.
        assert!(!detector.triggered(SHAKE, t0 + Duration::from_millis(900)));
        assert!(detector.triggered(SHAKE, t0 + Duration::from_millis(1100)));
    }
}
