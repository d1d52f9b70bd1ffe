use buttons::Key;
use embedded_hal::delay::DelayNs;

/// Repeat delay used whenever no direction key is held.
pub const BASE_DELAY_MS: u32 = 150;

/// How quickly the repeat delay shrinks while a key stays down.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Acceleration {
    pub decay: f64,
    pub floor_ms: u32,
}

impl Acceleration {
    pub const DEFAULT: Acceleration = Acceleration {
        decay: 0.94,
        floor_ms: 25,
    };

    /// Steeper ramp used by the speed trim.
    pub const SPEED: Acceleration = Acceleration {
        decay: 0.96,
        floor_ms: 5,
    };
}

/// Accelerating up/down increment shared by every numeric procedure.
#[derive(Debug, Clone)]
pub struct ProgressiveAdjuster {
    delay_ms: u32,
}

impl Default for ProgressiveAdjuster {
    fn default() -> Self {
        ProgressiveAdjuster {
            delay_ms: BASE_DELAY_MS,
        }
    }
}

impl ProgressiveAdjuster {
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Wait the current repeat delay, then shrink it toward the floor.
    pub fn pace<D: DelayNs + ?Sized>(&mut self, delay: &mut D, acceleration: Acceleration) {
        delay.delay_ms(self.delay_ms);
        let shrunk = (acceleration.decay * self.delay_ms as f64) as u32;
        self.delay_ms = shrunk.max(acceleration.floor_ms);
    }

    pub fn reset(&mut self) {
        self.delay_ms = BASE_DELAY_MS;
    }

    /// Step `value` by one while UP or DOWN is held.
    ///
    /// Returns `false` while adjusting, meaning the key edge of this tick
    /// must not be looked at. No bounds are applied here.
    pub fn adjust<D: DelayNs + ?Sized>(&mut self, value: &mut i32, key: Key, delay: &mut D) -> bool {
        match key.vertical_step() {
            Some(step) => {
                *value = value.saturating_add(step);
                self.pace(delay, Acceleration::DEFAULT);
                false
            }
            None => {
                self.reset();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockMount;

    #[test]
    fn test_up_and_down_step_by_one() {
        let mut mount = MockMount::default();
        let mut adjuster = ProgressiveAdjuster::default();
        let mut value = 10;

        assert!(!adjuster.adjust(&mut value, Key::Up, &mut mount));
        assert_eq!(value, 11);
        assert!(!adjuster.adjust(&mut value, Key::Down, &mut mount));
        assert!(!adjuster.adjust(&mut value, Key::Down, &mut mount));
        assert_eq!(value, 9);
    }

    #[test]
    fn test_delay_decays_to_floor_while_held() {
        let mut mount = MockMount::default();
        let mut adjuster = ProgressiveAdjuster::default();
        let mut value = 0;
        let mut previous = adjuster.delay_ms();

        for _ in 0..100 {
            adjuster.adjust(&mut value, Key::Up, &mut mount);
            assert!(adjuster.delay_ms() <= previous);
            previous = adjuster.delay_ms();
        }
        assert_eq!(adjuster.delay_ms(), 25);
        assert_eq!(value, 100);
    }

    #[test]
    fn test_first_steps_follow_decay() {
        let mut mount = MockMount::default();
        let mut adjuster = ProgressiveAdjuster::default();
        let mut value = 0;

        adjuster.adjust(&mut value, Key::Up, &mut mount);
        assert_eq!(adjuster.delay_ms(), 141);
        adjuster.adjust(&mut value, Key::Up, &mut mount);
        assert_eq!(adjuster.delay_ms(), 132);
        // The wait happens before the delay shrinks
        assert_eq!(mount.clock_ms(), 150 + 141);
    }

    #[test]
    fn test_other_keys_reset_and_allow_edges() {
        let mut mount = MockMount::default();
        let mut adjuster = ProgressiveAdjuster::default();
        let mut value = 0;

        adjuster.adjust(&mut value, Key::Up, &mut mount);
        adjuster.adjust(&mut value, Key::Up, &mut mount);
        assert!(adjuster.adjust(&mut value, Key::Select, &mut mount));
        assert_eq!(adjuster.delay_ms(), BASE_DELAY_MS);
        assert!(adjuster.adjust(&mut value, Key::None, &mut mount));
        assert_eq!(value, 2);
    }

    #[test]
    fn test_speed_acceleration_has_lower_floor() {
        let mut mount = MockMount::default();
        let mut adjuster = ProgressiveAdjuster::default();
        for _ in 0..200 {
            adjuster.pace(&mut mount, Acceleration::SPEED);
        }
        assert_eq!(adjuster.delay_ms(), 5);
    }
}
