// Collaborators the calibration menu drives. The implementations (stepper
// engine, EEPROM, LCD, MPU-6050) live outside this crate.

use crate::coords::{DayTime, DegreeTime};
use buttons::Keypad;
use embedded_hal::delay::DelayNs;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum StepperAxis {
    Ra,
    Dec,
}

/// The optional motorized fine-adjustment axes.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum AdjustAxis {
    Azimuth,
    Altitude,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum DriftDirection {
    East,
    West,
}

/// The motor-control engine, as seen from the calibration menu.
///
/// `delay_ms` from [`DelayNs`] is the pause primitive; implementations keep
/// their steppers running while it blocks.
pub trait Mount: DelayNs {
    fn target_ra(&self) -> DayTime;
    fn set_target_ra(&mut self, ra: DayTime);
    fn target_dec(&self) -> DegreeTime;
    fn set_target_dec(&mut self, dec: DegreeTime);
    fn start_slewing_to_target(&mut self);
    fn is_slewing_ra_or_dec(&mut self) -> bool;
    fn set_target_to_home(&mut self);
    fn current_ra(&self) -> DayTime;
    fn sync_position(&mut self, ra: DayTime, dec: DegreeTime);

    /// Tracking speed multiplier, 1.0 being nominal sidereal rate.
    fn speed_calibration(&self) -> f32;
    /// Apply a multiplier; only written to EEPROM when `persist` is set.
    fn set_speed_calibration(&mut self, factor: f32, persist: bool);

    fn steps_per_degree(&self, axis: StepperAxis) -> i32;
    fn set_steps_per_degree(&mut self, axis: StepperAxis, steps: i32);
    fn backlash_correction(&self) -> i32;
    fn set_backlash_correction(&mut self, steps: i32);

    fn start_tracking(&mut self);
    fn stop_tracking(&mut self);

    /// Run one drift pass. `None` with a zero duration ends the maneuver.
    fn run_drift_alignment_phase(&mut self, direction: Option<DriftDirection>, duration_secs: u32);

    fn move_by(&mut self, axis: AdjustAxis, arc_minutes: f32) {
        log::warn!("No {:?} motor, ignoring move of {} arcmin", axis, arc_minutes);
    }

    fn set_speed(&mut self, axis: AdjustAxis, _steps_per_sec: f32) {
        log::warn!("No {:?} motor, ignoring speed change", axis);
    }

    fn is_running(&self, _axis: AdjustAxis) -> bool {
        false
    }

    fn enable_az_alt_motors(&mut self) {}

    fn disable_az_alt_motors(&mut self) {}
}

/// Roll and pitch in degrees, as reported by the level sensor.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct Angles {
    pub roll: f32,
    pub pitch: f32,
}

pub trait Gyro {
    fn startup(&mut self);
    fn shutdown(&mut self);
    fn current_angles(&mut self) -> Angles;
    fn roll_calibration_angle(&self) -> f32;
    fn set_roll_calibration_angle(&mut self, angle: f32);
    fn pitch_calibration_angle(&self) -> f32;
    fn set_pitch_calibration_angle(&mut self, angle: f32);
}

/// A 16x2 character display shared with the other top-level menus.
pub trait Display {
    fn print_at(&mut self, col: u8, row: u8, text: &str);
    /// Hand the display over to the next top-level menu.
    fn next_menu(&mut self);
}

/// Everything one tick of the menu touches.
pub struct Io<'a> {
    pub mount: &'a mut dyn Mount,
    pub gyro: Option<&'a mut dyn Gyro>,
    pub display: &'a mut dyn Display,
    pub keypad: &'a mut dyn Keypad,
}

impl<'a> Io<'a> {
    pub fn gyro(&mut self) -> Option<&mut (dyn Gyro + 'a)> {
        self.gyro.as_deref_mut()
    }

    /// Print a status message on the second row.
    pub fn status(&mut self, text: &str) {
        self.display.print_at(0, 1, text);
    }
}
