// Host stand-ins for the stepper engine, the MPU-6050 and the 16x2 LCD.

use crate::config::SimulationConfig;
use calibration::{
    AdjustAxis, Angles, DayTime, DegreeTime, Display, DriftDirection, Gyro, Mount, StepperAxis,
};
use embedded_hal::delay::DelayNs;
use heapless::String;
use log::*;
use std::time::Duration;

/// Polls of `is_slewing_ra_or_dec` a slew takes to finish.
const SLEW_POLLS: u32 = 5;

pub struct SimMount {
    clock: Duration,
    target_ra: DayTime,
    target_dec: DegreeTime,
    current_ra: DayTime,
    current_dec: DegreeTime,
    speed_factor: f32,
    stored_speed_factor: f32,
    ra_steps: i32,
    dec_steps: i32,
    backlash: i32,
    tracking: bool,
    slewing_polls: u32,
    altitude_speed: f32,
    az_alt_enabled: bool,
    azimuth_arcmin: f32,
    altitude_arcmin: f32,
}

impl SimMount {
    pub fn new(config: &SimulationConfig) -> Self {
        SimMount {
            clock: Duration::ZERO,
            target_ra: DayTime::default(),
            target_dec: DegreeTime::default(),
            current_ra: DayTime::default(),
            current_dec: DegreeTime::new(90, 0, 0),
            speed_factor: config.speed_factor,
            stored_speed_factor: config.speed_factor,
            ra_steps: config.ra_steps_per_degree,
            dec_steps: config.dec_steps_per_degree,
            backlash: config.backlash_steps,
            tracking: true,
            slewing_polls: 0,
            altitude_speed: 0.0,
            az_alt_enabled: false,
            azimuth_arcmin: 0.0,
            altitude_arcmin: 0.0,
        }
    }

    pub fn report(&self) {
        info!("Mount after {:.1}s of virtual time:", self.clock.as_secs_f32());
        info!("  speed factor   {:.4} (stored {:.4})", self.speed_factor, self.stored_speed_factor);
        info!("  RA steps/deg   {}", self.ra_steps);
        info!("  DEC steps/deg  {}", self.dec_steps);
        info!("  backlash       {}", self.backlash);
        info!("  position       RA {} DEC {}", self.current_ra, self.current_dec);
        info!(
            "  az/alt offset  {:.1} / {:.1} arcmin",
            self.azimuth_arcmin, self.altitude_arcmin
        );
        info!("  tracking       {}", self.tracking);
    }
}

impl DelayNs for SimMount {
    fn delay_ns(&mut self, ns: u32) {
        self.clock += Duration::from_nanos(ns as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        debug!("Delay {}ms", ms);
        self.clock += Duration::from_millis(ms as u64);
    }
}

impl Mount for SimMount {
    fn target_ra(&self) -> DayTime {
        self.target_ra
    }

    fn set_target_ra(&mut self, ra: DayTime) {
        self.target_ra = ra;
    }

    fn target_dec(&self) -> DegreeTime {
        self.target_dec
    }

    fn set_target_dec(&mut self, dec: DegreeTime) {
        self.target_dec = dec;
    }

    fn start_slewing_to_target(&mut self) {
        info!("Slewing to RA {} DEC {}", self.target_ra, self.target_dec);
        self.slewing_polls = SLEW_POLLS;
    }

    fn is_slewing_ra_or_dec(&mut self) -> bool {
        if self.slewing_polls == 0 {
            return false;
        }
        self.slewing_polls -= 1;
        if self.slewing_polls == 0 {
            self.current_ra = self.target_ra;
            self.current_dec = self.target_dec;
            info!("Slew complete");
        }
        true
    }

    fn set_target_to_home(&mut self) {
        self.target_ra = DayTime::default();
        self.target_dec = DegreeTime::new(90, 0, 0);
    }

    fn current_ra(&self) -> DayTime {
        self.current_ra
    }

    fn sync_position(&mut self, ra: DayTime, dec: DegreeTime) {
        info!("Sync to RA {} DEC {}", ra, dec);
        self.current_ra = ra;
        self.current_dec = dec;
    }

    fn speed_calibration(&self) -> f32 {
        self.speed_factor
    }

    fn set_speed_calibration(&mut self, factor: f32, persist: bool) {
        self.speed_factor = factor;
        if persist {
            self.stored_speed_factor = factor;
            info!("EEPROM: speed factor {:.4}", factor);
        }
    }

    fn steps_per_degree(&self, axis: StepperAxis) -> i32 {
        match axis {
            StepperAxis::Ra => self.ra_steps,
            StepperAxis::Dec => self.dec_steps,
        }
    }

    fn set_steps_per_degree(&mut self, axis: StepperAxis, steps: i32) {
        info!("EEPROM: {:?} steps/deg {}", axis, steps);
        match axis {
            StepperAxis::Ra => self.ra_steps = steps,
            StepperAxis::Dec => self.dec_steps = steps,
        }
    }

    fn backlash_correction(&self) -> i32 {
        self.backlash
    }

    fn set_backlash_correction(&mut self, steps: i32) {
        info!("EEPROM: backlash {}", steps);
        self.backlash = steps;
    }

    fn start_tracking(&mut self) {
        info!("Tracking started");
        self.tracking = true;
    }

    fn stop_tracking(&mut self) {
        info!("Tracking stopped");
        self.tracking = false;
    }

    fn run_drift_alignment_phase(&mut self, direction: Option<DriftDirection>, duration_secs: u32) {
        match direction {
            Some(direction) => {
                info!("Drift phase {:?} for {}s", direction, duration_secs);
                self.clock += Duration::from_secs(duration_secs as u64);
            }
            None => info!("Drift maneuver finished"),
        }
    }

    fn move_by(&mut self, axis: AdjustAxis, arc_minutes: f32) {
        if !self.az_alt_enabled {
            warn!("{:?} motor is not powered, ignoring move", axis);
            return;
        }
        info!("Moving {:?} by {} arcmin", axis, arc_minutes);
        match axis {
            AdjustAxis::Azimuth => self.azimuth_arcmin += arc_minutes,
            AdjustAxis::Altitude => self.altitude_arcmin += arc_minutes,
        }
    }

    fn set_speed(&mut self, axis: AdjustAxis, steps_per_sec: f32) {
        if axis == AdjustAxis::Altitude {
            debug!("Altitude motor speed {}", steps_per_sec);
            self.altitude_speed = steps_per_sec;
        }
    }

    fn is_running(&self, axis: AdjustAxis) -> bool {
        axis == AdjustAxis::Altitude && self.altitude_speed != 0.0
    }

    fn enable_az_alt_motors(&mut self) {
        debug!("Az/alt motors on");
        self.az_alt_enabled = true;
    }

    fn disable_az_alt_motors(&mut self) {
        debug!("Az/alt motors off");
        self.az_alt_enabled = false;
        self.altitude_speed = 0.0;
    }
}

pub struct SimGyro {
    angles: Angles,
    roll_calibration: f32,
    pitch_calibration: f32,
    running: bool,
}

impl SimGyro {
    pub fn new(config: &SimulationConfig) -> Self {
        SimGyro {
            angles: Angles {
                roll: config.roll_angle,
                pitch: config.pitch_angle,
            },
            roll_calibration: 0.0,
            pitch_calibration: 0.0,
            running: false,
        }
    }

    pub fn report(&self) {
        info!(
            "Gyro offsets: roll {:.2} pitch {:.2}",
            self.roll_calibration, self.pitch_calibration
        );
    }
}

impl Gyro for SimGyro {
    fn startup(&mut self) {
        debug!("Gyro started");
        self.running = true;
    }

    fn shutdown(&mut self) {
        debug!("Gyro shut down");
        self.running = false;
    }

    fn current_angles(&mut self) -> Angles {
        if !self.running {
            warn!("Gyro read while shut down");
        }
        self.angles
    }

    fn roll_calibration_angle(&self) -> f32 {
        self.roll_calibration
    }

    fn set_roll_calibration_angle(&mut self, angle: f32) {
        info!("EEPROM: roll offset {:.2}", angle);
        self.roll_calibration = angle;
    }

    fn pitch_calibration_angle(&self) -> f32 {
        self.pitch_calibration
    }

    fn set_pitch_calibration_angle(&mut self, angle: f32) {
        info!("EEPROM: pitch offset {:.2}", angle);
        self.pitch_calibration = angle;
    }
}

/// Prints each row of the LCD whenever its text changes.
#[derive(Default)]
pub struct ConsoleDisplay {
    rows: [String<16>; 2],
    menus_left: u32,
}

impl ConsoleDisplay {
    pub fn menus_left(&self) -> u32 {
        self.menus_left
    }
}

impl Display for ConsoleDisplay {
    fn print_at(&mut self, col: u8, row: u8, text: &str) {
        let Some(line) = self.rows.get_mut(row as usize) else {
            warn!("No display row {}", row);
            return;
        };
        let mut next: String<16> = String::new();
        for c in std::iter::repeat(' ').take(col as usize).chain(text.chars()) {
            if next.push(c).is_err() {
                break;
            }
        }
        if *line != next {
            println!("[{}] {:<16}|", row, next.as_str());
            *line = next;
        }
    }

    fn next_menu(&mut self) {
        self.menus_left += 1;
        println!("-- next menu --");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation() -> SimulationConfig {
        SimulationConfig {
            speed_factor: 1.0,
            ra_steps_per_degree: 314,
            dec_steps_per_degree: 314,
            backlash_steps: 16,
            roll_angle: 0.5,
            pitch_angle: -0.5,
            tick_ms: 0,
            script: None,
        }
    }

    #[test]
    fn test_slew_completes_after_polls() {
        let mut mount = SimMount::new(&simulation());
        mount.set_target_ra(DayTime::new(2, 58, 51));
        mount.start_slewing_to_target();

        let polls = std::iter::from_fn(|| Some(mount.is_slewing_ra_or_dec()))
            .take_while(|slewing| *slewing)
            .count();
        assert_eq!(polls, SLEW_POLLS as usize);
        assert_eq!(mount.current_ra(), DayTime::new(2, 58, 51));
    }

    #[test]
    fn test_moves_need_motor_power() {
        let mut mount = SimMount::new(&simulation());
        mount.move_by(AdjustAxis::Azimuth, 5.0);
        assert_eq!(mount.azimuth_arcmin, 0.0);

        mount.enable_az_alt_motors();
        mount.move_by(AdjustAxis::Azimuth, 5.0);
        assert_eq!(mount.azimuth_arcmin, 5.0);
    }

    #[test]
    fn test_drift_advances_clock() {
        let mut mount = SimMount::new(&simulation());
        mount.run_drift_alignment_phase(Some(DriftDirection::East), 27);
        mount.delay_ms(1500);
        assert_eq!(mount.clock, Duration::from_millis(28_500));
    }

    #[test]
    fn test_display_keeps_rows() {
        let mut display = ConsoleDisplay::default();
        display.print_at(0, 1, ">Polar alignment");
        display.print_at(2, 0, "Hi");
        assert_eq!(display.rows[1].as_str(), ">Polar alignment");
        assert_eq!(display.rows[0].as_str(), "  Hi");
        display.next_menu();
        assert_eq!(display.menus_left(), 1);
    }
}
