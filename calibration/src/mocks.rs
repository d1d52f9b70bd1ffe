// Recording stand-ins for the mount, gyro and display.

use crate::context::CalibrationContext;
use crate::coords::{DayTime, DegreeTime, PolarReference};
use crate::hardware::{
    AdjustAxis, Angles, Display, DriftDirection, Gyro, Io, Mount, StepperAxis,
};
use crate::states::Capabilities;
use buttons::{Key, ScriptedKeypad};
use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, PartialEq)]
pub enum MountEvent {
    TargetRa(DayTime),
    TargetDec(DegreeTime),
    SlewToTarget,
    TargetHome,
    Sync(DayTime, DegreeTime),
    SpeedCalibration { factor: f32, persist: bool },
    StepsPerDegree(StepperAxis, i32),
    Backlash(i32),
    StopTracking,
    StartTracking,
    DriftPhase(Option<DriftDirection>, u32),
    Delay(u32),
    MoveBy(AdjustAxis, f32),
    SetSpeed(AdjustAxis, f32),
    EnableAzAlt,
    DisableAzAlt,
}

pub struct MockMount {
    pub events: Vec<MountEvent>,
    pub target_ra: DayTime,
    pub target_dec: DegreeTime,
    pub current_ra: DayTime,
    pub speed_factor: f32,
    pub stored_speed_factor: f32,
    pub ra_steps: i32,
    pub dec_steps: i32,
    pub backlash: i32,
    /// Polls of `is_slewing_ra_or_dec` left that answer true.
    pub slewing_polls: u32,
    /// Polls granted by every slew command.
    pub slew_duration_polls: u32,
    pub altitude_speed: f32,
    clock_ns: u64,
}

impl Default for MockMount {
    fn default() -> Self {
        MockMount {
            events: Vec::new(),
            target_ra: DayTime::default(),
            target_dec: DegreeTime::default(),
            current_ra: DayTime::new(2, 58, 51),
            speed_factor: 1.0,
            stored_speed_factor: 1.0,
            ra_steps: 314,
            dec_steps: 314,
            backlash: 16,
            slewing_polls: 0,
            slew_duration_polls: 0,
            altitude_speed: 0.0,
            clock_ns: 0,
        }
    }
}

impl MockMount {
    pub fn clock_ms(&self) -> u64 {
        self.clock_ns / 1_000_000
    }

    /// Every speed factor sent, with its persist flag.
    pub fn speed_events(&self) -> Vec<(f32, bool)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                MountEvent::SpeedCalibration { factor, persist } => Some((*factor, *persist)),
                _ => None,
            })
            .collect()
    }

    /// Events other than delays.
    pub fn commands(&self) -> Vec<MountEvent> {
        self.events
            .iter()
            .filter(|event| !matches!(event, MountEvent::Delay(_)))
            .cloned()
            .collect()
    }
}

impl DelayNs for MockMount {
    fn delay_ns(&mut self, ns: u32) {
        self.clock_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(MountEvent::Delay(ms));
        self.clock_ns += ms as u64 * 1_000_000;
    }
}

impl Mount for MockMount {
    fn target_ra(&self) -> DayTime {
        self.target_ra
    }

    fn set_target_ra(&mut self, ra: DayTime) {
        self.target_ra = ra;
        self.events.push(MountEvent::TargetRa(ra));
    }

    fn target_dec(&self) -> DegreeTime {
        self.target_dec
    }

    fn set_target_dec(&mut self, dec: DegreeTime) {
        self.target_dec = dec;
        self.events.push(MountEvent::TargetDec(dec));
    }

    fn start_slewing_to_target(&mut self) {
        self.slewing_polls = self.slew_duration_polls;
        self.events.push(MountEvent::SlewToTarget);
    }

    fn is_slewing_ra_or_dec(&mut self) -> bool {
        if self.slewing_polls > 0 {
            self.slewing_polls -= 1;
            true
        } else {
            false
        }
    }

    fn set_target_to_home(&mut self) {
        self.target_ra = DayTime::default();
        self.target_dec = DegreeTime::default();
        self.events.push(MountEvent::TargetHome);
    }

    fn current_ra(&self) -> DayTime {
        self.current_ra
    }

    fn sync_position(&mut self, ra: DayTime, dec: DegreeTime) {
        self.events.push(MountEvent::Sync(ra, dec));
    }

    fn speed_calibration(&self) -> f32 {
        self.speed_factor
    }

    fn set_speed_calibration(&mut self, factor: f32, persist: bool) {
        self.speed_factor = factor;
        if persist {
            self.stored_speed_factor = factor;
        }
        self.events
            .push(MountEvent::SpeedCalibration { factor, persist });
    }

    fn steps_per_degree(&self, axis: StepperAxis) -> i32 {
        match axis {
            StepperAxis::Ra => self.ra_steps,
            StepperAxis::Dec => self.dec_steps,
        }
    }

    fn set_steps_per_degree(&mut self, axis: StepperAxis, steps: i32) {
        match axis {
            StepperAxis::Ra => self.ra_steps = steps,
            StepperAxis::Dec => self.dec_steps = steps,
        }
        self.events.push(MountEvent::StepsPerDegree(axis, steps));
    }

    fn backlash_correction(&self) -> i32 {
        self.backlash
    }

    fn set_backlash_correction(&mut self, steps: i32) {
        self.backlash = steps;
        self.events.push(MountEvent::Backlash(steps));
    }

    fn start_tracking(&mut self) {
        self.events.push(MountEvent::StartTracking);
    }

    fn stop_tracking(&mut self) {
        self.events.push(MountEvent::StopTracking);
    }

    fn run_drift_alignment_phase(&mut self, direction: Option<DriftDirection>, duration_secs: u32) {
        self.clock_ns += duration_secs as u64 * 1_000_000_000;
        self.events
            .push(MountEvent::DriftPhase(direction, duration_secs));
    }

    fn move_by(&mut self, axis: AdjustAxis, arc_minutes: f32) {
        self.events.push(MountEvent::MoveBy(axis, arc_minutes));
    }

    fn set_speed(&mut self, axis: AdjustAxis, steps_per_sec: f32) {
        if axis == AdjustAxis::Altitude {
            self.altitude_speed = steps_per_sec;
        }
        self.events.push(MountEvent::SetSpeed(axis, steps_per_sec));
    }

    fn is_running(&self, axis: AdjustAxis) -> bool {
        axis == AdjustAxis::Altitude && self.altitude_speed != 0.0
    }

    fn enable_az_alt_motors(&mut self) {
        self.events.push(MountEvent::EnableAzAlt);
    }

    fn disable_az_alt_motors(&mut self) {
        self.events.push(MountEvent::DisableAzAlt);
    }
}

#[derive(Debug, Default)]
pub struct MockGyro {
    pub angles: Angles,
    pub roll_calibration: f32,
    pub pitch_calibration: f32,
    pub running: bool,
    pub startups: u32,
    pub shutdowns: u32,
}

impl Gyro for MockGyro {
    fn startup(&mut self) {
        self.running = true;
        self.startups += 1;
    }

    fn shutdown(&mut self) {
        self.running = false;
        self.shutdowns += 1;
    }

    fn current_angles(&mut self) -> Angles {
        self.angles
    }

    fn roll_calibration_angle(&self) -> f32 {
        self.roll_calibration
    }

    fn set_roll_calibration_angle(&mut self, angle: f32) {
        self.roll_calibration = angle;
    }

    fn pitch_calibration_angle(&self) -> f32 {
        self.pitch_calibration
    }

    fn set_pitch_calibration_angle(&mut self, angle: f32) {
        self.pitch_calibration = angle;
    }
}

/// Keeps the last text printed on each row.
#[derive(Debug, Default)]
pub struct MockDisplay {
    rows: [String; 2],
    pub next_menu_calls: u32,
}

impl MockDisplay {
    pub fn row(&self, row: usize) -> &str {
        &self.rows[row]
    }
}

impl Display for MockDisplay {
    fn print_at(&mut self, _col: u8, row: u8, text: &str) {
        if let Some(line) = self.rows.get_mut(row as usize) {
            *line = text.to_string();
        }
    }

    fn next_menu(&mut self) {
        self.next_menu_calls += 1;
    }
}

/// A mount, gyro, display and keypad wired up for one test.
pub struct Bench {
    pub mount: MockMount,
    pub gyro: MockGyro,
    pub display: MockDisplay,
    pub keypad: ScriptedKeypad,
    pub capabilities: Capabilities,
    pub reference: PolarReference,
}

impl Bench {
    pub fn new() -> Self {
        Bench::with_capabilities(false, false)
    }

    pub fn with_capabilities(azimuth_altitude_motors: bool, gyro_level: bool) -> Self {
        Bench {
            mount: MockMount::default(),
            gyro: MockGyro::default(),
            display: MockDisplay::default(),
            keypad: ScriptedKeypad::default(),
            capabilities: Capabilities {
                azimuth_altitude_motors,
                gyro_level,
            },
            reference: PolarReference {
                polaris_ra: DayTime::new(2, 58, 51),
                northern_hemisphere: true,
            },
        }
    }

    pub fn context(&self) -> CalibrationContext {
        CalibrationContext::new(self.capabilities, self.reference)
    }

    /// Queue key levels, one per tick.
    pub fn keys(&mut self, frames: impl IntoIterator<Item = Key>) {
        self.keypad = ScriptedKeypad::new(frames);
    }

    pub fn with_io<R>(&mut self, f: impl FnOnce(&mut Io<'_>) -> R) -> R {
        let gyro: Option<&mut dyn Gyro> = if self.capabilities.gyro_level {
            Some(&mut self.gyro)
        } else {
            None
        };
        let mut io = Io {
            mount: &mut self.mount,
            gyro,
            display: &mut self.display,
            keypad: &mut self.keypad,
        };
        f(&mut io)
    }
}
