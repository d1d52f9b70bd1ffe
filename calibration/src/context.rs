use crate::adjuster::ProgressiveAdjuster;
use crate::coords::PolarReference;
use crate::navigator::Navigator;
use crate::states::{Capabilities, CalibrationState};

/// Per-phase drift durations in seconds, for nominal 1, 2, 3 and 5 minute runs.
///
/// Each run is two phases plus three 1.5 s pauses.
pub const DRIFT_DURATIONS: [u32; 4] = [27, 57, 87, 147];

pub const DEFAULT_DRIFT_INDEX: usize = 1;

/// Speed trim is kept inside a 16 bit signed range.
pub const SPEED_TRIM_LIMIT: i32 = 32760;

/// Largest single azimuth/altitude move, in arc-minutes.
pub const ADJUSTMENT_LIMIT: i32 = 60;

/// Editable copies of the calibration values.
///
/// Loaded from the mount or gyro whenever a highlight is entered and only
/// written back on an explicit commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingValues {
    /// Tracking multiplier offset in units of 1/10000.
    pub speed_trim: i32,
    pub ra_steps: i32,
    pub dec_steps: i32,
    pub backlash: i32,
    pub azimuth_minutes: i32,
    pub altitude_minutes: i32,
    pub roll_offset: f32,
    pub pitch_offset: f32,
}

impl WorkingValues {
    pub fn speed_factor(&self) -> f32 {
        1.0 + self.speed_trim as f32 / 10000.0
    }
}

/// Which of the four drift durations is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftSelection {
    index: usize,
}

impl Default for DriftSelection {
    fn default() -> Self {
        DriftSelection {
            index: DEFAULT_DRIFT_INDEX,
        }
    }
}

impl DriftSelection {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cycle(&mut self, dir: i32) {
        let count = DRIFT_DURATIONS.len() as i32;
        self.index = (self.index as i32 + dir).rem_euclid(count) as usize;
    }

    pub fn reset(&mut self) {
        self.index = DEFAULT_DRIFT_INDEX;
    }

    pub fn duration_secs(&self) -> u32 {
        DRIFT_DURATIONS[self.index]
    }
}

/// Everything the calibration menu owns between ticks.
#[derive(Debug, Clone)]
pub struct CalibrationContext {
    pub state: CalibrationState,
    pub capabilities: Capabilities,
    pub reference: PolarReference,
    pub navigator: Navigator,
    pub working: WorkingValues,
    pub adjuster: ProgressiveAdjuster,
    pub drift: DriftSelection,
    /// Latest roll or pitch deviation from the stored offset, in degrees.
    pub level_deviation: f32,
    /// Selected drift duration once a run has been started.
    pub drift_duration_secs: u32,
    pub(crate) hardware_active: bool,
}

impl CalibrationContext {
    pub fn new(capabilities: Capabilities, reference: PolarReference) -> Self {
        let navigator = Navigator::new(capabilities);
        CalibrationContext {
            state: CalibrationState::Highlight(navigator.first()),
            capabilities,
            reference,
            navigator,
            working: WorkingValues::default(),
            adjuster: ProgressiveAdjuster::default(),
            drift: DriftSelection::default(),
            level_deviation: 0.0,
            drift_duration_secs: 0,
            hardware_active: false,
        }
    }
}
