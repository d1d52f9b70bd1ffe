// This module contains all state-related enums and types for the calibration menu.
// To add or modify categories, edit this file and the navigator.

/// One entry of the top-level calibration list, in display order.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Category {
    Polar,
    Speed,
    Drift,
    RaSteps,
    DecSteps,
    Backlash,
    AzimuthAdjust,
    AltitudeAdjust,
    RollOffset,
    PitchOffset,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Polar,
        Category::Speed,
        Category::Drift,
        Category::RaSteps,
        Category::DecSteps,
        Category::Backlash,
        Category::AzimuthAdjust,
        Category::AltitudeAdjust,
        Category::RollOffset,
        Category::PitchOffset,
    ];

    /// Whether the category exists with the given hardware.
    pub fn is_available(&self, capabilities: Capabilities) -> bool {
        match self {
            Category::AzimuthAdjust | Category::AltitudeAdjust => {
                capabilities.azimuth_altitude_motors
            }
            Category::RollOffset | Category::PitchOffset => capabilities.gyro_level,
            _ => true,
        }
    }
}

/// The single active state of the calibration menu.
///
/// `Highlight` states are the menu list; every other variant is a procedure
/// state entered with SELECT from its own highlight.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum CalibrationState {
    Highlight(Category),
    PolarWaitCenter,
    PolarWaitHome,
    SpeedCalibration,
    DriftWait,
    DriftRunning,
    RaStepCalibration,
    DecStepCalibration,
    BacklashCalibration,
    AzimuthAdjustment,
    AltitudeAdjustment,
    RollOffset,
    PitchOffset,
}

impl CalibrationState {
    /// The category this state belongs to.
    pub fn category(&self) -> Category {
        match self {
            CalibrationState::Highlight(category) => *category,
            CalibrationState::PolarWaitCenter | CalibrationState::PolarWaitHome => Category::Polar,
            CalibrationState::SpeedCalibration => Category::Speed,
            CalibrationState::DriftWait | CalibrationState::DriftRunning => Category::Drift,
            CalibrationState::RaStepCalibration => Category::RaSteps,
            CalibrationState::DecStepCalibration => Category::DecSteps,
            CalibrationState::BacklashCalibration => Category::Backlash,
            CalibrationState::AzimuthAdjustment => Category::AzimuthAdjust,
            CalibrationState::AltitudeAdjustment => Category::AltitudeAdjust,
            CalibrationState::RollOffset => Category::RollOffset,
            CalibrationState::PitchOffset => Category::PitchOffset,
        }
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self, CalibrationState::Highlight(_))
    }
}

/// Optional hardware, fixed at startup.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Capabilities {
    pub azimuth_altitude_motors: bool,
    pub gyro_level: bool,
}
