// One handler per calibration category. The dispatcher picks the handler for
// the active state's category and drives it through this contract.

use crate::context::CalibrationContext;
use crate::hardware::{AdjustAxis, Io, StepperAxis};
use crate::states::{CalibrationState, Category};
use buttons::Key;

pub mod adjustment;
pub mod drift;
pub mod level;
pub mod polar;
pub mod speed;
pub mod steps;

pub use adjustment::AxisAdjustment;
pub use drift::{run_drift_sequence, DriftAlignment};
pub use level::{LevelAxis, LevelOffset};
pub use polar::PolarAlignment;
pub use speed::SpeedCalibration;
pub use steps::{StepCalibration, StepTarget};

/// Where the menu goes after a handler ran.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Transition {
    Stay,
    To(CalibrationState),
    /// Hand the display to the next top-level menu, leaving this state behind.
    NextMenu(CalibrationState),
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct TickOutcome {
    pub transition: Transition,
    /// False while a held key is adjusting a value.
    pub check_keys: bool,
}

impl TickOutcome {
    pub const IDLE: TickOutcome = TickOutcome {
        transition: Transition::Stay,
        check_keys: true,
    };

    pub fn adjusting(check_keys: bool) -> Self {
        TickOutcome {
            transition: Transition::Stay,
            check_keys,
        }
    }

    pub fn to(state: CalibrationState) -> Self {
        TickOutcome {
            transition: Transition::To(state),
            check_keys: true,
        }
    }
}

pub trait Procedure: Sync {
    fn category(&self) -> Category;

    /// Reload the working value from the mount or gyro.
    fn refresh(&self, _cal: &mut CalibrationContext, _io: &mut Io<'_>) {}

    /// SELECT on the highlight. Returns the first procedure state.
    fn enter(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) -> CalibrationState;

    /// Level-driven work, run every tick while one of this category's
    /// procedure states is active.
    fn tick(&self, _cal: &mut CalibrationContext, _io: &mut Io<'_>, _key: Key) -> TickOutcome {
        TickOutcome::IDLE
    }

    /// A newly pressed key inside a procedure state.
    fn handle_input(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> Transition;

    /// Leaving the procedure states for a highlight or another menu.
    fn exit(&self, _cal: &mut CalibrationContext, _io: &mut Io<'_>) {}

    fn highlight(&self) -> CalibrationState {
        CalibrationState::Highlight(self.category())
    }
}

static POLAR: PolarAlignment = PolarAlignment;
static SPEED: SpeedCalibration = SpeedCalibration;
static DRIFT: DriftAlignment = DriftAlignment;
static RA_STEPS: StepCalibration = StepCalibration {
    target: StepTarget::Axis(StepperAxis::Ra),
};
static DEC_STEPS: StepCalibration = StepCalibration {
    target: StepTarget::Axis(StepperAxis::Dec),
};
static BACKLASH: StepCalibration = StepCalibration {
    target: StepTarget::Backlash,
};
static AZIMUTH: AxisAdjustment = AxisAdjustment {
    axis: AdjustAxis::Azimuth,
};
static ALTITUDE: AxisAdjustment = AxisAdjustment {
    axis: AdjustAxis::Altitude,
};
static ROLL: LevelOffset = LevelOffset {
    axis: LevelAxis::Roll,
};
static PITCH: LevelOffset = LevelOffset {
    axis: LevelAxis::Pitch,
};

pub fn procedure_for(category: Category) -> &'static dyn Procedure {
    match category {
        Category::Polar => &POLAR,
        Category::Speed => &SPEED,
        Category::Drift => &DRIFT,
        Category::RaSteps => &RA_STEPS,
        Category::DecSteps => &DEC_STEPS,
        Category::Backlash => &BACKLASH,
        Category::AzimuthAdjust => &AZIMUTH,
        Category::AltitudeAdjust => &ALTITUDE,
        Category::RollOffset => &ROLL,
        Category::PitchOffset => &PITCH,
    }
}
