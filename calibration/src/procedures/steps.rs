use super::{Procedure, TickOutcome, Transition};
use crate::context::{CalibrationContext, WorkingValues};
use crate::hardware::{Io, StepperAxis};
use crate::states::{CalibrationState, Category};
use buttons::Key;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum StepTarget {
    Axis(StepperAxis),
    Backlash,
}

/// Edits an integer the mount stores: steps per degree or backlash steps.
///
/// Nothing reaches the mount until SELECT.
pub struct StepCalibration {
    pub target: StepTarget,
}

impl StepCalibration {
    fn value<'w>(&self, working: &'w mut WorkingValues) -> &'w mut i32 {
        match self.target {
            StepTarget::Axis(StepperAxis::Ra) => &mut working.ra_steps,
            StepTarget::Axis(StepperAxis::Dec) => &mut working.dec_steps,
            StepTarget::Backlash => &mut working.backlash,
        }
    }

    fn stored_message(&self) -> &'static str {
        match self.target {
            StepTarget::Axis(StepperAxis::Ra) => "RA steps stored",
            StepTarget::Axis(StepperAxis::Dec) => "DEC steps stored.",
            StepTarget::Backlash => "Backlash stored.",
        }
    }
}

impl Procedure for StepCalibration {
    fn category(&self) -> Category {
        match self.target {
            StepTarget::Axis(StepperAxis::Ra) => Category::RaSteps,
            StepTarget::Axis(StepperAxis::Dec) => Category::DecSteps,
            StepTarget::Backlash => Category::Backlash,
        }
    }

    fn refresh(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) {
        let stored = match self.target {
            StepTarget::Axis(axis) => io.mount.steps_per_degree(axis),
            StepTarget::Backlash => io.mount.backlash_correction(),
        };
        *self.value(&mut cal.working) = stored;
        log::debug!("{:?} loaded: {}", self.target, stored);
    }

    fn enter(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) -> CalibrationState {
        self.refresh(cal, io);
        match self.target {
            StepTarget::Axis(StepperAxis::Ra) => CalibrationState::RaStepCalibration,
            StepTarget::Axis(StepperAxis::Dec) => CalibrationState::DecStepCalibration,
            StepTarget::Backlash => CalibrationState::BacklashCalibration,
        }
    }

    fn tick(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> TickOutcome {
        let value = self.value(&mut cal.working);
        TickOutcome::adjusting(cal.adjuster.adjust(value, key, &mut *io.mount))
    }

    fn handle_input(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> Transition {
        match key {
            Key::Select => {
                let value = *self.value(&mut cal.working);
                match self.target {
                    StepTarget::Axis(axis) => io.mount.set_steps_per_degree(axis, value),
                    StepTarget::Backlash => io.mount.set_backlash_correction(value),
                }
                log::info!("{:?} stored: {}", self.target, value);
                io.status(self.stored_message());
                io.mount.delay_ms(500);
                Transition::To(self.highlight())
            }
            Key::Right => Transition::NextMenu(self.highlight()),
            _ => Transition::Stay,
        }
    }
}
