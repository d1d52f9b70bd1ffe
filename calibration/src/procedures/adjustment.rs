use super::{Procedure, TickOutcome, Transition};
use crate::context::{CalibrationContext, WorkingValues, ADJUSTMENT_LIMIT};
use crate::hardware::{AdjustAxis, Io};
use crate::states::{CalibrationState, Category};
use buttons::Key;

/// Relative azimuth or altitude moves in arc-minutes, one commit at a time.
pub struct AxisAdjustment {
    pub axis: AdjustAxis,
}

impl AxisAdjustment {
    fn pending<'w>(&self, working: &'w mut WorkingValues) -> &'w mut i32 {
        match self.axis {
            AdjustAxis::Azimuth => &mut working.azimuth_minutes,
            AdjustAxis::Altitude => &mut working.altitude_minutes,
        }
    }
}

impl Procedure for AxisAdjustment {
    fn category(&self) -> Category {
        match self.axis {
            AdjustAxis::Azimuth => Category::AzimuthAdjust,
            AdjustAxis::Altitude => Category::AltitudeAdjust,
        }
    }

    fn refresh(&self, cal: &mut CalibrationContext, _io: &mut Io<'_>) {
        *self.pending(&mut cal.working) = 0;
    }

    fn enter(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) -> CalibrationState {
        self.refresh(cal, io);
        match self.axis {
            AdjustAxis::Azimuth => CalibrationState::AzimuthAdjustment,
            AdjustAxis::Altitude => CalibrationState::AltitudeAdjustment,
        }
    }

    fn tick(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> TickOutcome {
        let pending = self.pending(&mut cal.working);
        let check_keys = cal.adjuster.adjust(pending, key, &mut *io.mount);
        // The mechanism travels two arc-hours in total
        *pending = (*pending).clamp(-ADJUSTMENT_LIMIT, ADJUSTMENT_LIMIT);
        TickOutcome::adjusting(check_keys)
    }

    fn handle_input(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> Transition {
        if key != Key::Select {
            return Transition::Stay;
        }
        let pending = self.pending(&mut cal.working);
        if *pending == 0 {
            return Transition::To(self.highlight());
        }

        log::info!("Moving {:?} by {} arcmin", self.axis, *pending);
        io.mount.move_by(self.axis, *pending as f32);
        *pending = 0;
        Transition::Stay
    }

    fn exit(&self, cal: &mut CalibrationContext, _io: &mut Io<'_>) {
        *self.pending(&mut cal.working) = 0;
    }
}
