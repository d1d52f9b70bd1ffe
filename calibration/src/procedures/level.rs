use super::{Procedure, TickOutcome, Transition};
use crate::context::CalibrationContext;
use crate::hardware::{Angles, Gyro, Io};
use crate::states::{CalibrationState, Category};
use buttons::Key;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LevelAxis {
    Roll,
    Pitch,
}

impl LevelAxis {
    pub fn pick(&self, angles: Angles) -> f32 {
        match self {
            LevelAxis::Roll => angles.roll,
            LevelAxis::Pitch => angles.pitch,
        }
    }
}

/// Captures the gyro reading of a level mount as its zero.
pub struct LevelOffset {
    pub axis: LevelAxis,
}

impl LevelOffset {
    fn stored(&self, gyro: &dyn Gyro) -> f32 {
        match self.axis {
            LevelAxis::Roll => gyro.roll_calibration_angle(),
            LevelAxis::Pitch => gyro.pitch_calibration_angle(),
        }
    }

    fn offset<'w>(&self, cal: &'w mut CalibrationContext) -> &'w mut f32 {
        match self.axis {
            LevelAxis::Roll => &mut cal.working.roll_offset,
            LevelAxis::Pitch => &mut cal.working.pitch_offset,
        }
    }

    /// Read the gyro and store how far it sits from the working offset.
    fn sample(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) {
        if let Some(gyro) = io.gyro() {
            let raw = self.axis.pick(gyro.current_angles());
            let offset = *self.offset(cal);
            cal.level_deviation = raw - offset;
        }
    }
}

impl Procedure for LevelOffset {
    fn category(&self) -> Category {
        match self.axis {
            LevelAxis::Roll => Category::RollOffset,
            LevelAxis::Pitch => Category::PitchOffset,
        }
    }

    fn refresh(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) {
        if let Some(gyro) = io.gyro() {
            let stored = self.stored(gyro);
            *self.offset(cal) = stored;
            log::info!("Initial {:?} offset is {}", self.axis, stored);
        }
    }

    fn enter(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) -> CalibrationState {
        self.refresh(cal, io);
        // The gauge is drawn before the first tick of the new state
        self.sample(cal, io);
        match self.axis {
            LevelAxis::Roll => CalibrationState::RollOffset,
            LevelAxis::Pitch => CalibrationState::PitchOffset,
        }
    }

    fn tick(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, _key: Key) -> TickOutcome {
        self.sample(cal, io);
        TickOutcome::IDLE
    }

    fn handle_input(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> Transition {
        match key {
            Key::Select => {
                if let Some(gyro) = io.gyro() {
                    let raw = self.axis.pick(gyro.current_angles());
                    match self.axis {
                        LevelAxis::Roll => gyro.set_roll_calibration_angle(raw),
                        LevelAxis::Pitch => gyro.set_pitch_calibration_angle(raw),
                    }
                    *self.offset(cal) = raw;
                    cal.level_deviation = 0.0;
                    log::info!("{:?} offset set to {}", self.axis, raw);
                }
                Transition::To(self.highlight())
            }
            Key::Left => Transition::To(self.highlight()),
            Key::Right => Transition::NextMenu(self.highlight()),
            _ => Transition::Stay,
        }
    }
}
