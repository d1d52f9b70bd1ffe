use super::{Procedure, TickOutcome, Transition};
use crate::adjuster::Acceleration;
use crate::context::{CalibrationContext, SPEED_TRIM_LIMIT};
use crate::hardware::Io;
use crate::states::{CalibrationState, Category};
use buttons::Key;

/// Trims the sidereal tracking rate in steps of 1/10000, applying it live.
pub struct SpeedCalibration;

impl SpeedCalibration {
    fn persist(cal: &CalibrationContext, io: &mut Io<'_>) {
        let factor = cal.working.speed_factor();
        io.mount.set_speed_calibration(factor, true);
        log::info!("Speed calibration stored: {:.4}", factor);
    }
}

impl Procedure for SpeedCalibration {
    fn category(&self) -> Category {
        Category::Speed
    }

    fn refresh(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) {
        let factor = io.mount.speed_calibration() as f64;
        let trim = ((factor - 1.0) * 10000.0).round() as i32;
        cal.working.speed_trim = trim.clamp(-SPEED_TRIM_LIMIT, SPEED_TRIM_LIMIT);
        log::debug!("Speed trim loaded: {}", cal.working.speed_trim);
    }

    fn enter(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) -> CalibrationState {
        self.refresh(cal, io);
        CalibrationState::SpeedCalibration
    }

    fn tick(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> TickOutcome {
        let Some(step) = key.vertical_step() else {
            cal.adjuster.reset();
            return TickOutcome::IDLE;
        };

        let trim = cal.working.speed_trim + step;
        if (-SPEED_TRIM_LIMIT..=SPEED_TRIM_LIMIT).contains(&trim) {
            cal.working.speed_trim = trim;
            io.mount
                .set_speed_calibration(cal.working.speed_factor(), false);
        }
        cal.adjuster.pace(&mut *io.mount, Acceleration::SPEED);
        TickOutcome::adjusting(false)
    }

    fn handle_input(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> Transition {
        match key {
            Key::Select => {
                Self::persist(cal, io);
                io.status("Speed Stored.");
                io.mount.delay_ms(500);
                Transition::To(self.highlight())
            }
            Key::Right => {
                Self::persist(cal, io);
                Transition::NextMenu(self.highlight())
            }
            _ => Transition::Stay,
        }
    }
}
