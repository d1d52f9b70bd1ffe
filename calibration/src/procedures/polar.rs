use super::{Procedure, TickOutcome, Transition};
use crate::context::CalibrationContext;
use crate::hardware::{AdjustAxis, Io};
use crate::states::{CalibrationState, Category};
use buttons::Key;

/// Jog speed of the altitude motor while centering Polaris, in steps/s.
pub const ALTITUDE_JOG_SPEED: f32 = 500.0;

/// Slew past Polaris, let the operator center it, sync, then go home.
pub struct PolarAlignment;

impl PolarAlignment {
    fn jog_altitude(cal: &CalibrationContext, io: &mut Io<'_>, key: Key) {
        if !cal.capabilities.azimuth_altitude_motors {
            return;
        }
        let running = io.mount.is_running(AdjustAxis::Altitude);
        match key {
            Key::Up if !running => io.mount.set_speed(AdjustAxis::Altitude, ALTITUDE_JOG_SPEED),
            Key::Down if !running => io.mount.set_speed(AdjustAxis::Altitude, -ALTITUDE_JOG_SPEED),
            Key::None if running => io.mount.set_speed(AdjustAxis::Altitude, 0.0),
            _ => {}
        }
    }

    fn confirm_centered(cal: &CalibrationContext, io: &mut Io<'_>) {
        io.status("Aligned, homing");
        io.mount.delay_ms(750);

        // The mount points at Polaris now
        let ra = io.mount.current_ra();
        let dec = cal.reference.sync_declination();
        log::info!("Polar alignment: syncing to RA {} DEC {}", ra, dec);
        io.mount.sync_position(ra, dec);

        io.mount.set_target_to_home();
        io.mount.start_slewing_to_target();
    }
}

impl Procedure for PolarAlignment {
    fn category(&self) -> Category {
        Category::Polar
    }

    fn enter(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) -> CalibrationState {
        // Polaris RA lines the DEC axis up with Polaris and the pole
        let ra = cal.reference.polaris_ra;
        let dec = cal.reference.slew_declination();
        log::info!("Polar alignment: slewing to RA {} DEC {}", ra, dec);
        io.mount.set_target_ra(ra);
        io.mount.set_target_dec(dec);
        io.mount.start_slewing_to_target();
        CalibrationState::PolarWaitCenter
    }

    fn tick(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> TickOutcome {
        match cal.state {
            CalibrationState::PolarWaitCenter => {
                Self::jog_altitude(cal, io, key);
                TickOutcome::IDLE
            }
            CalibrationState::PolarWaitHome if !io.mount.is_slewing_ra_or_dec() => {
                log::info!("Polar alignment: mount is home");
                TickOutcome::to(self.highlight())
            }
            _ => TickOutcome::IDLE,
        }
    }

    fn handle_input(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, key: Key) -> Transition {
        match (cal.state, key) {
            (CalibrationState::PolarWaitCenter, Key::Select) => {
                Self::confirm_centered(cal, io);
                Transition::To(CalibrationState::PolarWaitHome)
            }
            (CalibrationState::PolarWaitHome, Key::Select) => Transition::To(self.highlight()),
            (_, Key::Right) => Transition::NextMenu(self.highlight()),
            _ => Transition::Stay,
        }
    }

    fn exit(&self, cal: &mut CalibrationContext, io: &mut Io<'_>) {
        if cal.capabilities.azimuth_altitude_motors && io.mount.is_running(AdjustAxis::Altitude) {
            io.mount.set_speed(AdjustAxis::Altitude, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{DayTime, DegreeTime};
    use crate::mocks::{Bench, MountEvent};

    #[test]
    fn test_enter_slews_beyond_polaris() {
        let mut bench = Bench::new();
        let mut cal = bench.context();
        let state = bench.with_io(|io| PolarAlignment.enter(&mut cal, io));

        assert_eq!(state, CalibrationState::PolarWaitCenter);
        assert_eq!(
            bench.mount.events,
            vec![
                MountEvent::TargetRa(DayTime::new(2, 58, 51)),
                MountEvent::TargetDec(DegreeTime::new(-2, 42, 11)),
                MountEvent::SlewToTarget,
            ]
        );
    }

    #[test]
    fn test_centered_syncs_on_current_ra() {
        let mut bench = Bench::new();
        bench.mount.current_ra = DayTime::new(3, 1, 7);
        let mut cal = bench.context();
        cal.state = CalibrationState::PolarWaitCenter;
        let transition = bench.with_io(|io| PolarAlignment.handle_input(&mut cal, io, Key::Select));

        assert_eq!(transition, Transition::To(CalibrationState::PolarWaitHome));
        assert_eq!(
            bench.mount.events,
            vec![
                MountEvent::Delay(750),
                MountEvent::Sync(DayTime::new(3, 1, 7), DegreeTime::new(-1, 21, 6)),
                MountEvent::TargetHome,
                MountEvent::SlewToTarget,
            ]
        );
        assert_eq!(bench.display.row(1), "Aligned, homing");
    }

    #[test]
    fn test_wait_home_returns_once_slewing_stops() {
        let mut bench = Bench::new();
        bench.mount.slewing_polls = 2;
        let mut cal = bench.context();
        cal.state = CalibrationState::PolarWaitHome;

        let outcomes: Vec<Transition> = (0..3)
            .map(|_| bench.with_io(|io| PolarAlignment.tick(&mut cal, io, Key::None).transition))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                Transition::Stay,
                Transition::Stay,
                Transition::To(CalibrationState::Highlight(Category::Polar)),
            ]
        );
    }

    #[test]
    fn test_altitude_jog_starts_and_stops() {
        let mut bench = Bench::with_capabilities(true, false);
        let mut cal = bench.context();
        cal.state = CalibrationState::PolarWaitCenter;

        bench.with_io(|io| {
            PolarAlignment.tick(&mut cal, io, Key::Up);
            // Already running, no second command
            PolarAlignment.tick(&mut cal, io, Key::Up);
            PolarAlignment.tick(&mut cal, io, Key::None);
            PolarAlignment.tick(&mut cal, io, Key::None);
        });
        assert_eq!(
            bench.mount.events,
            vec![
                MountEvent::SetSpeed(AdjustAxis::Altitude, 500.0),
                MountEvent::SetSpeed(AdjustAxis::Altitude, 0.0),
            ]
        );
    }

    #[test]
    fn test_no_jog_without_motors() {
        let mut bench = Bench::new();
        let mut cal = bench.context();
        cal.state = CalibrationState::PolarWaitCenter;
        bench.with_io(|io| {
            PolarAlignment.tick(&mut cal, io, Key::Down);
        });
        assert!(bench.mount.events.is_empty());
    }
}
