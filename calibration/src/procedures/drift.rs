use super::{Procedure, TickOutcome, Transition};
use crate::context::CalibrationContext;
use crate::hardware::{DriftDirection, Io};
use crate::states::{CalibrationState, Category};
use buttons::Key;

pub const DRIFT_PAUSE_MS: u32 = 1500;

/// Pick a drift duration, then run the timed east/west passes.
pub struct DriftAlignment;

/// Blocking drift run: pause, east pass, pause, west pass, pause.
///
/// Takes `2 * duration_secs` seconds plus three pauses. Keys are not read
/// until it returns.
pub fn run_drift_sequence(io: &mut Io<'_>, duration_secs: u32) {
    log::info!("Drift alignment: {}s per pass", duration_secs);

    io.status("Pause 1.5s ...");
    io.mount.stop_tracking();
    io.mount.delay_ms(DRIFT_PAUSE_MS);

    io.status("Eastward pass...");
    io.mount
        .run_drift_alignment_phase(Some(DriftDirection::East), duration_secs);

    io.status("Pause 1.5s ...");
    io.mount.delay_ms(DRIFT_PAUSE_MS);

    io.status("Westward pass...");
    io.mount
        .run_drift_alignment_phase(Some(DriftDirection::West), duration_secs);

    io.status("Done. Pause 1.5s");
    io.mount.delay_ms(DRIFT_PAUSE_MS);
    io.mount.run_drift_alignment_phase(None, 0);

    io.mount.start_tracking();
    log::info!("Drift alignment: done, tracking resumed");
}

impl Procedure for DriftAlignment {
    fn category(&self) -> Category {
        Category::Drift
    }

    fn enter(&self, _cal: &mut CalibrationContext, _io: &mut Io<'_>) -> CalibrationState {
        CalibrationState::DriftWait
    }

    fn tick(&self, cal: &mut CalibrationContext, io: &mut Io<'_>, _key: Key) -> TickOutcome {
        if cal.state != CalibrationState::DriftRunning {
            return TickOutcome::IDLE;
        }
        run_drift_sequence(io, cal.drift_duration_secs);
        TickOutcome::to(self.highlight())
    }

    fn handle_input(&self, cal: &mut CalibrationContext, _io: &mut Io<'_>, key: Key) -> Transition {
        if cal.state != CalibrationState::DriftWait {
            return Transition::Stay;
        }
        match key {
            Key::Down | Key::Left => {
                cal.drift.cycle(1);
                Transition::Stay
            }
            Key::Up => {
                cal.drift.cycle(-1);
                Transition::Stay
            }
            Key::Select => {
                cal.drift_duration_secs = cal.drift.duration_secs();
                Transition::To(CalibrationState::DriftRunning)
            }
            Key::Right => {
                cal.drift.reset();
                Transition::To(self.highlight())
            }
            Key::None => Transition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{Bench, MountEvent};

    #[test]
    fn test_sequence_order_and_duration() {
        let mut bench = Bench::new();
        bench.with_io(|io| run_drift_sequence(io, 27));

        assert_eq!(
            bench.mount.events,
            vec![
                MountEvent::StopTracking,
                MountEvent::Delay(1500),
                MountEvent::DriftPhase(Some(DriftDirection::East), 27),
                MountEvent::Delay(1500),
                MountEvent::DriftPhase(Some(DriftDirection::West), 27),
                MountEvent::Delay(1500),
                MountEvent::DriftPhase(None, 0),
                MountEvent::StartTracking,
            ]
        );
        assert_eq!(bench.mount.clock_ms(), 2 * 27_000 + 4500);
        assert_eq!(bench.display.row(1), "Done. Pause 1.5s");
    }

    #[test]
    fn test_selection_keys() {
        let mut bench = Bench::new();
        let mut cal = bench.context();
        cal.state = CalibrationState::DriftWait;

        bench.with_io(|io| {
            DriftAlignment.handle_input(&mut cal, io, Key::Left);
            assert_eq!(cal.drift.index(), 2);
            DriftAlignment.handle_input(&mut cal, io, Key::Down);
            DriftAlignment.handle_input(&mut cal, io, Key::Down);
            assert_eq!(cal.drift.index(), 0);

            let transition = DriftAlignment.handle_input(&mut cal, io, Key::Right);
            assert_eq!(transition, Transition::To(CalibrationState::Highlight(Category::Drift)));
            assert_eq!(cal.drift.index(), 1);
        });
    }

    #[test]
    fn test_select_starts_run_with_selected_duration() {
        let mut bench = Bench::new();
        let mut cal = bench.context();
        cal.state = CalibrationState::DriftWait;

        bench.with_io(|io| {
            DriftAlignment.handle_input(&mut cal, io, Key::Down);
            let transition = DriftAlignment.handle_input(&mut cal, io, Key::Select);
            assert_eq!(transition, Transition::To(CalibrationState::DriftRunning));
        });
        assert_eq!(cal.drift_duration_secs, 87);
        assert!(bench.mount.events.is_empty());
    }
}
