use crate::context::CalibrationContext;
use crate::coords::PolarReference;
use crate::hardware::Io;
use crate::procedures::{procedure_for, Transition};
use crate::render::print_submenu;
use crate::states::{Capabilities, CalibrationState, Category};
use buttons::Key;

/// The calibration menu: one call to [`CalibrationMenu::tick`] per scheduler pass.
pub struct CalibrationMenu {
    cal: CalibrationContext,
    wait_for_release: bool,
}

impl CalibrationMenu {
    pub fn new(capabilities: Capabilities, reference: PolarReference) -> Self {
        CalibrationMenu {
            cal: CalibrationContext::new(capabilities, reference),
            wait_for_release: false,
        }
    }

    pub fn state(&self) -> CalibrationState {
        self.cal.state
    }

    pub fn context(&self) -> &CalibrationContext {
        &self.cal
    }

    /// Run one pass: read keys, drive the active procedure, redraw.
    pub fn tick(&mut self, io: &mut Io<'_>) {
        io.keypad.tick();

        // One physical press is one action
        if self.wait_for_release {
            if io.keypad.current_state() != Key::None {
                return;
            }
            self.wait_for_release = false;
        }

        self.power_up(io);

        let key = io.keypad.current_state();
        let mut check_keys = true;
        if !self.cal.state.is_highlight() {
            let procedure = procedure_for(self.cal.state.category());
            let outcome = procedure.tick(&mut self.cal, io, key);
            check_keys = outcome.check_keys;
            self.apply(outcome.transition, io);
        }

        if check_keys {
            if let Some(pressed) = io.keypad.key_changed() {
                self.wait_for_release = true;
                let transition = self.handle_key(pressed, io);
                self.apply(transition, io);
            }
        }

        print_submenu(&self.cal, io);
    }

    fn handle_key(&mut self, key: Key, io: &mut Io<'_>) -> Transition {
        match self.cal.state {
            CalibrationState::Highlight(category) => self.handle_highlight_key(category, key, io),
            state => procedure_for(state.category()).handle_input(&mut self.cal, io, key),
        }
    }

    fn handle_highlight_key(&mut self, category: Category, key: Key, io: &mut Io<'_>) -> Transition {
        match key {
            Key::Down => Transition::To(CalibrationState::Highlight(
                self.cal.navigator.advance(category, 1),
            )),
            Key::Up => Transition::To(CalibrationState::Highlight(
                self.cal.navigator.advance(category, -1),
            )),
            Key::Select => {
                let next = procedure_for(category).enter(&mut self.cal, io);
                log::debug!("Entering {:?}", next);
                Transition::To(next)
            }
            Key::Right => {
                Transition::NextMenu(CalibrationState::Highlight(self.cal.navigator.first()))
            }
            Key::Left | Key::None => Transition::Stay,
        }
    }

    fn apply(&mut self, transition: Transition, io: &mut Io<'_>) {
        match transition {
            Transition::Stay => {}
            Transition::To(next) => self.change_state(next, io),
            Transition::NextMenu(next) => {
                self.change_state(next, io);
                self.goto_next_menu(io);
            }
        }
    }

    fn change_state(&mut self, next: CalibrationState, io: &mut Io<'_>) {
        let current = self.cal.state;
        if current == next {
            return;
        }
        if !current.is_highlight() && next.is_highlight() {
            procedure_for(current.category()).exit(&mut self.cal, io);
        }

        log::debug!("Calibration state {:?} -> {:?}", current, next);
        self.cal.state = next;

        // Stored values may have changed elsewhere since the last visit
        if let CalibrationState::Highlight(category) = next {
            procedure_for(category).refresh(&mut self.cal, io);
        }
    }

    fn power_up(&mut self, io: &mut Io<'_>) {
        if self.cal.hardware_active {
            return;
        }
        if self.cal.capabilities.azimuth_altitude_motors {
            io.mount.enable_az_alt_motors();
        }
        if let Some(gyro) = io.gyro() {
            gyro.startup();
        }
        self.cal.hardware_active = true;
    }

    fn goto_next_menu(&mut self, io: &mut Io<'_>) {
        io.display.next_menu();
        if self.cal.capabilities.azimuth_altitude_motors {
            io.mount.disable_az_alt_motors();
        }
        if let Some(gyro) = io.gyro() {
            gyro.shutdown();
        }
        self.cal.hardware_active = false;
        log::info!("Leaving calibration menu");
    }
}
