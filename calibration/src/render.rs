use crate::context::CalibrationContext;
use crate::hardware::Io;
use crate::indicator::make_indicator;
use crate::states::{CalibrationState, Category};
use core::fmt::Write;
use heapless::String;

pub const LINE_WIDTH: usize = 16;

pub type Line = String<LINE_WIDTH>;

pub fn highlight_label(category: Category) -> &'static str {
    match category {
        Category::Polar => ">Polar alignment",
        Category::Speed => ">Speed calibratn",
        Category::Drift => ">Drift alignment",
        Category::RaSteps => ">RA Step Adjust",
        Category::DecSteps => ">DEC Step Adjust",
        Category::Backlash => ">Backlash Adjust",
        Category::AzimuthAdjust => ">Azimuth Adjst.",
        Category::AltitudeAdjust => ">Altitude Adjst.",
        Category::RollOffset => ">Roll Offset",
        Category::PitchOffset => ">Pitch Offset",
    }
}

/// Drift duration picker with the cursor on the selected entry.
pub fn drift_line(index: usize) -> Line {
    let mut bytes = *b" 1m  2m  3m  5m";
    if let Some(cell) = bytes.get_mut(index * 4) {
        *cell = b'>';
    }
    let mut line = Line::new();
    for byte in bytes {
        let _ = line.push(byte as char);
    }
    line
}

/// The second display row for the active state, if it shows one.
pub fn submenu_line(cal: &CalibrationContext, io: &mut Io<'_>) -> Option<Line> {
    let mut line = Line::new();
    // Overlong numbers are cut at the display width
    let _ = match cal.state {
        CalibrationState::Highlight(category) => line.write_str(highlight_label(category)),
        CalibrationState::SpeedCalibration => {
            write!(line, "SpdFctr: {:6.4}", io.mount.speed_calibration())
        }
        CalibrationState::DriftWait => return Some(drift_line(cal.drift.index())),
        CalibrationState::RaStepCalibration => write!(line, "RA Steps: {}", cal.working.ra_steps),
        CalibrationState::DecStepCalibration => {
            write!(line, "DEC Steps: {}", cal.working.dec_steps)
        }
        CalibrationState::BacklashCalibration => write!(line, "Backlash: {}", cal.working.backlash),
        CalibrationState::AzimuthAdjustment => {
            write!(line, "Az: {} arcmins", cal.working.azimuth_minutes)
        }
        CalibrationState::AltitudeAdjustment => {
            write!(line, "Alt: {} arcmins", cal.working.altitude_minutes)
        }
        CalibrationState::RollOffset => {
            write!(line, "R: {}", make_indicator(cal.level_deviation))
        }
        CalibrationState::PitchOffset => {
            write!(line, "P: {}", make_indicator(cal.level_deviation))
        }
        CalibrationState::PolarWaitCenter
        | CalibrationState::PolarWaitHome
        | CalibrationState::DriftRunning => return None,
    };
    Some(line)
}

/// Draw the active state.
pub fn print_submenu(cal: &CalibrationContext, io: &mut Io<'_>) {
    if cal.state == CalibrationState::PolarWaitCenter {
        if !io.mount.is_slewing_ra_or_dec() {
            io.display.print_at(0, 0, "Centr on Polaris");
            io.display.print_at(0, 1, ">Centered");
        }
        return;
    }
    if let Some(line) = submenu_line(cal, io) {
        io.display.print_at(0, 1, &line);
    }
}
