// Sexagesimal coordinates as the mount firmware exchanges them.

use std::fmt;

/// Right ascension in hours, minutes and seconds.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct DayTime {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
}

impl DayTime {
    pub const fn new(hours: i32, minutes: i32, seconds: i32) -> Self {
        DayTime {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.hours as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / 3600.0
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}h{:02}m{:02}s", self.hours, self.minutes, self.seconds)
    }
}

/// Declination in degrees, arc-minutes and arc-seconds.
///
/// The sign lives on `degrees`; minutes and seconds are magnitudes.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct DegreeTime {
    pub degrees: i32,
    pub minutes: i32,
    pub seconds: i32,
}

impl DegreeTime {
    pub const fn new(degrees: i32, minutes: i32, seconds: i32) -> Self {
        DegreeTime {
            degrees,
            minutes,
            seconds,
        }
    }

    pub fn total_degrees(&self) -> f64 {
        let magnitude = self.degrees.unsigned_abs() as f64
            + self.minutes as f64 / 60.0
            + self.seconds as f64 / 3600.0;
        if self.degrees < 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Display for DegreeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}'{:02}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Polaris position and the hemisphere the mount works in.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct PolarReference {
    pub polaris_ra: DayTime,
    pub northern_hemisphere: bool,
}

impl PolarReference {
    fn hemisphere_term(&self) -> i32 {
        if self.northern_hemisphere {
            90
        } else {
            -90
        }
    }

    /// Declination slewed to so the DEC axis swings across Polaris and the pole.
    pub fn slew_declination(&self) -> DegreeTime {
        DegreeTime::new(88 - self.hemisphere_term(), 42, 11)
    }

    /// Declination the mount is synced to once Polaris is centered.
    pub fn sync_declination(&self) -> DegreeTime {
        DegreeTime::new(89 - self.hemisphere_term(), 21, 6)
    }
}
