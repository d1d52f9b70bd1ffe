pub mod adjuster;
pub mod autopa;
pub mod context;
pub mod coords;
pub mod dispatcher;
pub mod hardware;
pub mod indicator;
pub mod navigator;
pub mod procedures;
pub mod render;
pub mod states;

#[cfg(test)]
pub(crate) mod mocks;

pub use adjuster::ProgressiveAdjuster;
pub use autopa::{AlignmentError, SkyPoint, Site};
pub use context::{CalibrationContext, WorkingValues};
pub use coords::{DayTime, DegreeTime, PolarReference};
pub use dispatcher::CalibrationMenu;
pub use hardware::{AdjustAxis, Angles, Display, DriftDirection, Gyro, Io, Mount, StepperAxis};
pub use states::{Capabilities, CalibrationState, Category};
