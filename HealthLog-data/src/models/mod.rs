// Storage models
pub mod measurement;

pub use measurement::{Measurement, NewMeasurement};
