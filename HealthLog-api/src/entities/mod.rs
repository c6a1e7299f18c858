// Public entities exposed by the web layer
pub mod common;
pub mod measurement;

pub use common::ErrorResponse;
pub use measurement::{FlagResponse, MeasurementView};
