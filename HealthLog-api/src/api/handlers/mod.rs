pub mod health;
pub mod measurements;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::health_check;
pub use measurements::{add_measurement, delete_measurement, index, main_script, toggle_flag};
