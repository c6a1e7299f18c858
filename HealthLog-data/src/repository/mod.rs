// Repository module structure
pub mod errors;
mod measurement;
mod storage;

#[cfg(any(test, feature = "mock"))]
mod in_memory;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use measurement::{MeasurementRepository, MeasurementRepositoryTrait};

// In-memory store for tests of the layers above
#[cfg(any(test, feature = "mock"))]
pub use in_memory::InMemoryMeasurementRepository;
