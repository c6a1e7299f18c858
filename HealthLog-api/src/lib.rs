// HealthLog-api lib.rs
//
// Web layer for HealthLog: the measurement page, its form handlers,
// the flag toggle JSON endpoint and the health/docs endpoints.

// Public modules
pub mod api;
pub mod entities;
pub mod openapi;
pub mod views;
