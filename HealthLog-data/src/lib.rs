// HealthLog Data
// This crate owns the SQLite database and the measurement store

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
