pub mod config;
pub mod error;
pub mod ideas;
pub mod telemetry;
