pub mod config;
pub mod error;
pub mod talent;
pub mod telemetry;
