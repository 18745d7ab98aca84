pub mod config;
pub mod error;
pub mod interviews;
pub mod telemetry;
