pub mod config;
pub mod error;
pub mod evidence;
pub mod scoring;
pub mod store;
pub mod telemetry;
pub mod workflows;
