pub mod render;
pub mod telemetry;
