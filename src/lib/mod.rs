//! Shared library modules providing error types, payload encoding, and telemetry initialization.

pub mod encoding;
pub mod errors;
pub mod telemetry;
