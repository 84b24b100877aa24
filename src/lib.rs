//! Deterministic pathway advisory engine and its HTTP/CLI service shell.

pub mod advisor;
pub mod config;
pub mod error;
pub mod telemetry;
