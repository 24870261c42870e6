//! Cohort complexity scoring and coach qualification engine.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
