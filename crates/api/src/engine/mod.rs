//! Alert and tracking workflows shared by handlers and background jobs.

pub mod alerts;
pub mod announce;
pub mod tracking;
