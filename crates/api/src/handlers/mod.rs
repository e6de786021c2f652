pub mod admin;
pub mod alerts;
pub mod snapshot;
pub mod stats;
pub mod tracking;
