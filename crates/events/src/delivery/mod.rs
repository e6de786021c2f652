//! Outbound delivery channels.

pub mod webhook;
