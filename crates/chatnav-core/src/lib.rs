//! Stores consumed by the chatnav sidebar: configuration and sessions.

pub mod config;
pub mod logging;
pub mod sessions;
