pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod monitor;
