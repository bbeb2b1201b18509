pub mod config;
pub mod logging;
pub mod poll;
pub mod retry;
pub mod status;
