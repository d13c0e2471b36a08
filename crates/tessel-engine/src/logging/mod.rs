//! Logging utilities.
//!
//! Centralizes logger setup so binaries get consistent output. The rest of
//! the crate only depends on the `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
