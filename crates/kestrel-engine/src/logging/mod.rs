//! Logging setup.
//!
//! Engine code only talks to the `log` facade. Binaries call [`init_logging`]
//! once at startup to install `env_logger` as the backend.

mod init;

pub use init::{init_logging, LoggingConfig};
