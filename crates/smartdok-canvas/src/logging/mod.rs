//! Logger setup for hosts and demos.
//!
//! The library itself only emits through the `log` facade: `debug!` for
//! command lifecycle, `trace!` for per-point drawing, `warn!` for misuse of
//! the surface state stack.

mod init;

pub use init::{init_logging, LoggingConfig};
