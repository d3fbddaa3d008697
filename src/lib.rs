/*!
 * SimKit OS Library
 * Platform-abstracted child process control and interval timing
 */

#![deny(unsafe_code)]

pub mod config;
pub mod limits;
pub mod logging;
pub mod process;
pub mod timer;

// Re-exports
pub use config::{ConfigError, TerminationConfig};
pub use logging::init_tracing;
pub use process::{
    force_kill, poll_status, release, request_graceful_exit, spawn, NativeProcessControl,
    ProcessControl, ProcessError, ProcessHandle, ProcessResult, ProcessStatus,
};
pub use timer::{Clock, IntervalTimer, SystemClock};
