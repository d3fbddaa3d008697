/*!
 * Process Types
 * Handle, status and error types shared by every process control variant
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Status query failed for {handle}: {reason}")]
    QueryFailed {
        handle: ProcessHandle,
        reason: String,
    },

    #[error("Signal delivery failed for {handle}: {reason}")]
    SignalFailed {
        handle: ProcessHandle,
        reason: String,
    },

    #[error("Process control not supported on this platform: {0}")]
    Unsupported(&'static str),

    #[error("Process {handle} still running after {waited:?}")]
    TimedOut {
        handle: ProcessHandle,
        waited: Duration,
    },
}

/// Opaque reference to a spawned child process.
///
/// On POSIX targets the value is the child's PID, on Windows it is the
/// process object handle. Only the variant that produced a handle knows how
/// to interpret it. A zero value is the null handle and always means the
/// spawn failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProcessHandle(isize);

impl ProcessHandle {
    /// The "spawn failed" sentinel
    pub const NULL: ProcessHandle = ProcessHandle(0);

    /// Wrap a raw platform value (PID or process handle)
    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    /// The raw platform value
    pub const fn as_raw(self) -> isize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "process(null)")
        } else {
            write!(f, "process({})", self.0)
        }
    }
}

/// Outcome of a single non-blocking status poll.
///
/// `Exited` carries the program's exit status when it returned normally and
/// the terminating signal number when a POSIX signal ended it. Windows
/// reports the exit code the OS recorded, which for a forced kill is the
/// code passed to `TerminateProcess`. The two cases share one channel, so a
/// program that returned 9 is indistinguishable from one killed by signal 9.
/// Existing callers depend on these exact codes.
///
/// `Error` describes the poll call, never the process: the handle was
/// invalid, already reaped, or the OS query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ProcessStatus {
    /// Process has not terminated yet
    Running,
    /// Process terminated, for any reason
    Exited { code: i32 },
    /// Status could not be retrieved
    Error { code: i32 },
}

impl ProcessStatus {
    /// The flat exit code channel
    /// (0 while running, the variant's convention on error).
    pub fn exit_code(&self) -> i32 {
        match *self {
            ProcessStatus::Running => 0,
            ProcessStatus::Exited { code } | ProcessStatus::Error { code } => code,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ProcessStatus::Running)
    }

    pub fn is_exited(&self) -> bool {
        matches!(self, ProcessStatus::Exited { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ProcessStatus::Error { .. })
    }
}
