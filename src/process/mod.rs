/*!
 * Process Module
 * Spawn, poll and terminate external processes
 *
 * Exactly one platform variant backs the free functions, chosen at build time:
 * - POSIX (every unix target except Android): fork/exec, waitpid, SIGTERM/SIGKILL
 * - Windows: CreateProcess, GetExitCodeProcess, TerminateProcess
 * - anything else: a stub that reports failure from every operation
 */

pub mod args;
pub mod lifecycle;
pub mod traits;
pub mod types;
pub mod unsupported;

#[cfg(all(unix, not(target_os = "android")))]
pub mod posix;

#[cfg(windows)]
pub mod windows;

// Re-export for convenience
pub use args::{build_argv, split_arguments};
pub use lifecycle::{terminate_with_timeout, wait_for_exit};
pub use traits::ProcessControl;
pub use types::{ProcessError, ProcessHandle, ProcessResult, ProcessStatus};
pub use unsupported::UnsupportedProcessControl;

#[cfg(all(unix, not(target_os = "android")))]
pub use posix::PosixProcessControl;

#[cfg(windows)]
pub use windows::WindowsProcessControl;

/// The process control variant for the target platform
#[cfg(all(unix, not(target_os = "android")))]
pub type NativeProcessControl = PosixProcessControl;

/// The process control variant for the target platform
#[cfg(windows)]
pub type NativeProcessControl = WindowsProcessControl;

/// The process control variant for the target platform
#[cfg(not(any(all(unix, not(target_os = "android")), windows)))]
pub type NativeProcessControl = UnsupportedProcessControl;

const NATIVE: NativeProcessControl = NativeProcessControl::new();

/// Spawn `executable` with whitespace-separated `arguments`, optionally
/// starting in `working_dir` (empty means unchanged). Returns
/// [`ProcessHandle::NULL`] on failure.
pub fn spawn(executable: &str, arguments: &str, working_dir: Option<&str>) -> ProcessHandle {
    NATIVE.spawn(executable, arguments, working_dir)
}

/// Non-blocking status query
pub fn poll_status(handle: ProcessHandle) -> ProcessStatus {
    NATIVE.poll_status(handle)
}

/// Deliver an interceptable termination request (SIGTERM on POSIX)
pub fn request_graceful_exit(handle: ProcessHandle) -> bool {
    NATIVE.request_graceful_exit(handle)
}

/// Deliver an unconditional termination request
pub fn force_kill(handle: ProcessHandle) -> bool {
    NATIVE.force_kill(handle)
}

/// Release OS resources owned by the handle itself
pub fn release(handle: ProcessHandle) -> bool {
    NATIVE.release(handle)
}
