/*!
 * Process Traits
 * The process control contract every platform variant implements
 */

use super::types::{ProcessHandle, ProcessResult, ProcessStatus};
use tracing::error;

/// Child process lifecycle control.
///
/// Implementations hold no per-process state: every call works purely from
/// the handle it is given, so one value can serve any number of children
/// from any thread. None of the operations block on the child and none
/// retry internally.
pub trait ProcessControl: Send + Sync {
    /// Spawn `executable` with `arguments` split on whitespace, optionally
    /// starting in `working_dir`.
    fn try_spawn(
        &self,
        executable: &str,
        arguments: &str,
        working_dir: Option<&str>,
    ) -> ProcessResult<ProcessHandle>;

    /// Spawn a child, returning [`ProcessHandle::NULL`] and emitting a
    /// diagnostic on failure.
    fn spawn(&self, executable: &str, arguments: &str, working_dir: Option<&str>) -> ProcessHandle {
        match self.try_spawn(executable, arguments, working_dir) {
            Ok(handle) => handle,
            Err(e) => {
                error!(executable = %executable, error = %e, "Failed to spawn application");
                ProcessHandle::NULL
            }
        }
    }

    /// Non-blocking status query
    fn poll_status(&self, handle: ProcessHandle) -> ProcessStatus;

    /// Ask the process to exit in a way it may intercept. Returns whether
    /// the request was delivered, not whether the process exited.
    fn request_graceful_exit(&self, handle: ProcessHandle) -> bool;

    /// Terminate the process unconditionally. Returns whether the request
    /// was delivered, not whether the process exited.
    fn force_kill(&self, handle: ProcessHandle) -> bool;

    /// Give back any OS resource the handle itself holds. The child keeps
    /// running; the handle must not be used afterwards.
    fn release(&self, handle: ProcessHandle) -> bool;
}
