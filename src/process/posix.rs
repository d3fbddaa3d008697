/*!
 * POSIX Process Control
 *
 * fork/exec spawning, WNOHANG status polling and SIGTERM/SIGKILL delivery.
 *
 * Spawning goes through `std::process::Command`, which forks, runs the
 * `pre_exec` hook in the child, then calls `execvp`. When exec fails the
 * child reports errno over a close-on-exec pipe and leaves through `_exit`,
 * so no second copy of the caller ever runs, and the parent reaps it and
 * returns the error. Between fork and exec the child only calls `chdir`.
 * Executable names without a slash are looked up on `PATH`.
 */

// pre_exec and the raw chdir call require unsafe
#![allow(unsafe_code)]

use super::args::build_argv;
use super::traits::ProcessControl;
use super::types::{ProcessError, ProcessHandle, ProcessResult, ProcessStatus};
use crate::limits::POSIX_QUERY_ERROR_CODE;
use nix::libc;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use std::ffi::CString;
use std::os::unix::process::CommandExt;
use std::process::Command;
use tracing::{debug, warn};

/// Process control backed by fork/exec, waitpid and kill
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixProcessControl;

impl PosixProcessControl {
    pub const fn new() -> Self {
        Self
    }

    /// Interpret a handle as a single-process PID. Zero and negative values
    /// address process groups in waitpid/kill and are rejected.
    fn pid(handle: ProcessHandle) -> Option<Pid> {
        let raw = handle.as_raw();
        if raw <= 0 || raw > i32::MAX as isize {
            return None;
        }
        Some(Pid::from_raw(raw as i32))
    }

    fn send(&self, handle: ProcessHandle, signal: Signal) -> bool {
        let Some(pid) = Self::pid(handle) else {
            warn!(handle = %handle, signal = ?signal, "Refusing to signal invalid handle");
            return false;
        };

        match kill(pid, signal) {
            Ok(()) => {
                debug!(handle = %handle, signal = ?signal, "Signal delivered");
                true
            }
            Err(e) => {
                warn!(handle = %handle, signal = ?signal, error = %e, "Failed to deliver signal");
                false
            }
        }
    }
}

impl ProcessControl for PosixProcessControl {
    #[allow(clippy::zombie_processes)] // reaped later through poll_status
    fn try_spawn(
        &self,
        executable: &str,
        arguments: &str,
        working_dir: Option<&str>,
    ) -> ProcessResult<ProcessHandle> {
        let argv = build_argv(executable, arguments);
        debug!(argv = ?argv, working_dir = ?working_dir, "Spawning process");

        let mut command = Command::new(executable);
        command.args(&argv[1..]);

        if let Some(dir) = working_dir.filter(|d| !d.is_empty()) {
            let dir = CString::new(dir).map_err(|e| {
                ProcessError::SpawnFailed(format!("working directory {:?}: {}", dir, e))
            })?;

            // Safety: chdir is async-signal-safe and the closure allocates nothing
            unsafe {
                command.pre_exec(move || {
                    // A failed chdir is not fatal; exec proceeds from the inherited directory
                    let _ = libc::chdir(dir.as_ptr());
                    Ok(())
                });
            }
        }

        let child = command
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed(format!("{}: {}", executable, e)))?;

        let handle = ProcessHandle::from_raw(child.id() as isize);
        debug!(handle = %handle, executable = %executable, "Spawned process");
        Ok(handle)
    }

    fn poll_status(&self, handle: ProcessHandle) -> ProcessStatus {
        let Some(pid) = Self::pid(handle) else {
            return ProcessStatus::Error {
                code: POSIX_QUERY_ERROR_CODE,
            };
        };

        match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => ProcessStatus::Running,
            Ok(WaitStatus::Exited(_, code)) => {
                debug!(handle = %handle, code, "Process exited");
                ProcessStatus::Exited { code }
            }
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                debug!(handle = %handle, signal = ?signal, "Process terminated by signal");
                ProcessStatus::Exited {
                    code: signal as i32,
                }
            }
            Ok(other) => {
                // Not running yet not terminated either; counted as a clean exit
                debug!(handle = %handle, status = ?other, "Unusual wait status");
                ProcessStatus::Exited { code: 0 }
            }
            Err(e) => {
                debug!(handle = %handle, error = %e, "Status query failed");
                ProcessStatus::Error {
                    code: POSIX_QUERY_ERROR_CODE,
                }
            }
        }
    }

    fn request_graceful_exit(&self, handle: ProcessHandle) -> bool {
        self.send(handle, Signal::SIGTERM)
    }

    fn force_kill(&self, handle: ProcessHandle) -> bool {
        self.send(handle, Signal::SIGKILL)
    }

    fn release(&self, handle: ProcessHandle) -> bool {
        // A PID owns no descriptor
        Self::pid(handle).is_some()
    }
}
