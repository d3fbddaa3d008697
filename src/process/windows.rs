/*!
 * Windows Process Control
 *
 * CreateProcess spawning (through `std::process::Command`), exit code
 * polling with GetExitCodeProcess and termination with TerminateProcess.
 * Windows has no interceptable termination request, so a graceful exit
 * request is the same call as a forced kill.
 */

// Raw Win32 calls on the process handle require unsafe
#![allow(unsafe_code)]

use super::args::build_argv;
use super::traits::ProcessControl;
use super::types::{ProcessError, ProcessHandle, ProcessResult, ProcessStatus};
use crate::limits::{WINDOWS_QUERY_ERROR_CODE, WINDOWS_TERMINATE_EXIT_CODE};
use std::os::windows::io::IntoRawHandle;
use std::process::Command;
use tracing::{debug, warn};
use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, HANDLE, STILL_ACTIVE};
use windows_sys::Win32::System::Threading::{GetExitCodeProcess, TerminateProcess};

/// Process control backed by Win32 process handles
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsProcessControl;

impl WindowsProcessControl {
    pub const fn new() -> Self {
        Self
    }

    fn raw(handle: ProcessHandle) -> Option<HANDLE> {
        if handle.is_null() {
            None
        } else {
            Some(handle.as_raw() as HANDLE)
        }
    }

    fn terminate(&self, handle: ProcessHandle) -> bool {
        let Some(raw) = Self::raw(handle) else {
            warn!(handle = %handle, "Refusing to terminate null handle");
            return false;
        };

        // Safety: TerminateProcess validates the handle and fails cleanly
        let ok = unsafe { TerminateProcess(raw, WINDOWS_TERMINATE_EXIT_CODE) } != 0;
        if ok {
            debug!(handle = %handle, "TerminateProcess delivered");
        } else {
            let err = unsafe { GetLastError() };
            warn!(handle = %handle, error = err, "TerminateProcess failed");
        }
        ok
    }
}

impl ProcessControl for WindowsProcessControl {
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
            command.current_dir(dir);
        }

        let child = command
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed(format!("{}: {}", executable, e)))?;

        // The thread handle is closed by std; the process handle now belongs to the caller
        let handle = ProcessHandle::from_raw(child.into_raw_handle() as isize);
        debug!(handle = %handle, executable = %executable, "Spawned process");
        Ok(handle)
    }

    fn poll_status(&self, handle: ProcessHandle) -> ProcessStatus {
        let Some(raw) = Self::raw(handle) else {
            return ProcessStatus::Error {
                code: WINDOWS_QUERY_ERROR_CODE,
            };
        };

        let mut code: u32 = 0;
        // Safety: `code` outlives the call; invalid handles make the call fail
        if unsafe { GetExitCodeProcess(raw, &mut code) } == 0 {
            let err = unsafe { GetLastError() };
            debug!(handle = %handle, error = err, "GetExitCodeProcess failed");
            return ProcessStatus::Error {
                code: WINDOWS_QUERY_ERROR_CODE,
            };
        }

        if code == STILL_ACTIVE as u32 {
            ProcessStatus::Running
        } else {
            ProcessStatus::Exited { code: code as i32 }
        }
    }

    fn request_graceful_exit(&self, handle: ProcessHandle) -> bool {
        self.terminate(handle)
    }

    fn force_kill(&self, handle: ProcessHandle) -> bool {
        self.terminate(handle)
    }

    fn release(&self, handle: ProcessHandle) -> bool {
        let Some(raw) = Self::raw(handle) else {
            return false;
        };
        // Safety: the handle came from try_spawn and is closed at most once by contract
        unsafe { CloseHandle(raw) != 0 }
    }
}
