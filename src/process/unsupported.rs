/*!
 * Unsupported Platform Stub
 *
 * Selected on targets without process control (Android and anything that is
 * neither POSIX nor Windows). Every operation reports failure, so callers
 * keep one code path. Compiled on every target so its behavior is testable.
 */

use super::traits::ProcessControl;
use super::types::{ProcessError, ProcessHandle, ProcessResult, ProcessStatus};
use crate::limits::UNSUPPORTED_QUERY_ERROR_CODE;
use tracing::debug;

/// Process control that refuses every request
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProcessControl;

impl UnsupportedProcessControl {
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessControl for UnsupportedProcessControl {
    fn try_spawn(
        &self,
        executable: &str,
        _arguments: &str,
        _working_dir: Option<&str>,
    ) -> ProcessResult<ProcessHandle> {
        debug!(executable = %executable, "Spawn requested on platform without process control");
        Err(ProcessError::Unsupported("spawn"))
    }

    fn poll_status(&self, _handle: ProcessHandle) -> ProcessStatus {
        ProcessStatus::Error {
            code: UNSUPPORTED_QUERY_ERROR_CODE,
        }
    }

    fn request_graceful_exit(&self, _handle: ProcessHandle) -> bool {
        false
    }

    fn force_kill(&self, _handle: ProcessHandle) -> bool {
        false
    }

    fn release(&self, _handle: ProcessHandle) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_fails() {
        let control = UnsupportedProcessControl::new();

        assert_eq!(
            control.try_spawn("/bin/true", "", None),
            Err(ProcessError::Unsupported("spawn"))
        );
        assert!(control.spawn("/bin/true", "a b", Some("/tmp")).is_null());

        let handle = ProcessHandle::from_raw(1234);
        assert!(control.poll_status(handle).is_error());
        assert!(!control.request_graceful_exit(handle));
        assert!(!control.force_kill(handle));
        assert!(!control.release(handle));
    }
}
