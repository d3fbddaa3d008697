/*!
 * Process Lifecycle Helpers
 *
 * Deadline-bounded waiting and graceful-then-forced termination, built only
 * from the non-blocking `ProcessControl` operations and an `IntervalTimer`
 * deadline.
 */

use super::traits::ProcessControl;
use super::types::{ProcessError, ProcessHandle, ProcessResult, ProcessStatus};
use crate::config::TerminationConfig;
use crate::timer::IntervalTimer;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Poll `handle` until it exits or `timeout` passes.
///
/// Returns the exit code channel value on exit. A failed poll ends the wait
/// with `QueryFailed`; on POSIX that includes a child someone else already
/// reaped.
pub fn wait_for_exit<P>(
    control: &P,
    handle: ProcessHandle,
    timeout: Duration,
    poll_interval: Duration,
) -> ProcessResult<i32>
where
    P: ProcessControl + ?Sized,
{
    let timer = IntervalTimer::new();
    let limit = timeout.as_secs_f64();

    loop {
        match control.poll_status(handle) {
            ProcessStatus::Running => {}
            ProcessStatus::Exited { code } => return Ok(code),
            ProcessStatus::Error { code } => {
                return Err(ProcessError::QueryFailed {
                    handle,
                    reason: format!("status query returned error (code {})", code),
                })
            }
        }

        let remaining = limit - timer.get_elapsed();
        if remaining <= 0.0 {
            return Err(ProcessError::TimedOut {
                handle,
                waited: timeout,
            });
        }
        // Compare in f64: an unbounded timeout does not fit a Duration conversion
        let pause = if remaining < poll_interval.as_secs_f64() {
            Duration::from_secs_f64(remaining)
        } else {
            poll_interval
        };
        thread::sleep(pause);
    }
}

/// Ask `handle` to exit, then kill it if it is still running after the
/// grace period.
///
/// A zero grace period skips the graceful request. Returns the exit code
/// channel value once the process is gone.
pub fn terminate_with_timeout<P>(
    control: &P,
    handle: ProcessHandle,
    config: &TerminationConfig,
) -> ProcessResult<i32>
where
    P: ProcessControl + ?Sized,
{
    if !config.grace_period.is_zero() {
        if control.request_graceful_exit(handle) {
            match wait_for_exit(control, handle, config.grace_period, config.poll_interval) {
                Ok(code) => {
                    debug!(handle = %handle, code, "Process exited after graceful request");
                    return Ok(code);
                }
                Err(ProcessError::TimedOut { .. }) => {
                    warn!(
                        handle = %handle,
                        grace_period = ?config.grace_period,
                        "Process ignored graceful exit request, killing"
                    );
                }
                Err(e) => return Err(e),
            }
        } else if let ProcessStatus::Exited { code } = control.poll_status(handle) {
            return Ok(code);
        } else {
            debug!(handle = %handle, "Graceful exit request not delivered, killing");
        }
    }

    if !control.force_kill(handle) {
        // Delivery fails for a process that already went away
        return match control.poll_status(handle) {
            ProcessStatus::Exited { code } => Ok(code),
            _ => Err(ProcessError::SignalFailed {
                handle,
                reason: "forced termination was not delivered".to_string(),
            }),
        };
    }

    let code = wait_for_exit(control, handle, config.kill_timeout, config.poll_interval)?;
    info!(handle = %handle, code, "Process killed");
    Ok(code)
}
