/*!
 * Process Control Limits and Constants
 *
 * Exit-code conventions and default timings, grouped by concern.
 */

use std::time::Duration;

// =============================================================================
// EXIT CODE CONVENTIONS
// =============================================================================

/// Exit code reported alongside a failed POSIX status query
pub const POSIX_QUERY_ERROR_CODE: i32 = 0;

/// Exit code reported alongside a failed Windows status query
pub const WINDOWS_QUERY_ERROR_CODE: i32 = -1;

/// Exit code reported by the unsupported-platform stub
pub const UNSUPPORTED_QUERY_ERROR_CODE: i32 = -1;

/// Exit code a Windows process is given by a forced termination.
/// Reads back as -1 through the `i32` exit code channel.
pub const WINDOWS_TERMINATE_EXIT_CODE: u32 = u32::MAX;

// =============================================================================
// TERMINATION TIMING
// =============================================================================

/// How long a graceful exit request is given before escalating (5s)
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// How long to wait for a forced kill to take effect (5s)
/// SIGKILL cannot be caught, so exceeding this means the process is stuck in the kernel
pub const DEFAULT_KILL_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay between status polls while waiting (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shortest poll delay accepted from configuration (1ms)
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);
