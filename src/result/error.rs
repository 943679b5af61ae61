//! Error types for pipexpect

use thiserror::Error;

/// Errors that can occur while driving a session.
///
/// The two sentinel outcomes of an expect cycle (process end, deadline
/// elapsed) are *not* errors; they are ordinary [`ExpectOutcome`]
/// variants carrying the accumulated buffer. This enum covers the
/// genuine failures: a process that could not be created, a write to a
/// process that is no longer there, and unexpected pipe I/O failures.
///
/// [`ExpectOutcome`]: crate::ExpectOutcome
///
/// # Examples
///
/// ```no_run
/// use pipexpect::{ExpectError, Session};
///
/// # fn example() {
/// let mut session = match Session::spawn("cat") {
///     Ok(session) => session,
///     Err(ExpectError::Launch(e)) => panic!("could not start shell: {}", e),
///     Err(e) => panic!("unexpected: {}", e),
/// };
///
/// if let Err(ExpectError::NotRunning) = session.send_line("hello") {
///     eprintln!("process already gone");
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ExpectError {
    /// Process could not be created.
    ///
    /// Carries the OS-level reason (command not found, permission
    /// denied, resource exhaustion, failure to open the stderr sink).
    /// No partial session state survives this error; retrying means
    /// spawning again.
    #[error("Failed to launch process: {0}")]
    Launch(#[source] std::io::Error),

    /// Write attempted on a session whose process is gone.
    ///
    /// Returned by `send`/`send_line` when the child has exited or the
    /// session was closed. Nothing is written in that case.
    #[error("Process is not running")]
    NotRunning,

    /// I/O error on one of the session pipes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
