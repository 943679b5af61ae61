//! Session management for pipe-based process automation

mod builder;
pub(crate) mod spawn;

pub use builder::SessionBuilder;

use std::io::{self, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout};
use std::time::Duration;

use crate::engine;
use crate::pattern::CaseTable;
use crate::result::{ExpectError, ExpectOutcome};

/// Platform line terminator appended by [`Session::send_line`].
const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// A live handle to a spawned child process and its I/O pipes.
///
/// A `Session` owns the child process, the write end of its standard
/// input and the read end of its standard output; standard error goes
/// to a sink file configured at spawn time. Input is fed with
/// [`send_line`] and control flow is driven by [`expect`], which polls
/// the output pipe against an ordered [`CaseTable`] until a case
/// matches, the process ends, or the deadline elapses.
///
/// Once closed (explicitly or on drop) a session is terminal and
/// cannot be reopened; spawn a new one instead.
///
/// [`send_line`]: Session::send_line
/// [`expect`]: Session::expect
///
/// # Examples
///
/// ```no_run
/// use pipexpect::{Case, CaseTable, ExpectOutcome, Session};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = Session::spawn("telnet localhost")?;
///
/// let login = CaseTable::new().case(Case::contains("prompt", "login:"));
/// if let ExpectOutcome::Match { .. } = session.expect(&login).await? {
///     session.send_line("alice")?;
/// }
///
/// let password = CaseTable::new().case(Case::contains("pw", "assword:"));
/// if let ExpectOutcome::Match { .. } = session.expect(&password).await? {
///     session.send_line("hunter2")?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct Session {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<ChildStdout>,
    default_timeout: Option<Duration>,
    poll_interval: Duration,
    read_chunk: usize,
}

impl Session {
    /// Create a new session builder.
    ///
    /// This is the recommended way to create a session as it allows
    /// configuring the timeout, working directory, environment, stderr
    /// sink, and poll-loop knobs.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Spawn a command with default configuration (convenience method).
    ///
    /// Shorthand for `Session::builder().spawn(command)`. The command
    /// string is shell-interpreted.
    ///
    /// # Errors
    ///
    /// Returns [`ExpectError::Launch`] if the process cannot be
    /// created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pipexpect::Session;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let session = Session::spawn("python3 -i")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn spawn(command: &str) -> Result<Self, ExpectError> {
        SessionBuilder::new().spawn(command)
    }

    /// Wait for a case from the table to match the process output.
    ///
    /// Polls the output pipe, accumulating bytes into a buffer that
    /// starts empty for this call, and evaluates every case in table
    /// order after each newly read chunk. Returns the first satisfied
    /// case, or a sentinel outcome: [`ExpectOutcome::Eol`] when the
    /// process ends first, [`ExpectOutcome::Timeout`] when the session
    /// default deadline elapses first. Both sentinels carry the
    /// accumulated buffer, so consumed output is never lost.
    ///
    /// Bytes read by this call are consumed from the stream
    /// irrevocably; each expect cycle starts fresh and no output is
    /// carried over to the next call.
    ///
    /// # Errors
    ///
    /// Returns [`ExpectError::Io`] if reading the output pipe fails for
    /// a reason other than data not being available yet.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pipexpect::{Case, CaseTable, Session};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut session = Session::spawn("make test")?;
    /// let table = CaseTable::new()
    ///     .case(Case::contains("ok", "all tests passed"))
    ///     .case(Case::regex("fail", r"(\d+) failures")?);
    ///
    /// let outcome = session.expect(&table).await?;
    /// println!("finished as {:?}", outcome.label());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn expect(&mut self, table: &CaseTable) -> Result<ExpectOutcome, ExpectError> {
        let timeout = self.default_timeout;
        engine::poll(self, table, timeout).await
    }

    /// Wait for a case to match, with an explicit deadline.
    ///
    /// `None` or a zero duration disables the deadline entirely: the
    /// call returns only on a match or when the process ends, however
    /// long that takes.
    ///
    /// # Errors
    ///
    /// Same as [`expect`](Session::expect).
    pub async fn expect_timeout(
        &mut self,
        table: &CaseTable,
        timeout: Option<Duration>,
    ) -> Result<ExpectOutcome, ExpectError> {
        engine::poll(self, table, timeout).await
    }

    /// Send raw text to the process's standard input.
    ///
    /// No line terminator is appended; use [`send_line`] for that. The
    /// write is best-effort: bytes are handed to the pipe and flushed,
    /// with no acknowledgement that the child consumed them.
    ///
    /// [`send_line`]: Session::send_line
    ///
    /// # Errors
    ///
    /// Returns [`ExpectError::NotRunning`] if the process has already
    /// exited or the session is closed; nothing is written in that
    /// case.
    pub fn send(&mut self, text: &str) -> Result<(), ExpectError> {
        if !self.is_running() {
            return Err(ExpectError::NotRunning);
        }

        let Some(stdin) = &mut self.stdin else {
            return Err(ExpectError::NotRunning);
        };

        tracing::trace!(bytes = text.len(), "sending input");
        stdin.write_all(text.as_bytes())?;
        stdin.flush()?;
        Ok(())
    }

    /// Send text followed by the platform line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ExpectError::NotRunning`] if the process has already
    /// exited or the session is closed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pipexpect::Session;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut session = Session::spawn("bc -q")?;
    /// session.send_line("2 + 2")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn send_line(&mut self, line: &str) -> Result<(), ExpectError> {
        self.send(line)?;
        self.send(LINE_ENDING)
    }

    /// Check whether the child process is still executing.
    ///
    /// Returns false once the session is closed or the OS reports the
    /// process as exited. Probing an already-exited process is not an
    /// error; this method never fails.
    pub fn is_running(&mut self) -> bool {
        match &mut self.child {
            Some(child) => spawn::is_alive(child),
            None => false,
        }
    }

    /// Close the session, releasing the pipes and the process handle.
    ///
    /// Closes the input pipe, then the output pipe, then releases the
    /// child handle, reaping the process if it has already exited.
    /// Never waits for a live process and sends no signal; a child that
    /// is still running keeps running without its pipes. Calling
    /// `close` on an already-closed session is a no-op, and dropping
    /// the session closes it, so the handles are released exactly once
    /// on every exit path.
    pub fn close(&mut self) {
        if self.child.is_none() && self.stdin.is_none() && self.stdout.is_none() {
            return;
        }

        tracing::debug!("closing session");
        drop(self.stdin.take());
        drop(self.stdout.take());

        if let Some(mut child) = self.child.take() {
            // Reap without blocking; a live child is left alone.
            let _ = child.try_wait();
        }
    }

    /// Read available output without blocking.
    ///
    /// `Ok(0)` means the pipe reached end-of-stream; `WouldBlock` means
    /// no data right now. A closed session reads as end-of-stream.
    pub(crate) fn read_output(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.stdout {
            Some(stdout) => stdout.read(buf),
            None => Ok(0),
        }
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub(crate) fn read_chunk_size(&self) -> usize {
        self.read_chunk
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
