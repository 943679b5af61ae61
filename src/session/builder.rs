//! Session builder for configuration

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::result::ExpectError;
use crate::session::{spawn, Session};

/// Default timeout for expect operations (in milliseconds)
const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Default poll-loop backoff sleep (in microseconds)
const DEFAULT_POLL_INTERVAL_US: u64 = 500;

/// Default number of bytes read per poll iteration
const DEFAULT_READ_CHUNK: usize = 1;

/// Default destination for the child's stderr
const DEFAULT_ERR_SINK: &str = "/dev/null";

/// Builder for configuring and spawning sessions.
///
/// Provides a fluent interface for configuring session options before
/// spawning a process.
///
/// # Defaults
///
/// - Timeout: 3000 ms
/// - Working directory: the platform temp directory
/// - Environment: inherited from the calling process
/// - Stderr sink: `/dev/null`, appended to
/// - Poll interval: 500 µs
/// - Read chunk: 1 byte per poll iteration
///
/// # Examples
///
/// ```no_run
/// use pipexpect::Session;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = Session::builder()
///     .timeout(Duration::from_secs(10))
///     .working_dir("/var/tmp")
///     .err_sink("/tmp/child-stderr.log")
///     .spawn("ftp mirror.example.org")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    timeout: Option<Duration>,
    working_dir: Option<PathBuf>,
    environment: Option<Vec<(String, String)>>,
    err_sink: PathBuf,
    poll_interval: Duration,
    read_chunk: usize,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// Create a new session builder with default configuration.
    ///
    /// See the [`SessionBuilder`] documentation for default values.
    pub fn new() -> Self {
        Self {
            timeout: Some(Duration::from_millis(DEFAULT_TIMEOUT_MS)),
            working_dir: None,
            environment: None,
            err_sink: PathBuf::from(DEFAULT_ERR_SINK),
            poll_interval: Duration::from_micros(DEFAULT_POLL_INTERVAL_US),
            read_chunk: DEFAULT_READ_CHUNK,
        }
    }

    /// Set the default timeout for expect operations.
    ///
    /// A zero duration disables the deadline, like [`no_timeout`].
    ///
    /// [`no_timeout`]: Self::no_timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the default deadline (wait indefinitely).
    ///
    /// Expect calls will then only return on a match or when the
    /// process ends.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set the child's working directory.
    ///
    /// Defaults to the platform temp directory when unset.
    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Replace the child's environment with exactly these variables.
    ///
    /// When this is not called the child inherits the calling process's
    /// environment.
    pub fn environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Set the file the child's stderr is appended to.
    ///
    /// The file is created if missing. Defaults to `/dev/null`.
    pub fn err_sink(mut self, path: impl AsRef<Path>) -> Self {
        self.err_sink = path.as_ref().to_path_buf();
        self
    }

    /// Set the poll-loop backoff sleep.
    ///
    /// This is how long an expect call sleeps when no output is
    /// available before probing again. It bounds both CPU usage and the
    /// resolution at which the deadline is honored.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the number of bytes read per poll iteration (at least 1).
    ///
    /// The default of one byte re-evaluates the case table after every
    /// observed byte, detecting matches at the earliest possible
    /// moment. Larger chunks trade that timing fidelity for throughput;
    /// tests also use them to deliver a whole write in one evaluation.
    pub fn read_chunk(mut self, size: usize) -> Self {
        self.read_chunk = size.max(1);
        self
    }

    /// Spawn a command and return a configured session.
    ///
    /// The command string is interpreted by the shell, so pipelines and
    /// redirections work. Standard input and output are connected as
    /// pipes owned by the session and the output pipe is placed in
    /// non-blocking mode immediately; standard error is appended to the
    /// configured sink file.
    ///
    /// # Errors
    ///
    /// Returns [`ExpectError::Launch`] when the process cannot be
    /// created, the sink cannot be opened, or the pipes cannot be set
    /// up. No partial session state is retained on failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pipexpect::Session;
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let session = Session::builder()
    ///     .timeout(Duration::from_secs(5))
    ///     .spawn("bc -q")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn spawn(self, command: &str) -> Result<Session, ExpectError> {
        let working_dir = self.working_dir.unwrap_or_else(std::env::temp_dir);

        let mut child = spawn::spawn_shell(
            command,
            &working_dir,
            self.environment.as_deref(),
            &self.err_sink,
        )
        .map_err(ExpectError::Launch)?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExpectError::Launch(io::Error::other(
                "stdio pipes not captured",
            )));
        };

        if let Err(e) = spawn::set_nonblocking(&stdout) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExpectError::Launch(e));
        }

        tracing::debug!(command, pid = child.id(), "spawned process");

        Ok(Session {
            child: Some(child),
            stdin: Some(stdin),
            stdout: Some(stdout),
            default_timeout: self.timeout,
            poll_interval: self.poll_interval,
            read_chunk: self.read_chunk,
        })
    }
}
