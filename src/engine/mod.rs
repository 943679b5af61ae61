//! The read-match-timeout poll loop behind `Session::expect`
//!
//! One invocation reads from exactly one session and evaluates exactly
//! one case table. The loop is cooperative: reads never block (the
//! output pipe is in non-blocking mode), and when no data is available
//! the task sleeps for the session's poll interval before probing
//! again. The deadline is therefore honored at poll-interval
//! resolution rather than exactly at the millisecond boundary.

use std::io;
use std::time::{Duration, Instant};

use bytes::BytesMut;

use crate::pattern::{CaseTable, Matcher};
use crate::result::{ExpectError, ExpectOutcome};
use crate::session::Session;

type LabeledMatcher<'a> = (&'a str, Box<dyn Matcher>);

/// Run one expect cycle against `session`.
///
/// `timeout` of `None` or zero disables the deadline. The accumulation
/// buffer starts empty; nothing carries over between invocations.
pub(crate) async fn poll(
    session: &mut Session,
    table: &CaseTable,
    timeout: Option<Duration>,
) -> Result<ExpectOutcome, ExpectError> {
    let matchers: Vec<LabeledMatcher> = table
        .iter()
        .map(|case| (case.label(), case.condition().to_matcher()))
        .collect();

    let deadline = timeout.filter(|t| !t.is_zero());
    let start = Instant::now();
    let poll_interval = session.poll_interval();

    let mut buffer = BytesMut::new();
    let mut chunk = vec![0u8; session.read_chunk_size()];

    loop {
        // Deadline first: a buffer that nearly satisfies a case does
        // not extend the wait.
        if let Some(limit) = deadline {
            if start.elapsed() > limit {
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    bytes = buffer.len(),
                    "expect deadline elapsed"
                );
                return Ok(ExpectOutcome::Timeout {
                    buffer: String::from_utf8_lossy(&buffer).into_owned(),
                });
            }
        }

        match session.read_output(&mut chunk) {
            Ok(n) if n > 0 => {
                buffer.extend_from_slice(&chunk[..n]);
                if let Some(outcome) = first_match(&matchers, &buffer) {
                    return Ok(outcome);
                }
            }
            Ok(_) => {
                // End-of-stream: every write end is closed and the pipe
                // is drained, so only liveness remains to check.
                if !session.is_running() {
                    return Ok(end_of_output(&buffer));
                }
                tokio::time::sleep(poll_interval).await;
            }
            Err(e) if is_transient(&e) => {
                if !session.is_running() {
                    // The child may have written between the empty read
                    // and its exit; pick up what is left before
                    // reporting end-of-output.
                    return drain_after_exit(session, &matchers, &mut buffer, &mut chunk);
                }
                tokio::time::sleep(poll_interval).await;
            }
            Err(e) => return Err(ExpectError::Io(e)),
        }
    }
}

/// Evaluate the buffer against every case in table order, returning the
/// first satisfied case. Later cases are not evaluated.
fn first_match(matchers: &[LabeledMatcher], buffer: &[u8]) -> Option<ExpectOutcome> {
    matchers.iter().find_map(|(label, matcher)| {
        matcher.matches(buffer).map(|captures| {
            tracing::debug!(label, bytes = buffer.len(), "case matched");
            ExpectOutcome::Match {
                label: (*label).to_string(),
                captures,
            }
        })
    })
}

/// Read out whatever the exited process left in the pipe, still
/// honoring case matches on the way.
fn drain_after_exit(
    session: &mut Session,
    matchers: &[LabeledMatcher],
    buffer: &mut BytesMut,
    chunk: &mut [u8],
) -> Result<ExpectOutcome, ExpectError> {
    loop {
        match session.read_output(chunk) {
            Ok(n) if n > 0 => {
                buffer.extend_from_slice(&chunk[..n]);
                if let Some(outcome) = first_match(matchers, buffer) {
                    return Ok(outcome);
                }
            }
            Ok(_) => break,
            // A pipe still held open elsewhere reads as no-data even
            // after the child exited; end-of-output applies regardless.
            Err(e) if is_transient(&e) => break,
            Err(e) => return Err(ExpectError::Io(e)),
        }
    }

    Ok(end_of_output(buffer))
}

fn end_of_output(buffer: &[u8]) -> ExpectOutcome {
    tracing::debug!(bytes = buffer.len(), "process ended before match");
    ExpectOutcome::Eol {
        buffer: String::from_utf8_lossy(buffer).into_owned(),
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}
