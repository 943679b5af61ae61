//! pipexpect: automation for interactive command-line programs
//!
//! pipexpect spawns a child process over plain pipes, feeds it input,
//! and drives control flow by matching incoming output against an
//! ordered table of expected patterns, in the spirit of the classic
//! Unix `expect` utility. There is no terminal emulation and no
//! scripting language; callers compose expect calls themselves.
//!
//! # Features
//!
//! - **Pipe-based sessions**: stdin and stdout connected as pipes the
//!   session owns, stderr appended to a configurable sink file
//! - **Labeled case tables**: exact, substring, and regex conditions
//!   evaluated in table order, first satisfied case wins
//! - **Sentinel outcomes**: process end and deadline expiry are normal
//!   results carrying everything read so far, not errors
//! - **Cooperative polling**: non-blocking reads with a short
//!   configurable backoff sleep instead of readiness notification
//! - **Deterministic knobs**: poll interval and read-chunk size are
//!   explicit configuration so tests can run the loop fast
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pipexpect::{Case, CaseTable, ExpectOutcome, Session};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Spawn a process; the command string is shell-interpreted.
//!     let mut session = Session::builder()
//!         .timeout(Duration::from_secs(5))
//!         .spawn("ftp mirror.example.org")?;
//!
//!     // Wait for the login prompt.
//!     let table = CaseTable::new().case(Case::contains("prompt", "Name"));
//!     match session.expect(&table).await? {
//!         ExpectOutcome::Match { label, captures } => {
//!             println!("{} matched, saw {:?}", label, captures);
//!             session.send_line("anonymous")?;
//!         }
//!         ExpectOutcome::Eol { buffer } => println!("process ended: {}", buffer),
//!         ExpectOutcome::Timeout { buffer } => println!("no prompt in time: {}", buffer),
//!     }
//!
//!     session.close();
//!     Ok(())
//! }
//! ```
//!
//! # Case Tables
//!
//! A case table maps caller-chosen labels to match conditions. Three
//! kinds of condition exist; substring containment is the default:
//!
//! ```rust
//! use pipexpect::{Case, CaseTable};
//!
//! let table = CaseTable::new()
//!     // Literal substring anywhere in the buffer (default kind)
//!     .case(Case::new("prompt", "login:"))
//!     // Whole-buffer equality, byte for byte
//!     .case(Case::exact("banner", "ready\n"))
//!     // Regular expression; capture groups surface in the outcome
//!     .case(Case::regex("version", r"v(\d+)\.(\d+)").unwrap());
//! ```
//!
//! Conditions are re-evaluated against the cumulative buffer after
//! every newly read chunk, so the earliest satisfiable case triggers as
//! soon as its bytes arrive. When several cases would match, the first
//! one in table order wins.
//!
//! # Outcomes
//!
//! An expect call ends in one of three ways, all carrying data:
//!
//! - `Match { label, captures }`: a case was satisfied. Captures hold
//!   the whole buffer, or the regex groups for a regex case.
//! - `Eol { buffer }`: the process ended before any case matched.
//! - `Timeout { buffer }`: the deadline elapsed first. A timeout of
//!   zero (or `None`) disables the deadline entirely.
//!
//! # Lifecycle
//!
//! A session starts by spawning and is driven by `send_line`/`expect`
//! round trips until it is closed, after which it is terminal.
//! Dropping a session closes it, so pipes and the process handle are
//! released exactly once on every exit path. Closing never signals or
//! waits for a live child.

#![warn(missing_docs)]

mod engine;
mod pattern;
mod result;
mod session;

// Public API exports
pub use pattern::{Case, CaseTable, Condition};
pub use result::{ExpectError, ExpectOutcome};
pub use session::{Session, SessionBuilder};
