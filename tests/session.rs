//! End-to-end tests driving real shell children through the
//! send/expect cycle.

use std::time::{Duration, Instant};

use pipexpect::{Case, CaseTable, ExpectError, ExpectOutcome, Session};

/// Wait until the child has exited, bounded so a wedged process fails
/// the test instead of hanging it.
async fn wait_for_exit(session: &mut Session) {
    for _ in 0..500 {
        if !session.is_running() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("child did not exit in time");
}

#[tokio::test]
async fn eol_returns_everything_written_before_exit() {
    let mut session = Session::spawn("printf 'done\\n'").unwrap();
    let table = CaseTable::new().case(Case::contains("never", "absent"));

    let outcome = session.expect(&table).await.unwrap();
    assert_eq!(
        outcome,
        ExpectOutcome::Eol {
            buffer: "done\n".to_string()
        }
    );
}

#[tokio::test]
async fn eol_with_empty_buffer_when_child_prints_nothing() {
    let mut session = Session::spawn("true").unwrap();
    let table = CaseTable::new().case(Case::new("any", "x"));

    let outcome = session.expect(&table).await.unwrap();
    assert_eq!(
        outcome,
        ExpectOutcome::Eol {
            buffer: String::new()
        }
    );
}

#[tokio::test]
async fn contains_matches_at_earliest_byte() {
    // Default one-byte reads evaluate after every byte, so the case
    // triggers before the trailing space arrives.
    let mut session = Session::spawn("printf 'login: '").unwrap();
    let table = CaseTable::new().case(Case::contains("prompt", "login:"));

    match session.expect(&table).await.unwrap() {
        ExpectOutcome::Match { label, captures } => {
            assert_eq!(label, "prompt");
            assert_eq!(captures, ["login:".to_string()]);
        }
        other => panic!("expected match, got {:?}", other),
    }
}

#[tokio::test]
async fn larger_read_chunk_delivers_whole_write() {
    let mut session = Session::builder()
        .read_chunk(64)
        .spawn("printf 'login: '")
        .unwrap();
    let table = CaseTable::new().case(Case::contains("prompt", "login:"));

    match session.expect(&table).await.unwrap() {
        ExpectOutcome::Match { captures, .. } => {
            assert_eq!(captures, ["login: ".to_string()]);
        }
        other => panic!("expected match, got {:?}", other),
    }
}

#[tokio::test]
async fn first_case_in_table_order_wins() {
    let mut session = Session::builder()
        .read_chunk(16)
        .spawn("printf 'ab'")
        .unwrap();
    let table = CaseTable::new()
        .case(Case::contains("first", "ab"))
        .case(Case::contains("second", "b"));

    let outcome = session.expect(&table).await.unwrap();
    assert_eq!(outcome.label(), Some("first"));
}

#[tokio::test]
async fn exact_is_whole_buffer_equality() {
    // With the whole output in one chunk, "ok" is never equal to the
    // buffer "ok!"; the cycle ends at end-of-output instead.
    let mut session = Session::builder()
        .read_chunk(16)
        .spawn("printf 'ok!'")
        .unwrap();
    let table = CaseTable::new().case(Case::exact("done", "ok"));

    let outcome = session.expect(&table).await.unwrap();
    assert_eq!(
        outcome,
        ExpectOutcome::Eol {
            buffer: "ok!".to_string()
        }
    );
}

#[tokio::test]
async fn exact_prefix_triggers_early_under_byte_reads() {
    // Byte-at-a-time reads pass through the state where the buffer is
    // exactly "ok", so the case fires before "!" is observed.
    let mut session = Session::spawn("printf 'ok!'").unwrap();
    let table = CaseTable::new().case(Case::exact("done", "ok"));

    match session.expect(&table).await.unwrap() {
        ExpectOutcome::Match { label, captures } => {
            assert_eq!(label, "done");
            assert_eq!(captures, ["ok".to_string()]);
        }
        other => panic!("expected match, got {:?}", other),
    }
}

#[tokio::test]
async fn regex_surfaces_capture_groups() {
    let mut session = Session::spawn("printf 'user=alice id=42\\n'").unwrap();
    let table =
        CaseTable::new().case(Case::regex("creds", r"user=(\w+) id=(\d+)\n").unwrap());

    match session.expect(&table).await.unwrap() {
        ExpectOutcome::Match { label, captures } => {
            assert_eq!(label, "creds");
            assert_eq!(captures[0], "user=alice id=42\n");
            assert_eq!(captures[1], "alice");
            assert_eq!(captures[2], "42");
        }
        other => panic!("expected match, got {:?}", other),
    }
}

#[tokio::test]
async fn timeout_returns_partial_buffer() {
    let mut session = Session::builder()
        .timeout(Duration::from_millis(300))
        .spawn("printf 'par'; sleep 5")
        .unwrap();
    let table = CaseTable::new().case(Case::contains("never", "absent"));

    let start = Instant::now();
    let outcome = session.expect(&table).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(
        outcome,
        ExpectOutcome::Timeout {
            buffer: "par".to_string()
        }
    );
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_secs(3), "deadline overshot: {:?}", elapsed);
}

#[tokio::test]
async fn timeout_with_no_output_at_all() {
    let mut session = Session::builder()
        .timeout(Duration::from_millis(250))
        .spawn("sleep 3")
        .unwrap();

    let start = Instant::now();
    let outcome = session.expect(&CaseTable::new()).await.unwrap();

    assert_eq!(
        outcome,
        ExpectOutcome::Timeout {
            buffer: String::new()
        }
    );
    assert!(start.elapsed() >= Duration::from_millis(250));
}

#[tokio::test]
async fn zero_timeout_disables_the_deadline() {
    // Long-silent-then-matching stream: a zero deadline must wait it
    // out rather than time out early.
    let mut session = Session::builder()
        .timeout(Duration::from_millis(100))
        .spawn("sleep 1; echo ready")
        .unwrap();
    let table = CaseTable::new().case(Case::contains("up", "ready"));

    let start = Instant::now();
    let outcome = session
        .expect_timeout(&table, Some(Duration::ZERO))
        .await
        .unwrap();

    assert_eq!(outcome.label(), Some("up"));
    assert!(start.elapsed() >= Duration::from_millis(900));
}

#[tokio::test]
async fn no_timeout_waits_for_match() {
    let mut session = Session::spawn("sleep 1; echo ready").unwrap();
    let table = CaseTable::new().case(Case::contains("up", "ready"));

    let outcome = session.expect_timeout(&table, None).await.unwrap();
    assert_eq!(outcome.label(), Some("up"));
}

#[tokio::test]
async fn send_on_exited_process_fails_with_not_running() {
    let mut session = Session::spawn("true").unwrap();
    wait_for_exit(&mut session).await;

    let result = session.send_line("hello");
    assert!(matches!(result, Err(ExpectError::NotRunning)));
}

#[tokio::test]
async fn interactive_round_trips_start_each_cycle_fresh() {
    let mut session = Session::spawn("cat").unwrap();

    session.send_line("hello").unwrap();
    let outcome = session
        .expect(&CaseTable::new().case(Case::contains("echoed", "hello")))
        .await
        .unwrap();
    assert_eq!(outcome.label(), Some("echoed"));

    // The first cycle consumed "hello"; this one only sees new output.
    session.send_line("world").unwrap();
    let outcome = session
        .expect(&CaseTable::new().case(Case::contains("echoed", "world")))
        .await
        .unwrap();
    assert_eq!(outcome.label(), Some("echoed"));

    session.close();
    assert!(!session.is_running());
}

#[tokio::test]
async fn login_password_walkthrough() {
    let script = "printf 'login: '; read name; printf 'Password:'; read pw; echo welcome";
    let mut session = Session::spawn(script).unwrap();

    let prompt = CaseTable::new().case(Case::contains("prompt", "login:"));
    assert_eq!(session.expect(&prompt).await.unwrap().label(), Some("prompt"));
    session.send_line("alice").unwrap();

    let password = CaseTable::new().case(Case::contains("pw", "assword:"));
    assert_eq!(session.expect(&password).await.unwrap().label(), Some("pw"));
    session.send_line("hunter2").unwrap();

    let done = CaseTable::new().case(Case::contains("in", "welcome"));
    assert_eq!(session.expect(&done).await.unwrap().label(), Some("in"));
}

#[tokio::test]
async fn close_is_idempotent_and_terminal() {
    let mut session = Session::spawn("sleep 5").unwrap();
    assert!(session.is_running());

    session.close();
    session.close();
    assert!(!session.is_running());

    assert!(matches!(
        session.send_line("anyone there"),
        Err(ExpectError::NotRunning)
    ));

    // Expecting on a closed session reports end-of-output, not a hang.
    let outcome = session.expect(&CaseTable::new()).await.unwrap();
    assert_eq!(
        outcome,
        ExpectOutcome::Eol {
            buffer: String::new()
        }
    );
}

#[tokio::test]
async fn stderr_goes_to_the_sink_file() {
    let sink = std::env::temp_dir().join(format!("pipexpect-stderr-{}.log", std::process::id()));
    let _ = std::fs::remove_file(&sink);

    let mut session = Session::builder()
        .err_sink(&sink)
        .spawn("echo oops 1>&2")
        .unwrap();
    let outcome = session.expect(&CaseTable::new()).await.unwrap();

    // Nothing on stdout; the diagnostic landed in the sink.
    assert!(outcome.is_eol());
    let logged = std::fs::read_to_string(&sink).unwrap();
    assert!(logged.contains("oops"), "sink content: {:?}", logged);

    let _ = std::fs::remove_file(&sink);
}

#[tokio::test]
async fn environment_replaces_inherited_variables() {
    let mut session = Session::builder()
        .environment([("MARKER", "xyz123"), ("PATH", "/usr/bin:/bin")])
        .spawn("printf '%s' \"$MARKER\"")
        .unwrap();
    let table = CaseTable::new().case(Case::contains("seen", "xyz123"));

    assert_eq!(session.expect(&table).await.unwrap().label(), Some("seen"));
}

#[tokio::test]
async fn working_dir_is_where_the_child_runs() {
    let mut session = Session::builder()
        .working_dir("/")
        .spawn("pwd")
        .unwrap();
    let table = CaseTable::new().case(Case::exact("root", "/\n"));

    assert_eq!(session.expect(&table).await.unwrap().label(), Some("root"));
}

#[tokio::test]
async fn working_dir_defaults_to_the_temp_directory() {
    let expected = std::fs::canonicalize(std::env::temp_dir()).unwrap();

    let mut session = Session::spawn("pwd -P").unwrap();
    let table = CaseTable::new().case(Case::contains(
        "tmp",
        expected.to_str().unwrap(),
    ));

    assert_eq!(session.expect(&table).await.unwrap().label(), Some("tmp"));
}
