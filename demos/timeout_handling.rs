//! Timeout handling example

use pipexpect::{Case, CaseTable, ExpectOutcome, Session};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("pipexpect - Timeout Handling Example");
    println!("{}", "=".repeat(50));

    // Match well within the deadline.
    println!("\n1. Match within timeout");
    let mut session = Session::builder()
        .timeout(Duration::from_secs(2))
        .spawn("echo Quick response")?;
    let table = CaseTable::new().case(Case::contains("ok", "Quick"));

    match session.expect(&table).await? {
        ExpectOutcome::Match { label, .. } => println!("   ✓ matched case '{}'", label),
        other => println!("   ✗ unexpected: {:?}", other),
    }

    // The deadline elapses; the sentinel carries the partial buffer.
    println!("\n2. Timeout while waiting");
    let mut session = Session::builder()
        .timeout(Duration::from_millis(500))
        .spawn("printf 'starting...'; sleep 5")?;
    let table = CaseTable::new().case(Case::contains("ready", "READY"));

    match session.expect(&table).await? {
        ExpectOutcome::Timeout { buffer } => {
            println!("   ✓ timed out as expected, saw so far: {:?}", buffer);
        }
        other => println!("   ✗ unexpected: {:?}", other),
    }

    // A zero deadline waits as long as it takes.
    println!("\n3. Indefinite wait");
    let mut session = Session::builder()
        .timeout(Duration::from_millis(100))
        .spawn("sleep 1; echo eventually ready")?;
    let table = CaseTable::new().case(Case::contains("ready", "ready"));

    match session
        .expect_timeout(&table, Some(Duration::ZERO))
        .await?
    {
        ExpectOutcome::Match { label, .. } => {
            println!("   ✓ matched '{}' despite the short default deadline", label);
        }
        other => println!("   ✗ unexpected: {:?}", other),
    }

    Ok(())
}
