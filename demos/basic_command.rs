//! Basic command example
//!
//! Spawns a short-lived command, matches its output, and shows the
//! end-of-output sentinel.

use pipexpect::{Case, CaseTable, ExpectOutcome, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("pipexpect - Basic Command Example");
    println!("{}", "=".repeat(50));

    // Match a substring of the output.
    println!("\n1. Substring match");
    let mut session = Session::spawn("echo Hello from a child process")?;
    let table = CaseTable::new().case(Case::contains("greeting", "Hello"));

    match session.expect(&table).await? {
        ExpectOutcome::Match { label, captures } => {
            println!("   ✓ case '{}' matched, buffer: {:?}", label, captures[0]);
        }
        other => println!("   ✗ unexpected outcome: {:?}", other),
    }

    // A case table that never matches ends at Eol with the output.
    println!("\n2. End of output");
    let mut session = Session::spawn("echo done")?;
    let table = CaseTable::new().case(Case::contains("never", "no-such-text"));

    match session.expect(&table).await? {
        ExpectOutcome::Eol { buffer } => {
            println!("   ✓ process ended, collected: {:?}", buffer);
        }
        other => println!("   ✗ unexpected outcome: {:?}", other),
    }

    // Regex cases expose capture groups.
    println!("\n3. Regex captures");
    let mut session = Session::spawn("echo listening on port 8080")?;
    let table = CaseTable::new().case(Case::regex("port", r"port (\d+)")?);

    if let ExpectOutcome::Match { captures, .. } = session.expect(&table).await? {
        println!("   ✓ port is {}", captures[1]);
    }

    Ok(())
}
