//! Interactive session example
//!
//! Drives a shell `read` loop the way one would drive a login prompt:
//! expect a prompt, answer it, repeat.

use anyhow::Result;
use pipexpect::{Case, CaseTable, ExpectOutcome, Session};

#[tokio::main]
async fn main() -> Result<()> {
    println!("pipexpect - Interactive Session Example");
    println!("{}", "=".repeat(50));

    // A stand-in for an interactive program that prompts twice.
    let script = "printf 'name: '; read name; printf 'color: '; read color; \
                  echo \"hello $name, $color it is\"";
    let mut session = Session::spawn(script)?;

    let name_prompt = CaseTable::new().case(Case::contains("prompt", "name:"));
    if session.expect(&name_prompt).await?.label() == Some("prompt") {
        println!("answering name prompt");
        session.send_line("alice")?;
    }

    let color_prompt = CaseTable::new().case(Case::contains("prompt", "color:"));
    if session.expect(&color_prompt).await?.label() == Some("prompt") {
        println!("answering color prompt");
        session.send_line("green")?;
    }

    let farewell = CaseTable::new().case(Case::contains("done", "hello alice"));
    match session.expect(&farewell).await? {
        ExpectOutcome::Match { captures, .. } => {
            println!("final output: {:?}", captures[0]);
        }
        other => println!("unexpected outcome: {:?}", other),
    }

    session.close();
    Ok(())
}
