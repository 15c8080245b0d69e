//! Interactive read-eval loop over the same command grammar.

use std::io::{self, BufRead, Write};

use clap::error::ErrorKind;
use clap::Parser;

use crate::session::Session;
use crate::Cli;

const PROMPT: &str = "📋 > ";

const INTRO: &str = "
╔════════════════════════════════════════╗
║          📝 HABITROOM 📝               ║
║   Tasks and habits, at the right time  ║
╚════════════════════════════════════════╝

Quick Commands:
  today  - Show all tasks & habits due today
  next   - Show next 1-3 items to focus on (time-aware!)
  add    - Add a new task or habit
  done   - Mark item as complete
  clear  - Clear the screen
  help   - Show detailed help

Type 'quit' or 'q' to exit.
";

/// What to do with one input line.
#[derive(Debug, PartialEq)]
pub enum Line {
    Empty,
    Quit,
    Clear,
    Command(Vec<String>),
}

pub fn classify(line: &str) -> Line {
    let tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
    match tokens.first().map(|t| t.to_lowercase()) {
        None => Line::Empty,
        Some(first) if matches!(first.as_str(), "quit" | "q" | "exit") => Line::Quit,
        Some(first) if first == "clear" => Line::Clear,
        Some(_) => Line::Command(tokens),
    }
}

fn execute(session: &mut Session, tokens: Vec<String>) {
    let argv = std::iter::once("habitroom".to_string()).chain(tokens);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return;
        }
        Err(e) => {
            print!("❌ {e}");
            return;
        }
    };

    let Some(command) = cli.command else {
        return;
    };
    if let Err(e) = super::dispatch(command, session) {
        tracing::debug!("Shell command failed: {}", e);
        println!("❌ {e}");
    }
}

pub fn run(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    println!("{INTRO}");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match classify(&line) {
            Line::Empty => continue,
            Line::Quit => {
                println!("\n👋 Goodbye! Stay productive!\n");
                break;
            }
            Line::Clear => {
                // Erase the display and home the cursor.
                print!("\x1b[2J\x1b[H");
                io::stdout().flush()?;
            }
            Line::Command(tokens) => execute(session, tokens),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(classify("   \n"), Line::Empty);
    }

    #[test]
    fn quit_words() {
        assert_eq!(classify("quit"), Line::Quit);
        assert_eq!(classify("Q\n"), Line::Quit);
        assert_eq!(classify("exit"), Line::Quit);
    }

    #[test]
    fn clear_is_handled_by_the_shell() {
        assert_eq!(classify("clear\n"), Line::Clear);
        assert_eq!(classify("  CLEAR "), Line::Clear);
        assert!(Cli::try_parse_from(["habitroom", "clear"]).is_err());
    }

    #[test]
    fn commands_keep_their_tokens() {
        assert_eq!(
            classify("add weekly monday,friday afternoon Go to gym\n"),
            Line::Command(vec![
                "add".into(),
                "weekly".into(),
                "monday,friday".into(),
                "afternoon".into(),
                "Go".into(),
                "to".into(),
                "gym".into(),
            ])
        );
    }

    #[test]
    fn shell_lines_parse_with_the_cli_grammar() {
        let cli = Cli::try_parse_from(["habitroom", "next", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(crate::Commands::Next { count: Some(ref c), json: false }) if c == "5"
        ));
    }
}
