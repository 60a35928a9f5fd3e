use cardshelf::collab::Confirm;
use cardshelf::error::{CardsError, Result};
use std::io::{self, Write};

/// Reads one line from stdin without its line ending. `None` at end of input.
pub fn read_line() -> Result<Option<String>> {
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input).map_err(CardsError::Io)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Prints `label` without a newline and reads the answer.
pub fn ask(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush().map_err(CardsError::Io)?;
    read_line()
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Asks on the terminal. Anything but y/yes, including end of input, means no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        match ask(&format!("{} [y/N] ", prompt)) {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }
}
