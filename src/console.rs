//! Line-oriented console input shared by the interactive demos.

use crate::error::{PlaygroundError, Result};
use colored::{ColoredString, Colorize};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Demo heading, e.g. `=== Proxy ===`.
pub fn banner(title: &str) -> ColoredString {
    format!("=== {title} ===").bold().cyan()
}

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Prompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Reads one line without its trailing newline, or `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prints `question` (no newline) and returns the trimmed answer.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        match self.read_line()? {
            Some(answer) => Ok(answer.trim().to_string()),
            None => Err(PlaygroundError::InputClosed),
        }
    }

    /// Re-asks until the answer parses and passes `accept`.
    pub fn ask_parsed<T: FromStr>(
        &mut self,
        question: &str,
        accept: impl Fn(&T) -> bool,
    ) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<T>() {
                Ok(value) if accept(&value) => return Ok(value),
                _ => writeln!(self.output, "'{answer}' is not a valid answer, try again.")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims_and_echoes_question() {
        let mut prompt = Prompt::new(Cursor::new("  hello \n"), Vec::new());
        assert_eq!(prompt.ask("Name: ").unwrap(), "hello");
        assert_eq!(String::from_utf8(prompt.into_output()).unwrap(), "Name: ");
    }

    #[test]
    fn test_ask_at_eof_is_input_closed() {
        let mut prompt = Prompt::new(Cursor::new(""), Vec::new());
        assert!(matches!(prompt.ask("? "), Err(PlaygroundError::InputClosed)));
    }

    #[test]
    fn test_ask_parsed_retries_until_valid() {
        let mut prompt = Prompt::new(Cursor::new("x\n9\n3\n"), Vec::new());
        let value: u32 = prompt.ask_parsed("n: ", |n| *n < 5).unwrap();
        assert_eq!(value, 3);

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert!(output.contains("'x' is not a valid answer"));
        assert!(output.contains("'9' is not a valid answer"));
    }

    #[test]
    fn test_banner_wraps_title() {
        colored::control::set_override(false);
        assert_eq!(banner("Proxy").to_string(), "=== Proxy ===");
    }
}
