use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use crossterm::style::{style, Stylize};
use thiserror::Error;

/// Raised by every prompt when the input stream is exhausted. The shell treats
/// it like choosing "exit" from the menu.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct EndOfInput;

const NOT_A_NUMBER: &str = "Invalid input. Please enter digital number where applicable.";
const NOT_FOUR_DIGITS: &str = "ID must be 4 digits, try again";

/// Line-oriented prompts over any reader/writer pair. Format problems are
/// handled here by reprompting; callers only ever see valid values.
pub struct Prompt<R, W> {
    input: R,
    output: W,
    /// Status lines carry ANSI colors only when set.
    color: bool,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: false,
        }
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write to terminal")
    }

    /// Success message, highlighted green.
    pub fn info(&mut self, text: &str) -> Result<()> {
        if self.color {
            self.say(style(text).green())
        } else {
            self.say(text)
        }
    }

    /// Failure message, highlighted red.
    pub fn error(&mut self, text: &str) -> Result<()> {
        if self.color {
            self.say(style(text).red())
        } else {
            self.say(text)
        }
    }

    /// Print `label` and read one line without its line ending.
    pub fn line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .context("failed to read from terminal")?;
        if read == 0 {
            return Err(EndOfInput.into());
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(buf)
    }

    /// Reprompt until the answer parses as an integer.
    pub fn integer(&mut self, label: &str, retry: &str) -> Result<i64> {
        loop {
            match self.line(label)?.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.error(retry)?,
            }
        }
    }

    /// Reprompt until the answer is a number with exactly four digits.
    pub fn four_digit_id(&mut self, label: &str) -> Result<i64> {
        loop {
            let answer = self.line(label)?;
            match parse_four_digit(answer.trim()) {
                Ok(id) => return Ok(id),
                Err(message) => self.error(message)?,
            }
        }
    }

    /// Like [`Prompt::four_digit_id`], but a blank answer yields `None`.
    pub fn optional_four_digit_id(&mut self, label: &str) -> Result<Option<i64>> {
        loop {
            let answer = self.line(label)?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            match parse_four_digit(answer) {
                Ok(id) => return Ok(Some(id)),
                Err(message) => self.error(message)?,
            }
        }
    }

    /// Trimmed answer, or `None` when left blank.
    pub fn optional_text(&mut self, label: &str) -> Result<Option<String>> {
        let answer = self.line(label)?;
        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    /// `true` only for a `y`/`Y` answer.
    pub fn confirm(&mut self, label: &str) -> Result<bool> {
        Ok(self.line(label)?.trim().eq_ignore_ascii_case("y"))
    }
}

fn parse_four_digit(answer: &str) -> std::result::Result<i64, &'static str> {
    if answer.is_empty() || !answer.chars().all(|c| c.is_ascii_digit()) {
        return Err(NOT_A_NUMBER);
    }
    match answer.parse::<i64>() {
        Ok(id) if (1000..=9999).contains(&id) => Ok(id),
        _ => Err(NOT_FOUR_DIGITS),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompt(script: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(prompt: Prompt<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompt.into_output()).unwrap()
    }

    #[test]
    fn integer_reprompts_until_numeric() {
        let mut p = prompt("abc\n4.5\n 12 \n");
        assert_eq!(p.integer("qty: ", "numbers only").unwrap(), 12);
        let out = transcript(p);
        assert_eq!(out.matches("numbers only").count(), 2);
        assert_eq!(out.matches("qty: ").count(), 3);
    }

    #[test]
    fn four_digit_id_rejects_short_long_and_leading_zero() {
        let mut p = prompt("123\n12345\n0123\nxyz\n3004\n");
        assert_eq!(p.four_digit_id("id: ").unwrap(), 3004);
        let out = transcript(p);
        assert_eq!(out.matches(NOT_FOUR_DIGITS).count(), 3);
        assert_eq!(out.matches(NOT_A_NUMBER).count(), 1);
    }

    #[test]
    fn optional_id_accepts_blank() {
        let mut p = prompt("\n");
        assert_eq!(p.optional_four_digit_id("id: ").unwrap(), None);

        let mut p = prompt("99\n1290\n");
        assert_eq!(p.optional_four_digit_id("id: ").unwrap(), Some(1290));
    }

    #[test]
    fn optional_text_trims_and_blanks_to_none() {
        let mut p = prompt("   \n  Emma  \n");
        assert_eq!(p.optional_text("name: ").unwrap(), None);
        assert_eq!(p.optional_text("name: ").unwrap().as_deref(), Some("Emma"));
    }

    #[test]
    fn confirm_is_case_insensitive() {
        let mut p = prompt("y\nN\n Y \nyes\n");
        assert!(p.confirm("? ").unwrap());
        assert!(!p.confirm("? ").unwrap());
        assert!(p.confirm("? ").unwrap());
        assert!(!p.confirm("? ").unwrap());
    }

    #[test]
    fn exhausted_input_reports_end_of_input() {
        let mut p = prompt("");
        let err = p.line("> ").unwrap_err();
        assert!(err.is::<EndOfInput>());
    }

    #[test]
    fn status_lines_are_plain_unless_colored() {
        let mut p = prompt("");
        p.error("nope").unwrap();
        p.info("done").unwrap();
        assert_eq!(transcript(p), "nope\ndone\n");

        let mut p = prompt("");
        p.set_color(true);
        p.error("nope").unwrap();
        let out = transcript(p);
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("nope"));
    }

    #[test]
    fn line_strips_crlf() {
        let mut p = prompt("Dune\r\n");
        assert_eq!(p.line("> ").unwrap(), "Dune");
    }
}
