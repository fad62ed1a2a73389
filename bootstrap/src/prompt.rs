//! Operator prompt for choosing the API key

use crate::error::{BootstrapError, Result};
use std::fmt;
use std::io::{BufRead, Write};
use tracing::debug;

const MENU_HEADER: &str = "Choose how to set the Tightlock API key:";
const SELECT_PROMPT: &str = "#? ";
const KEY_PROMPT: &str = "Enter your API key: ";

/// Where the API key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    UserProvided,
    Pseudorandom,
}

impl KeySource {
    pub const ALL: [KeySource; 2] = [KeySource::UserProvided, KeySource::Pseudorandom];

    pub fn label(&self) -> &'static str {
        match self {
            KeySource::UserProvided => "User-provided",
            KeySource::Pseudorandom => "Pseudorandom",
        }
    }

    /// Parse a menu answer: the 1-based number or the label
    pub fn parse(answer: &str) -> Option<Self> {
        let answer = answer.trim();
        if let Ok(index) = answer.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i))
                .copied();
        }
        Self::ALL
            .into_iter()
            .find(|source| source.label().eq_ignore_ascii_case(answer))
    }
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

enum MenuState {
    AwaitingSelection,
    Selected(KeySource),
}

/// Line-oriented prompt over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Ask which key source to use, repeating until the answer is valid
    pub fn select_source(&mut self) -> Result<KeySource> {
        writeln!(self.output, "{}", MENU_HEADER)?;
        for (index, source) in KeySource::ALL.iter().enumerate() {
            writeln!(self.output, "{}) {}", index + 1, source)?;
        }

        let mut state = MenuState::AwaitingSelection;
        loop {
            match state {
                MenuState::Selected(source) => return Ok(source),
                MenuState::AwaitingSelection => {
                    self.write_prompt(SELECT_PROMPT)?;
                    let answer = self.read_line()?;
                    match std::str::from_utf8(&answer).ok().and_then(KeySource::parse) {
                        Some(source) => state = MenuState::Selected(source),
                        None => debug!(
                            "Ignoring menu answer {:?}",
                            String::from_utf8_lossy(&answer)
                        ),
                    }
                }
            }
        }
    }

    /// Run the whole exchange and return the chosen key.
    ///
    /// `candidate` is only shown when the operator picks the pseudorandom key.
    /// A typed key is returned as raw bytes; it need not be UTF-8.
    pub fn choose_key(&mut self, candidate: &str) -> Result<(KeySource, Vec<u8>)> {
        let source = self.select_source()?;
        let key = match source {
            KeySource::UserProvided => {
                self.write_prompt(KEY_PROMPT)?;
                self.read_line()?
            }
            KeySource::Pseudorandom => {
                writeln!(self.output, "Your API key is: {}", candidate)?;
                candidate.as_bytes().to_vec()
            }
        };
        self.output.flush()?;
        Ok((source, key))
    }

    fn write_prompt(&mut self, prompt: &str) -> Result<()> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        Ok(())
    }

    /// One line of input without its terminator
    fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(BootstrapError::PromptClosed);
        }
        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }
        Ok(line)
    }
}
