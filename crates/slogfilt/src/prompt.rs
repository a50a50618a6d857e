//! Interactive column prompting.
//!
//! When no column list is given on the command line, the tool asks a yes/no
//! question per column. Terminal I/O sits behind a trait so the selection
//! semantics are testable without a TTY.

use std::io::{self, BufRead, Write};

use crate::error::{Result, SlogError};
use crate::header::HeaderModel;

/// Abstraction over terminal I/O for testability.
pub trait TerminalIo {
    /// Write a prompt to stdout.
    fn write_prompt(&mut self, prompt: &str) -> io::Result<()>;

    /// Read a line from stdin. An empty string signals end of input.
    fn read_line(&mut self) -> io::Result<String>;
}

/// Real terminal I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealTerminal;

impl TerminalIo for RealTerminal {
    fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        print!("{}", prompt);
        io::stdout().flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Asks, for each column in header order, whether to include it.
///
/// The default on empty input is yes. Accepts `y`/`yes` and `n`/`no` in any
/// case, re-prompting on anything else. Returns the included column names
/// (disambiguated) in header order.
pub fn choose_columns<T: TerminalIo>(model: &HeaderModel, terminal: &mut T) -> Result<Vec<String>> {
    let mut chosen = Vec::new();

    for column in model.columns() {
        loop {
            terminal.write_prompt(&format!("Output {} [Y]: ", column.name))?;
            let line = terminal.read_line()?;
            if line.is_empty() {
                return Err(SlogError::PromptClosed);
            }

            match line.trim().to_uppercase().as_str() {
                "" | "Y" | "YES" => {
                    chosen.push(column.name.clone());
                    break;
                }
                "N" | "NO" => break,
                _ => terminal.write_prompt("Please enter Y or N.\n")?,
            }
        }
    }

    Ok(chosen)
}

/// Scripted terminal for tests: replays canned responses in order.
#[derive(Debug, Default)]
pub struct MockTerminal {
    responses: Vec<String>,
    next: usize,
    pub prompts: Vec<String>,
}

impl MockTerminal {
    /// Creates a mock that replays the given responses, then signals EOF.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            next: 0,
            prompts: Vec::new(),
        }
    }

    /// Creates a mock that signals EOF immediately.
    pub fn eof() -> Self {
        Self::default()
    }
}

impl TerminalIo for MockTerminal {
    fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.prompts.push(prompt.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        if self.next < self.responses.len() {
            let line = format!("{}\n", self.responses[self.next]);
            self.next += 1;
            Ok(line)
        } else {
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn model() -> HeaderModel {
        HeaderModel::from_reader(&mut Cursor::new(
            "%% (1) TIME\n%% (2) NAV_X\n%% (3) NAV_Y\n\necho\n",
        ))
        .unwrap()
    }

    #[test]
    fn empty_input_defaults_to_yes() {
        let mut terminal = MockTerminal::with_responses(["", "", ""]);
        let chosen = choose_columns(&model(), &mut terminal).unwrap();
        assert_eq!(chosen, vec!["TIME", "NAV_X", "NAV_Y"]);
    }

    #[test]
    fn no_excludes_a_column() {
        let mut terminal = MockTerminal::with_responses(["y", "n", "yes"]);
        let chosen = choose_columns(&model(), &mut terminal).unwrap();
        assert_eq!(chosen, vec!["TIME", "NAV_Y"]);
    }

    #[test]
    fn answers_are_case_insensitive() {
        let mut terminal = MockTerminal::with_responses(["YES", "No", "Y"]);
        let chosen = choose_columns(&model(), &mut terminal).unwrap();
        assert_eq!(chosen, vec!["TIME", "NAV_Y"]);
    }

    #[test]
    fn invalid_answer_reprompts() {
        let mut terminal = MockTerminal::with_responses(["maybe", "n", "y", "y"]);
        let chosen = choose_columns(&model(), &mut terminal).unwrap();
        assert_eq!(chosen, vec!["NAV_X", "NAV_Y"]);
        assert!(terminal
            .prompts
            .iter()
            .any(|p| p.contains("Please enter Y or N.")));
    }

    #[test]
    fn prompts_follow_header_order() {
        let mut terminal = MockTerminal::with_responses(["", "", ""]);
        choose_columns(&model(), &mut terminal).unwrap();
        let asked: Vec<&String> = terminal.prompts.iter().collect();
        assert!(asked[0].contains("TIME"));
        assert!(asked[1].contains("NAV_X"));
        assert!(asked[2].contains("NAV_Y"));
    }

    #[test]
    fn eof_aborts() {
        let mut terminal = MockTerminal::eof();
        let err = choose_columns(&model(), &mut terminal).unwrap_err();
        assert!(matches!(err, SlogError::PromptClosed));
    }

    #[test]
    fn all_no_selects_nothing() {
        let mut terminal = MockTerminal::with_responses(["n", "NO", "n"]);
        let chosen = choose_columns(&model(), &mut terminal).unwrap();
        assert!(chosen.is_empty());
    }
}
