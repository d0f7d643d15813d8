//! Interactive terminal I/O.
//!
//! The menu loop talks to the user only through the `Interaction` trait so
//! the state machine can be driven by a script in tests.

use std::io::IsTerminal;

use console::Term;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::errors::PromptError;

/// Line-oriented terminal capability used by the menu loop.
pub trait Interaction {
    /// Clear the screen before a fresh render.
    fn clear(&mut self) -> Result<(), PromptError>;

    /// Write one (possibly styled) line.
    fn print(&mut self, line: &str) -> Result<(), PromptError>;

    /// Read one line of text. Empty input yields `default` when given.
    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError>;

    /// Block until the user presses Enter.
    fn acknowledge(&mut self, prompt: &str) -> Result<(), PromptError>;
}

/// Where prompts are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptStream {
    Stderr,
    Stdout,
}

/// Pick a stream for prompts from which standard streams are terminals.
///
/// Input must come from a terminal. Prompts prefer stderr and fall back to
/// stdout when stderr is redirected, e.g. to capture logs.
fn prompt_stream(stdin_tty: bool, stderr_tty: bool, stdout_tty: bool) -> Option<PromptStream> {
    if !stdin_tty {
        None
    } else if stderr_tty {
        Some(PromptStream::Stderr)
    } else if stdout_tty {
        Some(PromptStream::Stdout)
    } else {
        None
    }
}

/// Real terminal: menu on stdout, prompts via dialoguer on whichever of
/// stderr or stdout is attended.
pub struct TerminalInteraction {
    out: Term,
    prompt_term: Option<Term>,
    theme: ColorfulTheme,
}

impl TerminalInteraction {
    pub fn new() -> Self {
        let out = Term::stdout();
        let err = Term::stderr();
        let stream = prompt_stream(
            std::io::stdin().is_terminal(),
            err.is_term(),
            out.is_term(),
        );
        tracing::debug!(?stream, "selected prompt stream");

        let prompt_term = stream.map(|stream| match stream {
            PromptStream::Stderr => err,
            PromptStream::Stdout => Term::stdout(),
        });

        Self {
            out,
            prompt_term,
            theme: ColorfulTheme::default(),
        }
    }

    fn attended_term(&self) -> Result<&Term, PromptError> {
        self.prompt_term.as_ref().ok_or(PromptError::Closed)
    }
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for TerminalInteraction {
    fn clear(&mut self) -> Result<(), PromptError> {
        if self.out.is_term() {
            self.out.clear_screen()?;
        }
        Ok(())
    }

    fn print(&mut self, line: &str) -> Result<(), PromptError> {
        self.out.write_line(line)?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        let term = self.attended_term()?;

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string()).show_default(true);
        }

        input
            .interact_text_on(term)
            .map_err(|err| PromptError::from(std::io::Error::from(err)))
    }

    fn acknowledge(&mut self, prompt: &str) -> Result<(), PromptError> {
        let term = self.attended_term()?;
        term.write_line("")?;
        term.write_str(prompt)?;
        term.read_line()?;
        Ok(())
    }
}

/// One scripted user action.
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum Scripted {
    Line(String),
    Interrupt,
    /// A terminal failure that is neither an interrupt nor end of input.
    Fail,
}

/// Interaction double fed from a script. Runs out of input as `Closed`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    pub script: std::collections::VecDeque<Scripted>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
    pub clears: usize,
    pub acknowledgments: usize,
}

#[cfg(test)]
impl ScriptedInteraction {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            script: lines.iter().map(|l| Scripted::Line(l.to_string())).collect(),
            ..Default::default()
        }
    }

    pub fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script: script.into(),
            ..Default::default()
        }
    }

    /// All printed text with styling stripped.
    pub fn plain_output(&self) -> Vec<String> {
        self.output
            .iter()
            .map(|line| console::strip_ansi_codes(line).into_owned())
            .collect()
    }

    fn next(&mut self) -> Result<String, PromptError> {
        match self.script.pop_front() {
            Some(Scripted::Line(line)) => Ok(line),
            Some(Scripted::Interrupt) => Err(PromptError::Interrupted),
            Some(Scripted::Fail) => Err(PromptError::Io(std::io::Error::other("terminal gone"))),
            None => Err(PromptError::Closed),
        }
    }
}

#[cfg(test)]
impl Interaction for ScriptedInteraction {
    fn clear(&mut self) -> Result<(), PromptError> {
        self.clears += 1;
        Ok(())
    }

    fn print(&mut self, line: &str) -> Result<(), PromptError> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        self.prompts
            .push(console::strip_ansi_codes(prompt).into_owned());
        let line = self.next()?;
        match default {
            Some(default) if line.is_empty() => Ok(default.to_string()),
            _ => Ok(line),
        }
    }

    fn acknowledge(&mut self, _prompt: &str) -> Result<(), PromptError> {
        self.next()?;
        self.acknowledgments += 1;
        Ok(())
    }
}
