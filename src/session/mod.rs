//! The interactive menu session.
//!
//! A session is bound to one project directory and one `ProjectKind` for its
//! whole life. It runs a small state machine:
//!
//! ```text
//!   Render ──► AwaitInput ──► Dispatch ──► Exit
//!     ▲            │  ▲           │
//!     │   bad input└──┘           ├──► Confirm ──► Execute ──┐
//!     │                           │       │ declined          │
//!     │                           └───────┼──────► Execute ───┤
//!     └───────────────────────────────────┴───────────────────┘
//! ```
//!
//! The process working directory is switched into the project while the
//! session runs and restored by `WorkingDirGuard` on every way out.

mod guard;

pub use guard::WorkingDirGuard;

use std::path::{Path, PathBuf};

use crate::config::DevvyToml;
use crate::detect::ProjectKind;
use crate::errors::{DevvyError, PromptError};
use crate::exec::{CommandRunner, Invocation};
use crate::interact::Interaction;
use crate::menu::{ArgInput, CommandEntry, CommandId, FanOut, Handler, Tool, entry_at, handler_for};
use crate::ui;

pub const RETRY_NOTICE: &str = "Invalid input. Please try again.";
pub const CONFIRM_QUESTION: &str = "Are you sure you want to run this command?(y/N)";
pub const CONTINUE_PROMPT: &str = "Press Enter to continue...";

/// Fallback when the configured rebuild argv is empty.
const REBUILD_FALLBACK: &str = "nixos-rebuild";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Render,
    AwaitInput,
    Dispatch(CommandEntry),
    Confirm(CommandId, &'static Handler),
    Execute(CommandId, &'static Handler),
    Exit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user picked `exit`.
    Exited,
    /// Input ran out (stdin closed or no terminal).
    InputClosed,
}

/// Menu-driven dispatcher for one project.
pub struct MenuController<I, R> {
    project_dir: PathBuf,
    kind: ProjectKind,
    config: DevvyToml,
    io: I,
    runner: R,
}

impl<I: Interaction, R: CommandRunner> MenuController<I, R> {
    /// `kind` must be a supported kind; callers stop at `ProjectKind::None`.
    pub fn new(project_dir: PathBuf, kind: ProjectKind, config: DevvyToml, io: I, runner: R) -> Self {
        debug_assert!(kind.is_supported(), "no menu for {kind}");
        Self {
            project_dir,
            kind,
            config,
            io,
            runner,
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Give back the terminal and runner, e.g. to inspect them after a run.
    pub fn into_parts(self) -> (I, R) {
        (self.io, self.runner)
    }

    /// Run the menu loop until the user exits or input runs out.
    pub fn run(&mut self) -> Result<SessionEnd, DevvyError> {
        let _cwd = WorkingDirGuard::enter(&self.project_dir)?;
        tracing::debug!(kind = %self.kind, "session started");

        let end = self.run_loop();
        tracing::debug!(?end, "session finished");
        end
    }

    fn run_loop(&mut self) -> Result<SessionEnd, DevvyError> {
        let mut state = State::Render;
        loop {
            state = match self.step(state) {
                Ok(State::Exit) => return Ok(SessionEnd::Exited),
                Ok(next) => next,
                Err(PromptError::Interrupted) => {
                    self.io.print(&ui::notice(RETRY_NOTICE))?;
                    State::AwaitInput
                }
                Err(PromptError::Closed) => return Ok(SessionEnd::InputClosed),
                Err(err) => return Err(err.into()),
            };
        }
    }

    fn step(&mut self, state: State) -> Result<State, PromptError> {
        match state {
            State::Render => {
                self.render()?;
                Ok(State::AwaitInput)
            }
            State::AwaitInput => {
                let line = self.io.read_line(ui::SELECTION_PROMPT, None)?;
                match self.parse_choice(&line) {
                    Some(entry) => Ok(State::Dispatch(entry)),
                    None => {
                        self.io.print(&ui::notice(RETRY_NOTICE))?;
                        Ok(State::AwaitInput)
                    }
                }
            }
            State::Dispatch(entry) => {
                if entry.id == CommandId::Exit {
                    return Ok(State::Exit);
                }
                match handler_for(self.kind, entry.id) {
                    Some(handler) if handler.confirm => Ok(State::Confirm(entry.id, handler)),
                    Some(handler) => Ok(State::Execute(entry.id, handler)),
                    None => {
                        tracing::warn!(kind = %self.kind, command = %entry.id, "no handler bound");
                        Ok(State::Render)
                    }
                }
            }
            State::Confirm(id, handler) => {
                let answer = self.io.read_line(CONFIRM_QUESTION, Some("N"))?;
                if is_affirmative(&answer) {
                    Ok(State::Execute(id, handler))
                } else {
                    tracing::debug!(command = %id, "declined");
                    Ok(State::Render)
                }
            }
            State::Execute(id, handler) => {
                self.execute(id, handler)?;
                self.io.acknowledge(CONTINUE_PROMPT)?;
                Ok(State::Render)
            }
            State::Exit => Ok(State::Exit),
        }
    }

    fn render(&mut self) -> Result<(), PromptError> {
        self.io.clear()?;
        for line in ui::render_menu(self.kind) {
            self.io.print(&line)?;
        }
        Ok(())
    }

    fn parse_choice(&self, line: &str) -> Option<CommandEntry> {
        let choice = line.trim().parse::<usize>().ok()?;
        entry_at(self.kind, choice).copied()
    }

    fn execute(&mut self, id: CommandId, handler: &Handler) -> Result<(), PromptError> {
        if let Some(requirement) = handler.requires
            && !self.project_dir.join(requirement.file).exists()
        {
            self.io.print(&ui::notice(requirement.notice))?;
            return Ok(());
        }

        for invocation in self.build_invocations(id, handler)? {
            if let Err(err) = self.runner.run(&invocation) {
                tracing::warn!(command = %invocation, error = %err, "command did not start");
                self.io.print(&ui::failure(&err.to_string()))?;
            }
        }
        Ok(())
    }

    /// Ask whatever the handler needs and turn the answers into processes.
    fn build_invocations(
        &mut self,
        id: CommandId,
        handler: &Handler,
    ) -> Result<Vec<Invocation>, PromptError> {
        let base = self.base_invocation(handler);
        let label = ui::prompt_label(handler.tool.label(), id.as_str());

        let invocations = match handler.input {
            ArgInput::None => vec![base],
            ArgInput::Tokens => {
                let tokens = split_tokens(&self.io.read_line(&label, None)?);
                match handler.fan_out {
                    FanOut::Single => vec![base.args(tokens)],
                    FanOut::PerToken => tokens
                        .into_iter()
                        .map(|token| base.clone().arg(token))
                        .collect(),
                }
            }
            ArgInput::FlaggedTokens { flag } => {
                let tokens = split_tokens(&self.io.read_line(&label, None)?);
                if tokens.is_empty() {
                    vec![base]
                } else {
                    vec![base.arg(flag).args(tokens)]
                }
            }
            ArgInput::Required => {
                let value = loop {
                    let line = self.io.read_line(&label, None)?;
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        break trimmed.to_string();
                    }
                };
                vec![base.arg(value)]
            }
            ArgInput::Toggle { question, flag } => {
                let answer = self.io.read_line(question, Some("N"))?;
                if is_affirmative(&answer) {
                    vec![base.arg(flag)]
                } else {
                    vec![base]
                }
            }
        };

        if handler.in_terminal {
            let terminal = &self.config.terminal;
            Ok(invocations
                .into_iter()
                .map(|invocation| invocation.wrapped_in(&terminal.program, &terminal.args))
                .collect())
        } else {
            Ok(invocations)
        }
    }

    fn base_invocation(&self, handler: &Handler) -> Invocation {
        let tools = &self.config.tools;
        let fixed = handler.args.iter().copied();
        match handler.tool {
            Tool::Rye => Invocation::new(&tools.rye, fixed),
            Tool::Cargo => Invocation::new(&tools.cargo, fixed),
            Tool::Bunx => Invocation::new(&tools.bunx, fixed),
            Tool::Nix => Invocation::new(&tools.nix, fixed),
            Tool::SystemRebuild => match self.config.rebuild.command.split_first() {
                Some((program, rest)) => Invocation::new(program, rest.iter().cloned()).args(fixed),
                None => Invocation::new(REBUILD_FALLBACK, fixed),
            },
        }
    }
}

/// Only `y` or `Y` counts as yes.
fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y")
}

fn split_tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
