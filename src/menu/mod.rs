//! Menu tables and command handlers.
//!
//! Each supported `ProjectKind` has a fixed, ordered list of `CommandEntry`s;
//! the position in the list is the number the user types (1-based). What a
//! command does is described by a `Handler` looked up from a static
//! `(kind, command)` table, so the session loop never branches on the kind.
//!
//! | Kind           | Entries                                                   |
//! |----------------|-----------------------------------------------------------|
//! | `Python`       | rye add, rye remove, rye sync, rye init, exit             |
//! | `Rust`         | cargo add, cargo remove, cargo run, cargo check, cargo build, cargo init, exit |
//! | `WebSite`      | astro add, astro dev, astro check, astro build, exit      |
//! | `SystemConfig` | nix shell, nix develop, nix build, nix run, nixos-rebuild, exit |

use crate::detect::ProjectKind;

/// Display name of the system rebuild entry.
pub const SYSTEM_REBUILD_NAME: &str = "nixos-rebuild";

/// Internal identifier selecting dispatch behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Add,
    Remove,
    Sync,
    Init,
    Run,
    Check,
    Build,
    Dev,
    Shell,
    Develop,
    Rebuild,
    Exit,
}

impl CommandId {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandId::Add => "add",
            CommandId::Remove => "remove",
            CommandId::Sync => "sync",
            CommandId::Init => "init",
            CommandId::Run => "run",
            CommandId::Check => "check",
            CommandId::Build => "build",
            CommandId::Dev => "dev",
            CommandId::Shell => "shell",
            CommandId::Develop => "develop",
            CommandId::Rebuild => "rebuild",
            CommandId::Exit => "exit",
        }
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a menu line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    /// Commands that reshape the environment.
    Danger,
    /// The exit entry.
    Safe,
    Plain,
}

/// One numbered line of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub display_name: &'static str,
    pub id: CommandId,
}

impl CommandEntry {
    const fn new(display_name: &'static str, id: CommandId) -> Self {
        Self { display_name, id }
    }

    pub fn style(&self) -> EntryStyle {
        if self.id == CommandId::Init || self.display_name == SYSTEM_REBUILD_NAME {
            EntryStyle::Danger
        } else if self.id == CommandId::Exit {
            EntryStyle::Safe
        } else {
            EntryStyle::Plain
        }
    }
}

const EXIT: CommandEntry = CommandEntry::new("exit", CommandId::Exit);

static PYTHON_MENU: [CommandEntry; 5] = [
    CommandEntry::new("rye add", CommandId::Add),
    CommandEntry::new("rye remove", CommandId::Remove),
    CommandEntry::new("rye sync", CommandId::Sync),
    CommandEntry::new("rye init", CommandId::Init),
    EXIT,
];

static RUST_MENU: [CommandEntry; 7] = [
    CommandEntry::new("cargo add", CommandId::Add),
    CommandEntry::new("cargo remove", CommandId::Remove),
    CommandEntry::new("cargo run", CommandId::Run),
    CommandEntry::new("cargo check", CommandId::Check),
    CommandEntry::new("cargo build", CommandId::Build),
    CommandEntry::new("cargo init", CommandId::Init),
    EXIT,
];

static WEB_SITE_MENU: [CommandEntry; 5] = [
    CommandEntry::new("astro add", CommandId::Add),
    CommandEntry::new("astro dev", CommandId::Dev),
    CommandEntry::new("astro check", CommandId::Check),
    CommandEntry::new("astro build", CommandId::Build),
    EXIT,
];

static SYSTEM_CONFIG_MENU: [CommandEntry; 6] = [
    CommandEntry::new("nix shell", CommandId::Shell),
    CommandEntry::new("nix develop", CommandId::Develop),
    CommandEntry::new("nix build", CommandId::Build),
    CommandEntry::new("nix run", CommandId::Run),
    CommandEntry::new(SYSTEM_REBUILD_NAME, CommandId::Rebuild),
    EXIT,
];

/// The menu for `kind`. Empty for `ProjectKind::None`.
pub fn menu_for(kind: ProjectKind) -> &'static [CommandEntry] {
    match kind {
        ProjectKind::Python => &PYTHON_MENU,
        ProjectKind::Rust => &RUST_MENU,
        ProjectKind::WebSite => &WEB_SITE_MENU,
        ProjectKind::SystemConfig => &SYSTEM_CONFIG_MENU,
        ProjectKind::None => &[],
    }
}

/// Resolve a 1-based menu choice.
pub fn entry_at(kind: ProjectKind, choice: usize) -> Option<&'static CommandEntry> {
    choice.checked_sub(1).and_then(|index| menu_for(kind).get(index))
}

/// Which configured executable a handler starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Rye,
    Cargo,
    Bunx,
    Nix,
    /// The configured rebuild argv; handler args are appended to it.
    SystemRebuild,
}

impl Tool {
    /// Label used in inline prompts, e.g. `(cargo: add)`.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Rye => "rye",
            Tool::Cargo => "cargo",
            Tool::Bunx => "astro",
            Tool::Nix => "nix",
            Tool::SystemRebuild => "nixos-rebuild",
        }
    }
}

/// What the user is asked before the command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgInput {
    None,
    /// Whitespace-separated tokens appended as arguments; empty input is fine.
    Tokens,
    /// Optional tokens, preceded by `flag` when any are given.
    FlaggedTokens { flag: &'static str },
    /// A single value; asked again until non-empty.
    Required,
    /// A y/N question; `y` appends `flag`.
    Toggle {
        question: &'static str,
        flag: &'static str,
    },
}

/// How collected tokens turn into processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOut {
    /// One process with every token as an argument.
    Single,
    /// One process per token, in input order.
    PerToken,
}

/// A file that must exist in the project directory, and what to tell the
/// user when it doesn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub file: &'static str,
    pub notice: &'static str,
}

/// Everything the session needs to run one `(kind, command)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handler {
    pub tool: Tool,
    /// Fixed arguments placed right after the executable.
    pub args: &'static [&'static str],
    pub input: ArgInput,
    pub fan_out: FanOut,
    /// Ask "are you sure" first.
    pub confirm: bool,
    pub requires: Option<Requirement>,
    /// Run inside the configured terminal launcher.
    pub in_terminal: bool,
}

impl Handler {
    const fn new(tool: Tool, args: &'static [&'static str]) -> Self {
        Self {
            tool,
            args,
            input: ArgInput::None,
            fan_out: FanOut::Single,
            confirm: false,
            requires: None,
            in_terminal: false,
        }
    }

    const fn input(self, input: ArgInput) -> Self {
        Self { input, ..self }
    }

    const fn per_token(self) -> Self {
        Self {
            fan_out: FanOut::PerToken,
            ..self
        }
    }

    const fn confirmed(self) -> Self {
        Self {
            confirm: true,
            ..self
        }
    }

    const fn requires(self, file: &'static str, notice: &'static str) -> Self {
        Self {
            requires: Some(Requirement { file, notice }),
            ..self
        }
    }

    const fn in_terminal(self) -> Self {
        Self {
            in_terminal: true,
            ..self
        }
    }
}

pub const RELEASE_QUESTION: &str = "Do you build this project for release?(y/N)";
pub const NO_FLAKE_NOTICE: &str = "There is no flake environment.";

use CommandId as C;
use ProjectKind as K;

static HANDLERS: &[(ProjectKind, CommandId, Handler)] = &[
    (K::Python, C::Add, Handler::new(Tool::Rye, &["add"]).input(ArgInput::Tokens)),
    (K::Python, C::Remove, Handler::new(Tool::Rye, &["remove"]).input(ArgInput::Tokens)),
    (K::Python, C::Sync, Handler::new(Tool::Rye, &["sync"])),
    (K::Python, C::Init, Handler::new(Tool::Rye, &["init"]).confirmed()),
    (
        K::Rust,
        C::Add,
        Handler::new(Tool::Cargo, &["add"]).input(ArgInput::Tokens).per_token(),
    ),
    (
        K::Rust,
        C::Remove,
        Handler::new(Tool::Cargo, &["remove"]).input(ArgInput::Tokens).per_token(),
    ),
    (K::Rust, C::Run, Handler::new(Tool::Cargo, &["run"])),
    (K::Rust, C::Check, Handler::new(Tool::Cargo, &["check"])),
    (
        K::Rust,
        C::Build,
        Handler::new(Tool::Cargo, &["build"]).input(ArgInput::Toggle {
            question: RELEASE_QUESTION,
            flag: "--release",
        }),
    ),
    (K::Rust, C::Init, Handler::new(Tool::Cargo, &["init"]).confirmed()),
    (
        K::WebSite,
        C::Add,
        Handler::new(Tool::Bunx, &["astro", "add"]).input(ArgInput::Tokens),
    ),
    (K::WebSite, C::Dev, Handler::new(Tool::Bunx, &["--bun", "astro", "dev"])),
    (K::WebSite, C::Check, Handler::new(Tool::Bunx, &["--bun", "astro", "check"])),
    (K::WebSite, C::Build, Handler::new(Tool::Bunx, &["--bun", "astro", "build"])),
    (
        K::SystemConfig,
        C::Shell,
        Handler::new(Tool::Nix, &["shell"])
            .input(ArgInput::FlaggedTokens { flag: "-p" })
            .in_terminal(),
    ),
    (
        K::SystemConfig,
        C::Develop,
        Handler::new(Tool::Nix, &["develop"])
            .input(ArgInput::Tokens)
            .requires("flake.nix", NO_FLAKE_NOTICE),
    ),
    (
        K::SystemConfig,
        C::Build,
        Handler::new(Tool::Nix, &["build"]).input(ArgInput::Required),
    ),
    (
        K::SystemConfig,
        C::Run,
        Handler::new(Tool::Nix, &["run"]).input(ArgInput::Required),
    ),
    (K::SystemConfig, C::Rebuild, Handler::new(Tool::SystemRebuild, &[]).confirmed()),
];

/// The handler bound to `(kind, id)`. `None` for `exit` and unknown pairs.
pub fn handler_for(kind: ProjectKind, id: CommandId) -> Option<&'static Handler> {
    HANDLERS
        .iter()
        .find(|(k, c, _)| *k == kind && *c == id)
        .map(|(_, _, handler)| handler)
}
