//! Project type detection.
//!
//! A directory is classified by the marker files sitting directly inside it.
//! Rules are checked in a fixed order and the first match wins:
//!
//! | Order | Marker                          | Kind           |
//! |-------|---------------------------------|----------------|
//! | 1     | `pyproject.toml`                | `Python`       |
//! | 2     | `Cargo.toml`                    | `Rust`         |
//! | 3     | `astro.config.mjs`              | `WebSite`      |
//! | 4     | any `*.nix`, or `.flake`        | `SystemConfig` |
//!
//! Nothing is recursed into and nothing is written.

use glob::{MatchOptions, Pattern};
use std::path::Path;

pub const PYTHON_MARKER: &str = "pyproject.toml";
pub const RUST_MARKER: &str = "Cargo.toml";
pub const WEB_SITE_MARKER: &str = "astro.config.mjs";
pub const FLAKE_MARKER: &str = ".flake";
pub const NIX_PATTERN: &str = "*.nix";

/// The toolchain that owns a project directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    /// Managed by rye.
    Python,
    /// Managed by cargo.
    Rust,
    /// An Astro site, driven through bunx.
    WebSite,
    /// Nix expressions or a flake.
    SystemConfig,
    /// No marker matched.
    None,
}

impl ProjectKind {
    /// Label shown in the menu header.
    pub fn label(self) -> &'static str {
        match self {
            ProjectKind::Python => "PYTHON",
            ProjectKind::Rust => "RUST",
            ProjectKind::WebSite => "ASTRO",
            ProjectKind::SystemConfig => "NIX",
            ProjectKind::None => "NONE",
        }
    }

    pub fn is_supported(self) -> bool {
        self != ProjectKind::None
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify `path` by its marker files.
///
/// Unreadable or missing directories classify as `ProjectKind::None`.
pub fn detect(path: &Path) -> ProjectKind {
    let kind = if path.join(PYTHON_MARKER).exists() {
        ProjectKind::Python
    } else if path.join(RUST_MARKER).exists() {
        ProjectKind::Rust
    } else if path.join(WEB_SITE_MARKER).exists() {
        ProjectKind::WebSite
    } else if has_nix_files(path) || path.join(FLAKE_MARKER).exists() {
        ProjectKind::SystemConfig
    } else {
        ProjectKind::None
    };

    tracing::debug!(path = %path.display(), %kind, "classified project directory");
    kind
}

/// True if any direct child of `dir` matches `*.nix`.
fn has_nix_files(dir: &Path) -> bool {
    let pattern = format!(
        "{}/{}",
        Pattern::escape(&dir.to_string_lossy()),
        NIX_PATTERN
    );
    // `*` also matches dotfiles, so `.hidden.nix` counts.
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    match glob::glob_with(&pattern, options) {
        Ok(mut paths) => paths.any(|entry| entry.is_ok()),
        Err(_) => false,
    }
}
