//! User configuration for devvy.
//!
//! Read from `devvy/config.toml` under the platform config directory
//! (`~/.config/devvy/config.toml` on Linux). Every field is optional:
//!
//! ```toml
//! [tools]
//! rye = "rye"
//! cargo = "cargo"
//! bunx = "bunx"
//! nix = "nix"
//!
//! [terminal]
//! program = "alacritty"
//! args = ["-e"]
//!
//! [rebuild]
//! command = ["sudo", "nixos-rebuild", "switch"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = "devvy";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Executables for each toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolsSection {
    #[serde(default = "default_rye")]
    pub rye: String,
    #[serde(default = "default_cargo")]
    pub cargo: String,
    #[serde(default = "default_bunx")]
    pub bunx: String,
    #[serde(default = "default_nix")]
    pub nix: String,
}

fn default_rye() -> String {
    "rye".to_string()
}

fn default_cargo() -> String {
    "cargo".to_string()
}

fn default_bunx() -> String {
    "bunx".to_string()
}

fn default_nix() -> String {
    "nix".to_string()
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            rye: default_rye(),
            cargo: default_cargo(),
            bunx: default_bunx(),
            nix: default_nix(),
        }
    }
}

/// Terminal emulator used to host `nix shell` sessions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TerminalSection {
    #[serde(default = "default_terminal_program")]
    pub program: String,
    /// Arguments placed between the program and the wrapped command.
    #[serde(default = "default_terminal_args")]
    pub args: Vec<String>,
}

fn default_terminal_program() -> String {
    "alacritty".to_string()
}

fn default_terminal_args() -> Vec<String> {
    vec!["-e".to_string()]
}

impl Default for TerminalSection {
    fn default() -> Self {
        Self {
            program: default_terminal_program(),
            args: default_terminal_args(),
        }
    }
}

/// Full argv of the system rebuild command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RebuildSection {
    #[serde(default = "default_rebuild_command")]
    pub command: Vec<String>,
}

fn default_rebuild_command() -> Vec<String> {
    ["sudo", "nixos-rebuild", "switch"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for RebuildSection {
    fn default() -> Self {
        Self {
            command: default_rebuild_command(),
        }
    }
}

/// The complete config.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DevvyToml {
    #[serde(default)]
    pub tools: ToolsSection,
    #[serde(default)]
    pub terminal: TerminalSection,
    #[serde(default)]
    pub rebuild: RebuildSection,
}

impl DevvyToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config.toml")
    }

    /// Load from `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config file");
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from the platform config directory.
    pub fn load_user() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    /// Report invalid settings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let tools = [
            ("tools.rye", &self.tools.rye),
            ("tools.cargo", &self.tools.cargo),
            ("tools.bunx", &self.tools.bunx),
            ("tools.nix", &self.tools.nix),
            ("terminal.program", &self.terminal.program),
        ];
        for (key, value) in tools {
            if value.trim().is_empty() {
                warnings.push(format!("'{}' is empty; using the default", key));
            }
        }

        if self.rebuild.command.iter().all(|part| part.trim().is_empty()) {
            warnings.push("'rebuild.command' is empty; using the default".to_string());
        }

        warnings
    }

    /// Replace every invalid setting with its default.
    pub fn sanitized(mut self) -> Self {
        for warning in self.validate() {
            tracing::warn!("{}", warning);
        }

        let defaults = ToolsSection::default();
        fill_if_blank(&mut self.tools.rye, defaults.rye);
        fill_if_blank(&mut self.tools.cargo, defaults.cargo);
        fill_if_blank(&mut self.tools.bunx, defaults.bunx);
        fill_if_blank(&mut self.tools.nix, defaults.nix);
        fill_if_blank(&mut self.terminal.program, default_terminal_program());

        self.rebuild.command.retain(|part| !part.trim().is_empty());
        if self.rebuild.command.is_empty() {
            self.rebuild.command = default_rebuild_command();
        }

        self
    }
}

fn fill_if_blank(value: &mut String, default: String) {
    if value.trim().is_empty() {
        *value = default;
    }
}

/// `<config dir>/devvy/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = DevvyToml::default();
        assert_eq!(config.tools.rye, "rye");
        assert_eq!(config.tools.cargo, "cargo");
        assert_eq!(config.tools.bunx, "bunx");
        assert_eq!(config.tools.nix, "nix");
        assert_eq!(config.terminal.program, "alacritty");
        assert_eq!(config.terminal.args, vec!["-e"]);
        assert_eq!(
            config.rebuild.command,
            vec!["sudo", "nixos-rebuild", "switch"]
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = DevvyToml::parse("").unwrap();
        assert_eq!(config, DevvyToml::default());
    }

    #[test]
    fn test_parse_partial_override() {
        let config = DevvyToml::parse(
            r#"
[tools]
cargo = "/opt/cargo/bin/cargo"

[terminal]
program = "kitty"
args = []
"#,
        )
        .unwrap();

        assert_eq!(config.tools.cargo, "/opt/cargo/bin/cargo");
        assert_eq!(config.tools.rye, "rye");
        assert_eq!(config.terminal.program, "kitty");
        assert!(config.terminal.args.is_empty());
        assert_eq!(config.rebuild, RebuildSection::default());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = DevvyToml::parse("[tools\nrye = ");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse config.toml")
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = DevvyToml::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, DevvyToml::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[rebuild]\ncommand = [\"nixos-rebuild\", \"boot\"]\n").unwrap();

        let config = DevvyToml::load_or_default(&path).unwrap();
        assert_eq!(config.rebuild.command, vec!["nixos-rebuild", "boot"]);
    }

    #[test]
    fn test_load_error_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tools = 3").unwrap();

        let err = DevvyToml::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_validate_and_sanitize_blank_values() {
        let config = DevvyToml::parse(
            r#"
[tools]
nix = "  "

[rebuild]
command = [""]
"#,
        )
        .unwrap();

        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("tools.nix")));
        assert!(warnings.iter().any(|w| w.contains("rebuild.command")));

        let config = config.sanitized();
        assert_eq!(config.tools.nix, "nix");
        assert_eq!(config.rebuild.command, default_rebuild_command());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config_path_ends_with_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("devvy/config.toml"));
        }
    }
}
