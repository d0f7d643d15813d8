//! Integration tests for devvy
//!
//! These run the real binary. Its stdin/stderr are pipes here, so any
//! interactive session ends as soon as the menu asks for input.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a devvy Command
fn devvy() -> Command {
    let mut cmd = cargo_bin_cmd!("devvy");
    // Keep user config out of the picture.
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("devvy-tests-no-config"));
    cmd
}

/// Helper to create a temporary project directory with the given marker files
fn create_project(markers: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for marker in markers {
        fs::write(dir.path().join(marker), "").unwrap();
    }
    dir
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_devvy_help() {
        devvy()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("PROJECT_PATH"));
    }

    #[test]
    fn test_devvy_version() {
        devvy()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("devvy"));
    }

    #[test]
    fn test_missing_path_fails() {
        let dir = create_project(&[]);

        devvy()
            .arg(dir.path().join("does-not-exist"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Project path does not exist"));
    }

    #[test]
    fn test_rejects_extra_arguments() {
        devvy().args([".", "extra"]).assert().failure();
    }
}

// =============================================================================
// Detection Tests
// =============================================================================

mod detection {
    use super::*;

    #[test]
    fn test_empty_directory_reports_no_project() {
        let dir = create_project(&[]);

        devvy()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No supported project type detected."));
    }

    #[test]
    fn test_defaults_to_current_directory() {
        let dir = create_project(&["README.md"]);

        devvy()
            .current_dir(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No supported project type detected."));
    }

    #[test]
    fn test_rust_project_shows_cargo_menu() {
        let dir = create_project(&["Cargo.toml"]);

        devvy()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("[RUST]"))
            .stdout(predicate::str::contains("6. cargo init"))
            .stdout(predicate::str::contains("7. exit"));
    }

    #[test]
    fn test_python_takes_priority_over_rust() {
        let dir = create_project(&["pyproject.toml", "Cargo.toml"]);

        devvy()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("[PYTHON]"))
            .stdout(predicate::str::contains("1. rye add"))
            .stdout(predicate::str::contains("cargo").not());
    }

    #[test]
    fn test_astro_project_shows_astro_menu() {
        let dir = create_project(&["astro.config.mjs"]);

        devvy()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("[ASTRO]"))
            .stdout(predicate::str::contains("2. astro dev"));
    }

    #[test]
    fn test_nix_project_shows_nix_menu() {
        let dir = create_project(&["flake.nix"]);

        devvy()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("[NIX]"))
            .stdout(predicate::str::contains("5. nixos-rebuild"));
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

// dirs::config_dir honours XDG_CONFIG_HOME only on Linux.
#[cfg(target_os = "linux")]
mod configuration {
    use super::*;

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = create_project(&["Cargo.toml"]);
        let config_home = TempDir::new().unwrap();
        let config_dir = config_home.path().join("devvy");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), "[tools\n").unwrap();

        cargo_bin_cmd!("devvy")
            .env("XDG_CONFIG_HOME", config_home.path())
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("config.toml"));
    }
}
