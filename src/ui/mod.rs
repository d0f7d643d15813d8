//! Menu rendering and user-facing notices.

pub mod icons;

use console::style;

use crate::detect::ProjectKind;
use crate::menu::{CommandEntry, EntryStyle, menu_for};

use icons::{CROSS, WARNING};

pub const SELECTION_PROMPT: &str = ">";

/// `[RUST]`-style banner shown above the menu.
pub fn header(kind: ProjectKind) -> String {
    style(format!("[{}]", kind.label()))
        .reverse()
        .bold()
        .to_string()
}

/// One numbered menu line.
pub fn menu_line(number: usize, entry: &CommandEntry) -> String {
    let text = format!("{}. {}", number, entry.display_name);
    match entry.style() {
        EntryStyle::Danger => style(text).red().to_string(),
        EntryStyle::Safe => style(text).green().to_string(),
        EntryStyle::Plain => text,
    }
}

/// Every line of a full menu render, blank separators included.
pub fn render_menu(kind: ProjectKind) -> Vec<String> {
    let mut lines = vec![header(kind), String::new()];
    lines.extend(
        menu_for(kind)
            .iter()
            .enumerate()
            .map(|(i, entry)| menu_line(i + 1, entry)),
    );
    lines.push(String::new());
    lines
}

/// Inline label shown before a free-text prompt, e.g. `(cargo: add)`.
pub fn prompt_label(tool: &str, command: &str) -> String {
    style(format!("({}: {})", tool, command)).blink().to_string()
}

/// A recoverable problem the user should read.
pub fn notice(message: &str) -> String {
    format!("{}{}", WARNING, style(message).yellow())
}

/// A command that could not be started.
pub fn failure(message: &str) -> String {
    format!("{}{}", CROSS, style(message).red())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::CommandId;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn test_header_text() {
        assert_eq!(plain(&header(ProjectKind::Rust)), "[RUST]");
        assert_eq!(plain(&header(ProjectKind::WebSite)), "[ASTRO]");
    }

    #[test]
    fn test_render_menu_layout() {
        let lines: Vec<String> = render_menu(ProjectKind::Python)
            .iter()
            .map(|l| plain(l))
            .collect();
        assert_eq!(
            lines,
            vec![
                "[PYTHON]",
                "",
                "1. rye add",
                "2. rye remove",
                "3. rye sync",
                "4. rye init",
                "5. exit",
                "",
            ]
        );
    }

    #[test]
    fn test_render_menu_numbers_rust_entries() {
        let lines = render_menu(ProjectKind::Rust);
        // header + blank + 7 entries + blank
        assert_eq!(lines.len(), 10);
        assert_eq!(plain(&lines[7]), "6. cargo init");
        assert_eq!(plain(&lines[8]), "7. exit");
    }

    #[test]
    fn test_plain_menu_line_is_unstyled() {
        let entry = CommandEntry {
            display_name: "cargo run",
            id: CommandId::Run,
        };
        assert_eq!(menu_line(3, &entry), "3. cargo run");
    }

    #[test]
    fn test_prompt_label_text() {
        assert_eq!(plain(&prompt_label("rye", "add")), "(rye: add)");
    }

    #[test]
    fn test_notices_keep_message() {
        assert!(plain(&notice("There is no flake environment.")).ends_with("There is no flake environment."));
        assert!(plain(&failure("Failed to launch rye")).ends_with("Failed to launch rye"));
    }
}
