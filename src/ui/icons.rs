//! Shared UI icons.
//!
//! Emoji with ASCII fallbacks for terminals that can't draw them.

use console::Emoji;

pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR] ");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
