pub mod config;
pub mod detect;
pub mod errors;
pub mod exec;
pub mod interact;
pub mod menu;
pub mod session;
pub mod ui;
