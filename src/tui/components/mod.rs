//! Reusable TUI components

pub mod toast;
