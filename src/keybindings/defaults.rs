//! Default keybindings for vaultheads
//!
//! This module defines the default keybindings that are used when no
//! user configuration is provided. Uses keybinds-rs key string syntax.

use super::{Action, KeybindingMode, Keybindings};

/// Create the default keybindings configuration
pub fn default_keybindings() -> Keybindings {
    let mut kb = Keybindings::new();

    add_normal_mode(&mut kb);
    add_editor_mode(&mut kb);
    add_help_mode(&mut kb);

    kb
}

/// Bind a key, panicking on invalid key syntax (only used for built-in defaults)
fn bind(kb: &mut Keybindings, mode: KeybindingMode, key: &str, action: Action) {
    kb.bind(mode, key, action)
        .unwrap_or_else(|e| panic!("Invalid default keybinding '{}': {}", key, e));
}

/// Bindings shared by the explorer and the editor
fn add_common(kb: &mut Keybindings, mode: KeybindingMode) {
    use Action::*;

    bind(kb, mode, "j", Next);
    bind(kb, mode, "Down", Next);
    bind(kb, mode, "k", Previous);
    bind(kb, mode, "Up", Previous);
    bind(kb, mode, "g", First);
    bind(kb, mode, "Home", First);
    bind(kb, mode, "G", Last);
    bind(kb, mode, "End", Last);
    bind(kb, mode, "d", PageDown);
    bind(kb, mode, "PageDown", PageDown);
    bind(kb, mode, "u", PageUp);
    bind(kb, mode, "PageUp", PageUp);

    bind(kb, mode, "Tab", ToggleFocus);
    bind(kb, mode, "L", HighlightLocation);
    bind(kb, mode, "H", ToggleHeadings);
    bind(kb, mode, "R", Recalculate);
    bind(kb, mode, "x", ClosePane);
    bind(kb, mode, "]", NextPane);
    bind(kb, mode, "[", PreviousPane);
    bind(kb, mode, ">", OutlineWidthIncrease);
    bind(kb, mode, "<", OutlineWidthDecrease);

    bind(kb, mode, "?", ToggleHelp);
    bind(kb, mode, "q", Quit);
    bind(kb, mode, "Ctrl+c", Quit);
}

fn add_normal_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Normal;

    add_common(kb, Normal);

    bind(kb, Normal, "Enter", Activate);
    bind(kb, Normal, "o", ActivateInNewPane);
    bind(kb, Normal, "h", Collapse);
    bind(kb, Normal, "Left", Collapse);
    bind(kb, Normal, "l", Expand);
    bind(kb, Normal, "Right", Expand);
}

fn add_editor_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Editor;

    add_common(kb, Editor);

    bind(kb, Editor, "Esc", ToggleFocus);
}

fn add_help_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Help;

    bind(kb, Help, "j", HelpScrollDown);
    bind(kb, Help, "Down", HelpScrollDown);
    bind(kb, Help, "k", HelpScrollUp);
    bind(kb, Help, "Up", HelpScrollUp);
    bind(kb, Help, "?", ExitMode);
    bind(kb, Help, "Esc", ExitMode);
    bind(kb, Help, "q", Quit);
}
