//! Action definitions for keybindings
//!
//! This module defines all bindable actions in vaultheads.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// All bindable actions in vaultheads
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Action {
    // === Navigation ===
    /// Move to next row (explorer) or line (editor)
    Next,
    /// Move to previous row or line
    Previous,
    /// Jump to first row or line
    First,
    /// Jump to last row or line
    Last,
    /// Move down by a page
    PageDown,
    /// Move up by a page
    PageUp,

    // === Explorer ===
    /// Show the headings under the selected file
    Expand,
    /// Hide the headings under the selected file
    Collapse,
    /// Open the selected file or heading in the focused editor pane
    Activate,
    /// Open the selected file or heading in a new editor pane
    ActivateInNewPane,
    /// Toggle focus between explorer and editor
    ToggleFocus,
    /// Increase explorer width
    OutlineWidthIncrease,
    /// Decrease explorer width
    OutlineWidthDecrease,

    // === Headings ===
    /// Reveal the heading the editor cursor is under
    HighlightLocation,
    /// Turn heading rows on or off
    ToggleHeadings,
    /// Rescan the vault and rebuild every heading
    Recalculate,

    // === Editor panes ===
    /// Close the focused editor pane
    ClosePane,
    /// Focus the next editor pane
    NextPane,
    /// Focus the previous editor pane
    PreviousPane,

    // === View ===
    /// Toggle help popup
    ToggleHelp,
    /// Scroll help popup down
    HelpScrollDown,
    /// Scroll help popup up
    HelpScrollUp,
    /// Exit current mode (generic escape)
    ExitMode,

    // === Application ===
    /// Quit the application
    Quit,
}

impl Action {
    /// Get a human-readable description of the action
    pub fn description(&self) -> &'static str {
        match self {
            Action::Next => "Move down",
            Action::Previous => "Move up",
            Action::First => "Jump to top",
            Action::Last => "Jump to bottom",
            Action::PageDown => "Page down",
            Action::PageUp => "Page up",

            Action::Expand => "Show file headings",
            Action::Collapse => "Hide file headings",
            Action::Activate => "Open in editor",
            Action::ActivateInNewPane => "Open in new pane",
            Action::ToggleFocus => "Switch focus (explorer/editor)",
            Action::OutlineWidthIncrease => "Widen explorer",
            Action::OutlineWidthDecrease => "Narrow explorer",

            Action::HighlightLocation => "Locate cursor heading",
            Action::ToggleHeadings => "Toggle heading rows",
            Action::Recalculate => "Rescan vault",

            Action::ClosePane => "Close pane",
            Action::NextPane => "Next pane",
            Action::PreviousPane => "Previous pane",

            Action::ToggleHelp => "Toggle help",
            Action::HelpScrollDown => "Scroll help down",
            Action::HelpScrollUp => "Scroll help up",
            Action::ExitMode => "Exit current mode",

            Action::Quit => "Quit",
        }
    }

    /// Get the category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::Next
            | Action::Previous
            | Action::First
            | Action::Last
            | Action::PageDown
            | Action::PageUp => "Navigation",

            Action::Expand
            | Action::Collapse
            | Action::Activate
            | Action::ActivateInNewPane
            | Action::ToggleFocus
            | Action::OutlineWidthIncrease
            | Action::OutlineWidthDecrease => "Explorer",

            Action::HighlightLocation | Action::ToggleHeadings | Action::Recalculate => {
                "Headings"
            }

            Action::ClosePane | Action::NextPane | Action::PreviousPane => "Panes",

            Action::ToggleHelp
            | Action::HelpScrollDown
            | Action::HelpScrollUp
            | Action::ExitMode => "View",

            Action::Quit => "Application",
        }
    }
}
