//! Config panel visibility.
//!
//! DESIGN
//! ======
//! Two states with explicit triggers instead of a toggled CSS class. The form
//! inside the panel is only ever read, so closing it on cancel needs no
//! revert step: the next open shows whatever the form last held.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

/// Whether the config panel is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigPanel {
    #[default]
    Closed,
    Open,
}

/// Things that move the panel between states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTrigger {
    OpenClicked,
    CancelClicked,
    SaveSucceeded,
}

impl ConfigPanel {
    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// Next state for `trigger`. Triggers that do not apply leave the state as is.
    #[must_use]
    pub fn transition(self, trigger: PanelTrigger) -> Self {
        match (self, trigger) {
            (Self::Closed, PanelTrigger::OpenClicked) => Self::Open,
            (Self::Open, PanelTrigger::CancelClicked | PanelTrigger::SaveSucceeded) => Self::Closed,
            (state, _) => state,
        }
    }
}
