//! The UI elements the form controller drives.
//!
//! [`ProgressView`] is the seam between the controller and whatever
//! renders it. [`PanelState`] is a plain in-memory snapshot of every
//! element and is what tests assert against.

/// Visual style of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarStyle {
    /// Striped, animated bar while work is running.
    #[default]
    InProgress,
    /// Solid danger-coloured bar after a server error.
    Danger,
}

/// Operations the controller performs on its UI.
pub trait ProgressView {
    /// Make the confirmation message and progress bar visible.
    fn reveal(&mut self);

    /// Set bar width / aria value to `percent` and its label to `label`.
    fn set_bar(&mut self, percent: u8, label: &str);

    fn set_bar_style(&mut self, style: BarStyle);

    /// Replace the status text under the bar.
    fn set_status(&mut self, text: &str);

    fn set_submit_enabled(&mut self, enabled: bool);

    /// Apply the "was validated" marker to the form.
    fn mark_validated(&mut self);
}

/// Snapshot of every element the controller touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub visible: bool,
    pub percent: u8,
    pub label: String,
    pub style: BarStyle,
    pub status: String,
    pub submit_enabled: bool,
    pub validated: bool,
}

impl Default for PanelState {
    /// A freshly loaded page: hidden bar, enabled submit button.
    fn default() -> Self {
        Self {
            visible: false,
            percent: 0,
            label: String::new(),
            style: BarStyle::InProgress,
            status: String::new(),
            submit_enabled: true,
            validated: false,
        }
    }
}

impl ProgressView for PanelState {
    fn reveal(&mut self) {
        self.visible = true;
    }

    fn set_bar(&mut self, percent: u8, label: &str) {
        self.percent = percent;
        self.label = label.to_string();
    }

    fn set_bar_style(&mut self, style: BarStyle) {
        self.style = style;
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn mark_validated(&mut self) {
        self.validated = true;
    }
}
