//! Line-oriented terminal rendering of the progress panel.

use std::io::Write;

use crate::view::{BarStyle, PanelState, ProgressView};

/// Number of cells in the drawn bar.
const BAR_CELLS: usize = 30;

/// A [`ProgressView`] that prints one line per visible change.
///
/// Lines look like `[#########                     ]   30% Processing...`.
/// After a server error the bar is drawn with `!` instead of `#`.
pub struct TerminalView<W: Write> {
    panel: PanelState,
    out: W,
    last_line: Option<String>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            panel: PanelState::default(),
            out,
            last_line: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self) {
        if !self.panel.visible {
            return;
        }
        let line = render_line(&self.panel);
        if self.last_line.as_deref() == Some(line.as_str()) {
            return;
        }
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "Failed to draw progress line");
        }
        self.last_line = Some(line);
    }
}

/// Draw the bar, its label, and the status text as one line.
pub fn render_line(panel: &PanelState) -> String {
    let filled = usize::from(panel.percent.min(100)) * BAR_CELLS / 100;
    let fill = match panel.style {
        BarStyle::InProgress => '#',
        BarStyle::Danger => '!',
    };
    let bar: String = std::iter::repeat(fill)
        .take(filled)
        .chain(std::iter::repeat(' ').take(BAR_CELLS - filled))
        .collect();
    format!("[{bar}] {:>5} {}", panel.label, panel.status)
}

impl<W: Write> ProgressView for TerminalView<W> {
    fn reveal(&mut self) {
        self.panel.reveal();
        self.render();
    }

    fn set_bar(&mut self, percent: u8, label: &str) {
        self.panel.set_bar(percent, label);
        self.render();
    }

    fn set_bar_style(&mut self, style: BarStyle) {
        self.panel.set_bar_style(style);
        self.render();
    }

    fn set_status(&mut self, text: &str) {
        self.panel.set_status(text);
        self.render();
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.panel.set_submit_enabled(enabled);
    }

    fn mark_validated(&mut self) {
        self.panel.mark_validated();
    }
}
