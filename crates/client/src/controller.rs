//! Progress-tracking form controller.
//!
//! [`FormController`] bridges one configuration form to one WebSocket
//! channel. Everything it touches is injected at construction: the
//! outbound half of the socket, the [`ProgressView`], and the
//! [`Navigator`]. Handlers run to completion one at a time on the
//! session task, so no locking is needed around the state.

use std::sync::Arc;
use std::time::Duration;

use hybrid_core::error::CoreError;
use hybrid_core::validation;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use crate::form::FormReader;
use crate::messages::{encode_submission, parse_events, ServerEvent};
use crate::navigator::Navigator;
use crate::view::{BarStyle, ProgressView};

/// Delay between a completion message and the dashboard redirect.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Status text shown right after a submit.
pub const STARTING_MESSAGE: &str = "Starting processing...";

/// Bar label shown after a server error.
pub const ERROR_LABEL: &str = "Error";

/// Sending half of the socket, drained by the session loop.
pub type Outbound = mpsc::UnboundedSender<Message>;

/// Receiving half paired with [`Outbound`].
pub type OutboundRx = mpsc::UnboundedReceiver<Message>;

/// Create the channel that carries frames from the controller to the socket.
pub fn outbound_channel() -> (Outbound, OutboundRx) {
    mpsc::unbounded_channel()
}

/// Where the tracked operation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing submitted yet, or the last submit failed validation.
    Idle,
    /// A submission is in flight; submit is disabled.
    Submitted,
    /// The server reported completion; a redirect is pending.
    Completed,
    /// The server reported an error; submit is enabled again.
    Failed,
}

pub struct FormController<V> {
    view: V,
    outbound: Outbound,
    navigator: Arc<dyn Navigator>,
    dashboard_url: String,
    redirect_delay: Duration,
    phase: Phase,
    last_error: Option<String>,
    redirect: Option<JoinHandle<()>>,
}

impl<V: ProgressView> FormController<V> {
    pub fn new(
        view: V,
        outbound: Outbound,
        navigator: Arc<dyn Navigator>,
        dashboard_url: impl Into<String>,
    ) -> Self {
        Self {
            view,
            outbound,
            navigator,
            dashboard_url: dashboard_url.into(),
            redirect_delay: REDIRECT_DELAY,
            phase: Phase::Idle,
            last_error: None,
            redirect: None,
        }
    }

    /// Override the completion redirect delay.
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Message of the most recent server error, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Take the pending redirect timer, leaving none behind.
    pub fn take_redirect(&mut self) -> Option<JoinHandle<()>> {
        self.redirect.take()
    }

    /// Validate the form and send it as one frame.
    ///
    /// The validation gate runs first and always marks the form as
    /// validated. On failure nothing is sent and submit stays enabled.
    /// On success submit is disabled before the frame is queued. Submit
    /// stays locked while a run is in flight and after it completes.
    pub fn submit(&mut self, form: &dyn FormReader) -> Result<(), ControllerError> {
        if matches!(self.phase, Phase::Submitted | Phase::Completed) {
            return Err(ControllerError::InFlight);
        }

        let request = form.read();

        self.view.mark_validated();
        if let Err(e) = validation::check(&request) {
            tracing::warn!(error = %e, "Form failed validation");
            self.view.set_submit_enabled(true);
            self.phase = Phase::Idle;
            return Err(e.into());
        }

        self.view.set_submit_enabled(false);
        self.view.reveal();
        self.view.set_bar_style(BarStyle::InProgress);
        self.view.set_bar(0, "0%");
        self.view.set_status(STARTING_MESSAGE);
        self.last_error = None;

        let frame = encode_submission(&request);
        if self.outbound.send(Message::Text(frame)).is_err() {
            tracing::error!("Cannot submit, WebSocket is not open");
            self.view.set_submit_enabled(true);
            self.phase = Phase::Idle;
            return Err(ControllerError::SocketClosed);
        }

        tracing::info!(
            mode = %request.mode,
            start_date = %request.start_date,
            end_date = %request.end_date,
            "Submission sent",
        );
        self.phase = Phase::Submitted;
        Ok(())
    }

    /// Parse one server text frame and apply every event it carries.
    ///
    /// Malformed frames are logged and otherwise ignored. Returns the
    /// events that were applied.
    ///
    /// # Panics
    ///
    /// A completion event spawns the redirect timer, so this must be
    /// called from within a Tokio runtime.
    pub fn handle_text(&mut self, text: &str) -> Vec<ServerEvent> {
        match parse_events(text) {
            Ok(events) => {
                for event in &events {
                    self.apply(event);
                }
                events
            }
            Err(e) => {
                tracing::warn!(error = %e, raw_message = %text, "Failed to parse server message");
                Vec::new()
            }
        }
    }

    /// Reflect a single server event in the view.
    ///
    /// Same runtime requirement as [`handle_text`](Self::handle_text).
    pub fn apply(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::Progress { percent, message } => {
                tracing::debug!(percent, message = %message, "Progress update");
                self.view.set_bar(*percent, &format!("{percent}%"));
                self.view.set_status(message);
            }
            ServerEvent::Completed { message } => {
                tracing::info!(message = %message, "Processing completed");
                self.view.set_status(message);
                self.phase = Phase::Completed;
                self.schedule_redirect();
            }
            ServerEvent::Failed { message } => {
                tracing::error!(message = %message, "Server reported an error");
                self.view.set_bar(100, ERROR_LABEL);
                self.view.set_bar_style(BarStyle::Danger);
                self.view.set_status(message);
                self.view.set_submit_enabled(true);
                self.last_error = Some(message.clone());
                self.phase = Phase::Failed;
            }
        }
    }

    fn schedule_redirect(&mut self) {
        if self.redirect.is_some() {
            return;
        }
        let navigator = Arc::clone(&self.navigator);
        let url = self.dashboard_url.clone();
        // Deadline is fixed now, not when the task is first polled.
        let deadline = tokio::time::Instant::now() + self.redirect_delay;
        self.redirect = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tracing::info!(url = %url, "Redirecting to dashboard");
            navigator.navigate(&url);
        }));
    }
}

impl<V> Drop for FormController<V> {
    fn drop(&mut self) {
        if let Some(handle) = self.redirect.take() {
            handle.abort();
        }
    }
}

/// Errors returned by [`FormController::submit`].
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// A submission is in flight or has already completed.
    #[error("A submission is already in progress")]
    InFlight,

    /// The form failed the client-side validation gate.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The socket is gone; the frame could not be queued.
    #[error("WebSocket is closed")]
    SocketClosed,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
