//! Session loop: one socket, one submission, frames in and out.
//!
//! [`run_session`] submits the form (if given) and then feeds every
//! server frame into the [`FormController`] until the operation reaches
//! a terminal state or the socket goes away. [`run_with_policy`] adds
//! the injected reconnect policy on top.

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::client::{ClientError, UserInputClient, UserInputConnection};
use crate::controller::{ControllerError, FormController, OutboundRx, Phase};
use crate::form::FormReader;
use crate::messages::ServerEvent;
use crate::reconnect::{reconnect_loop, ReconnectPolicy};
use crate::view::ProgressView;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The server reported completion and the redirect fired.
    Completed,
    /// The server reported an error with this message.
    Failed(String),
    /// The socket closed before a terminal message arrived.
    Closed,
}

/// Drive one connection until a terminal message or disconnect.
///
/// When `form` is given it is submitted before any frame is read. On
/// completion this waits for the pending dashboard redirect before
/// returning.
pub async fn run_session<V: ProgressView>(
    connection: UserInputConnection,
    controller: &mut FormController<V>,
    outbound_rx: &mut OutboundRx,
    form: Option<&dyn FormReader>,
) -> Result<SessionOutcome, SessionError> {
    let session_id = connection.session_id;
    let (mut sink, mut stream) = connection.ws_stream.split();

    if let Some(form) = form {
        controller.submit(form)?;
    }

    loop {
        tokio::select! {
            Some(msg) = outbound_rx.recv() => {
                if let Err(e) = sink.send(msg).await {
                    tracing::error!(session_id = %session_id, error = %e, "Failed to send frame");
                    return Err(ClientError::Protocol(format!("send failed: {e}")).into());
                }
            }
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        let events = controller.handle_text(&text);
                        if !events.iter().any(ServerEvent::is_terminal) {
                            continue;
                        }
                        match controller.phase() {
                            Phase::Completed => {
                                if let Some(redirect) = controller.take_redirect() {
                                    if let Err(e) = redirect.await {
                                        tracing::error!(error = %e, "Redirect task failed");
                                    }
                                }
                                close_sink(&mut sink, &session_id).await;
                                return Ok(SessionOutcome::Completed);
                            }
                            Phase::Failed => {
                                let message = controller.last_error().unwrap_or_default().to_string();
                                close_sink(&mut sink, &session_id).await;
                                return Ok(SessionOutcome::Failed(message));
                            }
                            Phase::Idle | Phase::Submitted => {}
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::trace!(session_id = %session_id, "Ignoring binary frame");
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                        // Handled automatically by tungstenite.
                    }
                    Some(Ok(Message::Frame(_))) => {}
                    Some(Ok(Message::Close(frame))) => {
                        tracing::error!(session_id = %session_id, ?frame, "WebSocket connection closed unexpectedly");
                        return Ok(SessionOutcome::Closed);
                    }
                    Some(Err(e)) => {
                        tracing::error!(session_id = %session_id, error = %e, "WebSocket receive error");
                        return Ok(SessionOutcome::Closed);
                    }
                    None => {
                        tracing::error!(session_id = %session_id, "WebSocket stream exhausted");
                        return Ok(SessionOutcome::Closed);
                    }
                }
            }
        }
    }
}

async fn close_sink<S>(sink: &mut S, session_id: &str)
where
    S: futures::Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    if let Err(e) = sink.close().await {
        tracing::debug!(session_id = %session_id, error = %e, "Failed to close WebSocket");
    }
}

/// Connect, submit `form`, and keep listening across reconnects.
///
/// The form is submitted once, on the first connection. After a drop the
/// `policy` decides whether to reconnect; a reconnected session only
/// resumes listening.
pub async fn run_with_policy<V: ProgressView>(
    client: &UserInputClient,
    controller: &mut FormController<V>,
    outbound_rx: &mut OutboundRx,
    form: &dyn FormReader,
    policy: &dyn ReconnectPolicy,
    cancel: &CancellationToken,
) -> Result<SessionOutcome, SessionError> {
    let mut connection = client.connect().await?;
    let mut form = Some(form);

    loop {
        let outcome = run_session(connection, controller, outbound_rx, form.take()).await?;
        if outcome != SessionOutcome::Closed {
            return Ok(outcome);
        }

        match reconnect_loop(client, policy, cancel).await {
            Some(conn) => connection = conn,
            None => return Ok(SessionOutcome::Closed),
        }
    }
}

/// Errors that abort a session before it reaches an outcome.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Submit(#[from] ControllerError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
