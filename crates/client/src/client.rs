//! WebSocket client for the user-input endpoint.
//!
//! [`UserInputClient`] holds where the backend lives. Call
//! [`UserInputClient::connect`] to open a live [`UserInputConnection`].

use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::messages::{DASHBOARD_PATH, USER_INPUT_PATH};

/// The raw stream type of an open connection.
pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Configuration handle for one backend.
///
/// `host` is `hostname[:port]`, exactly what a browser would show as
/// `window.location.host`.
#[derive(Debug, Clone)]
pub struct UserInputClient {
    host: String,
    secure: bool,
}

/// A live WebSocket connection to the user-input endpoint.
pub struct UserInputConnection {
    /// Random ID tagging this connection in logs.
    pub session_id: String,
    /// The raw WebSocket stream for reading/writing frames.
    pub ws_stream: WsStream,
}

impl UserInputClient {
    /// Create a client for `host`; `secure` selects `wss`/`https`.
    pub fn new(host: impl Into<String>, secure: bool) -> Self {
        Self {
            host: host.into(),
            secure,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full WebSocket URL of the user-input endpoint.
    pub fn ws_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}{USER_INPUT_PATH}", self.host)
    }

    /// Full URL of the dashboard page shown after completion.
    pub fn dashboard_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}{DASHBOARD_PATH}", self.host)
    }

    /// Open the WebSocket connection.
    pub async fn connect(&self) -> Result<UserInputConnection, ClientError> {
        let url = self.ws_url();
        let session_id = uuid::Uuid::new_v4().to_string();

        let (ws_stream, _response) = connect_async(&url)
            .await
            .map_err(|e| ClientError::Connection(format!("Failed to connect to {url}: {e}")))?;

        tracing::info!(
            session_id = %session_id,
            url = %url,
            "WebSocket connection established",
        );

        Ok(UserInputConnection {
            session_id,
            ws_stream,
        })
    }
}

/// Errors that can occur when working with the WebSocket client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Failed to establish the WebSocket connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A protocol-level error on an already-established connection.
    #[error("Protocol error: {0}")]
    Protocol(String),
}
