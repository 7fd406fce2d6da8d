//! Shared helpers for the client integration tests.
//!
//! Provides a scripted stand-in for the user-input endpoint and a
//! navigator that records where it was sent.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use hybrid_client::client::UserInputClient;
use hybrid_client::controller::{outbound_channel, FormController, OutboundRx};
use hybrid_client::navigator::Navigator;
use hybrid_client::view::PanelState;
use hybrid_core::submission::SubmissionRequest;

/// Completion message of the reference endpoint.
pub const COMPLETED_MESSAGE: &str = "User input processed successfully.";

/// What the fake endpoint does on one accepted connection.
#[derive(Debug, Clone)]
pub enum Script {
    /// Wait for the submission, stream 0..=100 in steps of 10, then complete.
    Complete,
    /// Wait for the submission, report 10%, then fail with `Error: {0}`.
    Fail(&'static str),
    /// Wait for the submission, then close the socket.
    CloseAfterSubmit,
    /// Wait for the submission, send a non-JSON frame, then complete.
    Garbage,
    /// Do not wait; report 100% and complete straight away.
    ResumeAndComplete,
}

impl Script {
    fn expects_submission(&self) -> bool {
        !matches!(self, Script::ResumeAndComplete)
    }
}

/// A running fake endpoint.
pub struct FakeServer {
    pub addr: SocketAddr,
    /// Resolves to every text frame received, across all connections.
    pub received: JoinHandle<Vec<String>>,
}

impl FakeServer {
    pub fn client(&self) -> UserInputClient {
        UserInputClient::new(self.addr.to_string(), false)
    }
}

/// Serve a single connection following `script`.
pub async fn spawn_server(script: Script) -> FakeServer {
    spawn_server_sequence(vec![script]).await
}

/// Serve one connection per script, in order.
pub async fn spawn_server_sequence(scripts: Vec<Script>) -> FakeServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let received = tokio::spawn(async move {
        let mut received = Vec::new();
        for script in scripts {
            let (tcp, _) = listener.accept().await.unwrap();
            let ws = accept_async(tcp).await.unwrap();
            serve(ws, script, &mut received).await;
        }
        received
    });

    FakeServer { addr, received }
}

async fn serve(
    mut ws: tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>,
    script: Script,
    received: &mut Vec<String>,
) {
    if script.expects_submission() {
        let mut submitted = false;
        while let Some(Ok(msg)) = ws.next().await {
            if let Message::Text(text) = msg {
                received.push(text);
                submitted = true;
                break;
            }
        }
        if !submitted {
            return;
        }
    }

    let frames: Vec<String> = match script {
        Script::Complete => (0..=100)
            .step_by(10)
            .map(|p| progress_frame(p, &format!("Processing form data: {p}% completed")))
            .chain(std::iter::once(status_frame("completed", COMPLETED_MESSAGE)))
            .collect(),
        Script::Fail(reason) => vec![
            progress_frame(10, "Processing form data: 10% completed"),
            status_frame("error", &format!("Error: {reason}")),
        ],
        Script::CloseAfterSubmit => {
            let _ = ws.close(None).await;
            return;
        }
        Script::Garbage => vec![
            "this is not json".to_string(),
            progress_frame(50, "Halfway"),
            status_frame("completed", COMPLETED_MESSAGE),
        ],
        Script::ResumeAndComplete => vec![
            progress_frame(100, "Processing form data: 100% completed"),
            status_frame("completed", COMPLETED_MESSAGE),
        ],
    };

    for frame in frames {
        if ws.send(Message::Text(frame)).await.is_err() {
            return;
        }
    }

    // Keep reading until the client hangs up.
    while let Some(Ok(msg)) = ws.next().await {
        if let Message::Text(text) = msg {
            received.push(text);
        }
    }
}

fn progress_frame(progress: u32, message: &str) -> String {
    serde_json::json!({ "progress": progress, "message": message }).to_string()
}

fn status_frame(status: &str, message: &str) -> String {
    serde_json::json!({ "status": status, "message": message }).to_string()
}

/// Navigator that remembers every URL it was asked to open.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visits.lock().unwrap().push(url.to_string());
    }
}

/// A controller over an in-memory panel with a short redirect delay.
pub fn test_controller(
    client: &UserInputClient,
) -> (
    FormController<PanelState>,
    OutboundRx,
    Arc<RecordingNavigator>,
) {
    let (tx, rx) = outbound_channel();
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = FormController::new(
        PanelState::default(),
        tx,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        client.dashboard_url(),
    )
    .with_redirect_delay(Duration::from_millis(10));
    (controller, rx, navigator)
}

/// A form that passes the validation gate.
pub fn valid_form() -> SubmissionRequest {
    SubmissionRequest {
        mode: "day_trader".into(),
        start_date: "2024-05-01".into(),
        end_date: "2024-05-31".into(),
        percentage: "25".into(),
        interval: "15min".into(),
        period: "D".into(),
        sentiment_type: "bearish".into(),
        handle_missing_values: "interpolate".into(),
        fillna_method: "zero".into(),
    }
}
