//! `hybrid-submit` -- submit a trading-run configuration and follow it.
//!
//! Connects to the backend's user-input WebSocket, sends the form given
//! on the command line, and draws server-pushed progress in the
//! terminal until the run completes or fails.
//!
//! # Environment variables
//!
//! | Variable                        | Required | Default          | Description                          |
//! |---------------------------------|----------|------------------|--------------------------------------|
//! | `HYBRID_HOST`                   | no       | `localhost:8000` | Backend `host[:port]`                |
//! | `HYBRID_SECURE`                 | no       | `false`          | Use `wss://` and `https://`          |
//! | `HYBRID_OPEN_BROWSER`           | no       | `false`          | Open the dashboard when done         |
//! | `HYBRID_RECONNECT`              | no       | `none`           | `none` or `backoff`                  |
//! | `HYBRID_RECONNECT_MAX_ATTEMPTS` | no       | `5`              | Attempts under the backoff policy    |
//!
//! # Exit codes
//!
//! `0` on completion, `1` when the server reports an error or the
//! connection drops, `2` when the run could not start (bad
//! configuration, invalid form, unreachable backend).

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hybrid_cli::config::ClientConfig;
use hybrid_cli::form::FormArgs;
use hybrid_client::client::UserInputClient;
use hybrid_client::controller::{outbound_channel, FormController};
use hybrid_client::navigator::{BrowserNavigator, LogNavigator, Navigator};
use hybrid_client::session::{run_with_policy, SessionOutcome};
use hybrid_client::terminal::TerminalView;

#[derive(Debug, Parser)]
#[command(name = "hybrid-submit", about = "Submit a trading run and follow its progress")]
struct Cli {
    /// Backend host[:port]; overrides HYBRID_HOST
    #[arg(long)]
    host: Option<String>,

    #[command(flatten)]
    form: FormArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hybrid_cli=info,hybrid_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(SessionOutcome::Completed) => ExitCode::SUCCESS,
        Ok(SessionOutcome::Failed(message)) => {
            tracing::error!(message = %message, "Run failed");
            ExitCode::from(1)
        }
        Ok(SessionOutcome::Closed) => {
            tracing::error!("Connection lost before the run finished; start again to retry");
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(error = %e, "Could not start the run");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<SessionOutcome> {
    let mut config = ClientConfig::from_env()?;
    if let Some(host) = cli.host {
        config.host = host;
    }

    tracing::info!(
        host = %config.host,
        secure = config.secure,
        reconnect = ?config.reconnect,
        "Starting hybrid-submit",
    );

    let client = UserInputClient::new(config.host.clone(), config.secure);
    let navigator: Arc<dyn Navigator> = if config.open_browser {
        Arc::new(BrowserNavigator)
    } else {
        Arc::new(LogNavigator)
    };

    let (outbound, mut outbound_rx) = outbound_channel();
    let mut controller = FormController::new(
        TerminalView::new(std::io::stdout()),
        outbound,
        navigator,
        client.dashboard_url(),
    );

    let cancel = CancellationToken::new();
    let policy = config.reconnect_policy();

    let outcome = tokio::select! {
        outcome = run_with_policy(
            &client,
            &mut controller,
            &mut outbound_rx,
            &cli.form,
            policy.as_ref(),
            &cancel,
        ) => outcome?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted");
            SessionOutcome::Closed
        }
    };

    Ok(outcome)
}
