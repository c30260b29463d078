//! Hopp session harness.
//!
//! Dev/debug entry point: loads config, initializes logging, probes the
//! configured relay endpoint, and dumps metrics on exit. The production
//! host embeds the library crates directly.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use hopp_session::obs::SessionMetrics;
use hopp_session::relay::{self, RelayCommand, RelayEvent, RelayStatus, TcpConnector};
use hopp_session::config;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("hopp.yaml").expect("config load failed");
    let Some(endpoint) = cfg.relay.endpoint.clone() else {
        tracing::error!("relay.endpoint missing from config, nothing to probe");
        return;
    };

    let metrics = Arc::new(SessionMetrics::default());
    let (commands, mut events) = relay::spawn(
        TcpConnector::new(cfg.relay.max_frame_bytes),
        cfg.relay.queue_capacity,
        Arc::clone(&metrics),
    );

    tracing::info!(%endpoint, "relay probe starting");
    commands
        .send(RelayCommand::Init { url: endpoint })
        .await
        .expect("relay worker gone");

    while let Some(event) = events.recv().await {
        match event {
            RelayEvent::Status(status) => {
                tracing::info!(status = status.as_str(), "relay status");
                if matches!(status, RelayStatus::Closed | RelayStatus::Error) {
                    break;
                }
            }
            RelayEvent::Data {
                data,
                received_at_ms,
            } => {
                tracing::info!(len = data.len(), received_at_ms, "relay frame");
            }
        }
    }

    println!("{}", metrics.render());
}
