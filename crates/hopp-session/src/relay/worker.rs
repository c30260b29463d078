//! Relay worker task.
//!
//! Single-connection invariant: `Init` over a live connection closes it
//! before opening the new one; there are never two open connections. No
//! automatic reconnect — retry policy belongs to the caller.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::obs::SessionMetrics;
use crate::relay::connector::{Connector, RelayConnection, CLOSE_NORMAL};

/// Control messages into the worker.
#[derive(Debug)]
pub enum RelayCommand {
    /// Open a connection to `url`, gracefully replacing any live one.
    Init { url: String },
    /// Close the live connection, if any.
    Close,
}

/// Connection lifecycle stage reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStatus {
    Connecting,
    Open,
    Closed,
    Error,
}

impl RelayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RelayStatus::Connecting => "connecting",
            RelayStatus::Open => "open",
            RelayStatus::Closed => "closed",
            RelayStatus::Error => "error",
        }
    }
}

/// Messages out of the worker.
#[derive(Debug)]
pub enum RelayEvent {
    Status(RelayStatus),
    /// Inbound binary frame. The buffer is frozen and handed over whole;
    /// the worker never reads it again after sending.
    Data { data: Bytes, received_at_ms: u64 },
}

/// Spawn the worker task; returns its command and event endpoints.
pub fn spawn<C: Connector>(
    connector: C,
    queue_capacity: usize,
    metrics: Arc<SessionMetrics>,
) -> (mpsc::Sender<RelayCommand>, mpsc::Receiver<RelayEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(queue_capacity);
    let (evt_tx, evt_rx) = mpsc::channel(queue_capacity);
    let worker = RelayWorker {
        connector,
        commands: cmd_rx,
        events: evt_tx,
        metrics,
        conn: None,
    };
    tokio::spawn(worker.run());
    (cmd_tx, evt_rx)
}

struct RelayWorker<C> {
    connector: C,
    commands: mpsc::Receiver<RelayCommand>,
    events: mpsc::Sender<RelayEvent>,
    metrics: Arc<SessionMetrics>,
    conn: Option<RelayConnection>,
}

impl<C: Connector> RelayWorker<C> {
    async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.commands.recv() => {
                    match cmd {
                        Some(RelayCommand::Init { url }) => self.handle_init(&url).await,
                        Some(RelayCommand::Close) => {
                            self.teardown(CLOSE_NORMAL, "client_close").await;
                            // Reported from the caller's perspective; the
                            // peer-side handshake is not awaited.
                            self.emit_status(RelayStatus::Closed).await;
                        }
                        None => {
                            self.teardown(CLOSE_NORMAL, "handle_dropped").await;
                            break;
                        }
                    }
                }
                frame = next_frame(&mut self.conn), if self.conn.is_some() => {
                    match frame {
                        Some(Ok(buf)) => {
                            if !self.forward(buf).await {
                                break;
                            }
                        }
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "relay read failed");
                            self.conn = None;
                            self.emit_status(RelayStatus::Error).await;
                        }
                        None => {
                            // Peer closed.
                            self.conn = None;
                            self.emit_status(RelayStatus::Closed).await;
                        }
                    }
                }
            }
        }
    }

    async fn handle_init(&mut self, url: &str) {
        if let Some(existing) = self.conn.take() {
            existing.close(CLOSE_NORMAL, "reconnect").await;
        }
        self.emit_status(RelayStatus::Connecting).await;
        match self.connector.connect(url).await {
            Ok(conn) => {
                self.conn = Some(conn);
                self.emit_status(RelayStatus::Open).await;
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "relay connect failed");
                self.emit_status(RelayStatus::Error).await;
            }
        }
    }

    /// Forward one inbound frame; returns false once the caller is gone.
    async fn forward(&mut self, buf: BytesMut) -> bool {
        let data = buf.freeze();
        let received_at_ms = wall_clock_ms();
        self.events
            .send(RelayEvent::Data {
                data,
                received_at_ms,
            })
            .await
            .is_ok()
    }

    async fn teardown(&mut self, code: u16, reason: &str) {
        if let Some(conn) = self.conn.take() {
            conn.close(code, reason).await;
        }
    }

    async fn emit_status(&self, status: RelayStatus) {
        self.metrics
            .relay_transitions
            .inc(&[("status", status.as_str())]);
        match status {
            RelayStatus::Open => self.metrics.relay_connected.set(&[], 1),
            RelayStatus::Closed | RelayStatus::Error => self.metrics.relay_connected.set(&[], 0),
            RelayStatus::Connecting => {}
        }
        let _ = self.events.send(RelayEvent::Status(status)).await;
    }
}

async fn next_frame(conn: &mut Option<RelayConnection>) -> Option<std::io::Result<BytesMut>> {
    match conn {
        Some(c) => c.reader.next().await,
        None => std::future::pending().await,
    }
}

fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
