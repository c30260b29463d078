//! Renderer worker task.
//!
//! `Uninitialized -> Ready` on `Init` (context acquisition may fail, which
//! leaves the worker inert); `Dispose` releases the target and frames are
//! ignored until the next `Init`. One bad frame never stops the worker.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;

use crate::obs::SessionMetrics;
use crate::render::frame::{PresentableFrame, VideoFrameBuffer};
use crate::render::surface::DrawTarget;

/// Control messages into the worker.
pub enum RendererCommand {
    /// Hand over a drawing surface and acquire its 2D context.
    Init { target: Box<dyn DrawTarget> },
    /// One decoded frame; buffer ownership transfers with the message.
    Frame(VideoFrameBuffer),
    /// Release the target; subsequent frames are ignored.
    Dispose,
}

/// Messages out of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererEvent {
    Ready,
    /// Wall-clock stamps taken immediately around the draw call.
    Metrics {
        frame_id: u64,
        before_draw_ms: u64,
        after_draw_ms: u64,
    },
}

/// Spawn the worker task; returns its command and event endpoints.
pub fn spawn(
    queue_capacity: usize,
    metrics: Arc<SessionMetrics>,
) -> (mpsc::Sender<RendererCommand>, mpsc::Receiver<RendererEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(queue_capacity);
    let (evt_tx, evt_rx) = mpsc::channel(queue_capacity);
    let worker = RendererWorker {
        commands: cmd_rx,
        events: evt_tx,
        metrics,
        target: None,
    };
    tokio::spawn(worker.run());
    (cmd_tx, evt_rx)
}

struct RendererWorker {
    commands: mpsc::Receiver<RendererCommand>,
    events: mpsc::Sender<RendererEvent>,
    metrics: Arc<SessionMetrics>,
    target: Option<Box<dyn DrawTarget>>,
}

impl RendererWorker {
    async fn run(mut self) {
        while let Some(cmd) = self.commands.recv().await {
            match cmd {
                RendererCommand::Init { mut target } => match target.acquire() {
                    Ok(()) => {
                        self.target = Some(target);
                        let _ = self.events.send(RendererEvent::Ready).await;
                    }
                    Err(e) => {
                        // Fatal to this worker instance: stay inert, no ready.
                        tracing::error!(error = %e, "draw context acquisition failed");
                        self.target = None;
                    }
                },
                RendererCommand::Frame(buf) => self.handle_frame(buf).await,
                RendererCommand::Dispose => {
                    self.target = None;
                }
            }
        }
    }

    async fn handle_frame(&mut self, buf: VideoFrameBuffer) {
        let Some(target) = self.target.as_mut() else {
            tracing::debug!(frame_id = buf.frame_id, "frame before init, dropping");
            self.metrics
                .frames_dropped
                .inc(&[("reason", "uninitialized")]);
            return;
        };

        let frame_id = buf.frame_id;
        let (width, height) = (buf.width, buf.height);

        // Resizing the backing store is expensive and visually disruptive;
        // only do it when the dimensions actually change.
        if target.size() != (width, height) {
            target.resize(width, height);
        }

        let frame = match PresentableFrame::from_buffer(buf) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(frame_id, error = %e, "frame construction failed");
                self.metrics.frames_dropped.inc(&[("reason", "construct")]);
                return;
            }
        };

        let before_draw_ms = wall_clock_ms();
        let drawn = target.draw(&frame);
        let after_draw_ms = wall_clock_ms();

        // Release decoder resources whether or not the draw succeeded.
        frame.close();

        match drawn {
            Ok(()) => {
                self.metrics.frames_drawn.inc(&[]);
                self.metrics.draw_duration.observe(
                    &[],
                    Duration::from_millis(after_draw_ms.saturating_sub(before_draw_ms)),
                );
                let _ = self
                    .events
                    .send(RendererEvent::Metrics {
                        frame_id,
                        before_draw_ms,
                        after_draw_ms,
                    })
                    .await;
            }
            Err(e) => {
                tracing::warn!(frame_id, error = %e, "draw failed, frame dropped");
                self.metrics.frames_dropped.inc(&[("reason", "draw")]);
            }
        }
    }
}

fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
