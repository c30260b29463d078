//! Renderer worker tests with recording/faulty draw targets.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use bytes::Bytes;

use hopp_session::obs::SessionMetrics;
use hopp_session::render::frame::VideoFrameBuffer;
use hopp_session::render::surface::DrawTarget;
use hopp_session::render::worker::{RendererCommand, RendererEvent};
use hopp_session::render::{self, PresentableFrame};
use hopp_session::SessionError;

#[derive(Default)]
struct TargetLog {
    resizes: Vec<(u32, u32)>,
    draws: u32,
}

/// Records resize/draw calls; draw can be scripted to fail.
struct RecordingTarget {
    size: (u32, u32),
    log: Arc<Mutex<TargetLog>>,
    fail_acquire: bool,
    fail_draws: u32,
}

impl RecordingTarget {
    fn new(log: Arc<Mutex<TargetLog>>) -> Self {
        Self {
            size: (0, 0),
            log,
            fail_acquire: false,
            fail_draws: 0,
        }
    }
}

impl DrawTarget for RecordingTarget {
    fn acquire(&mut self) -> Result<(), SessionError> {
        if self.fail_acquire {
            return Err(SessionError::TargetUnavailable);
        }
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.log.lock().unwrap().resizes.push((width, height));
    }

    fn draw(&mut self, _frame: &PresentableFrame) -> Result<(), SessionError> {
        self.log.lock().unwrap().draws += 1;
        if self.fail_draws > 0 {
            self.fail_draws -= 1;
            return Err(SessionError::TargetUnavailable);
        }
        Ok(())
    }
}

fn i420_frame(frame_id: u64, width: u32, height: u32) -> VideoFrameBuffer {
    let len = (width * height) as usize * 3 / 2;
    VideoFrameBuffer {
        frame_id,
        width,
        height,
        timestamp_ms: 1_000.0 + frame_id as f64,
        data: Bytes::from(vec![128u8; len]),
        full_range: false,
    }
}

#[tokio::test]
async fn frame_before_init_is_dropped_silently() {
    let metrics = Arc::new(SessionMetrics::default());
    let (commands, mut events) = render::spawn(16, Arc::clone(&metrics));

    commands
        .send(RendererCommand::Frame(i420_frame(1, 4, 2)))
        .await
        .unwrap();

    // The next observable event must be Ready from init, not metrics.
    let log = Arc::new(Mutex::new(TargetLog::default()));
    commands
        .send(RendererCommand::Init {
            target: Box::new(RecordingTarget::new(log)),
        })
        .await
        .unwrap();
    assert_eq!(events.recv().await, Some(RendererEvent::Ready));
    assert_eq!(
        metrics.frames_dropped.get(&[("reason", "uninitialized")]),
        1
    );
}

#[tokio::test]
async fn resize_happens_only_on_dimension_change() {
    let metrics = Arc::new(SessionMetrics::default());
    let (commands, mut events) = render::spawn(16, Arc::clone(&metrics));

    let log = Arc::new(Mutex::new(TargetLog::default()));
    commands
        .send(RendererCommand::Init {
            target: Box::new(RecordingTarget::new(Arc::clone(&log))),
        })
        .await
        .unwrap();
    assert_eq!(events.recv().await, Some(RendererEvent::Ready));

    for id in 1..=2 {
        commands
            .send(RendererCommand::Frame(i420_frame(id, 4, 2)))
            .await
            .unwrap();
    }

    for want_id in 1..=2u64 {
        match events.recv().await {
            Some(RendererEvent::Metrics {
                frame_id,
                before_draw_ms,
                after_draw_ms,
            }) => {
                assert_eq!(frame_id, want_id);
                assert!(before_draw_ms <= after_draw_ms);
            }
            other => panic!("expected metrics, got {other:?}"),
        }
    }

    // Two identical frames: exactly one resize, two draws.
    let log = log.lock().unwrap();
    assert_eq!(log.resizes, vec![(4, 2)]);
    assert_eq!(log.draws, 2);
    assert_eq!(metrics.frames_drawn.get(&[]), 2);
}

#[tokio::test]
async fn acquire_failure_leaves_worker_inert_until_reinit() {
    let metrics = Arc::new(SessionMetrics::default());
    let (commands, mut events) = render::spawn(16, Arc::clone(&metrics));

    let log = Arc::new(Mutex::new(TargetLog::default()));
    let mut bad = RecordingTarget::new(Arc::clone(&log));
    bad.fail_acquire = true;
    commands
        .send(RendererCommand::Init {
            target: Box::new(bad),
        })
        .await
        .unwrap();

    // No ready; frames are dropped while inert.
    commands
        .send(RendererCommand::Frame(i420_frame(1, 4, 2)))
        .await
        .unwrap();

    // A later good init recovers the worker.
    commands
        .send(RendererCommand::Init {
            target: Box::new(RecordingTarget::new(Arc::clone(&log))),
        })
        .await
        .unwrap();
    assert_eq!(events.recv().await, Some(RendererEvent::Ready));
    assert_eq!(
        metrics.frames_dropped.get(&[("reason", "uninitialized")]),
        1
    );
}

#[tokio::test]
async fn draw_failure_drops_frame_but_worker_continues() {
    let metrics = Arc::new(SessionMetrics::default());
    let (commands, mut events) = render::spawn(16, Arc::clone(&metrics));

    let log = Arc::new(Mutex::new(TargetLog::default()));
    let mut target = RecordingTarget::new(Arc::clone(&log));
    target.fail_draws = 1;
    commands
        .send(RendererCommand::Init {
            target: Box::new(target),
        })
        .await
        .unwrap();
    assert_eq!(events.recv().await, Some(RendererEvent::Ready));

    commands
        .send(RendererCommand::Frame(i420_frame(1, 4, 2)))
        .await
        .unwrap();
    commands
        .send(RendererCommand::Frame(i420_frame(2, 4, 2)))
        .await
        .unwrap();

    // Only the second frame yields metrics.
    match events.recv().await {
        Some(RendererEvent::Metrics { frame_id, .. }) => assert_eq!(frame_id, 2),
        other => panic!("expected metrics for frame 2, got {other:?}"),
    }
    assert_eq!(metrics.frames_dropped.get(&[("reason", "draw")]), 1);
    assert_eq!(metrics.frames_drawn.get(&[]), 1);
}

#[tokio::test]
async fn short_buffer_is_rejected_without_stopping_worker() {
    let metrics = Arc::new(SessionMetrics::default());
    let (commands, mut events) = render::spawn(16, Arc::clone(&metrics));

    let log = Arc::new(Mutex::new(TargetLog::default()));
    commands
        .send(RendererCommand::Init {
            target: Box::new(RecordingTarget::new(log)),
        })
        .await
        .unwrap();
    assert_eq!(events.recv().await, Some(RendererEvent::Ready));

    let mut bad = i420_frame(1, 4, 2);
    bad.data = Bytes::from_static(&[0u8; 3]);
    commands.send(RendererCommand::Frame(bad)).await.unwrap();
    commands
        .send(RendererCommand::Frame(i420_frame(2, 4, 2)))
        .await
        .unwrap();

    match events.recv().await {
        Some(RendererEvent::Metrics { frame_id, .. }) => assert_eq!(frame_id, 2),
        other => panic!("expected metrics for frame 2, got {other:?}"),
    }
    assert_eq!(metrics.frames_dropped.get(&[("reason", "construct")]), 1);
}

#[tokio::test]
async fn dispose_ignores_frames_until_next_init() {
    let metrics = Arc::new(SessionMetrics::default());
    let (commands, mut events) = render::spawn(16, Arc::clone(&metrics));

    let log = Arc::new(Mutex::new(TargetLog::default()));
    commands
        .send(RendererCommand::Init {
            target: Box::new(RecordingTarget::new(Arc::clone(&log))),
        })
        .await
        .unwrap();
    assert_eq!(events.recv().await, Some(RendererEvent::Ready));

    commands.send(RendererCommand::Dispose).await.unwrap();
    commands
        .send(RendererCommand::Frame(i420_frame(1, 4, 2)))
        .await
        .unwrap();

    commands
        .send(RendererCommand::Init {
            target: Box::new(RecordingTarget::new(log)),
        })
        .await
        .unwrap();
    assert_eq!(events.recv().await, Some(RendererEvent::Ready));
    assert_eq!(
        metrics.frames_dropped.get(&[("reason", "uninitialized")]),
        1
    );
}
