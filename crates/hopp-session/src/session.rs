//! Decode-once session engine.
//!
//! Raw values from the call transport enter here, are validated exactly
//! once, and leave as typed events for the host layer. A rejected value
//! produces no partial effects: the reassembler and mode state are only
//! touched after validation succeeds.

use std::sync::Arc;

use serde_json::Value;

use hopp_proto::clipboard::{ChunkReassembler, Reassembly};
use hopp_proto::drawing::DrawingModeState;
use hopp_proto::protocol::{CallMessage, DrawingMode, WireMessage};
use hopp_proto::ProtoError;

use crate::context::SessionContext;
use crate::obs::SessionMetrics;

/// Typed outcome of one inbound value.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Input/lifecycle message for the host's input injector.
    Control(WireMessage),
    /// A chunked clipboard transfer finished reassembly.
    ClipboardReady(bytes::Bytes),
    /// Surface mode replaced; `previous` lets the renderer run its cleanup.
    ModeChanged {
        previous: DrawingMode,
        current: DrawingMode,
    },
    /// Signaling message for the host's call UI.
    Signal(CallMessage),
    /// The call ended; transient session state has been reset.
    Ended { call_id: String },
}

/// One active remote-control session.
pub struct CallSession {
    ctx: SessionContext,
    reassembler: ChunkReassembler,
    mode: DrawingModeState,
    metrics: Arc<SessionMetrics>,
}

impl CallSession {
    pub fn new(ctx: SessionContext, metrics: Arc<SessionMetrics>) -> Self {
        Self {
            ctx,
            reassembler: ChunkReassembler::new(),
            mode: DrawingModeState::new(),
            metrics,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.ctx
    }

    pub fn drawing_mode(&self) -> DrawingMode {
        self.mode.current()
    }

    /// Validate and route one control-lane value.
    ///
    /// `Ok(None)` means the value was consumed internally (a pending
    /// clipboard chunk); errors mean the value was dropped in full.
    pub fn handle_control(&mut self, raw: &Value) -> Result<Option<SessionEvent>, ProtoError> {
        let msg = WireMessage::parse(raw).map_err(|e| self.reject(e))?;
        match msg {
            WireMessage::ClipboardPayload(chunk) => {
                match self.reassembler.ingest(&chunk).map_err(|e| self.reject(e))? {
                    Reassembly::Pending => Ok(None),
                    Reassembly::Complete(bytes) => {
                        self.metrics
                            .clipboard_transfers
                            .inc(&[("outcome", "complete")]);
                        Ok(Some(SessionEvent::ClipboardReady(bytes)))
                    }
                }
            }
            WireMessage::DrawingMode(next) => {
                let previous = self.mode.apply(next);
                Ok(Some(SessionEvent::ModeChanged {
                    previous,
                    current: next,
                }))
            }
            other => Ok(Some(SessionEvent::Control(other))),
        }
    }

    /// Validate and route one signaling value.
    pub fn handle_signal(&mut self, raw: &Value) -> Result<SessionEvent, ProtoError> {
        let msg = CallMessage::parse(raw).map_err(|e| self.reject(e))?;
        match &msg {
            CallMessage::CallTokens(tokens) => {
                self.ctx.set_tokens(tokens.clone());
            }
            CallMessage::CallEnd { call_id } => {
                let call_id = call_id.clone();
                self.end();
                return Ok(SessionEvent::Ended { call_id });
            }
            _ => {}
        }
        Ok(SessionEvent::Signal(msg))
    }

    /// Reset transient state (mode back to `Disabled`, partial clipboard
    /// transfer discarded, context cleared).
    pub fn end(&mut self) {
        self.reassembler.clear();
        self.mode.reset();
        self.ctx.clear();
    }

    fn reject(&self, e: ProtoError) -> ProtoError {
        tracing::debug!(code = e.code().as_str(), error = %e, "inbound value rejected");
        self.metrics
            .validation_rejects
            .inc(&[("code", e.code().as_str())]);
        e
    }
}
