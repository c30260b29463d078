//! Chunked clipboard transfer reassembly.
//!
//! Exactly one transfer is in flight per remote-control session; there is
//! no transfer id on the wire. Packets are buffered by index, so arrival
//! order is irrelevant, and a duplicate index overwrites its slot.

use std::collections::BTreeMap;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{ProtoError, Result};
use crate::protocol::control::ClipboardPayload;

/// Outcome of ingesting one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reassembly {
    /// Transfer incomplete; more chunks expected.
    Pending,
    /// All packets present; chunks concatenated ascending by packet index.
    Complete(Bytes),
}

#[derive(Debug)]
struct Transfer {
    total_packets: u32,
    received: BTreeMap<u32, Bytes>,
}

/// Single-flight reassembler for chunked clipboard payloads.
#[derive(Debug, Default)]
pub struct ChunkReassembler {
    active: Option<Transfer>,
}

impl ChunkReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer one chunk; returns `Complete` with the full buffer once every
    /// packet index in `[0, total_packets)` has been received.
    ///
    /// A chunk whose declared `total_packets` differs from the active
    /// transfer's starts a new transfer; the previous partial is discarded.
    /// On completion the internal state is cleared, ready for the next
    /// transfer.
    pub fn ingest(&mut self, chunk: &ClipboardPayload) -> Result<Reassembly> {
        if chunk.total_packets == 0 {
            return Err(ProtoError::InvalidChunkCount);
        }
        if chunk.packet_id >= chunk.total_packets {
            return Err(ProtoError::PacketIndexOutOfRange {
                packet_id: chunk.packet_id,
                total_packets: chunk.total_packets,
            });
        }

        let transfer = match &mut self.active {
            Some(t) if t.total_packets == chunk.total_packets => t,
            other => {
                if other.is_some() {
                    tracing::debug!(
                        total_packets = chunk.total_packets,
                        "clipboard transfer restarted, discarding partial"
                    );
                }
                other.insert(Transfer {
                    total_packets: chunk.total_packets,
                    received: BTreeMap::new(),
                })
            }
        };

        transfer
            .received
            .insert(chunk.packet_id, Bytes::copy_from_slice(&chunk.data));

        if transfer.received.len() as u32 != transfer.total_packets {
            return Ok(Reassembly::Pending);
        }

        let total: usize = transfer.received.values().map(Bytes::len).sum();
        let mut buf = BytesMut::with_capacity(total);
        for part in transfer.received.values() {
            buf.put_slice(part);
        }
        self.active = None;
        Ok(Reassembly::Complete(buf.freeze()))
    }

    /// Whether a partial transfer is currently buffered.
    pub fn in_flight(&self) -> bool {
        self.active.is_some()
    }

    /// Drop any partial transfer (session teardown).
    pub fn clear(&mut self) {
        self.active = None;
    }
}
