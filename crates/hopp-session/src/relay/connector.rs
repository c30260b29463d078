//! Connection backend behind the relay worker.
//!
//! The worker only sees framed binary halves, so tests can inject an
//! in-memory duplex and production uses TCP with length-delimited frames.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::stream::StreamExt;
use futures_util::{Sink, SinkExt, Stream};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

/// Graceful close code (mirrors WebSocket 1000 "normal closure").
pub const CLOSE_NORMAL: u16 = 1000;

pub type FrameStream = Box<dyn Stream<Item = std::io::Result<BytesMut>> + Send + Sync + Unpin>;
pub type FrameSink = Box<dyn Sink<Bytes, Error = std::io::Error> + Send + Sync + Unpin>;

/// One live framed connection, reader and writer halves.
pub struct RelayConnection {
    pub reader: FrameStream,
    pub writer: FrameSink,
}

impl RelayConnection {
    /// Wrap any byte transport in length-delimited framing.
    pub fn from_io<T>(io: T, max_frame_bytes: usize) -> Self
    where
        T: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let mut codec = LengthDelimitedCodec::new();
        codec.set_max_frame_length(max_frame_bytes);
        let (writer, reader) = Framed::new(io, codec).split();
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
        }
    }

    /// Graceful teardown: flush and release the transport. The code/reason
    /// pair is bookkeeping for the status surface, not a wire handshake.
    pub async fn close(mut self, code: u16, reason: &str) {
        tracing::debug!(code, reason, "closing relay connection");
        let _ = self.writer.close().await;
    }
}

/// Seam between the worker and its transport.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, url: &str) -> std::io::Result<RelayConnection>;
}

/// Production backend: TCP with length-delimited binary frames.
pub struct TcpConnector {
    max_frame_bytes: usize,
}

impl TcpConnector {
    pub fn new(max_frame_bytes: usize) -> Self {
        Self { max_frame_bytes }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, url: &str) -> std::io::Result<RelayConnection> {
        let addr = url.strip_prefix("tcp://").unwrap_or(url);
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(RelayConnection::from_io(stream, self.max_frame_bytes))
    }
}
