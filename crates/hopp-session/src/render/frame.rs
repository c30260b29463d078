//! Video frame buffers and presentable frames.
//!
//! Buffers are planar YUV 4:2:0 (I420): a full-resolution luma plane
//! followed by two quarter-resolution chroma planes. A buffer is consumed
//! exactly once to build a `PresentableFrame`, which must be released after
//! drawing whether or not the draw succeeded — an unreleased frame leaks
//! decoder resources.

use bytes::Bytes;

use crate::error::{Result, SessionError};

/// Nominal presentation duration per frame, microseconds.
pub const NOMINAL_FRAME_DURATION_US: u64 = 33_333;

/// Decoded raw planes handed over from the decode stage.
///
/// Ownership transfers into the renderer worker with the message; the
/// sender must not touch the buffer afterwards.
#[derive(Debug)]
pub struct VideoFrameBuffer {
    pub frame_id: u64,
    /// Coded picture width, pixels.
    pub width: u32,
    /// Coded picture height, pixels.
    pub height: u32,
    /// Capture timestamp, milliseconds.
    pub timestamp_ms: f64,
    /// I420 plane bytes.
    pub data: Bytes,
    /// Full-range (PC) levels rather than limited (TV) levels.
    pub full_range: bool,
}

/// Byte offsets and strides of the three I420 planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    pub width: u32,
    pub height: u32,
    pub y_offset: usize,
    pub u_offset: usize,
    pub v_offset: usize,
    pub y_stride: usize,
    pub chroma_stride: usize,
    pub total_len: usize,
}

impl PlaneLayout {
    /// Compute the I420 layout for the given picture dimensions.
    ///
    /// Luma plane is `width * height` bytes with stride `width`; each
    /// chroma plane is a quarter of that with stride `width / 2`.
    pub fn i420(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SessionError::ZeroDimensions { width, height });
        }
        if width % 2 != 0 || height % 2 != 0 {
            return Err(SessionError::OddDimensions { width, height });
        }
        let luma = width as usize * height as usize;
        let chroma = luma / 4;
        Ok(Self {
            width,
            height,
            y_offset: 0,
            u_offset: luma,
            v_offset: luma + chroma,
            y_stride: width as usize,
            chroma_stride: width as usize / 2,
            total_len: luma + 2 * chroma,
        })
    }
}

/// BT.709 color description carried by every presentable frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDescription {
    pub full_range: bool,
}

/// Exactly-once-consumable handle wrapping decoded pixels for drawing.
pub struct PresentableFrame {
    layout: PlaneLayout,
    data: Bytes,
    pub timestamp_us: i64,
    pub duration_us: u64,
    pub color: ColorDescription,
}

impl PresentableFrame {
    /// Consume a raw buffer into a presentable frame.
    pub fn from_buffer(buf: VideoFrameBuffer) -> Result<Self> {
        let layout = PlaneLayout::i420(buf.width, buf.height)?;
        if buf.data.len() < layout.total_len {
            return Err(SessionError::BufferTooShort {
                need: layout.total_len,
                got: buf.data.len(),
            });
        }
        Ok(Self {
            layout,
            data: buf.data,
            // Capture clock is ms; presentation clock is µs.
            timestamp_us: (buf.timestamp_ms * 1000.0) as i64,
            duration_us: NOMINAL_FRAME_DURATION_US,
            color: ColorDescription {
                full_range: buf.full_range,
            },
        })
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn layout(&self) -> &PlaneLayout {
        &self.layout
    }

    pub fn plane_y(&self) -> &[u8] {
        &self.data[self.layout.y_offset..self.layout.u_offset]
    }

    pub fn plane_u(&self) -> &[u8] {
        &self.data[self.layout.u_offset..self.layout.v_offset]
    }

    pub fn plane_v(&self) -> &[u8] {
        &self.data[self.layout.v_offset..self.layout.total_len]
    }

    /// Release the underlying decoder buffer. Must be called for every
    /// frame, on the draw-failure path included.
    pub fn close(self) {
        drop(self.data);
    }
}
