//! Draw targets.
//!
//! The worker drives any `DrawTarget`; the shipped implementation is a
//! software RGBA canvas doing BT.709 YUV->RGB conversion with
//! nearest-neighbour scaling to the current display size.

use crate::error::{Result, SessionError};
use crate::render::frame::PresentableFrame;

/// Drawing surface the renderer worker presents onto.
pub trait DrawTarget: Send {
    /// Acquire the 2D context on the backing surface. Called once per
    /// `init`; failure leaves the worker inert until the next `init`.
    fn acquire(&mut self) -> Result<()> {
        Ok(())
    }

    /// Current display size of the backing store.
    fn size(&self) -> (u32, u32);

    /// Resize the backing store. The worker only calls this when the frame
    /// dimensions differ from the current size.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw the frame scaled to the current display size.
    fn draw(&mut self, frame: &PresentableFrame) -> Result<()>;
}

/// Software draw target: an RGBA8 backing store.
pub struct SoftwareCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SoftwareCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        canvas.resize(width, height);
        canvas
    }

    /// RGBA8 backing store, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }
}

impl DrawTarget for SoftwareCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
    }

    fn draw(&mut self, frame: &PresentableFrame) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SessionError::TargetUnavailable);
        }
        let layout = *frame.layout();
        let (y_plane, u_plane, v_plane) = (frame.plane_y(), frame.plane_u(), frame.plane_v());
        let full_range = frame.color.full_range;

        for dy in 0..self.height {
            let sy = (dy as usize * layout.height as usize) / self.height as usize;
            for dx in 0..self.width {
                let sx = (dx as usize * layout.width as usize) / self.width as usize;

                let y = y_plane[sy * layout.y_stride + sx];
                let cidx = (sy / 2) * layout.chroma_stride + sx / 2;
                let u = u_plane[cidx];
                let v = v_plane[cidx];

                let [r, g, b] = bt709_to_rgb(y, u, v, full_range);
                let idx = (dy as usize * self.width as usize + dx as usize) * 4;
                self.pixels[idx] = r;
                self.pixels[idx + 1] = g;
                self.pixels[idx + 2] = b;
                self.pixels[idx + 3] = 255;
            }
        }
        Ok(())
    }
}

/// BT.709 matrix, full-range (PC) or limited-range (TV) levels.
fn bt709_to_rgb(y: u8, u: u8, v: u8, full_range: bool) -> [u8; 3] {
    let d = f32::from(u) - 128.0;
    let e = f32::from(v) - 128.0;

    let (r, g, b) = if full_range {
        let y = f32::from(y);
        (
            y + 1.5748 * e,
            y - 0.1873 * d - 0.4681 * e,
            y + 1.8556 * d,
        )
    } else {
        let c = 1.1644 * (f32::from(y) - 16.0);
        (
            c + 1.7927 * e,
            c - 0.2133 * d - 0.5329 * e,
            c + 2.1124 * d,
        )
    };

    [clamp_u8(r), clamp_u8(g), clamp_u8(b)]
}

fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
