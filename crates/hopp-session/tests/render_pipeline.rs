//! Plane layout and software-canvas conversion tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;

use hopp_session::render::{PlaneLayout, PresentableFrame, VideoFrameBuffer};
use hopp_session::render::{DrawTarget, SoftwareCanvas};
use hopp_session::SessionError;

fn buffer(width: u32, height: u32, y: u8, u: u8, v: u8, full_range: bool) -> VideoFrameBuffer {
    let luma = (width * height) as usize;
    let chroma = luma / 4;
    let mut data = vec![y; luma];
    data.extend(std::iter::repeat(u).take(chroma));
    data.extend(std::iter::repeat(v).take(chroma));
    VideoFrameBuffer {
        frame_id: 1,
        width,
        height,
        timestamp_ms: 40.0,
        data: Bytes::from(data),
        full_range,
    }
}

#[test]
fn i420_layout_offsets_and_strides() {
    let layout = PlaneLayout::i420(640, 480).unwrap();
    assert_eq!(layout.y_offset, 0);
    assert_eq!(layout.u_offset, 640 * 480);
    assert_eq!(layout.v_offset, 640 * 480 + 640 * 480 / 4);
    assert_eq!(layout.y_stride, 640);
    assert_eq!(layout.chroma_stride, 320);
    assert_eq!(layout.total_len, 640 * 480 * 3 / 2);
}

#[test]
fn i420_rejects_bad_dimensions() {
    assert!(matches!(
        PlaneLayout::i420(0, 480),
        Err(SessionError::ZeroDimensions { .. })
    ));
    assert!(matches!(
        PlaneLayout::i420(641, 480),
        Err(SessionError::OddDimensions { .. })
    ));
    assert!(matches!(
        PlaneLayout::i420(640, 479),
        Err(SessionError::OddDimensions { .. })
    ));
}

#[test]
fn from_buffer_checks_length_and_converts_timestamp() {
    let mut buf = buffer(4, 2, 128, 128, 128, true);
    buf.data = buf.data.slice(..buf.data.len() - 1);
    assert!(matches!(
        PresentableFrame::from_buffer(buf),
        Err(SessionError::BufferTooShort { need: 12, got: 11 })
    ));

    let frame = PresentableFrame::from_buffer(buffer(4, 2, 128, 128, 128, true)).unwrap();
    assert_eq!(frame.timestamp_us, 40_000);
    assert_eq!(frame.plane_y().len(), 8);
    assert_eq!(frame.plane_u().len(), 2);
    assert_eq!(frame.plane_v().len(), 2);
    frame.close();
}

#[test]
fn full_range_neutral_chroma_is_gray() {
    let frame = PresentableFrame::from_buffer(buffer(2, 2, 100, 128, 128, true)).unwrap();
    let mut canvas = SoftwareCanvas::new(2, 2);
    canvas.draw(&frame).unwrap();
    assert_eq!(canvas.pixel(0, 0).unwrap(), [100, 100, 100, 255]);
    assert_eq!(canvas.pixel(1, 1).unwrap(), [100, 100, 100, 255]);
    frame.close();
}

#[test]
fn limited_range_maps_16_to_black_and_235_to_white() {
    let black = PresentableFrame::from_buffer(buffer(2, 2, 16, 128, 128, false)).unwrap();
    let mut canvas = SoftwareCanvas::new(2, 2);
    canvas.draw(&black).unwrap();
    assert_eq!(canvas.pixel(0, 0).unwrap(), [0, 0, 0, 255]);
    black.close();

    let white = PresentableFrame::from_buffer(buffer(2, 2, 235, 128, 128, false)).unwrap();
    canvas.draw(&white).unwrap();
    assert_eq!(canvas.pixel(1, 0).unwrap(), [255, 255, 255, 255]);
    white.close();
}

#[test]
fn draw_scales_to_canvas_size() {
    // 2x2 source onto a 4x4 canvas: every destination pixel samples the
    // uniform source, so the whole canvas is gray.
    let frame = PresentableFrame::from_buffer(buffer(2, 2, 100, 128, 128, true)).unwrap();
    let mut canvas = SoftwareCanvas::new(4, 4);
    canvas.draw(&frame).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(canvas.pixel(x, y).unwrap(), [100, 100, 100, 255]);
        }
    }
    frame.close();
}

#[test]
fn pixel_out_of_range_is_none() {
    let canvas = SoftwareCanvas::new(2, 2);
    assert!(canvas.pixel(1, 1).is_some());
    assert!(canvas.pixel(2, 0).is_none());
    assert!(canvas.pixel(0, 2).is_none());
}
