#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use image::{ImageFormat, Rgba, RgbaImage};
use redraw_core::error::{RedrawError, Result};
use redraw_core::geometry::Point;
use redraw_core::inpaint::{InpaintRequest, InpaintResponse, InpaintingService};
use redraw_core::io::image_io::encode_base64;
use redraw_core::session::Session;

/// Encode a flat grey page of the given size.
pub fn page_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255]));
    let mut bytes = Vec::new();
    match format {
        // JPEG has no alpha channel.
        ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap(),
        _ => img.write_to(&mut Cursor::new(&mut bytes), format).unwrap(),
    }
    bytes
}

pub fn png_page(width: u32, height: u32) -> Vec<u8> {
    page_bytes(width, height, ImageFormat::Png)
}

/// A big brush disc centred on the canvas, enough to cover small pages.
pub fn paint_everything(editor: &mut redraw_core::editor::MaskEditor) {
    editor.set_brush_size(100);
    let center = Point::new(editor.width() as f32 / 2.0, editor.height() as f32 / 2.0);
    editor.begin_stroke(center);
    editor.end_stroke();
}

/// Session with a 40x30 page, a full-canvas mask and a credential.
pub fn ready_session() -> Session {
    let mut session = Session::new();
    session.load_image(png_page(40, 30), Some("image/png")).unwrap();
    paint_everything(session.editor_mut().unwrap());
    session.set_credential("test-key-123456");
    session
}

pub enum Behavior {
    /// Return a small PNG.
    Succeed,
    /// Report `success: false` with this message.
    Fail(String),
    /// Fail before producing a response.
    Transport(String),
}

/// Scripted inpainting service that records what it was sent.
pub struct MockService {
    behavior: Behavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<InpaintRequest>>,
}

impl MockService {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Behavior::Succeed)
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Behavior::Fail(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<InpaintRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl InpaintingService for MockService {
    fn name(&self) -> &str {
        "mock"
    }

    fn inpaint(&self, request: &InpaintRequest) -> Result<InpaintResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.behavior {
            Behavior::Succeed => Ok(InpaintResponse::success(encode_base64(&png_page(40, 30)))),
            Behavior::Fail(message) => Ok(InpaintResponse::failure(message.clone())),
            Behavior::Transport(message) => Err(RedrawError::Collaborator(message.clone())),
        }
    }
}
