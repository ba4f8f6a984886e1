//! Pan/zoom viewport and the canonical screen <-> image coordinate mapping.
//!
//! A pointer position goes through two stages on its way to image pixels:
//! 1. **Pan/zoom inverse**: subtract the on-screen origin and the pan
//!    translation, then divide by the zoom scale. The result is in the
//!    coordinate space of the rendered (CSS-sized) image element.
//! 2. **Buffer ratio**: multiply by `buffer_size / rendered_size` to account
//!    for the element being displayed at a different size than its pixel
//!    buffer.
//!
//! `image_to_screen` applies the exact inverse in reverse order. Drawing code
//! only ever reads a `&Viewport`; pan and zoom gestures are the only writers.

use crate::consts::{EPSILON, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::error::{RedrawError, Result};
use crate::geometry::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    scale: f32,
    translation: Point,
    origin: Point,
    rendered_width: f32,
    rendered_height: f32,
    buffer_width: u32,
    buffer_height: u32,
}

impl Viewport {
    /// Viewport for a buffer rendered at its natural size, unzoomed, at the
    /// screen origin.
    pub fn new(buffer_width: u32, buffer_height: u32) -> Result<Self> {
        if buffer_width == 0 || buffer_height == 0 {
            return Err(RedrawError::InvalidDimensions {
                width: buffer_width,
                height: buffer_height,
            });
        }
        Ok(Self {
            scale: 1.0,
            translation: Point::default(),
            origin: Point::default(),
            rendered_width: buffer_width as f32,
            rendered_height: buffer_height as f32,
            buffer_width,
            buffer_height,
        })
    }

    pub fn with_rendered_size(mut self, width: f32, height: f32) -> Result<Self> {
        self.set_rendered_size(width, height)?;
        Ok(self)
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        (self.buffer_width, self.buffer_height)
    }

    pub fn rendered_size(&self) -> (f32, f32) {
        (self.rendered_width, self.rendered_height)
    }

    /// Buffer pixels per rendered unit, per axis.
    pub fn buffer_ratio(&self) -> (f32, f32) {
        (
            self.buffer_width as f32 / self.rendered_width,
            self.buffer_height as f32 / self.rendered_height,
        )
    }

    /// Update the displayed element size (e.g. after a responsive re-layout).
    pub fn set_rendered_size(&mut self, width: f32, height: f32) -> Result<()> {
        if !(width.is_finite() && height.is_finite()) || width <= EPSILON || height <= EPSILON {
            return Err(RedrawError::InvalidDimensions {
                width: width.max(0.0) as u32,
                height: height.max(0.0) as u32,
            });
        }
        self.rendered_width = width;
        self.rendered_height = height;
        Ok(())
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Map a pointer position to image-pixel coordinates.
    pub fn screen_to_image(&self, screen: Point) -> Point {
        let (rx, ry) = self.buffer_ratio();
        let local_x = (screen.x - self.origin.x - self.translation.x) / self.scale;
        let local_y = (screen.y - self.origin.y - self.translation.y) / self.scale;
        Point::new(local_x * rx, local_y * ry)
    }

    /// Map an image-pixel position to where it appears on screen.
    pub fn image_to_screen(&self, image: Point) -> Point {
        let (rx, ry) = self.buffer_ratio();
        let local_x = image.x / rx;
        let local_y = image.y / ry;
        Point::new(
            local_x * self.scale + self.translation.x + self.origin.x,
            local_y * self.scale + self.translation.y + self.origin.y,
        )
    }

    /// True if the image-space point lies on the buffer.
    pub fn contains_image_point(&self, p: Point) -> bool {
        p.x >= 0.0
            && p.y >= 0.0
            && p.x < self.buffer_width as f32
            && p.y < self.buffer_height as f32
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.translation.x += dx;
        self.translation.y += dy;
    }

    /// Set the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Relative zoom: positive steps multiply the scale by `1 + step`,
    /// negative steps divide it by `1 - step`, so `zoom_by(s)` followed by
    /// `zoom_by(-s)` is the identity (away from the clamp bounds).
    pub fn zoom_by(&mut self, step: f32) {
        if !step.is_finite() {
            return;
        }
        if step >= 0.0 {
            self.set_scale(self.scale * (1.0 + step));
        } else {
            self.set_scale(self.scale / (1.0 - step));
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    /// Zoom to `new_scale` while keeping the image point under `anchor`
    /// (a screen position, typically the cursor) fixed on screen.
    pub fn zoom_at(&mut self, anchor: Point, new_scale: f32) {
        let local_x = (anchor.x - self.origin.x - self.translation.x) / self.scale;
        let local_y = (anchor.y - self.origin.y - self.translation.y) / self.scale;
        self.set_scale(new_scale);
        self.translation.x = anchor.x - self.origin.x - local_x * self.scale;
        self.translation.y = anchor.y - self.origin.y - local_y * self.scale;
    }

    /// Back to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.translation = Point::default();
    }
}
