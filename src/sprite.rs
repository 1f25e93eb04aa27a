//! Pivoted views into shared pixel buffers.
//!
//! A [`Sprite`] does not own pixels. It names a rectangle of a
//! [`SharedBuffer`] and a pivot point measured from that rectangle's
//! bottom-left corner. Compositing happens in world space: a sprite placed at
//! position `p` covers the world rect starting at `p - pivot`.

use crate::buffer::{PixelBuffer, SharedBuffer};
use crate::color::Pixel;
use crate::error::Result;
use crate::geometry::{IntRect, IntVector2};
use crate::output::DisplaySink;
use std::rc::Rc;

/// A rectangle of a shared buffer plus a pivot.
///
/// Cloning a sprite clones the view, not the pixels.
#[derive(Debug, Clone)]
pub struct Sprite<P> {
    buffer: SharedBuffer<P>,
    rect: IntRect,
    pivot: IntVector2,
}

impl<P: Pixel> Sprite<P> {
    /// View `rect` of `buffer`, which must lie within the buffer.
    #[must_use]
    pub fn new(buffer: SharedBuffer<P>, rect: IntRect, pivot: IntVector2) -> Self {
        Self { buffer, rect, pivot }
    }

    /// View the whole of `buffer`.
    #[must_use]
    pub fn full(buffer: SharedBuffer<P>, pivot: IntVector2) -> Self {
        let rect = buffer.borrow().rect();
        Self::new(buffer, rect, pivot)
    }

    /// Footprint in buffer-local coordinates.
    #[must_use]
    pub const fn rect(&self) -> IntRect {
        self.rect
    }

    /// Replace the footprint. Must lie within the buffer.
    pub fn set_rect(&mut self, rect: IntRect) {
        self.rect = rect;
    }

    /// Pivot, relative to the bottom-left of the footprint.
    #[must_use]
    pub const fn pivot(&self) -> IntVector2 {
        self.pivot
    }

    /// Move the pivot.
    pub fn set_pivot(&mut self, pivot: IntVector2) {
        self.pivot = pivot;
    }

    /// Footprint width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.rect.width()
    }

    /// Footprint height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.rect.height()
    }

    /// The backing buffer.
    #[must_use]
    pub fn buffer(&self) -> &SharedBuffer<P> {
        &self.buffer
    }

    /// True if both sprites view the same buffer.
    #[must_use]
    pub fn shares_buffer(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// [`blend_at`](Self::blend_at) with both sprites at the world origin.
    pub fn blend<F>(&self, brush: &Self, blend: F) -> bool
    where
        F: Fn(P, P) -> P,
    {
        self.blend_at(brush, blend, IntVector2::ZERO, IntVector2::ZERO)
    }

    /// Blend `brush` onto this sprite.
    ///
    /// This sprite's pivot is placed at `canvas_pos` and the brush's pivot at
    /// `brush_pos`. Every overlapping pixel becomes `blend(canvas, brush)`.
    /// Returns false, touching nothing, if the two do not overlap.
    ///
    /// # Panics
    ///
    /// Panics if either buffer is already borrowed elsewhere.
    pub fn blend_at<F>(
        &self,
        brush: &Self,
        blend: F,
        canvas_pos: IntVector2,
        brush_pos: IntVector2,
    ) -> bool
    where
        F: Fn(P, P) -> P,
    {
        let world_brush = brush.world_rect(brush_pos);
        let world_canvas = self.world_rect(canvas_pos);

        let active = world_brush.intersect(&world_canvas);
        if active.width() < 1 || active.height() < 1 {
            return false;
        }

        let local_brush = active.moved(brush.rect.min() - world_brush.min());
        let local_canvas = active.moved(self.rect.min() - world_canvas.min());

        let result = if self.shares_buffer(brush) {
            self.buffer
                .borrow_mut()
                .blend_within(blend, local_canvas, local_brush)
        } else {
            self.buffer
                .borrow_mut()
                .blend(&brush.buffer.borrow(), blend, local_canvas, local_brush)
        };

        // both local rects come from the same overlap, so shapes always agree
        debug_assert!(result.is_ok());
        result.is_ok()
    }

    /// Set every pixel of this sprite that `bounds` does not cover to `value`.
    ///
    /// Positions work as in [`blend_at`](Self::blend_at). Returns false,
    /// touching nothing, if the two do not overlap.
    pub fn crop(
        &self,
        bounds: &Self,
        canvas_pos: IntVector2,
        bounds_pos: IntVector2,
        value: P,
    ) -> bool {
        let world_bounds = bounds.world_rect(bounds_pos);
        let world_canvas = self.world_rect(canvas_pos);

        let active = world_bounds.intersect(&world_canvas);
        if active.width() < 1 || active.height() < 1 {
            return false;
        }

        let keep = active.moved(self.rect.min() - world_canvas.min());

        let mut buffer = self.buffer.borrow_mut();
        for y in self.rect.y_min..self.rect.y_max {
            for x in self.rect.x_min..self.rect.x_max {
                if !keep.contains(x, y) {
                    buffer.set_pixel(x, y, value);
                }
            }
        }

        true
    }

    /// Fill the footprint with `value`.
    pub fn clear(&self, value: P) {
        self.buffer.borrow_mut().clear_rect(value, self.rect);
    }

    /// Pixel at `(x, y)` relative to the pivot, or `default` outside the
    /// footprint.
    #[must_use]
    pub fn get_pixel(&self, x: i32, y: i32, default: P) -> P {
        let x = x + self.rect.x_min + self.pivot.x;
        let y = y + self.rect.y_min + self.pivot.y;

        if self.rect.contains(x, y) {
            self.buffer.borrow().get_pixel(x, y)
        } else {
            default
        }
    }

    /// Set the pixel at `(x, y)` relative to the pivot. Returns false and
    /// does nothing outside the footprint.
    pub fn set_pixel(&self, x: i32, y: i32, value: P) -> bool {
        self.set_local(x + self.pivot.x, y + self.pivot.y, value)
    }

    /// Set the pixel at `(x, y)` relative to the footprint's bottom-left.
    /// Returns false and does nothing outside the footprint.
    pub fn set_pixel_absolute(&self, x: i32, y: i32, value: P) -> bool {
        self.set_local(x, y, value)
    }

    /// Copy of the footprint's pixels, row-major.
    #[must_use]
    pub fn get_pixels(&self) -> Vec<P> {
        self.buffer.borrow().get_pixels_rect(self.rect)
    }

    /// Copy the footprint's pixels into `out`.
    pub fn get_pixels_into(&self, out: &mut [P]) -> Result<()> {
        self.buffer.borrow().get_pixels_rect_into(self.rect, out)
    }

    /// Overwrite the footprint from a row-major slice of its size.
    pub fn set_pixels(&self, pixels: &[P]) -> Result<()> {
        self.buffer.borrow_mut().set_pixels_rect(self.rect, pixels)
    }

    /// Flush the backing buffer to `sink`. See [`PixelBuffer::apply`].
    pub fn apply<S>(&self, sink: &mut S)
    where
        S: DisplaySink<P> + ?Sized,
    {
        self.buffer.borrow_mut().apply(sink);
    }

    /// Run `f` with shared access to the backing buffer.
    pub fn with_buffer<R>(&self, f: impl FnOnce(&PixelBuffer<P>) -> R) -> R {
        f(&self.buffer.borrow())
    }

    fn world_rect(&self, position: IntVector2) -> IntRect {
        IntRect::from_origin_size(position - self.pivot, self.rect.width(), self.rect.height())
    }

    fn set_local(&self, x: i32, y: i32, value: P) -> bool {
        let x = x + self.rect.x_min;
        let y = y + self.rect.y_min;

        if self.rect.contains(x, y) {
            self.buffer.borrow_mut().set_pixel(x, y, value);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend;
    use crate::color::{Rgba, RgbaF};

    fn sprite(w: i32, h: i32, pivot: IntVector2) -> Sprite<u8> {
        Sprite::full(PixelBuffer::shared(w, h).unwrap(), pivot)
    }

    #[test]
    fn test_full_sprite_covers_buffer() {
        let s = sprite(5, 3, IntVector2::new(1, 1));
        assert_eq!(s.rect(), IntRect::new(0, 0, 5, 3));
        assert_eq!(s.width(), 5);
        assert_eq!(s.height(), 3);
    }

    #[test]
    fn test_pixel_access_is_pivot_relative() {
        let buffer = PixelBuffer::<u8>::shared(8, 8).unwrap();
        let s = Sprite::new(buffer.clone(), IntRect::new(2, 2, 4, 4), IntVector2::new(1, 1));

        assert!(s.set_pixel(0, 0, 9));
        assert_eq!(buffer.borrow().get_pixel(3, 3), 9);
        assert_eq!(s.get_pixel(0, 0, 0), 9);

        assert!(s.set_pixel_absolute(0, 0, 7));
        assert_eq!(buffer.borrow().get_pixel(2, 2), 7);
        assert_eq!(s.get_pixel(-1, -1, 0), 7);

        assert!(!s.set_pixel(3, 0, 1));
        assert!(!s.set_pixel_absolute(4, 0, 1));
        assert_eq!(s.get_pixel(-2, 0, 42), 42);
    }

    #[test]
    fn test_blend_at_pivots() {
        let canvas = sprite(10, 10, IntVector2::ZERO);
        let brush = sprite(3, 3, IntVector2::new(1, 1));
        brush.clear(255);

        assert!(canvas.blend_at(&brush, blend::copy, IntVector2::ZERO, IntVector2::new(5, 5)));

        let px = canvas.get_pixels();
        let set: Vec<_> = (0..100).filter(|&i| px[i] == 255).map(|i| (i % 10, i / 10)).collect();
        assert_eq!(set.len(), 9);
        assert!(set.contains(&(4, 4)));
        assert!(set.contains(&(6, 6)));
    }

    #[test]
    fn test_blend_clips_to_canvas() {
        let canvas = sprite(4, 4, IntVector2::ZERO);
        let brush = sprite(3, 3, IntVector2::ZERO);
        brush.clear(1);

        assert!(canvas.blend_at(&brush, blend::copy, IntVector2::ZERO, IntVector2::new(-1, 2)));
        assert_eq!(canvas.get_pixels().iter().filter(|&&p| p == 1).count(), 4);
    }

    #[test]
    fn test_blend_no_overlap_is_untouched() {
        let canvas = sprite(4, 4, IntVector2::ZERO);
        let brush = sprite(2, 2, IntVector2::ZERO);
        brush.clear(1);

        assert!(!canvas.blend_at(&brush, blend::copy, IntVector2::ZERO, IntVector2::new(4, 0)));
        assert!(!canvas.blend_at(&brush, blend::copy, IntVector2::ZERO, IntVector2::new(-2, -2)));
        assert!(canvas.get_pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_blend_between_views_of_one_buffer() {
        let buffer = PixelBuffer::<RgbaF>::shared(4, 2).unwrap();
        let left = Sprite::new(buffer.clone(), IntRect::new(0, 0, 2, 2), IntVector2::ZERO);
        let right = Sprite::new(buffer.clone(), IntRect::new(2, 0, 2, 2), IntVector2::ZERO);
        right.clear(RgbaF::RED);

        assert!(left.shares_buffer(&right));
        assert!(left.blend(&right, blend::rgbaf::alpha));
        assert!(left.get_pixels().iter().all(|&p| p == RgbaF::RED));
    }

    #[test]
    fn test_crop_outside_bounds() {
        let canvas = sprite(4, 4, IntVector2::ZERO);
        canvas.clear(5);
        let bounds = sprite(2, 2, IntVector2::ZERO);

        assert!(canvas.crop(&bounds, IntVector2::ZERO, IntVector2::new(1, 1), 0));
        let px = canvas.get_pixels();
        assert_eq!(px.iter().filter(|&&p| p == 5).count(), 4);
        assert_eq!(canvas.get_pixel(1, 1, 0), 5);
        assert_eq!(canvas.get_pixel(2, 2, 0), 5);
        assert_eq!(canvas.get_pixel(0, 0, 9), 0);

        assert!(!canvas.crop(&bounds, IntVector2::ZERO, IntVector2::new(10, 10), 0));
    }

    #[test]
    fn test_sub_rect_pixels_round_trip() {
        let buffer = PixelBuffer::<Rgba>::shared(6, 6).unwrap();
        let s = Sprite::new(buffer.clone(), IntRect::new(1, 2, 2, 3), IntVector2::ZERO);

        let data = vec![Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::WHITE, Rgba::BLACK, Rgba::RED];
        s.set_pixels(&data).unwrap();
        assert_eq!(s.get_pixels(), data);
        assert_eq!(buffer.borrow().get_pixel(2, 2), Rgba::GREEN);

        let mut out = vec![Rgba::TRANSPARENT; 6];
        s.get_pixels_into(&mut out).unwrap();
        assert_eq!(out, data);
        assert!(s.set_pixels(&data[..5]).is_err());
    }

    #[test]
    fn test_apply_flushes_backing_buffer() {
        use crate::output::Rgba8Surface;

        let s = sprite(2, 2, IntVector2::ZERO);
        let mut surface = Rgba8Surface::new();
        s.set_pixel(1, 0, 128);
        s.apply(&mut surface);
        assert_eq!(surface.uploads(), 1);
        assert!(!s.with_buffer(|b| b.is_dirty()));
    }
}
