//! Managed pixel buffers.
//!
//! A [`PixelBuffer`] owns a row-major array of pixels and remembers whether
//! it changed since it was last flushed to a display. All sprite-to-sprite
//! compositing in the crate bottoms out in [`PixelBuffer::blend`].
//!
//! # Coordinates
//!
//! Pixel `(x, y)` lives at index `y * width + x`. Row 0 is the bottom row.
//!
//! # Bounds
//!
//! The plain accessors ([`get_pixel`](PixelBuffer::get_pixel),
//! [`set_pixel`](PixelBuffer::set_pixel), the rect operations) do not check
//! that coordinates lie inside the buffer beyond a `debug_assert!`; callers
//! guarantee it. [`try_get_pixel`](PixelBuffer::try_get_pixel) and
//! [`try_set_pixel`](PixelBuffer::try_set_pixel) are the checked variants.

use crate::color::{Pixel, Rgba};
use crate::error::{Error, Result};
use crate::geometry::IntRect;
use crate::output::DisplaySink;
use std::cell::RefCell;
use std::rc::Rc;

/// A pixel buffer shared between sprites.
///
/// Sprites are views, so several of them may point at one buffer. The
/// `RefCell` turns accidental nested mutable access into a panic and the
/// `Rc` keeps the handle on one thread.
pub type SharedBuffer<P> = Rc<RefCell<PixelBuffer<P>>>;

/// Row-major pixel storage with dirty tracking.
#[derive(Debug, Clone)]
pub struct PixelBuffer<P> {
    width: i32,
    height: i32,
    pixels: Vec<P>,
    /// Modified since the last flush.
    dirty: bool,
    /// A display resource of the current size exists.
    display_current: bool,
}

impl<P: Pixel> PixelBuffer<P> {
    /// Create a buffer of default-valued pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if width or height is not positive.
    ///
    /// # Example
    ///
    /// ```
    /// use sprite_raster::buffer::PixelBuffer;
    /// use sprite_raster::color::Rgba;
    ///
    /// let buffer = PixelBuffer::<Rgba>::new(800, 600).unwrap();
    /// assert_eq!(buffer.width(), 800);
    /// assert!(buffer.is_dirty());
    /// ```
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Error::check_dimensions(width, height)?;

        Ok(Self {
            width,
            height,
            pixels: vec![P::default(); width as usize * height as usize],
            dirty: true,
            display_current: false,
        })
    }

    /// Create a buffer and wrap it for sharing between sprites.
    pub fn shared(width: i32, height: i32) -> Result<SharedBuffer<P>> {
        Ok(Self::new(width, height)?.into_shared())
    }

    /// Wrap this buffer for sharing between sprites.
    #[must_use]
    pub fn into_shared(self) -> SharedBuffer<P> {
        Rc::new(RefCell::new(self))
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Get the total number of pixels.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// The rect covering the whole buffer.
    #[must_use]
    pub const fn rect(&self) -> IntRect {
        IntRect::new(0, 0, self.width, self.height)
    }

    /// True if pixels changed since the last [`apply`](Self::apply).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// All pixels, row-major, for direct editing. Marks the buffer dirty.
    pub fn pixels_mut(&mut self) -> &mut [P] {
        self.dirty = true;
        &mut self.pixels
    }

    /// Change dimensions. Erases all pixel data and invalidates the display
    /// resource, so the next [`apply`](Self::apply) reallocates it.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        Error::check_dimensions(width, height)?;

        self.width = width;
        self.height = height;
        self.pixels = vec![P::default(); width as usize * height as usize];
        self.dirty = true;
        self.display_current = false;

        Ok(())
    }

    /// Overwrite every pixel with `value`.
    pub fn clear(&mut self, value: P) {
        self.pixels.fill(value);
        self.dirty = true;
    }

    /// Overwrite every pixel inside `rect` with `value`.
    pub fn clear_rect(&mut self, value: P, rect: IntRect) {
        if rect.is_empty() {
            return;
        }
        self.debug_assert_within(rect);

        let w = rect.width() as usize;
        for y in rect.y_min..rect.y_max {
            let start = self.index(rect.x_min, y);
            self.pixels[start..start + w].fill(value);
        }

        self.dirty = true;
    }

    /// Pixel at `(x, y)`. Coordinates must be in range.
    #[must_use]
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> P {
        self.pixels[self.index(x, y)]
    }

    /// Overwrite the pixel at `(x, y)`. Coordinates must be in range.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, value: P) {
        let i = self.index(x, y);
        self.pixels[i] = value;
        self.dirty = true;
    }

    /// Pixel at `(x, y)`, or [`Error::OutOfBounds`].
    pub fn try_get_pixel(&self, x: i32, y: i32) -> Result<P> {
        self.check_bounds(x, y)?;
        Ok(self.get_pixel(x, y))
    }

    /// Overwrite the pixel at `(x, y)`, or fail with [`Error::OutOfBounds`].
    pub fn try_set_pixel(&mut self, x: i32, y: i32, value: P) -> Result<()> {
        self.check_bounds(x, y)?;
        self.set_pixel(x, y, value);
        Ok(())
    }

    /// Copy the pixels of `rect` into a new row-major vector.
    #[must_use]
    pub fn get_pixels_rect(&self, rect: IntRect) -> Vec<P> {
        let mut copy = vec![P::default(); rect.area()];
        self.copy_rows_out(rect, &mut copy);
        copy
    }

    /// Copy the pixels of `rect` into `out`, which must hold exactly
    /// `rect.area()` pixels.
    pub fn get_pixels_rect_into(&self, rect: IntRect, out: &mut [P]) -> Result<()> {
        Error::check_len(rect.area(), out.len())?;
        self.copy_rows_out(rect, out);
        Ok(())
    }

    /// Overwrite every pixel from a row-major slice of the same length.
    pub fn set_pixels(&mut self, pixels: &[P]) -> Result<()> {
        Error::check_len(self.pixels.len(), pixels.len())?;

        self.pixels.copy_from_slice(pixels);
        self.dirty = true;

        Ok(())
    }

    /// Overwrite the pixels of `rect` from a row-major slice of
    /// `rect.area()` pixels.
    pub fn set_pixels_rect(&mut self, rect: IntRect, pixels: &[P]) -> Result<()> {
        Error::check_len(rect.area(), pixels.len())?;
        if rect.is_empty() {
            return Ok(());
        }
        self.debug_assert_within(rect);

        let w = rect.width() as usize;
        for (row, src) in pixels.chunks_exact(w).enumerate() {
            let start = self.index(rect.x_min, rect.y_min + row as i32);
            self.pixels[start..start + w].copy_from_slice(src);
        }

        self.dirty = true;

        Ok(())
    }

    /// Blend the pixels of `src_rect` in `src` onto `dst_rect` of this buffer.
    ///
    /// Every pixel `p` of `dst_rect` becomes `blend(self[p], src[p + offset])`
    /// where `offset = src_rect.min() - dst_rect.min()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the rects differ in width or height.
    pub fn blend<F>(
        &mut self,
        src: &Self,
        blend: F,
        dst_rect: IntRect,
        src_rect: IntRect,
    ) -> Result<()>
    where
        F: Fn(P, P) -> P,
    {
        Self::check_same_shape(dst_rect, src_rect)?;
        if dst_rect.is_empty() {
            return Ok(());
        }
        self.debug_assert_within(dst_rect);
        src.debug_assert_within(src_rect);

        let w = dst_rect.width() as usize;
        for row in 0..dst_rect.height() {
            let di = self.index(dst_rect.x_min, dst_rect.y_min + row);
            let si = src.index(src_rect.x_min, src_rect.y_min + row);

            let dst_row = &mut self.pixels[di..di + w];
            let src_row = &src.pixels[si..si + w];

            for (canvas, &brush) in dst_row.iter_mut().zip(src_row) {
                *canvas = blend(*canvas, brush);
            }
        }

        self.dirty = true;

        Ok(())
    }

    /// [`blend`](Self::blend) where source and destination are regions of
    /// this same buffer.
    ///
    /// Pixels are visited bottom row first, left to right, so overlapping
    /// regions see pixels already written earlier in the pass.
    pub fn blend_within<F>(&mut self, blend: F, dst_rect: IntRect, src_rect: IntRect) -> Result<()>
    where
        F: Fn(P, P) -> P,
    {
        Self::check_same_shape(dst_rect, src_rect)?;
        if dst_rect.is_empty() {
            return Ok(());
        }
        self.debug_assert_within(dst_rect);
        self.debug_assert_within(src_rect);

        let dx = src_rect.x_min - dst_rect.x_min;
        let dy = src_rect.y_min - dst_rect.y_min;

        for y in dst_rect.y_min..dst_rect.y_max {
            for x in dst_rect.x_min..dst_rect.x_max {
                let ci = self.index(x, y);
                let bi = self.index(x + dx, y + dy);
                self.pixels[ci] = blend(self.pixels[ci], self.pixels[bi]);
            }
        }

        self.dirty = true;

        Ok(())
    }

    /// Flush to a display sink if anything changed.
    ///
    /// The first call (and the first after a [`resize`](Self::resize))
    /// allocates the display resource and always uploads. Later calls upload
    /// only when the buffer is dirty, so repeated calls are free.
    pub fn apply<S>(&mut self, sink: &mut S)
    where
        S: DisplaySink<P> + ?Sized,
    {
        if !self.display_current {
            sink.allocate(self.width as u32, self.height as u32);
            self.display_current = true;
            self.dirty = true;
        }

        if self.dirty {
            sink.upload(self.width as u32, self.height as u32, &self.pixels);
            self.dirty = false;
        }
    }

    /// Release the display resource, if one was allocated.
    pub fn dispose<S>(&mut self, sink: &mut S)
    where
        S: DisplaySink<P> + ?Sized,
    {
        if self.display_current {
            sink.release();
            self.display_current = false;
        }
    }

    /// Forget the display resource without a sink, so the next
    /// [`apply`](Self::apply) allocates and uploads from scratch.
    pub(crate) fn detach_display(&mut self) {
        self.display_current = false;
        self.dirty = true;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            x >= 0 && x < self.width && y >= 0 && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<()> {
        if self.rect().contains(x, y) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn check_same_shape(a: IntRect, b: IntRect) -> Result<()> {
        if a.width() != b.width() || a.height() != b.height() {
            return Err(Error::SizeMismatch {
                expected: a.area(),
                actual: b.area(),
            });
        }
        Ok(())
    }

    fn debug_assert_within(&self, rect: IntRect) {
        debug_assert!(
            rect.x_min >= 0
                && rect.y_min >= 0
                && rect.x_max <= self.width
                && rect.y_max <= self.height,
            "rect {rect} outside {}x{} buffer",
            self.width,
            self.height
        );
    }

    fn copy_rows_out(&self, rect: IntRect, out: &mut [P]) {
        if rect.is_empty() {
            return;
        }
        self.debug_assert_within(rect);

        let w = rect.width() as usize;
        for (row, dst) in out.chunks_exact_mut(w).enumerate() {
            let start = self.index(rect.x_min, rect.y_min + row as i32);
            dst.copy_from_slice(&self.pixels[start..start + w]);
        }
    }
}

impl PixelBuffer<u8> {
    /// Overwrite every pixel with the alpha channel of `colors`.
    pub fn set_pixels_from_rgba(&mut self, colors: &[Rgba]) -> Result<()> {
        Error::check_len(self.pixels.len(), colors.len())?;

        for (dst, color) in self.pixels.iter_mut().zip(colors) {
            *dst = color.a;
        }
        self.dirty = true;

        Ok(())
    }
}
