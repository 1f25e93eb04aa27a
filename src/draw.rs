//! Brush engine.
//!
//! [`DrawTools`] builds brush sprites (discs, rectangles, swept lines),
//! transforms sprites (quarter turns, shears, arbitrary rotation) and keeps a
//! free list of scratch sprites so repeated drawing does not reallocate.
//!
//! Every operation that produces a sprite takes it from the pool. Hand it
//! back with [`DrawTools::free_sprite`] once it is no longer needed; pooled
//! sprites are not cleared, so their old pixels stay until overwritten.
//!
//! # Example
//!
//! ```
//! use sprite_raster::prelude::*;
//!
//! let mut tools = DrawTools::<RgbaF>::default();
//! let canvas = tools.get_sprite(64, 64, IntVector2::ZERO).unwrap();
//! canvas.clear(RgbaF::WHITE);
//!
//! tools
//!     .draw_line(
//!         &canvas,
//!         IntVector2::new(8, 4),
//!         IntVector2::new(40, 30),
//!         RgbaF::RED,
//!         3,
//!         blend::rgbaf::alpha,
//!     )
//!     .unwrap();
//! assert_eq!(canvas.get_pixel(8, 4, RgbaF::CLEAR), RgbaF::RED);
//! ```

use crate::blend::{self, BlendFn};
use crate::bresenham::BresenhamLine;
use crate::buffer::{PixelBuffer, SharedBuffer};
use crate::color::Pixel;
use crate::error::{Error, Result};
use crate::geometry::{IntRect, IntVector2};
use crate::sprite::Sprite;
use std::f32::consts::{FRAC_PI_2, TAU};
use tracing::{debug, trace};

/// Default size floor for freshly allocated pool buffers.
pub const DEFAULT_MIN_TEXTURE_SIZE: i32 = 256;

// ============================================================================
// Configuration
// ============================================================================

/// Pool settings for a [`DrawTools`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawConfig {
    /// Smallest width and height of a newly allocated backing buffer.
    pub min_texture_size: i32,
    /// Most sprites kept on the free list. `None` keeps all of them.
    pub max_pooled: Option<usize>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            min_texture_size: DEFAULT_MIN_TEXTURE_SIZE,
            max_pooled: None,
        }
    }
}

impl DrawConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backing buffer size floor.
    #[must_use]
    pub const fn min_texture_size(mut self, size: i32) -> Self {
        self.min_texture_size = size;
        self
    }

    /// Cap the free list.
    #[must_use]
    pub const fn max_pooled(mut self, max: usize) -> Self {
        self.max_pooled = Some(max);
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `min_texture_size` is not
    /// positive.
    pub fn validate(&self) -> Result<()> {
        Error::check_dimensions(self.min_texture_size, self.min_texture_size)
    }
}

// ============================================================================
// DrawTools
// ============================================================================

/// Brush engine with its own sprite pool.
#[derive(Debug)]
pub struct DrawTools<P: Pixel> {
    pool: Vec<Sprite<P>>,
    mask: BlendFn<P>,
    transparent: P,
    config: DrawConfig,
}

impl<P: Pixel> Default for DrawTools<P> {
    fn default() -> Self {
        Self::new(blend::mask, P::TRANSPARENT)
    }
}

impl<P: Pixel> DrawTools<P> {
    /// Create an engine that builds line brushes with `mask` over
    /// `transparent`.
    #[must_use]
    pub fn new(mask: BlendFn<P>, transparent: P) -> Self {
        Self {
            pool: Vec::new(),
            mask,
            transparent,
            config: DrawConfig::default(),
        }
    }

    /// Create an engine with custom pool settings.
    pub fn with_config(mask: BlendFn<P>, transparent: P, config: DrawConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::new(mask, transparent)
        })
    }

    /// Pool settings.
    #[must_use]
    pub const fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Number of sprites waiting on the free list.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    // ------------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------------

    /// Allocate a standalone buffer.
    pub fn create_texture(&self, width: i32, height: i32) -> Result<SharedBuffer<P>> {
        PixelBuffer::shared(width, height)
    }

    /// Allocate a new sprite of `width` x `height` on a fresh buffer at least
    /// `min_texture_size` on each side.
    pub fn create_sprite(&self, width: i32, height: i32, pivot: IntVector2) -> Result<Sprite<P>> {
        Error::check_dimensions(width, height)?;

        let floor = self.config.min_texture_size;
        let buffer = self.create_texture(width.max(floor), height.max(floor))?;

        debug!(
            width,
            height,
            buffer_width = width.max(floor),
            buffer_height = height.max(floor),
            "allocated sprite buffer"
        );

        Ok(Sprite::new(buffer, IntRect::new(0, 0, width, height), pivot))
    }

    /// Take a sprite of `width` x `height` from the pool, or allocate one.
    ///
    /// The first pooled sprite whose buffer is large enough is reused with
    /// its footprint reset to `(0, 0, width, height)`. Its pixels are left as
    /// they were.
    pub fn get_sprite(&mut self, width: i32, height: i32, pivot: IntVector2) -> Result<Sprite<P>> {
        Error::check_dimensions(width, height)?;

        let fits = self.pool.iter().position(|sprite| {
            let buffer = sprite.buffer().borrow();
            buffer.width() >= width && buffer.height() >= height
        });

        match fits {
            Some(index) => {
                let mut sprite = self.pool.remove(index);
                sprite.set_rect(IntRect::new(0, 0, width, height));
                sprite.set_pivot(pivot);
                trace!(width, height, pooled = self.pool.len(), "reused pooled sprite");
                Ok(sprite)
            }
            None => self.create_sprite(width, height, pivot),
        }
    }

    /// Return a sprite to the pool.
    ///
    /// Pixels are kept, but any display resource is dropped: whoever takes
    /// the buffer next allocates on their own sink at the first `apply`.
    pub fn free_sprite(&mut self, sprite: Sprite<P>) {
        sprite.buffer().borrow_mut().detach_display();

        if self.config.max_pooled.is_some_and(|max| self.pool.len() >= max) {
            trace!(pooled = self.pool.len(), "pool full, dropping sprite");
            return;
        }

        self.pool.push(sprite);
        trace!(pooled = self.pool.len(), "released sprite to pool");
    }

    // ------------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------------

    /// Pooled copy of `src` with the same size and pivot.
    pub fn copy(&mut self, src: &Sprite<P>) -> Result<Sprite<P>> {
        let dst = self.get_sprite(src.width(), src.height(), src.pivot())?;
        dst.blend(src, blend::copy);
        Ok(dst)
    }

    /// `src` turned a quarter counter-clockwise.
    ///
    /// A `w` x `h` sprite becomes `h` x `w`; pixel `(x, y)` moves to
    /// `(h - 1 - y, x)` and so does the pivot.
    pub fn rotated_quarter(&mut self, src: &Sprite<P>) -> Result<Sprite<P>> {
        let s = src.rect();
        let dst_width = s.height();
        let dst_height = s.width();
        let pivot = src.pivot();

        let dst = self.get_sprite(
            dst_width,
            dst_height,
            IntVector2::new(dst_width - 1 - pivot.y, pivot.x),
        )?;
        let d = dst.rect();

        {
            let src_buffer = src.buffer().borrow();
            let mut dst_buffer = dst.buffer().borrow_mut();

            for rsy in 0..s.height() {
                for rsx in 0..s.width() {
                    let value = src_buffer.get_pixel(s.x_min + rsx, s.y_min + rsy);
                    dst_buffer.set_pixel(d.x_min + dst_width - 1 - rsy, d.y_min + rsx, value);
                }
            }
        }

        Ok(dst)
    }

    /// Pooled copy of `src` turned `turns` quarters counter-clockwise.
    ///
    /// Negative turns go clockwise.
    pub fn rotated_quarters(&mut self, src: &Sprite<P>, turns: i32) -> Result<Sprite<P>> {
        let mut current = self.copy(src)?;

        for _ in 0..turns.rem_euclid(4) {
            let next = self.rotated_quarter(&current)?;
            self.free_sprite(current);
            current = next;
        }

        Ok(current)
    }

    /// Skew each row of `src` sideways by `shear` pixels per row.
    ///
    /// Row `i` moves `trunc(|shear| * i + 0.5)` pixels, right for positive
    /// shear and left for negative. The result is wide enough for the
    /// largest skew; uncovered pixels are `background`.
    pub fn shear_x(&mut self, src: &Sprite<P>, shear: f32, background: P) -> Result<Sprite<P>> {
        let s = src.rect();
        let shape = Skew::new(shear, s.height());
        let pivot = src.pivot();

        let dst = self.get_sprite(
            s.width() + shape.extent,
            s.height(),
            IntVector2::new(pivot.x + shape.offset(pivot.y), pivot.y),
        )?;
        dst.clear(background);
        let d = dst.rect();

        {
            let src_buffer = src.buffer().borrow();
            let mut dst_buffer = dst.buffer().borrow_mut();

            for rsy in 0..s.height() {
                let skew = shape.offset(rsy);
                for rsx in 0..s.width() {
                    let value = src_buffer.get_pixel(s.x_min + rsx, s.y_min + rsy);
                    dst_buffer.set_pixel(d.x_min + rsx + skew, d.y_min + rsy, value);
                }
            }
        }

        Ok(dst)
    }

    /// Skew each column of `src` vertically by `shear` pixels per column.
    ///
    /// The transpose of [`shear_x`](Self::shear_x): positive shear moves
    /// columns up.
    pub fn shear_y(&mut self, src: &Sprite<P>, shear: f32, background: P) -> Result<Sprite<P>> {
        let s = src.rect();
        let shape = Skew::new(shear, s.width());
        let pivot = src.pivot();

        let dst = self.get_sprite(
            s.width(),
            s.height() + shape.extent,
            IntVector2::new(pivot.x, pivot.y + shape.offset(pivot.x)),
        )?;
        dst.clear(background);
        let d = dst.rect();

        {
            let src_buffer = src.buffer().borrow();
            let mut dst_buffer = dst.buffer().borrow_mut();

            for rsx in 0..s.width() {
                let skew = shape.offset(rsx);
                for rsy in 0..s.height() {
                    let value = src_buffer.get_pixel(s.x_min + rsx, s.y_min + rsy);
                    dst_buffer.set_pixel(d.x_min + rsx, d.y_min + rsy + skew, value);
                }
            }
        }

        Ok(dst)
    }

    /// `src` rotated counter-clockwise by `radians`.
    ///
    /// The angle is split into whole quarter turns plus a residual in
    /// `(-pi/4, pi/4]`, which is applied as three shears (Paeth). Pixels
    /// uncovered by the shears are `background`.
    pub fn rotated(&mut self, src: &Sprite<P>, radians: f32, background: P) -> Result<Sprite<P>> {
        let angle = radians.rem_euclid(TAU);

        let mut turns = (angle / FRAC_PI_2).floor() as i32 % 4;
        let mut residual = angle % FRAC_PI_2;

        if residual > FRAC_PI_2 * 0.5 {
            residual -= FRAC_PI_2;
            turns = (turns + 1) % 4;
        }

        let alpha = -(residual / 2.0).tan();
        let beta = residual.sin();

        debug!(radians, turns, residual, alpha, beta, "decomposed rotation");

        let turned = self.rotated_quarters(src, turns)?;
        let first = self.shear_x(&turned, alpha, background)?;
        self.free_sprite(turned);
        let second = self.shear_y(&first, beta, background)?;
        self.free_sprite(first);
        let third = self.shear_x(&second, alpha, background)?;
        self.free_sprite(second);

        Ok(third)
    }

    // ------------------------------------------------------------------------
    // Sweeps
    // ------------------------------------------------------------------------

    /// Stamp `brush` at every point of the line from `start` to `end`.
    ///
    /// The result is a pooled sprite just large enough for the stroke,
    /// cleared to `background`, whose pivot sits at world origin when
    /// `start` and `end` are read as world positions.
    pub fn sweep<F>(
        &mut self,
        brush: &Sprite<P>,
        start: IntVector2,
        end: IntVector2,
        blend: F,
        background: P,
    ) -> Result<Sprite<P>>
    where
        F: Fn(P, P) -> P,
    {
        let mut offset = 0;
        self.sweep_stippled(brush, start, end, blend, 1, &mut offset, background)
    }

    /// [`sweep`](Self::sweep) stamping only every `stride`th sample.
    ///
    /// `offset` is the stipple phase on entry and is advanced by the line's
    /// length, so consecutive segments of a polyline keep one rhythm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `stride` is not positive.
    #[allow(clippy::too_many_arguments)]
    pub fn sweep_stippled<F>(
        &mut self,
        brush: &Sprite<P>,
        start: IntVector2,
        end: IntVector2,
        blend: F,
        stride: i32,
        offset: &mut i32,
        background: P,
    ) -> Result<Sprite<P>>
    where
        F: Fn(P, P) -> P,
    {
        check_stride(stride)?;

        let width = (end.x - start.x).abs() + brush.width();
        let height = (end.y - start.y).abs() + brush.height();

        let mut accumulator = self.get_sprite(width, height, IntVector2::ZERO)?;
        accumulator.clear(background);

        *offset = Self::sweep_into(&mut accumulator, brush, start, end, blend, stride, *offset)?;

        Ok(accumulator)
    }

    /// Stamp `brush` along a line into an existing `accumulator`.
    ///
    /// Sets the accumulator's pivot so that world positions line up, then
    /// stamps every Bresenham sample whose stipple counter is a multiple of
    /// `stride`. The counter runs from `offset` in the direction of travel.
    /// Returns `offset` plus the line's major-axis length.
    pub fn sweep_into<F>(
        accumulator: &mut Sprite<P>,
        brush: &Sprite<P>,
        start: IntVector2,
        end: IntVector2,
        blend: F,
        stride: i32,
        offset: i32,
    ) -> Result<i32>
    where
        F: Fn(P, P) -> P,
    {
        check_stride(stride)?;

        accumulator.set_pivot(brush.pivot() - start.min(end));

        let line = BresenhamLine::new(start, end);
        let last = offset + line.major_length();

        // samples come out in ascending order, so a reversed line counts down
        let (mut counter, step) = if line.is_reversed() { (last, -1) } else { (offset, 1) };

        for sample in line {
            if counter.rem_euclid(stride) == 0 {
                accumulator.blend_at(brush, &blend, IntVector2::ZERO, sample);
            }
            counter += step;
        }

        Ok(last)
    }

    // ------------------------------------------------------------------------
    // Brushes
    // ------------------------------------------------------------------------

    /// A filled disc of `diameter` pixels, pivot at its center.
    pub fn circle(&mut self, diameter: i32, color: P) -> Result<Sprite<P>> {
        let mut circle = self.get_sprite(diameter, diameter, IntVector2::ZERO)?;
        circle.clear(self.transparent);
        rasterize_disc(&mut circle, diameter, color);
        Ok(circle)
    }

    /// Draw a disc centered on `center`.
    ///
    /// Returns whether anything landed on the canvas.
    pub fn draw_circle<F>(
        &mut self,
        canvas: &Sprite<P>,
        center: IntVector2,
        color: P,
        diameter: i32,
        blend: F,
    ) -> Result<bool>
    where
        F: Fn(P, P) -> P,
    {
        let brush = self.circle(diameter, color)?;
        let drawn = canvas.blend_at(&brush, blend, IntVector2::ZERO, center);
        self.free_sprite(brush);
        Ok(drawn)
    }

    /// A solid rectangle.
    pub fn rectangle(
        &mut self,
        width: i32,
        height: i32,
        color: P,
        pivot: IntVector2,
    ) -> Result<Sprite<P>> {
        let rect = self.get_sprite(width, height, pivot)?;
        rect.clear(color);
        Ok(rect)
    }

    /// Fill `rect`, in canvas world coordinates.
    pub fn draw_rectangle<F>(
        &mut self,
        canvas: &Sprite<P>,
        rect: IntRect,
        color: P,
        blend: F,
    ) -> Result<bool>
    where
        F: Fn(P, P) -> P,
    {
        let brush = self.rectangle(rect.width(), rect.height(), color, IntVector2::ZERO)?;
        let drawn = canvas.blend_at(&brush, blend, IntVector2::ZERO, rect.min());
        self.free_sprite(brush);
        Ok(drawn)
    }

    /// A round-capped stroke from `start` to `end`, `thickness` pixels wide,
    /// over a transparent background.
    pub fn line(
        &mut self,
        start: IntVector2,
        end: IntVector2,
        color: P,
        thickness: i32,
    ) -> Result<Sprite<P>> {
        let radius = (thickness - 1) / 2;
        let mut brush = self.get_sprite(thickness, thickness, IntVector2::new(radius, radius))?;
        brush.clear(self.transparent);
        rasterize_disc(&mut brush, thickness, color);

        let stroke = self.sweep(&brush, start, end, self.mask, self.transparent);
        self.free_sprite(brush);

        stroke
    }

    /// Draw a stroke onto `canvas`.
    pub fn draw_line<F>(
        &mut self,
        canvas: &Sprite<P>,
        start: IntVector2,
        end: IntVector2,
        color: P,
        thickness: i32,
        blend: F,
    ) -> Result<bool>
    where
        F: Fn(P, P) -> P,
    {
        let brush = self.line(start, end, color, thickness)?;
        let drawn = canvas.blend(&brush, blend);
        self.free_sprite(brush);
        Ok(drawn)
    }
}

fn check_stride(stride: i32) -> Result<()> {
    Error::check_dimensions(stride, stride)
}

/// Per-row (or per-column) displacement of a shear.
struct Skew {
    amount: f32,
    sign: i32,
    push: i32,
    extent: i32,
}

impl Skew {
    fn new(shear: f32, lines: i32) -> Self {
        let amount = shear.abs();
        let extent = Self::raw(amount, (lines - 1).max(0));
        let negative = shear < 0.0;

        Self {
            amount,
            sign: if negative { -1 } else { 1 },
            push: if negative { extent } else { 0 },
            extent,
        }
    }

    fn raw(amount: f32, line: i32) -> i32 {
        (amount * line as f32 + 0.5) as i32
    }

    fn offset(&self, line: i32) -> i32 {
        Self::raw(self.amount, line) * self.sign + self.push
    }
}

/// Midpoint disc fill into the bottom-left `diameter` x `diameter` of
/// `sprite`. Even diameters get an extra column and row so the disc stays
/// symmetric; the pivot lands on `(radius, radius)`.
fn rasterize_disc<P: Pixel>(sprite: &mut Sprite<P>, diameter: i32, value: P) {
    let radius = (diameter - 1) / 2;
    let band = i32::from(diameter % 2 == 0);
    let center = radius;

    let mut x = radius;
    let mut y = 0;
    let mut error = 1 - x;

    while x >= y {
        let y_band = if y > 0 { band } else { 0 };
        let x_band = if x > 0 { band } else { 0 };

        for i in (center - x)..=(center + x + band) {
            sprite.set_pixel_absolute(i, center + y + y_band, value);
            sprite.set_pixel_absolute(i, center - y, value);
        }

        for i in (center - y)..=(center + y + band) {
            sprite.set_pixel_absolute(i, center + x + x_band, value);
            sprite.set_pixel_absolute(i, center - x, value);
        }

        y += 1;

        if error < 0 {
            error += 2 * y + 1;
        } else {
            x -= 1;
            error += 2 * (y - x) + 1;
        }
    }

    if band > 0 {
        for i in 0..diameter {
            sprite.set_pixel_absolute(i, center + 1, value);
        }
    }

    sprite.set_pivot(IntVector2::new(radius, radius));
}
