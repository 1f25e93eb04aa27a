//! Blend functions.
//!
//! A blend function combines the pixel already on a canvas with the pixel
//! of a brush laid over it: `(canvas, brush) -> result`. They are pure and
//! stateless; every compositing operation in the crate takes any
//! `Fn(P, P) -> P`, and this module provides the standard catalogue as plain
//! functions so they coerce to [`BlendFn`].
//!
//! ```
//! use sprite_raster::blend::{self, BlendFn};
//! use sprite_raster::color::Rgba;
//!
//! let f: BlendFn<Rgba> = blend::rgba::alpha;
//! assert_eq!(f(Rgba::WHITE, Rgba::TRANSPARENT), Rgba::WHITE);
//! ```

use crate::color::Pixel;

/// A blend function as a plain function pointer.
pub type BlendFn<P> = fn(P, P) -> P;

/// Always take the brush.
#[inline]
pub fn copy<P: Pixel>(_canvas: P, brush: P) -> P {
    brush
}

/// Take the brush where it is visible, otherwise keep the canvas.
#[inline]
pub fn mask<P: Pixel>(canvas: P, brush: P) -> P {
    if brush.is_visible() {
        brush
    } else {
        canvas
    }
}

/// Blend functions for 8-bit [`Rgba`](crate::color::Rgba).
pub mod rgba {
    use crate::color::Rgba;

    /// Move the canvas toward the brush, weighted by brush alpha.
    #[inline]
    pub fn alpha(canvas: Rgba, brush: Rgba) -> Rgba {
        canvas.lerp(brush, brush.a)
    }

    /// Keep the canvas where the brush is opaque, fade it out elsewhere.
    #[inline]
    pub fn stencil_keep(canvas: Rgba, brush: Rgba) -> Rgba {
        Rgba::TRANSPARENT.lerp(canvas, brush.a)
    }

    /// Cut the canvas away where the brush is opaque.
    #[inline]
    pub fn stencil_cut(canvas: Rgba, brush: Rgba) -> Rgba {
        canvas.lerp(Rgba::TRANSPARENT, brush.a)
    }

    /// Saturating per-channel sum.
    #[inline]
    pub fn add(canvas: Rgba, brush: Rgba) -> Rgba {
        Rgba::new(
            canvas.r.saturating_add(brush.r),
            canvas.g.saturating_add(brush.g),
            canvas.b.saturating_add(brush.b),
            canvas.a.saturating_add(brush.a),
        )
    }

    /// Saturating per-channel difference.
    #[inline]
    pub fn subtract(canvas: Rgba, brush: Rgba) -> Rgba {
        Rgba::new(
            canvas.r.saturating_sub(brush.r),
            canvas.g.saturating_sub(brush.g),
            canvas.b.saturating_sub(brush.b),
            canvas.a.saturating_sub(brush.a),
        )
    }

    /// Per-channel product, scaled so 255 is the identity.
    #[inline]
    pub fn multiply(canvas: Rgba, brush: Rgba) -> Rgba {
        let m = |c: u8, b: u8| ((u16::from(c) * u16::from(b)) / 255) as u8;
        Rgba::new(
            m(canvas.r, brush.r),
            m(canvas.g, brush.g),
            m(canvas.b, brush.b),
            m(canvas.a, brush.a),
        )
    }
}

/// Blend functions for floating-point [`RgbaF`](crate::color::RgbaF).
pub mod rgbaf {
    use crate::color::RgbaF;

    /// Move the canvas toward the brush, weighted by brush alpha.
    #[inline]
    pub fn alpha(canvas: RgbaF, brush: RgbaF) -> RgbaF {
        canvas.lerp(brush, brush.a)
    }

    /// Keep the canvas where the brush is opaque, fade it out elsewhere.
    #[inline]
    pub fn stencil_keep(canvas: RgbaF, brush: RgbaF) -> RgbaF {
        RgbaF::CLEAR.lerp(canvas, brush.a)
    }

    /// Cut the canvas away where the brush is opaque.
    #[inline]
    pub fn stencil_cut(canvas: RgbaF, brush: RgbaF) -> RgbaF {
        canvas.lerp(RgbaF::CLEAR, brush.a)
    }

    /// Component-wise sum, unclamped.
    #[inline]
    pub fn add(canvas: RgbaF, brush: RgbaF) -> RgbaF {
        canvas + brush
    }

    /// Component-wise difference, unclamped.
    #[inline]
    pub fn subtract(canvas: RgbaF, brush: RgbaF) -> RgbaF {
        canvas - brush
    }

    /// Component-wise product.
    #[inline]
    pub fn multiply(canvas: RgbaF, brush: RgbaF) -> RgbaF {
        canvas * brush
    }
}

/// Blend functions for single-channel `u8` coverage.
pub mod alpha8 {
    use crate::color::lerp_u8;

    /// Fixed-point interpolation, see [`lerp_u8`].
    #[inline]
    pub fn lerp(a: u8, b: u8, u: u8) -> u8 {
        lerp_u8(a, b, u)
    }

    /// Keep canvas coverage where the brush is set.
    #[inline]
    pub fn stencil_keep(canvas: u8, brush: u8) -> u8 {
        lerp_u8(0, canvas, brush)
    }

    /// Remove canvas coverage where the brush is set.
    #[inline]
    pub fn stencil_cut(canvas: u8, brush: u8) -> u8 {
        lerp_u8(canvas, 0, brush)
    }
}
