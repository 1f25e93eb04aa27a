//! Pixel representations.
//!
//! Every buffer in this crate is generic over a [`Pixel`] type. Three are
//! provided:
//!
//! - [`Rgba`]: 8-bit RGBA, composited with exact fixed-point arithmetic.
//! - [`RgbaF`]: floating-point RGBA with unclamped component arithmetic.
//! - `u8`: a single alpha/coverage channel, used for masks.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// A value that can be stored in a [`PixelBuffer`](crate::buffer::PixelBuffer).
pub trait Pixel: Copy + Default + PartialEq + Debug {
    /// The fully transparent value used as brush background.
    const TRANSPARENT: Self;

    /// True if this pixel contributes anything when masked onto a canvas.
    fn is_visible(self) -> bool;

    /// Convert to display bytes in `[R, G, B, A]` order.
    fn to_rgba8(self) -> [u8; 4];
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Fixed-point interpolation toward `other` by `u / 256`.
    ///
    /// Each channel is `a + ((u * (b - a)) >> 8)`. With `u = 255` the result
    /// can stop one step short of `other`; this matches the reference output
    /// bit for bit and must not be "corrected".
    #[must_use]
    pub const fn lerp(self, other: Self, u: u8) -> Self {
        Self::new(
            lerp_u8(self.r, other.r, u),
            lerp_u8(self.g, other.g, u),
            lerp_u8(self.b, other.b, u),
            lerp_u8(self.a, other.a, u),
        )
    }

    /// Convert to floating-point components in `0.0..=1.0`.
    #[must_use]
    pub fn to_rgbaf(self) -> RgbaF {
        RgbaF::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        )
    }
}

/// Fixed-point byte interpolation, `a + ((u * (b - a)) >> 8)`.
#[must_use]
#[inline]
pub const fn lerp_u8(a: u8, b: u8, u: u8) -> u8 {
    let a = a as i32;
    let b = b as i32;
    let u = u as i32;
    (a + ((u * (b - a)) >> 8)) as u8
}

impl Pixel for Rgba {
    const TRANSPARENT: Self = Self::TRANSPARENT;

    fn is_visible(self) -> bool {
        self.a > 0
    }

    fn to_rgba8(self) -> [u8; 4] {
        self.to_array()
    }
}

/// RGBA color with floating-point components, nominally in `0.0..=1.0`.
///
/// Arithmetic is component-wise and unclamped; clamping only happens when
/// converting to bytes for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbaF {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component (1.0 = fully opaque).
    pub a: f32,
}

impl RgbaF {
    /// Fully transparent black.
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new color.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 1.0).
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation, `self * (1 - u) + other * u` per component.
    ///
    /// `u` is not clamped.
    #[must_use]
    pub fn lerp(self, other: Self, u: f32) -> Self {
        let inv = 1.0 - u;
        Self::new(
            self.r * inv + other.r * u,
            self.g * inv + other.g * u,
            self.b * inv + other.b * u,
            self.a * inv + other.a * u,
        )
    }

    /// Quantize to 8 bits per channel, clamping and rounding.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        Rgba::from_array(self.to_rgba8())
    }
}

fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Pixel for RgbaF {
    const TRANSPARENT: Self = Self::CLEAR;

    fn is_visible(self) -> bool {
        self.a > 0.0
    }

    fn to_rgba8(self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

impl Add for RgbaF {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Sub for RgbaF {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

impl Mul for RgbaF {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

impl From<Rgba> for RgbaF {
    fn from(color: Rgba) -> Self {
        color.to_rgbaf()
    }
}

impl From<RgbaF> for Rgba {
    fn from(color: RgbaF) -> Self {
        color.to_rgba()
    }
}

/// Single-channel coverage. Zero is transparent; displayed as white with
/// the byte as alpha.
impl Pixel for u8 {
    const TRANSPARENT: Self = 0;

    fn is_visible(self) -> bool {
        self != 0
    }

    fn to_rgba8(self) -> [u8; 4] {
        [255, 255, 255, self]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::GREEN.g, 255);
        assert_eq!(Rgba::BLUE.b, 255);
        assert_eq!(<Rgba as Pixel>::TRANSPARENT, Rgba::default());
    }

    #[test]
    fn test_lerp_u8_fixed_point() {
        assert_eq!(lerp_u8(0, 255, 128), 127);
        assert_eq!(lerp_u8(255, 0, 128), 127);
        assert_eq!(lerp_u8(10, 200, 0), 10);
        // stops one short when rising at full weight
        assert_eq!(lerp_u8(0, 255, 255), 254);
        // reaches the target when falling (arithmetic shift floors)
        assert_eq!(lerp_u8(255, 0, 255), 0);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 128);
        assert_eq!(mid, Rgba::new(127, 127, 127, 255));
    }

    #[test]
    fn test_rgba_with_alpha() {
        let semi_red = Rgba::RED.with_alpha(128);
        assert_eq!(semi_red.r, 255);
        assert_eq!(semi_red.a, 128);
        assert!(semi_red.is_visible());
        assert!(!Rgba::RED.with_alpha(0).is_visible());
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let color = Rgba::new(10, 20, 30, 40);
        let arr = color.to_array();
        assert_eq!(arr, [10, 20, 30, 40]);
        assert_eq!(Rgba::from_array(arr), color);
        assert_eq!(color.to_rgba8(), arr);
    }

    #[test]
    fn test_rgbaf_lerp() {
        let c = RgbaF::WHITE.lerp(RgbaF::BLACK, 0.25);
        assert_relative_eq!(c.r, 0.75);
        assert_relative_eq!(c.a, 1.0);
        assert_eq!(RgbaF::WHITE.lerp(RgbaF::RED, 1.0), RgbaF::RED);
        assert_eq!(RgbaF::WHITE.lerp(RgbaF::RED, 0.0), RgbaF::WHITE);
    }

    #[test]
    fn test_rgbaf_arithmetic_unclamped() {
        let sum = RgbaF::WHITE + RgbaF::RED;
        assert_relative_eq!(sum.r, 2.0);
        let diff = RgbaF::BLACK - RgbaF::WHITE;
        assert_relative_eq!(diff.g, -1.0);
        let product = RgbaF::new(0.5, 0.5, 0.5, 1.0) * RgbaF::new(0.5, 1.0, 0.0, 1.0);
        assert_relative_eq!(product.r, 0.25);
        assert_relative_eq!(product.b, 0.0);
    }

    #[test]
    fn test_rgbaf_quantize() {
        assert_eq!(RgbaF::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(RgbaF::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
        assert_eq!(Rgba::from(RgbaF::RED), Rgba::RED);
        assert_eq!(RgbaF::from(Rgba::BLUE), RgbaF::BLUE);
    }

    #[test]
    fn test_byte_pixel() {
        assert!(!0u8.is_visible());
        assert!(7u8.is_visible());
        assert_eq!(200u8.to_rgba8(), [255, 255, 255, 200]);
    }
}
