//! Integer geometry for pixel coordinates.
//!
//! [`IntVector2`] addresses a single pixel and [`IntRect`] an axis-aligned,
//! half-open block of pixels. Both are plain `Copy` values; every operation
//! returns a new value except the explicit `*_by` mutators.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D point or offset with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntVector2 {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl IntVector2 {
    /// Origin (0, 0).
    pub const ZERO: Self = Self::new(0, 0);
    /// (1, 1).
    pub const ONE: Self = Self::new(1, 1);
    /// (-1, 0).
    pub const LEFT: Self = Self::new(-1, 0);
    /// (1, 0).
    pub const RIGHT: Self = Self::new(1, 0);
    /// (0, 1).
    pub const UP: Self = Self::new(0, 1);
    /// (0, -1).
    pub const DOWN: Self = Self::new(0, -1);

    /// The four orthogonal neighbours, clockwise from right.
    pub const ORTHO: [Self; 4] = [Self::RIGHT, Self::DOWN, Self::LEFT, Self::UP];

    /// The eight surrounding neighbours, clockwise from right.
    pub const ADJACENT8: [Self; 8] = [
        Self::RIGHT,
        Self::new(1, -1),
        Self::DOWN,
        Self::new(-1, -1),
        Self::LEFT,
        Self::new(-1, 1),
        Self::UP,
        Self::new(1, 1),
    ];

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert float coordinates, truncating toward zero.
    #[must_use]
    pub fn from_f32(x: f32, y: f32) -> Self {
        Self::new(x as i32, y as i32)
    }

    /// Convert to float coordinates.
    #[must_use]
    pub fn to_f32(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    /// This vector offset by `(dx, dy)`.
    #[must_use]
    pub const fn moved(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Index of the grid cell containing this point, for square cells of
    /// `cell_size` pixels. Rounds toward negative infinity.
    #[must_use]
    pub fn cell_coords(self, cell_size: i32) -> Self {
        Self::new(self.x.div_euclid(cell_size), self.y.div_euclid(cell_size))
    }

    /// Position of this point within its grid cell, always in
    /// `0..cell_size` on both axes.
    #[must_use]
    pub fn offset_coords(self, cell_size: i32) -> Self {
        Self::new(self.x.rem_euclid(cell_size), self.y.rem_euclid(cell_size))
    }

    /// Both [`cell_coords`](Self::cell_coords) and
    /// [`offset_coords`](Self::offset_coords) as `(cell, local)`.
    #[must_use]
    pub fn grid_coords(self, cell_size: i32) -> (Self, Self) {
        (self.cell_coords(cell_size), self.offset_coords(cell_size))
    }
}

impl Add for IntVector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for IntVector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for IntVector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for IntVector2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<i32> for IntVector2 {
    type Output = Self;

    fn mul(self, scale: i32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}

impl Neg for IntVector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for IntVector2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for IntVector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle of pixels.
///
/// Bounds are half-open: a rect contains `(x, y)` iff
/// `x_min <= x < x_max` and `y_min <= y < y_max`. Intersections may come out
/// degenerate (zero or negative width/height); callers treat those as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntRect {
    /// Inclusive left edge.
    pub x_min: i32,
    /// Inclusive bottom edge.
    pub y_min: i32,
    /// Exclusive right edge.
    pub x_max: i32,
    /// Exclusive top edge.
    pub y_max: i32,
}

impl IntRect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x + width,
            y_max: y + height,
        }
    }

    /// Create a rectangle from its bounds.
    #[must_use]
    pub const fn from_min_max(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Create a rectangle of the given size at an origin.
    #[must_use]
    pub const fn from_origin_size(origin: IntVector2, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x_min
    }

    /// Bottom edge.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y_min
    }

    /// Width, negative for degenerate rects.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    /// Height, negative for degenerate rects.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    /// The `(x_min, y_min)` corner.
    #[must_use]
    pub const fn min(&self) -> IntVector2 {
        IntVector2::new(self.x_min, self.y_min)
    }

    /// True when the rect covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Number of pixels covered, zero for degenerate rects.
    #[must_use]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    /// Translate in place.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x_min += dx;
        self.x_max += dx;
        self.y_min += dy;
        self.y_max += dy;
    }

    /// This rect translated by `offset`.
    #[must_use]
    pub fn moved(mut self, offset: IntVector2) -> Self {
        self.move_by(offset.x, offset.y);
        self
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub const fn contains_point(&self, point: IntVector2) -> bool {
        self.contains(point.x, point.y)
    }

    /// Component-wise intersection. The result may be degenerate.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            x_min: self.x_min.max(other.x_min),
            y_min: self.y_min.max(other.y_min),
            x_max: self.x_max.min(other.x_max),
            y_max: self.y_max.min(other.y_max),
        }
    }

    /// True if the two rects share at least one pixel.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Grow by `size` pixels on every side (shrink for negative sizes).
    pub fn expand(&mut self, size: i32) {
        self.x_min -= size;
        self.y_min -= size;
        self.x_max += size;
        self.y_max += size;
    }

    /// This rect grown by `size` pixels on every side.
    #[must_use]
    pub fn expanded(mut self, size: i32) -> Self {
        self.expand(size);
        self
    }
}

impl fmt::Display for IntRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x: {}, y: {}, width: {}, height: {})",
            self.x(),
            self.y(),
            self.width(),
            self.height()
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_rect() -> impl Strategy<Value = IntRect> {
        (-50i32..50, -50i32..50, -20i32..40, -20i32..40)
            .prop_map(|(x, y, w, h)| IntRect::new(x, y, w, h))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Intersection is commutative as a region.
        #[test]
        fn prop_intersect_commutes(a in any_rect(), b in any_rect()) {
            prop_assert_eq!(a.intersect(&b), b.intersect(&a));
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        /// A point is in the intersection iff it is in both rects.
        #[test]
        fn prop_intersect_membership(
            a in any_rect(),
            b in any_rect(),
            x in -60i32..100,
            y in -60i32..100
        ) {
            let i = a.intersect(&b);
            prop_assert_eq!(i.contains(x, y), a.contains(x, y) && b.contains(x, y));
        }

        /// Non-overlapping rects intersect to a degenerate rect.
        #[test]
        fn prop_disjoint_is_degenerate(a in any_rect(), b in any_rect()) {
            if !a.intersects(&b) {
                let i = a.intersect(&b);
                prop_assert!(i.width() <= 0 || i.height() <= 0);
            }
        }

        /// Cell and offset always recompose into the original point.
        #[test]
        fn prop_grid_coords_recompose(x in -1000i32..1000, y in -1000i32..1000, cell in 1i32..64) {
            let p = IntVector2::new(x, y);
            let (c, local) = p.grid_coords(cell);
            prop_assert_eq!(c * cell + local, p);
            prop_assert!(local.x >= 0 && local.x < cell);
            prop_assert!(local.y >= 0 && local.y < cell);
        }
    }
}
