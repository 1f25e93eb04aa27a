//! Bresenham line stepping.
//!
//! Produces the integer samples of a straight line with no gaps. Lines
//! steeper than 45 degrees are stepped along y, and every line is walked in
//! ascending order of its major axis, so `A -> B` and `B -> A` visit exactly
//! the same pixels.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

use crate::geometry::IntVector2;
use std::iter::FusedIterator;

/// Iterator over the samples of a line, in major-axis ascending order.
///
/// Yields exactly `max(|dx|, |dy|) + 1` points, both endpoints included.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    steep: bool,
    reversed: bool,
    x: i32,
    x_end: i32,
    y: i32,
    y_step: i32,
    delta_major: i32,
    delta_minor: i32,
    error: i32,
}

impl BresenhamLine {
    /// Step from `start` to `end`.
    #[must_use]
    pub fn new(start: IntVector2, end: IntVector2) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (start.x, start.y, end.x, end.y);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }

        let reversed = x0 > x1;
        if reversed {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let delta_major = x1 - x0;

        Self {
            steep,
            reversed,
            x: x0,
            x_end: x1,
            y: y0,
            y_step: if y0 < y1 { 1 } else { -1 },
            delta_major,
            delta_minor: (y1 - y0).abs(),
            error: delta_major / 2,
        }
    }

    /// True if the line is stepped along y (steeper than 45 degrees).
    #[must_use]
    pub const fn is_steep(&self) -> bool {
        self.steep
    }

    /// True if samples run from `end` back toward `start`.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Distance along the major axis, one less than the sample count.
    #[must_use]
    pub const fn major_length(&self) -> i32 {
        self.delta_major
    }
}

impl Iterator for BresenhamLine {
    type Item = IntVector2;

    fn next(&mut self) -> Option<IntVector2> {
        if self.x > self.x_end {
            return None;
        }

        let point = if self.steep {
            IntVector2::new(self.y, self.x)
        } else {
            IntVector2::new(self.x, self.y)
        };

        self.error -= self.delta_minor;
        if self.error < 0 {
            self.y += self.y_step;
            self.error += self.delta_major;
        }
        self.x += 1;

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (i64::from(self.x_end) - i64::from(self.x) + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BresenhamLine {}

impl FusedIterator for BresenhamLine {}

/// Call `plot` for every sample of the line from `(x0, y0)` to `(x1, y1)`.
pub fn line<F>(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: F)
where
    F: FnMut(i32, i32),
{
    for point in BresenhamLine::new(IntVector2::new(x0, y0), IntVector2::new(x1, y1)) {
        plot(point.x, point.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        line(x0, y0, x1, y1, |x, y| out.push((x, y)));
        out
    }

    #[test]
    fn test_single_point() {
        assert_eq!(points(3, 4, 3, 4), vec![(3, 4)]);
    }

    #[test]
    fn test_horizontal() {
        assert_eq!(points(0, 2, 4, 2), vec![(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_vertical_is_steep() {
        let line = BresenhamLine::new(IntVector2::new(1, 5), IntVector2::new(1, 1));
        assert!(line.is_steep());
        assert!(line.is_reversed());
        let pts: Vec<_> = line.collect();
        assert_eq!(pts.first(), Some(&IntVector2::new(1, 1)));
        assert_eq!(pts.last(), Some(&IntVector2::new(1, 5)));
        assert_eq!(pts.len(), 5);
    }

    #[test]
    fn test_diagonal() {
        assert_eq!(points(4, 8, 8, 12), vec![(4, 8), (5, 9), (6, 10), (7, 11), (8, 12)]);
    }

    #[test]
    fn test_shallow_slope() {
        // err starts at dx/2 = 2 and the minor step happens once it drops below zero
        assert_eq!(points(0, 0, 5, 2), vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_reversed_flag_only_swaps_order() {
        let forward = BresenhamLine::new(IntVector2::new(0, 0), IntVector2::new(6, 3));
        let backward = BresenhamLine::new(IntVector2::new(6, 3), IntVector2::new(0, 0));
        assert!(!forward.is_reversed());
        assert!(backward.is_reversed());
        assert_eq!(forward.collect::<Vec<_>>(), backward.collect::<Vec<_>>());
    }

    #[test]
    fn test_exact_size() {
        let line = BresenhamLine::new(IntVector2::new(-3, 7), IntVector2::new(9, -2));
        assert_eq!(line.len(), 13);
        assert_eq!(line.major_length(), 12);
        assert_eq!(line.count(), 13);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Sample count is max(|dx|, |dy|) + 1.
        #[test]
        fn prop_sample_count(
            x0 in -100i32..100,
            y0 in -100i32..100,
            x1 in -100i32..100,
            y1 in -100i32..100,
        ) {
            let n = BresenhamLine::new(IntVector2::new(x0, y0), IntVector2::new(x1, y1)).count();
            let expected = (x1 - x0).abs().max((y1 - y0).abs()) as usize + 1;
            prop_assert_eq!(n, expected);
        }

        /// A -> B and B -> A visit the same pixel set.
        #[test]
        fn prop_symmetric(
            x0 in -100i32..100,
            y0 in -100i32..100,
            x1 in -100i32..100,
            y1 in -100i32..100,
        ) {
            let a = IntVector2::new(x0, y0);
            let b = IntVector2::new(x1, y1);
            let ab: HashSet<_> = BresenhamLine::new(a, b).collect();
            let ba: HashSet<_> = BresenhamLine::new(b, a).collect();
            prop_assert_eq!(ab, ba);
        }

        /// Both endpoints are sampled and consecutive samples are 8-connected.
        #[test]
        fn prop_endpoints_and_no_gaps(
            x0 in -50i32..50,
            y0 in -50i32..50,
            x1 in -50i32..50,
            y1 in -50i32..50,
        ) {
            let a = IntVector2::new(x0, y0);
            let b = IntVector2::new(x1, y1);
            let pts: Vec<_> = BresenhamLine::new(a, b).collect();
            prop_assert!(pts.contains(&a));
            prop_assert!(pts.contains(&b));
            for w in pts.windows(2) {
                let d = w[1] - w[0];
                prop_assert!(d.x.abs() <= 1 && d.y.abs() <= 1);
                prop_assert!(d != IntVector2::ZERO);
            }
        }
    }
}
