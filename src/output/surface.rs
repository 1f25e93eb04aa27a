//! In-memory RGBA8 display surface.

use super::DisplaySink;
use crate::color::{Pixel, Rgba};

/// A [`DisplaySink`] that keeps the last upload as tightly packed RGBA8
/// bytes.
///
/// Useful for headless rendering and for checking what a renderer would
/// have been sent.
#[derive(Debug, Clone, Default)]
pub struct Rgba8Surface {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
    allocated: bool,
    allocations: usize,
    uploads: usize,
}

impl Rgba8Surface {
    /// Create an unallocated surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of the current allocation in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the current allocation in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Uploaded pixel bytes in `[R, G, B, A]` order, row-major.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True between `allocate` and `release`.
    #[must_use]
    pub const fn is_allocated(&self) -> bool {
        self.allocated
    }

    /// Number of times the surface was (re)allocated.
    #[must_use]
    pub const fn allocations(&self) -> usize {
        self.allocations
    }

    /// Number of uploads received.
    #[must_use]
    pub const fn uploads(&self) -> usize {
        self.uploads
    }

    /// Color of an uploaded pixel, `None` if out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.bytes.get(idx..idx + 4)?;
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }
}

impl<P: Pixel> DisplaySink<P> for Rgba8Surface {
    fn allocate(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.bytes = vec![0; (width as usize) * (height as usize) * 4];
        self.allocated = true;
        self.allocations += 1;
    }

    fn upload(&mut self, width: u32, height: u32, pixels: &[P]) {
        debug_assert_eq!((width, height), (self.width, self.height));
        self.bytes.clear();
        self.bytes.extend(pixels.iter().flat_map(|p| p.to_rgba8()));
        self.uploads += 1;
    }

    fn release(&mut self) {
        self.bytes = Vec::new();
        self.allocated = false;
    }
}
