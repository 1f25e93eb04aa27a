//! Display export adapters.
//!
//! Pixel buffers never talk to a renderer directly. When a buffer is
//! [applied](crate::buffer::PixelBuffer::apply) it hands its pixels to a
//! [`DisplaySink`], which the embedding renderer implements to upload them to
//! whatever display resource it owns (a GPU texture, a window surface, ...).

mod surface;
mod text;

pub use surface::Rgba8Surface;
pub use text::TextEncoder;

use crate::color::Pixel;

/// Receiver of flushed pixel data.
///
/// Calls arrive in a fixed order per buffer: one `allocate` before the first
/// upload (and again after every resize), then `upload` whenever the buffer
/// was modified since the previous flush, and `release` on dispose.
pub trait DisplaySink<P: Pixel> {
    /// Create or recreate the display resource for a `width` x `height` image.
    fn allocate(&mut self, width: u32, height: u32);

    /// Replace the display resource's contents with `pixels`, row-major,
    /// bottom row first.
    fn upload(&mut self, width: u32, height: u32, pixels: &[P]);

    /// Destroy the display resource.
    fn release(&mut self) {}
}
