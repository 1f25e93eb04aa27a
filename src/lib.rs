//! # Sprite-Raster
//!
//! Managed pixel buffers, pivoted sprites and a brush engine for 2D raster
//! compositing.
//!
//! Pixels live in a [`PixelBuffer`](buffer::PixelBuffer) that tracks whether it
//! changed since it was last handed to a display. [`Sprite`](sprite::Sprite)s
//! are cheap views into shared buffers, placed in world space by their pivot,
//! and composite onto each other through plain blend functions.
//! [`DrawTools`](draw::DrawTools) builds brushes on top: discs, rectangles,
//! swept and stippled strokes, quarter turns, shears and arbitrary rotations,
//! all backed by a pool of reusable scratch sprites.
//!
//! ## Quick Start
//!
//! ```rust
//! use sprite_raster::prelude::*;
//!
//! let mut tools = DrawTools::<Rgba>::default();
//! let canvas = tools.get_sprite(64, 64, IntVector2::ZERO)?;
//! canvas.clear(Rgba::WHITE);
//!
//! tools.draw_circle(&canvas, IntVector2::new(32, 32), Rgba::BLACK, 16, blend::mask)?;
//! tools.draw_line(
//!     &canvas,
//!     IntVector2::new(4, 4),
//!     IntVector2::new(60, 8),
//!     Rgba::RED,
//!     3,
//!     blend::mask,
//! )?;
//!
//! // hand the pixels to a renderer
//! let mut surface = Rgba8Surface::new();
//! canvas.apply(&mut surface);
//! assert_eq!(surface.pixel(32, 32), Some(Rgba::BLACK));
//! # Ok::<(), sprite_raster::Error>(())
//! ```
//!
//! ## Coordinates
//!
//! Integer pixel coordinates throughout, with `y` growing upward: row 0 is
//! the bottom row of every buffer.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for geometry, colors and
//!   [`DrawConfig`](draw::DrawConfig)
//!
//! ## References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Paeth, A. W. (1986). "A Fast Algorithm for General Raster Rotation." Graphics Interface '86.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in raster code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Integer vectors and rectangles.
pub mod geometry;

/// Pixel types.
pub mod color;

/// Blend function catalogue.
pub mod blend;

/// Line stepping.
pub mod bresenham;

// ============================================================================
// Storage Modules
// ============================================================================

/// Pixel buffers with dirty tracking.
pub mod buffer;

/// Pivoted views into pixel buffers.
pub mod sprite;

// ============================================================================
// Drawing Modules
// ============================================================================

/// Brush engine and sprite pool.
pub mod draw;

/// Display export adapters.
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for sprite-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use sprite_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::blend::{self, BlendFn};
    pub use crate::bresenham::BresenhamLine;
    pub use crate::buffer::{PixelBuffer, SharedBuffer};
    pub use crate::color::{Pixel, Rgba, RgbaF};
    pub use crate::draw::{DrawConfig, DrawTools};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{IntRect, IntVector2};
    pub use crate::output::{DisplaySink, Rgba8Surface, TextEncoder};
    pub use crate::sprite::Sprite;
}
