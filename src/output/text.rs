//! Character-grid rendering of pixel buffers.
//!
//! Maps every pixel of a region to one character through an exact-match
//! palette. Intended for fixtures and debugging: a golden image can be
//! checked into a test as a block of text and diffed line by line.

use crate::buffer::PixelBuffer;
use crate::color::Pixel;
use crate::geometry::IntRect;

/// Text encoder configuration.
#[derive(Debug, Clone)]
pub struct TextEncoder {
    palette: Vec<([u8; 4], char)>,
    fallback: char,
    top_down: bool,
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEncoder {
    /// Create an encoder with an empty palette, `?` for unmatched pixels and
    /// the highest row printed first.
    #[must_use]
    pub fn new() -> Self {
        Self {
            palette: Vec::new(),
            fallback: '?',
            top_down: true,
        }
    }

    /// Print pixels whose RGBA8 value equals `color` as `symbol`.
    #[must_use]
    pub fn symbol<P: Pixel>(mut self, color: P, symbol: char) -> Self {
        self.palette.push((color.to_rgba8(), symbol));
        self
    }

    /// Character for pixels not in the palette.
    #[must_use]
    pub fn fallback(mut self, symbol: char) -> Self {
        self.fallback = symbol;
        self
    }

    /// Print the highest row first (default) or row 0 first.
    #[must_use]
    pub fn top_down(mut self, top_down: bool) -> Self {
        self.top_down = top_down;
        self
    }

    /// Render `rect` of `buffer`, one line per row, each line ending in `\n`.
    ///
    /// `rect` must lie within the buffer.
    #[must_use]
    pub fn render<P: Pixel>(&self, buffer: &PixelBuffer<P>, rect: IntRect) -> String {
        let columns = rect.width().max(0) as usize + 1;
        let mut output = String::with_capacity(columns * rect.height().max(0) as usize);

        let rows: Box<dyn Iterator<Item = i32>> = if self.top_down {
            Box::new((rect.y_min..rect.y_max).rev())
        } else {
            Box::new(rect.y_min..rect.y_max)
        };

        for y in rows {
            for x in rect.x_min..rect.x_max {
                output.push(self.symbol_for(buffer.get_pixel(x, y)));
            }
            output.push('\n');
        }

        output
    }

    fn symbol_for<P: Pixel>(&self, pixel: P) -> char {
        let key = pixel.to_rgba8();
        self.palette
            .iter()
            .find(|(color, _)| *color == key)
            .map_or(self.fallback, |&(_, symbol)| symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_render_orientation() {
        let mut buffer = PixelBuffer::<Rgba>::new(3, 2).unwrap();
        buffer.clear(Rgba::WHITE);
        buffer.set_pixel(0, 0, Rgba::BLACK);
        buffer.set_pixel(2, 1, Rgba::RED);

        let encoder = TextEncoder::new().symbol(Rgba::WHITE, '.').symbol(Rgba::BLACK, '#');
        assert_eq!(encoder.render(&buffer, buffer.rect()), "..?\n#..\n");
        assert_eq!(
            encoder.top_down(false).fallback('r').render(&buffer, buffer.rect()),
            "#..\n..r\n"
        );
    }

    #[test]
    fn test_render_sub_rect() {
        let mut buffer = PixelBuffer::<u8>::new(4, 4).unwrap();
        buffer.set_pixel(1, 1, 255);

        let encoder = TextEncoder::new().symbol(0u8, ' ').symbol(255u8, '@');
        assert_eq!(encoder.render(&buffer, IntRect::new(1, 1, 2, 1)), "@ \n");
    }
}
