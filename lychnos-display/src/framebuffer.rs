//! Bit-packed monochrome framebuffer
//!
//! The display RAM is organized as eight 8-pixel-tall pages stacked top to
//! bottom; each byte is a vertical column of 8 pixels within one page.
//! Pixel (x, y) therefore lives at byte `x + (y / 8) * 128`, bit `y % 8`.
//!
//! Every primitive validates its whole bounding box before touching the
//! buffer. An out-of-bounds request is rejected entirely, with no partial
//! effect and no error signalled; callers that care poll nothing.

use crate::font::{self, FontSize};

/// Display width in pixels. The byte-addressing math bakes this in.
pub const WIDTH: i32 = 128;
/// Display height in pixels.
pub const HEIGHT: i32 = 64;
/// Framebuffer length in bytes.
pub const BUF_LEN: usize = (WIDTH * HEIGHT / 8) as usize;

/// In-memory image of the display, one bit per pixel.
pub struct Framebuffer {
    buf: [u8; BUF_LEN],
}

impl Framebuffer {
    pub const fn new() -> Self {
        Self { buf: [0; BUF_LEN] }
    }

    /// The raw page-organized bytes, for streaming to the display.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Reset every pixel to off.
    pub fn clear(&mut self) {
        self.buf = [0; BUF_LEN];
    }

    /// Set or clear a single pixel.
    pub fn pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || x >= WIDTH || y < 0 || y >= HEIGHT {
            return;
        }
        let byte = (x + (y / 8) * WIDTH) as usize;
        let bit = 1u8 << (y & 0x07);
        if on {
            self.buf[byte] |= bit;
        } else {
            self.buf[byte] &= !bit;
        }
    }

    /// Draw a horizontal run of `w` pixels. One page, one bitmask, a walk
    /// across the row.
    pub fn h_line(&mut self, x: i32, y: i32, w: i32, on: bool) {
        // `w > WIDTH - x` instead of `x + w > WIDTH`: the sum could
        // overflow for large arguments, the difference cannot once x >= 0.
        if x < 0 || y < 0 || w <= 0 || w > WIDTH - x || y >= HEIGHT {
            return;
        }
        let page_base = (y / 8) * WIDTH;
        let bit = 1u8 << (y & 0x07);
        for x_pos in x..x + w {
            let byte = (x_pos + page_base) as usize;
            if on {
                self.buf[byte] |= bit;
            } else {
                self.buf[byte] &= !bit;
            }
        }
    }

    /// Draw a vertical run of `h` pixels, crossing page boundaries as
    /// needed.
    pub fn v_line(&mut self, x: i32, y: i32, h: i32, on: bool) {
        if x < 0 || y < 0 || h <= 0 || x >= WIDTH || h > HEIGHT - y {
            return;
        }
        for y_pos in y..y + h {
            let byte = (x + (y_pos / 8) * WIDTH) as usize;
            let bit = 1u8 << (y_pos & 0x07);
            if on {
                self.buf[byte] |= bit;
            } else {
                self.buf[byte] &= !bit;
            }
        }
    }

    /// Draw a rectangle.
    ///
    /// With `outline <= 0` the rectangle is filled, drawn along whichever
    /// dimension takes fewer line calls. With `outline > 0` only the four
    /// border bands of that thickness are drawn; the interior is left
    /// untouched.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, outline: i32, on: bool) {
        if x < 0 || y < 0 || w <= 0 || h <= 0 || w > WIDTH - x || h > HEIGHT - y {
            return;
        }
        if outline > 0 {
            let band = outline.min(w).min(h);
            for o in y..y + band {
                self.h_line(x, o, w, on);
            }
            for o in y + h - band..y + h {
                self.h_line(x, o, w, on);
            }
            for o in x..x + band {
                self.v_line(o, y, h, on);
            }
            for o in x + w - band..x + w {
                self.v_line(o, y, h, on);
            }
        } else if w > h {
            for y_pos in y..y + h {
                self.h_line(x, y_pos, w, on);
            }
        } else {
            for x_pos in x..x + w {
                self.v_line(x_pos, y, h, on);
            }
        }
    }

    /// Paint one `scale` x `scale` block of identical pixels.
    fn block(&mut self, x: i32, y: i32, scale: i32, on: bool) {
        for cx in x..x + scale {
            for cy in y..y + scale {
                self.pixel(cx, cy, on);
            }
        }
    }

    /// Render a packed glyph bitmap at (x, y).
    ///
    /// Bits scan most-significant-first through `w0` then `w1`, advancing
    /// down each column and wrapping to the next, each source bit painted
    /// as a `scale`-sized block. The whole cell is painted: background
    /// bits actively clear (or, when `on` is false, set) their pixels.
    pub fn glyph(&mut self, x: i32, y: i32, w0: u32, w1: u16, on: bool, size: FontSize) {
        if x < 0 || y < 0 || size.cell_width() > WIDTH - x || size.cell_height() > HEIGHT - y {
            return;
        }
        let (w0, w1) = if on { (w0, w1) } else { (!w0, !w1) };
        let scale = size.scale();
        let cell_h = size.cell_height();
        let mut cur_x = x;
        let mut cur_y = y;
        let mut advance = |fb: &mut Self, bit: bool| {
            fb.block(cur_x, cur_y, scale, bit);
            cur_y += scale;
            if cur_y == y + cell_h {
                cur_y = y;
                cur_x += scale;
            }
        };
        for i in (0..32).rev() {
            advance(self, w0 & (1 << i) != 0);
        }
        for i in (0..16).rev() {
            advance(self, w1 & (1 << i) != 0);
        }
    }

    /// Render a single character through the font table. Unsupported
    /// characters paint a blank cell.
    pub fn char(&mut self, x: i32, y: i32, c: char, on: bool, size: FontSize) {
        let (w0, w1) = font::glyph(c);
        self.glyph(x, y, w0, w1, on, size);
    }

    /// Render a signed integer in decimal.
    ///
    /// A leading '-' for negatives, no leading zeros except for the value
    /// 0 itself. Drawing stops silently once the cursor passes the right
    /// edge.
    pub fn integer(&mut self, x: i32, y: i32, value: i32, on: bool, size: FontSize) {
        let mut cur_x = x;
        if value < 0 {
            if cur_x >= WIDTH {
                return;
            }
            self.char(cur_x, y, '-', on, size);
            cur_x += size.cell_width();
        }
        let mut rem = value.unsigned_abs();
        let mut leading = true;
        let mut magnitude = 1_000_000_000u32;
        while magnitude > 0 {
            let digit = rem / magnitude;
            rem -= digit * magnitude;
            if digit > 0 || !leading || magnitude == 1 {
                leading = false;
                if cur_x >= WIDTH {
                    return;
                }
                self.char(cur_x, y, (b'0' + digit as u8) as char, on, size);
                cur_x += size.cell_width();
            }
            magnitude /= 10;
        }
    }

    /// Render a string left to right, one cell width per character.
    pub fn text(&mut self, x: i32, y: i32, s: &str, on: bool, size: FontSize) {
        let mut cur_x = x;
        for c in s.chars() {
            if cur_x >= WIDTH {
                return;
            }
            self.char(cur_x, y, c, on, size);
            cur_x += size.cell_width();
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Read pixel (x, y) straight out of the buffer.
    fn px(fb: &Framebuffer, x: i32, y: i32) -> bool {
        fb.buf[(x + (y / 8) * WIDTH) as usize] & (1 << (y & 0x07)) != 0
    }

    /// A framebuffer with a deterministic non-zero pattern, to catch
    /// primitives that clear more than they should.
    fn patterned() -> Framebuffer {
        let mut fb = Framebuffer::new();
        for (i, byte) in fb.buf.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(31);
        }
        fb
    }

    #[test]
    fn test_pixel_maps_to_page_byte_and_bit() {
        let mut fb = Framebuffer::new();
        fb.pixel(3, 10, true);
        // Page 1 starts at byte 128; y=10 is bit 2 within the page.
        assert_eq!(fb.buf[131], 0b0000_0100);
        fb.pixel(3, 10, false);
        assert_eq!(fb.buf[131], 0);
    }

    proptest! {
        #[test]
        fn prop_pixel_set_then_clear_restores_byte(x in 0i32..WIDTH, y in 0i32..HEIGHT) {
            let mut fb = patterned();
            let byte = (x + (y / 8) * WIDTH) as usize;
            let before = fb.buf[byte];

            fb.pixel(x, y, true);
            fb.pixel(x, y, false);
            prop_assert_eq!(fb.buf[byte], before & !(1 << (y & 0x07)));

            // And with the original bit value re-applied it matches exactly.
            let mut fb = patterned();
            let was_on = px(&fb, x, y);
            fb.pixel(x, y, true);
            fb.pixel(x, y, was_on);
            prop_assert_eq!(fb.buf[byte], before);
        }

        #[test]
        fn prop_filled_rect_covers_exactly_its_area(
            x in 0i32..WIDTH, y in 0i32..HEIGHT,
            w in 1i32..=32, h in 1i32..=32,
        ) {
            prop_assume!(x + w <= WIDTH && y + h <= HEIGHT);
            let mut fb = Framebuffer::new();
            fb.rect(x, y, w, h, 0, true);
            for cx in 0..WIDTH {
                for cy in 0..HEIGHT {
                    let inside = cx >= x && cx < x + w && cy >= y && cy < y + h;
                    prop_assert_eq!(px(&fb, cx, cy), inside, "({}, {})", cx, cy);
                }
            }
        }
    }

    #[test]
    fn test_outline_rect_leaves_interior_untouched() {
        let mut fb = Framebuffer::new();
        let (x, y, w, h, k) = (10, 8, 20, 16, 2);
        fb.rect(x, y, w, h, k, true);
        for cx in x..x + w {
            for cy in y..y + h {
                let in_band = cx < x + k || cx >= x + w - k || cy < y + k || cy >= y + h - k;
                assert_eq!(px(&fb, cx, cy), in_band, "({cx}, {cy})");
            }
        }
    }

    #[test]
    fn test_v_line_spans_page_boundary() {
        let mut fb = Framebuffer::new();
        fb.v_line(5, 6, 4, true);
        // Pixels 6,7 in page 0 and 8,9 in page 1.
        assert_eq!(fb.buf[5], 0b1100_0000);
        assert_eq!(fb.buf[5 + 128], 0b0000_0011);
    }

    #[test]
    fn test_out_of_bounds_requests_change_nothing() {
        let reference = patterned();
        let mut fb = patterned();

        fb.pixel(-1, 5, true);
        fb.pixel(0, HEIGHT, true);
        fb.h_line(120, 0, 20, true);
        fb.v_line(0, 60, 10, true);
        fb.rect(120, 0, 20, 10, 0, true);
        fb.rect(0, -3, 10, 10, 1, true);
        fb.glyph(125, 0, !0, !0, true, FontSize::Small);
        fb.glyph(0, 50, !0, !0, true, FontSize::Large);

        assert_eq!(fb.buf, reference.buf);
    }

    #[test]
    fn test_extreme_extents_are_rejected_whole() {
        let reference = patterned();
        let mut fb = patterned();

        // Near-i32::MAX arguments must take the rejection path, never
        // wrap in the bounds arithmetic.
        fb.h_line(1, 0, i32::MAX, true);
        fb.v_line(0, 1, i32::MAX, true);
        fb.rect(1, 1, i32::MAX, i32::MAX, 0, true);
        fb.rect(1, 1, 4, i32::MAX, 1, true);
        fb.glyph(i32::MAX, 0, !0, !0, true, FontSize::Small);
        fb.text(i32::MAX - 2, 0, "AB", true, FontSize::Small);
        fb.integer(i32::MAX - 2, 0, -5, true, FontSize::Small);

        assert_eq!(fb.buf, reference.buf);
    }

    #[test]
    fn test_outline_thicker_than_rect_just_fills() {
        let mut banded = Framebuffer::new();
        let mut filled = Framebuffer::new();
        banded.rect(10, 10, 6, 4, i32::MAX, true);
        filled.rect(10, 10, 6, 4, 0, true);
        assert_eq!(banded.buf, filled.buf);
    }

    #[test]
    fn test_glyph_paints_background_of_its_cell() {
        let mut fb = patterned();
        // The blank glyph must actively clear its whole 6x8 cell.
        fb.glyph(40, 16, 0, 0, true, FontSize::Small);
        for cx in 40..46 {
            for cy in 16..24 {
                assert!(!px(&fb, cx, cy), "({cx}, {cy})");
            }
        }
    }

    #[test]
    fn test_large_size_doubles_every_source_pixel() {
        let mut small = Framebuffer::new();
        let mut large = Framebuffer::new();
        small.char(0, 0, 'A', true, FontSize::Small);
        large.char(0, 0, 'A', true, FontSize::Large);
        for cx in 0..6 {
            for cy in 0..8 {
                let bit = px(&small, cx, cy);
                for dx in 0..2 {
                    for dy in 0..2 {
                        assert_eq!(px(&large, cx * 2 + dx, cy * 2 + dy), bit);
                    }
                }
            }
        }
    }

    #[test]
    fn test_integer_renders_its_decimal_digits() {
        for (value, expected) in [
            (0, "0"),
            (7, "7"),
            (-42, "-42"),
            (1_000_000, "1000000"),
            (i32::MAX, "2147483647"),
            (i32::MIN, "-2147483648"),
        ] {
            let mut by_value = Framebuffer::new();
            let mut by_text = Framebuffer::new();
            by_value.integer(0, 0, value, true, FontSize::Small);
            by_text.text(0, 0, expected, true, FontSize::Small);
            assert_eq!(by_value.buf, by_text.buf, "{value}");
        }
    }

    #[test]
    fn test_integer_truncates_at_right_edge() {
        let mut by_value = Framebuffer::new();
        let mut by_text = Framebuffer::new();
        // Only the first digit's cell fits; the rest must be dropped.
        by_value.integer(120, 0, 123, true, FontSize::Small);
        by_text.text(120, 0, "123", true, FontSize::Small);
        assert_eq!(by_value.buf, by_text.buf);

        let mut first_only = Framebuffer::new();
        first_only.char(120, 0, '1', true, FontSize::Small);
        assert_eq!(by_value.buf, first_only.buf);
    }

    #[test]
    fn test_text_advances_one_cell_per_char() {
        let mut joined = Framebuffer::new();
        let mut split = Framebuffer::new();
        joined.text(8, 8, "AB", true, FontSize::Small);
        split.char(8, 8, 'A', true, FontSize::Small);
        split.char(14, 8, 'B', true, FontSize::Small);
        assert_eq!(joined.buf, split.buf);
    }
}
