//! Fixed-width bitmap font
//!
//! Each glyph is a 6x8 bitmap packed into 48 bits: a 32-bit word followed
//! by the high 16 bits of a second word. Bits scan most-significant-first,
//! column-major, eight rows per column. The large size renders the same
//! bitmaps with every source pixel doubled to 12x16.

/// Glyph cell size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    /// 6x8 pixel cells.
    Small,
    /// 12x16 pixel cells (each source pixel doubled).
    Large,
}

impl FontSize {
    /// Pixel replication factor per source bit.
    pub const fn scale(self) -> i32 {
        match self {
            FontSize::Small => 1,
            FontSize::Large => 2,
        }
    }

    /// Glyph cell width; also the cursor advance per character.
    pub const fn cell_width(self) -> i32 {
        6 * self.scale()
    }

    /// Glyph cell height.
    pub const fn cell_height(self) -> i32 {
        8 * self.scale()
    }
}

/// Look up the packed bitmap words for a character.
///
/// Supported: A-Z, a-z, 0-9, and `: . ! / - + < >`. Anything else maps
/// to the blank glyph, which still paints its whole cell.
pub const fn glyph(c: char) -> (u32, u16) {
    match c {
        'A' => (0x1F68_8868, 0x1F00),
        'B' => (0xFF89_8989, 0x7600),
        'C' => (0x7E81_8181, 0x6600),
        'D' => (0xFF81_8181, 0x7E00),
        'E' => (0xFF89_8989, 0x8100),
        'F' => (0xFF88_8888, 0x8000),
        'G' => (0x7E81_8989, 0x6E00),
        'H' => (0xFF08_0808, 0xFF00),
        'I' => (0x8181_FF81, 0x8100),
        'J' => (0x8681_81FE, 0x8000),
        'K' => (0xFF18_2442, 0x8100),
        'L' => (0xFF01_0101, 0x0100),
        'M' => (0xFF40_3040, 0xFF00),
        'N' => (0xFF60_1806, 0xFF00),
        'O' => (0x7E81_8181, 0x7E00),
        'P' => (0xFF88_8888, 0x7000),
        'Q' => (0x7E81_8582, 0x7D00),
        'R' => (0xFF88_8C8A, 0x7100),
        'S' => (0x6691_9989, 0x6600),
        'T' => (0x8080_FF80, 0x8000),
        'U' => (0xFE01_0101, 0xFE00),
        'V' => (0x701C_031C, 0xE000),
        'W' => (0xFE01_0601, 0xFE00),
        'X' => (0xC324_1824, 0xC300),
        'Y' => (0xE010_0F10, 0xE000),
        'Z' => (0x8385_99A1, 0xC100),
        'a' => (0x0629_2929, 0x1F00),
        'b' => (0xFF09_0909, 0x0600),
        'c' => (0x1E21_2121, 0x1200),
        'd' => (0x0609_09FF, 0x0100),
        'e' => (0x3E49_4949, 0x3A00),
        'f' => (0x087F_8888, 0x6000),
        'g' => (0x3249_4949, 0x3E00),
        'h' => (0xFF08_0808, 0x0700),
        'i' => (0x0000_4F00, 0x0000),
        'j' => (0x0006_015E, 0x0000),
        'k' => (0x00FF_1C23, 0x0000),
        'l' => (0x0000_FF00, 0x0000),
        'm' => (0x3F10_1F10, 0x0F00),
        'n' => (0x3F10_100F, 0x0000),
        'o' => (0x0E11_1111, 0x0E00),
        'p' => (0x003F_2424, 0x1800),
        'q' => (0x3048_487E, 0x0100),
        'r' => (0x003F_1010, 0x0800),
        's' => (0x0032_4949, 0x2600),
        't' => (0x20FE_2121, 0x0200),
        'u' => (0x3C02_023E, 0x0300),
        'v' => (0x1806_0106, 0x1800),
        'w' => (0x1E01_0201, 0x1E00),
        'x' => (0x110A_040A, 0x1100),
        'y' => (0x3209_093E, 0x0000),
        'z' => (0x1113_1519, 0x1100),
        '0' => (0x7EE1_9987, 0x7E00),
        '1' => (0x2141_FF01, 0x0100),
        '2' => (0x6387_8D99, 0x7100),
        '3' => (0x6681_8989, 0x7600),
        '4' => (0xF808_08FF, 0x0800),
        '5' => (0xE291_9191, 0x8E00),
        '6' => (0x7E91_9191, 0x4E00),
        '7' => (0x6083_8CB0, 0xC000),
        '8' => (0x6E91_9191, 0x6E00),
        '9' => (0x7289_8989, 0x7E00),
        ':' => (0x0000_2400, 0x0000),
        '.' => (0x0000_0002, 0x0000),
        '!' => (0x007A_0000, 0x0000),
        '/' => (0x0006_1860, 0x0000),
        '-' => (0x0008_0808, 0x0000),
        '+' => (0x0008_1C08, 0x0000),
        '<' => (0x0008_1422, 0x0000),
        '>' => (0x0044_2810, 0x0000),
        _ => (0, 0),
    }
}
