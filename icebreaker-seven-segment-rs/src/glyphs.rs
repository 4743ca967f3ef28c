//! Hex digit glyphs and their encoding on the shared segment bus.
//!
//! The PMOD carries two 7-segment digits on one 8-bit port. Segments are
//! active low (a cleared bit lights the segment) and bit 7 chooses which
//! digit the pattern is meant for:
//!
//! ```text
//!   --0--
//!  |     |
//!  5     1        Position A: base 0xFF (bit 7 set)
//!  |     |        Position B: base 0x7F (bit 7 clear)
//!   --6--
//!  |     |        pattern = base & !GLYPHS[digit]
//!  4     2
//!  |     |
//!   --3--
//! ```

/// One of the seven segments, numbered as on the PMOD schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Segment {
    /// Segment 0, top bar.
    Top = 0,
    /// Segment 1, upper right bar.
    UpperRight = 1,
    /// Segment 2, lower right bar.
    LowerRight = 2,
    /// Segment 3, bottom bar.
    Bottom = 3,
    /// Segment 4, lower left bar.
    LowerLeft = 4,
    /// Segment 5, upper left bar.
    UpperLeft = 5,
    /// Segment 6, middle bar.
    Middle = 6,
}

impl Segment {
    /// All segments in bit order.
    pub const ALL: [Segment; 7] = [
        Segment::Top,
        Segment::UpperRight,
        Segment::LowerRight,
        Segment::Bottom,
        Segment::LowerLeft,
        Segment::UpperLeft,
        Segment::Middle,
    ];

    /// Bit of this segment within a pattern.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Lit segments for each hex digit, bit `n` set when segment `n` is on.
///
/// Indexed by digit value, `0x0`..=`0xF`.
pub const GLYPHS: [u8; 16] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
    0b101_1111, // A
    0b111_1100, // b
    0b101_1000, // c
    0b101_1110, // d
    0b111_1001, // E
    0b111_0001, // F
];

/// Physical digit position on the shared bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Position {
    /// Full 8-bit pattern, bit 7 set.
    A,
    /// Bit 7 cleared to select this position; 7 usable bits.
    B,
}

impl Position {
    /// Pattern with every segment off for this position.
    pub const fn base(self) -> u8 {
        match self {
            Position::A => 0xFF,
            Position::B => 0x7F,
        }
    }
}

/// A digit value in `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// Largest representable digit.
    pub const MAX: u8 = 0x0F;

    /// Checked constructor; `None` for values above 15.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Take the low four bits of `value`.
    pub const fn from_nibble(value: u8) -> Self {
        Self(value & Self::MAX)
    }

    /// Numeric value of the digit.
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Raw byte written to the segment port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(pub u8);

impl SegmentPattern {
    /// Every segment off on position A. Also the idle state of the port.
    pub const BLANK: SegmentPattern = SegmentPattern(0xFF);

    /// Byte value for the port register.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `segment` is lit (its bit is cleared).
    pub const fn is_lit(self, segment: Segment) -> bool {
        self.0 & segment.mask() == 0
    }

    /// Position selected by bit 7.
    pub const fn position(self) -> Position {
        if self.0 & 0x80 != 0 {
            Position::A
        } else {
            Position::B
        }
    }
}

/// Encode `digit` for `position`.
///
/// Total over every [`Digit`]; the lookup cannot miss.
pub const fn encode(digit: Digit, position: Position) -> SegmentPattern {
    SegmentPattern(position.base() & !GLYPHS[digit.0 as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lit segments per digit, written out independently of GLYPHS.
    const LIT: [&[u8]; 16] = [
        &[0, 1, 2, 3, 4, 5],
        &[1, 2],
        &[0, 1, 3, 4, 6],
        &[0, 1, 2, 3, 6],
        &[1, 2, 5, 6],
        &[0, 2, 3, 5, 6],
        &[0, 2, 3, 4, 5, 6],
        &[0, 1, 2],
        &[0, 1, 2, 3, 4, 5, 6],
        &[0, 1, 2, 3, 5, 6],
        &[0, 1, 2, 3, 4, 6],
        &[2, 3, 4, 5, 6],
        &[3, 4, 6],
        &[1, 2, 3, 4, 6],
        &[0, 3, 4, 5, 6],
        &[0, 4, 5, 6],
    ];

    const GOLDEN_A: [u8; 16] = [
        0xC0, 0xF9, 0xA4, 0xB0, 0x99, 0x92, 0x82, 0xF8, 0x80, 0x90, 0xA0, 0x83, 0xA7, 0xA1, 0x86,
        0x8E,
    ];

    const GOLDEN_B: [u8; 16] = [
        0x40, 0x79, 0x24, 0x30, 0x19, 0x12, 0x02, 0x78, 0x00, 0x10, 0x20, 0x03, 0x27, 0x21, 0x06,
        0x0E,
    ];

    fn digit(value: u8) -> Digit {
        Digit::new(value).unwrap()
    }

    #[test]
    fn glyph_table_matches_segment_sets() {
        for (value, lit) in LIT.iter().enumerate() {
            let mask = lit.iter().fold(0u8, |acc, &s| acc | (1 << s));
            assert_eq!(GLYPHS[value], mask, "digit {:x}", value);
        }
    }

    #[test]
    fn golden_patterns_position_a() {
        for value in 0..16u8 {
            assert_eq!(encode(digit(value), Position::A).bits(), GOLDEN_A[value as usize], "digit {:x}", value);
        }
    }

    #[test]
    fn golden_patterns_position_b() {
        for value in 0..16u8 {
            assert_eq!(encode(digit(value), Position::B).bits(), GOLDEN_B[value as usize], "digit {:x}", value);
        }
    }

    #[test]
    fn lit_segments_follow_glyphs() {
        for value in 0..16u8 {
            for position in [Position::A, Position::B] {
                let pattern = encode(digit(value), position);
                for segment in Segment::ALL {
                    let expected = LIT[value as usize].contains(&(segment as u8));
                    assert_eq!(pattern.is_lit(segment), expected, "digit {:x} {:?} {:?}", value, position, segment);
                }
                assert_eq!(pattern.position(), position);
            }
        }
    }

    #[test]
    fn encode_is_pure() {
        for value in 0..16u8 {
            let first = encode(digit(value), Position::A);
            let second = encode(digit(value), Position::A);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn digit_range() {
        assert_eq!(Digit::new(15).map(Digit::value), Some(15));
        assert_eq!(Digit::new(16), None);
        assert_eq!(Digit::from_nibble(0x3C).value(), 0xC);
        assert_eq!(Digit::from_nibble(0xFF).value(), 0xF);
    }

    #[test]
    fn blank_lights_nothing() {
        for segment in Segment::ALL {
            assert!(!SegmentPattern::BLANK.is_lit(segment));
        }
        assert_eq!(SegmentPattern::BLANK.bits(), Position::A.base());
    }
}
