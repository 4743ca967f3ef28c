//! Time-multiplexed two-digit display driver.
//!
//! Only one digit can be lit at a time because both share the segment
//! port. [`MultiplexedDisplay::render`] alternates the low digit and the
//! high digit, holding each for a fixed number of delay units, fast enough
//! that persistence of vision shows both at once.
//!
//! ```text
//! cycle:   PM1A_DO <- encode(low,  B)   pause(hold)
//!          PM1A_DO <- encode(high, A)   pause(hold)
//! after:   PM1A_DO <- 0xFF              (blank)
//! ```

use icebreaker_board::registers::{PM1A_DO, PM1A_OE};
use icebreaker_board::{Delay, RegisterBus};

use crate::glyphs::{encode, Digit, Position, SegmentPattern};

/// Multiplex cycles per rendered value.
pub const DEFAULT_REFRESH_CYCLES: u32 = 100;

/// Delay units each digit is held for within a cycle.
pub const DEFAULT_HOLD: u32 = 1000;

/// Position driven with the low (ones / low nibble) digit.
///
/// Bit 7 selects the physical digit, so the low digit lands on the digit
/// enabled by a clear bit 7.
pub const LOW_DIGIT_POSITION: Position = Position::B;

/// Position driven with the high (tens / high nibble) digit.
pub const HIGH_DIGIT_POSITION: Position = Position::A;

/// Output-enable mask turning every PMOD 1A pin into an output.
const ALL_OUTPUTS: u8 = 0xFF;

// ── RefreshConfig ───────────────────────────────────────────────────────

/// Refresh timing.
///
/// `cycles × 2 × hold` delay units is how long a value stays on screen.
/// [`RefreshConfig::default()`] gives a flicker-free 100 × 1000 at the
/// SoC's 12 MHz clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshConfig {
    /// Number of low/high alternations per render. Default: 100.
    pub cycles: u32,
    /// Delay units per digit per cycle. Default: 1000.
    pub hold: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_REFRESH_CYCLES,
            hold: DEFAULT_HOLD,
        }
    }
}

impl RefreshConfig {
    /// Total delay units one render blocks for.
    pub const fn dwell(&self) -> u64 {
        self.cycles as u64 * 2 * self.hold as u64
    }
}

// ── DisplayMode ─────────────────────────────────────────────────────────

/// How a byte is split into two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Low nibble and high nibble.
    Hexadecimal,
    /// Ones and tens. The hundreds digit of values ≥ 100 is not shown.
    Decimal,
}

impl DisplayMode {
    /// Split `value` into `(low, high)` digits.
    pub const fn split(self, value: u8) -> (Digit, Digit) {
        match self {
            DisplayMode::Hexadecimal => (Digit::from_nibble(value), Digit::from_nibble(value >> 4)),
            DisplayMode::Decimal => (
                Digit::from_nibble(value % 10),
                Digit::from_nibble((value / 10) % 10),
            ),
        }
    }
}

// ── MultiplexedDisplay ──────────────────────────────────────────────────

/// Two-digit 7-segment display on PMOD 1A.
///
/// Holds only the refresh timing; the bus and the delay are lent per call
/// so the caller can keep using them for LEDs, buttons and the UART.
///
/// # Lifecycle
///
/// 1. [`MultiplexedDisplay::init()`]: blank the port and enable outputs.
/// 2. [`MultiplexedDisplay::render()`]: show a value for one dwell period.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplexedDisplay {
    config: RefreshConfig,
}

impl MultiplexedDisplay {
    /// Create a driver with the given timing. No register traffic.
    pub const fn new(config: RefreshConfig) -> Self {
        Self { config }
    }

    /// Refresh timing in use.
    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Blank the segment port, then switch every PMOD 1A pin to output.
    ///
    /// Must run once before the first [`render`](Self::render).
    pub fn init<B: RegisterBus>(&self, bus: &mut B) {
        PM1A_DO.write(bus, SegmentPattern::BLANK.bits());
        PM1A_OE.write(bus, ALL_OUTPUTS);
    }

    /// Show `value` in `mode` for `cycles × 2 × hold` delay units, then
    /// blank the display.
    ///
    /// Blocks the caller for the whole dwell period.
    pub fn render<B, D>(&self, bus: &mut B, delay: &mut D, value: u8, mode: DisplayMode)
    where
        B: RegisterBus,
        D: Delay,
    {
        let (low, high) = mode.split(value);
        let low_pattern = encode(low, LOW_DIGIT_POSITION);
        let high_pattern = encode(high, HIGH_DIGIT_POSITION);

        #[cfg(feature = "defmt")]
        defmt::trace!("render {=u8} as {}: low={} high={}", value, mode, low, high);

        for _ in 0..self.config.cycles {
            PM1A_DO.write(bus, low_pattern.bits());
            delay.pause(self.config.hold);
            PM1A_DO.write(bus, high_pattern.bits());
            delay.pause(self.config.hold);
        }

        self.blank(bus);
    }

    /// Turn every segment off.
    pub fn blank<B: RegisterBus>(&self, bus: &mut B) {
        PM1A_DO.write(bus, SegmentPattern::BLANK.bits());
    }
}
