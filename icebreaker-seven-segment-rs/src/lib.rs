//! Two-digit multiplexed 7-segment display for the iCEBreaker 7-segment PMOD.
//!
//! This crate provides the glyph encoder ([`encode`]) and
//! [`MultiplexedDisplay`], which shows a byte as two hexadecimal or decimal
//! digits by rapidly alternating between the two digit positions.
//!
//! # Quick Start
//!
//! ```ignore
//! use icebreaker_board::{Mmio, SpinDelay};
//! use icebreaker_seven_segment::{DisplayMode, MultiplexedDisplay, RefreshConfig};
//!
//! let mut bus = unsafe { Mmio::new() };
//! let mut delay = SpinDelay::new();
//!
//! let display = MultiplexedDisplay::new(RefreshConfig::default());
//! display.init(&mut bus);
//! display.render(&mut bus, &mut delay, 0x2A, DisplayMode::Hexadecimal);
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: [`defmt::Format`] on the public types and a trace
//!   message per render.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod driver;
pub mod glyphs;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::{DisplayMode, MultiplexedDisplay, RefreshConfig};
pub use glyphs::{encode, Digit, Position, Segment, SegmentPattern, GLYPHS};
