//! Demo application logic for the PicoRV32 iCEBreaker firmware.
//!
//! [`boot::report`] prints the boot banner once; [`Demo`] then counts
//! forever, walking a bit across the LEDs and showing the counter on the
//! 7-segment display in hexadecimal, or in decimal while button 3 is held.
//!
//! Everything is generic over [`RegisterBus`](icebreaker_board::RegisterBus)
//! and [`Delay`](icebreaker_board::Delay), so the whole loop can be driven
//! step by step on the host against the simulated board.
//!
//! ```ignore
//! use icebreaker_board::{Mmio, SpinDelay};
//! use icebreaker_demo::Demo;
//!
//! let bus = unsafe { Mmio::new() };
//! Demo::start(bus, SpinDelay::new()).run()
//! ```
//!
//! # Features
//!
//! - **`defmt`**: structured logging of boot and every loop iteration.

#![cfg_attr(not(test), no_std)]

pub mod boot;
pub mod demo;

pub use demo::{display_value, led_pattern, select_mode, Demo, Step, DECIMAL_BUTTONS, INITIAL_COUNTER, LED_BASE_PATTERN};
