//! Board support for the PicoRV32 demo SoC on the iCEBreaker FPGA board.
//!
//! This crate provides the pieces every other firmware crate builds on:
//!
//! - **[`registers`]**: the typed register map (LEDs, buttons, PMOD ports,
//!   UART).
//! - **[`RegisterBus`]**: the bus seam. [`Mmio`] talks to the real
//!   peripherals; the simulated board in `sim` is used on the host.
//! - **[`Delay`]**: blocking busy-wait, implemented by [`SpinDelay`].
//! - **[`Uart`]**: transmit-only serial port with [`core::fmt::Write`].
//!
//! # Quick start
//!
//! ```ignore
//! use icebreaker_board::{registers::LEDS, Mmio};
//!
//! // Only valid when running on the SoC.
//! let mut bus = unsafe { Mmio::new() };
//! LEDS.write(&mut bus, 0x0f);
//! ```
//!
//! # Features
//!
//! - **`defmt`**: [`defmt::Format`] implementations on the public
//!   descriptor types.
//! - **`sim`**: `SimulatedBus` and `RecordingDelay` for host-side tests.

#![cfg_attr(not(test), no_std)]

pub use bus::{Mmio, RegisterBus};
pub use delay::{Delay, SpinDelay};
pub use registers::{Register, RegisterInfo, REGISTER_MAP};
pub use uart::{Uart, UART_DIVISOR};

mod bus;
mod delay;
pub mod registers;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod uart;
