//! icebreaker-hw-interface
//!
//! Demo firmware for the PicoRV32 SoC on the iCEBreaker board. Wires the
//! library crates to the real hardware:
//!
//! 1. The reset stub in `start.s` sets up the stack and clears `.bss`.
//! 2. [`firmware_main`] takes the memory-mapped bus and the spin delay.
//! 3. `Demo::start` prints `Booting.` on the UART and enables the
//!    7-segment PMOD.
//! 4. `Demo::run` counts forever: walking LEDs, counter on the display,
//!    decimal while button 3 is held.
//!
//! Build with `cargo build --release` from this directory, then pack the
//! image with `icebreaker-flash-image`.

#![no_std]
#![no_main]

use core::arch::global_asm;

use panic_halt as _;

use icebreaker_board::{Mmio, SpinDelay};
use icebreaker_demo::Demo;

// Set up the stack and jump to `firmware_main()`.
global_asm!(include_str!("start.s"));

#[no_mangle]
pub extern "C" fn firmware_main() -> ! {
    // SAFETY: we run on the SoC, single hart, and this is the only handle.
    let bus = unsafe { Mmio::new() };

    Demo::start(bus, SpinDelay::new()).run()
}
