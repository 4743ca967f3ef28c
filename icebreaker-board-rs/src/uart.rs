//! Transmit-only UART.
//!
//! The SoC UART has two registers: a baud divisor and a data port. Writing
//! the data port stalls the bus until the byte has been accepted, so there
//! is no status flag to poll and no error path.

use core::fmt;

use crate::bus::RegisterBus;
use crate::registers::{UARTDAT, UARTDIV};

/// System clock of the iCEBreaker SoC in Hz.
pub const CLOCK_HZ: u32 = 12_000_000;

/// Default serial baud rate.
pub const BAUD_RATE: u32 = 115_200;

/// Divisor for a given clock and baud rate (clock cycles per bit, truncated).
pub const fn divisor(clock_hz: u32, baud: u32) -> u32 {
    clock_hz / baud
}

/// Divisor for [`BAUD_RATE`] at [`CLOCK_HZ`]; evaluates to 104.
pub const UART_DIVISOR: u32 = divisor(CLOCK_HZ, BAUD_RATE);

/// Fire-and-forget UART transmitter.
///
/// Owns (or borrows, via `&mut B`) a register bus. Implements
/// [`core::fmt::Write`], so `write!` can stream formatted text.
pub struct Uart<B> {
    bus: B,
}

impl<B: RegisterBus> Uart<B> {
    /// Wrap a bus. No register traffic is generated.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Program the baud divisor.
    pub fn set_divisor(&mut self, divisor: u32) {
        UARTDIV.write(&mut self.bus, divisor);
    }

    /// Send one byte.
    pub fn write_byte(&mut self, byte: u8) {
        UARTDAT.write(&mut self.bus, u32::from(byte));
    }

    /// Send a byte slice in order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Give the bus back.
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> fmt::Write for Uart<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::*;
    use crate::sim::SimulatedBus;

    #[test]
    fn default_divisor_is_104() {
        assert_eq!(UART_DIVISOR, 104);
    }

    #[test]
    fn bytes_go_to_data_register_in_order() {
        let mut bus = SimulatedBus::new();
        let mut uart = Uart::new(&mut bus);
        uart.set_divisor(UART_DIVISOR);
        uart.write_bytes(b"ok");

        let writes = bus.writes();
        assert_eq!(writes.len(), 3);
        assert_eq!((writes[0].address, writes[0].value), (UARTDIV.address(), 104));
        assert_eq!((writes[1].address, writes[1].value), (UARTDAT.address(), u32::from(b'o')));
        assert_eq!((writes[2].address, writes[2].value), (UARTDAT.address(), u32::from(b'k')));
    }

    #[test]
    fn formatted_output() {
        let mut bus = SimulatedBus::new();
        let mut uart = Uart::new(&mut bus);
        write!(uart, "{}-{:02x}", 7, 0xa).unwrap();

        let mut text: heapless::Vec<u8, 16> = heapless::Vec::new();
        for value in bus.writes_to(UARTDAT.address()) {
            text.push(value as u8).unwrap();
        }
        assert_eq!(&text[..], b"7-0a");
    }
}
