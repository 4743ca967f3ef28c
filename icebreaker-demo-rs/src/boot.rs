//! One-shot boot banner on the UART.

use core::fmt::Write;

use icebreaker_board::{RegisterBus, Uart, UART_DIVISOR};

/// Status byte sent straight to the data register before anything else.
pub const BOOT_STATUS: u8 = b'B';

/// Text streamed after the status byte; together they read `Booting.`.
pub const BOOT_MESSAGE: &str = "ooting.\n";

/// Program the baud divisor and send the boot banner.
///
/// Fire-and-forget: there is no handshake and nothing to report back.
pub fn report<B: RegisterBus>(bus: &mut B) {
    let mut uart = Uart::new(bus);
    uart.set_divisor(UART_DIVISOR);
    uart.write_byte(BOOT_STATUS);
    // Writing to the UART never fails.
    let _ = uart.write_str(BOOT_MESSAGE);

    #[cfg(feature = "defmt")]
    defmt::info!("boot banner sent, divisor {=u32}", UART_DIVISOR);
}
