//! The demo's control loop.
//!
//! Every iteration:
//!
//! 1. Drive the LEDs with a fixed pattern XOR a bit that walks through all
//!    eight positions.
//! 2. Sample the buttons. Exactly [`DECIMAL_BUTTONS`] held selects decimal,
//!    anything else hexadecimal.
//! 3. Show the counter's last two digits on the 7-segment display (this
//!    blocks for the display's dwell period and paces the whole loop).
//! 4. Increment the counter.

use icebreaker_board::registers::{BTNS, LEDS};
use icebreaker_board::{Delay, RegisterBus};
use icebreaker_seven_segment::{DisplayMode, MultiplexedDisplay, RefreshConfig};

use crate::boot;

/// LED pattern the walking bit is XORed onto.
pub const LED_BASE_PATTERN: u8 = 0x60;

/// Button state that switches the display to decimal.
pub const DECIMAL_BUTTONS: u8 = 0x08;

/// Counter value after reset.
pub const INITIAL_COUNTER: u32 = 1;

/// LED pattern shown while the counter is at `counter`.
pub const fn led_pattern(counter: u32) -> u8 {
    LED_BASE_PATTERN ^ (1 << (counter & 7))
}

/// Display mode for a sampled button state.
pub const fn select_mode(buttons: u8) -> DisplayMode {
    if buttons == DECIMAL_BUTTONS {
        DisplayMode::Decimal
    } else {
        DisplayMode::Hexadecimal
    }
}

/// Byte handed to the display for `counter` in `mode`.
///
/// Decimal keeps the last two decimal digits of the full counter; hex keeps
/// the low byte.
pub const fn display_value(counter: u32, mode: DisplayMode) -> u8 {
    match mode {
        DisplayMode::Decimal => (counter % 100) as u8,
        DisplayMode::Hexadecimal => counter as u8,
    }
}

/// What one iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Counter value shown in this iteration.
    pub counter: u32,
    /// Value written to the LEDs.
    pub leds: u8,
    /// Button state sampled.
    pub buttons: u8,
    /// Mode the counter was rendered in.
    pub mode: DisplayMode,
}

/// The running demo: owns the bus, the delay and the counter.
///
/// Generic over the bus and delay so the same loop runs on the SoC
/// (`Mmio`, `SpinDelay`) and on the host against the simulated board.
pub struct Demo<B, D> {
    bus: B,
    delay: D,
    display: MultiplexedDisplay,
    counter: u32,
}

impl<B, D> Demo<B, D>
where
    B: RegisterBus,
    D: Delay,
{
    /// Boot with the reference refresh timing.
    pub fn start(bus: B, delay: D) -> Self {
        Self::start_with_config(bus, delay, RefreshConfig::default())
    }

    /// Send the boot banner, prepare the display and reset the counter.
    pub fn start_with_config(mut bus: B, delay: D, config: RefreshConfig) -> Self {
        boot::report(&mut bus);

        let display = MultiplexedDisplay::new(config);
        display.init(&mut bus);

        Self {
            bus,
            delay,
            display,
            counter: INITIAL_COUNTER,
        }
    }

    /// Counter value the next iteration will show.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Shared access to the bus, e.g. to inspect a simulated board.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the bus, e.g. to script simulated inputs.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Run one iteration of the loop.
    pub fn step(&mut self) -> Step {
        let counter = self.counter;

        let leds = led_pattern(counter);
        LEDS.write(&mut self.bus, leds);

        let buttons = BTNS.read(&mut self.bus);
        let mode = select_mode(buttons);

        #[cfg(feature = "defmt")]
        defmt::trace!("step {=u32}: leds={=u8:#x} buttons={=u8:#x} {}", counter, leds, buttons, mode);

        self.display
            .render(&mut self.bus, &mut self.delay, display_value(counter, mode), mode);

        self.counter = counter.wrapping_add(1);

        Step {
            counter,
            leds,
            buttons,
            mode,
        }
    }

    /// Loop forever. Only a reset stops the demo.
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Tear down and return the bus and delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}
