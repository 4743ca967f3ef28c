//! In-memory model of the SoC register window.
//!
//! [`SimulatedBus`] stands in for [`Mmio`](crate::Mmio) in host tests: it
//! keeps a byte-addressed copy of the peripheral window, replays scripted
//! button states, and logs every write in order. [`RecordingDelay`] stands
//! in for [`SpinDelay`](crate::SpinDelay) and only counts.
//!
//! Enabled by the `sim` feature.

use heapless::{Deque, Vec};

use crate::bus::RegisterBus;
use crate::delay::Delay;
use crate::registers::{BTNS, MMIO_BASE, MMIO_SIZE};

/// Number of writes the log keeps; later writes are counted but dropped.
pub const WRITE_LOG_CAPACITY: usize = 4096;

/// Number of button states that can be queued ahead of time.
pub const BUTTON_SCRIPT_CAPACITY: usize = 64;

/// One logged register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusWrite {
    /// Target address.
    pub address: usize,
    /// Written value, zero-extended for byte writes.
    pub value: u32,
}

/// Simulated register window.
///
/// Reads return whatever was last stored at the address, except `BTNS`,
/// which pops the next scripted button state and falls back to the held
/// state once the script is exhausted.
///
/// Accesses outside the peripheral window panic; that is always a bug in
/// the code under test.
pub struct SimulatedBus {
    memory: [u8; MMIO_SIZE],
    buttons_held: u8,
    button_script: Deque<u8, BUTTON_SCRIPT_CAPACITY>,
    button_reads: usize,
    log: Vec<BusWrite, WRITE_LOG_CAPACITY>,
    dropped_writes: usize,
}

impl Default for SimulatedBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedBus {
    /// Fresh board: all registers zero, no buttons pressed, empty log.
    pub fn new() -> Self {
        Self {
            memory: [0; MMIO_SIZE],
            buttons_held: 0,
            button_script: Deque::new(),
            button_reads: 0,
            log: Vec::new(),
            dropped_writes: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Hold `state` on the button register until changed.
    pub fn hold_buttons(&mut self, state: u8) {
        self.buttons_held = state;
    }

    /// Queue button states returned by successive `BTNS` reads.
    ///
    /// # Panics
    ///
    /// If more than [`BUTTON_SCRIPT_CAPACITY`] states are pending.
    pub fn script_buttons(&mut self, states: &[u8]) {
        for &state in states {
            if self.button_script.push_back(state).is_err() {
                panic!("button script longer than {} entries", BUTTON_SCRIPT_CAPACITY);
            }
        }
    }

    /// Number of `BTNS` reads so far.
    pub fn button_reads(&self) -> usize {
        self.button_reads
    }

    // -----------------------------------------------------------------------
    // Observations
    // -----------------------------------------------------------------------

    /// All logged writes, oldest first.
    pub fn writes(&self) -> &[BusWrite] {
        &self.log
    }

    /// Values written to `address`, oldest first.
    pub fn writes_to(&self, address: usize) -> impl Iterator<Item = u32> + '_ {
        self.log
            .iter()
            .filter(move |w| w.address == address)
            .map(|w| w.value)
    }

    /// Writes that did not fit in the log.
    pub fn dropped_writes(&self) -> usize {
        self.dropped_writes
    }

    /// Forget logged writes; register contents are kept.
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.dropped_writes = 0;
    }

    /// Current contents of the byte at `address`.
    pub fn byte(&self, address: usize) -> u8 {
        self.memory[Self::offset(address, 1)]
    }

    /// Current contents of the word at `address`.
    pub fn word(&self, address: usize) -> u32 {
        let offset = Self::offset(address, 4);
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.memory[offset..offset + 4]);
        u32::from_le_bytes(bytes)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn offset(address: usize, size: usize) -> usize {
        match address.checked_sub(MMIO_BASE) {
            Some(offset) if offset + size <= MMIO_SIZE => offset,
            _ => panic!("access to {:#x} outside the peripheral window", address),
        }
    }

    fn record(&mut self, address: usize, value: u32) {
        if self.log.push(BusWrite { address, value }).is_err() {
            self.dropped_writes += 1;
        }
    }

    fn sample_buttons(&mut self) -> u8 {
        self.button_reads += 1;
        if let Some(state) = self.button_script.pop_front() {
            self.buttons_held = state;
        }
        self.buttons_held
    }
}

impl RegisterBus for SimulatedBus {
    fn read_u8(&mut self, address: usize) -> u8 {
        if address == BTNS.address() {
            return self.sample_buttons();
        }
        self.byte(address)
    }

    fn write_u8(&mut self, address: usize, value: u8) {
        let offset = Self::offset(address, 1);
        self.memory[offset] = value;
        self.record(address, u32::from(value));
    }

    fn read_u32(&mut self, address: usize) -> u32 {
        self.word(address)
    }

    fn write_u32(&mut self, address: usize, value: u32) {
        let offset = Self::offset(address, 4);
        self.memory[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        self.record(address, value);
    }
}

/// Delay that returns immediately and remembers what it was asked for.
#[derive(Debug, Default, Clone)]
pub struct RecordingDelay {
    calls: usize,
    total: u64,
    last: Option<u32>,
    uniform: Option<u32>,
    mixed: bool,
}

impl RecordingDelay {
    /// Fresh recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `pause` calls.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Sum of all requested counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count passed to the most recent call.
    pub fn last(&self) -> Option<u32> {
        self.last
    }

    /// The count used by every call, if all calls used the same one.
    pub fn uniform_count(&self) -> Option<u32> {
        if self.mixed {
            None
        } else {
            self.uniform
        }
    }
}

impl Delay for RecordingDelay {
    fn pause(&mut self, count: u32) {
        self.calls += 1;
        self.total += u64::from(count);
        self.last = Some(count);
        match self.uniform {
            None => self.uniform = Some(count),
            Some(previous) if previous != count => self.mixed = true,
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{LEDS, PM1A_DO, UARTDIV};

    #[test]
    fn writes_are_stored_and_logged() {
        let mut bus = SimulatedBus::new();
        LEDS.write(&mut bus, 0x61);
        UARTDIV.write(&mut bus, 104);
        PM1A_DO.write(&mut bus, 0xff);

        assert_eq!(bus.byte(LEDS.address()), 0x61);
        assert_eq!(bus.word(UARTDIV.address()), 104);
        assert_eq!(
            bus.writes(),
            &[
                BusWrite { address: 0x400, value: 0x61 },
                BusWrite { address: 0x410, value: 104 },
                BusWrite { address: 0x409, value: 0xff },
            ]
        );
    }

    #[test]
    fn scripted_buttons_then_hold_last() {
        let mut bus = SimulatedBus::new();
        bus.script_buttons(&[0, 8, 2]);

        assert_eq!(BTNS.read(&mut bus), 0);
        assert_eq!(BTNS.read(&mut bus), 8);
        assert_eq!(BTNS.read(&mut bus), 2);
        assert_eq!(BTNS.read(&mut bus), 2);
        assert_eq!(bus.button_reads(), 4);

        bus.hold_buttons(0);
        assert_eq!(BTNS.read(&mut bus), 0);
    }

    #[test]
    fn log_overflow_is_counted() {
        let mut bus = SimulatedBus::new();
        for i in 0..WRITE_LOG_CAPACITY + 3 {
            LEDS.write(&mut bus, i as u8);
        }
        assert_eq!(bus.writes().len(), WRITE_LOG_CAPACITY);
        assert_eq!(bus.dropped_writes(), 3);

        bus.clear_log();
        assert!(bus.writes().is_empty());
        assert_eq!(bus.dropped_writes(), 0);
    }

    #[test]
    #[should_panic(expected = "outside the peripheral window")]
    fn out_of_window_access_panics() {
        let mut bus = SimulatedBus::new();
        bus.write_u8(0x1000, 1);
    }

    #[test]
    fn recording_delay_tracks_counts() {
        let mut delay = RecordingDelay::new();
        assert_eq!(delay.uniform_count(), None);

        delay.pause(1000);
        delay.pause(1000);
        assert_eq!(delay.calls(), 2);
        assert_eq!(delay.total(), 2000);
        assert_eq!(delay.uniform_count(), Some(1000));

        delay.pause(5);
        assert_eq!(delay.last(), Some(5));
        assert_eq!(delay.uniform_count(), None);
    }
}
