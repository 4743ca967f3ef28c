//! Register map of the iCEBreaker demo SoC.
//!
//! Every peripheral lives in a small MMIO window starting at `0x400`:
//!
//! ```text
//! 0x400  LEDS      u8   write   discrete LEDs
//! 0x401  BTNS      u8   read    push buttons
//! 0x404  SPI       u32  r/w     (not used by the demo)
//! 0x408  PM1A_DI   u8   read    PMOD 1A input
//! 0x409  PM1A_DO   u8   write   PMOD 1A output (7-segment bus)
//! 0x40A  PM1A_OE   u8   write   PMOD 1A output enable
//! 0x40C  PM1B_DI   u8   read    PMOD 1B input
//! 0x40D  PM1B_DO   u8   write   PMOD 1B output
//! 0x40E  PM1B_OE   u8   write   PMOD 1B output enable
//! 0x410  UARTDIV   u32  write   UART baud divisor
//! 0x414  UARTDAT   u32  write   UART transmit data
//! ```
//!
//! Each register is exported as a typed [`Register`] constant. The width
//! decides which bus primitive is used and the access marker decides
//! whether `read`, `write` or both exist, so writing to `BTNS` or reading
//! `UARTDAT` does not compile.

use core::fmt;
use core::marker::PhantomData;

use crate::bus::RegisterBus;

// ---------------------------------------------------------------------------
// MMIO window
// ---------------------------------------------------------------------------

/// First address of the peripheral window.
pub const MMIO_BASE: usize = 0x0000_0400;

/// Size of the peripheral window in bytes (up to and including `UARTDAT`).
pub const MMIO_SIZE: usize = 0x18;

// ---------------------------------------------------------------------------
// Width and access descriptors
// ---------------------------------------------------------------------------

/// Width of a register as seen on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterWidth {
    /// 8-bit register.
    Byte,
    /// 32-bit register.
    Word,
}

/// Direction(s) in which a register may be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Input only.
    Read,
    /// Output only.
    Write,
    /// Input and output.
    ReadWrite,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u32 {}
    impl Sealed for super::ReadOnly {}
    impl Sealed for super::WriteOnly {}
    impl Sealed for super::ReadWrite {}
}

/// Value type of a register: `u8` or `u32`.
pub trait Width: Copy + sealed::Sealed {
    /// Descriptor matching this width.
    const WIDTH: RegisterWidth;

    /// Load a value of this width from `address`.
    fn load<B: RegisterBus + ?Sized>(bus: &mut B, address: usize) -> Self;

    /// Store a value of this width to `address`.
    fn store<B: RegisterBus + ?Sized>(bus: &mut B, address: usize, value: Self);
}

impl Width for u8 {
    const WIDTH: RegisterWidth = RegisterWidth::Byte;

    #[inline(always)]
    fn load<B: RegisterBus + ?Sized>(bus: &mut B, address: usize) -> Self {
        bus.read_u8(address)
    }

    #[inline(always)]
    fn store<B: RegisterBus + ?Sized>(bus: &mut B, address: usize, value: Self) {
        bus.write_u8(address, value);
    }
}

impl Width for u32 {
    const WIDTH: RegisterWidth = RegisterWidth::Word;

    #[inline(always)]
    fn load<B: RegisterBus + ?Sized>(bus: &mut B, address: usize) -> Self {
        bus.read_u32(address)
    }

    #[inline(always)]
    fn store<B: RegisterBus + ?Sized>(bus: &mut B, address: usize, value: Self) {
        bus.write_u32(address, value);
    }
}

/// Access marker for input registers.
pub enum ReadOnly {}

/// Access marker for output registers.
pub enum WriteOnly {}

/// Access marker for bidirectional registers.
pub enum ReadWrite {}

/// Type-level access mode of a register.
pub trait AccessMode: sealed::Sealed {
    /// Descriptor matching this mode.
    const ACCESS: Access;
}

/// Marker for access modes that allow reads.
pub trait Readable: AccessMode {}

/// Marker for access modes that allow writes.
pub trait Writable: AccessMode {}

impl AccessMode for ReadOnly {
    const ACCESS: Access = Access::Read;
}

impl AccessMode for WriteOnly {
    const ACCESS: Access = Access::Write;
}

impl AccessMode for ReadWrite {
    const ACCESS: Access = Access::ReadWrite;
}

impl Readable for ReadOnly {}
impl Readable for ReadWrite {}
impl Writable for WriteOnly {}
impl Writable for ReadWrite {}

// ---------------------------------------------------------------------------
// Typed register
// ---------------------------------------------------------------------------

/// A hardware register at a fixed address.
///
/// `W` is the value type (`u8` or `u32`) and `A` one of [`ReadOnly`],
/// [`WriteOnly`] or [`ReadWrite`]. Registers carry no state of their own;
/// all I/O goes through the [`RegisterBus`] handed to [`read`](Self::read)
/// and [`write`](Self::write).
pub struct Register<W, A> {
    address: usize,
    _marker: PhantomData<(W, A)>,
}

// Manual impls: the markers are uninhabited and need not be `Copy`.
impl<W, A> Clone for Register<W, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, A> Copy for Register<W, A> {}

impl<W, A> fmt::Debug for Register<W, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register({:#06x})", self.address)
    }
}

impl<W: Width, A: AccessMode> Register<W, A> {
    /// Declare a register at `address`.
    pub const fn at(address: usize) -> Self {
        Self {
            address,
            _marker: PhantomData,
        }
    }

    /// Bus address of the register.
    pub const fn address(&self) -> usize {
        self.address
    }

    /// Width descriptor of the register.
    pub const fn width(&self) -> RegisterWidth {
        W::WIDTH
    }

    /// Access descriptor of the register.
    pub const fn access(&self) -> Access {
        A::ACCESS
    }
}

impl<W: Width, A: Readable> Register<W, A> {
    /// Read the current value.
    #[inline(always)]
    pub fn read<B: RegisterBus + ?Sized>(&self, bus: &mut B) -> W {
        W::load(bus, self.address)
    }
}

impl<W: Width, A: Writable> Register<W, A> {
    /// Write `value`.
    #[inline(always)]
    pub fn write<B: RegisterBus + ?Sized>(&self, bus: &mut B, value: W) {
        W::store(bus, self.address, value);
    }
}

// ---------------------------------------------------------------------------
// Register constants
// ---------------------------------------------------------------------------

/// Discrete LED outputs.
pub const LEDS: Register<u8, WriteOnly> = Register::at(0x0000_0400);

/// Push button inputs, one bit per button.
pub const BTNS: Register<u8, ReadOnly> = Register::at(0x0000_0401);

/// SPI flash data port. Unused by the demo.
pub const SPI: Register<u32, ReadWrite> = Register::at(0x0000_0404);

/// PMOD 1A input pins.
pub const PM1A_DI: Register<u8, ReadOnly> = Register::at(0x0000_0408);

/// PMOD 1A output pins. Drives the shared 7-segment bus.
pub const PM1A_DO: Register<u8, WriteOnly> = Register::at(0x0000_0409);

/// PMOD 1A output-enable mask (1 = output).
pub const PM1A_OE: Register<u8, WriteOnly> = Register::at(0x0000_040A);

/// PMOD 1B input pins.
pub const PM1B_DI: Register<u8, ReadOnly> = Register::at(0x0000_040C);

/// PMOD 1B output pins. Reserved.
pub const PM1B_DO: Register<u8, WriteOnly> = Register::at(0x0000_040D);

/// PMOD 1B output-enable mask (1 = output).
pub const PM1B_OE: Register<u8, WriteOnly> = Register::at(0x0000_040E);

/// UART baud-rate divisor (system clock cycles per bit).
pub const UARTDIV: Register<u32, WriteOnly> = Register::at(0x0000_0410);

/// UART transmit data. A write blocks the bus until the byte is accepted.
pub const UARTDAT: Register<u32, WriteOnly> = Register::at(0x0000_0414);

// ---------------------------------------------------------------------------
// Descriptor table
// ---------------------------------------------------------------------------

/// Static description of one register, for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterInfo {
    /// Short register name as used in the board documentation.
    pub name: &'static str,
    /// Bus address.
    pub address: usize,
    /// Register width.
    pub width: RegisterWidth,
    /// Access mode.
    pub access: Access,
}

const fn info<W: Width, A: AccessMode>(name: &'static str, register: &Register<W, A>) -> RegisterInfo {
    RegisterInfo {
        name,
        address: register.address(),
        width: W::WIDTH,
        access: A::ACCESS,
    }
}

/// All registers of the SoC, in address order.
pub const REGISTER_MAP: [RegisterInfo; 11] = [
    info("LEDS", &LEDS),
    info("BTNS", &BTNS),
    info("SPI", &SPI),
    info("PM1A_DI", &PM1A_DI),
    info("PM1A_DO", &PM1A_DO),
    info("PM1A_OE", &PM1A_OE),
    info("PM1B_DI", &PM1B_DI),
    info("PM1B_DO", &PM1B_DO),
    info("PM1B_OE", &PM1B_OE),
    info("UARTDIV", &UARTDIV),
    info("UARTDAT", &UARTDAT),
];

/// Look up a register descriptor by bus address.
pub fn lookup(address: usize) -> Option<&'static RegisterInfo> {
    REGISTER_MAP.iter().find(|r| r.address == address)
}
