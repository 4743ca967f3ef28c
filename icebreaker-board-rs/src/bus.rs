//! Register bus abstraction.
//!
//! [`RegisterBus`] is the single seam between the drivers and the hardware.
//! On the SoC it is implemented by [`Mmio`], which turns every access into
//! a volatile load or store. Host tests use the simulated board from the
//! `sim` module instead.

use core::ptr;

/// Byte- and word-wide access to fixed bus addresses.
///
/// Accesses cannot fail. Addresses come from the register map in
/// [`crate::registers`]; anything else is undefined at the hardware level.
pub trait RegisterBus {
    /// Read an 8-bit register.
    fn read_u8(&mut self, address: usize) -> u8;

    /// Write an 8-bit register.
    fn write_u8(&mut self, address: usize, value: u8);

    /// Read a 32-bit register.
    fn read_u32(&mut self, address: usize) -> u32;

    /// Write a 32-bit register.
    fn write_u32(&mut self, address: usize, value: u32);
}

// Lets one bus be lent to several components in turn.
impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    #[inline(always)]
    fn read_u8(&mut self, address: usize) -> u8 {
        (**self).read_u8(address)
    }

    #[inline(always)]
    fn write_u8(&mut self, address: usize, value: u8) {
        (**self).write_u8(address, value);
    }

    #[inline(always)]
    fn read_u32(&mut self, address: usize) -> u32 {
        (**self).read_u32(address)
    }

    #[inline(always)]
    fn write_u32(&mut self, address: usize, value: u32) {
        (**self).write_u32(address, value);
    }
}

/// Memory-mapped register bus of the real SoC.
///
/// Zero-sized; every access is a volatile load/store so the compiler never
/// merges or drops register traffic.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Take the memory-mapped bus.
    ///
    /// # Safety
    ///
    /// The caller must be running on the iCEBreaker SoC, where the register
    /// map in [`crate::registers`] is backed by real peripherals, and must
    /// not create a second handle that is used concurrently.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read_u8(&mut self, address: usize) -> u8 {
        unsafe { ptr::read_volatile(address as *const u8) }
    }

    #[inline(always)]
    fn write_u8(&mut self, address: usize, value: u8) {
        unsafe { ptr::write_volatile(address as *mut u8, value) };
    }

    #[inline(always)]
    fn read_u32(&mut self, address: usize) -> u32 {
        unsafe { ptr::read_volatile(address as *const u32) }
    }

    #[inline(always)]
    fn write_u32(&mut self, address: usize, value: u32) {
        unsafe { ptr::write_volatile(address as *mut u32, value) };
    }
}
