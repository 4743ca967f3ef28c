//! Blocking busy-wait delays.
//!
//! The soft core has no timer peripheral, so pacing is done by burning
//! cycles. The unit of [`Delay::pause`] is one iteration of a two-instruction
//! countdown loop; how long that takes depends on the core clock and is
//! tuned empirically by callers.

/// A blocking "wait N units" primitive.
pub trait Delay {
    /// Block for roughly `count` loop iterations. `0` returns immediately.
    fn pause(&mut self, count: u32);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    #[inline(always)]
    fn pause(&mut self, count: u32) {
        (**self).pause(count);
    }
}

/// Cycle-burning delay for the real core.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinDelay;

impl SpinDelay {
    /// Create a spin delay.
    pub const fn new() -> Self {
        Self
    }
}

impl Delay for SpinDelay {
    #[cfg(target_arch = "riscv32")]
    #[inline(never)]
    fn pause(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        // `delay` spins `1 + cycles / 2` iterations of an addi/bne pair.
        #[allow(unused_unsafe)]
        unsafe {
            riscv::asm::delay(count.saturating_mul(2));
        }
    }

    #[cfg(not(target_arch = "riscv32"))]
    #[inline(never)]
    fn pause(&mut self, count: u32) {
        for _ in 0..count {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting(u64);

    impl Delay for Counting {
        fn pause(&mut self, count: u32) {
            self.0 += u64::from(count);
        }
    }

    #[test]
    fn spin_delay_returns() {
        let mut delay = SpinDelay::new();
        delay.pause(0);
        delay.pause(1000);
    }

    fn pause_twice<D: Delay>(mut delay: D) {
        delay.pause(3);
        delay.pause(4);
    }

    #[test]
    fn borrowed_delay_forwards() {
        let mut inner = Counting(0);
        pause_twice(&mut inner);
        assert_eq!(inner.0, 7);
    }
}
