use cortex_m::{asm, interrupt, peripheral::SCB};

use crate::{WakeControl, WakeLatch};

/// Adapter for the Cortex-M drivers.
pub struct Adapter;

const SCR_SLEEPONEXIT: u32 = 1 << 1;

/// Wake control based on the SCB SLEEPONEXIT bit.
///
/// The foreground calls [`sleep`](Self::sleep) to enter sleep and stay asleep between interrupts.
/// The tick handler clears the bit when an alarm fires, so the foreground resumes after the handler returns.
/// A request raised while the foreground is still awake is latched and makes the next `sleep` return at once.
pub struct SleepOnExit {
    latch: WakeLatch,
}

impl SleepOnExit {
    pub const fn new() -> Self {
        Self {
            latch: WakeLatch::new(),
        }
    }

    /// Sleep until an interrupt handler requests wake-up.
    ///
    /// Returns immediately if wake-up was requested since the previous call.
    pub fn sleep(&self) {
        interrupt::free(|_| {
            if self.latch.take() {
                return;
            }
            // WFI wakes on a pending interrupt even with PRIMASK set.
            // The handler runs once interrupts are enabled again.
            unsafe { (*SCB::PTR).scr.modify(|r| r | SCR_SLEEPONEXIT) };
            asm::dsb();
            asm::wfi();
        });
        self.latch.take();
    }
}

impl Default for SleepOnExit {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeControl<Adapter> for SleepOnExit {
    #[inline]
    fn wake_on_exit(&self) {
        self.latch.set();
        unsafe { (*SCB::PTR).scr.modify(|r| r & !SCR_SLEEPONEXIT) };
    }
}
