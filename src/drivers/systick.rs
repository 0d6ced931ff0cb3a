use cortex_m::peripheral::{SCB, SYST};

use super::Adapter;
use crate::{ClockSource, Divider, RtcTimer};

const CSR_ENABLE: u32 = 1 << 0;
const CSR_TICKINT: u32 = 1 << 1;
const CSR_CLKSOURCE: u32 = 1 << 2;

/// A cortex SysTick tick driver.
///
/// Only [`ClockSource::System`] gives a one second tick: it runs SysTick from the processor clock.
/// The other sources select the implementation defined external reference clock
/// (e.g. HCLK/8 on STM32), which ticks at a chip specific rate and is warned about in `configure`.
pub struct SysTickDrv {
    _private: (),
}

impl SysTickDrv {
    /// Take ownership of the SysTick peripheral.
    /// The peripheral token is consumed so that the driver can be shared with the interrupt handler.
    pub const fn new(_syst: SYST) -> Self {
        Self { _private: () }
    }

    /// Create the driver without the peripheral token, e.g. in a `static` initializer.
    ///
    /// # Safety
    ///
    /// Nothing else may use the SysTick peripheral.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }

    fn regs(&self) -> &cortex_m::peripheral::syst::RegisterBlock {
        unsafe { &*SYST::PTR }
    }
}

impl RtcTimer<Adapter> for SysTickDrv {
    // SysTick has no prescaler.
    const PRESCALERS: &'static [u16] = &[1];
    // SysTick is a 24 bit counter.
    const MAX_MODULO: u32 = 0x100_0000;

    fn configure(&self, source: ClockSource, divider: Divider) {
        let clk = clksource(source);
        if clk == 0 {
            warn!("systick has no {} input, using the external reference clock", source);
        }

        let regs = self.regs();
        unsafe {
            regs.csr.modify(|r| r & !CSR_ENABLE);
            regs.rvr.write(divider.modulo - 1);
            regs.cvr.write(0);
            regs.csr.modify(|r| (r & !CSR_CLKSOURCE) | clk | CSR_ENABLE);
        }
    }

    fn tick_int_enable(&self) {
        unsafe { self.regs().csr.modify(|r| r | CSR_TICKINT) };
    }

    fn tick_int_disable(&self) {
        unsafe { self.regs().csr.modify(|r| r & !CSR_TICKINT) };
    }

    fn clear_pending_tick(&self) {
        // Reading CSR clears COUNTFLAG.
        let _ = self.regs().csr.read();
        SCB::clear_pendst();
    }
}

/// The CSR CLKSOURCE bit for `source`, zero selecting the external reference clock.
const fn clksource(source: ClockSource) -> u32 {
    match source {
        ClockSource::System(_) => CSR_CLKSOURCE,
        ClockSource::Crystal | ClockSource::LowPower => 0,
    }
}
