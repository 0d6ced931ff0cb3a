use crate::{ClockSource, Divider};

/// The hardware timer producing the periodic tick.
///
/// The adapter parameter `A` lets a driver crate implement the trait for
/// peripheral types it does not own.
pub trait RtcTimer<A> {
    /// The prescaler values the timer can apply to its source, ascending.
    const PRESCALERS: &'static [u16];

    /// The largest number of prescaled counts that can make up one tick.
    const MAX_MODULO: u32;

    /// Select `source` as the timer input and program `divider`.
    fn configure(&self, source: ClockSource, divider: Divider);

    /// Enable the periodic tick interrupt.
    fn tick_int_enable(&self);

    /// Disable the periodic tick interrupt.
    fn tick_int_disable(&self);

    /// Acknowledge the pending tick.
    /// Called exactly once per tick from the interrupt handler.
    fn clear_pending_tick(&self);
}
