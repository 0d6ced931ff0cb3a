use core::cell::Cell;

use critical_section::{CriticalSection, Mutex};

/// The backing storage of the tick counter.
///
/// Both methods are only ever called inside a critical section, so an implementation
/// may use a storage wider than the platform's native atomic access.
pub trait CounterStore {
    /// Read the stored counter value.
    fn load(&self, cs: CriticalSection<'_>) -> u32;

    /// Overwrite the stored counter value.
    fn store(&self, cs: CriticalSection<'_>, value: u32);
}

/// Write protection of the memory holding the counter, e.g. FRAM write protection.
pub trait WriteProtect {
    /// The protection configuration captured when opening a write window.
    type State: Copy;

    /// Allow writes to the counter storage, returning the protection state that was active.
    fn unprotect(&self) -> Self::State;

    /// Restore a protection state previously returned by [`unprotect`](Self::unprotect).
    fn restore(&self, state: Self::State);
}

/// A counter stored in a plain memory cell.
///
/// Place a `static` `CounterCell` in a section that survives reset
/// (e.g. `.noinit` RAM or FRAM) to resume counting after a warm reset.
pub struct CounterCell {
    value: Mutex<Cell<u32>>,
}

impl CounterCell {
    /// Create a new cell holding `value`.
    pub const fn new(value: u32) -> Self {
        Self {
            value: Mutex::new(Cell::new(value)),
        }
    }
}

impl CounterStore for CounterCell {
    #[inline]
    fn load(&self, cs: CriticalSection<'_>) -> u32 {
        self.value.borrow(cs).get()
    }

    #[inline]
    fn store(&self, cs: CriticalSection<'_>, value: u32) {
        self.value.borrow(cs).set(value);
    }
}

impl<T: CounterStore + ?Sized> CounterStore for &T {
    #[inline]
    fn load(&self, cs: CriticalSection<'_>) -> u32 {
        (**self).load(cs)
    }

    #[inline]
    fn store(&self, cs: CriticalSection<'_>, value: u32) {
        (**self).store(cs, value)
    }
}

/// Storage without write protection.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProtect;

impl WriteProtect for NoProtect {
    type State = ();

    #[inline]
    fn unprotect(&self) {}

    #[inline]
    fn restore(&self, _state: ()) {}
}

impl<P: WriteProtect + ?Sized> WriteProtect for &P {
    type State = P::State;

    #[inline]
    fn unprotect(&self) -> Self::State {
        (**self).unprotect()
    }

    #[inline]
    fn restore(&self, state: Self::State) {
        (**self).restore(state)
    }
}
