use crate::{CounterStore, WriteProtect};

/// The seconds counter, backed by a possibly write protected storage.
pub struct TickCounter<S: CounterStore, P: WriteProtect> {
    store: S,
    protect: P,
}

/// An open write window on the counter storage.
/// Dropping it restores the protection state that was active when it was opened.
pub struct WriteWindow<'a, P: WriteProtect> {
    protect: &'a P,
    restore: P::State,
}

impl<'a, P: WriteProtect> WriteWindow<'a, P> {
    /// Open a write window.
    pub fn open(protect: &'a P) -> Self {
        let restore = protect.unprotect();
        Self { protect, restore }
    }
}

impl<P: WriteProtect> Drop for WriteWindow<'_, P> {
    fn drop(&mut self) {
        self.protect.restore(self.restore);
    }
}

impl<S: CounterStore, P: WriteProtect> TickCounter<S, P> {
    /// Create a counter on top of `store`.
    pub const fn new(store: S, protect: P) -> Self {
        Self { store, protect }
    }

    /// Load `seed` into the counter, unless it is zero in which case the stored value is kept.
    /// Returns whether the counter was overwritten.
    pub fn seed(&self, seed: u32) -> bool {
        if seed == 0 {
            return false;
        }

        critical_section::with(|cs| {
            let _window = WriteWindow::open(&self.protect);
            self.store.store(cs, seed);
        });
        true
    }

    /// Sample the counter.
    pub fn get(&self) -> u32 {
        critical_section::with(|cs| self.store.load(cs))
    }

    /// Advance the counter by one, returning the new value.
    pub(crate) fn increment(&self) -> u32 {
        critical_section::with(|cs| {
            let next = self.store.load(cs).wrapping_add(1);
            let _window = WriteWindow::open(&self.protect);
            self.store.store(cs, next);
            next
        })
    }
}
