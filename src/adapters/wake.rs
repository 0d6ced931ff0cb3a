use core::sync::atomic::{AtomicBool, Ordering};

/// Control over the processor's low-power sleep.
pub trait WakeControl<A> {
    /// Request that the processor stays awake when the running interrupt handler returns,
    /// so that the foreground resumes.
    fn wake_on_exit(&self);
}

/// A wake request that is kept until the foreground consumes it.
///
/// The interrupt handler [`set`](Self::set)s it together with its wake request.
/// The foreground [`take`](Self::take)s it with interrupts masked right before going to sleep,
/// and skips the sleep if a request arrived since it last looked at its alarms.
pub struct WakeLatch {
    pending: AtomicBool,
}

impl WakeLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Record a wake request.
    pub fn set(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Get whether a wake request is pending.
    pub fn is_set(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consume the pending wake request, returning whether there was one.
    pub fn take(&self) -> bool {
        critical_section::with(|_| {
            let pending = self.pending.load(Ordering::Acquire);
            if pending {
                self.pending.store(false, Ordering::Release);
            }
            pending
        })
    }
}

impl Default for WakeLatch {
    fn default() -> Self {
        Self::new()
    }
}
