use core::{
    future::Future,
    pin::Pin,
    sync::atomic::{AtomicBool, AtomicU32, Ordering},
    task::{Context, Poll},
};

use futures::task::AtomicWaker;

/// A caller owned wake request at an absolute counter value.
///
/// All fields are shared between the foreground and the tick interrupt handler:
/// the handler sets the triggered flag, the foreground consumes it and re-arms.
pub struct Alarm {
    timestamp: AtomicU32,
    triggered: AtomicBool,
    /// Cleared when the alarm fires, set when it is registered or re-armed.
    armed: AtomicBool,
    waker: AtomicWaker,
}

/// Future returned by [`Alarm::wait`].
pub struct AlarmWait<'a> {
    alarm: &'a Alarm,
}

impl Alarm {
    /// Create an alarm firing at `timestamp`.
    pub const fn new(timestamp: u32) -> Self {
        Self {
            timestamp: AtomicU32::new(timestamp),
            triggered: AtomicBool::new(false),
            armed: AtomicBool::new(false),
            waker: AtomicWaker::new(),
        }
    }

    /// Get the counter value at which the alarm fires.
    pub fn timestamp(&self) -> u32 {
        self.timestamp.load(Ordering::Acquire)
    }

    /// Get whether the alarm has fired and the trigger is not yet consumed.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }

    /// Get whether the alarm is waiting to fire.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Consume the trigger, returning whether the alarm had fired.
    pub fn take_triggered(&self) -> bool {
        critical_section::with(|_| {
            let triggered = self.triggered.load(Ordering::Acquire);
            if triggered {
                self.triggered.store(false, Ordering::Release);
            }
            triggered
        })
    }

    /// Move the alarm to `timestamp`, clearing any unconsumed trigger and arming it again.
    pub fn rearm(&self, timestamp: u32) {
        critical_section::with(|_| {
            self.timestamp.store(timestamp, Ordering::Release);
            self.triggered.store(false, Ordering::Release);
            self.armed.store(true, Ordering::Release);
        });
    }

    /// Move the alarm `seconds` past its current timestamp and arm it again.
    pub fn advance(&self, seconds: u32) {
        critical_section::with(|_| {
            let timestamp = self.timestamp.load(Ordering::Acquire).wrapping_add(seconds);
            self.timestamp.store(timestamp, Ordering::Release);
            self.triggered.store(false, Ordering::Release);
            self.armed.store(true, Ordering::Release);
        });
    }

    /// Get a future that completes when the alarm fires.
    /// Completing consumes the trigger.
    pub fn wait(&self) -> AlarmWait<'_> {
        AlarmWait { alarm: self }
    }

    /// Prepare the alarm for registration.
    pub(crate) fn arm(&self) {
        self.triggered.store(false, Ordering::Release);
        self.armed.store(true, Ordering::Release);
    }

    /// Fire the alarm if it is armed, returning whether it fired.
    /// Called from the tick handler.
    pub(crate) fn fire(&self) -> bool {
        if !self.armed.load(Ordering::Acquire) {
            return false;
        }
        self.armed.store(false, Ordering::Release);
        self.triggered.store(true, Ordering::Release);
        self.waker.wake();
        true
    }
}

impl Future for AlarmWait<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.alarm.take_triggered() {
            return Poll::Ready(());
        }

        // Register before checking again so that a trigger in between is not lost.
        self.alarm.waker.register(cx.waker());

        if self.alarm.take_triggered() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}
