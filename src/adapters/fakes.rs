use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, AtomicUsize, Ordering};
use std::sync::Mutex;

use critical_section::CriticalSection;

use crate::{ClockSource, CounterStore, Divider, RtcTimer, WakeControl, WakeLatch, WriteProtect};

pub struct FakeAdapter;

pub struct FakeTimer {
    configured: Mutex<Option<(ClockSource, Divider)>>,
    int_enabled: AtomicBool,
    acks: AtomicUsize,
}

impl FakeTimer {
    pub fn new() -> Self {
        Self {
            configured: Mutex::new(None),
            int_enabled: AtomicBool::new(false),
            acks: AtomicUsize::new(0),
        }
    }

    pub fn configured(&self) -> Option<(ClockSource, Divider)> {
        *self.configured.lock().unwrap()
    }

    pub fn is_int_enabled(&self) -> bool {
        self.int_enabled.load(Ordering::SeqCst)
    }

    pub fn acks(&self) -> usize {
        self.acks.load(Ordering::SeqCst)
    }
}

impl RtcTimer<FakeAdapter> for FakeTimer {
    const PRESCALERS: &'static [u16] = &[1, 10, 16, 64, 100, 256, 1000, 1024];
    const MAX_MODULO: u32 = 0x1_0000;

    fn configure(&self, source: ClockSource, divider: Divider) {
        *self.configured.lock().unwrap() = Some((source, divider));
    }

    fn tick_int_enable(&self) {
        self.int_enabled.store(true, Ordering::SeqCst);
    }

    fn tick_int_disable(&self) {
        self.int_enabled.store(false, Ordering::SeqCst);
    }

    fn clear_pending_tick(&self) {
        self.acks.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeWake {
    requests: AtomicUsize,
    latch: WakeLatch,
}

impl FakeWake {
    pub fn new() -> Self {
        Self {
            requests: AtomicUsize::new(0),
            latch: WakeLatch::new(),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Decide whether the foreground may go to sleep, consuming a pending wake request.
    pub fn may_sleep(&self) -> bool {
        !self.latch.take()
    }
}

impl WakeControl<FakeAdapter> for FakeWake {
    fn wake_on_exit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.latch.set();
    }
}

/// Write protection modelled after a FRAM controller with separate program and data protection bits.
pub struct FakeProtect {
    state: AtomicU8,
    windows: AtomicUsize,
}

impl FakeProtect {
    pub const PROGRAM: u8 = 0b01;
    pub const DATA: u8 = 0b10;

    pub fn new(state: u8) -> Self {
        Self {
            state: AtomicU8::new(state),
            windows: AtomicUsize::new(0),
        }
    }

    pub fn state(&self) -> u8 {
        self.state.load(Ordering::SeqCst)
    }

    pub fn set_state(&self, state: u8) {
        self.state.store(state, Ordering::SeqCst);
    }

    pub fn windows(&self) -> usize {
        self.windows.load(Ordering::SeqCst)
    }

    /// A counter cell living in program memory guarded by this protection.
    pub fn guarded_cell(&self, value: u32) -> GuardedCell<'_> {
        GuardedCell {
            protect: self,
            value: AtomicU32::new(value),
            violations: AtomicUsize::new(0),
        }
    }
}

impl WriteProtect for FakeProtect {
    type State = u8;

    fn unprotect(&self) -> u8 {
        self.windows.fetch_add(1, Ordering::SeqCst);
        let state = self.state();
        self.set_state(state & !Self::PROGRAM);
        state
    }

    fn restore(&self, state: u8) {
        self.set_state(state);
    }
}

pub struct GuardedCell<'a> {
    protect: &'a FakeProtect,
    value: AtomicU32,
    violations: AtomicUsize,
}

impl GuardedCell<'_> {
    pub fn violations(&self) -> usize {
        self.violations.load(Ordering::SeqCst)
    }
}

impl CounterStore for GuardedCell<'_> {
    fn load(&self, _cs: CriticalSection<'_>) -> u32 {
        self.value.load(Ordering::SeqCst)
    }

    fn store(&self, _cs: CriticalSection<'_>, value: u32) {
        if self.protect.state() & FakeProtect::PROGRAM != 0 {
            self.violations.fetch_add(1, Ordering::SeqCst);
        } else {
            self.value.store(value, Ordering::SeqCst);
        }
    }
}
