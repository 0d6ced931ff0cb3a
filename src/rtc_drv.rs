use core::{cmp::Ordering, marker::PhantomData};

use crate::{
    Alarm, AlarmRegistry, ClockSource, CounterStore, Divider, NotFound, RegistryFull, RtcTimer,
    TickCounter, WakeControl, WriteProtect, ALARM_SLOTS,
};

/// The rule deciding when an armed alarm fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatchPolicy {
    /// Fire on the tick where the counter equals the alarm timestamp.
    /// An alarm whose tick is skipped never fires.
    Exact,
    /// Fire on the first tick where the counter has reached the alarm timestamp.
    /// Timestamps up to 2^31 seconds behind the counter count as reached.
    Reached,
}

impl MatchPolicy {
    #[inline]
    pub(crate) fn is_due(self, timestamp: u32, now: u32) -> bool {
        match self {
            MatchPolicy::Exact => timestamp == now,
            MatchPolicy::Reached => now.wrapping_sub(timestamp) < 0x8000_0000,
        }
    }
}

/// A real time clock counting seconds, with a fixed number of alarm slots.
///
/// The driver is shared between the foreground and the tick interrupt handler,
/// which calls [`on_tick`](Self::on_tick).
/// Registered alarms are borrowed for `'a`, so they cannot be dropped while registered.
pub struct RtcDrv<'a, Tmr, Wk, S, P, A, const N: usize = ALARM_SLOTS>
where
    Tmr: RtcTimer<A>,
    Wk: WakeControl<A>,
    S: CounterStore,
    P: WriteProtect,
{
    timer: Tmr,
    wake: Wk,
    counter: TickCounter<S, P>,
    alarms: AlarmRegistry<'a, N>,
    policy: MatchPolicy,
    adapter: PhantomData<A>,
}

impl<'a, Tmr, Wk, S, P, A, const N: usize> RtcDrv<'a, Tmr, Wk, S, P, A, N>
where
    Tmr: RtcTimer<A>,
    Wk: WakeControl<A>,
    S: CounterStore,
    P: WriteProtect,
{
    /// Create a new clock driver. The tick is not started until one of the `init` functions is called.
    pub const fn new(timer: Tmr, wake: Wk, store: S, protect: P, policy: MatchPolicy) -> Self {
        Self {
            timer,
            wake,
            counter: TickCounter::new(store, protect),
            alarms: AlarmRegistry::new(),
            policy,
            adapter: PhantomData,
        }
    }

    /// Start ticking from the 32.768 kHz crystal.
    pub fn init_crystal(&self, seed: u32) {
        self.init(seed, ClockSource::Crystal);
    }

    /// Start ticking from the system clock running at `freq` Hz.
    pub fn init_system(&self, seed: u32, freq: u32) {
        self.init(seed, ClockSource::System(freq));
    }

    /// Start ticking from the low-power oscillator.
    pub fn init_low_power(&self, seed: u32) {
        self.init(seed, ClockSource::LowPower);
    }

    /// Start ticking from `source`.
    ///
    /// A nonzero `seed` is loaded into the counter. A zero seed keeps the stored value,
    /// which resumes a counter whose storage survived a reset.
    /// Must not be called while the tick interrupt is enabled.
    pub fn init(&self, seed: u32, source: ClockSource) {
        if self.counter.seed(seed) {
            debug!("rtc seeded at {=u32}", seed);
        } else {
            debug!("rtc resumed at {=u32}", self.counter.get());
        }

        let freq = source.freq();
        let divider = Divider::for_freq(freq, Tmr::PRESCALERS, Tmr::MAX_MODULO);
        if divider.is_exact(freq) {
            debug!(
                "rtc source {} divided by {}x{}",
                source,
                divider.prescaler,
                divider.modulo
            );
        } else {
            warn!(
                "rtc source {} divided by {}x{} is off by {=u32} cycles per tick",
                source,
                divider.prescaler,
                divider.modulo,
                divider.error(freq)
            );
        }

        self.timer.configure(source, divider);
        self.timer.clear_pending_tick();
        self.timer.tick_int_enable();
    }

    /// Stop ticking and drop all alarm registrations. The counter value is kept.
    pub fn shutdown(&self) {
        self.timer.tick_int_disable();
        self.alarms.clear();
    }

    /// Sample the counter.
    #[inline]
    pub fn now(&self) -> u32 {
        self.counter.get()
    }

    /// Write the counter into `buf`. Does nothing if there is no buffer.
    pub fn get(&self, buf: Option<&mut u32>) {
        if let Some(buf) = buf {
            *buf = self.now();
        }
    }

    /// Compare `timestamp` against a single sample of the counter.
    ///
    /// Returns `Greater` if `timestamp` is in the future, `Less` if it has passed,
    /// and `Equal` if it is the present second.
    pub fn compare(&self, timestamp: u32) -> Ordering {
        let now = self.now();
        timestamp.cmp(&now)
    }

    /// Register `alarm`, returning the slot it occupies.
    pub fn set_alarm(&self, alarm: &'a Alarm) -> Result<usize, RegistryFull> {
        let result = self.alarms.register(alarm);
        if result.is_err() {
            warn!("no free alarm slot for {=u32}", alarm.timestamp());
        }
        result
    }

    /// Move `alarm` to `seconds` from now and register it.
    ///
    /// An alarm that is already registered is re-armed in its slot.
    /// If no slot is free the alarm is left as it was.
    pub fn set_alarm_in(&self, alarm: &'a Alarm, seconds: u32) -> Result<usize, RegistryFull> {
        let result = critical_section::with(|_| {
            let timestamp = self.now().wrapping_add(seconds);
            self.alarms.register_at(alarm, timestamp)
        });
        if result.is_err() {
            warn!("no free alarm slot {=u32} seconds from now", seconds);
        }
        result
    }

    /// Unregister `alarm`, returning the slot it occupied.
    pub fn clear_alarm(&self, alarm: &Alarm) -> Result<usize, NotFound> {
        self.alarms.cancel(alarm)
    }

    /// The alarm slots.
    pub fn alarms(&self) -> &AlarmRegistry<'a, N> {
        &self.alarms
    }

    /// The wake control, e.g. for the foreground to sleep on.
    pub fn wake_control(&self) -> &Wk {
        &self.wake
    }

    /// The rule used for firing alarms.
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// The tick interrupt handler.
    ///
    /// Advances the counter, fires the alarms that are due,
    /// and requests wake-up if any did.
    pub fn on_tick(&self) {
        self.timer.clear_pending_tick();

        critical_section::with(|_| {
            let now = self.counter.increment();
            trace!("tick {=u32}", now);

            if self.alarms.scan(now, self.policy) {
                self.wake.wake_on_exit();
            }
        });
    }
}
