use core::{fmt, sync::atomic::Ordering};

use crate::{Alarm, AtomicOptionRef, MatchPolicy};

/// The default number of alarm slots.
pub const ALARM_SLOTS: usize = 3;

/// Error returned from [`AlarmRegistry::register`] when all slots are occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegistryFull;

/// Error returned from [`AlarmRegistry::cancel`] when the alarm is not registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotFound;

impl fmt::Display for RegistryFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("all alarm slots are occupied")
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("alarm is not registered")
    }
}

/// A fixed-capacity table of registered alarms, keyed by identity.
///
/// Slots are always visited from the highest index down to zero,
/// both when looking for a free slot and when scanning on a tick.
pub struct AlarmRegistry<'a, const N: usize = ALARM_SLOTS> {
    slots: [AtomicOptionRef<'a, Alarm>; N],
}

impl<'a, const N: usize> AlarmRegistry<'a, N> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            slots: [AtomicOptionRef::NONE; N],
        }
    }

    /// The number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Register `alarm` in the first free slot, returning the slot index.
    ///
    /// The alarm is armed and its triggered flag cleared.
    /// Registering the same alarm twice occupies two slots.
    pub fn register(&self, alarm: &'a Alarm) -> Result<usize, RegistryFull> {
        critical_section::with(|_| {
            let index = (0..N)
                .rev()
                .find(|&i| self.slots[i].is_none(Ordering::Acquire))
                .ok_or(RegistryFull);
            if let Ok(index) = index {
                alarm.arm();
                self.slots[index].store(Some(alarm), Ordering::Release);
            }
            index
        })
    }

    /// Move `alarm` to `timestamp` and register it, returning the slot index.
    ///
    /// An alarm that is already registered is re-armed in its slot.
    /// Otherwise it takes the first free slot, and with no free slot the alarm is left as it was.
    pub fn register_at(&self, alarm: &'a Alarm, timestamp: u32) -> Result<usize, RegistryFull> {
        critical_section::with(|_| {
            let index = (0..N)
                .rev()
                .find(|&i| self.slots[i].holds(alarm, Ordering::Acquire))
                .or_else(|| {
                    (0..N)
                        .rev()
                        .find(|&i| self.slots[i].is_none(Ordering::Acquire))
                })
                .ok_or(RegistryFull);
            if let Ok(index) = index {
                alarm.rearm(timestamp);
                self.slots[index].store(Some(alarm), Ordering::Release);
            }
            index
        })
    }

    /// Remove `alarm` from its slot, returning the slot index.
    ///
    /// Once this returns the tick handler no longer sees the alarm.
    pub fn cancel(&self, alarm: &Alarm) -> Result<usize, NotFound> {
        critical_section::with(|_| {
            let index = (0..N)
                .rev()
                .find(|&i| self.slots[i].holds(alarm, Ordering::Acquire))
                .ok_or(NotFound);
            if let Ok(index) = index {
                self.slots[index].store(None, Ordering::Release);
            }
            index
        })
    }

    /// Get whether `alarm` occupies any slot.
    pub fn contains(&self, alarm: &Alarm) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.holds(alarm, Ordering::Acquire))
    }

    /// Get the alarm in slot `index`, if any.
    pub fn get(&self, index: usize) -> Option<&'a Alarm> {
        self.slots.get(index)?.load(Ordering::Acquire)
    }

    /// The number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !slot.is_none(Ordering::Acquire))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Empty all slots.
    pub fn clear(&self) {
        critical_section::with(|_| {
            for slot in self.slots.iter() {
                slot.store(None, Ordering::Release);
            }
        });
    }

    /// Fire every registered alarm due at `now`, returning whether any fired.
    pub(crate) fn scan(&self, now: u32, policy: MatchPolicy) -> bool {
        let mut fired = false;
        for slot in self.slots.iter().rev() {
            if let Some(alarm) = slot.load(Ordering::Acquire) {
                if policy.is_due(alarm.timestamp(), now) && alarm.fire() {
                    trace!("alarm fired at {=u32}", now);
                    fired = true;
                }
            }
        }
        fired
    }
}

impl<const N: usize> Default for AlarmRegistry<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn fills_from_the_top() {
        let alarms = [Alarm::new(1), Alarm::new(2), Alarm::new(3)];
        let registry: AlarmRegistry = AlarmRegistry::new();

        assert_eq!(Ok(2), registry.register(&alarms[0]));
        assert_eq!(Ok(1), registry.register(&alarms[1]));
        assert_eq!(Ok(0), registry.register(&alarms[2]));
        assert!(registry.is_full());
    }

    #[test]
    fn register_when_full_leaves_slots_untouched() {
        let alarms = [Alarm::new(1), Alarm::new(2), Alarm::new(3)];
        let extra = Alarm::new(4);
        let registry: AlarmRegistry = AlarmRegistry::new();
        for alarm in alarms.iter() {
            registry.register(alarm).unwrap();
        }

        assert_eq!(Err(RegistryFull), registry.register(&extra));

        assert!(!extra.is_armed());
        assert!(!registry.contains(&extra));
        assert!(core::ptr::eq(&alarms[0], registry.get(2).unwrap()));
        assert!(core::ptr::eq(&alarms[1], registry.get(1).unwrap()));
        assert!(core::ptr::eq(&alarms[2], registry.get(0).unwrap()));
    }

    #[test]
    fn register_at_when_full_leaves_alarm_untouched() {
        let alarms = [Alarm::new(1), Alarm::new(2), Alarm::new(3)];
        let extra = Alarm::new(4);
        let registry: AlarmRegistry = AlarmRegistry::new();
        for alarm in alarms.iter() {
            registry.register(alarm).unwrap();
        }

        assert_eq!(Err(RegistryFull), registry.register_at(&extra, 110));

        assert_eq!(4, extra.timestamp());
        assert!(!extra.is_armed());
        assert!(!registry.contains(&extra));
    }

    #[test]
    fn register_at_rearms_in_place() {
        let alarms = [Alarm::new(1), Alarm::new(2), Alarm::new(3)];
        let registry: AlarmRegistry = AlarmRegistry::new();
        for alarm in alarms.iter() {
            registry.register(alarm).unwrap();
        }
        registry.scan(1, MatchPolicy::Exact);
        assert!(!alarms[0].is_armed());

        assert_eq!(Ok(2), registry.register_at(&alarms[0], 105));

        assert_eq!(105, alarms[0].timestamp());
        assert!(alarms[0].is_armed());
        assert!(!alarms[0].is_triggered());
        assert_eq!(3, registry.len());
    }

    #[test]
    fn cancel_frees_slot_for_reuse() {
        let alarms = [Alarm::new(1), Alarm::new(2), Alarm::new(3)];
        let late = Alarm::new(4);
        let registry: AlarmRegistry = AlarmRegistry::new();
        for alarm in alarms.iter() {
            registry.register(alarm).unwrap();
        }

        assert_eq!(Ok(1), registry.cancel(&alarms[1]));
        assert_eq!(2, registry.len());

        assert_eq!(Ok(1), registry.register(&late));
        assert!(registry.contains(&late));
    }

    #[test]
    fn cancel_unknown_is_not_found() {
        let alarms = [Alarm::new(1), Alarm::new(2), Alarm::new(3)];
        let stranger = Alarm::new(1);
        let registry: AlarmRegistry = AlarmRegistry::new();
        for alarm in alarms.iter() {
            registry.register(alarm).unwrap();
        }

        assert_eq!(Err(NotFound), registry.cancel(&stranger));

        assert!(registry.is_full());
        for alarm in alarms.iter() {
            assert!(registry.contains(alarm));
        }
    }

    #[test]
    fn cancel_twice() {
        let alarm = Alarm::new(1);
        let registry: AlarmRegistry = AlarmRegistry::new();
        registry.register(&alarm).unwrap();

        assert_eq!(Ok(2), registry.cancel(&alarm));
        assert_eq!(Err(NotFound), registry.cancel(&alarm));
        assert!(registry.is_empty());
    }

    #[test]
    fn register_resets_triggered() {
        let alarm = Alarm::new(5);
        let registry: AlarmRegistry = AlarmRegistry::new();
        registry.register(&alarm).unwrap();
        registry.scan(5, MatchPolicy::Exact);
        assert!(alarm.is_triggered());
        registry.cancel(&alarm).unwrap();

        registry.register(&alarm).unwrap();

        assert!(!alarm.is_triggered());
        assert!(alarm.is_armed());
    }

    #[test]
    fn duplicate_registration_fires_once() {
        let alarm = Alarm::new(5);
        let registry: AlarmRegistry = AlarmRegistry::new();
        registry.register(&alarm).unwrap();
        registry.register(&alarm).unwrap();
        assert_eq!(2, registry.len());

        assert!(registry.scan(5, MatchPolicy::Exact));
        assert!(alarm.take_triggered());
        assert!(!registry.scan(5, MatchPolicy::Exact));
    }

    #[test]
    fn custom_capacity() {
        let alarms = [Alarm::new(1), Alarm::new(2)];
        let registry = AlarmRegistry::<1>::new();

        assert_eq!(1, registry.capacity());
        assert_eq!(Ok(0), registry.register(&alarms[0]));
        assert_eq!(Err(RegistryFull), registry.register(&alarms[1]));
    }

    #[test]
    fn clear_empties() {
        let alarm = Alarm::new(1);
        let registry: AlarmRegistry = AlarmRegistry::new();
        registry.register(&alarm).unwrap();

        registry.clear();

        assert!(registry.is_empty());
        assert!(!registry.scan(1, MatchPolicy::Exact));
    }
}
