#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod fmt;

mod adapters;
mod alarm;
mod atomic_option_ref;
mod counter;
mod datetime;
pub mod drivers;
mod registry;
mod rtc_drv;
mod source;

pub use self::{
    adapters::store::{CounterCell, CounterStore, NoProtect, WriteProtect},
    adapters::timer::RtcTimer,
    adapters::wake::{WakeControl, WakeLatch},
    alarm::{Alarm, AlarmWait},
    atomic_option_ref::AtomicOptionRef,
    counter::{TickCounter, WriteWindow},
    datetime::{DateTimeParts, DayOfWeek, InvalidDayOfWeek, InvalidMonth, Month},
    registry::{AlarmRegistry, NotFound, RegistryFull, ALARM_SLOTS},
    rtc_drv::{MatchPolicy, RtcDrv},
    source::{ClockSource, Divider, CRYSTAL_FREQ, LOW_POWER_FREQ},
};
