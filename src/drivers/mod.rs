//! Hardware drivers for the [`RtcTimer`](crate::RtcTimer) and [`WakeControl`](crate::WakeControl) seams.

#[cfg(feature = "cortexm")]
mod cortexm;

#[cfg(feature = "cortexm")]
mod systick;

#[cfg(feature = "cortexm")]
pub use self::{
    cortexm::{Adapter, SleepOnExit},
    systick::SysTickDrv,
};
