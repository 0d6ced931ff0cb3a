/// The nominal frequency of the low-frequency watch crystal.
pub const CRYSTAL_FREQ: u32 = 32_768;

/// The nominal frequency of the internal very-low-power oscillator.
/// It may deviate tens of percent from this value.
pub const LOW_POWER_FREQ: u32 = 10_000;

/// The oscillator feeding the tick timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// The 32.768 kHz watch crystal. It must already be running.
    Crystal,
    /// The system (sub-main) clock running at the given frequency in Hz.
    System(u32),
    /// The internal very-low-power oscillator, for when accuracy does not matter and there is no crystal.
    LowPower,
}

impl ClockSource {
    /// The nominal frequency of the source in Hz.
    pub const fn freq(&self) -> u32 {
        match *self {
            ClockSource::Crystal => CRYSTAL_FREQ,
            ClockSource::System(freq) => freq,
            ClockSource::LowPower => LOW_POWER_FREQ,
        }
    }
}

/// A prescaler/modulo pair dividing a source frequency down to one tick per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Divider {
    /// The prescaler applied to the source.
    pub prescaler: u16,
    /// The number of prescaled counts per tick.
    pub modulo: u32,
}

impl Divider {
    /// Find the divider giving a tick period as close to one second as `freq` allows.
    ///
    /// For every prescaler the modulo is `freq / prescaler` rounded down.
    /// Among those that fit in `max_modulo`, the one with the smallest deviation wins,
    /// preferring the smaller prescaler on a tie.
    /// If none fits, the largest prescaler is used with the modulo saturated to `max_modulo`,
    /// or the smallest prescaler with a modulo of one if the source is slower than that prescaler.
    pub fn for_freq(freq: u32, prescalers: &[u16], max_modulo: u32) -> Self {
        let mut best: Option<(Divider, u32)> = None;

        for &prescaler in prescalers {
            if prescaler == 0 {
                continue;
            }
            let modulo = freq / prescaler as u32;
            if modulo == 0 || modulo > max_modulo {
                continue;
            }
            let divider = Divider { prescaler, modulo };
            let error = divider.error(freq);
            match best {
                Some((_, best_error)) if best_error <= error => {}
                _ => best = Some((divider, error)),
            }
        }

        if let Some((divider, _)) = best {
            return divider;
        }

        let usable = || prescalers.iter().copied().filter(|&prescaler| prescaler > 0);
        let smallest = usable().min().unwrap_or(1);
        if freq < smallest as u32 {
            return Divider {
                prescaler: smallest,
                modulo: 1,
            };
        }

        let prescaler = usable().max().unwrap_or(1);
        let modulo = (freq / prescaler as u32).min(max_modulo).max(1);
        Divider { prescaler, modulo }
    }

    /// The number of source cycles per tick.
    pub const fn counts(&self) -> u64 {
        self.prescaler as u64 * self.modulo as u64
    }

    /// The number of source cycles per tick that the divider is off from `freq`.
    pub fn error(&self, freq: u32) -> u32 {
        let counts = self.counts();
        let freq = freq as u64;
        let error = if counts > freq {
            counts - freq
        } else {
            freq - counts
        };
        error.min(u32::MAX as u64) as u32
    }

    /// Get whether the divider gives exactly one tick per second from `freq`.
    pub fn is_exact(&self, freq: u32) -> bool {
        self.counts() == freq as u64
    }
}
