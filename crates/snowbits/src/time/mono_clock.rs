use crate::{Error, Result, TimeSource};
use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A monotonic time source that reports milliseconds elapsed since a
/// user-defined epoch.
///
/// The wall clock is consulted exactly once, at construction, to find how far
/// the epoch lies in the past. From then on every reading is that fixed
/// offset plus the time elapsed on an [`Instant`] captured at the same moment,
/// so leap seconds, NTP slews and manual clock changes can never make the
/// clock regress.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    epoch_offset: Duration,
    epoch: SystemTime,
}

impl MonotonicClock {
    /// Constructs a monotonic clock whose origin (t = 0) is `epoch`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpochInFuture`] if `epoch` is later than the current
    /// system time, since elapsed time could not be represented.
    ///
    /// # Example
    ///
    /// ```
    /// use snowbits::{MonotonicClock, TimeSource};
    /// use std::time::{Duration, SystemTime};
    ///
    /// let epoch = SystemTime::now() - Duration::from_secs(1);
    /// let clock = MonotonicClock::new(epoch).unwrap();
    ///
    /// assert!(clock.current_millis() >= 1_000);
    /// ```
    pub fn new(epoch: SystemTime) -> Result<Self> {
        let start = Instant::now();
        let epoch_offset = SystemTime::now()
            .duration_since(epoch)
            .map_err(|_| Error::EpochInFuture)?;
        Ok(Self {
            start,
            epoch_offset,
            epoch,
        })
    }

    /// Constructs a monotonic clock using an epoch given as a [`Duration`]
    /// since 1970-01-01 UTC, such as [`CUSTOM_EPOCH`] or [`TWITTER_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpochInFuture`] if the epoch is later than the current
    /// system time.
    ///
    /// [`CUSTOM_EPOCH`]: crate::CUSTOM_EPOCH
    /// [`TWITTER_EPOCH`]: crate::TWITTER_EPOCH
    pub fn with_epoch(epoch: Duration) -> Result<Self> {
        let epoch = UNIX_EPOCH
            .checked_add(epoch)
            .ok_or(Error::EpochInFuture)?;
        Self::new(epoch)
    }

    /// The wall-clock instant this clock treats as t = 0, exactly as given at
    /// construction. Later wall-clock changes do not affect it.
    pub fn epoch(&self) -> SystemTime {
        self.epoch
    }
}

impl TimeSource for MonotonicClock {
    /// Returns the number of milliseconds since the configured epoch, based on
    /// the elapsed monotonic time since construction.
    fn current_millis(&self) -> u64 {
        let elapsed = self.epoch_offset + self.start.elapsed();
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
