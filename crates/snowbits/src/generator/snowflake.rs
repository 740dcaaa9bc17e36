use core::fmt;
use std::time::SystemTime;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BitLayout, GeneratorConfig, MonotonicClock, Snowflake, TimeSource,
    generator::{Error, IdGenStatus, Mutex, MutexGuard, Result},
};

/// Mutable generation state. Only ever touched with the lock held.
#[derive(Debug)]
struct State {
    /// Milliseconds since the epoch at the last successful generation.
    last_generate: u64,
    /// Sequence within `last_generate`.
    counter: u64,
}

/// A lock-based Snowflake ID generator for a single node.
///
/// The generator owns a fixed [`BitLayout`], a node ID and a [`TimeSource`]
/// (by default a [`MonotonicClock`] aligned to the configured epoch). Its
/// mutable state, the last generation timestamp and the per-millisecond
/// counter, sits behind one mutex, so a shared reference (or an
/// [`Arc`](std::sync::Arc)) can be used from any number of threads.
///
/// Every generation attempt holds the lock from the first clock read to the
/// final state update, including any wait for the next millisecond. IDs are
/// therefore handed out one at a time and are non-decreasing in the order the
/// calls complete.
///
/// ## Recommended When
/// - One generator per node is shared across threads
/// - You want a simple blocking `generate()` with back-pressure when the
///   counter runs out
///
/// Use [`SnowflakeGenerator::try_poll`] if you must never block.
///
/// # Example
/// ```
/// use snowbits::SnowflakeGenerator;
/// use std::time::{Duration, SystemTime};
///
/// let epoch = SystemTime::now() - Duration::from_secs(60);
/// let generator = SnowflakeGenerator::new(7, epoch, 41, 10, 12).unwrap();
///
/// let a = generator.generate();
/// let b = generator.generate();
/// assert_ne!(a, b);
/// assert!(generator.layout().time_of(b) >= 60_000);
/// ```
pub struct SnowflakeGenerator<T = MonotonicClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    node_id: u64,
    layout: BitLayout,
    time: T,
}

impl SnowflakeGenerator<MonotonicClock> {
    /// Creates a generator for `node_id` whose timestamps count milliseconds
    /// since `epoch`, with the given field widths and the
    /// [`Legacy`](crate::PackingRule::Legacy) packing rule.
    ///
    /// The wall clock is read once to place `epoch` on a [`MonotonicClock`];
    /// all later readings are immune to wall-clock adjustments.
    ///
    /// # Errors
    ///
    /// - [`Error::SnowflakeOverflow`] if the widths sum to more than 63
    /// - [`Error::EpochInFuture`] if `epoch` is later than now
    /// - [`Error::NodeOverflow`] if `node_id` exceeds `2^node_bits - 1`
    pub fn new(
        node_id: u64,
        epoch: SystemTime,
        time_bits: u8,
        node_bits: u8,
        counter_bits: u8,
    ) -> Result<Self> {
        let layout = BitLayout::new(time_bits, node_bits, counter_bits)?;
        let clock = MonotonicClock::new(epoch)?;
        Self::with_clock(node_id, layout, clock)
    }

    /// Creates a generator from a [`GeneratorConfig`].
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::build`].
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.build()
    }

    /// The wall-clock instant that timestamps are measured from.
    pub fn epoch(&self) -> SystemTime {
        self.time.epoch()
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator over an arbitrary [`TimeSource`].
    ///
    /// The clock is sampled once here to seed the last generation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOverflow`] if `node_id` does not fit the layout's
    /// node field.
    pub fn with_clock(node_id: u64, layout: BitLayout, time: T) -> Result<Self> {
        if node_id > layout.max_node() {
            return Err(Error::NodeOverflow {
                node_id,
                max: layout.max_node(),
            });
        }

        let state = State {
            last_generate: time.current_millis(),
            counter: 0,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node_id,
            time_bits = layout.time_bits(),
            node_bits = layout.node_bits(),
            counter_bits = layout.counter_bits(),
            packing = ?layout.packing(),
            last_generate = state.last_generate,
            "snowflake generator ready"
        );

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(state),
            node_id,
            layout,
            time,
        })
    }

    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    pub fn layout(&self) -> &BitLayout {
        &self.layout
    }

    /// Generates the next ID, blocking until one is available.
    ///
    /// If the counter for the current millisecond is exhausted, the calling
    /// thread (and, since the lock is held, every other caller) spins,
    /// yielding the CPU between clock reads, until the next millisecond
    /// begins. Throughput is thereby capped at `2^counter_bits` IDs per
    /// millisecond.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::TimeOverflow`] once the elapsed time since the
    /// epoch no longer fits in `time_bits`. Continuing would wrap the time
    /// field and collide with earlier IDs, so this is treated as fatal. The
    /// generator state is left untouched. Choose `time_bits` so this cannot
    /// happen within the system's lifetime: the limit is `2^time_bits - 1`
    /// milliseconds after the epoch (about 49.7 days for 32 bits, 69.7 years
    /// for 41).
    ///
    /// Also panics if the std mutex was poisoned by a panicking
    /// [`TimeSource`].
    pub fn generate(&self) -> Snowflake {
        match self.try_generate() {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible counterpart of [`Self::generate`].
    ///
    /// # Errors
    ///
    /// - [`Error::TimeOverflow`] if the elapsed time exceeds the layout's
    ///   time field. No ID is produced and the state is not modified.
    /// - [`Error::LockPoisoned`] if the std mutex is poisoned (not available
    ///   with the `parking-lot` feature).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate(&self) -> Result<Snowflake> {
        let mut state = self.lock()?;

        let mut now = self.sample(&state);
        let mut counter = 0;
        if now == state.last_generate {
            counter = state.counter + 1;
            if counter > self.layout.max_counter() {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    last_generate = state.last_generate,
                    "counter exhausted, waiting for the next millisecond"
                );
                now = self.wait_past(state.last_generate);
                counter = 0;
            }
        }

        self.commit(&mut state, now, counter)
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// Returns [`IdGenStatus::Pending`] instead of spinning when the counter
    /// for the current millisecond is exhausted.
    ///
    /// # Errors
    ///
    /// Same as [`Self::try_generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll(&self) -> Result<IdGenStatus> {
        let mut state = self.lock()?;

        let raw = self.time.current_millis();
        let now = raw.max(state.last_generate);
        let counter = if now == state.last_generate {
            if state.counter >= self.layout.max_counter() {
                return Ok(Self::cold_pending(raw, state.last_generate));
            }
            state.counter + 1
        } else {
            0
        };

        self.commit(&mut state, now, counter)
            .map(|id| IdGenStatus::Ready { id })
    }

    #[cold]
    #[inline(never)]
    fn cold_pending(raw: u64, last_generate: u64) -> IdGenStatus {
        IdGenStatus::Pending {
            yield_for: last_generate - raw + 1,
        }
    }

    /// Current elapsed milliseconds, never behind the last generation time.
    fn sample(&self, state: &State) -> u64 {
        self.time.current_millis().max(state.last_generate)
    }

    /// Spins until the clock reads strictly past `last`.
    fn wait_past(&self, last: u64) -> u64 {
        loop {
            let now = self.time.current_millis();
            if now > last {
                return now;
            }
            std::thread::yield_now();
        }
    }

    /// Checks the time field, records the new state and packs the ID.
    fn commit(&self, state: &mut State, now: u64, counter: u64) -> Result<Snowflake> {
        let max = self.layout.max_time();
        if now > max {
            return Err(Error::TimeOverflow { elapsed: now, max });
        }
        state.last_generate = now;
        state.counter = counter;
        Ok(self.layout.compose(now, self.node_id, counter))
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}

impl<T> fmt::Debug for SnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeGenerator")
            .field("node_id", &self.node_id)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
