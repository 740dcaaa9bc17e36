use thiserror::Error;

/// A result type whose error defaults to the generator [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants the generator side of `snowbits` can emit.
///
/// Configuration problems ([`Error::SnowflakeOverflow`],
/// [`Error::NodeOverflow`], [`Error::EpochInFuture`]) surface at construction,
/// before a single ID is produced. [`Error::TimeOverflow`] surfaces during
/// generation and is fatal: the infallible
/// [`SnowflakeGenerator::generate`] panics with it instead of returning.
///
/// [`SnowflakeGenerator::generate`]: crate::SnowflakeGenerator::generate
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum Error {
    /// The time, node and counter widths add up to more than the 63 payload
    /// bits of an `i64`.
    #[error("total bits allocated is {total}, greater than 63")]
    SnowflakeOverflow {
        /// Sum of the three requested widths.
        total: u32,
    },

    /// The node ID does not fit in the bits allocated to it.
    #[error("node ID {node_id} overflowed its bit allowance (max {max})")]
    NodeOverflow {
        /// The rejected node ID.
        node_id: u64,
        /// Largest node ID the layout can hold.
        max: u64,
    },

    /// The epoch lies after the current system time.
    #[error("epoch is later than the current system time")]
    EpochInFuture,

    /// Elapsed time since the epoch no longer fits in the time field. Any ID
    /// produced past this point would wrap around and collide with earlier
    /// ones.
    #[error("time {elapsed}ms overflowed its bit allowance (max {max}ms)")]
    TimeOverflow {
        /// Milliseconds since the epoch at the failed attempt.
        elapsed: u64,
        /// Largest timestamp the layout can hold.
        max: u64,
    },

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
