use crate::Snowflake;

/// Represents the result of a non-blocking generation attempt.
///
/// This type models the outcome of [`SnowflakeGenerator::try_poll`]:
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the counter for the current millisecond
///   is exhausted and no ID can be produced until the clock advances.
///
/// This allows callers that must not block (event loops, async tasks) to
/// back off on their own terms instead of spinning inside
/// [`SnowflakeGenerator::generate`].
///
/// # Example
///
/// ```
/// use snowbits::{BitLayout, IdGenStatus, SnowflakeGenerator, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let layout = BitLayout::new(41, 10, 12).unwrap();
/// let generator = SnowflakeGenerator::with_clock(0, layout, FixedTime).unwrap();
/// match generator.try_poll().unwrap() {
///     IdGenStatus::Ready { id } => println!("ID: {id}"),
///     IdGenStatus::Pending { yield_for } => println!("Back off for {yield_for}ms"),
/// }
/// ```
///
/// [`SnowflakeGenerator::try_poll`]: crate::SnowflakeGenerator::try_poll
/// [`SnowflakeGenerator::generate`]: crate::SnowflakeGenerator::generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated Snowflake ID.
        id: Snowflake,
    },
    /// No ID could be generated because the counter has been exhausted for
    /// the current millisecond.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: u64,
    },
}
