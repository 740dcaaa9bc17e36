use core::time::Duration;

use crate::{BitLayout, CUSTOM_EPOCH, MonotonicClock, PackingRule, Result, SnowflakeGenerator};

/// A declarative description of a [`SnowflakeGenerator`].
///
/// Useful when the layout comes from a config file or environment rather than
/// code. With the `serde` feature enabled it deserializes from any serde
/// format; missing fields fall back to [`GeneratorConfig::default`].
///
/// ```
/// use snowbits::{GeneratorConfig, PackingRule};
///
/// let generator = GeneratorConfig::default()
///     .node_id(3)
///     .widths(40, 8, 15)
///     .packing(PackingRule::Contiguous)
///     .build()
///     .unwrap();
///
/// assert_eq!(generator.node_id(), 3);
/// assert_eq!(generator.layout().counter_bits(), 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case", deny_unknown_fields)
)]
pub struct GeneratorConfig {
    /// Node ID packed into every generated ID.
    pub node_id: u64,
    /// Epoch as milliseconds since 1970-01-01 UTC.
    pub epoch_ms: u64,
    pub time_bits: u8,
    pub node_bits: u8,
    pub counter_bits: u8,
    pub packing: PackingRule,
}

impl Default for GeneratorConfig {
    /// Node 0, [`CUSTOM_EPOCH`], and the 41/10/12 split with the legacy
    /// packing rule.
    fn default() -> Self {
        let layout = BitLayout::default();
        Self {
            node_id: 0,
            epoch_ms: CUSTOM_EPOCH.as_millis() as u64,
            time_bits: layout.time_bits(),
            node_bits: layout.node_bits(),
            counter_bits: layout.counter_bits(),
            packing: layout.packing(),
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn node_id(mut self, node_id: u64) -> Self {
        self.node_id = node_id;
        self
    }

    #[must_use]
    pub fn epoch(mut self, epoch: Duration) -> Self {
        self.epoch_ms = u64::try_from(epoch.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn widths(mut self, time_bits: u8, node_bits: u8, counter_bits: u8) -> Self {
        self.time_bits = time_bits;
        self.node_bits = node_bits;
        self.counter_bits = counter_bits;
        self
    }

    #[must_use]
    pub fn packing(mut self, packing: PackingRule) -> Self {
        self.packing = packing;
        self
    }

    /// Validates the widths and returns the resulting [`BitLayout`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SnowflakeOverflow`](crate::Error::SnowflakeOverflow)
    /// if the widths sum to more than 63.
    pub fn layout(&self) -> Result<BitLayout> {
        Ok(BitLayout::new(self.time_bits, self.node_bits, self.counter_bits)?
            .with_packing(self.packing))
    }

    /// Builds a generator over a [`MonotonicClock`] aligned to the configured
    /// epoch.
    ///
    /// # Errors
    ///
    /// - [`Error::SnowflakeOverflow`](crate::Error::SnowflakeOverflow) if the
    ///   widths sum to more than 63
    /// - [`Error::EpochInFuture`](crate::Error::EpochInFuture) if the epoch is
    ///   later than now
    /// - [`Error::NodeOverflow`](crate::Error::NodeOverflow) if the node ID
    ///   does not fit
    pub fn build(&self) -> Result<SnowflakeGenerator<MonotonicClock>> {
        let layout = self.layout()?;
        let clock = MonotonicClock::with_epoch(Duration::from_millis(self.epoch_ms))?;
        SnowflakeGenerator::with_clock(self.node_id, layout, clock)
    }
}
