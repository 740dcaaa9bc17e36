use crate::{Error, Result, Snowflake};

/// Number of usable bits in a [`Snowflake`]. Bit 63, the sign bit, never
/// carries payload under the contiguous rule.
pub const PAYLOAD_BITS: u32 = 63;

/// How the time, node and counter fields are placed inside the 63 payload
/// bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PackingRule {
    /// The historical rule, kept bit-for-bit so previously stored IDs keep
    /// their meaning:
    ///
    /// ```text
    /// time    << (63 - time_bits)
    /// node    << (63 - counter_bits)
    /// counter << 0
    /// ```
    ///
    /// The node shift reuses `counter_bits`, so for most layouts the node
    /// field lands inside the time field (and can reach the sign bit). The
    /// node cannot be read back reliably, and uniqueness is limited:
    ///
    /// - On node 0 the time and counter fields never overlap, so IDs from one
    ///   generator are unique and time-ordered.
    /// - On any other node, time bits from `time_bits - counter_bits` upward
    ///   share positions with node bits. With 41/10/12 a generator on node 1
    ///   repeats its own IDs once the elapsed time passes `2^29` ms (about
    ///   6.2 days).
    /// - Generators on different nodes can produce the same ID, e.g. node 1
    ///   at `t` and node 0 at `t + 2^29` ms.
    ///
    /// Use [`PackingRule::Contiguous`] when IDs must be unique across nodes
    /// or over the whole time range.
    #[default]
    Legacy,

    /// Fields packed side by side, time in the most significant bits:
    ///
    /// ```text
    ///  Bit Index:  63 | 62 ..................................................... 0
    ///              +--+--------------------+--------------------+--------------+
    ///  Field:      |0 | time (time_bits)   | node (node_bits)   | counter      |
    ///              +--+--------------------+--------------------+--------------+
    /// ```
    ///
    /// When the widths sum to less than 63, the unused bits sit just below the
    /// sign bit.
    Contiguous,
}

/// A validated split of the 63 payload bits into time, node and counter
/// fields, together with the bounds and shifts derived from it.
///
/// The derived maxima are always `2^bits - 1` for their width and are never
/// changed independently of it.
///
/// # Example
///
/// ```
/// use snowbits::{BitLayout, PackingRule};
///
/// let layout = BitLayout::new(41, 10, 12)
///     .unwrap()
///     .with_packing(PackingRule::Contiguous);
///
/// let id = layout.compose(1_000, 2, 3);
/// assert_eq!(layout.decompose(id), (1_000, 2, 3));
/// assert_eq!(layout.max_counter(), 4_095);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitLayout {
    time_bits: u8,
    node_bits: u8,
    counter_bits: u8,
    packing: PackingRule,
    max_time: u64,
    max_node: u64,
    max_counter: u64,
    time_shift: u32,
    node_shift: u32,
}

impl Default for BitLayout {
    /// The Twitter-style split: 41 bits of time, 10 of node, 12 of counter,
    /// with the [`PackingRule::Legacy`] rule.
    fn default() -> Self {
        Self::build(41, 10, 12, PackingRule::Legacy)
    }
}

impl BitLayout {
    /// Validates the three widths and derives the field bounds, using
    /// [`PackingRule::Legacy`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SnowflakeOverflow`] if the widths sum to more than
    /// [`PAYLOAD_BITS`].
    pub const fn new(time_bits: u8, node_bits: u8, counter_bits: u8) -> Result<Self> {
        let total = time_bits as u32 + node_bits as u32 + counter_bits as u32;
        if total > PAYLOAD_BITS {
            return Err(Error::SnowflakeOverflow { total });
        }
        Ok(Self::build(time_bits, node_bits, counter_bits, PackingRule::Legacy))
    }

    /// Returns the same widths placed with a different [`PackingRule`].
    #[must_use]
    pub const fn with_packing(self, packing: PackingRule) -> Self {
        Self::build(self.time_bits, self.node_bits, self.counter_bits, packing)
    }

    // Callers guarantee the widths sum to at most 63.
    const fn build(time_bits: u8, node_bits: u8, counter_bits: u8, packing: PackingRule) -> Self {
        let (time_shift, node_shift) = match packing {
            PackingRule::Legacy => (
                PAYLOAD_BITS - time_bits as u32,
                PAYLOAD_BITS - counter_bits as u32,
            ),
            PackingRule::Contiguous => (
                node_bits as u32 + counter_bits as u32,
                counter_bits as u32,
            ),
        };
        Self {
            time_bits,
            node_bits,
            counter_bits,
            packing,
            max_time: max_value_bits(time_bits),
            max_node: max_value_bits(node_bits),
            max_counter: max_value_bits(counter_bits),
            time_shift,
            node_shift,
        }
    }

    pub const fn time_bits(&self) -> u8 {
        self.time_bits
    }

    pub const fn node_bits(&self) -> u8 {
        self.node_bits
    }

    pub const fn counter_bits(&self) -> u8 {
        self.counter_bits
    }

    pub const fn packing(&self) -> PackingRule {
        self.packing
    }

    /// Largest representable number of milliseconds since the epoch.
    pub const fn max_time(&self) -> u64 {
        self.max_time
    }

    /// Largest representable node ID.
    pub const fn max_node(&self) -> u64 {
        self.max_node
    }

    /// Largest counter value within a single millisecond.
    pub const fn max_counter(&self) -> u64 {
        self.max_counter
    }

    /// Packs the three fields into a [`Snowflake`]. Each field is masked to
    /// its width first.
    pub const fn compose(&self, time: u64, node: u64, counter: u64) -> Snowflake {
        let raw = ((time & self.max_time) << self.time_shift)
            | ((node & self.max_node) << self.node_shift)
            | (counter & self.max_counter);
        Snowflake::from_raw(raw as i64)
    }

    /// Extracts the time field.
    pub const fn time_of(&self, id: Snowflake) -> u64 {
        (id.to_bits() >> self.time_shift) & self.max_time
    }

    /// Extracts the node field. Under [`PackingRule::Legacy`] this reads the
    /// bits the node was shifted into, which may also hold time bits.
    pub const fn node_of(&self, id: Snowflake) -> u64 {
        (id.to_bits() >> self.node_shift) & self.max_node
    }

    /// Extracts the counter field.
    pub const fn counter_of(&self, id: Snowflake) -> u64 {
        id.to_bits() & self.max_counter
    }

    /// Extracts `(time, node, counter)`.
    pub const fn decompose(&self, id: Snowflake) -> (u64, u64, u64) {
        (self.time_of(id), self.node_of(id), self.counter_of(id))
    }
}

/// `2^bits - 1`, for `bits <= 63`.
const fn max_value_bits(bits: u8) -> u64 {
    (1_u64 << bits) - 1
}
