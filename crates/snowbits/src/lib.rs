//! Configurable-width 64-bit Snowflake IDs.
//!
//! A [`SnowflakeGenerator`] packs the milliseconds elapsed since an epoch, a
//! node ID and a per-millisecond counter into a single [`Snowflake`], with the
//! width of each field chosen by the caller through a [`BitLayout`].
//!
//! With [`PackingRule::Contiguous`] the three fields never overlap: IDs from
//! one generator are unique and time-ordered, and generators with distinct
//! node IDs never collide. The default [`PackingRule::Legacy`] reproduces a
//! historical bit placement in which the node field overlaps the time field,
//! so uniqueness is only guaranteed for a generator on node 0. See
//! [`PackingRule::Legacy`] for the exact limits.
//!
//! ```
//! use snowbits::{Snowflake, SnowflakeGenerator};
//! use std::time::{Duration, SystemTime};
//!
//! let epoch = SystemTime::now() - Duration::from_secs(3_600);
//! let generator = SnowflakeGenerator::new(1, epoch, 41, 10, 12).unwrap();
//! let id = generator.generate();
//!
//! // Decimal, base-64 and JSON text forms all round-trip.
//! assert_eq!(id.to_string().parse::<Snowflake>().unwrap(), id);
//! assert_eq!(Snowflake::decode_base64(id.encode_base64()).unwrap(), id);
//! assert_eq!(Snowflake::decode_text(id.encode_text()).unwrap(), id);
//! ```
//!
//! # Feature flags
//! - `parking-lot`: use `parking_lot::Mutex` (no lock poisoning)
//! - `cache-padded`: pad the generator state to a cache line
//! - `tracing`: emit `tracing` spans and events from the generator
//! - `serde`: `Serialize`/`Deserialize` for [`Snowflake`], [`PackingRule`]
//!   and [`GeneratorConfig`], plus the `as_native` and `as_base64` adapters
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod base64;
mod config;
mod generator;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base64::*;
pub use crate::config::*;
pub use crate::generator::*;
pub use crate::id::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
