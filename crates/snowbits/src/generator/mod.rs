mod error;
mod mutex;
mod snowflake;
mod status;

pub use error::*;
pub(crate) use mutex::*;
pub use snowflake::*;
pub use status::*;
