mod error;
mod layout;
mod snowflake;
mod text;

pub use error::*;
pub use layout::*;
pub use snowflake::*;
