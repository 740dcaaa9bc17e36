mod alphabet;
mod formatter;

pub use alphabet::BASE64_MAX_LEN;
use alphabet::{decode_base64, encode_base64};
pub use formatter::*;
