pub mod parser;
pub mod types;

pub use types::*;
pub use parser::{delimiter_byte, parse_config, parse_config_str};
