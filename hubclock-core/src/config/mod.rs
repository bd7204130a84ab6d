//! Panel configuration
//!
//! Configuration is fixed at build time: the firmware embeds a small TOML
//! file and parses it once at boot.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
