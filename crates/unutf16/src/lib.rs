#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod reader;
pub mod streaming;

mod lookahead;
mod strategy;
mod transcoder;

pub use config::{Malformed, ReaderConfig};
pub use error::DecodeError;
pub use reader::{Detected, Utf8Reader};
pub use streaming::AsyncUtf8Reader;
pub use unutf16_bom::Bom;
