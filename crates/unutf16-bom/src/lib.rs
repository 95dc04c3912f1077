#![warn(clippy::pedantic)]

pub mod bom;

pub use bom::{BOM_LEN, Bom};
