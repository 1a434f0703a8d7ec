//! Core types, colours and world constants

pub mod types;
pub mod constants;
pub mod color;

pub use types::*;
pub use constants::*;
pub use color::Color;
