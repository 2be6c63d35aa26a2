//! Compose app and web icons from a logo and a vertical gradient background.

pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod gradient;
pub mod icon_gen;
pub mod logging;

pub use error::{IconError, Result};
