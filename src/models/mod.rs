//! Data models

pub mod shot;

pub use shot::*;
