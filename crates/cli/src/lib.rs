//! Local Google Fonts CLI library.

pub mod cli;
pub mod targets;

pub use targets::{Target, load_targets};
