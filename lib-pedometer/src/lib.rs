#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod time;
pub use time::*;

pub mod error;
pub use error::*;

pub mod config;
pub use config::*;

pub mod signal;
pub use signal::*;

pub mod statistics;
pub use statistics::*;

pub mod threshold;
pub use threshold::*;

pub mod detector;
pub use detector::*;

pub mod cadence;
pub use cadence::*;

pub mod step_detection;
pub use step_detection::*;

#[cfg(test)]
mod tests;
