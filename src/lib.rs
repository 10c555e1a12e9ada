//! A small library for reading battery snapshots and estimating how long
//! until the battery is full or empty.
//!
//! Note that this is not meant to be used as a library in other crates, it
//! exists to share code between the `batstat` binary and its tests.

#![warn(rust_2018_idioms)]

pub mod collection;
pub mod constants;
pub mod estimator;
pub mod options;
pub mod reading;
pub mod service;

pub mod utils {
    pub mod cancellation_token;
    pub mod error;
    pub mod logging;
}
