//! playctl-common/src/lib.rs
//!
//! Types shared between the OSC core and whatever hosts the player:
//! commands, player state, argument values, and the `PlayerSink` trait.

pub mod error;
pub mod models;
pub mod traits;

pub use error::Error;
