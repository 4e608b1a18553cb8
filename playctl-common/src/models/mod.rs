// File: playctl-common/src/models/mod.rs
pub mod osc;
pub mod player;

pub use osc::OscValue;
pub use player::{PlaybackStatus, PlayerCommand, PlayerState, VolumeLevel};
