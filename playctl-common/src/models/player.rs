// File: playctl-common/src/models/player.rs

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// A transport command resolved from an incoming OSC message, ready to be
/// handed to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Replace the queue with `resource_id` and start playing it.
    Play { resource_id: String },
    Stop,
    GetState,
    /// No bounds checking happens here; the player decides what to do with
    /// out-of-range levels.
    SetVolume { level: VolumeLevel },
}

impl PlayerCommand {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerCommand::Play { .. } => "play",
            PlayerCommand::Stop => "stop",
            PlayerCommand::GetState => "getstate",
            PlayerCommand::SetVolume { .. } => "setvolume",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VolumeLevel {
    Int(i64),
    Float(f64),
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeLevel::Int(v) => write!(f, "{v}"),
            VolumeLevel::Float(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for VolumeLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return Ok(VolumeLevel::Int(v));
        }
        s.parse::<f64>()
            .map(VolumeLevel::Float)
            .map_err(|_| format!("Not a volume level: {s:?}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Play,
    Pause,
    #[default]
    Stop,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackStatus::Play => write!(f, "play"),
            PlaybackStatus::Pause => write!(f, "pause"),
            PlaybackStatus::Stop => write!(f, "stop"),
        }
    }
}

/// Snapshot of what the player is doing, as returned by `PlayerSink::get_state`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub status: PlaybackStatus,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub mute: bool,
}
