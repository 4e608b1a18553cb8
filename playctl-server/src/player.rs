//! A stand-in player used when no host is attached. It logs every request
//! and keeps just enough state to answer `get_state` sensibly.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;
use playctl_common::models::{PlaybackStatus, PlayerState, VolumeLevel};
use playctl_common::traits::PlayerSink;
use playctl_common::Error;

#[derive(Default)]
pub struct LogOnlyPlayer {
    state: Mutex<PlayerState>,
}

impl LogOnlyPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerSink for LogOnlyPlayer {
    async fn play(&self, resource_id: &str) -> Result<(), Error> {
        info!(resource_id, "replace queue and play");
        let mut st = self.state.lock().await;
        st.status = PlaybackStatus::Play;
        st.uri = Some(resource_id.to_string());
        st.title = resource_id.rsplit('/').next().map(str::to_string);
        Ok(())
    }

    async fn stop(&self) -> Result<(), Error> {
        info!("stop playback");
        self.state.lock().await.status = PlaybackStatus::Stop;
        Ok(())
    }

    async fn get_state(&self) -> Result<PlayerState, Error> {
        Ok(self.state.lock().await.clone())
    }

    async fn set_volume(&self, level: VolumeLevel) -> Result<(), Error> {
        info!(%level, "set volume");
        let mut st = self.state.lock().await;
        st.volume = Some(match level {
            VolumeLevel::Int(v) => v,
            VolumeLevel::Float(v) => v.round() as i64,
        });
        Ok(())
    }
}
