use async_trait::async_trait;
use crate::error::Error;
use crate::models::player::{PlayerState, VolumeLevel};

/// The host media player, as seen from the OSC side.
///
/// Implemented by the host application, never by this workspace's core.
/// Calls may be slow; the OSC listener only reaches them through the sink
/// worker, so a slow player never stalls datagram reception.
#[async_trait]
pub trait PlayerSink: Send + Sync {
    async fn play(&self, resource_id: &str) -> Result<(), Error>;
    async fn stop(&self) -> Result<(), Error>;
    async fn get_state(&self) -> Result<PlayerState, Error>;
    async fn set_volume(&self, level: VolumeLevel) -> Result<(), Error>;
}
