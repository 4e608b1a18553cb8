// File: playctl-osc/src/sink.rs
//! Hands resolved commands to the player without blocking the receive loop.
//!
//! The dispatcher only ever calls `CommandSink::submit`, which must return
//! quickly. `ChannelSink` pushes onto a bounded queue and refuses commands
//! once it is full; the `SinkWorker` task drains it in order and awaits the
//! (possibly slow) `PlayerSink`.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use playctl_common::models::PlayerCommand;
use playctl_common::traits::PlayerSink;
use crate::{OscError, Result};

/// Commands that may wait for the player before new ones are refused.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

pub trait CommandSink: Send + Sync {
    fn submit(&self, command: PlayerCommand) -> Result<()>;
}

#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<PlayerCommand>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<PlayerCommand>) -> Self {
        Self { tx }
    }
}

impl CommandSink for ChannelSink {
    fn submit(&self, command: PlayerCommand) -> Result<()> {
        self.tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(cmd) => {
                OscError::Sink(format!("player queue is full, dropped {}", cmd.name()))
            }
            TrySendError::Closed(cmd) => {
                OscError::Sink(format!("sink worker is gone, dropped {}", cmd.name()))
            }
        })
    }
}

/// Background task that feeds queued commands to the player.
pub struct SinkWorker {
    task: Option<JoinHandle<()>>,
}

impl SinkWorker {
    /// Waits until every submitted command has been handed to the player.
    /// Only finishes once all `ChannelSink` clones have been dropped.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("Sink worker task failed: {e}");
            }
        }
    }
}

impl Drop for SinkWorker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub fn spawn_sink_worker(player: Arc<dyn PlayerSink>) -> (ChannelSink, SinkWorker) {
    spawn_sink_worker_with_capacity(player, DEFAULT_QUEUE_CAPACITY)
}

/// `capacity` must be greater than zero.
pub fn spawn_sink_worker_with_capacity(
    player: Arc<dyn PlayerSink>,
    capacity: usize,
) -> (ChannelSink, SinkWorker) {
    let (tx, mut rx) = mpsc::channel::<PlayerCommand>(capacity);
    let task = tokio::spawn(async move {
        while let Some(cmd) = rx.recv().await {
            run_command(player.as_ref(), cmd).await;
        }
        debug!("Sink worker queue closed");
    });
    (ChannelSink::new(tx), SinkWorker { task: Some(task) })
}

async fn run_command(player: &dyn PlayerSink, cmd: PlayerCommand) {
    let name = cmd.name();
    let res = match cmd {
        PlayerCommand::Play { resource_id } => player.play(&resource_id).await,
        PlayerCommand::Stop => player.stop().await,
        PlayerCommand::GetState => match player.get_state().await {
            Ok(state) => {
                info!(
                    status = %state.status,
                    uri = state.uri.as_deref().unwrap_or(""),
                    volume = ?state.volume,
                    "Player state: {:?}",
                    state
                );
                Ok(())
            }
            Err(e) => Err(e),
        },
        PlayerCommand::SetVolume { level } => player.set_volume(level).await,
    };
    if let Err(e) = res {
        warn!(command = name, "Player rejected command: {e}");
    }
}
