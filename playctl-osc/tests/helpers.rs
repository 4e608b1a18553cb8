// tests/helpers.rs (a small test-only module)
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Duration};

use rosc::{encoder, OscPacket, OscType};
use playctl_common::models::PlayerCommand;
use playctl_osc::{ChannelSink, CommandSink, ListenerHandle, ListenerStats, DEFAULT_QUEUE_CAPACITY};

pub fn channel_sink() -> (Arc<dyn CommandSink>, mpsc::Receiver<PlayerCommand>) {
    let (tx, rx) = mpsc::channel(DEFAULT_QUEUE_CAPACITY);
    (Arc::new(ChannelSink::new(tx)), rx)
}

pub fn encode(addr: &str, args: Vec<OscType>) -> Vec<u8> {
    encoder::encode(&OscPacket::Message(rosc::OscMessage {
        addr: addr.to_string(),
        args,
    }))
    .expect("encode OSC message")
}

/// Loopback address for a listener bound on 0.0.0.0.
pub fn loopback(addr: SocketAddr) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], addr.port()))
}

pub async fn send_to(target: SocketAddr, bytes: &[u8]) -> anyhow::Result<()> {
    let sock = UdpSocket::bind("127.0.0.1:0").await?;
    sock.send_to(bytes, loopback(target)).await?;
    Ok(())
}

pub async fn next_command(rx: &mut mpsc::Receiver<PlayerCommand>) -> Option<PlayerCommand> {
    timeout(Duration::from_secs(2), rx.recv()).await.ok().flatten()
}

/// True if nothing shows up on `rx` for a short while.
pub async fn stays_quiet(rx: &mut mpsc::Receiver<PlayerCommand>) -> bool {
    timeout(Duration::from_millis(200), rx.recv()).await.is_err()
}

/// Poll until the listener has handled `datagrams` datagrams.
pub async fn wait_for_datagrams(handle: &ListenerHandle, datagrams: u64) -> ListenerStats {
    for _ in 0..100 {
        let stats = handle.stats().await;
        if stats.datagrams >= datagrams {
            return stats;
        }
        sleep(Duration::from_millis(20)).await;
    }
    handle.stats().await
}
