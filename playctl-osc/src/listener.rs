// File: playctl-osc/src/listener.rs
//! Owns the UDP socket. One running listener means exactly one bound socket;
//! the socket lives inside the receive task and is dropped when it ends.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use crate::config::OscConfig;
use crate::dispatcher::Dispatcher;
use crate::{OscError, Result};

/// Counters kept by a running listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub datagrams: u64,
    pub dispatched: u64,
    pub dropped: u64,
    /// Whoever sent the most recent datagram.
    pub last_remote: Option<SocketAddr>,
}

pub struct Listener;

impl Listener {
    /// Bind `0.0.0.0:<osc_udp_local_port>` and start receiving. Port 0 picks
    /// an ephemeral port; see `ListenerHandle::local_addr`.
    ///
    /// Returns only once the socket is bound, so a bind failure is reported
    /// here and never after the fact.
    pub async fn start(config: &OscConfig, dispatcher: Dispatcher) -> Result<ListenerHandle> {
        let port = config.osc_udp_local_port;
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port))
            .await
            .map_err(|source| OscError::Bind { port, source })?;
        let local_addr = socket.local_addr()?;

        info!(
            port = local_addr.port(),
            prefix = dispatcher.prefix(),
            "Listening for OSC messages on port {}",
            local_addr.port()
        );

        let (stop_tx, stop_rx) = watch::channel(false);
        let stats = Arc::new(Mutex::new(ListenerStats::default()));
        let task = tokio::spawn(receive_loop(socket, dispatcher, stop_rx, stats.clone()));

        Ok(ListenerHandle {
            local_addr,
            stop_tx: Some(stop_tx),
            task: Some(task),
            stats,
        })
    }
}

async fn receive_loop(
    socket: UdpSocket,
    dispatcher: Dispatcher,
    mut stop_rx: watch::Receiver<bool>,
    stats: Arc<Mutex<ListenerStats>>,
) {
    let mut buf = vec![0u8; rosc::decoder::MTU];
    loop {
        tokio::select! {
            res = socket.recv_from(&mut buf) => {
                match res {
                    Ok((size, sender)) => {
                        // handled in full before the next receive
                        let report = dispatcher.handle_datagram(&buf[..size], sender);
                        let mut s = stats.lock().await;
                        s.datagrams += 1;
                        s.dispatched += report.dispatched as u64;
                        s.dropped += report.dropped as u64;
                        s.last_remote = Some(sender);
                    }
                    Err(e) => {
                        warn!("Error receiving OSC datagram => {e}");
                    }
                }
            }
            _ = stop_rx.changed() => {
                debug!("OSC listener got stop signal");
                break;
            }
        }
    }
}

/// A running (or stopped) listener.
pub struct ListenerHandle {
    local_addr: SocketAddr,
    stop_tx: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
    stats: Arc<Mutex<ListenerStats>>,
}

impl ListenerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub async fn stats(&self) -> ListenerStats {
        *self.stats.lock().await
    }

    /// Close the socket. When this returns the port is free again.
    /// Calling it on a stopped handle does nothing.
    pub async fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(true);
        }
        if let Err(e) = task.await {
            error!("OSC listener task ended abnormally: {e}");
        }
        info!("OSC listener on port {} has been shut down.", self.local_addr.port());
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
