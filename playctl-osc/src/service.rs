// File: playctl-osc/src/service.rs
//! Lifecycle around the listener: start, stop, restart and reconfigure,
//! each returning a definite outcome before the caller moves on.
//!
//! All transitions go through one mutex, so a restart can never interleave
//! with another start or stop.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use crate::codec::{OscCodec, RoscCodec};
use crate::config::{ConfigUpdate, OscConfig};
use crate::dispatcher::Dispatcher;
use crate::listener::{Listener, ListenerHandle, ListenerStats};
use crate::sink::CommandSink;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OscStatus {
    pub is_running: bool,
    pub listening_port: Option<u16>,
    pub prefix: String,
    pub stats: Option<ListenerStats>,
}

#[derive(Clone)]
pub struct OscService {
    inner: Arc<Mutex<OscServiceInner>>,
}

struct OscServiceInner {
    config: OscConfig,
    sink: Arc<dyn CommandSink>,
    codec: Arc<dyn OscCodec>,
    listener: Option<ListenerHandle>,
}

impl OscServiceInner {
    async fn start(&mut self) -> Result<SocketAddr> {
        if let Some(l) = &self.listener {
            return Ok(l.local_addr());
        }
        let dispatcher = Dispatcher::new(
            &self.config.osc_body_prefix,
            self.sink.clone(),
            self.codec.clone(),
        );
        let handle = Listener::start(&self.config, dispatcher).await?;
        let addr = handle.local_addr();
        self.listener = Some(handle);
        Ok(addr)
    }

    async fn stop(&mut self) {
        if let Some(mut l) = self.listener.take() {
            l.stop().await;
        }
    }
}

impl OscService {
    pub fn new(config: OscConfig, sink: Arc<dyn CommandSink>) -> Self {
        Self::with_codec(config, sink, Arc::new(RoscCodec))
    }

    pub fn with_codec(
        config: OscConfig,
        sink: Arc<dyn CommandSink>,
        codec: Arc<dyn OscCodec>,
    ) -> Self {
        let inner = OscServiceInner {
            config,
            sink,
            codec,
            listener: None,
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    pub async fn config(&self) -> OscConfig {
        self.inner.lock().await.config.clone()
    }

    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.listener.is_some()
    }

    /// Bind and start listening. Already running => returns the bound address.
    pub async fn start(&self) -> Result<SocketAddr> {
        let mut guard = self.inner.lock().await;
        guard.start().await
    }

    /// Stop listening. Safe to call when already stopped.
    pub async fn stop(&self) {
        let mut guard = self.inner.lock().await;
        guard.stop().await;
    }

    /// Stop fully (port released), then start again with the current config.
    pub async fn restart(&self) -> Result<SocketAddr> {
        let mut guard = self.inner.lock().await;
        guard.stop().await;
        guard.start().await
    }

    /// Merge `update` into the config. A running listener is restarted with
    /// the new values; a stopped one stays stopped and returns `None`.
    ///
    /// An update that fails validation changes nothing. If the restart itself
    /// fails the new config is kept and the service is left stopped.
    pub async fn reconfigure(&self, update: &ConfigUpdate) -> Result<Option<SocketAddr>> {
        let mut guard = self.inner.lock().await;
        let next = guard.config.apply(update)?;
        info!(
            port = next.osc_udp_local_port,
            prefix = %next.osc_body_prefix,
            "Applying new OSC configuration"
        );
        guard.config = next;

        if guard.listener.is_none() {
            return Ok(None);
        }
        guard.stop().await;
        guard.start().await.map(Some)
    }

    pub async fn status(&self) -> OscStatus {
        let guard = self.inner.lock().await;
        let (listening_port, stats) = match &guard.listener {
            Some(l) => (Some(l.local_addr().port()), Some(l.stats().await)),
            None => (None, None),
        };
        OscStatus {
            is_running: guard.listener.is_some(),
            listening_port,
            prefix: guard.config.osc_body_prefix.clone(),
            stats,
        }
    }
}
