//! playctl-osc/src/lib.rs
//!
//! The main library file for the `playctl-osc` crate: a UDP listener that
//! decodes OSC datagrams and routes `/<prefix>/<command>` messages to the
//! player through a non-blocking sink.

pub mod codec;
pub mod config;
pub mod dispatcher;
pub mod listener;
pub mod service;
pub mod sink;

use std::fmt;
use thiserror::Error;

pub use codec::{OscCodec, OscMessage, RoscCodec};
pub use config::{ConfigUpdate, OscConfig};
pub use dispatcher::{Command, DispatchReport, Dispatcher};
pub use listener::{Listener, ListenerHandle, ListenerStats};
pub use service::{OscService, OscStatus};
pub use sink::{
    spawn_sink_worker, spawn_sink_worker_with_capacity, ChannelSink, CommandSink, SinkWorker,
    DEFAULT_QUEUE_CAPACITY,
};

/// Why a well-formed message did not match any route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingMiscue {
    PrefixMismatch { expected: String, found: String },
    MissingCommand,
    UnknownCommand(String),
}

impl fmt::Display for RoutingMiscue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMiscue::PrefixMismatch { expected, found } => {
                write!(f, "address root '{found}' does not match prefix '{expected}'")
            }
            RoutingMiscue::MissingCommand => write!(f, "no command segment after prefix"),
            RoutingMiscue::UnknownCommand(cmd) => write!(f, "message type unknown: '{cmd}'"),
        }
    }
}

#[derive(Error, Debug)]
pub enum OscError {
    #[error("could not open UDP port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode OSC message: {0}")]
    Decode(String),

    #[error("OSC routing: {0}")]
    Routing(RoutingMiscue),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Command sink error: {0}")]
    Sink(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("OSC I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RoutingMiscue> for OscError {
    fn from(m: RoutingMiscue) -> Self {
        OscError::Routing(m)
    }
}

pub type Result<T> = std::result::Result<T, OscError>;
