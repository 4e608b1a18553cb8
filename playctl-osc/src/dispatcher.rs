// File: playctl-osc/src/dispatcher.rs
//! Decodes one datagram at a time and routes `/<prefix>/<command>[/...]`
//! messages to the command sink.
//!
//! Every failure past decoding is per-message: it is logged with the sender
//! and the message is dropped. Nothing here can stop the listener.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use playctl_common::models::{OscValue, PlayerCommand, VolumeLevel};
use crate::codec::{OscCodec, OscMessage, RoscCodec};
use crate::sink::CommandSink;
use crate::{OscError, Result, RoutingMiscue};

/// The fixed route table: second address segment to command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Stop,
    GetState,
    SetVolume,
}

impl Command {
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "play" => Some(Command::Play),
            "stop" => Some(Command::Stop),
            "getstate" => Some(Command::GetState),
            "setvolume" => Some(Command::SetVolume),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Stop => "stop",
            Command::GetState => "getstate",
            Command::SetVolume => "setvolume",
        }
    }

    /// Build the player command from what follows the command segment.
    fn build(self, residual: &[&str], args: &[OscValue]) -> Result<PlayerCommand> {
        match self {
            Command::Play => {
                let resource_id = play_target(residual, args)?;
                Ok(PlayerCommand::Play { resource_id })
            }
            // residual path and arguments are ignored
            Command::Stop => Ok(PlayerCommand::Stop),
            Command::GetState => Ok(PlayerCommand::GetState),
            Command::SetVolume => {
                let level = volume_level(args.first())?;
                Ok(PlayerCommand::SetVolume { level })
            }
        }
    }
}

/// Residual path segments joined with `/`, or else the first argument.
/// A path made only of slashes counts as absent; an empty target is rejected.
fn play_target(residual: &[&str], args: &[OscValue]) -> Result<String> {
    let joined = residual.join("/");
    if !joined.trim_matches('/').is_empty() {
        return Ok(joined);
    }
    match args.first() {
        Some(arg) => match arg.as_str() {
            Some(s) if !s.is_empty() => Ok(s.to_string()),
            Some(_) => Err(OscError::InvalidArgument("play resource argument is empty".into())),
            None => Err(OscError::InvalidArgument(format!(
                "play expects a string resource, got '{}' argument {arg}",
                arg.type_tag()
            ))),
        },
        None => Err(OscError::InvalidArgument(
            "play needs a resource path or a string argument".into(),
        )),
    }
}

fn volume_level(arg: Option<&OscValue>) -> Result<VolumeLevel> {
    match arg {
        Some(OscValue::Int(v)) => Ok(VolumeLevel::Int(i64::from(*v))),
        Some(OscValue::Long(v)) => Ok(VolumeLevel::Int(*v)),
        Some(OscValue::Float(v)) => Ok(VolumeLevel::Float(f64::from(*v))),
        Some(OscValue::Double(v)) => Ok(VolumeLevel::Float(*v)),
        Some(OscValue::Str(s)) => s
            .parse::<VolumeLevel>()
            .map_err(OscError::InvalidArgument),
        Some(other) => Err(OscError::InvalidArgument(format!(
            "setvolume expects a number, got '{}' argument {other}",
            other.type_tag()
        ))),
        None => Err(OscError::InvalidArgument("setvolume needs a level argument".into())),
    }
}

/// What happened to the messages of one datagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub dispatched: usize,
    pub dropped: usize,
}

pub struct Dispatcher {
    prefix: String,
    sink: Arc<dyn CommandSink>,
    codec: Arc<dyn OscCodec>,
}

impl Dispatcher {
    pub fn new(prefix: &str, sink: Arc<dyn CommandSink>, codec: Arc<dyn OscCodec>) -> Self {
        Self {
            prefix: prefix.to_string(),
            sink,
            codec,
        }
    }

    /// Dispatcher using the rosc codec.
    pub fn with_default_codec(prefix: &str, sink: Arc<dyn CommandSink>) -> Self {
        Self::new(prefix, sink, Arc::new(RoscCodec))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Decode, route and submit everything in `bytes`. Never fails; a
    /// malformed datagram counts as one dropped message.
    pub fn handle_datagram(&self, bytes: &[u8], sender: SocketAddr) -> DispatchReport {
        let mut report = DispatchReport::default();

        let messages = match self.codec.decode(bytes) {
            Ok(m) => m,
            Err(e) => {
                error!(%sender, len = bytes.len(), "Could not decode OSC message: {e}");
                report.dropped += 1;
                return report;
            }
        };

        for msg in &messages {
            debug!(%sender, address = %msg.address, "received message");
            match self.dispatch_message(msg) {
                Ok(cmd) => {
                    let name = cmd.name();
                    match &cmd {
                        PlayerCommand::Play { resource_id } => {
                            info!(command = name, resource_id = %resource_id, %sender, "play request");
                        }
                        PlayerCommand::SetVolume { level } => {
                            info!(command = name, level = %level, %sender, "set volume request");
                        }
                        _ => info!(command = name, %sender, "{name} request"),
                    }
                    match self.sink.submit(cmd) {
                        Ok(()) => report.dispatched += 1,
                        Err(e) => {
                            error!(command = name, "Could not hand command to player: {e}");
                            report.dropped += 1;
                        }
                    }
                }
                Err(OscError::Routing(miscue)) => {
                    warn!(%sender, address = %msg.address, "Dropping OSC message: {miscue}");
                    report.dropped += 1;
                }
                Err(e) => {
                    warn!(%sender, address = %msg.address, "Rejected OSC message: {e}");
                    report.dropped += 1;
                }
            }
        }
        report
    }

    /// Resolve one message to a player command without submitting it.
    pub fn dispatch_message(&self, msg: &OscMessage) -> Result<PlayerCommand> {
        let segments = msg.segments();
        let root = segments.first().copied().unwrap_or("");
        if root != self.prefix {
            return Err(RoutingMiscue::PrefixMismatch {
                expected: self.prefix.clone(),
                found: root.to_string(),
            }
            .into());
        }

        let command_segment = match segments.get(1) {
            Some(s) if !s.is_empty() => *s,
            _ => return Err(RoutingMiscue::MissingCommand.into()),
        };
        let command = Command::parse(command_segment)
            .ok_or_else(|| RoutingMiscue::UnknownCommand(command_segment.to_string()))?;

        command.build(&segments[2..], &msg.args)
    }
}
