// File: playctl-osc/src/codec.rs
//! Turning raw datagrams into messages. The binary layout itself is rosc's
//! job; this module only flattens packets and maps argument types.

use rosc::{OscPacket, OscType};
use playctl_common::models::OscValue;
use crate::{OscError, Result};

/// A decoded OSC message, scoped to one dispatch call.
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<OscValue>,
}

impl OscMessage {
    pub fn new(address: impl Into<String>, args: Vec<OscValue>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// Address split on `/` after dropping one leading slash. Empty segments
    /// are kept, so `/a//b` yields `["a", "", "b"]`.
    pub fn segments(&self) -> Vec<&str> {
        let addr = self.address.strip_prefix('/').unwrap_or(&self.address);
        addr.split('/').collect()
    }
}

pub trait OscCodec: Send + Sync {
    /// Decode one datagram. A bundle yields all of its messages, depth-first.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<OscMessage>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RoscCodec;

impl OscCodec for RoscCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<OscMessage>> {
        let (_rest, packet) = rosc::decoder::decode_udp(bytes)
            .map_err(|e| OscError::Decode(format!("{e}")))?;
        let mut out = Vec::new();
        flatten_packet(packet, &mut out);
        Ok(out)
    }
}

fn flatten_packet(packet: OscPacket, out: &mut Vec<OscMessage>) {
    match packet {
        OscPacket::Message(msg) => {
            out.push(OscMessage {
                address: msg.addr,
                args: msg.args.into_iter().map(convert_arg).collect(),
            });
        }
        OscPacket::Bundle(bundle) => {
            // time tags are ignored, everything is delivered immediately
            for p in bundle.content {
                flatten_packet(p, out);
            }
        }
    }
}

fn convert_arg(arg: OscType) -> OscValue {
    match arg {
        OscType::Int(v) => OscValue::Int(v),
        OscType::Float(v) => OscValue::Float(v),
        OscType::String(s) => OscValue::Str(s),
        OscType::Blob(b) => OscValue::Blob(b),
        OscType::Long(v) => OscValue::Long(v),
        OscType::Double(v) => OscValue::Double(v),
        OscType::Bool(v) => OscValue::Bool(v),
        OscType::Time(_) => OscValue::Other("Time".into()),
        OscType::Char(_) => OscValue::Other("Char".into()),
        OscType::Color(_) => OscValue::Other("Color".into()),
        OscType::Midi(_) => OscValue::Other("Midi".into()),
        OscType::Array(_) => OscValue::Other("Array".into()),
        OscType::Nil => OscValue::Other("Nil".into()),
        OscType::Inf => OscValue::Other("Inf".into()),
        #[allow(unreachable_patterns)]
        _ => OscValue::Other("Unsupported".into()),
    }
}
