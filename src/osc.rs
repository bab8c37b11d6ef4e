//! Translation of decoded OSC packets into typed cursor messages.
//!
//! The decoder assumes well-typed input, so everything ambiguous about the
//! wire format is settled here: address filtering, command dispatch, and
//! strict arity/type checking of the TUIO 1.1 cursor profile arguments.
//! Malformed messages become [`TuioError::Parse`] values that the source
//! logs and drops; they never reach the decoder and never kill the
//! listener.

use rosc::{OscMessage, OscPacket, OscType};
use tracing::{trace, warn};

use crate::types::{CursorMessage, CursorPoint};
use crate::{Result, TuioError};

/// Flatten an OSC packet into cursor messages, in wire order.
///
/// TUIO sources wrap each sensor update in one OSC bundle; nested bundles
/// are descended recursively in element order. Messages on other OSC
/// addresses are skipped, and malformed cursor messages are logged and
/// dropped.
pub fn collect_packet(packet: OscPacket, profile: &str, out: &mut Vec<CursorMessage>) {
    match packet {
        OscPacket::Message(msg) => {
            if msg.addr != profile {
                trace!(addr = %msg.addr, "skipping message on foreign OSC address");
                return;
            }
            match translate_message(&msg) {
                Ok(translated) => out.push(translated),
                Err(err) => warn!(error = %err, "dropping malformed cursor message"),
            }
        }
        OscPacket::Bundle(bundle) => {
            for element in bundle.content {
                collect_packet(element, profile, out);
            }
        }
    }
}

/// Translate one cursor-profile OSC message.
///
/// The first argument selects the command (`alive`, `set`, `fseq`); any
/// other command string is surfaced as [`CursorMessage::Unrecognized`].
/// Wrong arity or argument types are an error.
pub fn translate_message(msg: &OscMessage) -> Result<CursorMessage> {
    let command = match msg.args.first() {
        Some(OscType::String(cmd)) => cmd.as_str(),
        Some(other) => {
            return Err(TuioError::parse(
                "cursor",
                format!("first argument must be a command string, got {other:?}"),
            ));
        }
        None => return Err(TuioError::parse("cursor", "message has no arguments")),
    };

    match command {
        "alive" => {
            let mut session_ids = Vec::with_capacity(msg.args.len() - 1);
            for (idx, arg) in msg.args[1..].iter().enumerate() {
                match arg {
                    OscType::Int(id) => session_ids.push(*id),
                    other => {
                        return Err(TuioError::parse(
                            "alive",
                            format!("session id {idx} is not an int32: {other:?}"),
                        ));
                    }
                }
            }
            Ok(CursorMessage::Alive { session_ids })
        }
        "set" => {
            if msg.args.len() != 7 {
                return Err(TuioError::parse(
                    "set",
                    format!("expected 7 arguments, got {}", msg.args.len()),
                ));
            }
            let session_id = int_arg(&msg.args[1], "set", "session id")?;
            Ok(CursorMessage::Set(CursorPoint {
                session_id,
                x: float_arg(&msg.args[2], "set", "x")?,
                y: float_arg(&msg.args[3], "set", "y")?,
                x_velocity: float_arg(&msg.args[4], "set", "x velocity")?,
                y_velocity: float_arg(&msg.args[5], "set", "y velocity")?,
                motion_acceleration: float_arg(&msg.args[6], "set", "motion acceleration")?,
            }))
        }
        "fseq" => {
            if msg.args.len() != 2 {
                return Err(TuioError::parse(
                    "fseq",
                    format!("expected 1 sequence number, got {} arguments", msg.args.len() - 1),
                ));
            }
            let frame = int_arg(&msg.args[1], "fseq", "sequence number")?;
            Ok(CursorMessage::Fseq { frame })
        }
        other => Ok(CursorMessage::Unrecognized { command: other.to_string() }),
    }
}

fn int_arg(arg: &OscType, command: &str, what: &str) -> Result<i32> {
    match arg {
        OscType::Int(v) => Ok(*v),
        other => Err(TuioError::parse(command, format!("{what} is not an int32: {other:?}"))),
    }
}

fn float_arg(arg: &OscType, command: &str, what: &str) -> Result<f32> {
    match arg {
        OscType::Float(v) => Ok(*v),
        other => Err(TuioError::parse(command, format!("{what} is not a float32: {other:?}"))),
    }
}
