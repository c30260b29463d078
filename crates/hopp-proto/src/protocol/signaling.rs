//! Call-signaling envelope.
//!
//! Same discriminated-envelope style as the control lane, but a separate
//! union: signaling travels over the call's control channel, not the
//! remote-control data channel.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ProtoError, Result};
use crate::protocol::value;

/// Closed literal set for `call_reject.reject_reason`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectReason {
    Busy,
    Declined,
}

impl RejectReason {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "busy" => Ok(RejectReason::Busy),
            "declined" => Ok(RejectReason::Declined),
            other => Err(ProtoError::InvalidEnumValue {
                field: "reject_reason",
                value: other.to_owned(),
            }),
        }
    }
}

/// Media token payload granted when a call is established.
///
/// This is the only piece of the authentication surface the protocol layer
/// consumes; issuing and refreshing tokens is the host's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallTokens {
    #[serde(rename = "audioToken")]
    pub audio_token: String,
    #[serde(rename = "videoToken")]
    pub video_token: String,
    #[serde(rename = "cameraToken")]
    pub camera_token: String,
    pub participant: String,
}

impl CallTokens {
    fn parse(obj: &Map<String, Value>) -> Result<Self> {
        Ok(CallTokens {
            audio_token: value::get_string(obj, "audioToken")?,
            video_token: value::get_string(obj, "videoToken")?,
            camera_token: value::get_string(obj, "cameraToken")?,
            participant: value::get_string(obj, "participant")?,
        })
    }
}

/// Call-signaling message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CallMessage {
    Success,
    CallRequest {
        callee_id: String,
    },
    IncomingCall {
        caller_id: String,
    },
    CalleeOffline {
        callee_id: String,
    },
    CallReject {
        caller_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reject_reason: Option<RejectReason>,
    },
    CallAccept {
        caller_id: String,
    },
    CallTokens(CallTokens),
    Error {
        error: String,
    },
    CallEnd {
        call_id: String,
    },
    Ping {
        message: String,
    },
    Pong {
        message: String,
    },
    TeammateOnline {
        teammate_id: String,
    },
}

fn payload_obj<'a>(root: &'a Map<String, Value>) -> Result<&'a Map<String, Value>> {
    value::get_obj(root, "payload")
}

impl CallMessage {
    /// Validate a decoded signaling value into a typed message.
    pub fn parse(raw: &Value) -> Result<Self> {
        let root = value::as_object(raw, "message")?;
        match value::get_str(root, "type")? {
            "success" => Ok(CallMessage::Success),
            "call_request" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::CallRequest {
                    callee_id: value::get_string(p, "callee_id")?,
                })
            }
            "incoming_call" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::IncomingCall {
                    caller_id: value::get_string(p, "caller_id")?,
                })
            }
            "callee_offline" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::CalleeOffline {
                    callee_id: value::get_string(p, "callee_id")?,
                })
            }
            "call_reject" => {
                let p = payload_obj(root)?;
                let reject_reason = match p.get("reject_reason") {
                    None | Some(Value::Null) => None,
                    Some(v) => {
                        let s = v.as_str().ok_or(ProtoError::InvalidFieldType {
                            field: "reject_reason",
                            expected: "string",
                        })?;
                        Some(RejectReason::parse(s)?)
                    }
                };
                Ok(CallMessage::CallReject {
                    caller_id: value::get_string(p, "caller_id")?,
                    reject_reason,
                })
            }
            "call_accept" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::CallAccept {
                    caller_id: value::get_string(p, "caller_id")?,
                })
            }
            "call_tokens" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::CallTokens(CallTokens::parse(p)?))
            }
            "error" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::Error {
                    error: value::get_string(p, "error")?,
                })
            }
            "call_end" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::CallEnd {
                    call_id: value::get_string(p, "call_id")?,
                })
            }
            "ping" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::Ping {
                    message: value::get_string(p, "message")?,
                })
            }
            "pong" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::Pong {
                    message: value::get_string(p, "message")?,
                })
            }
            "teammate_online" => {
                let p = payload_obj(root)?;
                Ok(CallMessage::TeammateOnline {
                    teammate_id: value::get_string(p, "teammate_id")?,
                })
            }
            other => Err(ProtoError::UnknownMessageType(other.to_owned())),
        }
    }
}
