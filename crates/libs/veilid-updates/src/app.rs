use serde_json::{json, Value as JsonValue};
use veilid_types::json::{as_object, optional_field, required_bytes, required_field};
use veilid_types::{encode_no_pad, FromJson, OperationId, ToJson, TypedKey, VeilidError};

/// One-way application message delivered by the node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VeilidAppMessage {
    /// `None` when the message arrived over a private route.
    pub sender: Option<TypedKey>,
    pub message: Vec<u8>,
}

impl FromJson for VeilidAppMessage {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "app message")?;
        Ok(Self {
            sender: optional_field(value, "sender")?,
            message: required_bytes(value, "message")?,
        })
    }
}

impl ToJson for VeilidAppMessage {
    fn to_json(&self) -> JsonValue {
        json!({
            "sender": self.sender.to_json(),
            "message": encode_no_pad(&self.message),
        })
    }
}

/// Application request awaiting a reply keyed by `operation_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VeilidAppCall {
    pub sender: Option<TypedKey>,
    pub message: Vec<u8>,
    pub operation_id: OperationId,
}

impl FromJson for VeilidAppCall {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "app call")?;
        Ok(Self {
            sender: optional_field(value, "sender")?,
            message: required_bytes(value, "message")?,
            operation_id: required_field(value, "operation_id")?,
        })
    }
}

impl ToJson for VeilidAppCall {
    fn to_json(&self) -> JsonValue {
        json!({
            "sender": self.sender.to_json(),
            "message": encode_no_pad(&self.message),
            "operation_id": self.operation_id.to_json(),
        })
    }
}
