use serde_json::Value as JsonValue;
use thiserror::Error;
use veilid_types::json::{as_object, optional, optional_str, required_str, required_u64};
use veilid_types::{FromJson, ToJson, VeilidError};

use crate::api_error::VeilidApiError;
use crate::update::{decode_update, VeilidUpdate};

pub const MESSAGE_TYPE_RESPONSE: &str = "Response";
pub const MESSAGE_TYPE_UPDATE: &str = "Update";

/// One line read from the node's control channel.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeMessage {
    Response(ApiResponse),
    Update(VeilidUpdate),
}

impl NodeMessage {
    pub fn as_update(&self) -> Option<&VeilidUpdate> {
        match self {
            Self::Update(update) => Some(update),
            Self::Response(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("node returned error: {0}")]
    Api(VeilidApiError),
    #[error("undecodable response error: {0}")]
    Decode(VeilidError),
}

/// Reply to a request, matched to it by `id`.
///
/// The body is kept undecoded since its shape depends on the request `op`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub id: u64,
    pub op: Option<String>,
    pub body: JsonValue,
}

impl ApiResponse {
    /// The `value` of a successful response, or the node's error.
    pub fn result(&self) -> Result<&JsonValue, ResponseError> {
        if let Some(error) = optional(&self.body, "error") {
            let error = VeilidApiError::from_json(error).map_err(ResponseError::Decode)?;
            return Err(ResponseError::Api(error));
        }
        Ok(optional(&self.body, "value").unwrap_or(&JsonValue::Null))
    }

    /// Decodes the successful `value` as `T`.
    pub fn decode_value<T: FromJson>(&self) -> Result<T, ResponseError> {
        T::from_json(self.result()?).map_err(ResponseError::Decode)
    }
}

impl FromJson for ApiResponse {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "response")?;
        Ok(Self {
            id: required_u64(value, "id")?,
            op: optional_str(value, "op")?.map(str::to_owned),
            body: value.clone(),
        })
    }
}

impl ToJson for ApiResponse {
    fn to_json(&self) -> JsonValue {
        self.body.clone()
    }
}

/// Decodes one control-channel object by its `type` field.
pub fn decode_message(value: &JsonValue) -> Result<NodeMessage, VeilidError> {
    as_object(value, "message")?;
    match required_str(value, "type")? {
        MESSAGE_TYPE_RESPONSE => Ok(NodeMessage::Response(ApiResponse::from_json(value)?)),
        MESSAGE_TYPE_UPDATE => Ok(NodeMessage::Update(decode_update(value)?)),
        other => {
            log::debug!("message: unknown type {other:?}");
            Err(VeilidError::UnknownMessageType { value: other.to_owned() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veilid_types::CryptoKind;

    #[test]
    fn update_lines_carry_type_and_kind() {
        let message =
            decode_message(&json!({ "type": "Update", "kind": "Shutdown" })).expect("update");
        assert_eq!(message.as_update(), Some(&VeilidUpdate::Shutdown));
    }

    #[test]
    fn successful_response_yields_value() {
        let message = decode_message(&json!({
            "type": "Response",
            "id": 4,
            "op": "GetState",
            "value": "VLD0:abcd",
        }))
        .expect("response");
        let NodeMessage::Response(response) = message else {
            panic!("expected a response");
        };
        assert_eq!(response.id, 4);
        assert_eq!(response.op.as_deref(), Some("GetState"));
        let key: veilid_types::TypedKey = response.decode_value().expect("typed key value");
        assert_eq!(key.kind().expect("kind"), CryptoKind::Vld0);
    }

    #[test]
    fn response_without_value_is_null() {
        let response =
            ApiResponse::from_json(&json!({ "type": "Response", "id": 1 })).expect("response");
        assert_eq!(response.result().expect("ok"), &JsonValue::Null);
    }

    #[test]
    fn error_field_becomes_api_error() {
        let response = ApiResponse::from_json(&json!({
            "id": 2,
            "error": { "kind": "Timeout" },
        }))
        .expect("response");
        assert_eq!(response.result(), Err(ResponseError::Api(VeilidApiError::Timeout)));

        let response = ApiResponse::from_json(&json!({ "id": 3, "error": "nope" }))
            .expect("response");
        assert!(matches!(response.result(), Err(ResponseError::Decode(_))));
    }

    #[test]
    fn unknown_message_type() {
        let err = decode_message(&json!({ "type": "Request", "id": 1 })).expect_err("type");
        assert_eq!(err, VeilidError::UnknownMessageType { value: "Request".into() });
    }
}
