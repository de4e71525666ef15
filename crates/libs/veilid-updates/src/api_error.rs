use serde_json::{json, Value as JsonValue};
use thiserror::Error;
use veilid_types::json::{as_object, required_str};
use veilid_types::{FromJson, ToJson, VeilidError};

/// Error reported by the node in the `error` field of a response.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VeilidApiError {
    #[error("api not initialized")]
    NotInitialized,
    #[error("api already initialized")]
    AlreadyInitialized,
    #[error("timeout")]
    Timeout,
    #[error("try again")]
    TryAgain,
    #[error("node is shutting down")]
    Shutdown,
    #[error("invalid target")]
    InvalidTarget,
    #[error("no connection: {message}")]
    NoConnection { message: String },
    #[error("key not found: {key}")]
    KeyNotFound { key: String },
    #[error("internal error: {message}")]
    Internal { message: String },
    #[error("unimplemented: {message}")]
    Unimplemented { message: String },
    #[error("parse error: {message} ({value:?})")]
    ParseError { message: String, value: String },
    #[error("invalid argument in {context}: {argument} = {value:?}")]
    InvalidArgument { context: String, argument: String, value: String },
    #[error("missing argument in {context}: {argument}")]
    MissingArgument { context: String, argument: String },
    #[error("{message}")]
    Generic { message: String },
    /// An error kind this client does not know about.
    #[error("unrecognized api error kind {kind:?}")]
    Unrecognized { kind: String },
}

impl VeilidApiError {
    pub fn kind(&self) -> &str {
        match self {
            Self::NotInitialized => "NotInitialized",
            Self::AlreadyInitialized => "AlreadyInitialized",
            Self::Timeout => "Timeout",
            Self::TryAgain => "TryAgain",
            Self::Shutdown => "Shutdown",
            Self::InvalidTarget => "InvalidTarget",
            Self::NoConnection { .. } => "NoConnection",
            Self::KeyNotFound { .. } => "KeyNotFound",
            Self::Internal { .. } => "Internal",
            Self::Unimplemented { .. } => "Unimplemented",
            Self::ParseError { .. } => "ParseError",
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::MissingArgument { .. } => "MissingArgument",
            Self::Generic { .. } => "Generic",
            Self::Unrecognized { kind } => kind.as_str(),
        }
    }

    /// Returns `true` when the same request may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::TryAgain | Self::NoConnection { .. })
    }
}

fn string_field(value: &JsonValue, field: &'static str) -> Result<String, VeilidError> {
    required_str(value, field).map(str::to_owned)
}

impl FromJson for VeilidApiError {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "api error")?;
        let error = match required_str(value, "kind")? {
            "NotInitialized" => Self::NotInitialized,
            "AlreadyInitialized" => Self::AlreadyInitialized,
            "Timeout" => Self::Timeout,
            "TryAgain" => Self::TryAgain,
            "Shutdown" => Self::Shutdown,
            "InvalidTarget" => Self::InvalidTarget,
            "NoConnection" => Self::NoConnection { message: string_field(value, "message")? },
            "KeyNotFound" => Self::KeyNotFound { key: string_field(value, "key")? },
            "Internal" => Self::Internal { message: string_field(value, "message")? },
            "Unimplemented" => Self::Unimplemented { message: string_field(value, "message")? },
            "ParseError" => Self::ParseError {
                message: string_field(value, "message")?,
                value: string_field(value, "value")?,
            },
            "InvalidArgument" => Self::InvalidArgument {
                context: string_field(value, "context")?,
                argument: string_field(value, "argument")?,
                value: string_field(value, "value")?,
            },
            "MissingArgument" => Self::MissingArgument {
                context: string_field(value, "context")?,
                argument: string_field(value, "argument")?,
            },
            "Generic" => Self::Generic { message: string_field(value, "message")? },
            other => {
                log::debug!("api error: unrecognized kind {other:?}");
                Self::Unrecognized { kind: other.to_owned() }
            }
        };
        Ok(error)
    }
}

impl ToJson for VeilidApiError {
    fn to_json(&self) -> JsonValue {
        let kind = self.kind();
        match self {
            Self::NoConnection { message }
            | Self::Internal { message }
            | Self::Unimplemented { message }
            | Self::Generic { message } => json!({ "kind": kind, "message": message }),
            Self::KeyNotFound { key } => json!({ "kind": kind, "key": key }),
            Self::ParseError { message, value } => {
                json!({ "kind": kind, "message": message, "value": value })
            }
            Self::InvalidArgument { context, argument, value } => json!({
                "kind": kind,
                "context": context,
                "argument": argument,
                "value": value,
            }),
            Self::MissingArgument { context, argument } => {
                json!({ "kind": kind, "context": context, "argument": argument })
            }
            _ => json!({ "kind": kind }),
        }
    }
}
