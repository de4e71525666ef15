use std::fmt;
use std::str::FromStr;

use serde_json::{Map as JsonMap, Value as JsonValue};
use veilid_types::json::{as_object, required_str};
use veilid_types::{FromJson, ToJson, VeilidError};

use crate::app::{VeilidAppCall, VeilidAppMessage};
use crate::node_log::VeilidLog;
use crate::route::VeilidRouteChange;
use crate::state::{VeilidStateAttachment, VeilidStateConfig, VeilidStateNetwork};
use crate::value_change::VeilidValueChange;

/// Discriminant carried in the `kind` field of every update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VeilidUpdateKind {
    Log,
    AppMessage,
    AppCall,
    Attachment,
    Network,
    Config,
    RouteChange,
    ValueChange,
    Shutdown,
}

impl VeilidUpdateKind {
    pub const ALL: [Self; 9] = [
        Self::Log,
        Self::AppMessage,
        Self::AppCall,
        Self::Attachment,
        Self::Network,
        Self::Config,
        Self::RouteChange,
        Self::ValueChange,
        Self::Shutdown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "Log",
            Self::AppMessage => "AppMessage",
            Self::AppCall => "AppCall",
            Self::Attachment => "Attachment",
            Self::Network => "Network",
            Self::Config => "Config",
            Self::RouteChange => "RouteChange",
            Self::ValueChange => "ValueChange",
            Self::Shutdown => "Shutdown",
        }
    }
}

impl fmt::Display for VeilidUpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VeilidUpdateKind {
    type Err = VeilidError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| VeilidError::UnknownUpdateKind { kind: value.to_owned() })
    }
}

/// One node-originated event. Payload fields are siblings of `kind` on the
/// wire and are decoded from the same object.
#[derive(Clone, Debug, PartialEq)]
pub enum VeilidUpdate {
    Log(VeilidLog),
    AppMessage(VeilidAppMessage),
    AppCall(VeilidAppCall),
    Attachment(VeilidStateAttachment),
    Network(Box<VeilidStateNetwork>),
    Config(Box<VeilidStateConfig>),
    RouteChange(VeilidRouteChange),
    ValueChange(Box<VeilidValueChange>),
    Shutdown,
}

impl VeilidUpdate {
    pub fn kind(&self) -> VeilidUpdateKind {
        match self {
            Self::Log(_) => VeilidUpdateKind::Log,
            Self::AppMessage(_) => VeilidUpdateKind::AppMessage,
            Self::AppCall(_) => VeilidUpdateKind::AppCall,
            Self::Attachment(_) => VeilidUpdateKind::Attachment,
            Self::Network(_) => VeilidUpdateKind::Network,
            Self::Config(_) => VeilidUpdateKind::Config,
            Self::RouteChange(_) => VeilidUpdateKind::RouteChange,
            Self::ValueChange(_) => VeilidUpdateKind::ValueChange,
            Self::Shutdown => VeilidUpdateKind::Shutdown,
        }
    }

    pub fn payload_is_empty(&self) -> bool {
        matches!(self, Self::Shutdown)
    }

    fn payload_json(&self) -> JsonValue {
        match self {
            Self::Log(log) => log.to_json(),
            Self::AppMessage(message) => message.to_json(),
            Self::AppCall(call) => call.to_json(),
            Self::Attachment(attachment) => attachment.to_json(),
            Self::Network(network) => network.to_json(),
            Self::Config(config) => config.to_json(),
            Self::RouteChange(change) => change.to_json(),
            Self::ValueChange(change) => change.to_json(),
            Self::Shutdown => JsonValue::Object(JsonMap::new()),
        }
    }
}

/// Decodes one update object, dispatching on its `kind` field.
///
/// The selected variant decoder runs against the whole object, so fields
/// that belong to the framing (such as `type`) are ignored. Any field error
/// fails the entire update.
pub fn decode_update(value: &JsonValue) -> Result<VeilidUpdate, VeilidError> {
    as_object(value, "update")?;
    let tag = required_str(value, "kind")?;
    let kind = tag.parse::<VeilidUpdateKind>().map_err(|err| {
        log::debug!("update: unknown kind {tag:?}");
        err
    })?;
    log::trace!("update: decoding {kind}");

    let update = match kind {
        VeilidUpdateKind::Log => VeilidUpdate::Log(VeilidLog::from_json(value)?),
        VeilidUpdateKind::AppMessage => {
            VeilidUpdate::AppMessage(VeilidAppMessage::from_json(value)?)
        }
        VeilidUpdateKind::AppCall => VeilidUpdate::AppCall(VeilidAppCall::from_json(value)?),
        VeilidUpdateKind::Attachment => {
            VeilidUpdate::Attachment(VeilidStateAttachment::from_json(value)?)
        }
        VeilidUpdateKind::Network => {
            VeilidUpdate::Network(Box::new(VeilidStateNetwork::from_json(value)?))
        }
        VeilidUpdateKind::Config => {
            VeilidUpdate::Config(Box::new(VeilidStateConfig::from_json(value)?))
        }
        VeilidUpdateKind::RouteChange => {
            VeilidUpdate::RouteChange(VeilidRouteChange::from_json(value)?)
        }
        VeilidUpdateKind::ValueChange => {
            VeilidUpdate::ValueChange(Box::new(VeilidValueChange::from_json(value)?))
        }
        VeilidUpdateKind::Shutdown => VeilidUpdate::Shutdown,
    };
    Ok(update)
}

impl FromJson for VeilidUpdate {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        decode_update(value)
    }
}

impl ToJson for VeilidUpdate {
    fn to_json(&self) -> JsonValue {
        let mut object = JsonMap::new();
        object.insert("kind".to_owned(), JsonValue::from(self.kind().as_str()));
        if let JsonValue::Object(fields) = self.payload_json() {
            object.extend(fields);
        }
        JsonValue::Object(object)
    }
}
