//! Attachment, network and config state, pushed as updates and returned in
//! full by `get_state`.

use core::fmt;
use core::str::FromStr;

use serde_json::{json, Map as JsonMap, Value as JsonValue};
use veilid_types::json::{
    as_object, optional_field, required_bool, required_field, required_list, required_object,
    required_str, required_u32,
};
use veilid_types::{
    ByteCount, FromJson, Timestamp, TimestampDuration, ToJson, TypedKey, VeilidError,
};

/// Attachment abstraction for network 'signal strength'.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttachmentState {
    Detached,
    Attaching,
    AttachedWeak,
    AttachedGood,
    AttachedStrong,
    FullyAttached,
    OverAttached,
    Detaching,
}

impl AttachmentState {
    const ALL: [Self; 8] = [
        Self::Detached,
        Self::Attaching,
        Self::AttachedWeak,
        Self::AttachedGood,
        Self::AttachedStrong,
        Self::FullyAttached,
        Self::OverAttached,
        Self::Detaching,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Detached => "Detached",
            Self::Attaching => "Attaching",
            Self::AttachedWeak => "AttachedWeak",
            Self::AttachedGood => "AttachedGood",
            Self::AttachedStrong => "AttachedStrong",
            Self::FullyAttached => "FullyAttached",
            Self::OverAttached => "OverAttached",
            Self::Detaching => "Detaching",
        }
    }

    pub fn is_attached(self) -> bool {
        matches!(
            self,
            Self::AttachedWeak
                | Self::AttachedGood
                | Self::AttachedStrong
                | Self::FullyAttached
                | Self::OverAttached
        )
    }
}

impl fmt::Display for AttachmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentState {
    type Err = VeilidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| VeilidError::UnknownVariant { field: "state", value: s.to_owned() })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VeilidStateAttachment {
    pub state: AttachmentState,
    pub public_internet_ready: bool,
    pub local_network_ready: bool,
}

impl FromJson for VeilidStateAttachment {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "attachment state")?;
        Ok(Self {
            state: required_str(value, "state")?.parse()?,
            public_internet_ready: required_bool(value, "public_internet_ready")?,
            local_network_ready: required_bool(value, "local_network_ready")?,
        })
    }
}

impl ToJson for VeilidStateAttachment {
    fn to_json(&self) -> JsonValue {
        json!({
            "state": self.state.as_str(),
            "public_internet_ready": self.public_internet_ready,
            "local_network_ready": self.local_network_ready,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RPCStats {
    pub messages_sent: u32,
    pub messages_rcvd: u32,
    pub questions_in_flight: u32,
    pub last_question_ts: Option<Timestamp>,
    pub last_seen_ts: Option<Timestamp>,
    pub first_consecutive_seen_ts: Option<Timestamp>,
    pub recent_lost_answers: u32,
    pub failed_to_send: u32,
}

impl FromJson for RPCStats {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "rpc stats")?;
        Ok(Self {
            messages_sent: required_u32(value, "messages_sent")?,
            messages_rcvd: required_u32(value, "messages_rcvd")?,
            questions_in_flight: required_u32(value, "questions_in_flight")?,
            last_question_ts: optional_field(value, "last_question_ts")?,
            last_seen_ts: optional_field(value, "last_seen_ts")?,
            first_consecutive_seen_ts: optional_field(value, "first_consecutive_seen_ts")?,
            recent_lost_answers: required_u32(value, "recent_lost_answers")?,
            failed_to_send: required_u32(value, "failed_to_send")?,
        })
    }
}

impl ToJson for RPCStats {
    fn to_json(&self) -> JsonValue {
        json!({
            "messages_sent": self.messages_sent,
            "messages_rcvd": self.messages_rcvd,
            "questions_in_flight": self.questions_in_flight,
            "last_question_ts": self.last_question_ts.to_json(),
            "last_seen_ts": self.last_seen_ts.to_json(),
            "first_consecutive_seen_ts": self.first_consecutive_seen_ts.to_json(),
            "recent_lost_answers": self.recent_lost_answers,
            "failed_to_send": self.failed_to_send,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LatencyStats {
    pub fastest: TimestampDuration,
    pub average: TimestampDuration,
    pub slowest: TimestampDuration,
}

impl FromJson for LatencyStats {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "latency stats")?;
        Ok(Self {
            fastest: required_field(value, "fastest")?,
            average: required_field(value, "average")?,
            slowest: required_field(value, "slowest")?,
        })
    }
}

impl ToJson for LatencyStats {
    fn to_json(&self) -> JsonValue {
        json!({
            "fastest": self.fastest.to_json(),
            "average": self.average.to_json(),
            "slowest": self.slowest.to_json(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferStats {
    pub total: ByteCount,
    pub maximum: ByteCount,
    pub average: ByteCount,
    pub minimum: ByteCount,
}

impl FromJson for TransferStats {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "transfer stats")?;
        Ok(Self {
            total: required_field(value, "total")?,
            maximum: required_field(value, "maximum")?,
            average: required_field(value, "average")?,
            minimum: required_field(value, "minimum")?,
        })
    }
}

impl ToJson for TransferStats {
    fn to_json(&self) -> JsonValue {
        json!({
            "total": self.total.to_json(),
            "maximum": self.maximum.to_json(),
            "average": self.average.to_json(),
            "minimum": self.minimum.to_json(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferStatsDownUp {
    pub down: TransferStats,
    pub up: TransferStats,
}

impl FromJson for TransferStatsDownUp {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "transfer")?;
        Ok(Self {
            down: required_field(value, "down")?,
            up: required_field(value, "up")?,
        })
    }
}

impl ToJson for TransferStatsDownUp {
    fn to_json(&self) -> JsonValue {
        json!({ "down": self.down.to_json(), "up": self.up.to_json() })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeerStats {
    pub time_added: Timestamp,
    pub rpc_stats: RPCStats,
    pub latency: Option<LatencyStats>,
    pub transfer: TransferStatsDownUp,
}

impl FromJson for PeerStats {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "peer stats")?;
        Ok(Self {
            time_added: required_field(value, "time_added")?,
            rpc_stats: required_field(value, "rpc_stats")?,
            latency: optional_field(value, "latency")?,
            transfer: required_field(value, "transfer")?,
        })
    }
}

impl ToJson for PeerStats {
    fn to_json(&self) -> JsonValue {
        json!({
            "time_added": self.time_added.to_json(),
            "rpc_stats": self.rpc_stats.to_json(),
            "latency": self.latency.to_json(),
            "transfer": self.transfer.to_json(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerTableData {
    pub node_ids: Vec<TypedKey>,
    pub peer_address: String,
    pub peer_stats: PeerStats,
}

impl FromJson for PeerTableData {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "peer")?;
        Ok(Self {
            node_ids: required_list(value, "node_ids")?,
            peer_address: required_str(value, "peer_address")?.to_owned(),
            peer_stats: required_field(value, "peer_stats")?,
        })
    }
}

impl ToJson for PeerTableData {
    fn to_json(&self) -> JsonValue {
        json!({
            "node_ids": self.node_ids.to_json(),
            "peer_address": self.peer_address,
            "peer_stats": self.peer_stats.to_json(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VeilidStateNetwork {
    pub started: bool,
    pub bps_down: ByteCount,
    pub bps_up: ByteCount,
    pub peers: Vec<PeerTableData>,
}

impl FromJson for VeilidStateNetwork {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "network state")?;
        Ok(Self {
            started: required_bool(value, "started")?,
            bps_down: required_field(value, "bps_down")?,
            bps_up: required_field(value, "bps_up")?,
            peers: required_list(value, "peers")?,
        })
    }
}

impl ToJson for VeilidStateNetwork {
    fn to_json(&self) -> JsonValue {
        json!({
            "started": self.started,
            "bps_down": self.bps_down.to_json(),
            "bps_up": self.bps_up.to_json(),
            "peers": self.peers.to_json(),
        })
    }
}

/// The node's configuration, carried as an opaque object; this client never
/// interprets it.
#[derive(Clone, Debug, PartialEq)]
pub struct VeilidStateConfig {
    pub config: JsonMap<String, JsonValue>,
}

impl FromJson for VeilidStateConfig {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "config state")?;
        Ok(Self { config: required_object(value, "config")?.clone() })
    }
}

impl ToJson for VeilidStateConfig {
    fn to_json(&self) -> JsonValue {
        json!({ "config": self.config })
    }
}

/// Full snapshot returned by `get_state`.
#[derive(Clone, Debug, PartialEq)]
pub struct VeilidState {
    pub attachment: VeilidStateAttachment,
    pub network: VeilidStateNetwork,
    pub config: VeilidStateConfig,
}

impl FromJson for VeilidState {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "state")?;
        Ok(Self {
            attachment: required_field(value, "attachment")?,
            network: required_field(value, "network")?,
            config: required_field(value, "config")?,
        })
    }
}

impl ToJson for VeilidState {
    fn to_json(&self) -> JsonValue {
        json!({
            "attachment": self.attachment.to_json(),
            "network": self.network.to_json(),
            "config": self.config.to_json(),
        })
    }
}
