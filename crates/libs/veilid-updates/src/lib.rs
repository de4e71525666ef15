//! Decoder for messages a Veilid node sends over its JSON control channel.
//!
//! The channel carries newline-delimited JSON objects tagged by `type`:
//!
//! - **Responses** ([`ApiResponse`]) answer a numbered request and carry
//!   either a `value` or a [`VeilidApiError`]
//! - **Updates** ([`VeilidUpdate`]) are asynchronous events discriminated by
//!   their `kind` field, see [`decode_update`]
//!
//! Identifier, key and DHT types come from [`veilid_types`].

pub mod api_error;
pub mod app;
pub mod message;
pub mod node_log;
pub mod route;
pub mod state;
pub mod update;
pub mod value_change;
pub mod version;

pub use api_error::VeilidApiError;
pub use app::{VeilidAppCall, VeilidAppMessage};
pub use message::{
    decode_message, ApiResponse, NodeMessage, ResponseError, MESSAGE_TYPE_RESPONSE,
    MESSAGE_TYPE_UPDATE,
};
pub use node_log::{VeilidLog, VeilidLogLevel};
pub use route::{NewPrivateRouteResult, VeilidRouteChange};
pub use state::{
    AttachmentState, LatencyStats, PeerStats, PeerTableData, RPCStats, TransferStats,
    TransferStatsDownUp, VeilidState, VeilidStateAttachment, VeilidStateConfig,
    VeilidStateNetwork,
};
pub use update::{decode_update, VeilidUpdate, VeilidUpdateKind};
pub use value_change::VeilidValueChange;
pub use version::VeilidVersion;
