use serde_json::{json, Value as JsonValue};
use veilid_types::json::{as_object, required_bytes, required_field, required_list};
use veilid_types::{encode_no_pad, FromJson, RouteId, ToJson, VeilidError};

/// Routes the node has given up on since the last notification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VeilidRouteChange {
    pub dead_routes: Vec<RouteId>,
    pub dead_remote_routes: Vec<RouteId>,
}

impl VeilidRouteChange {
    pub fn is_empty(&self) -> bool {
        self.dead_routes.is_empty() && self.dead_remote_routes.is_empty()
    }
}

impl FromJson for VeilidRouteChange {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "route change")?;
        Ok(Self {
            dead_routes: required_list(value, "dead_routes")?,
            dead_remote_routes: required_list(value, "dead_remote_routes")?,
        })
    }
}

impl ToJson for VeilidRouteChange {
    fn to_json(&self) -> JsonValue {
        json!({
            "dead_routes": self.dead_routes.to_json(),
            "dead_remote_routes": self.dead_remote_routes.to_json(),
        })
    }
}

/// Result of allocating a private route: its id and the blob to hand to
/// the remote side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPrivateRouteResult {
    pub route_id: RouteId,
    pub blob: Vec<u8>,
}

impl NewPrivateRouteResult {
    pub fn into_parts(self) -> (RouteId, Vec<u8>) {
        (self.route_id, self.blob)
    }
}

impl FromJson for NewPrivateRouteResult {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "new private route")?;
        Ok(Self {
            route_id: required_field(value, "route_id")?,
            blob: required_bytes(value, "blob")?,
        })
    }
}

impl ToJson for NewPrivateRouteResult {
    fn to_json(&self) -> JsonValue {
        json!({ "route_id": self.route_id.to_json(), "blob": encode_no_pad(&self.blob) })
    }
}
