use std::fmt;

use serde_json::{json, Value as JsonValue};
use veilid_types::json::{as_object, required_u32};
use veilid_types::{FromJson, ToJson, VeilidError};

/// Version triple reported by the node's `VeilidVersion` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VeilidVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for VeilidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromJson for VeilidVersion {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "version")?;
        Ok(Self {
            major: required_u32(value, "major")?,
            minor: required_u32(value, "minor")?,
            patch: required_u32(value, "patch")?,
        })
    }
}

impl ToJson for VeilidVersion {
    fn to_json(&self) -> JsonValue {
        json!({ "major": self.major, "minor": self.minor, "patch": self.patch })
    }
}
