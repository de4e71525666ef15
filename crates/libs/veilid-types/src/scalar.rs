use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::json::{unsigned_from_json, FromJson, ToJson};
use crate::VeilidError;

macro_rules! scalar {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromJson for $name {
            fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
                Self::from_json_field(value, stringify!($name))
            }

            fn from_json_field(value: &JsonValue, field: &'static str) -> Result<Self, VeilidError> {
                let raw = unsigned_from_json(value, field)?;
                <$inner>::try_from(raw).map(Self).map_err(|_| VeilidError::InvalidField {
                    field,
                    expected: concat!("a value that fits ", stringify!($inner)),
                })
            }
        }
    };
}

scalar!(
    /// Microseconds since the unix epoch.
    Timestamp(u64)
);
scalar!(
    /// Microseconds.
    TimestampDuration(u64)
);
scalar!(ByteCount(u64));
scalar!(
    /// Identifier the node attaches to an app call; echoed back in the reply.
    OperationId(u64)
);
scalar!(ValueSubkey(u32));
scalar!(ValueSeqNum(u32));

macro_rules! numeric_to_json {
    ($($name:ident),*) => {
        $(impl ToJson for $name {
            fn to_json(&self) -> JsonValue {
                JsonValue::from(self.0)
            }
        })*
    };
}

numeric_to_json!(Timestamp, TimestampDuration, ByteCount, ValueSubkey, ValueSeqNum);

// Operation ids exceed the 53-bit range JSON consumers can hold exactly.
impl ToJson for OperationId {
    fn to_json(&self) -> JsonValue {
        JsonValue::String(self.0.to_string())
    }
}
