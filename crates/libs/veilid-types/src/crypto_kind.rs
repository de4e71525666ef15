use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::encoded::string_from_json;
use crate::json::{FromJson, ToJson};
use crate::VeilidError;

/// Width of every crypto kind tag.
pub const CRYPTO_KIND_LEN: usize = 4;

/// Algorithm suite identifier, serialized as a fixed 4-character tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CryptoKind {
    None,
    Vld0,
}

pub const VALID_CRYPTO_KINDS: [CryptoKind; 2] = [CryptoKind::Vld0, CryptoKind::None];

impl CryptoKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Vld0 => "VLD0",
        }
    }
}

impl fmt::Display for CryptoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CryptoKind {
    type Err = VeilidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VALID_CRYPTO_KINDS
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| VeilidError::UnknownCryptoKind { value: s.to_owned() })
    }
}

impl TryFrom<String> for CryptoKind {
    type Error = VeilidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CryptoKind> for String {
    fn from(kind: CryptoKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl FromJson for CryptoKind {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        Self::from_json_field(value, "kind")
    }

    fn from_json_field(value: &JsonValue, field: &'static str) -> Result<Self, VeilidError> {
        string_from_json(value, field)?.parse()
    }
}

impl ToJson for CryptoKind {
    fn to_json(&self) -> JsonValue {
        JsonValue::String(self.as_str().to_owned())
    }
}
