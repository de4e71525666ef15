//! `KIND:PAYLOAD` values: a crypto kind tag glued to one encoded payload.
//!
//! The kind occupies exactly the first four characters and the fifth is
//! always `:`, so the split never depends on payload content.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::crypto_kind::{CryptoKind, CRYPTO_KIND_LEN};
use crate::encoded::{string_from_json, PublicKey, SecretKey, Signature};
use crate::json::{FromJson, ToJson};
use crate::key_pair::KeyPair;
use crate::VeilidError;

const TYPED_DELIMITER: char = ':';

/// Payload types that may follow a crypto kind prefix.
pub trait TypedPayload: Sized {
    fn from_payload(payload: String) -> Self;
    fn payload(&self) -> &str;
}

impl TypedPayload for PublicKey {
    fn from_payload(payload: String) -> Self {
        Self::new(payload)
    }

    fn payload(&self) -> &str {
        self.as_str()
    }
}

impl TypedPayload for SecretKey {
    fn from_payload(payload: String) -> Self {
        Self::new(payload)
    }

    fn payload(&self) -> &str {
        self.as_str()
    }
}

impl TypedPayload for Signature {
    fn from_payload(payload: String) -> Self {
        Self::new(payload)
    }

    fn payload(&self) -> &str {
        self.as_str()
    }
}

impl TypedPayload for KeyPair {
    fn from_payload(payload: String) -> Self {
        Self::new(payload)
    }

    fn payload(&self) -> &str {
        self.as_str()
    }
}

/// Splits `KIND:PAYLOAD` into the raw tag and payload slices.
fn split_typed(text: &str) -> Result<(&str, &str), VeilidError> {
    match text.char_indices().nth(CRYPTO_KIND_LEN) {
        Some((offset, TYPED_DELIMITER)) => {
            Ok((&text[..offset], &text[offset + TYPED_DELIMITER.len_utf8()..]))
        }
        _ => Err(VeilidError::MalformedTypedValue { value: text.to_owned() }),
    }
}

macro_rules! crypto_typed {
    ($(#[$meta:meta])* $name:ident, $payload:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn from_value(kind: CryptoKind, value: &$payload) -> Self {
                Self(format!("{}:{}", kind.as_str(), value.payload()))
            }

            /// Wraps a string read off the wire; `kind`/`value` do the checking.
            pub fn new(encoded: impl Into<String>) -> Self {
                Self(encoded.into())
            }

            pub fn kind(&self) -> Result<CryptoKind, VeilidError> {
                split_typed(&self.0)?.0.parse()
            }

            pub fn value(&self) -> Result<$payload, VeilidError> {
                let (_, payload) = split_typed(&self.0)?;
                Ok(<$payload>::from_payload(payload.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = VeilidError;

            /// Checked parse: the delimiter must be the fifth character and the
            /// tag must be a known kind.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let (kind, _) = split_typed(s)?;
                kind.parse::<CryptoKind>()?;
                Ok(Self(s.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromJson for $name {
            fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
                Self::from_json_field(value, stringify!($name))
            }

            fn from_json_field(value: &JsonValue, field: &'static str) -> Result<Self, VeilidError> {
                string_from_json(value, field).map(Self)
            }
        }

        impl ToJson for $name {
            fn to_json(&self) -> JsonValue {
                JsonValue::String(self.0.clone())
            }
        }
    };
}

crypto_typed!(
    /// Typed public key; node ids, message senders and DHT record keys.
    TypedKey,
    PublicKey
);
crypto_typed!(TypedSecret, SecretKey);
crypto_typed!(TypedSignature, Signature);
crypto_typed!(
    /// Typed key pair: `KIND:PUBLIC:SECRET`.
    TypedKeyPair,
    KeyPair
);
