//! Opaque identifiers carried as codec-encoded strings.
//!
//! All of these share one representation but are distinct types with no
//! conversion between them.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::encoding::{decode_no_pad, encode_no_pad};
use crate::json::{FromJson, ToJson};
use crate::VeilidError;

/// A string holding the codec encoding of some bytes.
pub trait EncodedString: Sized {
    /// Wraps an already-encoded string without checking it.
    fn from_encoded(encoded: String) -> Self;

    fn as_encoded(&self) -> &str;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_encoded(encode_no_pad(bytes))
    }

    fn to_bytes(&self) -> Result<Vec<u8>, VeilidError> {
        decode_no_pad(self.as_encoded())
    }
}

pub(crate) fn string_from_json(
    value: &JsonValue,
    context: &'static str,
) -> Result<String, VeilidError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(VeilidError::InvalidField { field: context, expected: "a string" })
}

macro_rules! encoded_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(encoded: impl Into<String>) -> Self {
                Self(encoded.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl EncodedString for $name {
            fn from_encoded(encoded: String) -> Self {
                Self(encoded)
            }

            fn as_encoded(&self) -> &str {
                &self.0
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

encoded_string!(
    /// Public half of a key pair; also the type of node ids and record owners.
    PublicKey
);
encoded_string!(SecretKey);
encoded_string!(SharedSecret);
encoded_string!(
    /// Output of the suite's hash function.
    HashDigest
);
encoded_string!(
    /// XOR distance between two keys.
    CryptoKeyDistance
);
encoded_string!(Signature);
encoded_string!(Nonce);
encoded_string!(
    /// Identifier of a private or remote route.
    RouteId
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_bytes_and_to_bytes_are_inverse() {
        let nonce = Nonce::from_bytes(&[7_u8; 24]);
        assert!(!nonce.as_str().contains('='));
        assert_eq!(nonce.to_bytes().expect("valid nonce"), vec![7_u8; 24]);
    }

    #[test]
    fn construction_does_not_validate() {
        let key = SecretKey::new("s1:extra");
        assert_eq!(key.as_str(), "s1:extra");
        assert!(matches!(key.to_bytes(), Err(VeilidError::MalformedEncoding { .. })));
    }

    #[test]
    fn serde_uses_the_bare_string() {
        let key = PublicKey::new("abcd");
        assert_eq!(serde_json::to_value(&key).expect("serialize"), json!("abcd"));
        let back: PublicKey = serde_json::from_value(json!("abcd")).expect("deserialize");
        assert_eq!(back, key);
    }

    #[test]
    fn from_json_requires_a_string() {
        assert_eq!(RouteId::from_json(&json!("r1")).expect("string"), RouteId::new("r1"));
        assert!(matches!(
            RouteId::from_json(&json!(1)),
            Err(VeilidError::InvalidField { field: "RouteId", .. })
        ));
    }
}
