use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::encoded::{string_from_json, PublicKey, SecretKey};
use crate::json::{FromJson, ToJson};
use crate::VeilidError;

pub const KEY_PAIR_DELIMITER: char = ':';

/// `public ":" secret` in one string.
///
/// Only the public half is guaranteed delimiter-free, so splitting always
/// happens at the first `:`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPair(String);

impl KeyPair {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn from_parts(key: &PublicKey, secret: &SecretKey) -> Self {
        Self(format!("{key}{KEY_PAIR_DELIMITER}{secret}"))
    }

    pub fn key(&self) -> Result<PublicKey, VeilidError> {
        self.split().map(|(key, _)| PublicKey::new(key))
    }

    pub fn secret(&self) -> Result<SecretKey, VeilidError> {
        self.split().map(|(_, secret)| SecretKey::new(secret))
    }

    pub fn to_parts(&self) -> Result<(PublicKey, SecretKey), VeilidError> {
        self.split().map(|(key, secret)| (PublicKey::new(key), SecretKey::new(secret)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split(&self) -> Result<(&str, &str), VeilidError> {
        self.0
            .split_once(KEY_PAIR_DELIMITER)
            .ok_or_else(|| VeilidError::MalformedKeyPair { value: self.0.clone() })
    }
}

impl AsRef<str> for KeyPair {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromJson for KeyPair {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        Self::from_json_field(value, "KeyPair")
    }

    fn from_json_field(value: &JsonValue, field: &'static str) -> Result<Self, VeilidError> {
        string_from_json(value, field).map(Self)
    }
}

impl ToJson for KeyPair {
    fn to_json(&self) -> JsonValue {
        JsonValue::String(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoded::EncodedString;

    #[test]
    fn from_parts_joins_with_the_delimiter() {
        let pair = KeyPair::from_parts(&PublicKey::new("k1"), &SecretKey::new("s1"));
        assert_eq!(pair.as_str(), "k1:s1");
        assert_eq!(
            pair.to_parts().expect("well formed"),
            (PublicKey::new("k1"), SecretKey::new("s1"))
        );
    }

    #[test]
    fn splits_on_the_first_delimiter() {
        let pair = KeyPair::from_parts(&PublicKey::new("k1"), &SecretKey::new("s1:extra"));
        assert_eq!(pair.as_str(), "k1:s1:extra");
        assert_eq!(pair.key().expect("key"), PublicKey::new("k1"));
        assert_eq!(pair.secret().expect("secret"), SecretKey::new("s1:extra"));
    }

    #[test]
    fn codec_produced_halves_round_trip() {
        let key = PublicKey::from_bytes(&[0xfb; 32]);
        let secret = SecretKey::from_bytes(&[0xff; 32]);
        let pair = KeyPair::from_parts(&key, &secret);
        assert_eq!(pair.to_parts().expect("codec output has no delimiter"), (key, secret));
    }

    #[test]
    fn missing_delimiter_is_malformed() {
        let pair = KeyPair::new("k1s1");
        let expected = VeilidError::MalformedKeyPair { value: "k1s1".to_owned() };
        assert_eq!(pair.key().expect_err("no delimiter"), expected);
        assert_eq!(pair.secret().expect_err("no delimiter"), expected);
        assert_eq!(pair.to_parts().expect_err("no delimiter"), expected);
    }
}
