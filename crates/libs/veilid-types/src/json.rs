//! Field access over already-parsed JSON objects, plus the `FromJson` /
//! `ToJson` capability implemented by every wire type.

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::encoding::decode_no_pad;
use crate::VeilidError;

/// Decoding from a generic JSON value.
pub trait FromJson: Sized {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError>;

    /// Decodes a value read from `field` of an enclosing object. Scalar and
    /// string types name `field` in their shape errors; object types report
    /// their own inner fields.
    fn from_json_field(value: &JsonValue, _field: &'static str) -> Result<Self, VeilidError> {
        Self::from_json(value)
    }
}

/// Encoding into a generic JSON value. Byte payloads are emitted in the
/// unpadded codec form.
pub trait ToJson {
    fn to_json(&self) -> JsonValue;
}

pub fn to_json_string<T: ToJson + ?Sized>(value: &T) -> String {
    value.to_json().to_string()
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> JsonValue {
        self.as_ref().map_or(JsonValue::Null, ToJson::to_json)
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> JsonValue {
        self.as_slice().to_json()
    }
}

pub fn as_object<'a>(
    value: &'a JsonValue,
    context: &'static str,
) -> Result<&'a JsonMap<String, JsonValue>, VeilidError> {
    value.as_object().ok_or(VeilidError::ExpectedObject { context })
}

/// Returns the field, treating JSON `null` as absent.
pub fn optional<'a>(value: &'a JsonValue, field: &'static str) -> Option<&'a JsonValue> {
    value.get(field).filter(|inner| !inner.is_null())
}

pub fn required<'a>(
    value: &'a JsonValue,
    field: &'static str,
) -> Result<&'a JsonValue, VeilidError> {
    optional(value, field).ok_or(VeilidError::MissingField { field })
}

pub fn required_str<'a>(value: &'a JsonValue, field: &'static str) -> Result<&'a str, VeilidError> {
    required(value, field)?
        .as_str()
        .ok_or(VeilidError::InvalidField { field, expected: "a string" })
}

pub fn optional_str<'a>(
    value: &'a JsonValue,
    field: &'static str,
) -> Result<Option<&'a str>, VeilidError> {
    optional(value, field)
        .map(|inner| inner.as_str().ok_or(VeilidError::InvalidField { field, expected: "a string" }))
        .transpose()
}

pub fn required_bool(value: &JsonValue, field: &'static str) -> Result<bool, VeilidError> {
    required(value, field)?
        .as_bool()
        .ok_or(VeilidError::InvalidField { field, expected: "a boolean" })
}

/// Reads an unsigned integer sent either as a JSON number or as a decimal
/// string (the node stringifies 64-bit values).
pub fn required_u64(value: &JsonValue, field: &'static str) -> Result<u64, VeilidError> {
    unsigned_from_json(required(value, field)?, field)
}

pub fn required_u32(value: &JsonValue, field: &'static str) -> Result<u32, VeilidError> {
    let raw = required_u64(value, field)?;
    u32::try_from(raw).map_err(|_| VeilidError::InvalidField { field, expected: "a 32-bit integer" })
}

pub fn required_u16(value: &JsonValue, field: &'static str) -> Result<u16, VeilidError> {
    let raw = required_u64(value, field)?;
    u16::try_from(raw).map_err(|_| VeilidError::InvalidField { field, expected: "a 16-bit integer" })
}

pub(crate) fn unsigned_from_json(value: &JsonValue, field: &'static str) -> Result<u64, VeilidError> {
    let invalid = VeilidError::InvalidField { field, expected: "an unsigned integer" };
    match value {
        JsonValue::Number(number) => number.as_u64().ok_or(invalid),
        JsonValue::String(text) => text.parse().map_err(|_| invalid),
        _ => Err(invalid),
    }
}

pub fn required_array<'a>(
    value: &'a JsonValue,
    field: &'static str,
) -> Result<&'a [JsonValue], VeilidError> {
    required(value, field)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or(VeilidError::InvalidField { field, expected: "an array" })
}

pub fn required_object<'a>(
    value: &'a JsonValue,
    field: &'static str,
) -> Result<&'a JsonMap<String, JsonValue>, VeilidError> {
    required(value, field)?
        .as_object()
        .ok_or(VeilidError::InvalidField { field, expected: "an object" })
}

/// Reads a codec-encoded byte field.
pub fn required_bytes(value: &JsonValue, field: &'static str) -> Result<Vec<u8>, VeilidError> {
    decode_no_pad(required_str(value, field)?)
}

pub fn required_field<T: FromJson>(value: &JsonValue, field: &'static str) -> Result<T, VeilidError> {
    T::from_json_field(required(value, field)?, field)
}

pub fn optional_field<T: FromJson>(
    value: &JsonValue,
    field: &'static str,
) -> Result<Option<T>, VeilidError> {
    optional(value, field).map(|inner| T::from_json_field(inner, field)).transpose()
}

/// Decodes every element of an array field into an owned `Vec`; the first
/// failing element fails the whole field.
pub fn required_list<T: FromJson>(
    value: &JsonValue,
    field: &'static str,
) -> Result<Vec<T>, VeilidError> {
    required_array(value, field)?.iter().map(|item| T::from_json_field(item, field)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_absent_fields_are_both_missing() {
        let value = json!({ "sender": null });
        assert_eq!(optional_str(&value, "sender").expect("null is none"), None);
        assert_eq!(optional_str(&value, "other").expect("absent is none"), None);
        assert_eq!(
            required_str(&value, "sender").expect_err("null required field"),
            VeilidError::MissingField { field: "sender" }
        );
    }

    #[test]
    fn wrong_shapes_are_reported_with_the_field_name() {
        let value = json!({ "message": 7, "started": "yes", "peers": {} });
        assert_eq!(
            required_str(&value, "message").expect_err("number is not a string"),
            VeilidError::InvalidField { field: "message", expected: "a string" }
        );
        assert!(matches!(
            required_bool(&value, "started"),
            Err(VeilidError::InvalidField { field: "started", .. })
        ));
        assert!(matches!(
            required_array(&value, "peers"),
            Err(VeilidError::InvalidField { field: "peers", .. })
        ));
    }

    #[test]
    fn unsigned_fields_accept_numbers_and_decimal_strings() {
        let value = json!({ "a": 12, "b": "18446744073709551615", "c": -1, "d": "0x10" });
        assert_eq!(required_u64(&value, "a").expect("number"), 12);
        assert_eq!(required_u64(&value, "b").expect("string"), u64::MAX);
        assert!(required_u64(&value, "c").is_err());
        assert!(required_u64(&value, "d").is_err());
        assert!(matches!(
            required_u32(&value, "b"),
            Err(VeilidError::InvalidField { field: "b", expected: "a 32-bit integer" })
        ));
    }

    #[test]
    fn byte_fields_go_through_the_codec() {
        let value = json!({ "message": "aGVsbG8", "broken": "aGVsbG8=" });
        assert_eq!(required_bytes(&value, "message").expect("valid"), b"hello");
        assert!(matches!(
            required_bytes(&value, "broken"),
            Err(VeilidError::MalformedEncoding { .. })
        ));
    }

    #[test]
    fn leaf_errors_name_the_enclosing_field() {
        let value = json!({ "sender": 5, "bps_down": -1, "node_ids": ["VLD0:a", 7] });
        assert_eq!(
            required_field::<crate::TypedKey>(&value, "sender").expect_err("number sender"),
            VeilidError::InvalidField { field: "sender", expected: "a string" }
        );
        assert!(matches!(
            optional_field::<crate::ByteCount>(&value, "bps_down"),
            Err(VeilidError::InvalidField { field: "bps_down", .. })
        ));
        assert!(matches!(
            required_list::<crate::TypedKey>(&value, "node_ids"),
            Err(VeilidError::InvalidField { field: "node_ids", .. })
        ));
    }

    #[test]
    fn as_object_rejects_scalars() {
        assert_eq!(
            as_object(&json!("Shutdown"), "update").expect_err("string is not an object"),
            VeilidError::ExpectedObject { context: "update" }
        );
    }
}
