use serde_json::{json, Value as JsonValue};
use veilid_types::json::{as_object, required_field, required_list, required_u32};
use veilid_types::{FromJson, ToJson, TypedKey, ValueData, ValueSubkey, VeilidError};

/// Notification that watched subkeys of a DHT record changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VeilidValueChange {
    pub key: TypedKey,
    pub subkeys: Vec<ValueSubkey>,
    /// Remaining notifications before the watch expires.
    pub count: u32,
    pub value: ValueData,
}

impl FromJson for VeilidValueChange {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "value change")?;
        Ok(Self {
            key: required_field(value, "key")?,
            subkeys: required_list(value, "subkeys")?,
            count: required_u32(value, "count")?,
            value: required_field(value, "value")?,
        })
    }
}

impl ToJson for VeilidValueChange {
    fn to_json(&self) -> JsonValue {
        json!({
            "key": self.key.to_json(),
            "subkeys": self.subkeys.to_json(),
            "count": self.count,
            "value": self.value.to_json(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veilid_types::{PublicKey, ValueSeqNum};

    #[test]
    fn decodes_subkeys_and_nested_value() {
        let change = VeilidValueChange::from_json(&json!({
            "key": "VLD0:rec",
            "subkeys": [0, 2, "5"],
            "count": 9,
            "value": { "seq": 3, "data": "AAE", "writer": "w1" },
        }))
        .expect("value change");
        assert_eq!(change.subkeys, vec![ValueSubkey(0), ValueSubkey(2), ValueSubkey(5)]);
        assert_eq!(change.count, 9);
        assert_eq!(
            change.value,
            ValueData { seq: ValueSeqNum(3), data: vec![0, 1], writer: PublicKey::new("w1") }
        );
    }

    #[test]
    fn negative_subkey_is_rejected() {
        let err = VeilidValueChange::from_json(&json!({
            "key": "VLD0:rec",
            "subkeys": [-1],
            "count": 1,
            "value": { "seq": 0, "data": "", "writer": "w1" },
        }))
        .expect_err("subkeys are unsigned");
        assert!(matches!(err, VeilidError::InvalidField { field: "subkeys", .. }));
    }
}
