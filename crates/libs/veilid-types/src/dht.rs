//! DHT record descriptions returned by the node.

use core::fmt;
use core::str::FromStr;

use serde_json::{json, Value as JsonValue};

use crate::encoded::{PublicKey, SecretKey};
use crate::encoding::encode_no_pad;
use crate::json::{
    as_object, optional_field, required_bytes, required_field, required_list, required_str,
    required_u16, FromJson, ToJson,
};
use crate::scalar::ValueSeqNum;
use crate::typed::TypedKey;
use crate::VeilidError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DHTSchemaKind {
    Dflt,
    Smpl,
}

impl DHTSchemaKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dflt => "DFLT",
            Self::Smpl => "SMPL",
        }
    }
}

impl fmt::Display for DHTSchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DHTSchemaKind {
    type Err = VeilidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DFLT" => Ok(Self::Dflt),
            "SMPL" => Ok(Self::Smpl),
            other => Err(VeilidError::UnknownVariant { field: "kind", value: other.to_owned() }),
        }
    }
}

/// A writer allowed by a simple schema, with its subkey allotment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DHTSchemaSMPLMember {
    pub m_key: PublicKey,
    pub m_cnt: u16,
}

impl FromJson for DHTSchemaSMPLMember {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "schema member")?;
        Ok(Self {
            m_key: required_field(value, "m_key")?,
            m_cnt: required_u16(value, "m_cnt")?,
        })
    }
}

impl ToJson for DHTSchemaSMPLMember {
    fn to_json(&self) -> JsonValue {
        json!({ "m_key": self.m_key.to_json(), "m_cnt": self.m_cnt })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DHTSchemaDFLT {
    pub o_cnt: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DHTSchemaSMPL {
    pub o_cnt: u16,
    pub members: Vec<DHTSchemaSMPLMember>,
}

/// Subkey layout of a record: owner-only, or owner plus listed members.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DHTSchema {
    Dflt(DHTSchemaDFLT),
    Smpl(DHTSchemaSMPL),
}

impl DHTSchema {
    pub fn dflt(o_cnt: u16) -> Self {
        Self::Dflt(DHTSchemaDFLT { o_cnt })
    }

    pub fn smpl(o_cnt: u16, members: Vec<DHTSchemaSMPLMember>) -> Self {
        Self::Smpl(DHTSchemaSMPL { o_cnt, members })
    }

    pub fn kind(&self) -> DHTSchemaKind {
        match self {
            Self::Dflt(_) => DHTSchemaKind::Dflt,
            Self::Smpl(_) => DHTSchemaKind::Smpl,
        }
    }

    /// Number of subkeys reserved for the owner.
    pub fn o_cnt(&self) -> u16 {
        match self {
            Self::Dflt(schema) => schema.o_cnt,
            Self::Smpl(schema) => schema.o_cnt,
        }
    }

    pub fn members(&self) -> &[DHTSchemaSMPLMember] {
        match self {
            Self::Dflt(_) => &[],
            Self::Smpl(schema) => &schema.members,
        }
    }

    /// Total subkeys across owner and members.
    pub fn subkey_count(&self) -> usize {
        usize::from(self.o_cnt())
            + self.members().iter().map(|member| usize::from(member.m_cnt)).sum::<usize>()
    }
}

impl FromJson for DHTSchema {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "schema")?;
        let kind = required_str(value, "kind")?.parse::<DHTSchemaKind>()?;
        let o_cnt = required_u16(value, "o_cnt")?;
        match kind {
            DHTSchemaKind::Dflt => Ok(Self::dflt(o_cnt)),
            DHTSchemaKind::Smpl => Ok(Self::smpl(o_cnt, required_list(value, "members")?)),
        }
    }
}

impl ToJson for DHTSchema {
    fn to_json(&self) -> JsonValue {
        match self {
            Self::Dflt(schema) => {
                json!({ "kind": DHTSchemaKind::Dflt.as_str(), "o_cnt": schema.o_cnt })
            }
            Self::Smpl(schema) => json!({
                "kind": DHTSchemaKind::Smpl.as_str(),
                "o_cnt": schema.o_cnt,
                "members": schema.members.to_json(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DHTRecordDescriptor {
    pub key: TypedKey,
    pub owner: PublicKey,
    /// Present only when the record was just created by this client.
    pub owner_secret: Option<SecretKey>,
    pub schema: DHTSchema,
}

impl FromJson for DHTRecordDescriptor {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "record descriptor")?;
        Ok(Self {
            key: required_field(value, "key")?,
            owner: required_field(value, "owner")?,
            owner_secret: optional_field(value, "owner_secret")?,
            schema: required_field(value, "schema")?,
        })
    }
}

impl ToJson for DHTRecordDescriptor {
    fn to_json(&self) -> JsonValue {
        json!({
            "key": self.key.to_json(),
            "owner": self.owner.to_json(),
            "owner_secret": self.owner_secret.to_json(),
            "schema": self.schema.to_json(),
        })
    }
}

/// One subkey's contents at a given sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueData {
    pub seq: ValueSeqNum,
    pub data: Vec<u8>,
    pub writer: PublicKey,
}

impl FromJson for ValueData {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "value data")?;
        Ok(Self {
            seq: required_field(value, "seq")?,
            data: required_bytes(value, "data")?,
            writer: required_field(value, "writer")?,
        })
    }
}

impl ToJson for ValueData {
    fn to_json(&self) -> JsonValue {
        json!({
            "seq": self.seq.to_json(),
            "data": encode_no_pad(&self.data),
            "writer": self.writer.to_json(),
        })
    }
}
