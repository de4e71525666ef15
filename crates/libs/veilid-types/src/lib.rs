//! Typed values of the Veilid JSON API.
//!
//! This crate holds the string encodings a client exchanges with a node:
//!
//! - **Text codec**: unpadded URL-safe base64 ([`encode_no_pad`], [`decode_no_pad`])
//! - **Opaque identifiers**: [`PublicKey`], [`SecretKey`], [`Signature`], [`RouteId`] …
//! - **Crypto kind tags**: [`CryptoKind`], a fixed 4-character prefix
//! - **Typed values**: `KIND:PAYLOAD` strings such as [`TypedKey`] and [`TypedKeyPair`]
//! - **DHT records**: [`DHTSchema`], [`DHTRecordDescriptor`], [`ValueData`]
//!
//! No cryptography happens here; keys and signatures are opaque bytes.

pub mod crypto_kind;
pub mod dht;
pub mod encoded;
pub mod encoding;
pub mod error;
pub mod json;
pub mod key_pair;
pub mod scalar;
pub mod typed;

pub use crypto_kind::{CryptoKind, CRYPTO_KIND_LEN, VALID_CRYPTO_KINDS};
pub use dht::{
    DHTRecordDescriptor, DHTSchema, DHTSchemaDFLT, DHTSchemaKind, DHTSchemaSMPL,
    DHTSchemaSMPLMember, ValueData,
};
pub use encoded::{
    CryptoKeyDistance, EncodedString, HashDigest, Nonce, PublicKey, RouteId, SecretKey,
    SharedSecret, Signature,
};
pub use encoding::{decode_no_pad, encode_no_pad};
pub use error::VeilidError;
pub use json::{to_json_string, FromJson, ToJson};
pub use key_pair::KeyPair;
pub use scalar::{
    ByteCount, OperationId, Timestamp, TimestampDuration, ValueSeqNum, ValueSubkey,
};
pub use typed::{TypedKey, TypedKeyPair, TypedPayload, TypedSecret, TypedSignature};
