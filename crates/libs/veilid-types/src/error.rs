use thiserror::Error;

/// Errors raised while decoding identifiers, typed values and node events.
///
/// Every variant is a protocol-level desync: callers decide whether to drop
/// the offending event or tear the connection down, nothing here retries.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum VeilidError {
    /// Codec input violates the alphabet or the padding arithmetic.
    #[error("malformed encoding: {reason}")]
    MalformedEncoding { reason: String },

    #[error("unknown crypto kind: {value:?}")]
    UnknownCryptoKind { value: String },

    /// Missing or misplaced `:` after the 4-character kind prefix.
    #[error("malformed typed value: {value:?}")]
    MalformedTypedValue { value: String },

    #[error("malformed key pair: no delimiter in {value:?}")]
    MalformedKeyPair { value: String },

    #[error("unknown update kind: {kind:?}")]
    UnknownUpdateKind { kind: String },

    #[error("unknown message type: {value:?}")]
    UnknownMessageType { value: String },

    #[error("expected json object for {context}")]
    ExpectedObject { context: &'static str },

    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("field '{field}' must be {expected}")]
    InvalidField { field: &'static str, expected: &'static str },

    #[error("field '{field}' has unknown value {value:?}")]
    UnknownVariant { field: &'static str, value: String },
}

impl VeilidError {
    pub fn malformed_encoding(reason: impl Into<String>) -> Self {
        Self::MalformedEncoding { reason: reason.into() }
    }

    /// Returns `true` for errors raised by the generic JSON access layer
    /// rather than by a nested encoding.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ExpectedObject { .. }
                | Self::MissingField { .. }
                | Self::InvalidField { .. }
                | Self::UnknownVariant { .. }
        )
    }
}
