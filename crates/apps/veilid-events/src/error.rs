use thiserror::Error;
use veilid_types::VeilidError;

#[derive(Debug, Error)]
pub enum EventsError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("config: {0}")]
    KindFilter(#[source] VeilidError),
    #[error("line {line}: invalid utf-8: {source}")]
    Utf8 {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("line {line}: invalid json: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: VeilidError,
    },
}

impl EventsError {
    /// Errors tied to a single input line; `keep_going` skips past these.
    pub fn is_line_error(&self) -> bool {
        matches!(self, Self::Utf8 { .. } | Self::Json { .. } | Self::Decode { .. })
    }
}
