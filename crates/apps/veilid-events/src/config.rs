use serde::Deserialize;
use std::fs;
use std::path::Path;
use veilid_updates::VeilidUpdateKind;

use crate::error::EventsError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per event.
    #[default]
    Text,
    /// The decoded event re-encoded as one JSON object per line.
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    /// Re-log node `Log` updates through the local logger.
    pub forward_node_logs: bool,
    pub keep_going: bool,
    /// Update kinds to print; empty prints every kind.
    pub kinds: Vec<String>,
    pub format: OutputFormat,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            forward_node_logs: true,
            keep_going: false,
            kinds: Vec::new(),
            format: OutputFormat::Text,
        }
    }
}

impl EventsConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EventsError> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_toml(&contents)?)
    }

    pub fn kind_filter(&self) -> Result<Vec<VeilidUpdateKind>, EventsError> {
        self.kinds
            .iter()
            .map(|kind| kind.parse().map_err(EventsError::KindFilter))
            .collect()
    }
}
