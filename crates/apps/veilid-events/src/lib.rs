//! Reads a Veilid node's newline-delimited JSON control stream and prints
//! the decoded updates and responses.

pub mod config;
pub mod error;
pub mod stream;

pub use config::{EventsConfig, OutputFormat};
pub use error::EventsError;
pub use stream::{describe, run, Summary, NODE_LOG_TARGET};
