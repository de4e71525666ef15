use core::fmt;
use core::str::FromStr;

use serde_json::{json, Value as JsonValue};
use veilid_types::json::{as_object, optional_str, required_str};
use veilid_types::{FromJson, ToJson, VeilidError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VeilidLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl VeilidLogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }
}

impl fmt::Display for VeilidLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VeilidLogLevel {
    type Err = VeilidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Error" => Ok(Self::Error),
            "Warn" => Ok(Self::Warn),
            "Info" => Ok(Self::Info),
            "Debug" => Ok(Self::Debug),
            "Trace" => Ok(Self::Trace),
            other => {
                Err(VeilidError::UnknownVariant { field: "log_level", value: other.to_owned() })
            }
        }
    }
}

impl From<VeilidLogLevel> for ::log::Level {
    fn from(level: VeilidLogLevel) -> Self {
        match level {
            VeilidLogLevel::Error => ::log::Level::Error,
            VeilidLogLevel::Warn => ::log::Level::Warn,
            VeilidLogLevel::Info => ::log::Level::Info,
            VeilidLogLevel::Debug => ::log::Level::Debug,
            VeilidLogLevel::Trace => ::log::Level::Trace,
        }
    }
}

/// A log line emitted by the node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VeilidLog {
    pub log_level: VeilidLogLevel,
    pub message: String,
    pub backtrace: Option<String>,
}

impl FromJson for VeilidLog {
    fn from_json(value: &JsonValue) -> Result<Self, VeilidError> {
        as_object(value, "log")?;
        Ok(Self {
            log_level: required_str(value, "log_level")?.parse()?,
            message: required_str(value, "message")?.to_owned(),
            backtrace: optional_str(value, "backtrace")?.map(str::to_owned),
        })
    }
}

impl ToJson for VeilidLog {
    fn to_json(&self) -> JsonValue {
        json!({
            "log_level": self.log_level.as_str(),
            "message": self.message,
            "backtrace": self.backtrace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_level_from_log_level_field() {
        let log = VeilidLog::from_json(&json!({
            "log_level": "Warn",
            "message": "bucket kick",
            "backtrace": null,
        }))
        .expect("log");
        assert_eq!(log.log_level, VeilidLogLevel::Warn);
        assert_eq!(log.backtrace, None);
        assert_eq!(::log::Level::from(log.log_level), ::log::Level::Warn);
    }

    #[test]
    fn attachment_field_is_not_a_level() {
        let err = VeilidLog::from_json(&json!({ "attachment": "Info", "message": "m" }))
            .expect_err("level lives in log_level");
        assert_eq!(err, VeilidError::MissingField { field: "log_level" });
    }

    #[test]
    fn level_names_are_case_sensitive() {
        assert!(matches!(
            "warn".parse::<VeilidLogLevel>(),
            Err(VeilidError::UnknownVariant { field: "log_level", .. })
        ));
    }
}
