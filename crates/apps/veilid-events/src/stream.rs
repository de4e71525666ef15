use std::fmt;
use std::io::{BufRead, Write};

use serde_json::Value as JsonValue;
use veilid_types::{to_json_string, TypedKey};
use veilid_updates::{decode_message, ApiResponse, NodeMessage, VeilidUpdate, VeilidUpdateKind};

use crate::config::{EventsConfig, OutputFormat};
use crate::error::EventsError;

/// Log target used for forwarded node log lines.
pub const NODE_LOG_TARGET: &str = "veilid_node";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub updates: usize,
    pub responses: usize,
    pub filtered: usize,
    pub failed: usize,
    pub shutdown: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} updates, {} responses, {} filtered, {} failed",
            self.lines, self.updates, self.responses, self.filtered, self.failed
        )
    }
}

/// Reads newline-delimited control-channel messages from `reader` and
/// writes one line per printed event to `writer`.
///
/// Stops after a `Shutdown` update or at end of input. A line that fails to
/// parse or decode aborts the run unless `keep_going` is set.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &EventsConfig,
) -> Result<Summary, EventsError> {
    let kinds = config.kind_filter()?;
    let mut summary = Summary::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let number = index + 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        summary.lines += 1;

        let message = match decode_line(&line, number) {
            Ok(message) => message,
            Err(err) if config.keep_going && err.is_line_error() => {
                log::warn!("events: skipping {err}");
                summary.failed += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        match message {
            NodeMessage::Response(response) => {
                summary.responses += 1;
                match config.format {
                    OutputFormat::Text => writeln!(writer, "{}", describe_response(&response))?,
                    OutputFormat::Json => writeln!(writer, "{}", to_json_string(&response))?,
                }
            }
            NodeMessage::Update(update) => {
                summary.updates += 1;
                if config.forward_node_logs {
                    forward_node_log(&update);
                }
                let kind = update.kind();
                if kinds.is_empty() || kinds.contains(&kind) {
                    match config.format {
                        OutputFormat::Text => writeln!(writer, "{}", describe(&update))?,
                        OutputFormat::Json => writeln!(writer, "{}", to_json_string(&update))?,
                    }
                } else {
                    summary.filtered += 1;
                }
                if kind == VeilidUpdateKind::Shutdown {
                    log::debug!("events: node shut down at line {number}");
                    summary.shutdown = true;
                    break;
                }
            }
        }
    }

    writer.flush()?;
    Ok(summary)
}

fn decode_line(line: &[u8], number: usize) -> Result<NodeMessage, EventsError> {
    let text = std::str::from_utf8(line)
        .map_err(|source| EventsError::Utf8 { line: number, source })?;
    let value: JsonValue = serde_json::from_str(text)
        .map_err(|source| EventsError::Json { line: number, source })?;
    decode_message(&value).map_err(|source| EventsError::Decode { line: number, source })
}

fn forward_node_log(update: &VeilidUpdate) {
    if let VeilidUpdate::Log(node_log) = update {
        let level = log::Level::from(node_log.log_level);
        log::log!(target: NODE_LOG_TARGET, level, "{}", node_log.message);
        if let Some(backtrace) = &node_log.backtrace {
            log::log!(target: NODE_LOG_TARGET, level, "backtrace: {backtrace}");
        }
    }
}

/// One-line summary of an update.
pub fn describe(update: &VeilidUpdate) -> String {
    match update {
        VeilidUpdate::Log(node_log) => format!("log {}: {}", node_log.log_level, node_log.message),
        VeilidUpdate::AppMessage(message) => format!(
            "app_message from {}: {} bytes",
            describe_sender(message.sender.as_ref()),
            message.message.len()
        ),
        VeilidUpdate::AppCall(call) => format!(
            "app_call {} from {}: {} bytes",
            call.operation_id,
            describe_sender(call.sender.as_ref()),
            call.message.len()
        ),
        VeilidUpdate::Attachment(attachment) => format!(
            "attachment {} public_internet_ready={} local_network_ready={}",
            attachment.state, attachment.public_internet_ready, attachment.local_network_ready
        ),
        VeilidUpdate::Network(network) => format!(
            "network started={} bps_down={} bps_up={} peers={}",
            network.started,
            network.bps_down,
            network.bps_up,
            network.peers.len()
        ),
        VeilidUpdate::Config(config) => format!("config {} keys", config.config.len()),
        VeilidUpdate::RouteChange(change) => format!(
            "route_change dead_routes={} dead_remote_routes={}",
            change.dead_routes.len(),
            change.dead_remote_routes.len()
        ),
        VeilidUpdate::ValueChange(change) => {
            let subkeys: Vec<String> = change.subkeys.iter().map(ToString::to_string).collect();
            format!(
                "value_change {} subkeys=[{}] count={} seq={}",
                change.key,
                subkeys.join(","),
                change.count,
                change.value.seq
            )
        }
        VeilidUpdate::Shutdown => "shutdown".to_owned(),
    }
}

fn describe_sender(sender: Option<&TypedKey>) -> String {
    sender.map_or_else(|| "private route".to_owned(), ToString::to_string)
}

fn describe_response(response: &ApiResponse) -> String {
    let op = response.op.as_deref().unwrap_or("?");
    match response.result() {
        Ok(value) if value.is_null() => format!("response {} {op}: ok", response.id),
        Ok(value) => format!("response {} {op}: {value}", response.id),
        Err(err) => format!("response {} {op}: {err}", response.id),
    }
}
