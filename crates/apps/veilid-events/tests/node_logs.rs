use std::io::Cursor;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use veilid_events::{run, EventsConfig, NODE_LOG_TARGET};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.target() == NODE_LOG_TARGET
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger { records: Mutex::new(Vec::new()) };

const CAPTURE: &str = concat!(
    r#"{"type":"Update","kind":"Log","log_level":"Warn","message":"low on peers","backtrace":null}"#,
    "\n",
    r#"{"type":"Update","kind":"Log","log_level":"Error","message":"rpc failed","backtrace":"at rpc.rs:10"}"#,
    "\n",
    r#"{"type":"Update","kind":"Log","log_level":"Trace","message":"tick","backtrace":null}"#,
    "\n",
    r#"{"type":"Update","kind":"Shutdown"}"#,
    "\n",
);

fn take_records() -> Vec<(Level, String)> {
    LOGGER.records.lock().map(|mut records| std::mem::take(&mut *records)).unwrap_or_default()
}

// One test per binary: the logger is process-global.
#[test]
fn node_logs_are_forwarded_at_their_level() {
    log::set_logger(&LOGGER).expect("install capture logger");
    log::set_max_level(LevelFilter::Trace);

    let mut out: Vec<u8> = Vec::new();
    run(Cursor::new(CAPTURE), &mut out, &EventsConfig::default()).expect("forwarding run");
    assert_eq!(
        take_records(),
        vec![
            (Level::Warn, "low on peers".to_owned()),
            (Level::Error, "rpc failed".to_owned()),
            (Level::Error, "backtrace: at rpc.rs:10".to_owned()),
            (Level::Trace, "tick".to_owned()),
        ]
    );

    let quiet = EventsConfig { forward_node_logs: false, ..EventsConfig::default() };
    out.clear();
    run(Cursor::new(CAPTURE), &mut out, &quiet).expect("quiet run");
    assert!(take_records().is_empty());
}
