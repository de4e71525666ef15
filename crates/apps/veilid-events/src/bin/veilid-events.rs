use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use veilid_events::{EventsConfig, EventsError, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "veilid-events")]
struct Args {
    /// NDJSON capture to read; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    json: bool,
    #[arg(long, default_value_t = false)]
    keep_going: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("veilid-events error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), EventsError> {
    let mut config = match &args.config {
        Some(path) => EventsConfig::from_path(path)?,
        None => EventsConfig::default(),
    };
    if args.json {
        config.format = OutputFormat::Json;
    }
    if args.keep_going {
        config.keep_going = true;
    }

    let filter = config.log_filter.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.input {
        Some(path) => veilid_events::run(BufReader::new(File::open(path)?), &mut out, &config)?,
        None => veilid_events::run(io::stdin().lock(), &mut out, &config)?,
    };
    log::info!("events: {summary}");
    if !summary.shutdown {
        log::debug!("events: input ended before node shutdown");
    }
    Ok(())
}
