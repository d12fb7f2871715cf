//! NVSR main entry point
//!
//! Runs as a child of the editor. Editor events arrive as JSON lines on
//! stdin, editor commands leave as JSON lines on stdout, and speech goes to
//! the configured synthesizer. Logging never touches stdout.

use log::{error, info};
use nvsr::editor::StdioHost;
use nvsr::speech::SpeechDispatcher;
use nvsr::state::config::Config;
use nvsr::state::Session;
use nvsr::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

/// Diagnostic log file name, created in the temp directory
const LOG_FILE: &str = "nvsr.log";

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");
    let config_path = args
        .iter()
        .position(|arg| arg == "--config" || arg == "-c")
        .and_then(|idx| args.get(idx + 1))
        .map(PathBuf::from);

    let config = match config_path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    init_logging(debug_mode || config.logging_enabled());

    if let Err(e) = run(config) {
        error!("Fatal error: {}", e);
        process::exit(1);
    }
}

/// Initialize the logger
///
/// With logging enabled, everything from Debug up is appended to
/// `<tempdir>/nvsr.log`; otherwise only errors reach stderr.
fn init_logging(enabled: bool) {
    if !enabled {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .target(env_logger::Target::Stderr)
            .init();
        return;
    }

    let path = std::env::temp_dir().join(LOG_FILE);
    use std::fs::OpenOptions;
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(log_file) => {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "{} - {} - {} - {}",
                        buf.timestamp(),
                        nvsr::APP_NAME,
                        record.level(),
                        record.args()
                    )
                })
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .init();
            info!("NVSR version {} starting (logging to {:?})", nvsr::VERSION, path);
        }
        Err(e) => {
            eprintln!("Warning: Failed to open {:?} for logging: {}", path, e);
            eprintln!("Continuing without file logging...");
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Warn)
                .target(env_logger::Target::Stderr)
                .init();
        }
    }
}

fn run(config: Config) -> Result<()> {
    match config.path() {
        Some(path) => info!("Configuration loaded from {:?}", path),
        None => info!("Using default configuration"),
    }

    let host = StdioHost::new(io::stdout());
    let mut session = Session::new(config, SpeechDispatcher::new(), host);

    info!("NVSR ready - reading editor events");

    // Main event loop: one event per line until the editor closes stdin
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        session.handle_line(&buf);
    }

    info!("Editor closed the event stream, exiting");
    Ok(())
}
