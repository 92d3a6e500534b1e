//! # multicalc
//!
//! A standard, scientific, programmer and date calculator for the terminal.
//!

use clap::Parser;
use multicalc::mach::{FileStore, Input, MemoryStore, Mode, Runtime, Store};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Multi-mode calculator with persistent history.
#[derive(Parser, Debug)]
#[command(name = "multicalc", version, about)]
struct Args {
    /// JSON file holding the theme and the history.
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Keep the theme and the history in memory only.
    #[arg(long, conflicts_with = "store")]
    no_save: bool,

    /// Initial mode: standard, scientific, programmer or date.
    #[arg(long, default_value = "standard")]
    mode: Mode,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut runtime = Runtime::new(open_store(&args));
    runtime.enter(Input::SetMode(args.mode));
    multicalc::term::main(runtime);
}

fn open_store(args: &Args) -> Box<dyn Store> {
    if args.no_save {
        return Box::new(MemoryStore::default());
    }
    let path = match args.store.clone().or_else(FileStore::default_path) {
        Some(path) => path,
        None => {
            warn!("no data directory, history will not be saved");
            return Box::new(MemoryStore::default());
        }
    };
    match FileStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(error) => {
            warn!(path = %path.display(), %error, "history will not be saved");
            Box::new(MemoryStore::default())
        }
    }
}
