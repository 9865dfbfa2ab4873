// 📝 Logging - tracing subscriber setup
// The terminal UI owns stdout/stderr, so interactive runs log to a file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` when verbose
pub fn default_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "creditsea=debug,info" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the global subscriber. Failures are reported and ignored.
pub fn init(verbose: bool, target: LogTarget) {
    let filter = default_filter(verbose);

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("⚠️  Cannot open log file {}: {}", path.display(), e);
                    return;
                }
            };
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("⚠️  Logging not initialized: {}", e);
    }
}
