use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{runtime::ConfigErrors, Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use thiserror::Error;

const FALLBACK_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// A unique identifier for a particular coordinator operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct OperationId(pub usize);

impl Display for OperationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OperationId {
    /// Atomically get the next ID. This wraps around back to zero if you somehow exceed a usize.
    pub fn next() -> OperationId {
        static OPERATION_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);
        OperationId(OPERATION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to load logging config file: {0}")]
    File(String),
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
}

/// Set up global logging.
///
/// Uses the log4rs YAML file at `path` when it exists, and otherwise logs
/// at `Info` to stderr so that standard output stays free for the program's
/// own output.
pub fn init(path: &Path) -> Result<(), LoggingError> {
    if path.exists() {
        log4rs::init_file(path, Default::default()).map_err(|e| LoggingError::File(e.to_string()))?;
        info!("Initialised logging from {}", path.display());
    } else {
        log4rs::init_config(console_config(LevelFilter::Info)?)?;
        info!(
            "Initialised console logging ({} not found)",
            path.display()
        );
    }
    Ok(())
}

fn console_config(level: LevelFilter) -> Result<Config, ConfigErrors> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
}
