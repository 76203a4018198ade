//! Diagnostic logging
//!
//! Every `log` record goes to env_logger (stderr, or `LOG_FILE` when set) and
//! is also kept as a timestamped line in a [`DebugLog`] ring buffer that the
//! terminal UI shows as its debug panel. Logging never affects control flow.

use {
    crate::{config::GalleryConfig, error::GalleryError},
    std::{
        collections::VecDeque,
        fs::OpenOptions,
        sync::{Arc, Mutex},
    },
};

pub const DEBUG_LOG_CAPACITY: usize = 500;

/// Bounded in-memory copy of recent log lines
#[derive(Debug)]
pub struct DebugLog {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl DebugLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, line: String) {
        // A poisoned buffer only means a panic mid-push; keep logging.
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// The newest `n` lines, oldest first
    pub fn tail(&self, n: usize) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().skip(lines.len().saturating_sub(n)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new(DEBUG_LOG_CAPACITY)
    }
}

/// Forwards to env_logger and mirrors into the debug panel buffer
pub struct TeeLogger {
    inner: env_logger::Logger,
    panel: Arc<DebugLog>,
}

impl TeeLogger {
    pub fn new(inner: env_logger::Logger, panel: Arc<DebugLog>) -> Self {
        Self { inner, panel }
    }

    pub fn filter(&self) -> log::LevelFilter {
        self.inner.filter()
    }
}

impl log::Log for TeeLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.inner.matches(record) {
            return;
        }
        self.inner.log(record);
        self.panel.push(format!(
            "{}: {}",
            chrono::Local::now().format("%H:%M:%S"),
            record.args()
        ));
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Build the env_logger half the way the binaries configure it
pub fn build_env_logger(config: &GalleryConfig) -> Result<env_logger::Logger, GalleryError> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    // HTTP stack chatter stays at warn unless asked for explicitly
    let log_level = config.rust_log.clone().unwrap_or_default();
    for noisy in ["hyper", "hyper_util", "reqwest", "rustls"] {
        if !log_level.contains(noisy) {
            builder.filter_module(noisy, log::LevelFilter::Warn);
        }
    }

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    Ok(builder.build())
}

/// Install the tee logger globally and hand back the panel buffer
pub fn init(config: &GalleryConfig) -> Result<Arc<DebugLog>, GalleryError> {
    let panel = Arc::new(DebugLog::default());
    let logger = TeeLogger::new(build_env_logger(config)?, panel.clone());
    let max_level = logger.filter();

    log::set_boxed_logger(Box::new(logger)).map_err(|_| GalleryError::LoggerInstalled)?;
    log::set_max_level(max_level);
    Ok(panel)
}
