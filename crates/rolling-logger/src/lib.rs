//! Rolling file logger
//!
//! Installs a global `tracing` subscriber that writes to `<app>.log` in the
//! given directory, rotating to `<app>.1.log`, `<app>.2.log`, ... once the file
//! grows past a size limit. The most recent lines are also kept in a circular
//! buffer so they can be shown without reading the file back.
//!
//! `log` records are bridged into the same subscriber.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("could not install subscriber: {0}")]
    Subscriber(#[from] TryInitError),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Rotation and buffering limits
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Rotate once the current file would exceed this size
    pub max_file_bytes: u64,
    /// Rotated files kept next to the current one
    pub max_files: usize,
    /// Lines kept in memory
    pub buffer_lines: usize,
    /// Filter directive; `None` reads `RUST_LOG`, falling back to `info`
    pub level: Option<String>,
    /// Mirror output to stderr
    pub console: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 3,
            buffer_lines: 200,
            level: None,
            console: false,
        }
    }
}

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

/// Initialize the global logger with default limits
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: LoggerConfig,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let writer = RollingWriter::open(log_dir.as_ref(), app_name, &config)?;

    let filter = match &config.level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_timer(LocalTimer)
        .with_writer(writer.clone());

    let console_layer = config.console.then(|| {
        fmt::layer()
            .with_target(true)
            .with_timer(LocalTimer)
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(file_layer.and_then(console_layer).with_filter(filter))
        .try_init()?;

    LOGGER.set(writer).map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(())
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!(target: "app", "{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!(target: "app", "{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!(target: "app", "{}", msg);
    Ok(())
}

/// Most recent log lines, oldest first. Empty before initialization.
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingWriter::recent_lines).unwrap_or_default()
}

/// Path of the file currently written to
pub fn current_log_path() -> Option<PathBuf> {
    LOGGER.get().map(RollingWriter::path)
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

/// Local wall-clock timestamps
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Size-rotated log file
struct RollingFile {
    dir: PathBuf,
    app_name: String,
    file: File,
    written: u64,
    max_bytes: u64,
    max_files: usize,
}

impl RollingFile {
    fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            file,
            written,
            max_bytes,
            max_files,
        })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.app_name, index))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_files == 0 {
            fs::remove_file(self.path())?;
        } else {
            let oldest = self.rotated_path(self.max_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..self.max_files).rev() {
                let from = self.rotated_path(index);
                if from.exists() {
                    fs::rename(&from, self.rotated_path(index + 1))?;
                }
            }
            fs::rename(self.path(), self.rotated_path(1))?;
        }

        self.file = OpenOptions::new().create(true).append(true).open(self.path())?;
        self.written = 0;
        Ok(())
    }
}

struct Shared {
    file: Mutex<RollingFile>,
    recent: Mutex<VecDeque<String>>,
    capacity: usize,
}

/// `MakeWriter` handed to the fmt layer; every clone writes to the same file
#[derive(Clone)]
struct RollingWriter {
    shared: Arc<Shared>,
}

impl RollingWriter {
    fn open(dir: &Path, app_name: &str, config: &LoggerConfig) -> io::Result<Self> {
        let file = RollingFile::open(dir, app_name, config.max_file_bytes, config.max_files)?;
        Ok(Self {
            shared: Arc::new(Shared {
                file: Mutex::new(file),
                recent: Mutex::new(VecDeque::with_capacity(config.buffer_lines)),
                capacity: config.buffer_lines,
            }),
        })
    }

    fn path(&self) -> PathBuf {
        match self.shared.file.lock() {
            Ok(file) => file.path(),
            Err(poisoned) => poisoned.into_inner().path(),
        }
    }

    fn recent_lines(&self) -> Vec<String> {
        match self.shared.recent.lock() {
            Ok(recent) => recent.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn remember(&self, buf: &[u8]) {
        if self.shared.capacity == 0 {
            return;
        }
        let Ok(mut recent) = self.shared.recent.lock() else {
            return;
        };
        for line in String::from_utf8_lossy(buf).lines().filter(|l| !l.is_empty()) {
            if recent.len() == self.shared.capacity {
                recent.pop_front();
            }
            recent.push_back(line.to_string());
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        {
            let mut file = self
                .shared
                .file
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
            file.write_all(buf)?;
        }
        self.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.shared.file.lock() {
            Ok(mut file) => file.file.flush(),
            Err(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
