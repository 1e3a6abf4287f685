//! # Logger
//!
//! Installs the global `tracing` subscriber for the command-line tools.
//!
//! Console records go to stderr, so stdout stays free for command results. An optional
//! [`FileOutput`] adds a rolling, non-blocking file writer. `RUST_LOG` is honored on top of
//! the configured level unless an explicit [`LoggerBuilder::env_filter`] is given.
//!
//! ```rust
//! use databind_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("databind").level(LevelFilter::DEBUG).init().unwrap();
//! tracing::debug!("ready");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Rolling log files in one directory, named `<logger name>.<date>.log`.
#[derive(Debug, Clone)]
pub struct FileOutput {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
}

impl FileOutput {
    /// Daily rotation, keeping the ten newest files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, max_files: 10 }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }
}

/// Settings for the global subscriber. Nothing is installed until [`Self::init`].
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    console: bool,
    json: bool,
    env_filter: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Console output on stderr. On by default.
    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// JSON records on every output instead of compact text.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Directives such as `databind_kernel=trace`. Replaces `RUST_LOG`.
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.env_filter = Some(directives.into());
        self
    }

    #[must_use]
    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    /// Installs the subscriber.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, bad filter
    ///   directives or when neither console nor file output is enabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] when a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.filter()?;

        let mut layers: Vec<BoxedLayer<_>> = Vec::new();
        if self.console {
            layers.push(self.console_layer());
        }
        let guard = match &self.file {
            Some(output) => {
                let (file_layer, guard) = self.file_layer(output)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        let problem = if self.name.trim().is_empty() {
            "logger name cannot be empty"
        } else if self.file.as_ref().is_some_and(|f| f.max_files == 0) {
            "max_files must be greater than zero"
        } else if !self.console && self.file.is_none() {
            "no output enabled; turn on the console or add a file output"
        } else {
            return Ok(());
        };
        Err(LoggerError::InvalidConfiguration { message: problem.into(), context: None })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("invalid env filter '{directives}': {e}").into(),
                context: None,
            }),
        }
    }

    fn console_layer<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let console = layer().with_writer(std::io::stderr);
        if self.json { console.json().boxed() } else { console.compact().boxed() }
    }

    fn file_layer<S>(&self, output: &FileOutput) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fs::create_dir_all(&output.dir).context(format!("creating {}", output.dir.display()))?;
        let appender = RollingFileAppender::builder()
            .rotation(output.rotation.clone())
            .filename_prefix(&self.name)
            .filename_suffix("log")
            .max_log_files(output.max_files)
            .build(&output.dir)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let file = layer().with_writer(writer).with_ansi(false);
        let boxed = if self.json { file.json().boxed() } else { file.boxed() };
        Ok((boxed, guard))
    }
}

/// Keeps the file writer alive. Hold it until the program exits.
#[must_use = "dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder; `name` prefixes rolling log files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::WARN,
            console: true,
            json: false,
            env_filter: None,
            file: None,
        }
    }

    /// Whether records are also written to files.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("flushing log files");
        }
    }
}

/// Parses a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`), case-insensitively.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("invalid log level '{level}': {e}").into(),
        context: None,
    })
}
