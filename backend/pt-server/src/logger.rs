use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::{Arguments, Display};
use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, Record, info};

/// Dependencies that log every statement or request at info and above
const QUIET_TARGETS: &[&str] = &["sqlx", "hyper", "reqwest"];

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Sink {
    /// Appended to a file, never colored
    File(PathBuf),
    Stdout { colored: bool },
}

impl Sink {
    pub(crate) fn select(log_file: Option<PathBuf>, colored: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None => Self::Stdout { colored },
        }
    }
}

impl Display for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "file={}", path.display()),
            Self::Stdout { colored: true } => write!(f, "stdout (colored)"),
            Self::Stdout { colored: false } => write!(f, "stdout"),
        }
    }
}

/// `[<rfc3339> - <LEVEL>] <message> [<file>:<line>]`
pub(crate) fn render(level: impl Display, message: &Arguments, record: &Record) -> String {
    format!(
        "[{} - {}] {} [{}:{}]",
        humantime::format_rfc3339(SystemTime::now()),
        level,
        message,
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
    )
}

/// Install the global `log` sink and bridge `tracing` events into it
#[track_caller]
pub fn initialize(
    log_level: pt_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = *log_level;
    let sink = Sink::select(log_file, colored);

    let dispatch = QUIET_TARGETS
        .iter()
        .fold(Dispatch::new().level(level_filter), |dispatch, target| {
            dispatch.level_for(*target, LevelFilter::Warn)
        });

    let dispatch = match &sink {
        Sink::File(path) => {
            let file = fern::log_file(path)
                .map_err(|e| ServerError::io(path.display().to_string(), e))?;

            dispatch
                .format(|out, message, record| {
                    out.finish(format_args!("{}", render(record.level(), message, record)))
                })
                .chain(file)
        }
        Sink::Stdout { colored: true } => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            dispatch
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "{}",
                        render(colors.color(record.level()), message, record)
                    ))
                })
                .chain(std::io::stdout())
        }
        Sink::Stdout { colored: false } => dispatch
            .format(|out, message, record| {
                out.finish(format_args!("{}", render(record.level(), message, record)))
            })
            .chain(std::io::stdout()),
    };

    dispatch
        .apply()
        .map_err(|e| ServerError::logger(format!("Failed to initialize logger: {e}")))?;

    info!("Logger initialized: level={:?}, {}", level_filter, sink);

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}
