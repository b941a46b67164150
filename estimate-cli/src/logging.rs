//! Tracing setup for the `CostEstimator` binary.
//!
//! One subscriber is installed at startup from a [`LogConfig`] built out of
//! the command-line flags. Records go through a single level filter and then
//! to stderr (unless `--quiet`) and to an append-only file (with
//! `--log-file`). Quotes are printed on stdout, so console records never mix
//! with them.

use std::{
    fmt::Display,
    fs::File,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info";

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Where log records go and how many of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// An `EnvFilter` directive such as `debug` or `estimate_core=trace`.
    /// `None` falls back to `RUST_LOG`, then to `info`.
    pub filter: Option<String>,
    /// File that records are appended to. Its directory must exist.
    pub file: Option<PathBuf>,
    /// Whether records are written to stderr.
    pub console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: None,
            file: None,
            console: true,
        }
    }
}

/// Installs the global subscriber. Call once, before the first event.
///
/// # Errors
///
/// Fails on an invalid filter directive, on a log file that cannot be opened
/// and when a subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = build_filter(config.filter.as_deref())?;

    let console = config.console.then(|| {
        fmt::layer()
            .event_format(EventLine)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
    });

    let file = match &config.file {
        Some(path) => Some(
            fmt::layer()
                .event_format(EventLine)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("logging is already initialized")
}

fn build_filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

// --- Formatter ---

/// `<local time> <LEVEL> <target>: <fields>`, colored when the writer allows it.
struct EventLine;

impl<S, N> FormatEvent<S, N> for EventLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        styled(&mut writer, ansi, DIM, timestamp)?;
        styled(
            &mut writer,
            ansi,
            level_color(meta.level()),
            format_args!("{:>5}", meta.level()),
        )?;
        styled(&mut writer, ansi, CYAN, format_args!("{}:", meta.target()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Writes `text` and a trailing space, wrapped in `code` when `ansi` is set.
fn styled(
    writer: &mut Writer<'_>,
    ansi: bool,
    code: &str,
    text: impl Display,
) -> std::fmt::Result {
    if ansi {
        write!(writer, "{code}{text}{RESET} ")
    } else {
        write!(writer, "{text} ")
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(
        ansi: bool,
        emit: impl FnOnce(),
    ) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(ansi)
            .event_format(EventLine)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, emit);
        buf.contents()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    #[test]
    fn default_config_logs_to_console_only() {
        let config = LogConfig::default();

        assert_eq!(config.filter, None);
        assert_eq!(config.file, None);
        assert!(config.console);
    }

    #[test]
    fn explicit_filter_directives_are_accepted() {
        assert!(build_filter(Some("debug")).is_ok());
        assert!(build_filter(Some("warn,estimate_core=trace")).is_ok());
    }

    #[test]
    fn invalid_filter_directive_is_an_error() {
        let err = build_filter(Some("estimate_core=loudest")).unwrap_err();

        assert!(err.to_string().contains("estimate_core=loudest"));
    }

    #[test]
    fn log_file_in_missing_directory_is_an_error() {
        let path = Path::new("/this/path/does/not/exist/estimator.log");

        let err = open_log_file(path).unwrap_err();

        assert!(err.to_string().contains("estimator.log"));
    }

    #[test]
    fn log_file_is_appended_to() {
        let path = std::env::temp_dir().join(format!("estimator-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        std::fs::remove_file(&path).unwrap();
    }

    // =========================================================================
    // Event line format
    // =========================================================================

    #[test]
    fn plain_line_has_level_target_and_fields() {
        let text = capture(false, || tracing::warn!(field = "area", "rejected form number"));

        assert!(text.contains(" WARN estimate_cli::logging::tests: "), "{text}");
        assert!(text.contains("rejected form number"));
        assert!(text.contains("field="));
        assert!(text.ends_with('\n'));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn colored_line_wraps_level_in_its_color() {
        let text = capture(true, || tracing::error!("boom"));

        assert!(text.contains("\x1b[1;31mERROR\x1b[0m "), "{text}");
    }

    #[test]
    fn each_level_has_its_own_color() {
        let colors: Vec<&str> = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE]
            .iter()
            .map(level_color)
            .collect();

        for (idx, color) in colors.iter().enumerate() {
            assert!(!colors[idx + 1..].contains(color), "{color:?} repeats");
        }
    }
}
