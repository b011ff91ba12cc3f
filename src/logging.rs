use crate::error::{Result, UtilError};
use crate::utils::constants::{LOG_LEVEL_WIDTH, LOG_TARGET_WIDTH};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Map a level name to a filter.
///
/// `critical` has no tracing counterpart and shares the `ERROR` level.
pub fn parse_level(level_name: &str) -> Result<LevelFilter> {
    match level_name {
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warning" => Ok(LevelFilter::WARN),
        "error" | "critical" => Ok(LevelFilter::ERROR),
        other => Err(UtilError::InvalidArgument(format!(
            "unknown log level '{}', expected one of debug, info, warning, error, critical",
            other
        ))),
    }
}

/// Install the global subscriber writing
/// `<program>:<target> - <LEVEL> - <message>` lines to stderr.
///
/// Only the first successful call installs a subscriber; later calls keep
/// the existing one.
pub fn setup_logging(program_name: &str, level_name: &str) -> Result<()> {
    let level = parse_level(level_name)?;

    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .event_format(ProgramFormat::new(program_name))
        .try_init();

    if installed.is_err() {
        tracing::debug!("logging already configured, keeping existing subscriber");
    }

    Ok(())
}

/// Event formatter prefixing every line with the program name
#[derive(Debug, Clone)]
pub struct ProgramFormat {
    program: String,
}

impl ProgramFormat {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

impl<S, N> FormatEvent<S, N> for ProgramFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        write!(
            writer,
            "{}:{:<target_width$} - {:<level_width$} - ",
            self.program,
            metadata.target(),
            level_label(*metadata.level()),
            target_width = LOG_TARGET_WIDTH,
            level_width = LOG_LEVEL_WIDTH,
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
