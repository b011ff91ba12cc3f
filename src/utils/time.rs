use crate::error::{Result, UtilError};
use crate::utils::constants::{TIME_FORMAT, TIME_FORMAT_FILENAME, TIME_FORMAT_VERBOSE};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a `YYYY-MM-DD HH:MM:SS` string as UTC and return epoch seconds
///
/// # Examples
/// ```
/// use seismo_util::utils::to_epoch;
///
/// assert_eq!(to_epoch("1970-01-02 00:00:00").unwrap(), 86400);
/// ```
pub fn to_epoch(s: &str) -> Result<i64> {
    let naive = NaiveDateTime::parse_from_str(s, TIME_FORMAT)?;
    Ok(naive.and_utc().timestamp())
}

/// Format epoch seconds as `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn from_epoch(t: f64) -> Result<String> {
    format_epoch(t, TIME_FORMAT)
}

/// Format epoch seconds as `Www, DD Mon YYYY HH:MM:SS` (UTC)
pub fn from_epoch_verbose(t: f64) -> Result<String> {
    format_epoch(t, TIME_FORMAT_VERBOSE)
}

/// Format epoch seconds as `YYYY-MM-DD_HH-MM-SS`, safe for use in file names
pub fn from_epoch_filename(t: f64) -> Result<String> {
    format_epoch(t, TIME_FORMAT_FILENAME)
}

pub fn plural_suffix(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn format_epoch(t: f64, format: &str) -> Result<String> {
    // Fractional seconds are dropped towards negative infinity, like gmtime
    let secs = t.floor();
    if !secs.is_finite() || secs < i64::MIN as f64 || secs > i64::MAX as f64 {
        return Err(UtilError::TimestampOutOfRange(t));
    }

    let datetime: DateTime<Utc> =
        DateTime::from_timestamp(secs as i64, 0).ok_or(UtilError::TimestampOutOfRange(t))?;
    Ok(datetime.format(format).to_string())
}
