use chrono::{DateTime, FixedOffset};

/// All displayed times are in JST (UTC+9)
const DISPLAY_OFFSET_SECONDS: i32 = 9 * 3600;

/// Converts an epoch timestamp to a JST date time
///
/// # Arguments
///
/// * 'timestamp' - seconds since epoch, UTC
pub fn to_display_time(timestamp: i64) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECONDS)?;

    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset))
}

/// Describes when something happens relative to a reference time.
/// Same JST calendar day gives "today at HH:MM", anything else "MM/DD HH:MM".
///
/// # Arguments
///
/// * 'timestamp' - the time to describe
/// * 'reference' - the time that defines "today"
pub fn describe_time(timestamp: i64, reference: i64) -> Option<String> {
    let time = to_display_time(timestamp)?;
    let today = to_display_time(reference)?.date_naive();

    if time.date_naive() == today {
        Some(format!("today at {}", time.format("%H:%M")))
    } else {
        Some(format!("{}", time.format("%m/%d %H:%M")))
    }
}

/// Clock time (HH:MM, JST) for the given timestamp
pub fn clock_time(timestamp: i64) -> Option<String> {
    to_display_time(timestamp).map(|t| format!("{}", t.format("%H:%M")))
}
