use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, TimeZone, Utc};

/// Placeholder rendered when a time value cannot be parsed.
pub const INVALID_DATE: &str = "invalid date";

/// Display pattern for note timestamps: day/month/2-digit-year, 24-hour clock.
const DISPLAY_FORMAT: &str = "%d/%m/%y, %H:%M";

/// A time value accepted by the display formatter.
#[derive(Debug, Clone)]
pub enum TimeInput {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// Textual timestamp (RFC 3339 or a few common date forms).
    Text(String),
    /// Already-parsed UTC timestamp.
    Timestamp(DateTime<Utc>),
}

impl From<i64> for TimeInput {
    fn from(millis: i64) -> Self {
        Self::Millis(millis)
    }
}

impl From<&str> for TimeInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for TimeInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

/// Current UTC time truncated to whole seconds. Used when stamping
/// note created/updated times.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Format a time value as `DD/MM/YY, HH:mm` in UTC, or return a
/// placeholder when the value cannot be parsed.
pub fn format_display(input: impl Into<TimeInput>) -> String {
    match parse(&input.into()) {
        Some(ts) => ts.format(DISPLAY_FORMAT).to_string(),
        None => INVALID_DATE.to_owned(),
    }
}

/// Format an optional timestamp, using '-' when missing.
pub fn format_display_opt(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| format_display(t)).unwrap_or_else(|| "-".to_owned())
}

fn parse(input: &TimeInput) -> Option<DateTime<Utc>> {
    match input {
        TimeInput::Timestamp(ts) => Some(*ts),
        TimeInput::Millis(millis) => match Utc.timestamp_millis_opt(*millis) {
            chrono::LocalResult::Single(ts) => Some(ts),
            _ => None,
        },
        TimeInput::Text(text) => parse_text(text.trim()),
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    /// `DD/MM/YY, HH:mm`: digits and literals in fixed positions.
    fn matches_display_pattern(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 15
            && bytes.iter().enumerate().all(|(i, b)| match i {
                2 | 5 => *b == b'/',
                8 => *b == b',',
                9 => *b == b' ',
                12 => *b == b':',
                _ => b.is_ascii_digit(),
            })
    }

    #[test]
    fn formats_epoch_millis() {
        assert_eq!(format_display(1_700_000_000_000_i64), "14/11/23, 22:13");
    }

    #[test]
    fn zero_pads_day_month_and_minute() {
        assert_eq!(format_display("2024-03-03T09:05:00Z"), "03/03/24, 09:05");
    }

    #[test]
    fn uses_24_hour_clock() {
        assert_eq!(format_display("2024-03-03T23:00:00Z"), "03/03/24, 23:00");
    }

    #[test]
    fn accepts_common_text_forms() {
        assert_eq!(format_display("2024-03-03 09:05:00"), "03/03/24, 09:05");
        assert_eq!(format_display("2024-03-03"), "03/03/24, 00:00");
        // Offsets are folded into UTC.
        assert_eq!(format_display("2024-03-03T09:05:00+02:00"), "03/03/24, 07:05");
    }

    #[test]
    fn valid_inputs_match_the_display_pattern() {
        for input in [0_i64, 1_700_000_000_000, 253_402_300_799_000] {
            assert!(
                matches_display_pattern(&format_display(input)),
                "unexpected shape for {input}"
            );
        }
    }

    #[test]
    fn is_deterministic_for_a_fixed_input() {
        assert_eq!(
            format_display(1_700_000_000_000_i64),
            format_display(1_700_000_000_000_i64)
        );
    }

    #[test]
    fn unparsable_input_yields_placeholder() {
        assert_eq!(format_display("not a date"), INVALID_DATE);
        assert_eq!(format_display(""), INVALID_DATE);
        assert_eq!(format_display(i64::MAX), INVALID_DATE);
    }

    #[test]
    fn missing_value_renders_dash() {
        assert_eq!(format_display_opt(None), "-");
        assert_eq!(format_display_opt(Some(now())), format_display(now()));
    }

    #[test]
    fn now_is_truncated_to_whole_seconds() {
        assert_eq!(now().nanosecond(), 0);
    }
}
