//! Date/time values in the two feed dialects
//!
//! RSS dates follow a loose RFC 822 grammar (`[Wkday,] D Mon Y H:M[:S] ZONE`)
//! with legacy two-digit years and named North American zones. Atom dates
//! follow a truncated ISO 8601 / RFC 3339 grammar
//! (`YYYY[-MM[-DDTHH:MM[:SS[.fff]](Z|±HH:MM)]]`).
//!
//! Both keep the instant in UTC together with the offset it was written in,
//! so formatting a parsed value reproduces the same (instant, offset) pair.
//! Month, weekday and zone spellings are canonicalized and never depend on
//! the host locale.

use std::fmt;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    Timelike, Utc,
};

use crate::{FeedError, Result};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Named zones accepted in RFC 822 dates, as offsets in hours
const NAMED_ZONES: [(&str, i32); 10] = [
    ("UT", 0),
    ("GMT", 0),
    ("EDT", -4),
    ("EST", -5),
    ("CDT", -5),
    ("CST", -6),
    ("MDT", -6),
    ("MST", -7),
    ("PDT", -7),
    ("PST", -8),
];

/// The two textual date grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateDialect {
    /// RFC 822 derived, used by RSS (`Mon, 06 Nov 1995 08:49:37 GMT`)
    Rfc822,
    /// Truncated ISO 8601, used by Atom (`2003-12-13T18:30:02Z`)
    Iso8601,
}

/// An instant together with the UTC offset it was written in
///
/// Invariant: `instant == wall clock - offset`.
///
/// # Examples
///
/// ```
/// use feedkit::TemporalValue;
///
/// let value = TemporalValue::parse_rfc822("Mon, 06 Nov 1995 08:49:37 GMT").unwrap();
/// assert_eq!(value.to_rfc822(), "Mon, 06 Nov 1995 08:49:37 GMT");
///
/// let value = TemporalValue::parse_iso8601("2003-12-13T18:30:02+01:00").unwrap();
/// assert_eq!(value.instant().to_rfc3339(), "2003-12-13T17:30:02+00:00");
/// assert_eq!(value.to_iso8601(), "2003-12-13T18:30:02+01:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemporalValue {
    instant: DateTime<Utc>,
    offset: FixedOffset,
}

impl TemporalValue {
    /// Build from a wall-clock time and the offset it was written in
    pub fn new(local: NaiveDateTime, offset: FixedOffset) -> Result<Self> {
        let utc = local
            .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(|| FeedError::Format("date out of range".to_string()))?;
        Ok(Self {
            instant: utc.and_utc(),
            offset,
        })
    }

    /// Build from a UTC instant and the offset to present it in
    pub fn from_instant(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { instant, offset }
    }

    /// A UTC instant presented with a zero offset
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self::from_instant(instant, utc_offset())
    }

    /// The instant, in UTC
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Offset the value was written in
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Wall-clock time in the stored offset
    pub fn local(&self) -> NaiveDateTime {
        self.instant.with_timezone(&self.offset).naive_local()
    }

    /// Parse in the given dialect
    pub fn parse(input: &str, dialect: DateDialect) -> Result<Self> {
        match dialect {
            DateDialect::Rfc822 => Self::parse_rfc822(input),
            DateDialect::Iso8601 => Self::parse_iso8601(input),
        }
    }

    /// Format in the given dialect
    pub fn format(&self, dialect: DateDialect) -> String {
        match dialect {
            DateDialect::Rfc822 => self.to_rfc822(),
            DateDialect::Iso8601 => self.to_iso8601(),
        }
    }

    /// Whether formatting in `dialect` and parsing back yields this exact value
    ///
    /// False for instants the dialect cannot express, such as sub-second
    /// precision in RFC 822 or years outside 1000..=9999.
    pub fn is_representable(&self, dialect: DateDialect) -> bool {
        Self::parse(&self.format(dialect), dialect).is_ok_and(|parsed| parsed == *self)
    }

    /// Parse an RFC 822 style date as used by RSS
    ///
    /// Accepts an optional leading weekday, one- or two-digit days, two- or
    /// four-digit years, optional seconds, and either a named zone (`UT`,
    /// `GMT`, `EST`/`EDT`, `CST`/`CDT`, `MST`/`MDT`, `PST`/`PDT`) or a
    /// four-digit numeric offset with an optional sign.
    ///
    /// Years below 1000 are legacy short years: below 50 they map to
    /// 2000 + year, otherwise to 1999 + year. Both "49" and "50" therefore
    /// map to 2049; that rule is kept as-is so previously parsed dates keep
    /// their meaning.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Format`] for any text outside the grammar,
    /// an unknown month abbreviation, or an invalid time offset.
    pub fn parse_rfc822(input: &str) -> Result<Self> {
        let text = input.trim();
        let text = match text.split_once(',') {
            Some((_weekday, rest)) => rest,
            None => text,
        };

        let fields: Vec<&str> = text.split_whitespace().collect();
        let [day, month, year, time, zone] = fields.as_slice() else {
            return Err(format_error(input, "expected 'D Mon Y H:M[:S] ZONE'"));
        };

        let day = number(day, 1, 2).ok_or_else(|| format_error(input, "invalid day"))?;
        let month = month_number(month)
            .ok_or_else(|| format_error(input, "unrecognized month abbreviation"))?;
        let year = Some(year)
            .filter(|y| y.len() != 3)
            .and_then(|y| number(y, 2, 4))
            .map(expand_legacy_year)
            .ok_or_else(|| format_error(input, "invalid year"))?;

        let mut clock = time.split(':');
        let hour = clock.next().and_then(|h| number(h, 1, 2));
        let minute = clock.next().and_then(|m| number(m, 1, 2));
        let second = match clock.next() {
            Some(s) => number(s, 1, 2),
            None => Some(0),
        };
        let (Some(hour), Some(minute), Some(second), None) = (hour, minute, second, clock.next())
        else {
            return Err(format_error(input, "invalid time of day"));
        };

        let offset = rfc822_offset(zone).ok_or_else(|| format_error(input, "invalid time offset"))?;

        let date = NaiveDate::from_ymd_opt(year as i32, month, day)
            .ok_or_else(|| format_error(input, "invalid calendar date"))?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| format_error(input, "invalid time of day"))?;
        Self::new(date.and_time(time), offset)
    }

    /// Parse a truncated ISO 8601 date as used by Atom
    ///
    /// Components may be omitted only as whole groups from the right:
    /// `2003`, `2003-12` and `2003-12-13T18:30[:02[.5]]` followed by `Z` or
    /// a signed `HH:MM` offset. Omitted components default to the start of
    /// the period, in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Format`] for any text outside the grammar,
    /// including an offset without a sign or with a body that is not
    /// exactly `HH:MM`.
    pub fn parse_iso8601(input: &str) -> Result<Self> {
        let text = input.trim();
        if !text.is_ascii() {
            return Err(format_error(input, "unexpected character"));
        }

        let year = fixed_digits(text, 0, 4).ok_or_else(|| format_error(input, "invalid year"))?;
        if text.len() == 4 {
            return Self::from_parts(input, year, 1, 1, 0, 0, 0, 0, utc_offset());
        }

        expect_char(text, 4, b'-').ok_or_else(|| format_error(input, "expected '-' after year"))?;
        let month = fixed_digits(text, 5, 2).ok_or_else(|| format_error(input, "invalid month"))?;
        if text.len() == 7 {
            return Self::from_parts(input, year, month, 1, 0, 0, 0, 0, utc_offset());
        }

        expect_char(text, 7, b'-').ok_or_else(|| format_error(input, "expected '-' after month"))?;
        let day = fixed_digits(text, 8, 2).ok_or_else(|| format_error(input, "invalid day"))?;
        expect_char(text, 10, b'T').ok_or_else(|| format_error(input, "expected 'T' after day"))?;
        let hour = fixed_digits(text, 11, 2).ok_or_else(|| format_error(input, "invalid hour"))?;
        expect_char(text, 13, b':').ok_or_else(|| format_error(input, "expected ':' after hour"))?;
        let minute =
            fixed_digits(text, 14, 2).ok_or_else(|| format_error(input, "invalid minute"))?;

        let mut rest = &text[16..];
        let mut second = 0;
        let mut nanos = 0;
        if let Some(after) = rest.strip_prefix(':') {
            second = fixed_digits(after, 0, 2).ok_or_else(|| format_error(input, "invalid second"))?;
            rest = &after[2..];
            if let Some(after) = rest.strip_prefix('.') {
                let len = after.bytes().take_while(u8::is_ascii_digit).count();
                if len == 0 || len > 9 {
                    return Err(format_error(input, "invalid fractional seconds"));
                }
                nanos = fraction_nanos(&after[..len]);
                rest = &after[len..];
            }
        }

        let offset =
            iso8601_offset(rest).ok_or_else(|| format_error(input, "invalid time offset"))?;
        Self::from_parts(input, year, month, day, hour, minute, second, nanos, offset)
    }

    #[allow(clippy::too_many_arguments)]
    fn from_parts(
        input: &str,
        year: u32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanos: u32,
        offset: FixedOffset,
    ) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year as i32, month, day)
            .ok_or_else(|| format_error(input, "invalid calendar date"))?;
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
            .ok_or_else(|| format_error(input, "invalid time of day"))?;
        Self::new(date.and_time(time), offset)
    }

    /// Format as `Wkd, DD Mon YYYY HH:MM:SS ZONE`
    ///
    /// A zero offset is written as `GMT`, any other as `+HHMM`/`-HHMM`.
    /// Sub-second precision is dropped.
    pub fn to_rfc822(&self) -> String {
        let local = self.local();
        let weekday = WEEKDAYS[local.weekday().num_days_from_monday() as usize];
        let month = MONTHS[local.month0() as usize];
        let zone = match self.offset.local_minus_utc() {
            0 => "GMT".to_string(),
            seconds => {
                let (sign, hours, minutes) = split_offset(seconds);
                format!("{sign}{hours:02}{minutes:02}")
            }
        };
        format!(
            "{weekday}, {:02} {month} {:04} {:02}:{:02}:{:02} {zone}",
            local.day(),
            local.year(),
            local.hour(),
            local.minute(),
            local.second()
        )
    }

    /// Format as `YYYY-MM-DDTHH:MM:SS[.fff](Z|±HH:MM)`
    ///
    /// Fractional seconds are written with 3, 6 or 9 digits, only when
    /// present. A zero offset is written as `Z`.
    pub fn to_iso8601(&self) -> String {
        let local = self.local();
        let nanos = local.nanosecond();
        let fraction = if nanos == 0 {
            String::new()
        } else if nanos % 1_000_000 == 0 {
            format!(".{:03}", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            format!(".{:06}", nanos / 1_000)
        } else {
            format!(".{nanos:09}")
        };
        let zone = match self.offset.local_minus_utc() {
            0 => "Z".to_string(),
            seconds => {
                let (sign, hours, minutes) = split_offset(seconds);
                format!("{sign}{hours:02}:{minutes:02}")
            }
        };
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{fraction}{zone}",
            local.year(),
            local.month(),
            local.day(),
            local.hour(),
            local.minute(),
            local.second()
        )
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Parse optional element text, treating absent or blank text as no date
pub(crate) fn parse_optional(
    text: Option<String>,
    dialect: DateDialect,
) -> Result<Option<TemporalValue>> {
    match text {
        Some(text) if !text.trim().is_empty() => TemporalValue::parse(&text, dialect).map(Some),
        _ => Ok(None),
    }
}

/// Map a legacy short year onto the calendar
///
/// The 49/50 boundary collides: both become 2049.
fn expand_legacy_year(year: u32) -> u32 {
    match year {
        0..50 => year + 2000,
        50..1000 => year + 1999,
        _ => year,
    }
}

fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

fn rfc822_offset(zone: &str) -> Option<FixedOffset> {
    if let Some((_, hours)) = NAMED_ZONES.iter().find(|(name, _)| name.eq_ignore_ascii_case(zone)) {
        return FixedOffset::east_opt(hours * 3600);
    }

    let (sign, digits) = match *zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => (1, zone),
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    hh_mm_offset(sign, &format!("{}:{}", &digits[..2], &digits[2..]))
}

fn iso8601_offset(zone: &str) -> Option<FixedOffset> {
    if zone.eq_ignore_ascii_case("Z") {
        return Some(utc_offset());
    }
    let sign = match *zone.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    hh_mm_offset(sign, &zone[1..])
}

/// Parse an exactly five-character `HH:MM` offset body
fn hh_mm_offset(sign: i32, body: &str) -> Option<FixedOffset> {
    if body.len() != 5 || expect_char(body, 2, b':').is_none() {
        return None;
    }
    let hours = fixed_digits(body, 0, 2)?;
    let minutes = fixed_digits(body, 3, 2)?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60) as i32)
}

fn split_offset(seconds: i32) -> (char, i32, i32) {
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    (sign, minutes / 60, minutes % 60)
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// All-digit field with a length in `min..=max`
fn number(field: &str, min: usize, max: usize) -> Option<u32> {
    if field.len() < min || field.len() > max || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn fixed_digits(text: &str, start: usize, len: usize) -> Option<u32> {
    let field = text.get(start..start + len)?;
    number(field, len, len)
}

fn expect_char(text: &str, index: usize, expected: u8) -> Option<()> {
    (text.as_bytes().get(index)? == &expected).then_some(())
}

fn fraction_nanos(digits: &str) -> u32 {
    let mut nanos: u32 = digits.parse().unwrap_or(0);
    for _ in digits.len()..9 {
        nanos *= 10;
    }
    nanos
}

fn format_error(input: &str, reason: &str) -> FeedError {
    FeedError::Format(format!("invalid date '{input}': {reason}"))
}
