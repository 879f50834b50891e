//! Date Dialect Tests
//!
//! References:
//! - RFC 822 section 5 (RSS dates)
//! - RFC 3339 / W3C-DTF (Atom dates)

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use feedkit::{DateDialect, FeedError, TemporalValue};
use proptest::prelude::*;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn test_rfc822_scenario() {
    let value = TemporalValue::parse("Mon, 06 Nov 1995 08:49:37 GMT", DateDialect::Rfc822).unwrap();
    assert_eq!(value.instant(), utc(1995, 11, 6, 8, 49, 37));
    assert_eq!(value.offset().local_minus_utc(), 0);
    assert_eq!(value.format(DateDialect::Rfc822), "Mon, 06 Nov 1995 08:49:37 GMT");
}

#[test]
fn test_iso8601_scenario() {
    let value = TemporalValue::parse("2003-12-13T18:30:02Z", DateDialect::Iso8601).unwrap();
    assert_eq!(value.instant(), utc(2003, 12, 13, 18, 30, 2));
    assert_eq!(value.offset().local_minus_utc(), 0);
    assert_eq!(value.format(DateDialect::Iso8601), "2003-12-13T18:30:02Z");
}

#[test]
fn test_legacy_years() {
    for (raw, year) in [("05", 2005), ("49", 2049), ("50", 2049), ("99", 2098)] {
        let text = format!("01 Jan {raw} 00:00 GMT");
        let value = TemporalValue::parse(&text, DateDialect::Rfc822).unwrap();
        assert_eq!(value.instant(), utc(year, 1, 1, 0, 0, 0), "{raw}");
    }
}

#[test]
fn test_named_zones() {
    let cases = [
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
    for (zone, hours) in cases {
        let text = format!("Tue, 10 Jun 2003 04:00:00 {zone}");
        let value = TemporalValue::parse(&text, DateDialect::Rfc822).unwrap();
        assert_eq!(value.offset().local_minus_utc(), hours * 3600, "{zone}");
        assert_eq!(value.local(), NaiveDate::from_ymd_opt(2003, 6, 10).unwrap().and_hms_opt(4, 0, 0).unwrap());
    }
}

#[test]
fn test_numeric_offsets() {
    let signed = TemporalValue::parse("10 Jun 2003 04:00 +0530", DateDialect::Rfc822).unwrap();
    assert_eq!(signed.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    assert_eq!(signed.instant(), utc(2003, 6, 9, 22, 30, 0));

    let unsigned = TemporalValue::parse("10 Jun 2003 04:00 0200", DateDialect::Rfc822).unwrap();
    assert_eq!(unsigned.offset().local_minus_utc(), 2 * 3600);
    assert_eq!(unsigned.to_rfc822(), "Tue, 10 Jun 2003 04:00:00 +0200");
}

#[test]
fn test_rfc822_rejects() {
    for text in [
        "",
        "Mon, 06 Foo 1995 08:49:37 GMT",
        "Mon, 06 Nov 1995 08:49:37 XYZ",
        "Mon, 06 Nov 1995 08:49:37 +05",
        "Mon, 06 Nov 1995 GMT",
        "Mon, 31 Feb 1995 08:49:37 GMT",
        "Mon, 06 Nov 1995 25:00:00 GMT",
    ] {
        let err = TemporalValue::parse(text, DateDialect::Rfc822).unwrap_err();
        assert!(matches!(err, FeedError::Format(_)), "{text:?}");
    }
    let err = TemporalValue::parse("06 Nov 1995 08:49 XYZ", DateDialect::Rfc822).unwrap_err();
    assert!(err.to_string().contains("invalid time offset"));
}

#[test]
fn test_iso8601_truncated_forms() {
    let cases = [
        ("2003", utc(2003, 1, 1, 0, 0, 0)),
        ("2003-12", utc(2003, 12, 1, 0, 0, 0)),
        ("2003-12-13T18:30Z", utc(2003, 12, 13, 18, 30, 0)),
        ("2003-12-13T18:30:02+01:00", utc(2003, 12, 13, 17, 30, 2)),
    ];
    for (text, instant) in cases {
        let value = TemporalValue::parse(text, DateDialect::Iso8601).unwrap();
        assert_eq!(value.instant(), instant, "{text}");
    }
}

#[test]
fn test_iso8601_fractions_and_offsets() {
    let value = TemporalValue::parse("2003-12-13T18:30:02.25-05:00", DateDialect::Iso8601).unwrap();
    assert_eq!(value.offset().local_minus_utc(), -5 * 3600);
    assert_eq!(value.to_iso8601(), "2003-12-13T18:30:02.250-05:00");

    for text in [
        "2003-12-13T18:30:02+0100",
        "2003-12-13T18:30:02 01:00",
        "2003-12-13T18:30:02.Z",
        "2003-13",
        "03-12-13T18:30Z",
    ] {
        assert!(TemporalValue::parse(text, DateDialect::Iso8601).is_err(), "{text}");
    }
}

#[test]
fn test_dialects_are_distinct() {
    assert!(TemporalValue::parse("2003-12-13T18:30:02Z", DateDialect::Rfc822).is_err());
    assert!(TemporalValue::parse("Mon, 06 Nov 1995 08:49:37 GMT", DateDialect::Iso8601).is_err());
}

prop_compose! {
    fn local_and_offset(with_fraction: bool)(
        days in 0i64..3_000_000,
        seconds in 0u32..86_400,
        nanos in 0u32..1_000_000_000,
        offset_minutes in -(23 * 60 + 59)..=(23 * 60 + 59),
    ) -> TemporalValue {
        let date = NaiveDate::from_ymd_opt(1001, 1, 1).unwrap() + chrono::Duration::days(days);
        let time = chrono::NaiveTime::from_num_seconds_from_midnight_opt(
            seconds,
            if with_fraction { nanos } else { 0 },
        )
        .unwrap();
        let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
        TemporalValue::new(date.and_time(time), offset).unwrap()
    }
}

proptest! {
    #[test]
    fn prop_rfc822_round_trip(value in local_and_offset(false)) {
        let text = value.format(DateDialect::Rfc822);
        prop_assert_eq!(TemporalValue::parse(&text, DateDialect::Rfc822).unwrap(), value);
        prop_assert!(value.is_representable(DateDialect::Rfc822));
    }

    #[test]
    fn prop_iso8601_round_trip(value in local_and_offset(true)) {
        let text = value.format(DateDialect::Iso8601);
        prop_assert_eq!(TemporalValue::parse(&text, DateDialect::Iso8601).unwrap(), value);
    }
}
