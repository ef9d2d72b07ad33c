//! Date/time normalization.
//!
//! Turns the loose `datetime` section of an event document into concrete
//! start/end instants. Nothing in here fails: a date that cannot be read
//! normalizes to "unknown", which hides the countdown and calendar link
//! downstream.

use chrono::{DateTime, Days, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::document::{DateTimeSection, non_blank};

/// Date orders accepted when the primary `YYYY-MM-DD` form doesn't parse.
const LOOSE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const LOOSE_TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

/// Combined forms seen in the `date` field itself.
const LOOSE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

pub const ALL_DAY_LABEL: &str = "All Day";

/// The zone an event's wall-clock times are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    Utc,
    /// Whatever zone the host is configured with
    Local,
    Named(Tz),
}

impl Timezone {
    /// `"UTC"` (any case), an IANA name, or anything else for host-local time.
    pub fn from_setting(setting: Option<&str>) -> Self {
        let Some(name) = non_blank(setting).map(str::trim) else {
            return Timezone::Local;
        };

        if name.eq_ignore_ascii_case("utc") {
            return Timezone::Utc;
        }
        if name.eq_ignore_ascii_case("local") {
            return Timezone::Local;
        }

        match name.parse::<Tz>() {
            Ok(tz) => Timezone::Named(tz),
            Err(_) => {
                tracing::debug!(timezone = name, "Unknown timezone, using local time");
                Timezone::Local
            }
        }
    }

    /// Resolve a wall-clock time in this zone.
    /// Ambiguous times take the earliest instant; times in a DST gap move
    /// forward by an hour.
    pub fn resolve(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Timezone::Utc => Some(naive.and_utc()),
            Timezone::Local => resolve_in(&Local, naive),
            Timezone::Named(tz) => resolve_in(tz, naive),
        }
    }

    /// The wall-clock reading of an instant in this zone.
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Timezone::Utc => instant.naive_utc(),
            Timezone::Local => instant.with_timezone(&Local).naive_local(),
            Timezone::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Same wall-clock time on the next calendar day.
    fn next_day(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        self.wall_clock(instant)
            .checked_add_days(Days::new(1))
            .and_then(|naive| self.resolve(naive))
            .unwrap_or(instant + Duration::days(1))
    }
}

fn resolve_in<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    let local = zone.from_local_datetime(&naive).earliest().or_else(|| {
        let shifted = naive.checked_add_signed(Duration::hours(1))?;
        tracing::debug!(%naive, %shifted, "Wall-clock time falls in a DST gap");
        zone.from_local_datetime(&shifted).earliest()
    })?;
    Some(local.with_timezone(&Utc))
}

/// Canonical start/end of an event.
///
/// `start` and `end` are either both known or both unknown; `end` is never
/// before `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDateTime {
    pub all_day: bool,
    /// Calendar date of `start` in the event's timezone
    pub date: Option<NaiveDate>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl NormalizedDateTime {
    pub fn unknown(all_day: bool) -> Self {
        NormalizedDateTime {
            all_day,
            date: None,
            start: None,
            end: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.start.is_some()
    }

    /// Both instants, when the date could be read.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.start?, self.end?))
    }
}

pub fn normalize(section: &DateTimeSection) -> NormalizedDateTime {
    let all_day = section.all_day == Some(true);

    let Some(date) = non_blank(section.date.as_deref()) else {
        return NormalizedDateTime::unknown(all_day);
    };

    let tz = Timezone::from_setting(section.timezone.as_deref());
    let start_time = if all_day {
        None
    } else {
        section.start_time.as_deref()
    };

    let Some(start) = parse_event_instant(date, start_time, &tz) else {
        tracing::warn!(date, "Could not read event date; hiding countdown and calendar");
        return NormalizedDateTime::unknown(all_day);
    };

    let end = if all_day {
        Some(tz.next_day(start))
    } else if let Some(end_time) = non_blank(section.end_time.as_deref()) {
        match parse_event_instant(date, Some(end_time), &tz) {
            Some(end) if end <= start => {
                tracing::warn!(
                    end_time,
                    "Invalid endTime; ignoring and using start time only"
                );
                None
            }
            other => other,
        }
    } else {
        None
    };

    NormalizedDateTime {
        all_day,
        date: Some(tz.wall_clock(start).date()),
        start: Some(start),
        end: Some(end.unwrap_or(start)),
    }
}

/// Parse `date` + `time` (midnight when absent) in `tz`.
///
/// The primary form is `YYYY-MM-DD` with `HH:MM`; anything else goes through a
/// lenient parse of the combined text.
pub fn parse_event_instant(date: &str, time: Option<&str>, tz: &Timezone) -> Option<DateTime<Utc>> {
    let date = date.trim();
    let time = non_blank(time).map(str::trim);

    let compact = time.map_or_else(|| "00:00".to_string(), |t| t.replace(' ', ""));
    if let Ok(naive) =
        NaiveDateTime::parse_from_str(&format!("{date}T{compact}:00"), "%Y-%m-%dT%H:%M:%S")
    {
        return tz.resolve(naive);
    }

    parse_lenient(date, time, tz)
}

fn parse_lenient(date: &str, time: Option<&str>, tz: &Timezone) -> Option<DateTime<Utc>> {
    let Some(time) = time else {
        if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
            return Some(instant.with_timezone(&Utc));
        }
        if let Some(naive) = LOOSE_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        {
            return tz.resolve(naive);
        }
        return tz.resolve(parse_loose_date(date)?.and_time(NaiveTime::MIN));
    };

    let day = parse_loose_date(date)?;
    let clock = LOOSE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())?;
    tz.resolve(day.and_time(clock))
}

/// Read a calendar date written in any of the common orders.
pub fn parse_loose_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    LOOSE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Long-form date for the page, e.g. "June 1, 2025".
/// A locale such as `fr_FR` switches to that locale's month names and word
/// order.
pub fn format_display_date(date: Option<NaiveDate>, locale: Option<&str>) -> String {
    let Some(date) = date else {
        return String::new();
    };

    let tag = locale.map(|tag| tag.trim().replace('-', "_"));
    match tag.as_deref().and_then(|tag| Some((tag, parse_locale(tag)?))) {
        Some((_, chrono::Locale::en_US)) | None => date.format("%B %-d, %Y").to_string(),
        Some((tag, locale)) => date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .format_localized(long_date_pattern(tag), locale)
            .to_string(),
    }
}

fn long_date_pattern(tag: &str) -> &'static str {
    match tag.split('_').next().unwrap_or(tag) {
        "de" | "da" | "nb" | "nn" | "fi" => "%-d. %B %Y",
        "es" | "pt" => "%-d de %B de %Y",
        "ja" | "zh" => "%Y年%-m月%-d日",
        "ko" => "%Y년 %-m월 %-d일",
        _ => "%-d %B %Y",
    }
}

fn parse_locale(tag: &str) -> Option<chrono::Locale> {
    match chrono::Locale::try_from(tag) {
        Ok(locale) => Some(locale),
        Err(_) => {
            tracing::debug!(locale = tag, "Unknown locale, using default date format");
            None
        }
    }
}

/// "All Day" for all-day events, otherwise the start time as written.
pub fn event_time_label(section: &DateTimeSection, normalized: &NormalizedDateTime) -> String {
    if normalized.all_day {
        return ALL_DAY_LABEL.to_string();
    }
    section.start_time.clone().unwrap_or_default()
}
