//! "Add to calendar" deep links.

use std::fmt;

use chrono::{DateTime, Utc};
use url::form_urlencoded;

use crate::datetime::NormalizedDateTime;
use crate::document::{CalendarSection, EventDocument, non_blank};

pub const GOOGLE_CALENDAR_BASE: &str =
    "https://calendar.google.com/calendar/render?action=TEMPLATE";

/// Start/end pair in the calendar service's compact UTC form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDates {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CalendarDates {
    /// `None` unless both instants are known.
    pub fn from_normalized(normalized: &NormalizedDateTime) -> Option<Self> {
        let (start, end) = normalized.span()?;
        Some(CalendarDates { start, end })
    }
}

impl fmt::Display for CalendarDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", format_utc(self.start), format_utc(self.end))
    }
}

/// `YYYYMMDDTHHMMSSZ`
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Text that goes into the calendar entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarDetails<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub location_name: Option<&'a str>,
    pub location_address: Option<&'a str>,
}

impl<'a> CalendarDetails<'a> {
    pub fn from_document(doc: &'a EventDocument) -> Self {
        CalendarDetails {
            title: doc.event.title.as_deref(),
            description: doc.event.description.as_deref(),
            location_name: doc.location.name.as_deref(),
            location_address: doc.location.address.as_deref(),
        }
    }

    /// "name, address", leaving out whichever part is missing
    fn location(&self) -> String {
        [self.location_name, self.location_address]
            .into_iter()
            .filter_map(non_blank)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build a Google Calendar template link, or `None` when the event has no
/// known start/end.
pub fn google_calendar_link(
    normalized: &NormalizedDateTime,
    details: &CalendarDetails<'_>,
) -> Option<String> {
    let dates = CalendarDates::from_normalized(normalized)?;

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("text", details.title.unwrap_or_default())
        .append_pair("dates", &dates.to_string())
        .append_pair("details", details.description.unwrap_or_default())
        .append_pair("location", &details.location())
        .finish();

    Some(format!("{GOOGLE_CALENDAR_BASE}&{query}"))
}

/// The calendar button is opt-in: both the feature and the Google provider
/// must be switched on.
pub fn google_calendar_enabled(calendar: &CalendarSection) -> bool {
    calendar.enabled == Some(true) && calendar.providers.google == Some(true)
}
