//! The event document: the JSON shape shared by the builder and the renderer.
//!
//! Every section and field is optional. Parsing is best-effort: a value of
//! the wrong type reads as absent, a section of the wrong type reads as
//! empty, and bad schedule entries are dropped. Only a document that is not
//! JSON at all (or not a JSON object) is rejected.

use serde::{Deserialize, Serialize};

use crate::error::{InviteError, InviteResult};
use crate::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(
        rename = "_meta_comment",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub meta_comment: Option<String>,

    #[serde(default, deserialize_with = "lenient::section")]
    pub meta: Meta,

    #[serde(default, deserialize_with = "lenient::section")]
    pub event: EventInfo,

    #[serde(default, deserialize_with = "lenient::section")]
    pub datetime: DateTimeSection,

    #[serde(default, deserialize_with = "lenient::section")]
    pub location: Location,

    #[serde(default, deserialize_with = "lenient::list")]
    pub schedule: Vec<ScheduleItem>,

    #[serde(default, deserialize_with = "lenient::section")]
    pub rsvp: RsvpSection,

    #[serde(default, deserialize_with = "lenient::section")]
    pub calendar: CalendarSection,

    #[serde(default, deserialize_with = "lenient::section")]
    pub design: Design,

    #[serde(default, deserialize_with = "lenient::section")]
    pub music: Music,

    #[serde(default, deserialize_with = "lenient::section")]
    pub footer: Footer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub simple_mode: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub show_simple_mode_toggle: Option<bool>,
    /// Countdown is on unless this is explicitly `false`
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub countdown: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Raw date/time fields, before normalization (see `crate::datetime`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeSection {
    /// Expected `YYYY-MM-DD`, other parseable forms are tolerated
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// `HH:MM`
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// `HH:MM`
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// `"UTC"`, `"local"` or an IANA zone name
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub maps_link: Option<String>,
}

/// A schedule entry is either free text or a time/label pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleItem {
    Text(String),
    Slot(ScheduleSlot),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RsvpSection {
    /// RSVP is on unless this is explicitly `false`
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Provider name, or `"auto"` to detect it from the url
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Embed height in pixels
    #[serde(default, deserialize_with = "lenient::dimension", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarSection {
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub providers: CalendarProviders,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarProviders {
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub google: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub hero_images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub section_backgrounds: Vec<String>,
    /// Older documents list one background per section here
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub backgrounds: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Music {
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(
        rename = "loop",
        default,
        deserialize_with = "lenient::flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub looped: Option<bool>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_section", skip_serializing_if = "Option::is_none")]
    pub branding: Option<Branding>,
    #[serde(default, deserialize_with = "lenient::optional_section", skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub logo_alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credits {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub design_by_label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub copyright_year: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub template_label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub template_author: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub template_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub repo_label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub repo_link: Option<String>,
}

impl EventDocument {
    /// Parse a document, tolerating missing or mistyped fields.
    pub fn from_json(content: &str) -> InviteResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| InviteError::Document(e.to_string()))?;

        if !value.is_object() {
            return Err(InviteError::Document(
                "expected a JSON object at the top level".into(),
            ));
        }

        serde_json::from_value(value).map_err(|e| InviteError::Document(e.to_string()))
    }

    /// Pretty-printed JSON with four-space indentation.
    pub fn to_pretty_json(&self) -> InviteResult<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| InviteError::Serialization(e.to_string()))?;
        String::from_utf8(out).map_err(|e| InviteError::Serialization(e.to_string()))
    }
}

/// `Some` only for strings with visible content.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_defaults_every_section() {
        let doc = EventDocument::from_json("{}").unwrap();
        assert_eq!(doc, EventDocument::default());
    }

    #[test]
    fn mistyped_fields_read_as_absent() {
        let doc = EventDocument::from_json(
            r#"{
                "event": {"title": 42, "subtitle": "Hello"},
                "datetime": {"date": true, "allDay": "yes"},
                "rsvp": {"enabled": "no", "height": "700"}
            }"#,
        )
        .unwrap();

        assert_eq!(doc.event.title, None);
        assert_eq!(doc.event.subtitle.as_deref(), Some("Hello"));
        assert_eq!(doc.datetime.date, None);
        assert_eq!(doc.datetime.all_day, None);
        assert_eq!(doc.rsvp.enabled, None);
        assert_eq!(doc.rsvp.height, Some(700));
    }

    #[test]
    fn mistyped_section_reads_as_empty() {
        let doc = EventDocument::from_json(r#"{"location": "Town Hall", "footer": []}"#).unwrap();
        assert_eq!(doc.location, Location::default());
        assert_eq!(doc.footer, Footer::default());
    }

    #[test]
    fn schedule_accepts_text_and_slots_and_skips_junk() {
        let doc = EventDocument::from_json(
            r#"{"schedule": ["Doors open", {"time": "18:00", "label": "Dinner"}, 7, null]}"#,
        )
        .unwrap();

        assert_eq!(
            doc.schedule,
            vec![
                ScheduleItem::Text("Doors open".into()),
                ScheduleItem::Slot(ScheduleSlot {
                    time: Some("18:00".into()),
                    label: Some("Dinner".into()),
                }),
            ]
        );
    }

    #[test]
    fn zero_height_is_unset() {
        let doc = EventDocument::from_json(r#"{"rsvp": {"height": 0}}"#).unwrap();
        assert_eq!(doc.rsvp.height, None);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            EventDocument::from_json("{not json"),
            Err(InviteError::Document(_))
        ));
        assert!(EventDocument::from_json("[1, 2]").is_err());
    }

    #[test]
    fn pretty_json_uses_four_spaces() {
        let mut doc = EventDocument::default();
        doc.event.title = Some("Party".into());
        let json = doc.to_pretty_json().unwrap();
        assert!(json.contains("\n    \"event\": {\n        \"title\": \"Party\"\n    }"));
    }
}
