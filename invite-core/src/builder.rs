//! Builder form fields → event document.

use serde::{Deserialize, Serialize};

use crate::datetime::parse_loose_date;
use crate::document::{
    Branding, CalendarProviders, CalendarSection, Credits, DateTimeSection, Design, EventDocument,
    EventInfo, Footer, Location, Meta, Music, RsvpSection, ScheduleItem, ScheduleSlot,
};
use crate::lenient;
use crate::sanitize::sanitize;
use crate::timers::DEFAULT_VOLUME;

pub const META_COMMENT: &str = "TEMPLATE CONFIGURATION";
pub const DOCUMENT_VERSION: &str = "1.1";

const DESIGN_BY_LABEL: &str = "Created & Designed by";
const TEMPLATE_LABEL: &str = "Template by";
const TEMPLATE_AUTHOR: &str = "Rainier Pearson Saputra";
const TEMPLATE_LINK: &str = "https://rainier-ps.github.io/Personal-Website/";
const REPO_LABEL: &str = "Open Repository";
const REPO_LINK: &str = "https://github.com/Rainier-PS/Invitation-Template";

/// Everything the builder asks for. Read from a TOML or JSON file, or filled
/// in interactively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderForm {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub venue_name: String,
    pub venue_address: String,
    pub maps_link: String,
    pub schedule: Vec<ScheduleRow>,
    pub rsvp_enabled: bool,
    pub rsvp_url: String,
    pub accent_color: String,
    pub hero_images: Vec<String>,
    pub section_backgrounds: Vec<String>,
    pub music_enabled: bool,
    pub music_loop: bool,
    #[serde(deserialize_with = "lenient::number")]
    pub music_volume: Option<f64>,
    pub music_audio_url: String,
    pub footer_text: String,
    pub logo_url: String,
    pub author_name: String,
    pub simple_mode: bool,
    pub show_simple_mode_toggle: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleRow {
    pub time: String,
    pub label: String,
}

/// `YYYY-MM-DD` when the date can be read; otherwise kept as typed.
pub fn format_date_iso(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    match parse_loose_date(input) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => input.to_string(),
    }
}

/// Assemble the document. `copyright_year` goes into the credits block.
pub fn build_document(form: &BuilderForm, copyright_year: i32) -> EventDocument {
    let text = |value: &str| Some(sanitize(value).into_owned());

    let schedule = form
        .schedule
        .iter()
        .map(|row| {
            ScheduleItem::Slot(ScheduleSlot {
                time: text(&row.time),
                label: text(&row.label),
            })
        })
        .collect();

    let volume = form
        .music_volume
        .filter(|v| *v != 0.0)
        .unwrap_or(DEFAULT_VOLUME);

    EventDocument {
        meta_comment: Some(META_COMMENT.to_string()),
        meta: Meta {
            version: Some(DOCUMENT_VERSION.to_string()),
            private: Some(false),
            simple_mode: Some(form.simple_mode),
            show_simple_mode_toggle: Some(form.show_simple_mode_toggle),
            countdown: Some(true),
        },
        event: EventInfo {
            title: text(&form.title),
            subtitle: text(&form.subtitle),
            description: text(&form.description),
        },
        datetime: DateTimeSection {
            date: Some(format_date_iso(&sanitize(&form.date))),
            start_time: text(&form.start_time),
            end_time: text(&form.end_time),
            timezone: Some("local".to_string()),
            all_day: Some(false),
        },
        location: Location {
            name: text(&form.venue_name),
            address: text(&form.venue_address),
            maps_link: text(&form.maps_link),
        },
        schedule,
        rsvp: RsvpSection {
            enabled: Some(form.rsvp_enabled),
            url: text(&form.rsvp_url),
            ..Default::default()
        },
        calendar: CalendarSection {
            enabled: Some(true),
            providers: CalendarProviders { google: Some(true) },
        },
        design: Design {
            theme: Some("light".to_string()),
            accent_color: Some(form.accent_color.clone()),
            hero_images: form.hero_images.clone(),
            section_backgrounds: form.section_backgrounds.clone(),
            backgrounds: Vec::new(),
        },
        music: Music {
            enabled: Some(form.music_enabled),
            looped: Some(form.music_loop),
            volume: Some(volume),
            audio_url: text(&form.music_audio_url),
        },
        footer: Footer {
            text: text(&form.footer_text),
            branding: Some(Branding {
                link: Some("#".to_string()),
                logo_url: text(&form.logo_url),
                logo_alt: Some("Logo".to_string()),
            }),
            credits: Some(Credits {
                design_by_label: Some(DESIGN_BY_LABEL.to_string()),
                copyright_year: Some(copyright_year.to_string()),
                author_name: text(&form.author_name),
                template_label: Some(TEMPLATE_LABEL.to_string()),
                template_author: Some(TEMPLATE_AUTHOR.to_string()),
                template_link: Some(TEMPLATE_LINK.to_string()),
                repo_label: Some(REPO_LABEL.to_string()),
                repo_link: Some(REPO_LINK.to_string()),
            }),
        },
    }
}
