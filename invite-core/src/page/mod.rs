//! Projection of an event document onto the rendered invitation page.
//!
//! [`project`] is pure: it reads a [`LoadedEvent`] and a [`ProjectionContext`]
//! and produces a [`Page`], the flat view model the HTML template consumes.
//! Every optional feature is represented as an `Option` so the template only
//! has to check for presence.

mod hero;
mod scripts;
mod template;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use hero::{HeroTreatment, PageSection, section_backgrounds};
pub use scripts::ScriptRegistry;
pub use template::PageRenderer;

use crate::calendar_link::{CalendarDetails, google_calendar_enabled, google_calendar_link};
use crate::constants::{DEFAULT_PAGE_TITLE, FALLBACK_SUBTITLE, FALLBACK_TITLE};
use crate::datetime::{event_time_label, format_display_date};
use crate::document::{Branding, Credits, EventDocument, ScheduleItem, non_blank};
use crate::rsvp::{RsvpEmbed, resolve_rsvp};
use crate::timers::{AudioTrack, Countdown, LoadedEvent, SLIDE_INTERVAL, Slideshow, countdown_target};

const DEFAULT_LOGO_ALT: &str = "Logo";
const DEFAULT_REPO_LABEL: &str = "Repository";

/// What projection needs besides the document.
#[derive(Debug, Clone)]
pub struct ProjectionContext {
    pub now: DateTime<Utc>,
    /// Locale tag for the display date, e.g. `fr_FR`
    pub locale: Option<String>,
}

impl ProjectionContext {
    pub fn now() -> Self {
        ProjectionContext {
            now: Utc::now(),
            locale: None,
        }
    }

    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }
}

/// The rendered invitation, as the template sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub document_title: String,
    pub og_title: String,
    pub og_description: String,

    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue_name: String,
    pub venue_address: String,
    pub maps_link: Option<String>,

    pub countdown: Option<CountdownView>,
    pub calendar_link: Option<String>,
    pub schedule: Vec<ScheduleEntry>,
    pub rsvp: Option<RsvpView>,
    pub audio: Option<AudioTrack>,

    pub theme: Option<String>,
    /// Exported as the `--primary` CSS variable
    pub accent_color: Option<String>,
    pub hero: HeroTreatment,
    /// Milliseconds between hero slides; `None` keeps the first slide
    pub slide_interval_ms: Option<u64>,
    /// Background image url keyed by section id
    pub backgrounds: BTreeMap<&'static str, String>,

    pub footer_text: String,
    pub branding: Option<BrandingView>,
    pub credits: Option<CreditsView>,

    pub simple_mode: bool,
    pub show_simple_mode_toggle: bool,

    /// External scripts, each once
    pub scripts: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountdownView {
    /// RFC 3339 instant the browser counts down to
    pub target: String,
    pub initial: Countdown,
    /// Zero-padded clock fields of `initial`
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl CountdownView {
    fn new(target: DateTime<Utc>, initial: Countdown) -> Self {
        CountdownView {
            target: target.to_rfc3339(),
            hours: format!("{:02}", initial.hours),
            minutes: format!("{:02}", initial.minutes),
            seconds: format!("{:02}", initial.seconds),
            initial,
        }
    }
}

/// One schedule line; plain-text items have no time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub time: Option<String>,
    pub label: String,
}

impl From<&ScheduleItem> for ScheduleEntry {
    fn from(item: &ScheduleItem) -> Self {
        match item {
            ScheduleItem::Text(text) => ScheduleEntry {
                time: None,
                label: text.clone(),
            },
            ScheduleItem::Slot(slot) => ScheduleEntry {
                time: Some(slot.time.clone().unwrap_or_default()),
                label: slot.label.clone().unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsvpView {
    pub provider: &'static str,
    /// Frame `src`; absent when the provider's script fills the frame
    pub src: Option<String>,
    pub tally_src: Option<String>,
    pub height: u32,
}

impl From<&RsvpEmbed> for RsvpView {
    fn from(embed: &RsvpEmbed) -> Self {
        RsvpView {
            provider: embed.provider.name(),
            src: embed.frame_src(),
            tally_src: embed.deferred_src().map(str::to_string),
            height: embed.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandingView {
    pub link: String,
    pub logo: Option<LogoView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoView {
    pub src: String,
    pub alt: String,
}

impl From<&Branding> for BrandingView {
    fn from(branding: &Branding) -> Self {
        let logo = non_blank(branding.logo_url.as_deref()).map(|src| LogoView {
            src: src.to_string(),
            alt: non_blank(branding.logo_alt.as_deref())
                .unwrap_or(DEFAULT_LOGO_ALT)
                .to_string(),
        });

        BrandingView {
            link: non_blank(branding.link.as_deref()).unwrap_or("#").to_string(),
            logo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditsView {
    pub design_by_label: String,
    /// "© 2025 Jane Doe"
    pub copyright: String,
    pub template_label: String,
    pub template_author: String,
    pub template_link: String,
    pub repo: Option<RepoView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoView {
    pub link: String,
    pub label: String,
}

impl From<&Credits> for CreditsView {
    fn from(credits: &Credits) -> Self {
        let owner = [credits.copyright_year.as_deref(), credits.author_name.as_deref()]
            .into_iter()
            .filter_map(non_blank)
            .collect::<Vec<_>>()
            .join(" ");

        let repo = non_blank(credits.repo_link.as_deref()).map(|link| RepoView {
            link: link.to_string(),
            label: non_blank(credits.repo_label.as_deref())
                .unwrap_or(DEFAULT_REPO_LABEL)
                .to_string(),
        });

        CreditsView {
            design_by_label: credits.design_by_label.clone().unwrap_or_default(),
            copyright: format!("© {owner}").trim_end().to_string(),
            template_label: credits.template_label.clone().unwrap_or_default(),
            template_author: credits.template_author.clone().unwrap_or_default(),
            template_link: non_blank(credits.template_link.as_deref())
                .unwrap_or("#")
                .to_string(),
            repo,
        }
    }
}

/// Build the page for a loaded event.
pub fn project(event: &LoadedEvent, ctx: &ProjectionContext) -> Page {
    let doc = &event.document;
    let normalized = &event.datetime;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    let countdown = countdown_target(event).and_then(|target| {
        Countdown::until(target, ctx.now).map(|initial| CountdownView::new(target, initial))
    });

    let calendar_link = google_calendar_enabled(&doc.calendar)
        .then(|| google_calendar_link(normalized, &CalendarDetails::from_document(doc)))
        .flatten();

    let mut scripts = ScriptRegistry::default();
    let rsvp = resolve_rsvp(&doc.rsvp).map(|embed| {
        if let Some(script) = embed.required_script() {
            scripts.require(script);
        }
        RsvpView::from(&embed)
    });

    let hero = HeroTreatment::select(&doc.design);
    let slide_interval_ms = match &hero {
        HeroTreatment::Slideshow(images) => Slideshow::new(images.len())
            .filter(|show| show.is_animated(false))
            .map(|_| SLIDE_INTERVAL.as_millis() as u64),
        _ => None,
    };
    let sections = PageSection::layout(rsvp.is_some());
    let backgrounds = section_backgrounds(&doc.design, &sections, &hero);

    Page {
        document_title: non_blank(doc.event.title.as_deref())
            .unwrap_or(DEFAULT_PAGE_TITLE)
            .to_string(),
        og_title: text(&doc.event.title),
        og_description: text(&doc.event.description),

        title: text(&doc.event.title),
        subtitle: text(&doc.event.subtitle),
        description: text(&doc.event.description),
        date: format_display_date(normalized.date, ctx.locale.as_deref()),
        time: event_time_label(&doc.datetime, normalized),
        venue_name: text(&doc.location.name),
        venue_address: text(&doc.location.address),
        maps_link: non_blank(doc.location.maps_link.as_deref()).map(str::to_string),

        countdown,
        calendar_link,
        schedule: doc.schedule.iter().map(ScheduleEntry::from).collect(),
        rsvp,
        audio: AudioTrack::from_music(&doc.music),

        theme: non_blank(doc.design.theme.as_deref()).map(str::to_string),
        accent_color: non_blank(doc.design.accent_color.as_deref()).map(str::to_string),
        hero,
        slide_interval_ms,
        backgrounds,

        footer_text: text(&doc.footer.text),
        branding: doc.footer.branding.as_ref().map(BrandingView::from),
        credits: doc.footer.credits.as_ref().map(CreditsView::from),

        simple_mode: doc.meta.simple_mode == Some(true),
        show_simple_mode_toggle: doc.meta.show_simple_mode_toggle == Some(true),

        scripts: scripts.into_scripts(),
    }
}

/// Convenience for callers holding a bare document.
pub fn project_document(doc: EventDocument, ctx: &ProjectionContext) -> Page {
    project(&LoadedEvent::new(doc), ctx)
}

/// The page shown when the event document could not be loaded.
pub fn fallback_page() -> Page {
    Page {
        document_title: DEFAULT_PAGE_TITLE.to_string(),
        title: FALLBACK_TITLE.to_string(),
        subtitle: FALLBACK_SUBTITLE.to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsvp::TALLY_EMBED_SCRIPT;

    fn ctx(now: &str) -> ProjectionContext {
        ProjectionContext {
            now: DateTime::parse_from_rfc3339(now).unwrap().with_timezone(&Utc),
            locale: None,
        }
    }

    fn party() -> EventDocument {
        EventDocument::from_json(
            r##"{
                "event": {"title": "Summer Party", "subtitle": "Bring a friend", "description": "Food & music"},
                "datetime": {"date": "2025-06-01", "startTime": "10:00", "endTime": "12:00", "timezone": "UTC"},
                "location": {"name": "Town Hall", "address": "1 Main St", "mapsLink": "https://maps.example/1"},
                "schedule": ["Doors open", {"time": "10:30", "label": "Speeches"}],
                "rsvp": {"url": "https://tally.so/r/abc"},
                "calendar": {"enabled": true, "providers": {"google": true}},
                "design": {"accentColor": "#ff6600", "heroImages": ["a.jpg", "b.jpg"]},
                "music": {"enabled": true, "audioUrl": "song.mp3"},
                "footer": {
                    "text": "See you there",
                    "branding": {"logoUrl": "logo.png"},
                    "credits": {"copyrightYear": "2025", "authorName": "Jane", "repoLink": "https://git.example/repo"}
                }
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn projects_every_feature() {
        let page = project_document(party(), &ctx("2025-05-31T10:00:00Z"));

        assert_eq!(page.document_title, "Summer Party");
        assert_eq!(page.og_description, "Food & music");
        assert_eq!(page.date, "June 1, 2025");
        assert_eq!(page.time, "10:00");
        assert_eq!(page.maps_link.as_deref(), Some("https://maps.example/1"));

        let countdown = page.countdown.unwrap();
        assert_eq!(countdown.initial.days, 1);
        assert_eq!(countdown.target, "2025-06-01T10:00:00+00:00");
        assert_eq!(countdown.hours, "00");

        assert!(page.calendar_link.unwrap().contains("dates=20250601T100000Z%2F20250601T120000Z"));

        assert_eq!(
            page.schedule,
            vec![
                ScheduleEntry { time: None, label: "Doors open".into() },
                ScheduleEntry { time: Some("10:30".into()), label: "Speeches".into() },
            ]
        );

        let rsvp = page.rsvp.unwrap();
        assert_eq!(rsvp.provider, "tally");
        assert_eq!(rsvp.src, None);
        assert_eq!(rsvp.tally_src.as_deref(), Some("https://tally.so/r/abc"));
        assert_eq!(page.scripts, vec![TALLY_EMBED_SCRIPT]);

        let audio = page.audio.unwrap();
        assert!(audio.looped);
        assert_eq!(audio.volume, 0.3);

        assert_eq!(page.slide_interval_ms, Some(5_000));
        assert_eq!(page.accent_color.as_deref(), Some("#ff6600"));
    }

    #[test]
    fn footer_defaults() {
        let page = project_document(party(), &ctx("2025-05-31T10:00:00Z"));

        let branding = page.branding.unwrap();
        assert_eq!(branding.link, "#");
        assert_eq!(
            branding.logo,
            Some(LogoView { src: "logo.png".into(), alt: "Logo".into() })
        );

        let credits = page.credits.unwrap();
        assert_eq!(credits.copyright, "© 2025 Jane");
        assert_eq!(credits.template_link, "#");
        assert_eq!(
            credits.repo,
            Some(RepoView { link: "https://git.example/repo".into(), label: "Repository".into() })
        );
    }

    #[test]
    fn past_events_have_no_countdown() {
        let page = project_document(party(), &ctx("2025-06-02T00:00:00Z"));
        assert!(page.countdown.is_none());
        assert!(page.calendar_link.is_some());
    }

    #[test]
    fn countdown_can_be_switched_off() {
        let mut doc = party();
        doc.meta.countdown = Some(false);
        assert!(project_document(doc, &ctx("2025-05-31T10:00:00Z")).countdown.is_none());
    }

    #[test]
    fn empty_document_clears_everything() {
        let page = project_document(EventDocument::default(), &ctx("2025-05-31T10:00:00Z"));

        assert_eq!(page.document_title, "You're Invited");
        assert_eq!(page.title, "");
        assert_eq!(page.date, "");
        assert!(page.countdown.is_none());
        assert!(page.calendar_link.is_none());
        assert!(page.rsvp.is_none());
        assert!(page.audio.is_none());
        assert!(page.schedule.is_empty());
        assert!(page.scripts.is_empty());
        assert_eq!(page.hero, HeroTreatment::None);
    }

    #[test]
    fn unreadable_date_hides_calendar_and_countdown() {
        let mut doc = party();
        doc.datetime.date = Some("next tuesday".into());
        assert_eq!(doc.calendar.enabled, Some(true));
        assert_eq!(doc.calendar.providers.google, Some(true));

        let page = project_document(doc, &ctx("2025-05-31T10:00:00Z"));
        assert_eq!(page.date, "");
        assert!(page.calendar_link.is_none());
        assert!(page.countdown.is_none());
        assert_eq!(page.title, "Summer Party");
    }

    #[test]
    fn calendar_needs_opt_in() {
        let mut doc = party();
        doc.calendar.providers.google = Some(false);
        assert!(project_document(doc, &ctx("2025-05-31T10:00:00Z")).calendar_link.is_none());
    }

    #[test]
    fn single_hero_image_does_not_rotate() {
        let mut doc = party();
        doc.design.hero_images = vec!["only.jpg".into()];
        let page = project_document(doc, &ctx("2025-05-31T10:00:00Z"));
        assert_eq!(page.hero, HeroTreatment::Slideshow(vec!["only.jpg".into()]));
        assert_eq!(page.slide_interval_ms, None);
    }

    #[test]
    fn fallback_page_hides_features() {
        let page = fallback_page();
        assert_eq!(page.title, "Unable to load event details");
        assert_eq!(page.subtitle, "Please check back later.");
        assert!(page.rsvp.is_none());
        assert!(page.countdown.is_none());
        assert!(page.credits.is_none());
    }
}
