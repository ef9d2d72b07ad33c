//! Colored terminal rendering for invite types.

use chrono::{DateTime, Utc};
use invite_core::demos::DemoEntry;
use invite_core::page::{HeroTreatment, Page, RsvpView};
use invite_core::timers::{AudioTrack, Countdown, LoadedEvent};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Countdown {
    fn render(&self) -> String {
        format!(
            "{} {} {} {}",
            format!("{}d", self.days).bold(),
            format!("{:02}h", self.hours).bold(),
            format!("{:02}m", self.minutes).bold(),
            format!("{:02}s", self.seconds).bold(),
        )
    }
}

impl Render for RsvpView {
    fn render(&self) -> String {
        let target = self
            .src
            .as_deref()
            .or(self.tally_src.as_deref())
            .unwrap_or_default();
        format!(
            "{} {} {}",
            self.provider.cyan(),
            format!("({}px)", self.height).dimmed(),
            target
        )
    }
}

impl Render for HeroTreatment {
    fn render(&self) -> String {
        match self {
            HeroTreatment::Slideshow(images) => {
                format!("slideshow of {} {}", images.len(), pluralize("image", images.len()))
            }
            HeroTreatment::StaticBackground(url) => format!("background {url}"),
            HeroTreatment::None => "none".dimmed().to_string(),
        }
    }
}

impl Render for AudioTrack {
    fn render(&self) -> String {
        let looped = if self.looped { ", looped" } else { "" };
        format!(
            "{} {}",
            self.src,
            format!("(volume {:.1}{looped})", self.volume).dimmed()
        )
    }
}

impl Render for DemoEntry {
    fn render(&self) -> String {
        let title = self.title.as_deref().unwrap_or("Untitled");
        match self.url.as_deref() {
            Some(url) => format!("{} {}", title.bold(), url.dimmed()),
            None => title.bold().to_string(),
        }
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn instant(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(instant) => instant.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "unknown".dimmed().to_string(),
    }
}

fn off() -> String {
    "off".dimmed().to_string()
}

/// How a document is interpreted, one feature per line.
pub fn render_preview(event: &LoadedEvent, page: &Page) -> String {
    let rows = [
        ("Date", or_unknown(&page.date)),
        ("Time", or_unknown(&page.time)),
        ("Starts", instant(event.datetime.start)),
        ("Ends", instant(event.datetime.end)),
        ("Venue", or_unknown(&page.venue_name)),
        (
            "Countdown",
            page.countdown
                .as_ref()
                .map_or_else(off, |countdown| countdown.initial.render()),
        ),
        (
            "Calendar",
            page.calendar_link.clone().unwrap_or_else(off),
        ),
        ("RSVP", page.rsvp.as_ref().map_or_else(off, Render::render)),
        ("Schedule", format!("{} {}", page.schedule.len(), pluralize("item", page.schedule.len()))),
        ("Hero", page.hero.render()),
        ("Music", page.audio.as_ref().map_or_else(off, Render::render)),
    ];

    let mut lines = vec![format!("📅 {}", page.document_title.bold())];
    lines.extend(
        rows.into_iter()
            .map(|(label, value)| format!("   {:<10} {}", label.dimmed(), value)),
    );
    lines.join("\n")
}

fn or_unknown(text: &str) -> String {
    if text.is_empty() {
        "unknown".dimmed().to_string()
    } else {
        text.to_string()
    }
}
