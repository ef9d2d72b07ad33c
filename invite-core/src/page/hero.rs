//! Hero image treatment and per-section backgrounds.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::document::{Design, non_blank};

/// How the hero section is decorated. Hero images win over the legacy
/// background list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HeroTreatment {
    Slideshow(Vec<String>),
    StaticBackground(String),
    #[default]
    None,
}

impl HeroTreatment {
    pub fn select(design: &Design) -> Self {
        let images: Vec<String> = design
            .hero_images
            .iter()
            .filter_map(|url| non_blank(Some(url.as_str())))
            .map(str::to_string)
            .collect();

        if !images.is_empty() {
            return HeroTreatment::Slideshow(images);
        }

        match design.backgrounds.first().and_then(|url| non_blank(Some(url.as_str()))) {
            Some(url) => HeroTreatment::StaticBackground(url.to_string()),
            None => HeroTreatment::None,
        }
    }

    pub fn has_hero_images(&self) -> bool {
        matches!(self, HeroTreatment::Slideshow(_))
    }
}

/// Sections of the page in document order; backgrounds are assigned by
/// position in this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSection {
    Hero,
    Details,
    Schedule,
    Rsvp,
    Footer,
}

impl PageSection {
    pub fn id(&self) -> &'static str {
        match self {
            PageSection::Hero => "hero",
            PageSection::Details => "details",
            PageSection::Schedule => "schedule-section",
            PageSection::Rsvp => "rsvp",
            PageSection::Footer => "footer",
        }
    }

    /// The RSVP section is removed from the page entirely when there is no
    /// form, which shifts the positions of everything after it.
    pub fn layout(has_rsvp: bool) -> Vec<PageSection> {
        let mut sections = vec![PageSection::Hero, PageSection::Details, PageSection::Schedule];
        if has_rsvp {
            sections.push(PageSection::Rsvp);
        }
        sections.push(PageSection::Footer);
        sections
    }
}

/// Background image per section id.
///
/// `sectionBackgrounds[i]` decorates section `i + 1` (the hero has its own
/// treatment). Without it, the legacy `backgrounds[i]` decorates section `i`,
/// except section 0 when hero images already occupy it.
pub fn section_backgrounds(
    design: &Design,
    sections: &[PageSection],
    hero: &HeroTreatment,
) -> BTreeMap<&'static str, String> {
    let mut backgrounds = BTreeMap::new();

    if let (HeroTreatment::StaticBackground(url), Some(first)) = (hero, sections.first()) {
        backgrounds.insert(first.id(), url.clone());
    }

    let (list, offset) = if design.section_backgrounds.is_empty() {
        (&design.backgrounds, 0)
    } else {
        (&design.section_backgrounds, 1)
    };

    for (i, url) in list.iter().enumerate() {
        let index = i + offset;
        if index == 0 && hero.has_hero_images() {
            continue;
        }
        let (Some(section), Some(url)) = (sections.get(index), non_blank(Some(url.as_str()))) else {
            continue;
        };
        backgrounds.insert(section.id(), url.to_string());
    }

    backgrounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(hero: &[&str], section: &[&str], legacy: &[&str]) -> Design {
        let owned = |urls: &[&str]| -> Vec<String> { urls.iter().map(|u| u.to_string()).collect() };
        Design {
            hero_images: owned(hero),
            section_backgrounds: owned(section),
            backgrounds: owned(legacy),
            ..Default::default()
        }
    }

    #[test]
    fn hero_images_take_precedence() {
        let d = design(&["a.jpg", "b.jpg"], &[], &["bg0.jpg"]);
        assert_eq!(
            HeroTreatment::select(&d),
            HeroTreatment::Slideshow(vec!["a.jpg".into(), "b.jpg".into()])
        );
    }

    #[test]
    fn legacy_background_is_static_hero() {
        let d = design(&["", " "], &[], &["bg0.jpg", "bg1.jpg"]);
        assert_eq!(
            HeroTreatment::select(&d),
            HeroTreatment::StaticBackground("bg0.jpg".into())
        );
        assert_eq!(HeroTreatment::select(&Design::default()), HeroTreatment::None);
    }

    #[test]
    fn section_backgrounds_start_after_the_hero() {
        let d = design(&["a.jpg"], &["s1.jpg", "s2.jpg", "s3.jpg", "s4.jpg", "s5.jpg"], &[]);
        let hero = HeroTreatment::select(&d);
        let sections = PageSection::layout(false);

        let backgrounds = section_backgrounds(&d, &sections, &hero);
        assert_eq!(backgrounds.get("hero"), None);
        assert_eq!(backgrounds.get("details").map(String::as_str), Some("s1.jpg"));
        assert_eq!(backgrounds.get("schedule-section").map(String::as_str), Some("s2.jpg"));
        assert_eq!(backgrounds.get("footer").map(String::as_str), Some("s3.jpg"));
        assert_eq!(backgrounds.len(), 3);
    }

    #[test]
    fn legacy_backgrounds_skip_hero_when_images_present() {
        let d = design(&["a.jpg"], &[], &["bg0.jpg", "bg1.jpg"]);
        let hero = HeroTreatment::select(&d);

        let backgrounds = section_backgrounds(&d, &PageSection::layout(true), &hero);
        assert_eq!(backgrounds.get("hero"), None);
        assert_eq!(backgrounds.get("details").map(String::as_str), Some("bg1.jpg"));
    }

    #[test]
    fn legacy_backgrounds_fill_from_the_hero() {
        let d = design(&[], &[], &["bg0.jpg", "bg1.jpg"]);
        let hero = HeroTreatment::select(&d);

        let backgrounds = section_backgrounds(&d, &PageSection::layout(true), &hero);
        assert_eq!(backgrounds.get("hero").map(String::as_str), Some("bg0.jpg"));
        assert_eq!(backgrounds.get("details").map(String::as_str), Some("bg1.jpg"));
    }

    #[test]
    fn rsvp_shifts_section_positions() {
        assert_eq!(PageSection::layout(true)[3], PageSection::Rsvp);
        assert_eq!(PageSection::layout(false)[3], PageSection::Footer);
    }
}
