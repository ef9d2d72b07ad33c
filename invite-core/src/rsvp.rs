//! RSVP form providers and embed descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::{RsvpSection, non_blank};

/// Script that renders Tally embeds once it has loaded
pub const TALLY_EMBED_SCRIPT: &str = "https://tally.so/widgets/embed.js";

const EMBEDDED_FLAG: &str = "embedded=true";

/// The form service an RSVP url belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpProvider {
    Tally,
    Google,
    Microsoft,
    Typeform,
    Jotform,
    /// Any other url, shown in a plain frame
    Iframe,
}

/// Url signatures checked in order; the first match wins.
const PROVIDER_SIGNATURES: [(&str, RsvpProvider); 5] = [
    ("tally.so", RsvpProvider::Tally),
    ("docs.google.com/forms", RsvpProvider::Google),
    ("forms.office.com", RsvpProvider::Microsoft),
    ("typeform.com", RsvpProvider::Typeform),
    ("jotform.com", RsvpProvider::Jotform),
];

impl RsvpProvider {
    pub fn detect(url: &str) -> Self {
        PROVIDER_SIGNATURES
            .iter()
            .find(|(signature, _)| url.contains(signature))
            .map(|(_, provider)| *provider)
            .unwrap_or(RsvpProvider::Iframe)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tally" => Some(RsvpProvider::Tally),
            "google" => Some(RsvpProvider::Google),
            "microsoft" => Some(RsvpProvider::Microsoft),
            "typeform" => Some(RsvpProvider::Typeform),
            "jotform" => Some(RsvpProvider::Jotform),
            "iframe" => Some(RsvpProvider::Iframe),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RsvpProvider::Tally => "tally",
            RsvpProvider::Google => "google",
            RsvpProvider::Microsoft => "microsoft",
            RsvpProvider::Typeform => "typeform",
            RsvpProvider::Jotform => "jotform",
            RsvpProvider::Iframe => "iframe",
        }
    }

    /// Embed height in pixels when the document doesn't give one
    pub fn default_height(&self) -> u32 {
        match self {
            RsvpProvider::Tally => 580,
            RsvpProvider::Google | RsvpProvider::Microsoft => 800,
            RsvpProvider::Typeform | RsvpProvider::Jotform => 650,
            RsvpProvider::Iframe => 600,
        }
    }
}

impl fmt::Display for RsvpProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to embed an RSVP form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsvpEmbed {
    pub provider: RsvpProvider,
    /// The url as written in the document
    pub url: String,
    pub height: u32,
}

impl RsvpEmbed {
    /// `provider` other than `"auto"` is taken as given; otherwise it is
    /// detected from the url. A positive `height` beats the provider default.
    pub fn resolve(url: &str, provider: Option<&str>, height: Option<u32>) -> Self {
        let provider = match non_blank(provider).map(str::trim) {
            None | Some("auto") => RsvpProvider::detect(url),
            Some(name) => RsvpProvider::from_name(name).unwrap_or_else(|| {
                tracing::debug!(provider = name, "Unrecognised RSVP provider, embedding as a plain frame");
                RsvpProvider::Iframe
            }),
        };

        RsvpEmbed {
            provider,
            url: url.to_string(),
            height: height
                .filter(|h| *h > 0)
                .unwrap_or_else(|| provider.default_height()),
        }
    }

    /// Frame `src`, or `None` when rendering is deferred to the provider's
    /// own embed script (see `deferred_src`).
    pub fn frame_src(&self) -> Option<String> {
        match self.provider {
            RsvpProvider::Tally => None,
            RsvpProvider::Google => Some(with_embedded_flag(&self.url)),
            _ => Some(self.url.clone()),
        }
    }

    /// Url handed to a deferred embed script through `data-tally-src`.
    pub fn deferred_src(&self) -> Option<&str> {
        match self.provider {
            RsvpProvider::Tally => Some(&self.url),
            _ => None,
        }
    }

    /// Third-party script the page must load for this embed.
    pub fn required_script(&self) -> Option<&'static str> {
        match self.provider {
            RsvpProvider::Tally => Some(TALLY_EMBED_SCRIPT),
            _ => None,
        }
    }
}

/// The embed for a document's RSVP section, or `None` when the section should
/// be left out of the page.
pub fn resolve_rsvp(section: &RsvpSection) -> Option<RsvpEmbed> {
    if section.enabled == Some(false) {
        return None;
    }

    let Some(url) = non_blank(section.url.as_deref()) else {
        if is_configured(section) {
            tracing::warn!("RSVP enabled but no url provided; leaving the RSVP section out");
        }
        return None;
    };

    Some(RsvpEmbed::resolve(
        url.trim(),
        section.provider.as_deref(),
        section.height,
    ))
}

/// Whether the document carries an RSVP section at all.
fn is_configured(section: &RsvpSection) -> bool {
    *section != RsvpSection::default()
}

fn with_embedded_flag(url: &str) -> String {
    if url.contains(EMBEDDED_FLAG) {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{EMBEDDED_FLAG}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_provider() {
        let cases = [
            ("https://tally.so/r/abc", RsvpProvider::Tally),
            ("https://docs.google.com/forms/d/e/xyz/viewform", RsvpProvider::Google),
            ("https://forms.office.com/r/abc", RsvpProvider::Microsoft),
            ("https://acme.typeform.com/to/abc", RsvpProvider::Typeform),
            ("https://form.jotform.com/123", RsvpProvider::Jotform),
            ("https://example.com/rsvp", RsvpProvider::Iframe),
            ("", RsvpProvider::Iframe),
        ];

        for (url, expected) in cases {
            assert_eq!(RsvpProvider::detect(url), expected, "{url}");
        }
    }

    #[test]
    fn first_signature_wins() {
        // A Google form that links out to Tally is still classified as Tally
        let url = "https://docs.google.com/forms/x?next=tally.so";
        assert_eq!(RsvpProvider::detect(url), RsvpProvider::Tally);
    }

    #[test]
    fn typeform_without_explicit_provider() {
        let embed = RsvpEmbed::resolve("https://acme.typeform.com/to/abc", None, None);
        assert_eq!(embed.provider, RsvpProvider::Typeform);
        assert_eq!(embed.height, 650);
        assert_eq!(embed.frame_src().as_deref(), Some("https://acme.typeform.com/to/abc"));
    }

    #[test]
    fn google_forms_gain_embedded_flag() {
        let embed = RsvpEmbed::resolve("https://docs.google.com/forms/x", Some("auto"), None);
        assert_eq!(embed.provider, RsvpProvider::Google);
        assert_eq!(embed.height, 800);
        assert_eq!(
            embed.frame_src().as_deref(),
            Some("https://docs.google.com/forms/x?embedded=true")
        );

        let with_query = RsvpEmbed::resolve("https://docs.google.com/forms/x?usp=sf", None, None);
        assert_eq!(
            with_query.frame_src().as_deref(),
            Some("https://docs.google.com/forms/x?usp=sf&embedded=true")
        );

        let already = RsvpEmbed::resolve("https://docs.google.com/forms/x?embedded=true", None, None);
        assert_eq!(
            already.frame_src().as_deref(),
            Some("https://docs.google.com/forms/x?embedded=true")
        );
    }

    #[test]
    fn tally_is_deferred_to_its_script() {
        let embed = RsvpEmbed::resolve("https://tally.so/r/abc", None, None);
        assert_eq!(embed.frame_src(), None);
        assert_eq!(embed.deferred_src(), Some("https://tally.so/r/abc"));
        assert_eq!(embed.required_script(), Some(TALLY_EMBED_SCRIPT));
        assert_eq!(embed.height, 580);
    }

    #[test]
    fn explicit_provider_is_used_verbatim() {
        let embed = RsvpEmbed::resolve("https://acme.typeform.com/to/abc", Some("jotform"), None);
        assert_eq!(embed.provider, RsvpProvider::Jotform);

        let unknown = RsvpEmbed::resolve("https://tally.so/r/abc", Some("custom"), None);
        assert_eq!(unknown.provider, RsvpProvider::Iframe);
        assert_eq!(unknown.height, 600);
    }

    #[test]
    fn explicit_height_overrides_default() {
        let embed = RsvpEmbed::resolve("https://tally.so/r/abc", None, Some(900));
        assert_eq!(embed.height, 900);
    }

    #[test]
    fn disabled_or_urlless_rsvp_is_omitted() {
        let disabled = RsvpSection {
            enabled: Some(false),
            url: Some("https://tally.so/r/abc".into()),
            ..Default::default()
        };
        assert!(resolve_rsvp(&disabled).is_none());

        let no_url = RsvpSection {
            enabled: Some(true),
            url: Some("  ".into()),
            ..Default::default()
        };
        assert!(resolve_rsvp(&no_url).is_none());
        assert!(resolve_rsvp(&RsvpSection::default()).is_none());
    }

    #[test_log::test]
    fn urlless_section_without_enabled_flag_is_omitted() {
        let section = RsvpSection {
            provider: Some("tally".into()),
            ..Default::default()
        };
        assert!(is_configured(&section));
        assert!(resolve_rsvp(&section).is_none());

        assert!(!is_configured(&RsvpSection::default()));
    }

    #[test]
    fn rsvp_is_enabled_unless_switched_off() {
        let section = RsvpSection {
            url: Some("https://example.com/rsvp".into()),
            ..Default::default()
        };
        let embed = resolve_rsvp(&section).unwrap();
        assert_eq!(embed.provider, RsvpProvider::Iframe);
    }
}
