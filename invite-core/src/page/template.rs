use std::path::Path;

use minijinja::{AutoEscape, Environment, context};

use super::Page;
use crate::error::InviteResult;

const TEMPLATE_NAME: &str = "invite.html";
const BUILTIN_TEMPLATE: &str = include_str!("../../templates/invite.html");
/// Countdown, slideshow, audio and view-toggle behavior for the browser
const RUNTIME_JS: &str = include_str!("../../templates/invite.js");

/// Renders a [`Page`] to HTML.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Renderer using the built-in template.
    pub fn new() -> InviteResult<Self> {
        Self::from_source(BUILTIN_TEMPLATE.to_string())
    }

    /// Renderer using a template file. The file sees the same context as the
    /// built-in one: `page` and `runtime_js`.
    pub fn from_path(path: &Path) -> InviteResult<Self> {
        tracing::debug!(path = %path.display(), "Loading page template");
        let source = std::fs::read_to_string(path)?;
        Self::from_source(source)
    }

    pub fn from_source(source: String) -> InviteResult<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        env.add_template_owned(TEMPLATE_NAME, source)?;
        Ok(PageRenderer { env })
    }

    pub fn render(&self, page: &Page) -> InviteResult<String> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let html = template.render(context! {
            page => page,
            runtime_js => RUNTIME_JS,
        })?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fallback_page;

    #[test]
    fn renders_fallback_page() {
        let html = PageRenderer::new().unwrap().render(&fallback_page()).unwrap();

        assert!(html.contains("<title>You&#x27;re Invited</title>"));
        assert!(html.contains("Unable to load event details"));
        assert!(html.contains("Please check back later."));
        assert!(!html.contains("id=\"rsvp\""));
        assert!(!html.contains("id=\"countdown\""));
    }

    #[test]
    fn escapes_document_text() {
        let page = Page {
            title: "<script>alert(1)</script>".into(),
            ..fallback_page()
        };
        let html = PageRenderer::new().unwrap().render(&page).unwrap();

        assert!(html.contains("&lt;script&gt;alert(1)&lt;"));
        assert!(!html.contains("<script>alert(1)"));
    }

    #[test]
    fn custom_template_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.html");
        std::fs::write(&path, "<h1>{{ page.title }}</h1>").unwrap();

        let html = PageRenderer::from_path(&path)
            .unwrap()
            .render(&fallback_page())
            .unwrap();
        assert_eq!(html, "<h1>Unable to load event details</h1>");
    }

    #[test]
    fn broken_template_is_a_template_error() {
        let err = PageRenderer::from_source("{% if %}".into()).err().unwrap();
        assert!(matches!(err, crate::InviteError::Template(_)));
    }

    #[test]
    fn missing_template_file_is_io_error() {
        let err = PageRenderer::from_path(Path::new("/nonexistent/invite.html"))
            .err()
            .unwrap();
        assert!(matches!(err, crate::InviteError::Io(_)));
    }
}
