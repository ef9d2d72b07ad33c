use std::path::PathBuf;

use anyhow::{Context, Result};
use invite_core::page::{PageRenderer, ProjectionContext, fallback_page, project_document};
use owo_colors::OwoColorize;

use crate::fetch::{self, DocumentSource};
use crate::utils::tui::create_spinner;

pub struct RenderOptions {
    pub data: String,
    pub template: Option<PathBuf>,
    pub out: PathBuf,
    pub locale: Option<String>,
    pub open: bool,
}

pub async fn run(options: RenderOptions) -> Result<()> {
    let source = DocumentSource::parse(&options.data);

    let spinner = create_spinner(format!("Loading {source}"));
    let loaded = fetch::load_document(&source).await;
    spinner.finish_and_clear();

    let ctx = ProjectionContext::now().with_locale(options.locale);
    let page = match loaded {
        Ok(doc) => project_document(doc, &ctx),
        Err(e) => {
            tracing::warn!(error = %e, "Rendering fallback page");
            eprintln!(
                "{} {}",
                "Could not load event details:".yellow(),
                format!("{e:#}").yellow()
            );
            fallback_page()
        }
    };

    let renderer = match &options.template {
        Some(path) => PageRenderer::from_path(path)
            .with_context(|| format!("Failed to load template {}", path.display()))?,
        None => PageRenderer::new()?,
    };
    let html = renderer.render(&page).context("Failed to render page")?;

    if let Some(parent) = options.out.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    tokio::fs::write(&options.out, html)
        .await
        .with_context(|| format!("Failed to write {}", options.out.display()))?;

    println!(
        "Rendered {} to {}",
        page.document_title.bold(),
        options.out.display().green()
    );

    if options.open && open::that(&options.out).is_err() {
        println!("Open {} in your browser to view it.", options.out.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(data: PathBuf, out: PathBuf) -> RenderOptions {
        RenderOptions {
            data: data.to_string_lossy().into_owned(),
            template: None,
            out,
            locale: None,
            open: false,
        }
    }

    #[tokio::test]
    async fn writes_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("event.json");
        std::fs::write(&data, r#"{"event": {"title": "Picnic"}}"#).unwrap();
        let out = dir.path().join("dist/index.html");

        run(options(data, out.clone())).await.unwrap();

        let html = std::fs::read_to_string(out).unwrap();
        assert!(html.contains("<title>Picnic</title>"));
    }

    #[tokio::test]
    async fn unreadable_document_still_writes_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("index.html");

        run(options(dir.path().join("missing.json"), out.clone()))
            .await
            .unwrap();

        let html = std::fs::read_to_string(out).unwrap();
        assert!(html.contains("Unable to load event details"));
    }
}
