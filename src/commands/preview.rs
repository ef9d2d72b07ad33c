use anyhow::Result;
use invite_core::page::{ProjectionContext, project};
use invite_core::timers::LoadedEvent;

use crate::fetch::{self, DocumentSource};
use crate::render::render_preview;
use crate::utils::tui::create_spinner;

pub async fn run(source: &str, locale: Option<&str>) -> Result<()> {
    let source = DocumentSource::parse(source);

    let spinner = create_spinner(format!("Loading {source}"));
    let loaded = fetch::load_document(&source).await;
    spinner.finish_and_clear();

    let event = LoadedEvent::new(loaded?);
    let ctx = ProjectionContext::now().with_locale(locale.map(str::to_string));
    let page = project(&event, &ctx);

    println!("{}", render_preview(&event, &page));
    Ok(())
}
