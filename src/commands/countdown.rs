use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use invite_core::timers::{CountdownTick, LoadedEvent, document_channel, run_countdown};
use owo_colors::OwoColorize;

use crate::fetch::{self, DocumentSource};
use crate::render::Render;

/// Load the document in the background and count down once it arrives.
pub async fn run(source: &str) -> Result<()> {
    let source = DocumentSource::parse(source);
    let (publisher, loaded) = document_channel();

    let loader = tokio::spawn(async move {
        let doc = fetch::load_document(&source).await?;
        publisher.publish(LoadedEvent::new(doc));
        anyhow::Ok(())
    });

    let mut ticked = false;
    let countdown = run_countdown(loaded, Utc::now, |tick| match tick {
        CountdownTick::Remaining(remaining) => {
            ticked = true;
            if let Err(e) = write_remaining(&mut std::io::stdout(), &remaining.render()) {
                tracing::debug!(error = %e, "Failed to write countdown line");
            }
        }
        CountdownTick::Hidden if ticked => println!("\n   {}", "The event has started!".green()),
        CountdownTick::Hidden => println!("{}", "No upcoming event to count down to".dimmed()),
    });

    let (load_result, countdown_result) = tokio::join!(loader, countdown);
    load_result??;
    countdown_result?;

    Ok(())
}

/// Overwrite the current terminal line with the remaining time.
fn write_remaining(out: &mut impl Write, line: &str) -> std::io::Result<()> {
    write!(out, "\r   {line}   ")?;
    out.flush()
}
