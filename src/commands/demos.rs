use anyhow::Result;
use owo_colors::OwoColorize;

use crate::fetch;
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn run(url: &str) -> Result<()> {
    let spinner = create_spinner("Fetching demos".to_string());
    let demos = fetch::fetch_demos(url).await;
    spinner.finish_and_clear();

    if demos.is_empty() {
        println!("{}", "No demos available".dimmed());
        return Ok(());
    }

    for demo in &demos {
        println!("   {}", demo.render());
    }

    Ok(())
}
