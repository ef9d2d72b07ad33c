use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local};
use dialoguer::{Confirm, Input};
use invite_core::builder::{BuilderForm, ScheduleRow, build_document};
use invite_core::datetime::parse_loose_date;
use owo_colors::OwoColorize;

pub fn run(form: Option<PathBuf>, interactive: bool, out: Option<PathBuf>) -> Result<()> {
    let form = match form {
        Some(path) => read_form(&path)?,
        None if interactive => prompt_form()?,
        None => bail!(
            "Nothing to build from.\n\n\
            Pass a form file:\n  \
            invite build --form event.toml\n\n\
            Or answer the questions:\n  \
            invite build --interactive"
        ),
    };

    let doc = build_document(&form, Local::now().year());
    let json = doc.to_pretty_json()?;

    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote event document to {}", path.display().green());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// JSON when the extension says so, TOML otherwise.
fn read_form(path: &Path) -> Result<BuilderForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    } else {
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

fn prompt_form() -> Result<BuilderForm> {
    println!("{}", "Event".bold());
    let title = text("Title")?;
    let subtitle = text("Subtitle (skip)")?;
    let description = text("Description (skip)")?;
    let date = prompt_date()?;
    let start_time = text("Start time, e.g. 18:30 (skip)")?;
    let end_time = text("End time (skip)")?;

    println!("{}", "Venue".bold());
    let venue_name = text("Name (skip)")?;
    let venue_address = text("Address (skip)")?;
    let maps_link = text("Maps link (skip)")?;

    println!("{}", "Schedule".bold());
    let schedule = prompt_schedule()?;

    println!("{}", "RSVP".bold());
    let rsvp_enabled = confirm("Collect RSVPs?", true)?;
    let rsvp_url = if rsvp_enabled { text("Form url")? } else { String::new() };

    println!("{}", "Design".bold());
    let accent_color = text("Accent color, e.g. #6c5ce7 (skip)")?;
    let hero_images = list("Hero image urls, comma separated (skip)")?;
    let section_backgrounds = list("Section background urls, comma separated (skip)")?;

    println!("{}", "Music".bold());
    let music_enabled = confirm("Play background music?", false)?;
    let (music_audio_url, music_loop, music_volume) = if music_enabled {
        let url = text("Audio url")?;
        let looped = confirm("Loop?", true)?;
        let volume = text("Volume 0-1 (0.3)")?.trim().parse::<f64>().ok();
        (url, looped, volume)
    } else {
        (String::new(), false, None)
    };

    println!("{}", "Footer".bold());
    let footer_text = text("Footer text (skip)")?;
    let logo_url = text("Logo url (skip)")?;
    let author_name = text("Your name")?;
    let simple_mode = confirm("Start in simple view?", false)?;
    let show_simple_mode_toggle = confirm("Show the simple view toggle?", true)?;

    Ok(BuilderForm {
        title,
        subtitle,
        description,
        date,
        start_time,
        end_time,
        venue_name,
        venue_address,
        maps_link,
        schedule,
        rsvp_enabled,
        rsvp_url,
        accent_color,
        hero_images,
        section_backgrounds,
        music_enabled,
        music_loop,
        music_volume,
        music_audio_url,
        footer_text,
        logo_url,
        author_name,
        simple_mode,
        show_simple_mode_toggle,
    })
}

fn text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(format!("  {prompt}"))
        .default(String::new())
        .show_default(false)
        .interact_text()?)
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("  {prompt}"))
        .default(default)
        .interact()?)
}

fn list(prompt: &str) -> Result<Vec<String>> {
    Ok(split_list(&text(prompt)?))
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Unreadable dates are allowed (they are kept as typed) but flagged.
fn prompt_date() -> Result<String> {
    let date = text("Date, e.g. 2025-06-01")?;
    if !date.trim().is_empty() && parse_loose_date(&date).is_none() {
        eprintln!(
            "  {}",
            "That date can't be read; the countdown and calendar link will be hidden".yellow()
        );
    }
    Ok(date)
}

fn prompt_schedule() -> Result<Vec<ScheduleRow>> {
    let mut rows = Vec::new();
    loop {
        let time = text("Time (blank to finish)")?;
        if time.trim().is_empty() {
            return Ok(rows);
        }
        let label = text("What happens")?;
        rows.push(ScheduleRow { time, label });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_toml_and_json_forms() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("form.toml");
        std::fs::write(&toml_path, "title = \"Picnic\"\nmusicVolume = 0.5\n").unwrap();
        let form = read_form(&toml_path).unwrap();
        assert_eq!(form.title, "Picnic");
        assert_eq!(form.music_volume, Some(0.5));

        let json_path = dir.path().join("form.JSON");
        std::fs::write(&json_path, r#"{"title": "Picnic", "rsvpEnabled": true}"#).unwrap();
        let form = read_form(&json_path).unwrap();
        assert!(form.rsvp_enabled);
    }

    #[test]
    fn malformed_form_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.toml");
        std::fs::write(&path, "title = ").unwrap();

        let err = read_form(&path).unwrap_err();
        assert!(err.to_string().contains("form.toml"));
    }

    #[test]
    fn writes_document_file() {
        let dir = tempfile::tempdir().unwrap();
        let form = dir.path().join("form.toml");
        std::fs::write(&form, "title = \"Picnic\"\ndate = \"June 1, 2025\"\n").unwrap();
        let out = dir.path().join("event.json");

        run(Some(form), false, Some(out.clone())).unwrap();

        let json = std::fs::read_to_string(out).unwrap();
        assert!(json.contains("\"date\": \"2025-06-01\""));
        assert!(json.contains("\"_meta_comment\": \"TEMPLATE CONFIGURATION\""));
    }

    #[test]
    fn requires_a_source() {
        assert!(run(None, false, None).is_err());
    }

    #[test]
    fn splits_lists() {
        assert_eq!(split_list(" a.jpg, ,b.jpg "), vec!["a.jpg", "b.jpg"]);
        assert!(split_list("").is_empty());
    }
}
