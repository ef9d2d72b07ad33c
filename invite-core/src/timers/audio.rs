use serde::Serialize;

use super::loaded::DocumentLoaded;
use crate::document::{Music, non_blank};
use crate::error::InviteResult;

pub const DEFAULT_VOLUME: f64 = 0.3;

/// Background music for the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioTrack {
    pub src: String,
    #[serde(rename = "loop")]
    pub looped: bool,
    /// 0.0 ..= 1.0
    pub volume: f64,
}

impl AudioTrack {
    /// Only when music is switched on and has something to play.
    pub fn from_music(music: &Music) -> Option<Self> {
        if music.enabled != Some(true) {
            return None;
        }
        let src = non_blank(music.audio_url.as_deref())?;

        Some(AudioTrack {
            src: src.trim().to_string(),
            looped: music.looped.unwrap_or(true),
            volume: music.volume.unwrap_or(DEFAULT_VOLUME).clamp(0.0, 1.0),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// The play/pause button.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioToggle {
    track: AudioTrack,
    state: PlaybackState,
}

impl AudioToggle {
    pub fn new(track: AudioTrack) -> Self {
        AudioToggle {
            track,
            state: PlaybackState::Paused,
        }
    }

    /// Wait for the document, then build the toggle if it has music.
    pub async fn when_loaded(mut loaded: DocumentLoaded) -> InviteResult<Option<Self>> {
        let event = loaded.wait().await?;
        Ok(AudioTrack::from_music(&event.document.music).map(AudioToggle::new))
    }

    pub fn toggle(&mut self) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        };
        self.state
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn track(&self) -> &AudioTrack {
        &self.track
    }
}
