//! Live page behaviors: countdown, hero slideshow and background audio.
//!
//! Each one is an independent state machine driven off the loaded event. The
//! async drivers wait on the one-shot [`DocumentLoaded`] signal instead of
//! polling for the document.

mod audio;
mod countdown;
mod loaded;
mod slideshow;

pub use audio::{AudioToggle, AudioTrack, PlaybackState, DEFAULT_VOLUME};
pub use countdown::{Countdown, CountdownTick, COUNTDOWN_TICK, countdown_target, run_countdown};
pub use loaded::{DocumentLoaded, DocumentPublisher, LoadedEvent, document_channel};
pub use slideshow::{SLIDE_INTERVAL, Slideshow, run_slideshow};
