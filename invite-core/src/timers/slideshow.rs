use std::time::Duration;

use tokio::time::{Instant, interval_at};

use super::loaded::DocumentLoaded;
use crate::error::InviteResult;

pub const SLIDE_INTERVAL: Duration = Duration::from_secs(5);

/// Which hero image is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slideshow {
    len: usize,
    current: usize,
}

impl Slideshow {
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Slideshow { len, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Move to the next image, wrapping around after the last one.
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    /// A single image never moves, and reduced motion stops the rotation.
    pub fn is_animated(&self, reduced_motion: bool) -> bool {
        self.len > 1 && !reduced_motion
    }
}

/// Advance the hero slideshow every [`SLIDE_INTERVAL`] for as long as the
/// future is polled. Returns straight away when there is nothing to rotate.
pub async fn run_slideshow<F>(
    mut loaded: DocumentLoaded,
    reduced_motion: bool,
    mut on_advance: F,
) -> InviteResult<()>
where
    F: FnMut(usize),
{
    let event = loaded.wait().await?;

    let images = event
        .document
        .design
        .hero_images
        .iter()
        .filter(|url| !url.trim().is_empty())
        .count();
    let Some(mut slideshow) = Slideshow::new(images) else {
        return Ok(());
    };
    if !slideshow.is_animated(reduced_motion) {
        return Ok(());
    }

    let mut interval = interval_at(Instant::now() + SLIDE_INTERVAL, SLIDE_INTERVAL);
    loop {
        interval.tick().await;
        on_advance(slideshow.advance());
    }
}
