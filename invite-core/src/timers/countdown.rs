use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use super::loaded::{DocumentLoaded, LoadedEvent};
use crate::error::InviteResult;

pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Time left until the event, broken into display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Countdown {
    /// `None` once `target` is no longer in the future.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let remaining = target - now;
        if remaining <= TimeDelta::zero() {
            return None;
        }

        let total = remaining.num_seconds();
        Some(Countdown {
            days: total / 86_400,
            hours: ((total % 86_400) / 3_600) as u32,
            minutes: ((total % 3_600) / 60) as u32,
            seconds: (total % 60) as u32,
        })
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Remaining(Countdown),
    /// Nothing to count down to; the countdown container is hidden
    Hidden,
}

/// The instant to count down to, unless the countdown is switched off or the
/// date is unknown.
pub fn countdown_target(event: &LoadedEvent) -> Option<DateTime<Utc>> {
    if event.document.meta.countdown == Some(false) {
        return None;
    }
    event.datetime.start
}

/// Report the remaining time every second until the event starts, then
/// report `Hidden` once and stop.
pub async fn run_countdown<C, F>(
    mut loaded: DocumentLoaded,
    now: C,
    mut on_tick: F,
) -> InviteResult<()>
where
    C: Fn() -> DateTime<Utc>,
    F: FnMut(CountdownTick),
{
    let event = loaded.wait().await?;

    let Some(target) = countdown_target(&event) else {
        on_tick(CountdownTick::Hidden);
        return Ok(());
    };

    let mut interval = tokio::time::interval(COUNTDOWN_TICK);
    loop {
        interval.tick().await;

        match Countdown::until(target, now()) {
            Some(remaining) => on_tick(CountdownTick::Remaining(remaining)),
            None => {
                on_tick(CountdownTick::Hidden);
                return Ok(());
            }
        }
    }
}
