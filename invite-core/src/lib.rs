//! Core types for the invite ecosystem.
//!
//! This crate turns a loosely-typed event document into a rendered
//! invitation page, and produces that document from builder form fields:
//! - `document` for the event document model and its lenient parsing
//! - `datetime`, `calendar_link` and `rsvp` for normalization
//! - `page` for projection onto the page view model and HTML rendering
//! - `timers` for the countdown, slideshow and audio behaviors
//! - `builder` for form fields → document

pub mod builder;
pub mod calendar_link;
pub mod config;
pub mod constants;
pub mod datetime;
pub mod demos;
pub mod document;
pub mod error;
mod lenient;
pub mod page;
pub mod rsvp;
pub mod sanitize;
pub mod timers;

pub use document::EventDocument;
pub use error::{InviteError, InviteResult};
