//! One-shot "document loaded" signal.

use std::sync::Arc;

use tokio::sync::watch;

use crate::datetime::{NormalizedDateTime, normalize};
use crate::document::EventDocument;
use crate::error::{InviteError, InviteResult};

/// An event document together with its normalized dates.
#[derive(Debug, Clone)]
pub struct LoadedEvent {
    pub document: EventDocument,
    pub datetime: NormalizedDateTime,
}

impl LoadedEvent {
    pub fn new(document: EventDocument) -> Self {
        let datetime = normalize(&document.datetime);
        LoadedEvent { document, datetime }
    }
}

/// Create the publishing half and a subscriber for a single document load.
pub fn document_channel() -> (DocumentPublisher, DocumentLoaded) {
    let (tx, rx) = watch::channel(None);
    (DocumentPublisher(tx), DocumentLoaded(rx))
}

/// Publishes the loaded document exactly once.
#[derive(Debug)]
pub struct DocumentPublisher(watch::Sender<Option<Arc<LoadedEvent>>>);

impl DocumentPublisher {
    /// Consumes the publisher: after loading, the document never changes.
    pub fn publish(self, event: LoadedEvent) {
        self.0.send_replace(Some(Arc::new(event)));
    }
}

/// Subscriber side; clone it for every timer that needs the document.
#[derive(Debug, Clone)]
pub struct DocumentLoaded(watch::Receiver<Option<Arc<LoadedEvent>>>);

impl DocumentLoaded {
    /// Wait for the document. Fails if the publisher went away without
    /// publishing anything.
    pub async fn wait(&mut self) -> InviteResult<Arc<LoadedEvent>> {
        let loaded = self
            .0
            .wait_for(Option::is_some)
            .await
            .map_err(|_| InviteError::NotLoaded)?;

        (*loaded).clone().ok_or(InviteError::NotLoaded)
    }
}
