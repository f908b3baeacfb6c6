//! Delivery of preview conversions where a newer request supersedes older ones.

use crate::convert::RenderOptions;
use crate::registry::FormatBundle;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// A completed conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    /// Ticket of the request, `0` before the first conversion.
    pub ticket: u64,
    pub html: String,
}

/// Publishes the newest completed preview to subscribers.
#[derive(Debug)]
pub struct PreviewChannel {
    next_ticket: AtomicU64,
    tx: watch::Sender<Preview>,
}

impl Default for PreviewChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewChannel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Preview::default());
        Self {
            next_ticket: AtomicU64::new(0),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Preview> {
        self.tx.subscribe()
    }

    /// The newest published preview.
    pub fn latest(&self) -> Preview {
        self.tx.borrow().clone()
    }

    /// Ticket for a new conversion request, greater than all earlier ones.
    pub fn begin(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publishes `html` unless a newer ticket was published already.
    ///
    /// Returns whether it was published.
    pub fn complete(&self, ticket: u64, html: String) -> bool {
        let published = self.tx.send_if_modified(|current| {
            if ticket > current.ticket {
                *current = Preview { ticket, html };
                true
            } else {
                false
            }
        });

        if !published {
            tracing::debug!(ticket, latest = self.tx.borrow().ticket, "Dropping superseded preview");
        }

        published
    }

    /// Converts `text` on the blocking pool and publishes the result.
    pub async fn render(
        &self,
        bundle: Arc<FormatBundle>,
        text: String,
        options: RenderOptions,
    ) -> bool {
        let ticket = self.begin();

        match tokio::task::spawn_blocking(move || bundle.convert(&text, &options)).await {
            Ok(html) => self.complete(ticket, html),
            Err(err) => {
                tracing::error!(ticket, ?err, "Preview conversion failed");
                false
            }
        }
    }
}
