use tokio::sync::mpsc;
use tracing::{error, info};

use crate::document::Document;
use crate::errors::ViewerResult;
use crate::resources::ResourceKind;
use crate::services::{ListSyncView, ProductFormValues};

/// Things the user (or the page lifecycle) can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Page finished loading: populate every table.
    PageLoaded,
    /// Submit of `add-product-form`, carrying the values typed into it.
    ProductFormSubmitted(ProductFormValues),
    /// Click on `remove-duplicates-btn`.
    RemoveDuplicatesClicked,
    /// Re-sync a single table.
    RefreshRequested(ResourceKind),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<UiEvent>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: UiEvent) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Invokes the handler for `event`.
pub async fn dispatch<D: Document>(view: &mut ListSyncView<D>, event: UiEvent) -> ViewerResult<()> {
    match event {
        UiEvent::PageLoaded => {
            let mut first_error = None;
            for (_, result) in view.load_page().await {
                if let Err(err) = result {
                    first_error.get_or_insert(err);
                }
            }
            first_error.map_or(Ok(()), Err)
        }
        UiEvent::ProductFormSubmitted(values) => view.submit_product(values).await,
        UiEvent::RemoveDuplicatesClicked => view.remove_duplicates().await.map(|_| ()),
        UiEvent::RefreshRequested(kind) => view.sync(kind).await.map(|_| ()),
    }
}

/// Counts from a finished event loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventLoopSummary {
    pub handled: usize,
    pub failed: usize,
}

/// Handles events one at a time until every sender is dropped.
///
/// Failures have already been alerted by the handlers; here they are only
/// logged and counted.
pub async fn process_events<D: Document>(
    mut rx: mpsc::Receiver<UiEvent>,
    view: &mut ListSyncView<D>,
) -> EventLoopSummary {
    info!("Starting event processing loop");
    let mut summary = EventLoopSummary::default();

    while let Some(event) = rx.recv().await {
        info!("Received event: {:?}", event);
        summary.handled += 1;
        if let Err(e) = dispatch(view, event).await {
            summary.failed += 1;
            error!("Failed to handle event: {}", e);
        }
    }

    info!(
        handled = summary.handled,
        failed = summary.failed,
        "Event processing loop finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockInventoryBackend;
    use crate::document::InMemoryDocument;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn events_are_handled_in_order() {
        let mut backend = MockInventoryBackend::new();
        backend.expect_get_json().returning(|_| Ok(json!([])));
        let mut view = ListSyncView::new(Arc::new(backend), InMemoryDocument::inventory_page());

        let (tx, rx) = mpsc::channel(8);
        let sender = EventSender::new(tx);
        sender.send(UiEvent::PageLoaded).await.unwrap();
        sender
            .send(UiEvent::RefreshRequested(ResourceKind::Vendors))
            .await
            .unwrap();
        drop(sender);

        let summary = process_events(rx, &mut view).await;
        assert_eq!(
            summary,
            EventLoopSummary {
                handled: 2,
                failed: 0
            }
        );
        assert!(view.document().alerts().is_empty());
    }

    #[tokio::test]
    async fn failures_are_counted_not_propagated() {
        let mut backend = MockInventoryBackend::new();
        backend.expect_post_json().never();
        let mut view = ListSyncView::new(Arc::new(backend), InMemoryDocument::inventory_page());

        let (tx, rx) = mpsc::channel(8);
        tx.send(UiEvent::ProductFormSubmitted(ProductFormValues {
            item_name: "Gadget".into(),
            quantity: "lots".into(),
            unit_price: "1".into(),
            ..ProductFormValues::default()
        }))
        .await
        .unwrap();
        drop(tx);

        let summary = process_events(rx, &mut view).await;
        assert_eq!(summary.failed, 1);
        assert_eq!(view.document().alerts().len(), 1);
    }
}
