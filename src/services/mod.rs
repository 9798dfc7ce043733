//! Controllers that keep the page's tables in step with the backend.

pub mod dedup;
pub mod product_form;
pub mod table_sync;

pub use dedup::{dedup_by_item_name, DedupSummary};
pub use product_form::ProductFormValues;

use std::sync::Arc;

use tracing::error;

use crate::client::InventoryBackend;
use crate::document::Document;
use crate::errors::{ViewerError, ViewerResult};

/// UI controller for the inventory page.
///
/// Owns the document it renders into and talks to the backend through an
/// [`InventoryBackend`]. Every operation catches its own failure, logs it,
/// raises exactly one alert, and then hands the error back for inspection.
pub struct ListSyncView<D: Document> {
    backend: Arc<dyn InventoryBackend>,
    document: D,
}

impl<D: Document> ListSyncView<D> {
    pub fn new(backend: Arc<dyn InventoryBackend>, document: D) -> Self {
        Self { backend, document }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    /// Logs `err`, shows its alert, and returns it.
    fn fail<T>(&mut self, err: ViewerError) -> ViewerResult<T> {
        error!(error = %err, "operation failed");
        self.document.alert(&err.alert_message());
        Err(err)
    }
}
