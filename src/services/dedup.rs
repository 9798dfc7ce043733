use std::collections::HashSet;

use serde_json::Value;
use tracing::{info, instrument};

use super::product_form::{refresh_error, PRODUCTS_PATH};
use super::ListSyncView;
use crate::document::Document;
use crate::errors::{BackendError, SubmitAction, ViewerError, ViewerResult};
use crate::resources::ResourceKind;

pub const REMOVE_DUPLICATES_PATH: &str = "/products/remove-duplicates";

/// Outcome of a successful dedup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupSummary {
    pub fetched: usize,
    pub kept: usize,
}

impl DedupSummary {
    pub fn removed(&self) -> usize {
        self.fetched - self.kept
    }
}

/// Uniqueness key of a fetched product record: the JSON text of its
/// `item_name`. `42` and `"42"` are different keys, as are a missing name
/// and `null`.
pub fn dedup_key(record: &Value) -> Option<String> {
    record.get("item_name").map(Value::to_string)
}

/// Keeps the first record for each `item_name`, preserving fetch order.
/// Records are passed through untouched.
pub fn dedup_by_item_name(records: Vec<Value>) -> Vec<Value> {
    let mut seen: HashSet<Option<String>> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(dedup_key(record)))
        .collect()
}

/// Splits a `GET /products` body into its records.
pub fn product_records(body: Value) -> Result<Vec<Value>, BackendError> {
    match body {
        Value::Array(records) => Ok(records),
        other => Err(BackendError::Decode {
            path: PRODUCTS_PATH.to_string(),
            message: format!("expected a list of products, got {}", other),
        }),
    }
}

/// Payload a dedup run would send for `records`.
pub fn dedup_payload(records: Vec<Value>) -> Value {
    Value::Array(dedup_by_item_name(records))
}

fn dedup_failed(source: BackendError) -> ViewerError {
    ViewerError::Submit {
        action: SubmitAction::RemoveDuplicates,
        source,
    }
}

impl<D: Document> ListSyncView<D> {
    /// Fetches all products, drops later duplicates by `item_name`, posts the
    /// surviving records exactly as fetched to the bulk-replace endpoint and
    /// re-syncs the products table.
    ///
    /// A failed fetch or post stops the run with one "Failed to remove
    /// duplicates." alert. If the replace succeeded but the refresh did not,
    /// the error is `Refresh` and the alert says so.
    #[instrument(skip(self))]
    pub async fn remove_duplicates(&mut self) -> ViewerResult<DedupSummary> {
        let records = match self
            .backend
            .get_json(PRODUCTS_PATH)
            .await
            .and_then(product_records)
        {
            Ok(records) => records,
            Err(source) => return self.fail(dedup_failed(source)),
        };

        let fetched = records.len();
        let payload = dedup_payload(records);
        let summary = DedupSummary {
            fetched,
            kept: payload.as_array().map_or(0, Vec::len),
        };

        if let Err(source) = self.backend.post_json(REMOVE_DUPLICATES_PATH, payload).await {
            return self.fail(dedup_failed(source));
        }
        info!(
            fetched = summary.fetched,
            kept = summary.kept,
            "Duplicate products replaced"
        );

        let rows = match self.fetch_rows(ResourceKind::Products).await {
            Ok(rows) => rows,
            Err(err) => return self.fail(refresh_error(SubmitAction::RemoveDuplicates, err)),
        };
        if let Err(err) = self.render_rows(ResourceKind::Products, rows) {
            return self.fail(err);
        }

        self.document
            .alert("Duplicate products removed successfully!");
        Ok(summary)
    }
}
