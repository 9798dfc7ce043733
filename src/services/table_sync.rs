use tracing::{info, instrument};

use super::ListSyncView;
use crate::document::{Document, TableRow};
use crate::errors::{BackendError, ViewerError, ViewerResult};
use crate::resources::ResourceKind;

impl<D: Document> ListSyncView<D> {
    /// Fetches `kind` and replaces its table body with one row per record.
    ///
    /// The body is only touched after the response parsed, so a failed fetch
    /// leaves the last good rows in place. Returns the number of rows now in
    /// the table.
    #[instrument(skip(self), fields(resource = %kind))]
    pub async fn sync(&mut self, kind: ResourceKind) -> ViewerResult<usize> {
        let rows = match self.fetch_rows(kind).await {
            Ok(rows) => rows,
            Err(err) => return self.fail(err),
        };
        match self.render_rows(kind, rows) {
            Ok(count) => Ok(count),
            Err(err) => self.fail(err),
        }
    }

    /// Page load: syncs every table in page order. One table failing does not
    /// stop the others.
    pub async fn load_page(&mut self) -> Vec<(ResourceKind, ViewerResult<usize>)> {
        let mut results = Vec::with_capacity(4);
        for kind in ResourceKind::all() {
            let result = self.sync(kind).await;
            results.push((kind, result));
        }
        results
    }

    /// GET and decode without touching the document or raising alerts.
    pub(crate) async fn fetch_rows(&self, kind: ResourceKind) -> ViewerResult<Vec<TableRow>> {
        let body = self
            .backend
            .get_json(kind.path())
            .await
            .map_err(|source| ViewerError::Fetch {
                resource: kind,
                source,
            })?;

        kind.decode_rows(body).map_err(|e| ViewerError::Fetch {
            resource: kind,
            source: BackendError::Decode {
                path: kind.path().to_string(),
                message: e.to_string(),
            },
        })
    }

    pub(crate) fn render_rows(&mut self, kind: ResourceKind, rows: Vec<TableRow>) -> ViewerResult<usize> {
        let body = self
            .document
            .table_body_mut(kind.table_id())
            .ok_or_else(|| ViewerError::MissingElement(format!("{} tbody", kind.table_id())))?;

        let count = rows.len();
        body.replace(rows);

        if count == 0 {
            info!("No {} found.", kind);
        } else {
            info!(rows = count, "Rendered {}", kind);
        }
        Ok(count)
    }
}
