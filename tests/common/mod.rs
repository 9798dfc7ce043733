#![allow(dead_code)]

use std::sync::Arc;

use inventory_viewer::{HttpInventoryClient, InMemoryDocument, ListSyncView, ViewerConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

/// A view wired to the real HTTP client, pointed at a mock backend.
pub struct TestViewer {
    pub server: MockServer,
    pub view: ListSyncView<InMemoryDocument>,
}

impl TestViewer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = ViewerConfig::new(server.uri());
        let client = HttpInventoryClient::new(&config).expect("client should build");
        let view = ListSyncView::new(Arc::new(client), InMemoryDocument::inventory_page());
        Self { server, view }
    }

    pub fn alerts(&self) -> &[String] {
        self.view.document().alerts()
    }

    /// Bodies of every request the mock backend received for `method` + `path`.
    pub async fn bodies_sent(&self, method: &str, path: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.method.as_str() == method && req.url.path() == path)
            .map(|req| req.body_json::<Value>().expect("request body should be JSON"))
            .collect()
    }
}

pub fn product(item_name: &str, quantity: i64) -> Value {
    json!({
        "item_name": item_name,
        "quantity": quantity,
        "unit_price": 4.5,
        "location": "Aisle 1",
        "manufacturer": "Acme",
        "stock_status": if quantity > 0 { "In Stock" } else { "Out of Stock" }
    })
}
