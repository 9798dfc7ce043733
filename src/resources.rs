//! The four backend collections the viewer knows how to display.

use serde_json::Value;
use strum::{EnumIter, IntoEnumIterator};

use crate::models::{Product, PurchaseOrder, Shipment, TableRecord, Vendor};

/// One backend-managed entity collection and the table it is rendered into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display, strum::EnumString,
)]
pub enum ResourceKind {
    #[strum(to_string = "products", serialize = "products")]
    Products,
    #[strum(to_string = "vendors", serialize = "vendors")]
    Vendors,
    #[strum(to_string = "purchase orders", serialize = "purchase-orders")]
    PurchaseOrders,
    #[strum(to_string = "shipments", serialize = "shipments")]
    Shipments,
}

impl ResourceKind {
    /// Every resource, in page order.
    pub fn all() -> Vec<ResourceKind> {
        ResourceKind::iter().collect()
    }

    /// Collection path relative to the backend base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Products => "/products",
            Self::Vendors => "/vendors",
            Self::PurchaseOrders => "/purchase-orders",
            Self::Shipments => "/shipments",
        }
    }

    /// Id of the table element that displays this resource.
    pub fn table_id(self) -> &'static str {
        match self {
            Self::Products => "product-table",
            Self::Vendors => "vendor-table",
            Self::PurchaseOrders => "purchase-order-table",
            Self::Shipments => "shipment-table",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Vendors => "Vendors",
            Self::PurchaseOrders => "Purchase Orders",
            Self::Shipments => "Shipments",
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Self::Products => Product::HEADERS,
            Self::Vendors => Vendor::HEADERS,
            Self::PurchaseOrders => PurchaseOrder::HEADERS,
            Self::Shipments => Shipment::HEADERS,
        }
    }

    /// Decodes a list response into table cells, one `Vec` per record in
    /// response order.
    pub fn decode_rows(self, body: Value) -> Result<Vec<Vec<String>>, serde_json::Error> {
        match self {
            Self::Products => rows_of::<Product>(body),
            Self::Vendors => rows_of::<Vendor>(body),
            Self::PurchaseOrders => rows_of::<PurchaseOrder>(body),
            Self::Shipments => rows_of::<Shipment>(body),
        }
    }
}

fn rows_of<T: TableRecord>(body: Value) -> Result<Vec<Vec<String>>, serde_json::Error> {
    let records: Vec<T> = serde_json::from_value(body)?;
    Ok(records.iter().map(TableRecord::cells).collect())
}
