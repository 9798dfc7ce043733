//! Records returned by the inventory backend and their table projections.

pub mod lenient;
pub mod product;
pub mod purchase_order;
pub mod shipment;
pub mod vendor;

pub use product::{Product, StockStatus};
pub use purchase_order::PurchaseOrder;
pub use shipment::Shipment;
pub use vendor::Vendor;

use serde::de::DeserializeOwned;

/// A record that renders as one table row.
pub trait TableRecord: DeserializeOwned {
    /// Column headings, in cell order.
    const HEADERS: &'static [&'static str];

    /// Display text for each column, in the same order as [`Self::HEADERS`].
    fn cells(&self) -> Vec<String>;
}

/// Display text for an optional column; absent values render empty.
pub(crate) fn cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
