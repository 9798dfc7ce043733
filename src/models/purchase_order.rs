use serde::{Deserialize, Serialize};

use super::{cell, lenient, TableRecord};

/// Purchase order summary. Ids and dates are shown exactly as the backend
/// formats them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub vendor_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub po_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub vendor_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub status: Option<String>,
}

impl TableRecord for PurchaseOrder {
    const HEADERS: &'static [&'static str] = &["Vendor ID", "PO Date", "Vendor Name", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            cell(&self.vendor_id),
            cell(&self.po_date),
            cell(&self.vendor_name),
            cell(&self.status),
        ]
    }
}
