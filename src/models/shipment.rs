use serde::{Deserialize, Serialize};

use super::{cell, lenient, TableRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub shipment_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub po_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub shipment_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub shipment_status: Option<String>,
}

impl TableRecord for Shipment {
    const HEADERS: &'static [&'static str] =
        &["Shipment Number", "PO Number", "Shipment Date", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            cell(&self.shipment_number),
            cell(&self.po_no),
            cell(&self.shipment_date),
            cell(&self.shipment_status),
        ]
    }
}
