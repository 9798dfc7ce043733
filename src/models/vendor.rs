use serde::{Deserialize, Serialize};

use super::{cell, lenient, TableRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub vendor_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub contact_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub email_id: Option<String>,
}

impl TableRecord for Vendor {
    const HEADERS: &'static [&'static str] = &["Vendor Name", "Contact Number", "Email"];

    fn cells(&self) -> Vec<String> {
        vec![
            cell(&self.vendor_name),
            cell(&self.contact_number),
            cell(&self.email_id),
        ]
    }
}
