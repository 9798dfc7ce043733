use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{self, Numeric};
use super::{cell, TableRecord};

/// Availability label derived from the on-hand quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    #[strum(serialize = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn for_quantity(quantity: i64) -> Self {
        if quantity > 0 {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }
}

/// A product row as the backend stores it.
///
/// Every column is optional so a record with gaps still renders. Numeric
/// columns that do not parse keep the text the backend sent. Fields the
/// viewer does not know about are carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        deserialize_with = "lenient::text::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_name: Option<String>,
    #[serde(
        default,
        with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Numeric<i64>>,
    #[serde(
        default,
        with = "lenient::decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Numeric<Decimal>>,
    #[serde(
        default,
        deserialize_with = "lenient::text::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub stock_status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Builds a new product, deriving `stock_status` from `quantity`.
    pub fn new(
        item_name: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
        location: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            item_name: Some(item_name.into()),
            quantity: Some(Numeric::Number(quantity)),
            unit_price: Some(Numeric::Number(unit_price)),
            location: Some(location.into()),
            manufacturer: Some(manufacturer.into()),
            stock_status: Some(StockStatus::for_quantity(quantity).to_string()),
            extra: Map::new(),
        }
    }
}

impl TableRecord for Product {
    const HEADERS: &'static [&'static str] = &[
        "Item Name",
        "Quantity",
        "Unit Price",
        "Location",
        "Manufacturer",
        "Stock Status",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            cell(&self.item_name),
            cell(&self.quantity),
            cell(&self.unit_price),
            cell(&self.location),
            cell(&self.manufacturer),
            cell(&self.stock_status),
        ]
    }
}
