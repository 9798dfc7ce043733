//! The page the viewer writes into.
//!
//! [`Document`] is the narrow surface the controllers need: table bodies
//! addressed by table id, the add-product form, and a blocking alert.
//! [`InMemoryDocument`] is the standard page held in memory; the CLI and the
//! tests both drive it.

use std::collections::BTreeMap;

use crate::resources::ResourceKind;

pub const ADD_PRODUCT_FORM: &str = "add-product-form";
pub const REMOVE_DUPLICATES_BUTTON: &str = "remove-duplicates-btn";

/// Field ids of the add-product form, in display order.
pub const PRODUCT_FORM_FIELDS: [&str; 5] =
    ["item-name", "quantity", "unit-price", "location", "manufacturer"];

/// One rendered `<tr>`: the text of each `<td>`.
pub type TableRow = Vec<String>;

/// The `<tbody>` of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBody {
    rows: Vec<TableRow>,
}

impl TableBody {
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn append(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Swaps the whole row set. No diffing against the previous rows.
    pub fn replace(&mut self, rows: Vec<TableRow>) {
        self.clear();
        for row in rows {
            self.append(row);
        }
    }
}

/// A form's current field values keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: BTreeMap<String, String>,
}

impl Form {
    pub fn with_fields<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            fields: ids
                .into_iter()
                .map(|id| (id.to_string(), String::new()))
                .collect(),
        }
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    /// Sets an existing field. Returns `false` if the form has no such field.
    pub fn set(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.fields.get_mut(id) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Blanks every field, like `HTMLFormElement.reset()` on an empty form.
    pub fn reset(&mut self) {
        self.fields.values_mut().for_each(String::clear);
    }

    pub fn is_blank(&self) -> bool {
        self.fields.values().all(String::is_empty)
    }
}

pub trait Document {
    /// Body of the table with id `table_id`, if the page has one.
    fn table_body(&self, table_id: &str) -> Option<&TableBody>;

    fn table_body_mut(&mut self, table_id: &str) -> Option<&mut TableBody>;

    fn form(&self, form_id: &str) -> Option<&Form>;

    fn form_mut(&mut self, form_id: &str) -> Option<&mut Form>;

    /// Shows a blocking message to the user.
    fn alert(&mut self, message: &str);
}

/// In-memory rendition of the inventory page.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    tables: BTreeMap<String, TableBody>,
    forms: BTreeMap<String, Form>,
    alerts: Vec<String>,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::inventory_page()
    }
}

impl InMemoryDocument {
    /// A page with no tables and no forms.
    pub fn empty() -> Self {
        Self {
            tables: BTreeMap::new(),
            forms: BTreeMap::new(),
            alerts: Vec::new(),
        }
    }

    /// The four resource tables plus the add-product form.
    pub fn inventory_page() -> Self {
        let mut doc = Self::empty();
        for kind in ResourceKind::all() {
            doc.add_table(kind.table_id());
        }
        doc.add_form(ADD_PRODUCT_FORM, PRODUCT_FORM_FIELDS);
        doc
    }

    pub fn add_table(&mut self, table_id: &str) {
        self.tables.entry(table_id.to_string()).or_default();
    }

    pub fn add_form<'a>(&mut self, form_id: &str, fields: impl IntoIterator<Item = &'a str>) {
        self.forms
            .insert(form_id.to_string(), Form::with_fields(fields));
    }

    /// Alerts raised so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

impl Document for InMemoryDocument {
    fn table_body(&self, table_id: &str) -> Option<&TableBody> {
        self.tables.get(table_id)
    }

    fn table_body_mut(&mut self, table_id: &str) -> Option<&mut TableBody> {
        self.tables.get_mut(table_id)
    }

    fn form(&self, form_id: &str) -> Option<&Form> {
        self.forms.get(form_id)
    }

    fn form_mut(&mut self, form_id: &str) -> Option<&mut Form> {
        self.forms.get_mut(form_id)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
