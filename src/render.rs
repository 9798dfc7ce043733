//! Pure records → markup functions. Nothing here touches a live document.

use std::fmt::Write as _;

use crate::document::{
    Document, TableBody, TableRow, ADD_PRODUCT_FORM, PRODUCT_FORM_FIELDS,
    REMOVE_DUPLICATES_BUTTON,
};
use crate::resources::ResourceKind;

/// Escapes text for use inside HTML element content or a quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn row_html(row: &TableRow) -> String {
    let mut out = String::from("<tr>");
    for cell in row {
        let _ = write!(out, "<td>{}</td>", escape_html(cell));
    }
    out.push_str("</tr>");
    out
}

pub fn tbody_html(body: &TableBody) -> String {
    let mut out = String::from("<tbody>");
    for row in body.rows() {
        out.push_str(&row_html(row));
    }
    out.push_str("</tbody>");
    out
}

/// A complete `<table>` for `kind` with its header row and `body`.
pub fn table_html(kind: ResourceKind, body: &TableBody) -> String {
    let mut out = format!("<table id=\"{}\">", kind.table_id());
    out.push_str("<thead><tr>");
    for header in kind.headers() {
        let _ = write!(out, "<th>{}</th>", escape_html(header));
    }
    out.push_str("</tr></thead>");
    out.push_str(&tbody_html(body));
    out.push_str("</table>");
    out
}

fn form_html() -> String {
    let mut out = format!("<form id=\"{}\">", ADD_PRODUCT_FORM);
    for field in PRODUCT_FORM_FIELDS {
        let input_type = match field {
            "quantity" | "unit-price" => "number",
            _ => "text",
        };
        let _ = write!(
            out,
            "<label for=\"{id}\">{id}</label><input type=\"{ty}\" id=\"{id}\" name=\"{id}\">",
            id = field,
            ty = input_type
        );
    }
    out.push_str("<button type=\"submit\">Add Product</button></form>");
    out
}

/// Standalone HTML page with every resource table as currently held by `doc`.
/// Tables missing from `doc` render with an empty body.
pub fn page_html<D: Document + ?Sized>(doc: &D) -> String {
    let empty = TableBody::default();
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Inventory</title></head>\n<body>\n",
    );
    for kind in ResourceKind::all() {
        let body = doc.table_body(kind.table_id()).unwrap_or(&empty);
        let _ = writeln!(out, "<h2>{}</h2>", kind.title());
        out.push_str(&table_html(kind, body));
        out.push('\n');
        if kind == ResourceKind::Products {
            out.push_str(&form_html());
            let _ = writeln!(
                out,
                "\n<button id=\"{}\">Remove Duplicates</button>",
                REMOVE_DUPLICATES_BUTTON
            );
        }
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Column-aligned plain text rendering for terminals.
pub fn text_table(kind: ResourceKind, body: &TableBody) -> String {
    let headers: Vec<&str> = kind.headers().to_vec();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in body.rows() {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = format!("{}\n", kind.title());
    out.push_str(&pad_line(headers.iter().copied(), &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    if body.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in body.rows() {
        out.push_str(&pad_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}
