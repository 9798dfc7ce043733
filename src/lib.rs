//! Inventory Viewer Library
//!
//! Fetches products, vendors, purchase orders and shipments from the
//! inventory backend, renders them into the page's tables, and submits the
//! add-product and remove-duplicates operations.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod client;
pub mod config;
pub mod document;
pub mod errors;
pub mod events;
pub mod models;
pub mod render;
pub mod resources;
pub mod services;

pub use client::{HttpInventoryClient, InventoryBackend};
pub use config::ViewerConfig;
pub use document::{Document, InMemoryDocument};
pub use errors::{BackendError, ViewerError, ViewerResult};
pub use resources::ResourceKind;
pub use services::ListSyncView;
