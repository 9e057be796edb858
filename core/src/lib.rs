//! Bulk export of experiment and dataset event streams into per-object CSV tables.
//!
//! The pipeline is: [`pagination::list_objects`] → per object
//! [`pagination::fetch_events`] → [`normalize::normalize`] →
//! [`table::TableWriter`], driven by [`export::Exporter`]. Remote access goes
//! through the [`source::ExportSource`] seam.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod pagination;
pub mod source;
pub mod table;
