//! ekstre-export: transaction exporters and the exporter registry.

pub mod csv_full;
pub mod error;
pub mod registry;

pub use error::ExportError;
pub use registry::{ALL_EXPORTERS, Exporter, find_exporter, list_exporters};
