//! Paginated report layout.
//!
//! Turns the current inventory into positioned text draws against a
//! page-based document sink: title block on the first page, a six-column
//! table with content-driven and fixed column widths, and headers repeated
//! across page breaks. The sink owns the rendering primitives; this crate
//! owns the geometry.

pub mod error;
pub mod layout;
pub mod sink;
pub mod text_sink;

pub use error::ReportError;
pub use layout::{ReportConfig, ReportLayout};
pub use sink::{Align, DocumentSink, DrawOp, RecordingSink, TextStyle};
pub use text_sink::TextSink;
