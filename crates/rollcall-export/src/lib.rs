//! Export pipeline: snapshot → `.xlsx` / `.docx` bytes.
//!
//! Both exporters are pure transforms of a student snapshot slice — no
//! network, no store access, no side effects. Cell values come from
//! [`rollcall_core::table`], the same projection the on-screen table
//! uses, so the files and the display can never disagree. An empty
//! snapshot is refused up front ([`ExportError::EmptySnapshot`]) rather
//! than producing a headers-only file.

pub mod document;
pub mod error;
pub mod sheet;

pub use document::export_document;
pub use error::ExportError;
pub use sheet::export_spreadsheet;
