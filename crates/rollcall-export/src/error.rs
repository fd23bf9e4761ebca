use thiserror::Error;

/// Failures from the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Exporting an empty snapshot is refused; the caller shows a notice
    /// instead of writing a file.
    #[error("nothing to export: the student snapshot is empty")]
    EmptySnapshot,

    /// Spreadsheet generation failed inside the xlsx writer.
    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Document packaging failed in the zip container layer.
    #[error("document packaging failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// WordprocessingML serialization failed.
    #[error("document XML generation failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML serialization or buffer I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
