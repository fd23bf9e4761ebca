// ── Document export (.docx) ──
//
// A .docx file is an OPC zip: fixed packaging parts plus the generated
// WordprocessingML body. The static parts (content types, relationships,
// a minimal style sheet defining Heading1) are constants; only
// word/document.xml is built per export.

use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use rollcall_api::StudentRecord;
use rollcall_core::table;

use crate::error::ExportError;

/// WordprocessingML main namespace.
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Document title, rendered as the Heading1 paragraph.
const DOCUMENT_TITLE: &str = "Student Registry";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>
"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>
"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>
"#;

/// Minimal style sheet: default paragraph text plus a Heading1 style so
/// the title renders as a real level-1 heading.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:outlineLvl w:val="0"/></w:pPr>
    <w:rPr><w:b/><w:sz w:val="32"/></w:rPr>
  </w:style>
</w:styles>
"#;

/// Produce a word-processor document: a level-1 heading followed by a
/// table with the fixed header row and one row per record, every cell
/// coerced to text.
///
/// Same ordering and cell values as the spreadsheet export; rejects an
/// empty snapshot the same way.
pub fn export_document(snapshot: &[StudentRecord]) -> Result<Vec<u8>, ExportError> {
    if snapshot.is_empty() {
        return Err(ExportError::EmptySnapshot);
    }

    let body = document_xml(snapshot)?;

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(CONTENT_TYPES.as_bytes())?;
    archive.start_file("_rels/.rels", options)?;
    archive.write_all(PACKAGE_RELS.as_bytes())?;
    archive.start_file("word/_rels/document.xml.rels", options)?;
    archive.write_all(DOCUMENT_RELS.as_bytes())?;
    archive.start_file("word/styles.xml", options)?;
    archive.write_all(STYLES.as_bytes())?;
    archive.start_file("word/document.xml", options)?;
    archive.write_all(&body)?;

    let buffer = archive.finish()?.into_inner();
    debug!(
        rows = snapshot.len() + 1,
        bytes = buffer.len(),
        "document export complete"
    );
    Ok(buffer)
}

/// Build word/document.xml: heading paragraph, then the student table.
fn document_xml(snapshot: &[StudentRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut document = BytesStart::new("w:document");
    document.push_attribute(("xmlns:w", W_NS));
    writer.write_event(Event::Start(document))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    write_heading(&mut writer, DOCUMENT_TITLE)?;

    writer.write_event(Event::Start(BytesStart::new("w:tbl")))?;
    write_header_row(&mut writer)?;
    for record in snapshot {
        write_record_row(&mut writer, record)?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:tbl")))?;

    writer.write_event(Event::Empty(BytesStart::new("w:sectPr")))?;
    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

/// A paragraph styled Heading1.
fn write_heading(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), ExportError> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    let mut style = BytesStart::new("w:pStyle");
    style.push_attribute(("w:val", "Heading1"));
    writer.write_event(Event::Empty(style))?;
    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    write_run(writer, text)?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_header_row(writer: &mut Writer<Vec<u8>>) -> Result<(), ExportError> {
    writer.write_event(Event::Start(BytesStart::new("w:tr")))?;
    for title in table::HEADER {
        write_cell(writer, title)?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:tr")))?;
    Ok(())
}

fn write_record_row(
    writer: &mut Writer<Vec<u8>>,
    record: &StudentRecord,
) -> Result<(), ExportError> {
    writer.write_event(Event::Start(BytesStart::new("w:tr")))?;
    for value in table::cells(record) {
        write_cell(writer, &value)?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:tr")))?;
    Ok(())
}

/// A table cell holding one paragraph of text.
fn write_cell(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), ExportError> {
    writer.write_event(Event::Start(BytesStart::new("w:tc")))?;
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    write_run(writer, text)?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    writer.write_event(Event::End(BytesEnd::new("w:tc")))?;
    Ok(())
}

/// A text run. `xml:space` is preserved so empty and padded cell values
/// (absent middle initials) survive round trips through Word.
fn write_run(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), ExportError> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    let mut t = BytesStart::new("w:t");
    t.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(t))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}
