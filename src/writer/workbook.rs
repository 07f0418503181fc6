//! Workbook assembly.
use std::fmt::Write as FmtWrite;

use super::package::WorkbookParts;
use super::sheet::{CellStyleMap, Worksheet};
use super::strings::SharedStrings;
use super::styles::StylesBuilder;
use crate::common::xml::escape_xml;
use crate::common::{Error, Result};
use crate::render::DocumentSink;

const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
const CT_SHARED_STRINGS: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_SHARED_STRINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";

/// An in-memory workbook made of worksheets, serialized on demand.
#[derive(Debug, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create a workbook without sheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a worksheet. The first sheet becomes the selected tab.
    ///
    /// # Errors
    ///
    /// [`Error::Layout`] when the name is empty, longer than 31 characters,
    /// contains a character worksheets forbid, or repeats an existing name
    /// (ignoring case).
    pub fn add_worksheet(&mut self, name: &str) -> Result<&mut Worksheet> {
        validate_sheet_name(name)?;
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name.to_lowercase())
        {
            return Err(Error::Layout(format!("duplicate sheet name '{}'", name)));
        }

        let sheet_id = (self.worksheets.len() + 1) as u32;
        let mut worksheet = Worksheet::new(name, sheet_id);
        worksheet.set_active(self.worksheets.is_empty());
        self.worksheets.push(worksheet);

        let index = self.worksheets.len() - 1;
        Ok(&mut self.worksheets[index])
    }

    pub fn worksheets(&self) -> &[Worksheet] {
        &self.worksheets
    }

    pub fn worksheet(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Collect every cell format into one stylesheet.
    ///
    /// Returns the builder and, per worksheet, the cell → style index map.
    fn build_styles(&self) -> (StylesBuilder, Vec<CellStyleMap>) {
        let mut builder = StylesBuilder::new();
        let mut worksheet_style_indices = Vec::with_capacity(self.worksheets.len());

        for ws in &self.worksheets {
            let mut style_map = CellStyleMap::new();
            for (pos, format) in ws.cell_formats() {
                style_map.insert(*pos, builder.add_cell_format(format));
            }
            worksheet_style_indices.push(style_map);
        }

        (builder, worksheet_style_indices)
    }

    fn generate_workbook_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
        );
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );
        xml.push_str(r#"<bookViews><workbookView activeTab="0"/></bookViews>"#);

        xml.push_str("<sheets>");
        for (index, ws) in self.worksheets.iter().enumerate() {
            write!(
                xml,
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(ws.name()),
                ws.sheet_id(),
                index + 1
            )?;
        }
        xml.push_str("</sheets>");
        xml.push_str(r#"<calcPr calcId="191029" fullCalcOnLoad="1"/>"#);
        xml.push_str("</workbook>");

        Ok(xml)
    }

    /// Worksheets take `rId1..=rIdN`; styles and shared strings follow.
    fn generate_workbook_rels(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        let count = self.worksheets.len();
        for index in 1..=count {
            write!(
                xml,
                r#"<Relationship Id="rId{}" Type="{}" Target="worksheets/sheet{}.xml"/>"#,
                index, REL_WORKSHEET, index
            )?;
        }
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}" Target="styles.xml"/>"#,
            count + 1,
            REL_STYLES
        )?;
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}" Target="sharedStrings.xml"/>"#,
            count + 2,
            REL_SHARED_STRINGS
        )?;

        xml.push_str("</Relationships>");
        Ok(xml)
    }

    fn generate_root_rels(&self) -> Result<String> {
        let mut xml = String::with_capacity(256);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}" Target="xl/workbook.xml"/></Relationships>"#,
            REL_OFFICE_DOCUMENT
        )?;
        Ok(xml)
    }

    fn generate_content_types(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        write!(
            xml,
            r#"<Override PartName="/xl/workbook.xml" ContentType="{}"/>"#,
            CT_WORKBOOK
        )?;
        for index in 1..=self.worksheets.len() {
            write!(
                xml,
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="{}"/>"#,
                index, CT_WORKSHEET
            )?;
        }
        write!(
            xml,
            r#"<Override PartName="/xl/styles.xml" ContentType="{}"/>"#,
            CT_STYLES
        )?;
        write!(
            xml,
            r#"<Override PartName="/xl/sharedStrings.xml" ContentType="{}"/>"#,
            CT_SHARED_STRINGS
        )?;
        xml.push_str("</Types>");
        Ok(xml)
    }

    /// Serialize every part of the package.
    pub fn to_parts(&self) -> Result<WorkbookParts> {
        let (styles, style_indices) = self.build_styles();
        let mut shared_strings = SharedStrings::new();
        let mut parts = WorkbookParts::new();

        parts.push("[Content_Types].xml", self.generate_content_types()?);
        parts.push("_rels/.rels", self.generate_root_rels()?);
        parts.push("xl/workbook.xml", self.generate_workbook_xml()?);
        parts.push("xl/_rels/workbook.xml.rels", self.generate_workbook_rels()?);

        // Sheets fill the shared strings table, so they go first
        for (index, (ws, styles_map)) in self.worksheets.iter().zip(&style_indices).enumerate() {
            let xml = ws.to_xml(&mut shared_strings, styles_map)?;
            parts.push(format!("xl/worksheets/sheet{}.xml", index + 1), xml);
        }

        parts.push("xl/styles.xml", styles.to_xml()?);
        parts.push("xl/sharedStrings.xml", shared_strings.to_xml()?);

        tracing::debug!(
            sheets = self.worksheets.len(),
            styles = styles.cell_format_count(),
            strings = shared_strings.count(),
            "serialized workbook"
        );

        Ok(parts)
    }
}

impl DocumentSink for Workbook {
    type Sheet = Worksheet;

    fn add_sheet(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.add_worksheet(name)
    }
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Layout("sheet name is empty".to_string()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::Layout(format!(
            "sheet name '{}' is longer than {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
        return Err(Error::Layout(format!(
            "sheet name '{}' contains forbidden character '{}'",
            name, c
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CellRef;
    use crate::render::SheetSink;

    #[test]
    fn rejects_bad_sheet_names() {
        let mut wb = Workbook::new();
        assert!(wb.add_worksheet("").is_err());
        assert!(wb.add_worksheet("a/b").is_err());
        assert!(wb.add_worksheet(&"x".repeat(32)).is_err());
        wb.add_worksheet("F. Resumen").unwrap();
        assert!(wb.add_worksheet("f. resumen").is_err());
    }

    #[test]
    fn parts_reference_every_sheet() {
        let mut wb = Workbook::new();
        wb.add_worksheet("C. Desafío")
            .unwrap()
            .set_text(CellRef::new(1, 1), "C. Desafío para el desarrollo");
        wb.add_worksheet("D. Teoría de Cambio").unwrap();

        let parts = wb.to_parts().unwrap();
        let names: Vec<&str> = parts.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(
            names,
            [
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/workbook.xml",
                "xl/_rels/workbook.xml.rels",
                "xl/worksheets/sheet1.xml",
                "xl/worksheets/sheet2.xml",
                "xl/styles.xml",
                "xl/sharedStrings.xml",
            ]
        );

        let workbook = parts.get("xl/workbook.xml").unwrap();
        assert!(workbook.contains(r#"<sheet name="D. Teoría de Cambio" sheetId="2" r:id="rId2"/>"#));
        let rels = parts.get("xl/_rels/workbook.xml.rels").unwrap();
        assert!(rels.contains(r#"Id="rId3""#) && rels.contains("styles.xml"));
        let types = parts.get("[Content_Types].xml").unwrap();
        assert!(types.contains("/xl/worksheets/sheet2.xml"));
        assert!(parts.get("xl/worksheets/sheet1.xml").unwrap().contains(r#"tabSelected="1""#));
        assert!(parts.get("xl/sharedStrings.xml").unwrap().contains("para el desarrollo"));
    }
}
