//! Worksheet part writer.
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as FmtWrite;

use super::strings::SharedStrings;
use crate::common::xml::escape_xml;
use crate::common::{CellRange, CellRef, Result};
use crate::render::SheetSink;
use crate::render::format::CellFormat;
use crate::validation::MAX_INLINE_LIST_LEN;

/// Cell position to style index mapping.
pub(crate) type CellStyleMap = HashMap<CellRef, usize>;

/// Content of a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    String(String),
    /// Formula text without the leading `=`.
    Formula(String),
}

/// Inline list validation over a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListValidation {
    pub range: CellRange,
    pub values: Vec<String>,
    pub show_error_alert: bool,
}

/// An in-memory worksheet.
///
/// Coordinates are 1-based. Cells are kept in row-major order so the sheet
/// data can be streamed out in the order SpreadsheetML requires.
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    sheet_id: u32,
    cells: BTreeMap<CellRef, CellValue>,
    cell_formats: HashMap<CellRef, CellFormat>,
    merged_cells: Vec<CellRange>,
    validations: Vec<ListValidation>,
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    active: bool,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, sheet_id: u32) -> Self {
        Self {
            name: name.into(),
            sheet_id,
            cells: BTreeMap::new(),
            cell_formats: HashMap::new(),
            merged_cells: Vec::new(),
            validations: Vec::new(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cell_value(&self, cell: CellRef) -> Option<&CellValue> {
        self.cells.get(&cell)
    }

    pub fn cell_format(&self, cell: CellRef) -> Option<&CellFormat> {
        self.cell_formats.get(&cell)
    }

    /// Cell formats for every formatted cell (used to build styles).
    pub fn cell_formats(&self) -> &HashMap<CellRef, CellFormat> {
        &self.cell_formats
    }

    pub fn merged_cells(&self) -> &[CellRange] {
        &self.merged_cells
    }

    pub fn validations(&self) -> &[ListValidation] {
        &self.validations
    }

    /// Bounding range of every written or formatted cell.
    pub fn used_range(&self) -> Option<CellRange> {
        let mut positions = self.cells.keys().chain(self.cell_formats.keys());
        let first = *positions.next()?;
        let (mut min_row, mut min_col) = (first.row(), first.col());
        let (mut max_row, mut max_col) = (min_row, min_col);

        for cell in positions {
            min_row = min_row.min(cell.row());
            max_row = max_row.max(cell.row());
            min_col = min_col.min(cell.col());
            max_col = max_col.max(cell.col());
        }

        Some(CellRange::from_coords(min_row, min_col, max_row, max_col))
    }

    /// Serialize the worksheet to XML.
    ///
    /// # Arguments
    /// * `shared_strings` - Workbook shared strings table
    /// * `style_indices` - Cell positions to `cellXfs` indices
    pub fn to_xml(
        &self,
        shared_strings: &mut SharedStrings,
        style_indices: &CellStyleMap,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        match self.used_range() {
            Some(range) => write!(xml, r#"<dimension ref="{}"/>"#, range)?,
            None => xml.push_str(r#"<dimension ref="A1"/>"#),
        }

        xml.push_str(r#"<sheetViews><sheetView workbookViewId="0""#);
        if self.active {
            xml.push_str(r#" tabSelected="1""#);
        }
        xml.push_str("/></sheetViews>");
        xml.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);

        self.write_cols(&mut xml)?;

        xml.push_str("<sheetData>");
        self.write_sheet_data(&mut xml, shared_strings, style_indices)?;
        xml.push_str("</sheetData>");

        if !self.merged_cells.is_empty() {
            write!(xml, r#"<mergeCells count="{}">"#, self.merged_cells.len())?;
            for range in &self.merged_cells {
                write!(xml, r#"<mergeCell ref="{}"/>"#, range)?;
            }
            xml.push_str("</mergeCells>");
        }

        xml.push_str(r#"<phoneticPr fontId="0" type="noConversion"/>"#);

        if !self.validations.is_empty() {
            self.write_data_validations(&mut xml)?;
        }

        xml.push_str(
            r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#,
        );
        xml.push_str("</worksheet>");

        Ok(xml)
    }

    fn write_sheet_data(
        &self,
        xml: &mut String,
        shared_strings: &mut SharedStrings,
        style_indices: &CellStyleMap,
    ) -> Result<()> {
        // Rows with content, formatting or a custom height
        let mut positions: BTreeSet<CellRef> = self.cells.keys().copied().collect();
        positions.extend(self.cell_formats.keys().copied());

        let mut rows: BTreeMap<u32, Vec<CellRef>> = BTreeMap::new();
        for cell in positions {
            rows.entry(cell.row()).or_default().push(cell);
        }
        for &row in self.row_heights.keys() {
            rows.entry(row).or_default();
        }

        for (row_num, cells) in rows {
            write!(xml, r#"<row r="{}""#, row_num)?;
            if let Some(&height) = self.row_heights.get(&row_num) {
                write!(xml, r#" ht="{}" customHeight="1""#, height)?;
            }
            xml.push('>');

            for cell in cells {
                let style_index = style_indices.get(&cell).copied().filter(|&s| s != 0);
                self.write_cell(xml, cell, self.cells.get(&cell), shared_strings, style_index)?;
            }

            xml.push_str("</row>");
        }

        Ok(())
    }

    fn write_cell(
        &self,
        xml: &mut String,
        cell: CellRef,
        value: Option<&CellValue>,
        shared_strings: &mut SharedStrings,
        style_index: Option<usize>,
    ) -> Result<()> {
        let style_attr = match style_index {
            Some(idx) => format!(r#" s="{}""#, idx),
            None => String::new(),
        };

        match value {
            None => {
                if style_index.is_some() {
                    write!(xml, r#"<c r="{}"{}/>"#, cell, style_attr)?;
                }
            },
            Some(CellValue::String(s)) => {
                let string_index = shared_strings.add_string(s);
                write!(
                    xml,
                    r#"<c r="{}"{} t="s"><v>{}</v></c>"#,
                    cell, style_attr, string_index
                )?;
            },
            Some(CellValue::Formula(formula)) => {
                write!(
                    xml,
                    r#"<c r="{}"{}><f>{}</f></c>"#,
                    cell,
                    style_attr,
                    escape_xml(formula)
                )?;
            },
        }

        Ok(())
    }

    fn write_cols(&self, xml: &mut String) -> Result<()> {
        if self.column_widths.is_empty() {
            return Ok(());
        }

        xml.push_str("<cols>");
        for (&col, &width) in &self.column_widths {
            write!(
                xml,
                r#"<col min="{}" max="{}" width="{}" customWidth="1"/>"#,
                col, col, width
            )?;
        }
        xml.push_str("</cols>");
        Ok(())
    }

    fn write_data_validations(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<dataValidations count="{}">"#,
            self.validations.len()
        )?;

        for validation in &self.validations {
            xml.push_str(r#"<dataValidation type="list" allowBlank="1" showInputMessage="1""#);
            if validation.show_error_alert {
                xml.push_str(r#" showErrorMessage="1""#);
            }
            write!(xml, r#" sqref="{}">"#, validation.range)?;

            let list_str = validation.values.join(",");
            write!(
                xml,
                "<formula1>\"{}\"</formula1>",
                escape_xml(&list_str)
            )?;
            xml.push_str("</dataValidation>");
        }

        xml.push_str("</dataValidations>");
        Ok(())
    }
}

impl SheetSink for Worksheet {
    fn set_text(&mut self, cell: CellRef, text: &str) {
        self.cells.insert(cell, CellValue::String(text.to_string()));
    }

    fn set_formula(&mut self, cell: CellRef, formula: &str) {
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        self.cells.insert(cell, CellValue::Formula(formula.to_string()));
    }

    fn set_format(&mut self, cell: CellRef, format: &CellFormat) {
        self.cell_formats.insert(cell, format.clone());
    }

    fn merge(&mut self, range: CellRange) {
        self.merged_cells.push(range);
    }

    fn add_list_validation(&mut self, range: CellRange, options: &[&str]) {
        let values: Vec<String> = options.iter().map(|o| (*o).to_string()).collect();
        let length = values.join(",").chars().count();
        if length > MAX_INLINE_LIST_LEN {
            tracing::warn!(
                sheet = %self.name,
                range = %range,
                length,
                "inline list source is longer than {} characters",
                MAX_INLINE_LIST_LEN
            );
        }
        self.validations.push(ListValidation {
            range,
            values,
            show_error_alert: true,
        });
    }

    fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::format::CellBorder;

    fn bordered() -> CellFormat {
        CellFormat {
            border: Some(CellBorder::thin()),
            ..Default::default()
        }
    }

    #[test]
    fn writes_rows_in_order_with_styles() {
        let mut ws = Worksheet::new("F. Resumen", 1);
        ws.set_text(CellRef::new(7, 2), "Life expectancy");
        ws.set_text(CellRef::new(1, 1), "F. Resumen y próximos pasos");
        ws.set_format(CellRef::new(7, 3), &bordered());

        let mut strings = SharedStrings::new();
        let mut styles = CellStyleMap::new();
        styles.insert(CellRef::new(7, 3), 1);
        let xml = ws.to_xml(&mut strings, &styles).unwrap();

        let first = xml.find(r#"<row r="1">"#).unwrap();
        let seventh = xml.find(r#"<row r="7">"#).unwrap();
        assert!(first < seventh);
        assert!(xml.contains(r#"<c r="B7" t="s"><v>1</v></c><c r="C7" s="1"/>"#));
        assert!(xml.contains(r#"<dimension ref="A1:C7"/>"#));
    }

    #[test]
    fn writes_formula_without_equals() {
        let mut ws = Worksheet::new("D. Teoría de Cambio", 1);
        ws.set_formula(CellRef::new(6, 12), "=IF(SUM(G6:K6)>0,1,0)");
        let xml = ws
            .to_xml(&mut SharedStrings::new(), &CellStyleMap::new())
            .unwrap();
        assert!(xml.contains("<c r=\"L6\"><f>IF(SUM(G6:K6)&gt;0,1,0)</f></c>"));
    }

    #[test]
    fn writes_merges_and_lists_in_schema_order() {
        let mut ws = Worksheet::new("F. Resumen", 1);
        ws.merge(CellRange::row_span(4, 8, 11));
        ws.add_list_validation(CellRange::column_span(8, 7, 9), &["Sí", "No"]);
        ws.set_row_height(4, 60.0);
        ws.set_column_width(1, 25.0);

        let xml = ws
            .to_xml(&mut SharedStrings::new(), &CellStyleMap::new())
            .unwrap();
        assert!(xml.contains(r#"<mergeCell ref="H4:K4"/>"#));
        assert!(xml.contains(r#"sqref="H7:H9"><formula1>"Sí,No"</formula1>"#));
        assert!(xml.contains(r#"<row r="4" ht="60" customHeight="1"></row>"#));
        assert!(xml.contains(r#"<col min="1" max="1" width="25" customWidth="1"/>"#));

        let merge = xml.find("<mergeCells").unwrap();
        let validations = xml.find("<dataValidations").unwrap();
        let margins = xml.find("<pageMargins").unwrap();
        assert!(merge < validations && validations < margins);
    }

    #[test]
    fn empty_sheet_has_placeholder_dimension() {
        let ws = Worksheet::new("Empty", 1);
        assert_eq!(ws.used_range(), None);
        let xml = ws
            .to_xml(&mut SharedStrings::new(), &CellStyleMap::new())
            .unwrap();
        assert!(xml.contains(r#"<dimension ref="A1"/>"#));
        assert!(xml.contains("<sheetData></sheetData>"));
    }
}
