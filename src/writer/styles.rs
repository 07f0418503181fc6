//! styles.xml generator.
//!
//! Collects the unique fonts, fills, borders and cell formats used across a
//! workbook, assigns indices to them, and writes the stylesheet part.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt::Write as FmtWrite;
use std::hash::{Hash, Hasher};

use crate::common::Result;
use crate::common::xml::escape_xml;
use crate::render::format::{
    CellAlignment, CellBorder, CellBorderSide, CellFill, CellFillPatternType, CellFont, CellFormat,
};

/// One `<xf>` record.
#[derive(Debug, Clone, PartialEq)]
struct XfRecord {
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    alignment: Option<CellAlignment>,
}

/// Builder for generating styles.xml content.
#[derive(Debug)]
pub struct StylesBuilder {
    fonts: Vec<CellFont>,
    font_map: HashMap<u64, usize>,
    fills: Vec<CellFill>,
    fill_map: HashMap<u64, usize>,
    borders: Vec<CellBorder>,
    border_map: HashMap<u64, usize>,
    cell_formats: Vec<XfRecord>,
    cell_format_map: HashMap<u64, usize>,
}

impl StylesBuilder {
    /// Create a builder holding the records every stylesheet must start with.
    pub fn new() -> Self {
        let mut builder = Self {
            fonts: Vec::new(),
            font_map: HashMap::new(),
            fills: Vec::new(),
            fill_map: HashMap::new(),
            borders: Vec::new(),
            border_map: HashMap::new(),
            cell_formats: Vec::new(),
            cell_format_map: HashMap::new(),
        };

        builder.add_font(&CellFont::default());

        // Fills 0 and 1 are reserved: none, then gray125
        for pattern_type in [CellFillPatternType::None, CellFillPatternType::Gray125] {
            builder.add_fill(&CellFill {
                pattern_type,
                fg_color: None,
            });
        }

        builder.add_border(&CellBorder::default());

        builder.cell_formats.push(XfRecord {
            font_id: 0,
            fill_id: 0,
            border_id: 0,
            alignment: None,
        });
        builder
            .cell_format_map
            .insert(Self::hash_cell_format(&CellFormat::default()), 0);

        builder
    }

    /// Add a cell format and return its style index.
    ///
    /// If the format has already been added, returns the existing index.
    pub fn add_cell_format(&mut self, format: &CellFormat) -> usize {
        let format_hash = Self::hash_cell_format(format);
        if let Some(&index) = self.cell_format_map.get(&format_hash) {
            return index;
        }

        let font_id = format.font.as_ref().map_or(0, |font| self.add_font(font));
        let fill_id = format.fill.as_ref().map_or(0, |fill| self.add_fill(fill));
        let border_id = format
            .border
            .as_ref()
            .map_or(0, |border| self.add_border(border));
        let alignment = format.alignment.clone().filter(|a| !a.is_default());

        let index = self.cell_formats.len();
        self.cell_formats.push(XfRecord {
            font_id,
            fill_id,
            border_id,
            alignment,
        });
        self.cell_format_map.insert(format_hash, index);
        index
    }

    /// Number of cell formats, including the default one.
    pub fn cell_format_count(&self) -> usize {
        self.cell_formats.len()
    }

    fn add_font(&mut self, font: &CellFont) -> usize {
        let hash = Self::hash_font(font);
        if let Some(&index) = self.font_map.get(&hash) {
            return index;
        }
        let index = self.fonts.len();
        self.fonts.push(font.clone());
        self.font_map.insert(hash, index);
        index
    }

    fn add_fill(&mut self, fill: &CellFill) -> usize {
        let hash = Self::hash_fill(fill);
        if let Some(&index) = self.fill_map.get(&hash) {
            return index;
        }
        let index = self.fills.len();
        self.fills.push(fill.clone());
        self.fill_map.insert(hash, index);
        index
    }

    fn add_border(&mut self, border: &CellBorder) -> usize {
        let hash = Self::hash_border(border);
        if let Some(&index) = self.border_map.get(&hash) {
            return index;
        }
        let index = self.borders.len();
        self.borders.push(border.clone());
        self.border_map.insert(hash, index);
        index
    }

    /// Generate the complete styles.xml content.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        write!(xml, r#"<fonts count="{}">"#, self.fonts.len())?;
        for font in &self.fonts {
            self.write_font(&mut xml, font)?;
        }
        xml.push_str("</fonts>");

        write!(xml, r#"<fills count="{}">"#, self.fills.len())?;
        for fill in &self.fills {
            self.write_fill(&mut xml, fill)?;
        }
        xml.push_str("</fills>");

        write!(xml, r#"<borders count="{}">"#, self.borders.len())?;
        for border in &self.borders {
            self.write_border(&mut xml, border)?;
        }
        xml.push_str("</borders>");

        xml.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);

        write!(xml, r#"<cellXfs count="{}">"#, self.cell_formats.len())?;
        for record in &self.cell_formats {
            write!(
                xml,
                r#"<xf numFmtId="0" fontId="{}" fillId="{}" borderId="{}" xfId="0""#,
                record.font_id, record.fill_id, record.border_id
            )?;
            if record.font_id != 0 {
                xml.push_str(r#" applyFont="1""#);
            }
            if record.fill_id != 0 {
                xml.push_str(r#" applyFill="1""#);
            }
            if record.border_id != 0 {
                xml.push_str(r#" applyBorder="1""#);
            }
            match &record.alignment {
                Some(alignment) => {
                    xml.push_str(r#" applyAlignment="1">"#);
                    self.write_alignment(&mut xml, alignment)?;
                    xml.push_str("</xf>");
                },
                None => xml.push_str("/>"),
            }
        }
        xml.push_str("</cellXfs>");

        xml.push_str(r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#);
        xml.push_str("</styleSheet>");

        Ok(xml)
    }

    fn write_font(&self, xml: &mut String, font: &CellFont) -> Result<()> {
        xml.push_str("<font>");
        if font.bold {
            xml.push_str("<b/>");
        }
        if font.italic {
            xml.push_str("<i/>");
        }
        write!(xml, r#"<sz val="{}"/>"#, font.size.unwrap_or(11.0))?;
        if let Some(ref color) = font.color {
            write!(xml, r#"<color rgb="{}"/>"#, escape_xml(color))?;
        }
        let name = font.name.as_deref().unwrap_or("Calibri");
        write!(xml, r#"<name val="{}"/>"#, escape_xml(name))?;
        xml.push_str("</font>");
        Ok(())
    }

    fn write_fill(&self, xml: &mut String, fill: &CellFill) -> Result<()> {
        xml.push_str("<fill>");
        match fill.fg_color {
            Some(ref fg_color) => {
                write!(
                    xml,
                    r#"<patternFill patternType="{}"><fgColor rgb="{}"/><bgColor indexed="64"/></patternFill>"#,
                    fill.pattern_type.as_str(),
                    escape_xml(fg_color)
                )?;
            },
            None => {
                write!(
                    xml,
                    r#"<patternFill patternType="{}"/>"#,
                    fill.pattern_type.as_str()
                )?;
            },
        }
        xml.push_str("</fill>");
        Ok(())
    }

    fn write_border(&self, xml: &mut String, border: &CellBorder) -> Result<()> {
        xml.push_str("<border>");
        self.write_border_side(xml, "left", border.left.as_ref())?;
        self.write_border_side(xml, "right", border.right.as_ref())?;
        self.write_border_side(xml, "top", border.top.as_ref())?;
        self.write_border_side(xml, "bottom", border.bottom.as_ref())?;
        xml.push_str("<diagonal/></border>");
        Ok(())
    }

    fn write_border_side(
        &self,
        xml: &mut String,
        side: &str,
        border_side: Option<&CellBorderSide>,
    ) -> Result<()> {
        match border_side {
            Some(bs) => {
                write!(xml, r#"<{} style="{}">"#, side, bs.style.as_str())?;
                match bs.color {
                    Some(ref color) => write!(xml, r#"<color rgb="{}"/>"#, escape_xml(color))?,
                    None => xml.push_str(r#"<color indexed="64"/>"#),
                }
                write!(xml, "</{}>", side)?;
            },
            None => write!(xml, "<{}/>", side)?,
        }
        Ok(())
    }

    fn write_alignment(&self, xml: &mut String, alignment: &CellAlignment) -> Result<()> {
        xml.push_str("<alignment");
        if let Some(horizontal) = alignment.horizontal {
            write!(xml, r#" horizontal="{}""#, horizontal.as_str())?;
        }
        if let Some(vertical) = alignment.vertical {
            write!(xml, r#" vertical="{}""#, vertical.as_str())?;
        }
        if alignment.text_rotation != 0 {
            write!(xml, r#" textRotation="{}""#, alignment.text_rotation)?;
        }
        if alignment.wrap_text {
            xml.push_str(r#" wrapText="1""#);
        }
        xml.push_str("/>");
        Ok(())
    }

    fn hash_font(font: &CellFont) -> u64 {
        let mut hasher = DefaultHasher::new();
        font.bold.hash(&mut hasher);
        font.italic.hash(&mut hasher);
        font.name.hash(&mut hasher);
        font.size.map(f64::to_bits).hash(&mut hasher);
        font.color.hash(&mut hasher);
        hasher.finish()
    }

    fn hash_fill(fill: &CellFill) -> u64 {
        let mut hasher = DefaultHasher::new();
        std::mem::discriminant(&fill.pattern_type).hash(&mut hasher);
        fill.fg_color.hash(&mut hasher);
        hasher.finish()
    }

    fn hash_border(border: &CellBorder) -> u64 {
        let mut hasher = DefaultHasher::new();
        Self::hash_border_side(&border.left, &mut hasher);
        Self::hash_border_side(&border.right, &mut hasher);
        Self::hash_border_side(&border.top, &mut hasher);
        Self::hash_border_side(&border.bottom, &mut hasher);
        hasher.finish()
    }

    fn hash_border_side(side: &Option<CellBorderSide>, hasher: &mut impl Hasher) {
        match side {
            Some(s) => {
                1u8.hash(hasher);
                std::mem::discriminant(&s.style).hash(hasher);
                s.color.hash(hasher);
            },
            None => 0u8.hash(hasher),
        }
    }

    fn hash_alignment(alignment: &CellAlignment, hasher: &mut impl Hasher) {
        alignment.horizontal.map(|h| h.as_str()).hash(hasher);
        alignment.vertical.map(|v| v.as_str()).hash(hasher);
        alignment.wrap_text.hash(hasher);
        alignment.text_rotation.hash(hasher);
    }

    fn hash_cell_format(format: &CellFormat) -> u64 {
        let mut hasher = DefaultHasher::new();
        format.font.as_ref().map(Self::hash_font).hash(&mut hasher);
        format.fill.as_ref().map(Self::hash_fill).hash(&mut hasher);
        format.border.as_ref().map(Self::hash_border).hash(&mut hasher);
        match format.alignment.as_ref().filter(|a| !a.is_default()) {
            Some(alignment) => {
                1u8.hash(&mut hasher);
                Self::hash_alignment(alignment, &mut hasher);
            },
            None => 0u8.hash(&mut hasher),
        }
        hasher.finish()
    }
}

impl Default for StylesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_records() {
        let builder = StylesBuilder::new();
        assert_eq!(builder.fonts.len(), 1);
        assert_eq!(builder.fills.len(), 2);
        assert_eq!(builder.borders.len(), 1);
        assert_eq!(builder.cell_format_count(), 1);
    }

    #[test]
    fn deduplicates_formats() {
        let mut builder = StylesBuilder::new();
        let format = CellFormat {
            font: Some(CellFont {
                bold: true,
                ..Default::default()
            }),
            border: Some(CellBorder::thin()),
            ..Default::default()
        };

        let index = builder.add_cell_format(&format);
        assert_eq!(index, 1);
        assert_eq!(builder.add_cell_format(&format), index);
        assert_eq!(builder.add_cell_format(&CellFormat::default()), 0);
    }

    #[test]
    fn alignment_distinguishes_formats() {
        let mut builder = StylesBuilder::new();
        let centered = CellFormat {
            alignment: Some(CellAlignment::centered()),
            ..Default::default()
        };
        let rotated = CellFormat {
            alignment: Some(CellAlignment::vertical_text()),
            ..Default::default()
        };
        assert_ne!(
            builder.add_cell_format(&centered),
            builder.add_cell_format(&rotated)
        );

        let xml = builder.to_xml().unwrap();
        assert!(xml.contains(r#"textRotation="90""#));
        assert!(xml.contains(r#"wrapText="1""#));
        assert!(xml.contains(r#"<cellXfs count="3">"#));
    }

    #[test]
    fn writes_solid_fill() {
        let mut builder = StylesBuilder::new();
        builder.add_cell_format(&CellFormat {
            fill: Some(CellFill::solid("FF308144")),
            ..Default::default()
        });
        let xml = builder.to_xml().unwrap();
        assert!(xml.contains(r#"<patternFill patternType="solid"><fgColor rgb="FF308144"/>"#));
        assert!(xml.contains(r#"<fills count="3">"#));
    }
}
