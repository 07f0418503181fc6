//! Shared strings table.
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

use crate::common::Result;
use crate::common::xml::escape_xml;

/// Shared strings table.
///
/// Every text cell is stored once in `sharedStrings.xml` and referenced by
/// index from the sheets. Indices are assigned in first-use order.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    string_to_index: HashMap<String, usize>,
    /// Total references, including repeats.
    references: usize,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string and return its index; a known string keeps its index.
    pub fn add_string(&mut self, s: &str) -> usize {
        self.references += 1;
        if let Some(&index) = self.string_to_index.get(s) {
            index
        } else {
            let index = self.strings.len();
            self.strings.push(s.to_string());
            self.string_to_index.insert(s.to_string(), index);
            index
        }
    }

    /// Number of unique strings.
    pub fn count(&self) -> usize {
        self.strings.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(64 * self.strings.len() + 256);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            self.references,
            self.strings.len()
        )?;

        for s in &self.strings {
            if needs_preserve(s) {
                write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape_xml(s))?;
            } else {
                write!(xml, "<si><t>{}</t></si>", escape_xml(s))?;
            }
        }

        xml.push_str("</sst>");
        Ok(xml)
    }
}

fn needs_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) || s.contains('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_strings() {
        let mut ss = SharedStrings::new();
        let idx1 = ss.add_string("Sí");
        let idx2 = ss.add_string("No");
        let idx3 = ss.add_string("Sí");

        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(idx3, 0);
        assert_eq!(ss.count(), 2);
        assert_eq!(ss.get(1), Some("No"));
    }

    #[test]
    fn counts_references_and_preserves_line_breaks() {
        let mut ss = SharedStrings::new();
        ss.add_string("Indicadores de\nresultado");
        ss.add_string("Meta");
        ss.add_string("Meta");

        let xml = ss.to_xml().unwrap();
        assert!(xml.contains(r#"count="3" uniqueCount="2""#));
        assert!(xml.contains(r#"<t xml:space="preserve">Indicadores de"#));
        assert!(xml.contains("<si><t>Meta</t></si>"));
    }
}
