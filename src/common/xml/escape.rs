use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Built once, shared by every sheet written in the process
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("static pattern set is valid")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use plantilla::common::xml::escape_xml;
/// assert_eq!(escape_xml("Sí & No"), "Sí &amp; No");
/// assert_eq!(escape_xml("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(escape_xml("Objetivo General"), "Objetivo General");
    }

    #[test]
    fn escapes_formula_comparisons() {
        assert_eq!(
            escape_xml("IF(SUM(G6:K6)>0,1,0)"),
            "IF(SUM(G6:K6)&gt;0,1,0)"
        );
    }
}
