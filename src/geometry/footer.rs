//! Footer text sources and per-page resolution

use std::fmt;
use std::rc::Rc;

/// Where the footer text of each page comes from
#[derive(Clone)]
pub enum FooterText {
    /// Same text on every page
    Fixed(String),
    /// One entry per page; missing or empty entries fall back to the last entry
    PerPage(Vec<String>),
    /// Computed from the 1-based page number
    Computed(Rc<dyn Fn(usize) -> String>),
}

impl FooterText {
    /// Build a computed source from a closure over the 1-based page number
    pub fn computed(f: impl Fn(usize) -> String + 'static) -> Self {
        FooterText::Computed(Rc::new(f))
    }

    /// Resolve the footer text for a 0-based page index
    pub fn resolve(&self, page_index: usize) -> String {
        match self {
            FooterText::Fixed(text) => text.clone(),
            FooterText::PerPage(texts) => texts
                .get(page_index)
                .filter(|text| !text.is_empty())
                .or_else(|| texts.last())
                .cloned()
                .unwrap_or_default(),
            FooterText::Computed(f) => f(page_index + 1),
        }
    }
}

impl Default for FooterText {
    fn default() -> Self {
        FooterText::Fixed(String::new())
    }
}

impl fmt::Debug for FooterText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FooterText::Fixed(text) => f.debug_tuple("Fixed").field(text).finish(),
            FooterText::PerPage(texts) => f.debug_tuple("PerPage").field(texts).finish(),
            FooterText::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for FooterText {
    fn from(text: &str) -> Self {
        FooterText::Fixed(text.to_string())
    }
}

impl From<String> for FooterText {
    fn from(text: String) -> Self {
        FooterText::Fixed(text)
    }
}

impl From<Vec<String>> for FooterText {
    fn from(texts: Vec<String>) -> Self {
        FooterText::PerPage(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_text() {
        let footer = FooterText::from("Confidential");
        assert_eq!(footer.resolve(0), "Confidential");
        assert_eq!(footer.resolve(42), "Confidential");
    }

    #[test]
    fn test_per_page_falls_back_to_last() {
        let footer = FooterText::from(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(footer.resolve(0), "A");
        assert_eq!(footer.resolve(1), "B");
        assert_eq!(footer.resolve(5), "B");
    }

    #[test]
    fn test_per_page_empty_entry_is_falsy() {
        let footer = FooterText::from(vec!["A".to_string(), String::new(), "C".to_string()]);
        assert_eq!(footer.resolve(1), "C");
        assert_eq!(FooterText::PerPage(Vec::new()).resolve(3), "");
    }

    #[test]
    fn test_computed_gets_one_based_number() {
        let footer = FooterText::computed(|n| format!("Page {}", n));
        assert_eq!(footer.resolve(2), "Page 3");
    }
}
