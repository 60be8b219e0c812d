//! Joining per-page text into a single document string.

/// Joins page texts with `\n`, skipping pages that produced no text.
///
/// A document whose pages are all empty yields an empty string, which still
/// flows through biomarker matching (and simply matches nothing).
#[must_use]
pub fn join_pages(pages: &[Option<String>]) -> String {
    pages
        .iter()
        .filter_map(|page| page.as_deref())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_non_empty_pages() {
        let pages = vec![
            Some("Total Cholesterol: 190".to_owned()),
            Some(String::new()),
            Some("Creatinine 1.2".to_owned()),
        ];
        assert_eq!(join_pages(&pages), "Total Cholesterol: 190\nCreatinine 1.2");
    }

    #[test]
    fn all_empty_pages_yield_empty_string() {
        assert_eq!(join_pages(&[None, Some(String::new())]), "");
        assert_eq!(join_pages(&[]), "");
    }
}
