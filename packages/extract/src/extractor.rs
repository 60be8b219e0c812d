//! Biomarker extraction from plain report text.

use biomarker_extract_models::ExtractionResult;
use indexmap::IndexMap;

use crate::patterns::BiomarkerPattern;

/// Width of the `=` banner framing each text preview.
const BANNER_WIDTH: usize = 60;

/// Searches `text` with every pattern and returns the values that parsed.
///
/// Each pattern is matched independently against the whole text and only
/// its first match is considered. Values are keyed in pattern order. A match
/// whose captured text is not a number is logged and skipped; `file` only
/// labels that diagnostic.
///
/// Values are parsed with [`str::parse`], which only understands ASCII
/// digits. A `\d` that matched non-ASCII digits (e.g. Arabic-Indic `١.٢`)
/// therefore produces a warning and no value.
#[must_use]
pub fn extract_biomarkers(
    text: &str,
    patterns: &[BiomarkerPattern],
    file: &str,
) -> IndexMap<String, f64> {
    let mut biomarkers = IndexMap::new();

    for pattern in patterns {
        let Some(raw) = pattern.find_raw(text) else {
            continue;
        };

        if let Ok(value) = raw.parse::<f64>() {
            biomarkers.insert(pattern.name().to_owned(), value);
        } else {
            log::warn!(
                "Could not convert value '{raw}' for {} in {file}",
                pattern.name()
            );
        }
    }

    biomarkers
}

/// Builds the record for one report.
#[must_use]
pub fn extract_record(file: &str, text: &str, patterns: &[BiomarkerPattern]) -> ExtractionResult {
    let biomarkers = extract_biomarkers(text, patterns, file);

    log::debug!("{file}: extracted {} biomarker(s)", biomarkers.len());

    ExtractionResult::new(file.to_owned(), biomarkers)
}

/// Renders the diagnostic preview printed before a report is processed:
/// the path, then at most `max_chars` characters of text between two
/// banners.
#[must_use]
pub fn preview(path: &str, text: &str, max_chars: usize) -> String {
    let end = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(idx, _)| idx);
    let banner = "=".repeat(BANNER_WIDTH);

    format!(
        "\nExtracting from: {path}\n{banner}\n{}\n{banner}",
        &text[..end]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::default_patterns;

    fn extract(text: &str) -> IndexMap<String, f64> {
        extract_biomarkers(text, default_patterns(), "test.pdf")
    }

    #[test]
    fn extracts_total_cholesterol() {
        let values = extract("Lipid Panel\nTotal Cholesterol: 190 mg/dL");
        assert_eq!(values.len(), 1);
        assert_eq!(values["Total Cholesterol"], 190.0);
    }

    #[test]
    fn ldl_qualifier_is_consumed() {
        let values = extract("LDL Cholesterol 110.5");
        assert_eq!(values.len(), 1);
        assert_eq!(values["LDL"], 110.5);
    }

    #[test]
    fn keys_follow_pattern_order() {
        let record = extract_record(
            "a.pdf",
            "Creatinine 1.0\nLDL 100\nTotal Cholesterol 190",
            default_patterns(),
        );
        let keys: Vec<&str> = record.biomarkers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Total Cholesterol", "LDL", "Creatinine"]);

        let json = serde_json::to_string(&record.biomarkers).unwrap();
        assert_eq!(json, r#"{"Total Cholesterol":190.0,"LDL":100.0,"Creatinine":1.0}"#);
    }

    #[test]
    fn non_ascii_digits_are_omitted() {
        let values = extract("Creatinine \u{661}.\u{662}\nHDL 52");
        assert!(!values.contains_key("Creatinine"));
        assert_eq!(values["HDL"], 52.0);
    }

    #[test]
    fn hba1c_alias_is_consumed() {
        let values = extract("Glycohemoglobin: 5.4 %");
        assert_eq!(values["HbA1c"], 5.4);
    }

    #[test]
    fn extracts_full_panel() {
        let text = "\
            TOTAL CHOLESTEROL 201\n\
            HDL CHOLESTEROL: 48\n\
            LDL: 131.2\n\
            Triglyceride 160\n\
            Creatinine 0.9\n\
            Vitamin D 25\n\
            Vitamin B 12 410\n\
            HbA1c 5.9";
        let values = extract(text);

        assert_eq!(values.len(), 8);
        assert_eq!(values["Total Cholesterol"], 201.0);
        assert_eq!(values["HDL"], 48.0);
        assert_eq!(values["LDL"], 131.2);
        assert_eq!(values["Triglycerides"], 160.0);
        assert_eq!(values["Creatinine"], 0.9);
        assert_eq!(values["Vitamin D"], 25.0);
        assert_eq!(values["Vitamin B12"], 410.0);
        assert_eq!(values["HbA1c"], 5.9);
    }

    #[test]
    fn only_first_match_is_used() {
        let values = extract("Creatinine 1.2\nCreatinine 1.4");
        assert_eq!(values["Creatinine"], 1.2);
    }

    #[test]
    fn no_mentions_yield_empty_map() {
        assert!(extract("Complete blood count, all within range.").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn non_numeric_value_is_omitted() {
        let values = extract("HbA1c: abc\nCreatinine: 1.2.3\nHDL 52");
        assert!(!values.contains_key("HbA1c"));
        assert!(!values.contains_key("Creatinine"));
        assert_eq!(values["HDL"], 52.0);
    }

    #[test]
    fn lone_dot_is_omitted() {
        let values = extract("Vitamin D: . (pending)");
        assert!(values.is_empty());
    }

    #[test]
    fn record_keeps_file_name_and_null_date() {
        let record = extract_record("empty.pdf", "", default_patterns());
        assert_eq!(record.file, "empty.pdf");
        assert_eq!(record.date, None);
        assert!(record.biomarkers.is_empty());
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let text = "ééééé";
        let rendered = preview("data/a.pdf", text, 3);
        assert!(rendered.contains("Extracting from: data/a.pdf"));
        assert!(rendered.contains("\nééé\n"));
        assert!(!rendered.contains("éééé"));
    }

    #[test]
    fn preview_keeps_short_text_whole() {
        let rendered = preview("a.pdf", "LDL 100", 1000);
        let banner = "=".repeat(60);
        assert_eq!(rendered, format!("\nExtracting from: a.pdf\n{banner}\nLDL 100\n{banner}"));
    }
}
