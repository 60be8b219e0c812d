//! Biomarker pattern table.
//!
//! Each [`BiomarkerPattern`] pairs a biomarker name with a case-insensitive
//! regex and the index of the capture group that holds the numeric value.
//! The built-in table is returned by [`default_patterns`]; a replacement
//! table can be loaded from TOML with [`load_patterns`].

use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::ExtractError;

/// Which capture group of a pattern holds the numeric value.
///
/// Patterns with a single group capture the value directly. Patterns with
/// more than one group use group 1 for an optional qualifier (such as
/// `cholesterol` after `LDL`, or the `hba1c`/`glycohemoglobin` alias) and
/// group 2 for the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueGroup(usize);

impl ValueGroup {
    /// The value is the only capture group.
    pub const ONLY: Self = Self(1);

    /// The value follows a qualifier group.
    pub const AFTER_QUALIFIER: Self = Self(2);

    /// Picks the value group from the number of capture groups in a
    /// pattern: group 1 when there is exactly one, group 2 otherwise.
    #[must_use]
    pub const fn from_group_count(groups: usize) -> Self {
        if groups == 1 {
            Self::ONLY
        } else {
            Self::AFTER_QUALIFIER
        }
    }

    /// Returns the capture group index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A named biomarker and the regex used to find its value.
#[derive(Debug, Clone)]
pub struct BiomarkerPattern {
    name: String,
    regex: Regex,
    value_group: ValueGroup,
}

impl BiomarkerPattern {
    /// Compiles `pattern` case-insensitively, inferring the value group
    /// from its capture group count.
    ///
    /// # Errors
    ///
    /// * [`ExtractError::Pattern`] if the regex does not compile
    /// * [`ExtractError::ValueGroup`] if the regex has no capture groups
    pub fn new(name: &str, pattern: &str) -> Result<Self, ExtractError> {
        let regex = compile(name, pattern)?;
        let groups = regex.captures_len() - 1;
        Self::build(name, regex, ValueGroup::from_group_count(groups))
    }

    /// Compiles `pattern` case-insensitively with an explicit value group.
    ///
    /// # Errors
    ///
    /// * [`ExtractError::Pattern`] if the regex does not compile
    /// * [`ExtractError::ValueGroup`] if `group` is not a capture group of
    ///   the regex
    pub fn with_value_group(
        name: &str,
        pattern: &str,
        group: usize,
    ) -> Result<Self, ExtractError> {
        let regex = compile(name, pattern)?;
        Self::build(name, regex, ValueGroup(group))
    }

    fn build(name: &str, regex: Regex, value_group: ValueGroup) -> Result<Self, ExtractError> {
        let groups = regex.captures_len() - 1;
        if value_group.index() == 0 || value_group.index() > groups {
            return Err(ExtractError::ValueGroup {
                name: name.to_owned(),
                group: value_group.index(),
                groups,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            regex,
            value_group,
        })
    }

    /// Biomarker name used as the key in extraction results.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The capture group holding the value.
    #[must_use]
    pub const fn value_group(&self) -> ValueGroup {
        self.value_group
    }

    /// Returns the raw value text of the first match in `text`, or `None`
    /// if the pattern does not match.
    ///
    /// A value group that did not participate in the match yields an empty
    /// string.
    #[must_use]
    pub fn find_raw<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.regex.captures(text)?;
        Some(caps.get(self.value_group.index()).map_or("", |m| m.as_str()))
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ExtractError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ExtractError::Pattern {
            name: name.to_owned(),
            source,
        })
}

/// Built-in biomarkers, in the order they are searched.
const DEFAULT_TABLE: &[(&str, &str)] = &[
    ("Total Cholesterol", r"(?i)total\s*cholesterol\s*[:\s]*([\d.]+)"),
    ("LDL", r"(?i)ldl\s*(cholesterol)?\s*[:\s]*([\d.]+)"),
    ("HDL", r"(?i)hdl\s*(cholesterol)?\s*[:\s]*([\d.]+)"),
    ("Triglycerides", r"(?i)triglycerides?\s*[:\s]*([\d.]+)"),
    ("Creatinine", r"(?i)creatinine\s*[:\s]*([\d.]+)"),
    ("Vitamin D", r"(?i)vitamin\s*d\s*[:\s]*([\d.]+)"),
    ("Vitamin B12", r"(?i)vitamin\s*b\s*12\s*[:\s]*([\d.]+)"),
    ("HbA1c", r"(?i)(hba1c|glycohemoglobin)\s*[:\s]*([\d.]+)"),
];

static DEFAULT_PATTERNS: LazyLock<Vec<BiomarkerPattern>> = LazyLock::new(|| {
    DEFAULT_TABLE
        .iter()
        .map(|(name, pattern)| BiomarkerPattern::new(name, pattern).expect("valid regex"))
        .collect()
});

/// Returns the built-in biomarker table.
#[must_use]
pub fn default_patterns() -> &'static [BiomarkerPattern] {
    &DEFAULT_PATTERNS
}

/// On-disk pattern table.
#[derive(Debug, Deserialize)]
struct PatternFile {
    biomarkers: Vec<PatternDefinition>,
}

/// A single `[[biomarkers]]` entry of a pattern file.
#[derive(Debug, Deserialize)]
struct PatternDefinition {
    name: String,
    pattern: String,
    /// Explicit value group; inferred from the group count when omitted.
    #[serde(default)]
    value_group: Option<usize>,
}

/// Parses a TOML pattern table, preserving entry order.
///
/// # Errors
///
/// * [`ExtractError::Config`] if the document is not valid TOML or does not
///   match the expected schema
/// * [`ExtractError::Pattern`] / [`ExtractError::ValueGroup`] if any entry
///   is invalid
pub fn parse_patterns(source: &str) -> Result<Vec<BiomarkerPattern>, ExtractError> {
    let file: PatternFile = toml::from_str(source)?;

    file.biomarkers
        .iter()
        .map(|def| match def.value_group {
            Some(group) => BiomarkerPattern::with_value_group(&def.name, &def.pattern, group),
            None => BiomarkerPattern::new(&def.name, &def.pattern),
        })
        .collect()
}

/// Reads and parses a TOML pattern table from `path`.
///
/// # Errors
///
/// * [`ExtractError::PatternFile`] if the file cannot be read
/// * any error from [`parse_patterns`]
pub fn load_patterns(path: &Path) -> Result<Vec<BiomarkerPattern>, ExtractError> {
    let source = std::fs::read_to_string(path).map_err(|source| ExtractError::PatternFile {
        path: path.display().to_string(),
        source,
    })?;

    let patterns = parse_patterns(&source)?;
    log::info!(
        "Loaded {} biomarker pattern(s) from {}",
        patterns.len(),
        path.display()
    );

    Ok(patterns)
}
