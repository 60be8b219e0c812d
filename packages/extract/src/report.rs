//! Clinical summary of extracted results.
//!
//! Computes per-biomarker min/max/mean over a window of reports and
//! interprets the latest value against a fixed reference range, flagging
//! large changes since the first report in the window.

use std::fmt;

use biomarker_extract_models::{BiomarkerStatus, ExtractionResult, ReferenceRange};
use strum_macros::{Display, EnumString};

/// Percent change (after rounding to one decimal) at which a trend is
/// reported.
const TREND_THRESHOLD_PERCENT: f64 = 5.0;

/// Number of reports in [`ReportWindow::Recent`].
const RECENT_REPORTS: usize = 3;

/// Which reports a summary covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ReportWindow {
    /// Every report.
    #[default]
    All,
    /// The three most recent reports.
    Recent,
    /// Only the most recent report.
    Last,
}

impl ReportWindow {
    /// Returns the tail of `results` covered by this window.
    #[must_use]
    pub fn select(self, results: &[ExtractionResult]) -> &[ExtractionResult] {
        let keep = match self {
            Self::All => results.len(),
            Self::Recent => RECENT_REPORTS,
            Self::Last => 1,
        };
        &results[results.len().saturating_sub(keep)..]
    }
}

/// Returns the reference range for a known biomarker.
#[must_use]
pub fn reference_range(name: &str) -> Option<ReferenceRange> {
    let (low, high) = match name {
        "Total Cholesterol" => (125.0, 200.0),
        "LDL" => (0.0, 100.0),
        "HDL" => (40.0, 60.0),
        "Triglycerides" => (0.0, 150.0),
        "Creatinine" => (0.6, 1.3),
        "Vitamin D" => (20.0, 50.0),
        "Vitamin B12" => (200.0, 900.0),
        "HbA1c" => (4.0, 5.6),
        _ => return None,
    };
    Some(ReferenceRange::new(low, high))
}

/// Returns the advice shown when a known biomarker is out of range.
#[must_use]
pub fn recommendation(name: &str) -> Option<&'static str> {
    Some(match name {
        "Total Cholesterol" => "Consider reducing saturated fat and increasing physical activity.",
        "LDL" => "Consider dietary changes, physical exercise, or lipid-lowering therapy.",
        "HDL" => "Maintain regular exercise and healthy fats intake.",
        "Triglycerides" => "Reduce sugar and refined carbs, consider omega-3 intake.",
        "Creatinine" => "Evaluate kidney function, monitor hydration and blood pressure.",
        "Vitamin D" => "Consider supplements and 15-30 min daily sunlight exposure.",
        "Vitamin B12" => "Consider oral supplementation or B12-rich foods like meat and eggs.",
        "HbA1c" => "Monitor glucose, maintain low-carb diet, and increase physical activity.",
        _ => return None,
    })
}

/// Min, max and mean of one biomarker over a window.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomarkerStats {
    /// Biomarker name.
    pub name: String,
    /// Number of reports that contained a value.
    pub count: usize,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
}

impl fmt::Display for BiomarkerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Max: {} | Min: {} | Avg: {:.2}",
            self.name, self.max, self.min, self.mean
        )
    }
}

/// Interpretation of the latest value of one biomarker.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    /// Biomarker name.
    pub name: String,
    /// Most recent value in the window.
    pub latest: f64,
    /// Latest value compared to the reference range.
    pub status: BiomarkerStatus,
    /// Change from the first to the latest value, in percent rounded to one
    /// decimal. Only set when the change is at least 5% in either direction.
    pub change_percent: Option<f64>,
    /// Advice for out-of-range values.
    pub recommendation: Option<&'static str>,
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        if let Some(change) = self.change_percent {
            let trend = if change > 0.0 { "increased" } else { "decreased" };
            write!(f, "{trend} by {:.1}% since first report. ", change.abs())?;
        }
        write!(f, "Currently {} at {}.", self.status, self.latest)?;
        if let Some(advice) = self.recommendation {
            write!(f, " Recommendation: {advice}")?;
        }
        Ok(())
    }
}

/// Statistics and interpretations for a window of reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Per-biomarker statistics.
    pub stats: Vec<BiomarkerStats>,
    /// Per-biomarker interpretations.
    pub interpretations: Vec<Interpretation>,
}

/// Lists biomarker names across `results`: the first record's names, then
/// any others in the order they first appear.
#[must_use]
pub fn biomarker_names(results: &[ExtractionResult]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in results {
        for name in record.biomarkers.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

/// Summarizes `results` over `window`.
///
/// Biomarker names are collected from all results; biomarkers without any
/// value inside the window are left out.
#[must_use]
pub fn summarize(results: &[ExtractionResult], window: ReportWindow) -> Summary {
    let selected = window.select(results);
    let mut summary = Summary::default();

    for name in biomarker_names(results) {
        let values: Vec<f64> = selected.iter().filter_map(|r| r.value(&name)).collect();
        let (Some(&first), Some(&latest)) = (values.first(), values.last()) else {
            continue;
        };

        summary.stats.push(stats(&name, &values));
        summary
            .interpretations
            .push(interpret(&name, first, latest));
    }

    summary
}

#[allow(clippy::cast_precision_loss)]
fn stats(name: &str, values: &[f64]) -> BiomarkerStats {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    BiomarkerStats {
        name: name.to_owned(),
        count: values.len(),
        min,
        max,
        mean,
    }
}

fn interpret(name: &str, first: f64, latest: f64) -> Interpretation {
    let status = reference_range(name).map_or(BiomarkerStatus::Normal, |r| r.classify(latest));

    // A zero baseline has no meaningful percent change.
    let change_percent = if first == 0.0 {
        None
    } else {
        let percent = ((latest - first) / first * 100.0 * 10.0).round() / 10.0;
        (percent.abs() >= TREND_THRESHOLD_PERCENT).then_some(percent)
    };

    let recommendation = if status == BiomarkerStatus::Normal {
        None
    } else {
        recommendation(name)
    };

    Interpretation {
        name: name.to_owned(),
        latest,
        status,
        change_percent,
        recommendation,
    }
}
