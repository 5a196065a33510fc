use crate::items::NormalizedItem;
use crate::layout::PackingResult;
use serde::Serialize;

/// Aggregate statistics over one packing result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    /// Number of sheets used
    pub sheet_count: usize,
    /// Used area / sheet area, one entry per sheet
    pub sheet_coverage: Vec<f64>,
    /// Used area over the total area of all sheets (0 when there are none)
    pub coverage: f64,
    /// Copies asked for across all items
    pub requested_copies: usize,
    /// Copies that made it onto a sheet
    pub placed_copies: usize,
    /// Copies that did not fit
    pub leftover_count: usize,
}

/// Derive layout statistics from a packing result
pub fn summarize(items: &[NormalizedItem], result: &PackingResult) -> LayoutSummary {
    let sheet_count = result.sheets.len();
    let used_area: f64 = result.sheets.iter().map(|s| s.used_area).sum();
    let total_area: f64 = result.sheets.iter().map(|s| s.area()).sum();

    let coverage = if sheet_count > 0 && total_area > 0.0 {
        used_area / total_area
    } else {
        0.0
    };

    LayoutSummary {
        sheet_count,
        sheet_coverage: result.sheets.iter().map(|s| s.coverage()).collect(),
        coverage,
        requested_copies: items.iter().map(|i| i.copies).sum(),
        placed_copies: result.placed_count(),
        leftover_count: result.leftovers.len(),
    }
}
