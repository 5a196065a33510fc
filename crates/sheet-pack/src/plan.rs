use crate::items::{Design, NormalizedItem, normalize_designs};
use crate::layout::{PackingResult, pack};
use crate::options::PackingOptions;
use crate::summary::{LayoutSummary, summarize};
use crate::types::SheetSize;
use serde::Serialize;

/// Outcome of one planning pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub sheet_size: SheetSize,
    pub items: Vec<NormalizedItem>,
    pub result: PackingResult,
    pub summary: LayoutSummary,
}

/// Normalize, pack and summarize in one pass.
///
/// Pure with respect to its inputs: the same designs and options always
/// yield the same plan.
pub fn plan(designs: &[Design], options: &PackingOptions) -> Plan {
    let sheet_size = options.sheet_size();
    let items = normalize_designs(designs);
    let result = pack(&items, sheet_size, options.spacing_mm, &options.packing);
    let summary = summarize(&items, &result);

    log::info!(
        "Packed {}/{} copies of {} items onto {} sheet(s) ({:.1}% coverage), {} left over",
        summary.placed_copies,
        summary.requested_copies,
        items.len(),
        summary.sheet_count,
        summary.coverage * 100.0,
        summary.leftover_count
    );

    Plan {
        sheet_size,
        items,
        result,
        summary,
    }
}
