//! Greedy shelf packing
//!
//! Copies are placed one at a time, biggest item first, and never moved
//! again. For every copy the search order is fixed:
//! 1. each existing sheet in creation order, first appending to one of its
//!    rows (any orientation), then opening a new row on it (any orientation)
//! 2. a fresh sheet, if the copy fits on an empty one
//! 3. otherwise the copy is reported as a leftover
//!
//! Orientations are always tried unrotated first. Rows keep the height of
//! the orientation that opened them; spacing only separates neighbours and
//! rows, never the sheet edges.

use crate::items::NormalizedItem;
use crate::options::PackingConfig;
use crate::types::SheetSize;

use super::{Candidate, PackingResult, Placement, QueueEntry, Row, Sheet};

/// Pack normalized items onto as few sheets as the greedy rule allows.
///
/// # Arguments
/// * `items` - Items in packing order (see [`crate::normalize_designs`])
/// * `sheet_size` - Sheet dimensions in mm
/// * `spacing` - Gap between items in a row and between rows (mm)
/// * `config` - Fit tolerances
pub fn pack(
    items: &[NormalizedItem],
    sheet_size: SheetSize,
    spacing: f64,
    config: &PackingConfig,
) -> PackingResult {
    let queue = expand_copies(items);

    if !sheet_size.is_usable() {
        log::warn!(
            "Sheet size {} x {} mm is unusable, {} copies left over",
            sheet_size.width,
            sheet_size.height,
            queue.len()
        );
        return PackingResult {
            sheets: Vec::new(),
            leftovers: queue,
        };
    }

    let packer = ShelfPacker {
        sheet_size,
        spacing: if spacing.is_finite() { spacing.max(0.0) } else { 0.0 },
        config: *config,
    };

    let mut result = PackingResult::default();
    for entry in queue {
        let candidates = orientation_candidates(&entry, config.square_tolerance_mm);

        if result
            .sheets
            .iter_mut()
            .any(|sheet| packer.place_on_sheet(sheet, &entry, &candidates))
        {
            continue;
        }

        let mut sheet = Sheet::new(sheet_size);
        if packer.place_on_sheet(&mut sheet, &entry, &candidates) {
            result.sheets.push(sheet);
        } else {
            log::debug!(
                "{} ({:.1} x {:.1} mm) does not fit an empty sheet",
                entry.placement_id(),
                entry.width,
                entry.height
            );
            result.leftovers.push(entry);
        }
    }

    result
}

/// Expand every item into its copies, item order first, then copy order
pub fn expand_copies(items: &[NormalizedItem]) -> Vec<QueueEntry> {
    items
        .iter()
        .flat_map(|item| (1..=item.copies).map(move |i| QueueEntry::from_item(item, i)))
        .collect()
}

/// Orientations to try for an entry; square entries are only tried as authored
pub fn orientation_candidates(entry: &QueueEntry, square_tolerance: f64) -> Vec<Candidate> {
    let mut candidates = vec![Candidate {
        width: entry.width,
        height: entry.height,
        rotated: false,
    }];

    if (entry.width - entry.height).abs() > square_tolerance {
        candidates.push(Candidate {
            width: entry.height,
            height: entry.width,
            rotated: true,
        });
    }

    candidates
}

struct ShelfPacker {
    sheet_size: SheetSize,
    spacing: f64,
    config: PackingConfig,
}

impl ShelfPacker {
    /// Try existing rows, then a new row. Returns whether the entry was placed.
    fn place_on_sheet(
        &self,
        sheet: &mut Sheet,
        entry: &QueueEntry,
        candidates: &[Candidate],
    ) -> bool {
        for candidate in candidates {
            let slot = sheet
                .rows
                .iter()
                .enumerate()
                .find_map(|(i, row)| self.row_offset(row, candidate).map(|x| (i, x)));

            if let Some((row_index, x)) = slot {
                place(sheet, row_index, x, entry, candidate);
                return true;
            }
        }

        for candidate in candidates {
            if self.fits_new_row(sheet, candidate) {
                let y = sheet.next_row_y;
                sheet.rows.push(Row {
                    y,
                    height: candidate.height,
                    used_width: 0.0,
                    placements: Vec::new(),
                });
                sheet.next_row_y = y + candidate.height + self.spacing;

                let row_index = sheet.rows.len() - 1;
                place(sheet, row_index, 0.0, entry, candidate);
                return true;
            }
        }

        false
    }

    /// Left edge for the candidate if it can be appended to the row
    fn row_offset(&self, row: &Row, candidate: &Candidate) -> Option<f64> {
        if (candidate.height - row.height).abs() > self.config.row_height_tolerance_mm {
            return None;
        }

        let x = if row.is_empty() {
            row.used_width
        } else {
            row.used_width + self.spacing
        };

        (x + candidate.width <= self.sheet_size.width + self.config.fit_epsilon_mm).then_some(x)
    }

    fn fits_new_row(&self, sheet: &Sheet, candidate: &Candidate) -> bool {
        let eps = self.config.fit_epsilon_mm;
        candidate.width <= self.sheet_size.width + eps
            && sheet.next_row_y + candidate.height <= self.sheet_size.height + eps
    }
}

fn place(sheet: &mut Sheet, row_index: usize, x: f64, entry: &QueueEntry, candidate: &Candidate) {
    let index = sheet.placements.len();
    let row = &mut sheet.rows[row_index];

    let placement = Placement {
        id: entry.placement_id(),
        base_id: entry.base_id.clone(),
        name: entry.name.clone(),
        x,
        y: row.y,
        width: candidate.width,
        height: candidate.height,
        rotated: candidate.rotated,
        source_width: entry.width,
        source_height: entry.height,
        copy_index: entry.copy_index,
        copies: entry.copies,
        svg: entry.svg.clone(),
        preview: entry.preview.clone(),
        theme_stroke_color: entry.theme_stroke_color.clone(),
    };

    row.used_width = x + candidate.width;
    row.placements.push(index);
    sheet.used_area += placement.area();
    sheet.placements.push(placement);
}
