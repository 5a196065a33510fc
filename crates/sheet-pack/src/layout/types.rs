//! Layout data types for sheet packing
//!
//! These types describe the packer's working state (queue entries, rows)
//! and its output (sheets with placements, leftovers).

use crate::items::NormalizedItem;
use crate::types::SheetSize;
use serde::Serialize;

/// One concrete copy of a normalized item waiting to be placed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    /// Id of the item this copy was expanded from
    pub base_id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    /// 1-based index of this copy
    pub copy_index: usize,
    /// Total copies requested for the item
    pub copies: usize,
    pub svg: Option<String>,
    pub preview: Option<String>,
    pub theme_stroke_color: Option<String>,
}

impl QueueEntry {
    pub fn from_item(item: &NormalizedItem, copy_index: usize) -> Self {
        Self {
            base_id: item.id.clone(),
            name: item.name.clone(),
            width: item.width_mm,
            height: item.height_mm,
            area: item.area,
            copy_index,
            copies: item.copies,
            svg: item.svg.clone(),
            preview: item.preview.clone(),
            theme_stroke_color: item.theme_stroke_color.clone(),
        }
    }

    /// Placement id for this copy
    pub fn placement_id(&self) -> String {
        format!("{}::{}", self.base_id, self.copy_index)
    }
}

/// A copy that did not fit on any sheet at the current sheet size
pub type Leftover = QueueEntry;

/// One way of laying an entry down: as authored or turned by 90°
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub width: f64,
    pub height: f64,
    pub rotated: bool,
}

/// Final position of one copy on a sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// `{base_id}::{copy_index}`
    pub id: String,
    pub base_id: String,
    pub name: String,
    /// Offset from the sheet's left edge (mm)
    pub x: f64,
    /// Offset from the sheet's top edge (mm)
    pub y: f64,
    /// Placed width, after rotation
    pub width: f64,
    /// Placed height, after rotation
    pub height: f64,
    pub rotated: bool,
    /// Width as authored
    pub source_width: f64,
    /// Height as authored
    pub source_height: f64,
    pub copy_index: usize,
    pub copies: usize,
    pub svg: Option<String>,
    pub preview: Option<String>,
    pub theme_stroke_color: Option<String>,
}

impl Placement {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A horizontal strip of a sheet holding items of one fixed height
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Offset from the sheet top (mm)
    pub y: f64,
    /// Fixed when the row is opened, never grows
    pub height: f64,
    /// Width consumed so far, spacing between items included
    pub used_width: f64,
    /// Indices into the owning sheet's placements
    pub placements: Vec<usize>,
}

impl Row {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// One output sheet and everything placed on it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub width: f64,
    pub height: f64,
    pub rows: Vec<Row>,
    /// All placements in the order they were made
    pub placements: Vec<Placement>,
    /// Where the next row would start (mm from the top)
    pub next_row_y: f64,
    /// Sum of placed item areas, spacing excluded (mm²)
    pub used_area: f64,
}

impl Sheet {
    pub fn new(size: SheetSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            rows: Vec::new(),
            placements: Vec::new(),
            next_row_y: 0.0,
            used_area: 0.0,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Fraction of the sheet covered by items
    pub fn coverage(&self) -> f64 {
        let area = self.area();
        if area > 0.0 { self.used_area / area } else { 0.0 }
    }

    /// Placements belonging to one row, in left-to-right order
    pub fn row_placements(&self, row: &Row) -> impl Iterator<Item = &Placement> {
        row.placements.iter().filter_map(|&i| self.placements.get(i))
    }
}

/// Output of one packing run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PackingResult {
    pub sheets: Vec<Sheet>,
    pub leftovers: Vec<Leftover>,
}

impl PackingResult {
    pub fn placed_count(&self) -> usize {
        self.sheets.iter().map(|s| s.placements.len()).sum()
    }

    /// All placements across all sheets, paired with their sheet index
    pub fn placements(&self) -> impl Iterator<Item = (usize, &Placement)> {
        self.sheets
            .iter()
            .enumerate()
            .flat_map(|(i, sheet)| sheet.placements.iter().map(move |p| (i, p)))
    }
}
