//! Export payload for the document-generation collaborator
//!
//! One record per sheet with every placement's geometry and resolved
//! markup, plus one vector file per item for archiving.

use crate::items::NormalizedItem;
use crate::layout::{PackingResult, Placement, Sheet};
use crate::options::RenderConfig;
use crate::render::{RenderAsset, normalize_svg, prepare_for_render};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub sheets: Vec<ExportSheet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSheet {
    pub width_mm: f64,
    pub height_mm: f64,
    pub placements: Vec<ExportPlacement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlacement {
    pub id: String,
    pub base_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotated: bool,
    pub copy_index: usize,
    pub copies: usize,
    /// Normalized export markup, `null` when the item has none
    pub svg: Option<String>,
}

/// A standalone vector file for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFile {
    pub base_id: String,
    pub file_name: String,
    pub markup: String,
}

/// Build the per-sheet payload handed to document generation
pub fn build_export_payload(result: &PackingResult, config: &RenderConfig) -> ExportPayload {
    ExportPayload {
        sheets: result
            .sheets
            .iter()
            .map(|sheet| export_sheet(sheet, config))
            .collect(),
    }
}

fn export_sheet(sheet: &Sheet, config: &RenderConfig) -> ExportSheet {
    ExportSheet {
        width_mm: sheet.width,
        height_mm: sheet.height,
        placements: sheet
            .placements
            .iter()
            .map(|p| export_placement(p, config))
            .collect(),
    }
}

fn export_placement(placement: &Placement, config: &RenderConfig) -> ExportPlacement {
    let svg = match prepare_for_render(placement, config) {
        Some(RenderAsset::Vector { export_markup, .. }) => Some(export_markup),
        _ => None,
    };

    ExportPlacement {
        id: placement.id.clone(),
        base_id: placement.base_id.clone(),
        x: placement.x,
        y: placement.y,
        width: placement.width,
        height: placement.height,
        rotated: placement.rotated,
        copy_index: placement.copy_index,
        copies: placement.copies,
        svg,
    }
}

/// One `{base_id}.svg` per item whose markup normalizes.
///
/// Ids come from host input, so the file name keeps only `[A-Za-z0-9._-]`
/// and maps everything else to `_`; it never contains a path separator.
pub fn item_files(items: &[NormalizedItem], config: &RenderConfig) -> Vec<ItemFile> {
    items
        .iter()
        .filter_map(|item| {
            let markup = item.svg.as_deref()?;
            match normalize_svg(
                markup,
                (item.width_mm, item.height_mm),
                item.theme_stroke_color.as_deref(),
                config,
            ) {
                Ok(svg) => Some(ItemFile {
                    base_id: item.id.clone(),
                    file_name: format!("{}.svg", file_stem(&item.id)),
                    markup: svg.export_markup,
                }),
                Err(e) => {
                    log::warn!("Skipping vector file for {}: {}", item.id, e);
                    None
                }
            }
        })
        .collect()
}

fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
