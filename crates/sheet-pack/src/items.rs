//! Design records and their normalization into packable items
//!
//! Designs arrive from the surrounding application with loosely shaped,
//! optional fields. Every field is resolved explicitly here; a design that
//! cannot be measured is dropped, everything else falls back to a default.

use crate::constants::{MAX_COPIES, px_to_mm};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// One raw design as supplied by the host application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Design {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Width in device pixels (number or numeric string)
    pub width: Option<Value>,
    /// Height in device pixels (number or numeric string)
    pub height: Option<Value>,
    /// Raster preview URL
    pub preview: Option<String>,
    /// Vector markup
    pub svg: Option<String>,
    pub copies: Option<Value>,
    /// Editor toolbar state, may carry `copies`
    pub toolbar_state: Option<Value>,
    /// Arbitrary metadata, may carry `copies`
    pub meta: Option<Value>,
    pub theme_stroke_color: Option<String>,
}

impl Design {
    /// Resolve the requested copy count.
    ///
    /// Looks at `copies`, `toolbarState.copies` and `meta.copies` in that
    /// order; the first value that reads as a finite number in
    /// `(0, MAX_COPIES]` is floored.
    pub fn resolve_copies(&self) -> usize {
        let nested = |v: &Option<Value>| v.as_ref().and_then(|v| v.get("copies")).cloned();

        [self.copies.clone(), nested(&self.toolbar_state), nested(&self.meta)]
            .iter()
            .flatten()
            .filter_map(lenient_number)
            .filter(|n| *n > 0.0)
            .find(|n| {
                let within = *n <= MAX_COPIES as f64;
                if !within {
                    log::warn!("Ignoring copy count {} above the limit of {}", n, MAX_COPIES);
                }
                within
            })
            .map(|n| (n.floor() as usize).max(1))
            .unwrap_or(1)
    }
}

/// A design converted to millimeters, ready for packing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedItem {
    pub id: String,
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub area: f64,
    pub copies: usize,
    pub svg: Option<String>,
    pub preview: Option<String>,
    pub theme_stroke_color: Option<String>,
}

impl NormalizedItem {
    pub fn longer_side(&self) -> f64 {
        self.width_mm.max(self.height_mm)
    }
}

/// Normalize designs into packable items, biggest first.
///
/// Designs without a usable width or height are skipped. The returned order
/// (longer side descending, then area descending) is what drives packing
/// quality.
pub fn normalize_designs(designs: &[Design]) -> Vec<NormalizedItem> {
    let mut items: Vec<NormalizedItem> = designs
        .iter()
        .enumerate()
        .filter_map(|(index, design)| normalize_design(index, design))
        .collect();

    items.sort_by(compare_for_packing);
    items
}

fn normalize_design(index: usize, design: &Design) -> Option<NormalizedItem> {
    let width_mm = design.width.as_ref().and_then(lenient_number).map(px_to_mm);
    let height_mm = design.height.as_ref().and_then(lenient_number).map(px_to_mm);

    let (width_mm, height_mm) = match (width_mm, height_mm) {
        (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => (w, h),
        _ => {
            log::debug!("Skipping design {} without usable dimensions", index);
            return None;
        }
    };

    let id = non_blank(design.id.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("design-{}", index));
    let name = non_blank(design.name.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Design {}", index + 1));

    Some(NormalizedItem {
        id,
        name,
        width_mm,
        height_mm,
        area: width_mm * height_mm,
        copies: design.resolve_copies(),
        svg: design.svg.clone().filter(|s| !s.trim().is_empty()),
        preview: design.preview.clone().filter(|s| !s.trim().is_empty()),
        theme_stroke_color: design.theme_stroke_color.clone(),
    })
}

/// Longer side descending, then area descending, then id for determinism
fn compare_for_packing(a: &NormalizedItem, b: &NormalizedItem) -> Ordering {
    b.longer_side()
        .total_cmp(&a.longer_side())
        .then_with(|| b.area.total_cmp(&a.area))
        .then_with(|| a.id.cmp(&b.id))
}

/// Read a JSON number or numeric string as a finite float
fn lenient_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_number() {
        assert_eq!(lenient_number(&json!(3)), Some(3.0));
        assert_eq!(lenient_number(&json!("2.5")), Some(2.5));
        assert_eq!(lenient_number(&json!(" 4 ")), Some(4.0));
        assert_eq!(lenient_number(&json!("abc")), None);
        assert_eq!(lenient_number(&json!(null)), None);
        assert_eq!(lenient_number(&json!([1])), None);
        assert_eq!(lenient_number(&json!("inf")), None);
    }

    #[test]
    fn test_copies_resolution_order() {
        let design = Design {
            copies: Some(json!(0)),
            toolbar_state: Some(json!({ "copies": "3.7" })),
            meta: Some(json!({ "copies": 9 })),
            ..Default::default()
        };
        assert_eq!(design.resolve_copies(), 3);

        let design = Design {
            toolbar_state: Some(json!({ "other": 1 })),
            meta: Some(json!({ "copies": 9 })),
            ..Default::default()
        };
        assert_eq!(design.resolve_copies(), 9);

        assert_eq!(Design::default().resolve_copies(), 1);

        let design = Design {
            copies: Some(json!("-2")),
            ..Default::default()
        };
        assert_eq!(design.resolve_copies(), 1);
    }

    #[test]
    fn test_huge_copy_count_is_ignored() {
        let design = Design {
            copies: Some(json!(1e15)),
            meta: Some(json!({ "copies": 4 })),
            ..Default::default()
        };
        assert_eq!(design.resolve_copies(), 4);

        let design = Design {
            copies: Some(json!("10001")),
            ..Default::default()
        };
        assert_eq!(design.resolve_copies(), 1);

        let design = Design {
            copies: Some(json!(MAX_COPIES)),
            ..Default::default()
        };
        assert_eq!(design.resolve_copies(), MAX_COPIES);
    }

    #[test]
    fn test_fractional_copies_below_one_floor_to_one() {
        let design = Design {
            copies: Some(json!(0.5)),
            ..Default::default()
        };
        assert_eq!(design.resolve_copies(), 1);
    }
}
