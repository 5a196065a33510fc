//! Coordinate normalization for vector markup
//!
//! After these passes the root has a `(0,0)`-anchored viewBox and no
//! descendant carries percentage geometry.

use crate::constants::NON_RENDERING_ELEMENTS;

use super::tree::{Element, Node};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }

    /// Parse `"min-x min-y width height"`, comma or whitespace separated
    pub fn parse(value: &str) -> Option<Self> {
        let numbers: Vec<f64> = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().ok().filter(|n| n.is_finite()))
            .collect::<Option<_>>()?;

        match numbers[..] {
            [min_x, min_y, width, height] => Some(Self {
                min_x,
                min_y,
                width,
                height,
            }),
            _ => None,
        }
    }

    pub fn has_origin_offset(&self) -> bool {
        self.min_x != 0.0 || self.min_y != 0.0
    }

    pub fn to_attribute(&self) -> String {
        format!(
            "{} {} {} {}",
            format_number(self.min_x),
            format_number(self.min_y),
            format_number(self.width),
            format_number(self.height)
        )
    }
}

/// Move a declared non-zero viewBox origin into a translate group.
///
/// Every child except the non-rendering ones (`defs`, `style`, ...) is
/// wrapped in `<g transform="translate(-minX,-minY)">` and the viewBox is
/// rewritten to start at `(0,0)`. Returns the resulting viewBox, if one was
/// declared.
pub fn normalize_origin(root: &mut Element) -> Option<ViewBox> {
    let view_box = root.get("viewBox").and_then(ViewBox::parse)?;
    if !view_box.has_origin_offset() {
        return Some(view_box);
    }

    let mut group = Element::new(format!("{}g", root.prefix()));
    group.set(
        "transform",
        format!(
            "translate({},{})",
            format_number(-view_box.min_x),
            format_number(-view_box.min_y)
        ),
    );

    let mut kept = Vec::new();
    for child in std::mem::take(&mut root.children) {
        let non_rendering = matches!(
            &child,
            Node::Element(e) if NON_RENDERING_ELEMENTS.contains(&e.local_name())
        );
        if non_rendering {
            kept.push(child);
        } else {
            group.children.push(child);
        }
    }
    kept.push(Node::Element(group));
    root.children = kept;

    let shifted = ViewBox::from_size(view_box.width, view_box.height);
    root.set("viewBox", shifted.to_attribute());
    Some(shifted)
}

/// Viewbox used as the basis for percentage resolution.
///
/// Uses the declared one when present. Otherwise a `viewBox` is written from
/// explicit `width`/`height` attributes, falling back to the item's source
/// size, so the resolved coordinates always have a coordinate system.
pub fn ensure_view_box(
    root: &mut Element,
    declared: Option<ViewBox>,
    source: (f64, f64),
) -> ViewBox {
    if let Some(view_box) = declared {
        return view_box;
    }

    let width = root.get("width").and_then(parse_length);
    let height = root.get("height").and_then(parse_length);
    if let (Some(width), Some(height)) = (width, height) {
        let view_box = ViewBox::from_size(width, height);
        root.set("viewBox", view_box.to_attribute());
        return view_box;
    }

    let view_box = ViewBox::from_size(source.0, source.1);
    root.set("viewBox", view_box.to_attribute());
    view_box
}

/// Replace percentage geometry on every descendant with absolute values
pub fn resolve_percentages(root: &mut Element, view_box: &ViewBox) {
    root.walk_descendants_mut(&mut |element| {
        for (key, value) in element.attributes.iter_mut() {
            let Some(basis) = percentage_basis(key, view_box) else {
                continue;
            };
            let Some(pct) = value.trim().strip_suffix('%') else {
                continue;
            };
            if let Ok(pct) = pct.trim().parse::<f64>() {
                *value = format_number(pct / 100.0 * basis);
            }
        }
    });
}

fn percentage_basis(attribute: &str, view_box: &ViewBox) -> Option<f64> {
    match attribute {
        "width" | "x" | "cx" | "rx" => Some(view_box.width),
        "height" | "y" | "cy" | "ry" => Some(view_box.height),
        "r" => Some(view_box.width.min(view_box.height)),
        _ => None,
    }
}

/// Absolute length from a `width`/`height` attribute (`"120"`, `"120px"`)
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

/// Compact decimal form for markup: no trailing zeros, no negative zero
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.4}", value);
    match text.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}
