//! Vector content preparation for placements
//!
//! Each placement's markup goes through the same pipeline:
//! - Parse into an owned element tree
//! - Anchor the coordinate space at `(0,0)`
//! - Resolve percentage geometry against the viewBox
//! - Reclassify colors, separately for the export and preview copies

mod geometry;
mod recolor;
mod tree;

pub use geometry::ViewBox;

use crate::constants::SVG_DATA_URI_PREFIX;
use crate::layout::Placement;
use crate::options::RenderConfig;
use crate::types::{PackError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// What the display and export layers draw for one placement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderAsset {
    #[serde(rename_all = "camelCase")]
    Vector {
        /// Self-contained markup for archiving and document generation
        export_markup: String,
        /// Same content sized to fill its container
        preview_markup: String,
        /// `preview_markup` as an inline data reference
        preview_data_uri: String,
    },
    Raster {
        url: String,
    },
}

/// Markup after normalization, one string per rendering intent
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSvg {
    pub export_markup: String,
    pub preview_markup: String,
}

impl NormalizedSvg {
    pub fn preview_data_uri(&self) -> String {
        format!(
            "{}{}",
            SVG_DATA_URI_PREFIX,
            STANDARD.encode(self.preview_markup.as_bytes())
        )
    }
}

/// Normalize vector markup for placement.
///
/// # Arguments
/// * `markup` - Source markup, root must be an `svg` element
/// * `source_size` - Authored item size, basis when no viewBox can be found
/// * `theme_stroke_color` - Paint that should render as an outline
/// * `config` - Colors and stroke defaults
pub fn normalize_svg(
    markup: &str,
    source_size: (f64, f64),
    theme_stroke_color: Option<&str>,
    config: &RenderConfig,
) -> Result<NormalizedSvg> {
    let mut root = tree::parse(markup)?;
    if root.local_name() != "svg" {
        return Err(PackError::InvalidMarkup(format!(
            "root element is <{}>, expected <svg>",
            root.name
        )));
    }

    let declared = geometry::normalize_origin(&mut root);
    let view_box = geometry::ensure_view_box(&mut root, declared, source_size);
    geometry::resolve_percentages(&mut root, &view_box);

    let mut export = root.clone();
    recolor::reclassify_colors(&mut export, theme_stroke_color, config);

    let mut preview = root;
    recolor::reclassify_colors(&mut preview, theme_stroke_color, config);
    preview.set("width", "100%");
    preview.set("height", "100%");

    Ok(NormalizedSvg {
        export_markup: tree::serialize(&export)?,
        preview_markup: tree::serialize(&preview)?,
    })
}

/// Build the render asset for a placement.
///
/// Vector markup wins over a raster preview. Returns `None` when there is
/// nothing to draw or the markup cannot be processed; the failure is logged.
pub fn prepare_for_render(placement: &Placement, config: &RenderConfig) -> Option<RenderAsset> {
    if let Some(markup) = &placement.svg {
        return match normalize_svg(
            markup,
            (placement.source_width, placement.source_height),
            placement.theme_stroke_color.as_deref(),
            config,
        ) {
            Ok(svg) => Some(RenderAsset::Vector {
                preview_data_uri: svg.preview_data_uri(),
                export_markup: svg.export_markup,
                preview_markup: svg.preview_markup,
            }),
            Err(e) => {
                log::warn!("Failed to prepare markup for {}: {}", placement.id, e);
                None
            }
        };
    }

    placement
        .preview
        .as_ref()
        .map(|url| RenderAsset::Raster { url: url.clone() })
}
