use crate::layout::{Placement, Sheet};
use crate::options::RenderConfig;
use crate::render::{RenderAsset, prepare_for_render};
use svg::Document;
use svg::node::element::{Group, Image, Rectangle, Text, Title};

/// How sheet previews are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewOptions {
    /// Draw `copy/copies` labels on each placement
    pub show_labels: bool,
    /// Draw each placement's artwork instead of a plain box
    pub embed_artwork: bool,
    pub sheet_fill: &'static str,
    pub item_fill: &'static str,
    pub rotated_item_fill: &'static str,
    pub item_stroke: &'static str,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            show_labels: true,
            embed_artwork: true,
            sheet_fill: "#ffffff",
            item_fill: "#dbeafe",
            rotated_item_fill: "#fde68a",
            item_stroke: "#64748b",
        }
    }
}

/// Draw one sheet at its millimeter scale.
///
/// The document's viewBox is the sheet itself, so the display layer can
/// scale it to any thumbnail size.
pub fn sheet_preview(sheet: &Sheet, options: &PreviewOptions, render: &RenderConfig) -> Document {
    let stroke_width = f64::min(sheet.width, sheet.height) * 0.002;

    let outline = Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", sheet.width)
        .set("height", sheet.height)
        .set("fill", options.sheet_fill)
        .set("stroke", options.item_stroke)
        .set("stroke-width", stroke_width);

    let items = sheet
        .placements
        .iter()
        .fold(Group::new().set("id", "placements"), |group, placement| {
            group.add(placement_group(placement, options, render, stroke_width))
        });

    Document::new()
        .set("viewBox", (0.0, 0.0, sheet.width, sheet.height))
        .set("width", format!("{}mm", sheet.width))
        .set("height", format!("{}mm", sheet.height))
        .add(outline)
        .add(items)
}

fn placement_group(
    placement: &Placement,
    options: &PreviewOptions,
    render: &RenderConfig,
    stroke_width: f64,
) -> Group {
    let fill = if placement.rotated {
        options.rotated_item_fill
    } else {
        options.item_fill
    };

    let mut group = Group::new()
        .set("id", placement.id.as_str())
        .add(Title::new(format!(
            "{} ({}/{}), {:.1} x {:.1} mm{}",
            placement.name,
            placement.copy_index,
            placement.copies,
            placement.width,
            placement.height,
            if placement.rotated { ", rotated" } else { "" }
        )))
        .add(
            Rectangle::new()
                .set("x", placement.x)
                .set("y", placement.y)
                .set("width", placement.width)
                .set("height", placement.height)
                .set("fill", fill)
                .set("stroke", options.item_stroke)
                .set("stroke-width", stroke_width),
        );

    if options.embed_artwork {
        if let Some(image) = artwork(placement, render) {
            group = group.add(image);
        }
    }

    if options.show_labels {
        let font_size = f64::min(placement.width, placement.height) * 0.15;
        group = group.add(
            Text::new(format!("{}/{}", placement.copy_index, placement.copies))
                .set("x", placement.x + placement.width / 2.0)
                .set("y", placement.y + placement.height / 2.0)
                .set("font-size", font_size)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("fill", options.item_stroke),
        );
    }

    group
}

/// Artwork drawn at the source size, turned into the placed box when rotated
fn artwork(placement: &Placement, render: &RenderConfig) -> Option<Group> {
    let href = match prepare_for_render(placement, render)? {
        RenderAsset::Vector {
            preview_data_uri, ..
        } => preview_data_uri,
        RenderAsset::Raster { url } => url,
    };

    let image = Image::new()
        .set("href", href)
        .set("x", 0)
        .set("y", 0)
        .set("width", placement.source_width)
        .set("height", placement.source_height)
        .set("preserveAspectRatio", "none");

    let transform = if placement.rotated {
        format!(
            "translate({} {}) rotate(90)",
            placement.x + placement.width,
            placement.y
        )
    } else {
        format!("translate({} {})", placement.x, placement.y)
    };

    Some(Group::new().set("transform", transform).add(image))
}
