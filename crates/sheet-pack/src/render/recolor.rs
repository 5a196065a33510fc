//! Stroke/fill reclassification
//!
//! Three independent rules, applied to every element of an owned tree:
//! theme-colored paint becomes a highlighted outline, pure black strokes
//! become the outline color, and text is always stroked.

use crate::color::{colors_match, is_black, normalize_color};
use crate::options::RenderConfig;

use super::tree::Element;

/// Rewrite paint on `root` and all its descendants in place
pub fn reclassify_colors(
    root: &mut Element,
    theme_stroke_color: Option<&str>,
    config: &RenderConfig,
) {
    let theme = theme_stroke_color.and_then(normalize_color);
    root.walk_mut(&mut |element| reclassify_element(element, theme.as_deref(), config));
}

fn reclassify_element(element: &mut Element, theme: Option<&str>, config: &RenderConfig) {
    let mut style = InlineStyle::parse(element.get("style").unwrap_or_default());

    if let Some(theme) = theme {
        let painted_with_theme = ["stroke", "fill"].iter().any(|prop| {
            [element.get(prop), style.get(prop)]
                .into_iter()
                .flatten()
                .any(|value| colors_match(value, theme))
        });

        if painted_with_theme {
            element.set("fill", "none");
            element.set("stroke", config.highlight_stroke.as_str());
            style.replace("fill", "none");
            style.replace("stroke", &config.highlight_stroke);

            let defaults = [
                ("stroke-width", &config.default_stroke_width),
                ("stroke-linejoin", &config.default_stroke_linejoin),
                ("stroke-linecap", &config.default_stroke_linecap),
            ];
            for (prop, value) in defaults {
                if element.get(prop).is_none() && style.get(prop).is_none() {
                    element.set(prop, value.as_str());
                }
            }
        }
    }

    if element.get("stroke").is_some_and(is_black) {
        element.set("stroke", config.outline_stroke.as_str());
    }
    if style.get("stroke").is_some_and(is_black) {
        style.replace("stroke", &config.outline_stroke);
    }

    if matches!(element.local_name(), "text" | "tspan") {
        element.set("stroke", config.text_stroke.as_str());
        element.set("stroke-width", config.text_stroke_width.as_str());
        style.replace("stroke", &config.text_stroke);
        style.replace("stroke-width", &config.text_stroke_width);

        let has_fill = [element.get("fill"), style.get("fill")]
            .into_iter()
            .flatten()
            .any(|value| !value.trim().is_empty());
        if !has_fill {
            element.set("fill", config.text_fill.as_str());
        }
    }

    if style.changed {
        element.set("style", style.to_string());
    }
}

/// `style="prop: value; ..."` declarations, order preserved
#[derive(Debug, Default)]
struct InlineStyle {
    declarations: Vec<(String, String)>,
    changed: bool,
}

impl InlineStyle {
    fn parse(style: &str) -> Self {
        let declarations = style
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let prop = prop.trim().to_ascii_lowercase();
                (!prop.is_empty()).then(|| (prop, value.trim().to_string()))
            })
            .collect();

        Self {
            declarations,
            changed: false,
        }
    }

    fn get(&self, prop: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value of every existing declaration of `prop`
    fn replace(&mut self, prop: &str, value: &str) {
        for (p, v) in self.declarations.iter_mut() {
            if p == prop && v != value {
                *v = value.to_string();
                self.changed = true;
            }
        }
    }
}

impl std::fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .declarations
            .iter()
            .map(|(p, v)| format!("{}:{}", p, v))
            .collect();
        write!(f, "{}", parts.join(";"))
    }
}
