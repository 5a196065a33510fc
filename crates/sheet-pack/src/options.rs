use crate::constants::*;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Tolerances that steer the shelf packer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Items whose sides differ by no more than this are never tried rotated
    pub square_tolerance_mm: f64,
    /// How far an orientation's height may deviate from a row's fixed height
    pub row_height_tolerance_mm: f64,
    /// Slack on every fit check, absorbs px→mm rounding
    pub fit_epsilon_mm: f64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            square_tolerance_mm: SQUARE_TOLERANCE_MM,
            row_height_tolerance_mm: ROW_HEIGHT_TOLERANCE_MM,
            fit_epsilon_mm: FIT_EPSILON_MM,
        }
    }
}

/// Colors and stroke defaults used when reclassifying vector content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub highlight_stroke: String,
    pub outline_stroke: String,
    pub text_stroke: String,
    pub text_stroke_width: String,
    pub text_fill: String,
    pub default_stroke_width: String,
    pub default_stroke_linejoin: String,
    pub default_stroke_linecap: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            highlight_stroke: HIGHLIGHT_STROKE_COLOR.to_string(),
            outline_stroke: OUTLINE_STROKE_COLOR.to_string(),
            text_stroke: TEXT_STROKE_COLOR.to_string(),
            text_stroke_width: TEXT_STROKE_WIDTH.to_string(),
            text_fill: TEXT_FILL_COLOR.to_string(),
            default_stroke_width: DEFAULT_STROKE_WIDTH.to_string(),
            default_stroke_linejoin: DEFAULT_STROKE_LINEJOIN.to_string(),
            default_stroke_linecap: DEFAULT_STROKE_LINECAP.to_string(),
        }
    }
}

/// Everything a planning pass depends on besides the designs themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingOptions {
    // Sheet format
    pub paper_size: PaperSize,
    pub orientation: Orientation,

    // Gap between neighbouring items and between rows
    pub spacing_mm: f64,

    pub packing: PackingConfig,
    pub render: RenderConfig,
}

impl Default for PackingOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            spacing_mm: DEFAULT_SPACING_MM,
            packing: PackingConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl PackingOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PackError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PackError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Sheet size after applying orientation
    pub fn sheet_size(&self) -> SheetSize {
        self.paper_size.sheet_size(self.orientation)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.spacing_mm.is_finite() || self.spacing_mm < 0.0 {
            return Err(PackError::Config(format!(
                "Spacing must be a non-negative number, got {}",
                self.spacing_mm
            )));
        }

        if !self.sheet_size().is_usable() {
            let (w, h) = self.paper_size.dimensions_mm();
            return Err(PackError::Config(format!(
                "Paper size must be positive, got {} x {} mm",
                w, h
            )));
        }

        let tolerances = [
            self.packing.square_tolerance_mm,
            self.packing.row_height_tolerance_mm,
            self.packing.fit_epsilon_mm,
        ];
        if tolerances.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(PackError::Config(
                "Packing tolerances must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
