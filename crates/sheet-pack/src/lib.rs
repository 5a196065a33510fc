pub mod color;
mod constants;
mod export;
mod items;
pub mod layout;
mod options;
mod plan;
mod preview;
pub mod render;
mod summary;
mod types;

pub use constants::{PX_PER_MM, px_to_mm};
pub use export::{ExportPayload, ExportPlacement, ExportSheet, ItemFile, build_export_payload, item_files};
pub use items::{Design, NormalizedItem, normalize_designs};
pub use layout::{Leftover, PackingResult, Placement, Row, Sheet, pack};
pub use options::*;
pub use plan::{Plan, plan};
pub use preview::{PreviewOptions, sheet_preview};
pub use render::{NormalizedSvg, RenderAsset, normalize_svg, prepare_for_render};
pub use summary::{LayoutSummary, summarize};
pub use types::*;
