use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheet_pack::{Design, PackingOptions, PreviewOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetpack", about = "Pack design canvases onto print sheets", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack designs onto sheets and report the layout
    Plan {
        /// Input JSON file (array of designs, sizes in px)
        #[arg(short, long)]
        input: PathBuf,

        /// Sheet paper size (overrides the config file)
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Sheet orientation (overrides the config file)
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Gap between items and rows in mm (overrides the config file)
        #[arg(long)]
        spacing: Option<f64>,

        /// Packing options JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the export payload JSON here
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Write one normalized SVG per item into this directory
        #[arg(long)]
        items_dir: Option<PathBuf>,

        /// Write one SVG preview per sheet into this directory
        #[arg(long)]
        thumbnails_dir: Option<PathBuf>,

        /// Show statistics only, don't write any files
        #[arg(long)]
        stats_only: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for sheet_pack::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for sheet_pack::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            input,
            paper,
            orientation,
            spacing,
            config,
            payload,
            items_dir,
            thumbnails_dir,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => PackingOptions::load(path).await?,
                None => PackingOptions::default(),
            };
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if let Some(spacing) = spacing {
                options.spacing_mm = spacing;
            }
            options.validate()?;

            let text = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let designs: Vec<Design> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse designs from {}", input.display()))?;

            let plan = sheet_pack::plan(&designs, &options);
            let summary = &plan.summary;

            println!("Layout Statistics:");
            println!(
                "  Sheet: {:.1} x {:.1} mm",
                plan.sheet_size.width, plan.sheet_size.height
            );
            println!("  Items: {}", plan.items.len());
            println!(
                "  Copies placed: {}/{}",
                summary.placed_copies, summary.requested_copies
            );
            println!("  Sheets: {}", summary.sheet_count);
            for (i, coverage) in summary.sheet_coverage.iter().enumerate() {
                println!("    Sheet {}: {:.1}% covered", i + 1, coverage * 100.0);
            }
            println!("  Overall coverage: {:.1}%", summary.coverage * 100.0);
            if !plan.result.leftovers.is_empty() {
                println!("  Leftovers: {}", summary.leftover_count);
                for leftover in &plan.result.leftovers {
                    println!(
                        "    {} ({:.1} x {:.1} mm)",
                        leftover.placement_id(),
                        leftover.width,
                        leftover.height
                    );
                }
            }

            if stats_only {
                return Ok(());
            }

            if let Some(path) = payload {
                let export = sheet_pack::build_export_payload(&plan.result, &options.render);
                let json = serde_json::to_string_pretty(&export)?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Payload → {}", path.display());
            }

            if let Some(dir) = items_dir {
                tokio::fs::create_dir_all(&dir).await?;
                let files = sheet_pack::item_files(&plan.items, &options.render);
                for file in &files {
                    tokio::fs::write(dir.join(&file.file_name), &file.markup).await?;
                }
                println!("{} item files → {}", files.len(), dir.display());
            }

            if let Some(dir) = thumbnails_dir {
                tokio::fs::create_dir_all(&dir).await?;
                let preview_options = PreviewOptions::default();
                for (i, sheet) in plan.result.sheets.iter().enumerate() {
                    let document =
                        sheet_pack::sheet_preview(sheet, &preview_options, &options.render);
                    let path = dir.join(format!("sheet-{}.svg", i + 1));
                    svg::save(&path, &document)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
                println!(
                    "{} sheet previews → {}",
                    plan.result.sheets.len(),
                    dir.display()
                );
            }
        }
    }

    Ok(())
}
