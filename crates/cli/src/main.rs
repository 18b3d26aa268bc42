//! ShoreWatch CLI - Coastline extraction and shoreline change tracking

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use shorewatch_algorithms::pipeline::{
    extract_from_raster, normalize_period, run_batch, Acquisition, BatchOutput, SourceProfile,
};
use shorewatch_algorithms::temporal::{
    coastline_length, group_mean_coastline, mean_mask_coastlines, measure_displacement,
    partition_years,
};
use shorewatch_core::io::{read_geotiff, write_geotiff};
use shorewatch_core::{Coastline, Raster};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "shorewatch")]
#[command(author, version, about = "Coastline extraction and shoreline change tracking", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a raster scene
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Extract the coastline from a single scene
    Extract {
        /// Input scene file
        input: PathBuf,
        /// Output GeoJSON file
        output: PathBuf,
        /// Extraction profile: sentinel, landsat, custom
        #[arg(short, long, default_value = "sentinel")]
        profile: String,
        /// Raw pixel value classified as water (overrides the profile)
        #[arg(long)]
        water_value: Option<f64>,
        /// Minimum water component size in cells
        #[arg(long)]
        min_water_size: Option<usize>,
        /// Minimum land component size in cells
        #[arg(long)]
        min_land_size: Option<usize>,
        /// Majority filter window size (odd)
        #[arg(long)]
        window: Option<usize>,
        /// Trace inland water bodies as well as the ocean
        #[arg(long)]
        keep_inland: bool,
        /// Also write the corrected water mask as GeoTIFF
        #[arg(long)]
        mask: Option<PathBuf>,
    },
    /// Extract coastlines from a series of scenes
    Batch {
        /// Scenes as "path,year,period;path,year,period;..."
        #[arg(long)]
        scenes: String,
        /// Output directory for per-scene GeoJSON and the run summary
        output_dir: PathBuf,
        /// Extraction profile: sentinel, landsat, custom
        #[arg(short, long, default_value = "sentinel")]
        profile: String,
    },
    /// Average coastlines over multi-year groups
    Average {
        /// Scenes as "path,year,period;..."
        #[arg(long)]
        scenes: String,
        /// Output directory for group GeoJSON files
        output_dir: PathBuf,
        /// First year of the averaging span
        #[arg(long)]
        start: i32,
        /// Last year of the averaging span (inclusive)
        #[arg(long)]
        end: i32,
        /// Number of year groups
        #[arg(long, default_value = "1")]
        groups: usize,
        /// Sample count for coastline resampling
        #[arg(long, default_value = "100")]
        samples: usize,
        /// Also write consensus-mask coastlines per group
        #[arg(long)]
        consensus: bool,
        #[arg(short, long, default_value = "sentinel")]
        profile: String,
    },
    /// Measure shoreline displacement between two scenes
    Measure {
        /// Earlier scene
        before: PathBuf,
        /// Later scene
        after: PathBuf,
        /// Number of transects
        #[arg(short, long, default_value = "50")]
        transects: usize,
        /// Write the full transect report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
        #[arg(short, long, default_value = "sentinel")]
        profile: String,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_scene(path: &PathBuf) -> Result<Raster<f64>> {
    let pb = spinner("Reading scene...");
    let raster: Raster<f64> = read_geotiff(path).context("Failed to read scene")?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());
    Ok(raster)
}

fn write_mask(mask: &Raster<u8>, path: &PathBuf) -> Result<()> {
    let pb = spinner("Writing mask...");
    write_geotiff(mask, path).context("Failed to write mask")?;
    pb.finish_and_clear();
    Ok(())
}

fn write_geojson(coastlines: &[Coastline], path: &PathBuf) -> Result<()> {
    let pb = spinner("Writing GeoJSON...");
    let features = coastlines
        .iter()
        .enumerate()
        .map(|(index, coastline)| {
            let mut properties = geojson::JsonObject::new();
            properties.insert("index".to_string(), serde_json::json!(index));
            properties.insert("points".to_string(), serde_json::json!(coastline.len()));
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(coastline.line()))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();
    let collection = GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    });
    std::fs::write(path, collection.to_string()).context("Failed to write GeoJSON")?;
    pb.finish_and_clear();
    Ok(())
}

fn write_batch_summary(output: &BatchOutput, path: &PathBuf) -> Result<()> {
    let records: Vec<serde_json::Value> = output
        .records
        .iter()
        .map(|record| {
            serde_json::json!({
                "year": record.year,
                "period": normalize_period(&record.period),
                "path": record.path.display().to_string(),
                "coastlines": record.extraction.coastlines.len(),
            })
        })
        .collect();
    let skipped: Vec<serde_json::Value> = output
        .skipped
        .iter()
        .map(|skip| {
            serde_json::json!({
                "year": skip.year,
                "period": skip.period,
                "path": skip.path.display().to_string(),
                "error": skip.error.to_string(),
            })
        })
        .collect();
    let summary = serde_json::json!({ "records": records, "skipped": skipped });
    std::fs::write(path, serde_json::to_string_pretty(&summary)?)
        .context("Failed to write summary")?;
    Ok(())
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn build_profile(
    name: &str,
    water_value: Option<f64>,
    min_water_size: Option<usize>,
    min_land_size: Option<usize>,
    window: Option<usize>,
    keep_inland: bool,
) -> Result<SourceProfile> {
    let mut profile = SourceProfile::from_name(name).ok_or_else(|| {
        anyhow::anyhow!("Unknown profile: {}. Use sentinel, landsat, or custom.", name)
    })?;
    if let Some(value) = water_value {
        profile.raw_water_value = Some(value);
    }
    if let Some(size) = min_water_size {
        profile.min_water_size = size;
    }
    if let Some(size) = min_land_size {
        profile.min_land_size = size;
    }
    if let Some(size) = window {
        profile.smoothing_window = size;
    }
    if keep_inland {
        profile.ocean_only = false;
    }
    profile
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid profile: {}", e))?;
    Ok(profile)
}

fn parse_acquisitions(s: &str, profile: &SourceProfile) -> Result<Vec<Acquisition>> {
    s.split(';')
        .map(|entry| {
            let parts: Vec<&str> = entry.trim().split(',').collect();
            if parts.len() != 3 {
                anyhow::bail!("Scene must be 'path,year,period', got: {}", entry);
            }
            let year: i32 = parts[1].trim().parse().context("Invalid year")?;
            Ok(Acquisition::new(
                parts[0].trim(),
                year,
                parts[2].trim(),
                profile.clone(),
            ))
        })
        .collect()
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let raster = read_scene(&input)?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let stats = raster.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!("Cell size: {}", raster.cell_size());
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(crs) = raster.crs() {
                println!("CRS: {}", crs);
            }
            if let Some(nodata) = raster.nodata() {
                println!("NoData: {}", nodata);
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / raster.len() as f64
            );
        }

        // ── Extract ──────────────────────────────────────────────────
        Commands::Extract {
            input,
            output,
            profile,
            water_value,
            min_water_size,
            min_land_size,
            window,
            keep_inland,
            mask,
        } => {
            let profile = build_profile(
                &profile,
                water_value,
                min_water_size,
                min_land_size,
                window,
                keep_inland,
            )?;
            let scene = read_scene(&input)?;
            let start = Instant::now();
            let extraction = extract_from_raster(&scene, &profile)
                .context("Failed to extract coastline")?;
            let elapsed = start.elapsed();

            println!("Coastlines traced: {}", extraction.coastlines.len());
            if let Some(primary) = extraction.primary() {
                println!("  Primary: {} points", primary.len());
            }
            if let Some(mask_path) = mask {
                write_mask(&extraction.mask, &mask_path)?;
                println!("Mask saved to: {}", mask_path.display());
            }
            write_geojson(&extraction.coastlines, &output)?;
            done("Coastline", &output, elapsed);
        }

        // ── Batch ────────────────────────────────────────────────────
        Commands::Batch {
            scenes,
            output_dir,
            profile,
        } => {
            let profile = build_profile(&profile, None, None, None, None, false)?;
            let acquisitions = parse_acquisitions(&scenes, &profile)?;
            if acquisitions.is_empty() {
                anyhow::bail!("At least one scene is required");
            }
            std::fs::create_dir_all(&output_dir)
                .context("Failed to create output directory")?;

            let start = Instant::now();
            let output = run_batch(acquisitions);
            let elapsed = start.elapsed();

            for record in &output.records {
                let name =
                    format!("{}_{}.geojson", record.year, normalize_period(&record.period));
                let path = output_dir.join(name);
                write_geojson(&record.extraction.coastlines, &path)?;
            }
            for skip in &output.skipped {
                eprintln!("Skipped {}: {}", skip.path.display(), skip.error);
            }
            let summary_path = output_dir.join("batch_summary.json");
            write_batch_summary(&output, &summary_path)?;

            println!(
                "Batch finished: {} extracted, {} skipped",
                output.records.len(),
                output.skipped.len()
            );
            done("Batch summary", &summary_path, elapsed);
        }

        // ── Average ──────────────────────────────────────────────────
        Commands::Average {
            scenes,
            output_dir,
            start: year_start,
            end: year_end,
            groups,
            samples,
            consensus,
            profile,
        } => {
            let profile = build_profile(&profile, None, None, None, None, false)?;
            let acquisitions = parse_acquisitions(&scenes, &profile)?;
            if acquisitions.is_empty() {
                anyhow::bail!("At least one scene is required");
            }
            let groups = partition_years(year_start, year_end, groups)
                .map_err(|e| anyhow::anyhow!("Invalid year grouping: {}", e))?;
            std::fs::create_dir_all(&output_dir)
                .context("Failed to create output directory")?;

            let start = Instant::now();
            let batch = run_batch(acquisitions);
            for skip in &batch.skipped {
                eprintln!("Skipped {}: {}", skip.path.display(), skip.error);
            }

            for group in &groups {
                let mean = group_mean_coastline(&batch.records, group, samples)
                    .with_context(|| format!("Failed to average group {}", group.label))?;
                match mean {
                    Some(line) => {
                        let path = output_dir.join(format!("mean_{}.geojson", group.label));
                        write_geojson(std::slice::from_ref(&line), &path)?;
                        println!(
                            "Group {} ({} years): {} points, length {:.4}",
                            group.label,
                            group.years.len(),
                            line.len(),
                            coastline_length(&line)
                        );
                    }
                    None => println!("Group {}: no scenes", group.label),
                }
                if consensus {
                    if let Some(lines) = mean_mask_coastlines(&batch.records, group)
                        .with_context(|| {
                            format!("Failed to build consensus for group {}", group.label)
                        })?
                    {
                        let path =
                            output_dir.join(format!("consensus_{}.geojson", group.label));
                        write_geojson(&lines, &path)?;
                    }
                }
            }
            let elapsed = start.elapsed();

            println!("Averaged {} groups into {}", groups.len(), output_dir.display());
            println!("  Processing time: {:.2?}", elapsed);
        }

        // ── Measure ──────────────────────────────────────────────────
        Commands::Measure {
            before,
            after,
            transects,
            report,
            profile,
        } => {
            let profile = build_profile(&profile, None, None, None, None, false)?;
            let before_scene = read_scene(&before)?;
            let after_scene = read_scene(&after)?;

            let start = Instant::now();
            let before_extraction = extract_from_raster(&before_scene, &profile)
                .context("Failed to extract earlier coastline")?;
            let after_extraction = extract_from_raster(&after_scene, &profile)
                .context("Failed to extract later coastline")?;
            let from = before_extraction.primary().ok_or_else(|| {
                anyhow::anyhow!("No coastline traced in {}", before.display())
            })?;
            let to = after_extraction.primary().ok_or_else(|| {
                anyhow::anyhow!("No coastline traced in {}", after.display())
            })?;
            let result = measure_displacement(from, to, transects)
                .context("Failed to measure displacement")?;
            let elapsed = start.elapsed();

            println!("Transects: {}", result.transects.len());
            println!("  Mean displacement: {:.2} m", result.mean_m);
            println!("  Min displacement:  {:.2} m", result.min_m);
            println!("  Max displacement:  {:.2} m", result.max_m);
            if let Some(report_path) = report {
                std::fs::write(&report_path, serde_json::to_string_pretty(&result)?)
                    .context("Failed to write report")?;
                done("Displacement report", &report_path, elapsed);
            } else {
                println!("  Processing time: {:.2?}", elapsed);
            }
        }
    }

    Ok(())
}
