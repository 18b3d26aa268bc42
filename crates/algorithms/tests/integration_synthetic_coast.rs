//! Integration tests on synthetic coastal scenes.
//!
//! Scenes are built in memory (and written to temp GeoTIFFs for the batch
//! tests), so no fixture files are required. Geographic scenes use a
//! 0.001 degree cell around 116 E, 8 S.

use approx::assert_relative_eq;
use shorewatch_algorithms::components::{clean_components, identify_ocean, label_components};
use shorewatch_algorithms::pipeline::{extract_from_raster, run_batch, Acquisition, SourceProfile};
use shorewatch_algorithms::smoothing::majority_filter;
use shorewatch_algorithms::temporal::{
    group_mean_coastline, mean_mask_coastlines, measure_displacement, partition_years,
};
use shorewatch_core::io::write_geotiff;
use shorewatch_core::{Connectivity, GeoTransform, Raster, LAND, WATER};

/// Extraction profile scaled down for toy grids
fn toy_profile() -> SourceProfile {
    SourceProfile {
        name: "toy".to_string(),
        raw_water_value: None,
        min_water_size: 1,
        min_land_size: 1,
        smoothing_window: 1,
        ocean_only: true,
    }
}

/// Scene with water from `water_from` eastward, georeferenced in degrees
fn coastal_scene(rows: usize, cols: usize, water_from: usize) -> Raster<f64> {
    let mut scene = Raster::new(rows, cols);
    for r in 0..rows {
        for c in water_from..cols {
            scene.set(r, c, 1.0).unwrap();
        }
    }
    scene.set_transform(GeoTransform::new(116.0, -8.0, 0.001, -0.001));
    scene
}

fn binary_mask(rows: usize, cols: usize, water_cells: &[(usize, usize)]) -> Raster<u8> {
    let mut mask = Raster::filled(rows, cols, LAND);
    for &(r, c) in water_cells {
        mask.set(r, c, WATER).unwrap();
    }
    mask
}

// ---------------------------------------------------------------------------
// Cleaning and smoothing properties
// ---------------------------------------------------------------------------

#[test]
fn corner_block_survives_or_flips_entirely() {
    // 3x3 water block in the top-left corner of a 20x20 land grid.
    let mut cells = Vec::new();
    for r in 0..3 {
        for c in 0..3 {
            cells.push((r, c));
        }
    }
    let mask = binary_mask(20, 20, &cells);

    let (kept, summary) = clean_components(&mask, WATER, 5, Connectivity::Four).unwrap();
    assert_eq!(summary.components_removed, 0);
    assert_eq!(kept.count_eq(WATER), 9);

    let (flipped, summary) = clean_components(&mask, WATER, 10, Connectivity::Four).unwrap();
    assert_eq!(summary.components_removed, 1);
    assert_eq!(summary.cells_flipped, 9);
    assert_eq!(flipped.count_eq(WATER), 0);
}

#[test]
fn cleaning_is_idempotent_at_convergence() {
    let mask = binary_mask(
        12,
        12,
        &[
            (0, 0),
            (5, 5),
            (5, 6),
            (6, 5),
            (6, 6),
            (10, 2),
            (10, 3),
            (11, 10),
        ],
    );

    let (once, _) = clean_components(&mask, WATER, 3, Connectivity::Four).unwrap();
    let (twice, summary) = clean_components(&once, WATER, 3, Connectivity::Four).unwrap();
    assert_eq!(summary.cells_flipped, 0);
    assert_eq!(once.data(), twice.data());
}

#[test]
fn surviving_components_meet_the_size_floor() {
    let mask = binary_mask(
        15,
        15,
        &[
            (1, 1),
            (3, 3),
            (3, 4),
            (7, 7),
            (7, 8),
            (8, 7),
            (8, 8),
            (12, 0),
            (12, 1),
            (12, 2),
        ],
    );

    let min_size = 3;
    let (cleaned, _) = clean_components(&mask, WATER, min_size, Connectivity::Four).unwrap();
    let labeled = label_components(&cleaned, WATER, Connectivity::Four).unwrap();
    for size in &labeled.sizes {
        assert!(*size >= min_size);
    }
}

#[test]
fn majority_filter_is_a_noop_on_uniform_grids() {
    for window in [1, 3, 5, 7] {
        let water = Raster::filled(9, 9, WATER);
        assert_eq!(majority_filter(&water, window).unwrap().data(), water.data());

        let land = Raster::filled(9, 9, LAND);
        assert_eq!(majority_filter(&land, window).unwrap().data(), land.data());
    }
}

// ---------------------------------------------------------------------------
// Ocean identification
// ---------------------------------------------------------------------------

#[test]
fn single_land_cell_scene_is_ocean_everywhere() {
    let mut mask = Raster::filled(10, 10, WATER);
    mask.set(5, 5, LAND).unwrap();

    let ocean = identify_ocean(&mask, Connectivity::Four).unwrap();
    assert_eq!(ocean.labels, vec![1]);
    assert_eq!(ocean.mask.count_eq(WATER), 99);
}

#[test]
fn border_water_is_always_in_the_ocean_label_set() {
    let mask = binary_mask(
        8,
        8,
        &[(0, 3), (0, 4), (3, 0), (7, 7), (6, 7), (4, 4), (4, 5)],
    );

    let labeled = label_components(&mask, WATER, Connectivity::Four).unwrap();
    let ocean = identify_ocean(&mask, Connectivity::Four).unwrap();

    let (rows, cols) = mask.shape();
    for r in 0..rows {
        for c in 0..cols {
            let on_border = r == 0 || c == 0 || r == rows - 1 || c == cols - 1;
            if on_border && mask.get(r, c).unwrap() == WATER {
                let label = labeled.labels.get(r, c).unwrap();
                assert!(ocean.labels.contains(&label));
                assert_eq!(ocean.mask.get(r, c).unwrap(), WATER);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[test]
fn island_scene_traces_a_closed_ring() {
    // A 6x6 land island in open water.
    let mut scene: Raster<f64> = Raster::new(20, 20);
    for r in 0..20 {
        for c in 0..20 {
            let island = (7..13).contains(&r) && (7..13).contains(&c);
            if !island {
                scene.set(r, c, 1.0).unwrap();
            }
        }
    }
    scene.set_transform(GeoTransform::new(116.0, -8.0, 0.001, -0.001));

    let extraction = extract_from_raster(&scene, &toy_profile()).unwrap();
    assert_eq!(extraction.contours.len(), 1);
    assert!(extraction.contours[0].is_closed());
    assert_eq!(extraction.ocean.as_ref().unwrap().labels, vec![1]);
}

#[test]
fn batch_records_feed_group_averaging_and_displacement() {
    let dir = tempfile::tempdir().unwrap();
    let path_2020 = dir.path().join("2020_q1.tif");
    let path_2021 = dir.path().join("2021_q1.tif");
    // The shoreline retreats east by two cells between the two years.
    write_geotiff(&coastal_scene(12, 12, 6), &path_2020).unwrap();
    write_geotiff(&coastal_scene(12, 12, 8), &path_2021).unwrap();

    let output = run_batch(vec![
        Acquisition::new(&path_2020, 2020, "q1", toy_profile()),
        Acquisition::new(&path_2021, 2021, "q1", toy_profile()),
    ]);
    assert!(output.is_complete());
    assert_eq!(output.records.len(), 2);

    // One group covering both years averages the two shorelines.
    let groups = partition_years(2020, 2021, 1).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "2020-2021");

    let mean = group_mean_coastline(&output.records, &groups[0], 8)
        .unwrap()
        .unwrap();
    assert_eq!(mean.len(), 8);
    for coord in mean.coords() {
        // Halfway between the 116.006 and 116.008 shorelines.
        assert_relative_eq!(coord.x, 116.007, epsilon = 1e-9);
    }

    // Split mask votes count as water, so the consensus edge follows the
    // wetter year.
    let consensus = mean_mask_coastlines(&output.records, &groups[0])
        .unwrap()
        .unwrap();
    assert_eq!(consensus.len(), 1);
    assert_relative_eq!(consensus[0].coords()[0].x, 116.006, epsilon = 1e-9);

    // Displacement between the two epochs: two 0.001 degree cells of
    // longitude at 8 degrees south.
    let first = output.records[0].extraction.primary().unwrap();
    let last = output.records[1].extraction.primary().unwrap();
    let report = measure_displacement(first, last, 1).unwrap();
    assert_eq!(report.transects.len(), 1);
    assert_relative_eq!(report.transects[0].meters, 220.47, epsilon = 1.0);
}
