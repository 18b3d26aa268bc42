//! Group averaging of coastlines
//!
//! A multi-year series is partitioned into labeled year groups and each
//! group reduced to one representative coastline, either by averaging the
//! members' resampled primary coastlines point by point, or by voting the
//! members' corrected masks cell by cell and tracing the consensus.

use geo::{Coord, LineString};
use ndarray::Array2;
use shorewatch_core::{Coastline, Error, Raster, Result, LAND, WATER};

use super::interpolate::interpolate_line;
use crate::contour::{find_contours, project_contours, SaddleConnect};
use crate::pipeline::TemporalRecord;

/// A labeled, inclusive run of years
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGroup {
    /// Display label, "start-end" or a bare year
    pub label: String,
    /// Member years, ascending
    pub years: Vec<i32>,
}

impl YearGroup {
    pub fn new(label: impl Into<String>, years: Vec<i32>) -> Self {
        Self {
            label: label.into(),
            years,
        }
    }

    /// Group holding one year, labeled with the year itself
    pub fn single(year: i32) -> Self {
        Self {
            label: year.to_string(),
            years: vec![year],
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }
}

/// Partition an inclusive year span into `group_count` contiguous groups.
///
/// The group width is `span / group_count` kept as a fraction, and each
/// group's nominal end year is truncated from it. With a fractional width
/// the number of groups produced can exceed `group_count`, and the last
/// label can name a year past the span end; member years are always
/// clipped to the span. An empty span yields no groups.
pub fn partition_years(start: i32, end: i32, group_count: usize) -> Result<Vec<YearGroup>> {
    if group_count == 0 {
        return Err(Error::InvalidParameter {
            name: "group_count",
            value: group_count.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if end < start {
        return Ok(Vec::new());
    }
    let span = (end - start + 1) as usize;
    if group_count > span {
        return Err(Error::InvalidParameter {
            name: "group_count",
            value: group_count.to_string(),
            reason: format!("cannot exceed the {}-year span", span),
        });
    }

    let increment = span as f64 / group_count as f64;
    let mut groups = Vec::new();
    let mut year_start = start;
    while year_start <= end {
        let group_end = (year_start as f64 + increment - 1.0).trunc() as i32;
        let years: Vec<i32> = (year_start..=group_end)
            .filter(|year| (start..=end).contains(year))
            .collect();
        groups.push(YearGroup::new(
            format!("{}-{}", year_start, group_end),
            years,
        ));
        year_start = group_end + 1;
    }
    Ok(groups)
}

/// Average several coastlines into one, point by point.
///
/// Every line is resampled to `samples` points first, so lines of
/// different vertex counts average cleanly. An empty slice yields
/// `Ok(None)`. A member too short to resample is an error, since a
/// partial average would silently misweight the group.
pub fn mean_coastline(lines: &[Coastline], samples: usize) -> Result<Option<Coastline>> {
    if lines.is_empty() {
        return Ok(None);
    }

    let mut sum_x = vec![0.0; samples];
    let mut sum_y = vec![0.0; samples];
    for line in lines {
        let resampled = interpolate_line(line.coords(), samples)?;
        if resampled.len() != samples {
            return Err(Error::Algorithm(format!(
                "coastline with {} points cannot be resampled to {} for averaging",
                line.len(),
                samples
            )));
        }
        for (i, coord) in resampled.iter().enumerate() {
            sum_x[i] += coord.x;
            sum_y[i] += coord.y;
        }
    }

    let count = lines.len() as f64;
    let mean: Vec<Coord<f64>> = sum_x
        .into_iter()
        .zip(sum_y)
        .map(|(x, y)| Coord {
            x: x / count,
            y: y / count,
        })
        .collect();
    Ok(Some(Coastline::new(LineString::new(mean))))
}

/// Mean of the primary coastlines of the records falling in `group`.
///
/// `Ok(None)` when no record falls in the group. A member record whose
/// extraction traced nothing cannot contribute and is an error.
pub fn group_mean_coastline(
    records: &[TemporalRecord],
    group: &YearGroup,
    samples: usize,
) -> Result<Option<Coastline>> {
    let mut lines = Vec::new();
    for record in records {
        if !group.contains(record.year) {
            continue;
        }
        match record.extraction.primary() {
            Some(line) => lines.push(line.clone()),
            None => {
                return Err(Error::NoCoastline(format!(
                    "{} {} has no traced coastline",
                    record.year, record.period
                )));
            }
        }
    }
    mean_coastline(&lines, samples)
}

/// Consensus coastlines of the records falling in `group`.
///
/// The members' corrected masks are averaged cell-wise and thresholded at
/// 0.5, so a cell is water when at least half the members call it water.
/// The consensus mask is traced and projected with the first member's
/// transform; all traced coastlines are returned. `Ok(None)` when no
/// record falls in the group. Members must share mask dimensions.
pub fn mean_mask_coastlines(
    records: &[TemporalRecord],
    group: &YearGroup,
) -> Result<Option<Vec<Coastline>>> {
    let members: Vec<&TemporalRecord> = records
        .iter()
        .filter(|record| group.contains(record.year))
        .collect();
    let Some(first) = members.first() else {
        return Ok(None);
    };

    let (rows, cols) = first.extraction.mask.shape();
    let mut sum = Array2::<f64>::zeros((rows, cols));
    for member in &members {
        let mask = &member.extraction.mask;
        if mask.shape() != (rows, cols) {
            let (ar, ac) = mask.shape();
            return Err(Error::SizeMismatch {
                er: rows,
                ec: cols,
                ar,
                ac,
            });
        }
        sum.zip_mut_with(mask.data(), |acc, &v| *acc += v as f64);
    }

    let threshold = members.len() as f64 / 2.0;
    let mut consensus: Raster<u8> = first.extraction.mask.with_same_meta(rows, cols);
    *consensus.data_mut() = sum.mapv(|votes| if votes >= threshold { WATER } else { LAND });

    let contours = find_contours(&consensus, 0.5, SaddleConnect::Low);
    let coastlines = project_contours(&contours, consensus.transform());
    Ok(Some(coastlines))
}
