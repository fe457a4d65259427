use anyhow::Result;
use geo_types::Point;
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};

use crate::{heading, histogram};

/// One complete recorded path of a tracked subject: a position, a timestamp,
/// and a displacement vector per observed sample, plus the pixel-to-real-unit
/// scale from the calibration object.
pub struct Trajectory {
    /// Pixel coordinates, in sample order.
    points: Vec<Point<f64>>,
    /// Seconds since the start of observation, conceptually non-decreasing.
    timestamps: Vec<f64>,
    /// Instantaneous direction of travel per sample. The first entry is an
    /// artifact of how the tracker derives these; it's excluded from all
    /// angle-based stages.
    displacements: Vec<Point<f64>>,
    /// Real-world length per pixel.
    scale: f64,
}

/// Summary statistics for one trajectory. Lengths are in whatever real-world
/// unit the calibration size was given in, angles in degrees.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct TrajectoryStatistics {
    pub total_length: f64,
    pub duration: f64,
    pub average_speed: f64,
    pub median_heading_deviation: f64,
    pub sd_heading_deviation: f64,
}

impl Trajectory {
    pub fn new(
        points: Vec<Point<f64>>,
        timestamps: Vec<f64>,
        displacements: Vec<Point<f64>>,
        scale: f64,
    ) -> Result<Self> {
        if points.len() != timestamps.len() || points.len() != displacements.len() {
            bail!(
                "mismatched sample sequences: {} points, {} timestamps, {} displacement vectors",
                points.len(),
                timestamps.len(),
                displacements.len()
            );
        }
        if points.len() < 2 {
            bail!("trajectory doesn't have at least 2 points");
        }
        if scale <= 0.0 {
            bail!("scale factor must be positive, got {}", scale);
        }
        Ok(Self {
            points,
            timestamps,
            displacements,
            scale,
        })
    }

    /// Runs the full pipeline: path length, duration, per-segment speeds,
    /// headings, deviations from the reference heading, and the chi-square
    /// test over binned deviations. Pure; identical input yields identical
    /// output.
    pub fn statistics(&self) -> Result<TrajectoryStatistics> {
        let segment_lengths = self.segment_lengths();
        let total_length: f64 = segment_lengths.iter().sum();

        let time_deltas = self.time_deltas();
        let duration: f64 = time_deltas.iter().sum();

        let mut speeds = Vec::with_capacity(segment_lengths.len());
        for (i, (length, dt)) in segment_lengths.iter().zip(&time_deltas).enumerate() {
            if *dt == 0.0 {
                bail!("zero elapsed time between samples {} and {}", i, i + 1);
            }
            speeds.push(length / dt);
        }
        // Every segment counts equally here, which isn't the same number as
        // total_length / duration when segment durations vary.
        let average_speed = (&speeds).mean();

        let headings = heading::headings(&self.displacements);
        let headings = &headings[1..];
        let reference = heading::reference_heading(headings);
        let deviations = heading::deviations(headings, reference);

        let deviations_f64: Vec<f64> = deviations.iter().map(|&d| d as f64).collect();
        let median_heading_deviation = Data::new(deviations_f64.clone()).median();
        let sd_heading_deviation = (&deviations_f64).population_std_dev();

        let counts = histogram::bin_counts(&deviations);
        let (chi_square, p_value) = histogram::chi_square_uniform(&counts)?;
        info!("deviation histogram: {:?}", counts);
        info!("chi-square vs uniform: {:.4} (p = {:.4})", chi_square, p_value);

        Ok(TrajectoryStatistics {
            total_length,
            duration,
            average_speed,
            median_heading_deviation,
            sd_heading_deviation,
        })
    }

    /// Consecutive-pair Euclidean distances, scaled to real-world units.
    fn segment_lengths(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|pair| {
                let dx = pair[1].x() - pair[0].x();
                let dy = pair[1].y() - pair[0].y();
                dx.hypot(dy) * self.scale
            })
            .collect()
    }

    /// Consecutive timestamp differences. The first raw timestamp marks the
    /// start of observation, not a duration, so it's forced to 0 before
    /// differencing.
    fn time_deltas(&self) -> Vec<f64> {
        let mut times = self.timestamps.clone();
        times[0] = 0.0;
        times.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }
}
