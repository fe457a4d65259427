use std::io::Read;

use anyhow::Result;
use geo_types::Point;
use serde::Deserialize;

use crate::Trajectory;

/// One trajectory file as the tracker writes it: a calibration properties
/// section and an ordered list of per-sample records.
#[derive(Deserialize)]
pub struct TrajectoryRecord {
    properties: Vec<Calibration>,
    points: Vec<Sample>,
}

#[derive(Deserialize)]
struct Calibration {
    /// Measured size of the calibration ball, in pixels.
    ball_pixelsize: f64,
    /// Known real size of the calibration ball.
    ball_realsize: f64,
    fps: f64,
}

#[derive(Deserialize)]
struct Sample {
    point_coords: [f64; 2],
    displacement_vector: [f64; 2],
    frame_number: u64,
}

impl TrajectoryRecord {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validates the record and maps it into engine inputs: the pixel scale
    /// from the calibration ball, and a timestamp per sample from its frame
    /// number.
    pub fn to_trajectory(&self) -> Result<Trajectory> {
        let calibration = match self.properties.first() {
            Some(c) => c,
            None => bail!("record has an empty properties section"),
        };
        if calibration.ball_pixelsize <= 0.0 {
            bail!(
                "ball_pixelsize must be positive, got {}",
                calibration.ball_pixelsize
            );
        }
        if calibration.ball_realsize <= 0.0 {
            bail!(
                "ball_realsize must be positive, got {}",
                calibration.ball_realsize
            );
        }
        if calibration.fps <= 0.0 {
            bail!("fps must be positive, got {}", calibration.fps);
        }
        let scale = calibration.ball_realsize / calibration.ball_pixelsize;

        let mut points = Vec::with_capacity(self.points.len());
        let mut timestamps = Vec::with_capacity(self.points.len());
        let mut displacements = Vec::with_capacity(self.points.len());
        for (i, sample) in self.points.iter().enumerate() {
            if sample.frame_number < 1 {
                bail!("sample {}: frame_number must be at least 1", i);
            }
            points.push(Point::new(sample.point_coords[0], sample.point_coords[1]));
            displacements.push(Point::new(
                sample.displacement_vector[0],
                sample.displacement_vector[1],
            ));
            // Frame 1 marks the start of observation
            timestamps.push(if sample.frame_number == 1 {
                0.0
            } else {
                sample.frame_number as f64 / calibration.fps
            });
        }

        Trajectory::new(points, timestamps, displacements, scale)
    }
}
