use geo_types::Point;

/// How many of the earliest headings define the direction the subject
/// initially committed to.
const REFERENCE_HEADINGS: usize = 5;

/// Travel-direction angle of each displacement vector, in degrees normalized
/// to [0, 360).
pub fn headings(displacements: &[Point<f64>]) -> Vec<f64> {
    displacements
        .iter()
        .map(|v| {
            let angle = v.y().atan2(v.x()).to_degrees();
            if angle < 0.0 {
                angle + 360.0
            } else {
                angle
            }
        })
        .collect()
}

/// Circular mean of the earliest min(5, all) headings.
pub fn reference_heading(headings: &[f64]) -> f64 {
    if headings.len() < REFERENCE_HEADINGS {
        warn!(
            "only {} headings available for the reference heading; using all of them",
            headings.len()
        );
    }
    let take = headings.len().min(REFERENCE_HEADINGS);
    circular_mean(&headings[..take])
}

/// Mean of a set of angles via their unit-vector representation, handling
/// wraparound at 360°. The arithmetic mean of {350°, 10°} is 180°; the
/// circular mean is 0°.
pub fn circular_mean(degrees: &[f64]) -> f64 {
    let n = degrees.len() as f64;
    let sin_mean = degrees.iter().map(|d| d.to_radians().sin()).sum::<f64>() / n;
    let cos_mean = degrees.iter().map(|d| d.to_radians().cos()).sum::<f64>() / n;
    let mean = sin_mean.atan2(cos_mean).to_degrees();
    if mean < 0.0 {
        mean + 360.0
    } else {
        mean
    }
}

/// Angular deviation of each heading from the reference, truncated to whole
/// degrees and folded into [0, 180]. Truncation toward zero happens before
/// the fold; it decides which side of a bin boundary a value lands on.
pub fn deviations(headings: &[f64], reference: f64) -> Vec<i64> {
    headings
        .iter()
        .map(|h| {
            let mut d = (h - reference) as i64;
            if d < 0 {
                d = -d;
            }
            if d > 180 {
                d = (d - 360).abs();
            }
            d
        })
        .collect()
}
