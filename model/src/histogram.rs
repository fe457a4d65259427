use anyhow::Result;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Bin boundaries 0, 20, ..., 180, fixed to match the simulation this
/// pipeline's output is compared against.
pub const NUM_BINS: usize = 9;
const BIN_WIDTH: i64 = 20;

/// Observed count per 20° bin. A deviation of exactly 180° belongs to the
/// last bin.
pub fn bin_counts(deviations: &[i64]) -> [u64; NUM_BINS] {
    let mut counts = [0; NUM_BINS];
    for &d in deviations {
        let bin = ((d / BIN_WIDTH) as usize).min(NUM_BINS - 1);
        counts[bin] += 1;
    }
    counts
}

/// Chi-square goodness-of-fit statistic and p-value against a uniform
/// distribution over the bins. No expected distribution is supplied; the
/// expected count per bin is the mean observed count.
pub fn chi_square_uniform(counts: &[u64; NUM_BINS]) -> Result<(f64, f64)> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        bail!("can't run a goodness-of-fit test on an empty histogram");
    }
    let expected = total as f64 / NUM_BINS as f64;
    let statistic: f64 = counts
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum();
    let chi = ChiSquared::new((NUM_BINS - 1) as f64)?;
    Ok((statistic, 1.0 - chi.cdf(statistic)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_are_20_degrees_wide() {
        let counts = bin_counts(&[0, 19, 20, 39, 40, 179]);
        assert_eq!(counts, [2, 2, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn exactly_180_lands_in_the_last_bin() {
        let counts = bin_counts(&[180]);
        assert_eq!(counts, [0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn uniform_distribution_scores_zero() {
        let deviations: Vec<i64> = (0..NUM_BINS as i64).map(|bin| bin * 20).collect();
        let counts = bin_counts(&deviations);
        assert_eq!(counts, [1; NUM_BINS]);
        let (statistic, p_value) = chi_square_uniform(&counts).unwrap();
        assert_eq!(statistic, 0.0);
        assert!((p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn two_bin_split_is_computable() {
        let mut deviations = vec![10; 5];
        deviations.extend(vec![30; 5]);
        let counts = bin_counts(&deviations);
        let (statistic, p_value) = chi_square_uniform(&counts).unwrap();
        assert!(statistic > 0.0);
        assert!((0.0..=1.0).contains(&p_value));
    }

    #[test]
    fn empty_histogram_fails() {
        assert!(chi_square_uniform(&[0; NUM_BINS]).is_err());
    }
}
