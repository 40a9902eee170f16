//! Association measures.
//!
//! Every measure is computed from the 2x2 contingency table of a bigram
//! `(w1, w2)` over a sample of `total` bigram positions:
//!
//! ```text
//!              w2        !w2
//!   w1        n_ii      n_io      | count_w1
//!  !w1        n_oi      n_oo      |
//!            --------------------
//!           count_w2               total
//! ```

use colloc_types::{AssociationMeasure, MeasureError};

/// Keeps square roots away from zero for unseen bigrams.
const SMALL: f64 = 1e-20;

/// Observed 2x2 contingency table of a bigram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contingency {
    /// `w1` followed by `w2`.
    pub n_ii: f64,
    /// `w1` followed by something else.
    pub n_io: f64,
    /// something else followed by `w2`.
    pub n_oi: f64,
    /// neither.
    pub n_oo: f64,
}

impl Contingency {
    /// Builds the table from joint and marginal counts.
    ///
    /// Marginals are token counts while the sample is bigram positions, so a
    /// token occurring only at the end of a sequence can push a cell below
    /// zero. Cells are clamped at zero.
    #[inline]
    pub fn from_marginals(joint: u64, count_w1: u64, count_w2: u64, total: u64) -> Self {
        let n_ii = joint as f64;
        let n_io = (count_w1 as f64 - n_ii).max(0.0);
        let n_oi = (count_w2 as f64 - n_ii).max(0.0);
        let n_oo = (total as f64 - n_ii - n_io - n_oi).max(0.0);
        Self {
            n_ii,
            n_io,
            n_oi,
            n_oo,
        }
    }

    /// Sum of all four cells.
    ///
    /// Grouped so that swapping `n_io` and `n_oi` yields the same bits.
    #[inline(always)]
    pub fn total(&self) -> f64 {
        (self.n_ii + self.n_oo) + (self.n_io + self.n_oi)
    }

    /// Expected cell counts under independence, in `[ii, io, oi, oo]` order.
    #[inline]
    pub fn expected(&self) -> [f64; 4] {
        let n = self.total();
        if n <= 0.0 {
            return [0.0; 4];
        }
        let row_w1 = self.n_ii + self.n_io;
        let row_not_w1 = self.n_oi + self.n_oo;
        let col_w2 = self.n_ii + self.n_oi;
        let col_not_w2 = self.n_io + self.n_oo;
        [
            row_w1 * col_w2 / n,
            row_w1 * col_not_w2 / n,
            row_not_w1 * col_w2 / n,
            row_not_w1 * col_not_w2 / n,
        ]
    }

    /// Observed cells in `[ii, io, oi, oo]` order.
    #[inline(always)]
    pub fn observed(&self) -> [f64; 4] {
        [self.n_ii, self.n_io, self.n_oi, self.n_oo]
    }
}

/// Scores one bigram under `measure`.
///
/// `joint` is the bigram count, `count_w1`/`count_w2` the marginal token
/// counts and `total` the number of bigram positions in the sample.
///
/// An empty sample scores 0 under every measure except PMI, which is
/// negative infinity whenever the ratio is undefined.
///
/// # Example
///
/// ```
/// use colloc_core::collocation::scoring::score;
/// use colloc_types::AssociationMeasure;
///
/// // joint 2 of 5 positions, both tokens seen twice: log2(2 * 5 / 4)
/// let pmi = score(AssociationMeasure::Pmi, 2, 2, 2, 5);
/// assert!((pmi - 2.5f64.log2()).abs() < 1e-12);
/// ```
#[inline]
pub fn score(
    measure: AssociationMeasure,
    joint: u64,
    count_w1: u64,
    count_w2: u64,
    total: u64,
) -> f64 {
    match measure {
        AssociationMeasure::Pmi => pmi(joint, count_w1, count_w2, total),
        AssociationMeasure::RawFreq => raw_freq(joint, total),
        AssociationMeasure::StudentT => student_t(joint, count_w1, count_w2, total),
        AssociationMeasure::ChiSquare => {
            chi_square(&Contingency::from_marginals(joint, count_w1, count_w2, total))
        }
        AssociationMeasure::LikelihoodRatio => {
            likelihood_ratio(&Contingency::from_marginals(joint, count_w1, count_w2, total))
        }
    }
}

/// Scores one bigram under a measure given by name.
///
/// # Errors
///
/// Returns `MeasureError::Unknown` if `name` is not a supported measure.
pub fn score_by_name(
    name: &str,
    joint: u64,
    count_w1: u64,
    count_w2: u64,
    total: u64,
) -> Result<f64, MeasureError> {
    let measure: AssociationMeasure = name.parse()?;
    Ok(score(measure, joint, count_w1, count_w2, total))
}

/// Maps NaN to negative infinity so rankings stay total.
#[inline(always)]
pub(crate) fn coerce(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

#[inline]
fn raw_freq(joint: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    joint as f64 / total as f64
}

#[inline]
fn pmi(joint: u64, count_w1: u64, count_w2: u64, total: u64) -> f64 {
    if joint == 0 || count_w1 == 0 || count_w2 == 0 || total == 0 {
        return f64::NEG_INFINITY;
    }
    // u64 * u64 always fits in u128; one division keeps swapped marginals bit-equal
    let observed = u128::from(joint) * u128::from(total);
    let expected = u128::from(count_w1) * u128::from(count_w2);
    (observed as f64 / expected as f64).log2()
}

#[inline]
fn student_t(joint: u64, count_w1: u64, count_w2: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let expected = count_w1 as f64 * count_w2 as f64 / total as f64;
    (joint as f64 - expected) / (joint as f64 + SMALL).sqrt()
}

#[inline]
fn chi_square(c: &Contingency) -> f64 {
    let rows = (c.n_ii + c.n_io) * (c.n_oi + c.n_oo);
    let cols = (c.n_ii + c.n_oi) * (c.n_io + c.n_oo);
    let denom = rows * cols;
    if denom <= 0.0 {
        return 0.0;
    }
    let cross = c.n_ii * c.n_oo - c.n_io * c.n_oi;
    c.total() * cross * cross / denom
}

#[inline]
fn likelihood_ratio(c: &Contingency) -> f64 {
    let [ii, io, oi, oo] = c.observed();
    let [e_ii, e_io, e_oi, e_oo] = c.expected();
    // diagonal and off-diagonal summed separately: swapping io/oi keeps the bits
    2.0 * ((g_term(ii, e_ii) + g_term(oo, e_oo)) + (g_term(io, e_io) + g_term(oi, e_oi)))
}

#[inline(always)]
fn g_term(observed: f64, expected: f64) -> f64 {
    if observed > 0.0 && expected > 0.0 {
        observed * (observed / expected).ln()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    // tokens a b a b c -> bigrams ab ba ab bc; a=2 b=2 c=1, total 4
    const AB: (u64, u64, u64, u64) = (2, 2, 2, 4);

    fn ab(measure: AssociationMeasure) -> f64 {
        score(measure, AB.0, AB.1, AB.2, AB.3)
    }

    #[test]
    fn contingency_cells() {
        let c = Contingency::from_marginals(2, 3, 4, 10);
        assert_eq!(c.observed(), [2.0, 1.0, 2.0, 5.0]);
        assert_eq!(c.total(), 10.0);
    }

    #[test]
    fn contingency_clamps_negative_cells() {
        // final-token marginal larger than its bigram positions
        let c = Contingency::from_marginals(1, 1, 3, 2);
        assert_eq!(c.n_oo, 0.0);
        assert!(c.observed().iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn expected_sums_to_total() {
        let c = Contingency::from_marginals(3, 5, 7, 40);
        let sum: f64 = c.expected().iter().sum();
        assert!(close(sum, c.total()));
    }

    #[test]
    fn raw_freq_value() {
        assert!(close(ab(AssociationMeasure::RawFreq), 0.5));
        assert_eq!(score(AssociationMeasure::RawFreq, 0, 0, 0, 0), 0.0);
    }

    #[test]
    fn pmi_value() {
        // log2(2 * 4 / (2 * 2)) = 1
        assert!(close(ab(AssociationMeasure::Pmi), 1.0));
    }

    #[test]
    fn pmi_zero_marginal_is_negative_infinity() {
        assert_eq!(score(AssociationMeasure::Pmi, 1, 0, 3, 10), f64::NEG_INFINITY);
        assert_eq!(score(AssociationMeasure::Pmi, 1, 3, 0, 10), f64::NEG_INFINITY);
        assert_eq!(score(AssociationMeasure::Pmi, 0, 0, 0, 0), f64::NEG_INFINITY);
    }

    #[test]
    fn pmi_large_counts_do_not_overflow() {
        let big = u64::MAX / 2;
        let s = score(AssociationMeasure::Pmi, big, big, big, big);
        assert!(s.is_finite());
        assert!(close(s, 0.0));
    }

    #[test]
    fn pmi_exact_ratio() {
        // log2(1 * 80 / (2 * 5)) = 3 exactly, whichever marginal comes first
        assert_eq!(score(AssociationMeasure::Pmi, 1, 2, 5, 80), 3.0);
        assert_eq!(score(AssociationMeasure::Pmi, 1, 5, 2, 80), 3.0);
    }

    #[test]
    fn swapped_marginals_score_identically() {
        for measure in AssociationMeasure::ALL {
            for total in 2..=60u64 {
                for a in 1..=12u64 {
                    for b in 1..a {
                        for joint in 1..=b {
                            let ab = score(measure, joint, a, b, total);
                            let ba = score(measure, joint, b, a, total);
                            assert_eq!(
                                ab.to_bits(),
                                ba.to_bits(),
                                "{measure} ({joint},{a},{b},{total}): {ab} vs {ba}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn student_t_value() {
        // (2 - 2*2/4) / sqrt(2)
        assert!(close(ab(AssociationMeasure::StudentT), 1.0 / 2f64.sqrt()));
    }

    #[test]
    fn chi_square_value() {
        // cells ii=2 io=0 oi=0 oo=2: 4 * (4)^2 / (2*2*2*2)
        assert!(close(ab(AssociationMeasure::ChiSquare), 4.0));
    }

    #[test]
    fn chi_square_zero_denominator() {
        // every position is the bigram: the !w1 row is empty
        assert_eq!(score(AssociationMeasure::ChiSquare, 3, 3, 3, 3), 0.0);
    }

    #[test]
    fn chi_square_independence_is_zero() {
        // ii*oo == io*oi
        let c = Contingency {
            n_ii: 1.0,
            n_io: 2.0,
            n_oi: 3.0,
            n_oo: 6.0,
        };
        assert!(close(chi_square(&c), 0.0));
    }

    #[test]
    fn likelihood_ratio_value() {
        // expected 1 in each cell: 2 * (2 ln 2 + 2 ln 2)
        assert!(close(ab(AssociationMeasure::LikelihoodRatio), 8.0 * 2f64.ln()));
    }

    #[test]
    fn likelihood_ratio_non_negative() {
        for (j, a, b, n) in [(1, 5, 5, 100), (4, 4, 9, 20), (1, 1, 1, 2)] {
            assert!(score(AssociationMeasure::LikelihoodRatio, j, a, b, n) >= 0.0);
        }
    }

    #[test]
    fn empty_sample_scores() {
        for measure in AssociationMeasure::ALL {
            let s = score(measure, 0, 0, 0, 0);
            if measure == AssociationMeasure::Pmi {
                assert_eq!(s, f64::NEG_INFINITY);
            } else {
                assert_eq!(s, 0.0, "{measure} should score 0 on an empty sample");
            }
        }
    }

    #[test]
    fn score_by_name_dispatch() {
        assert!(close(score_by_name("pmi", 2, 2, 2, 4).unwrap(), 1.0));
        assert!(close(score_by_name("chi_sq", 2, 2, 2, 4).unwrap(), 4.0));
    }

    #[test]
    fn score_by_name_rejects_unknown() {
        let err = score_by_name("jaccard", 1, 1, 1, 1).unwrap_err();
        assert!(matches!(err, MeasureError::Unknown { ref name } if name == "jaccard"));
    }

    #[test]
    fn coerce_maps_nan_only() {
        assert_eq!(coerce(f64::NAN), f64::NEG_INFINITY);
        assert_eq!(coerce(1.5), 1.5);
        assert_eq!(coerce(f64::INFINITY), f64::INFINITY);
    }
}
