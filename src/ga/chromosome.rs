//! Fixed-length bit-string chromosome.
//!
//! A [`Chromosome`] is a value type: its length is fixed at construction
//! and the only way to obtain different genes is to build a new value
//! (crossover, mutation). This keeps parents and children from sharing
//! buffers.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of genes (bits) encoding one candidate solution.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::Chromosome;
///
/// let c: Chromosome = "0110".parse().unwrap();
/// assert_eq!(c.len(), 4);
/// assert_eq!(c.count_ones(), 2);
/// assert_eq!(c.to_string(), "0110");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Box<[bool]>,
}

impl Chromosome {
    /// Creates a chromosome from explicit genes.
    pub fn new(genes: Vec<bool>) -> Self {
        Self {
            genes: genes.into_boxed_slice(),
        }
    }

    /// Creates a chromosome of `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![false; len])
    }

    /// Creates a chromosome of `len` one bits.
    pub fn ones(len: usize) -> Self {
        Self::new(vec![true; len])
    }

    /// Creates a chromosome whose bits are independently and uniformly 0 or 1.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self::new((0..len).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The genes, most significant first.
    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Returns the gene at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.genes.get(index).copied()
    }

    /// Number of set genes.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Indices of the set genes, ascending.
    pub fn ones_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| g.then_some(i))
    }

    /// Bitwise complement.
    pub fn complement(&self) -> Self {
        Self::new(self.genes.iter().map(|&g| !g).collect())
    }

    /// Decodes the chromosome into a real value in `[lower, upper]`.
    ///
    /// See [`bits_to_real`].
    pub fn to_real(&self, lower: f64, upper: f64) -> f64 {
        bits_to_real(&self.genes, lower, upper)
    }
}

impl From<Vec<bool>> for Chromosome {
    fn from(genes: Vec<bool>) -> Self {
        Self::new(genes)
    }
}

impl FromIterator<bool> for Chromosome {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &g in self.genes.iter() {
            f.write_str(if g { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Error returned when parsing a chromosome from a string that contains
/// characters other than `0` and `1`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid gene character {found:?} at position {position}")]
pub struct ParseChromosomeError {
    pub position: usize,
    pub found: char,
}

impl FromStr for Chromosome {
    type Err = ParseChromosomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(ParseChromosomeError { position, found }),
            })
            .collect()
    }
}

/// Maps an unsigned bit vector onto the real interval `[lower, upper]`.
///
/// The bits are read most-significant first as an unsigned integer `v`,
/// then `lower + v / (2^n - 1) * (upper - lower)` is returned, where `n`
/// is the number of bits. All zeros decode to exactly `lower` and all ones
/// to exactly `upper`; every other input is clamped into the interval when
/// `lower <= upper`. An empty slice decodes to `lower`.
///
/// `v / 2^n` is accumulated from the least significant bit, so any width
/// decodes to a finite value. Widths above 53 bits lose resolution in the
/// low bits.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::bits_to_real;
///
/// assert_eq!(bits_to_real(&[false; 16], -10.0, 10.0), -10.0);
/// assert_eq!(bits_to_real(&[true; 16], -10.0, 10.0), 10.0);
/// ```
pub fn bits_to_real(bits: &[bool], lower: f64, upper: f64) -> f64 {
    if !bits.contains(&true) {
        return lower;
    }
    if !bits.contains(&false) {
        return upper;
    }

    // v / 2^n
    let fraction = bits
        .iter()
        .rev()
        .fold(0.0_f64, |acc, &b| (acc + if b { 1.0 } else { 0.0 }) * 0.5);
    // 2^n / (2^n - 1); exactly 1.0 once 2^-n underflows
    let exponent = bits.len().min(i32::MAX as usize) as i32;
    let scale = 1.0 / (1.0 - 0.5_f64.powi(exponent));

    let x = lower + fraction * scale * (upper - lower);
    if lower <= upper {
        x.clamp(lower, upper)
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_parse_and_display() {
        let c: Chromosome = "1010011".parse().unwrap();
        assert_eq!(c.len(), 7);
        assert_eq!(c.to_string(), "1010011");
        assert_eq!(c.get(0), Some(true));
        assert_eq!(c.get(1), Some(false));
        assert_eq!(c.get(7), None);
    }

    #[test]
    fn test_parse_rejects_other_chars() {
        let err = "01x1".parse::<Chromosome>().unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.found, 'x');
    }

    #[test]
    fn test_random_has_requested_length() {
        let mut rng = create_rng(42);
        for len in [1, 2, 10, 64, 100] {
            assert_eq!(Chromosome::random(len, &mut rng).len(), len);
        }
    }

    #[test]
    fn test_random_is_roughly_balanced() {
        let mut rng = create_rng(42);
        let c = Chromosome::random(10_000, &mut rng);
        let ones = c.count_ones();
        assert!((4_500..5_500).contains(&ones), "got {ones} ones");
    }

    #[test]
    fn test_complement() {
        let c: Chromosome = "1100".parse().unwrap();
        assert_eq!(c.complement().to_string(), "0011");
        assert_eq!(c.complement().complement(), c);
    }

    #[test]
    fn test_ones_indices() {
        let c: Chromosome = "0100011".parse().unwrap();
        assert_eq!(c.ones_indices().collect::<Vec<_>>(), vec![1, 5, 6]);
    }

    #[test]
    fn test_decode_bounds_are_exact() {
        assert_eq!(Chromosome::zeros(16).to_real(-10.0, 10.0), -10.0);
        assert_eq!(Chromosome::ones(16).to_real(-10.0, 10.0), 10.0);
    }

    #[test]
    fn test_decode_msb_first() {
        // 0b10 = 2 of max 3
        let c: Chromosome = "10".parse().unwrap();
        assert!((c.to_real(0.0, 3.0) - 2.0).abs() < 1e-12);
        // 0b01 = 1 of max 3
        let c: Chromosome = "01".parse().unwrap();
        assert!((c.to_real(0.0, 3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_decode_midpoint() {
        // 0b1000_0000 = 128 of 255
        let c: Chromosome = "10000000".parse().unwrap();
        let expected = 128.0 / 255.0;
        assert!((c.to_real(0.0, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_decode_all_ones_is_exact_for_inexact_bounds() {
        let (lower, upper) = (-1.1998507809928838, 3.9178945782828745);
        assert_eq!(bits_to_real(&[true; 16], lower, upper), upper);
        assert_eq!(bits_to_real(&[false; 16], lower, upper), lower);
    }

    #[test]
    fn test_decode_stays_below_upper() {
        let (lower, upper) = (-1.1998507809928838, 3.9178945782828745);
        let mut rng = create_rng(42);
        for _ in 0..1_000 {
            let c = Chromosome::random(16, &mut rng);
            let x = c.to_real(lower, upper);
            assert!(x >= lower && x <= upper, "{x} outside [{lower}, {upper}]");
        }
    }

    #[test]
    fn test_decode_wide_chromosome_is_finite() {
        assert_eq!(Chromosome::ones(1100).to_real(0.0, 1.0), 1.0);

        let mut genes = vec![false; 1100];
        genes[0] = true;
        let x = Chromosome::new(genes).to_real(0.0, 1.0);
        assert!((x - 0.5).abs() < 1e-12, "got {x}");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(bits_to_real(&[], 3.0, 5.0), 3.0);
    }
}
