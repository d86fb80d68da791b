use ark_ff::Field;
use tracing::trace;

/// Sub-problems with at most this many elements per half are never forked.
pub const DEFAULT_MIN_PARALLEL_LEN: usize = 64;

/// Ordering contract of a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FftMode {
    /// Decimation in time: input in bit-reversed order, output in natural order.
    Dit,
    /// Decimation in frequency: input in natural order, output in bit-reversed order.
    Dif,
}

/// Bounds how much fork/join parallelism a transform may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FftConfig {
    /// Number of execution units a transform may fan out to.
    pub max_parallelism: usize,
    /// Halves of this length or less are always processed serially.
    pub min_parallel_len: usize,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self::new(rayon::current_num_threads())
    }
}

impl FftConfig {
    pub fn new(max_parallelism: usize) -> Self {
        Self {
            max_parallelism,
            min_parallel_len: DEFAULT_MIN_PARALLEL_LEN,
        }
    }

    /// Single-threaded configuration.
    pub fn serial() -> Self {
        Self::new(1)
    }

    pub fn with_min_parallel_len(mut self, min_parallel_len: usize) -> Self {
        self.min_parallel_len = min_parallel_len;
        self
    }

    fn runs_serial(&self, splits: usize, half_len: usize) -> bool {
        splits.saturating_mul(2) > self.max_parallelism || half_len <= self.min_parallel_len
    }
}

/// Recursive Cooley–Tukey FFT over a finite field, in place
///
/// Input:
/// - `a`: values, `a.len()` must be a power of two
/// - `omega`: a primitive `a.len()`-th root of unity in the field
/// - `mode`: with `Dif` the output is in bit-reversed order, with `Dit` the
///   input must be in bit-reversed order
///
/// Runs with `FftConfig::default()`.
pub fn fft<F: Field>(a: &mut [F], omega: F, mode: FftMode) {
    fft_with_config(a, omega, mode, &FftConfig::default());
}

/// Same as [`fft`] with an explicit parallelism configuration.
///
/// Output does not depend on `config`.
pub fn fft_with_config<F: Field>(a: &mut [F], omega: F, mode: FftMode, config: &FftConfig) {
    trace!(
        len = a.len(),
        ?mode,
        max_parallelism = config.max_parallelism,
        "fft"
    );
    match mode {
        FftMode::Dif => dif_fft(a, omega, 1, config),
        FftMode::Dit => dit_fft(a, omega, 1, config),
    }
}

fn dif_fft<F: Field>(a: &mut [F], mut w: F, splits: usize, config: &FftConfig) {
    let n = a.len();
    if n == 1 {
        return;
    }
    let m = n >> 1;
    let (lo, hi) = a.split_at_mut(m);

    // w^0 == 1
    let t = lo[0];
    lo[0] += hi[0];
    hi[0] = t - hi[0];

    if m == 1 {
        return;
    }

    let mut w_pow = w;
    for (x, y) in lo.iter_mut().zip(hi.iter_mut()).skip(1) {
        let t = *x;
        *x += *y;
        *y = (t - *y) * w_pow;
        w_pow *= w;
    }

    w.square_in_place();
    recurse(lo, hi, w, splits, config, dif_fft);
}

fn dit_fft<F: Field>(a: &mut [F], w: F, splits: usize, config: &FftConfig) {
    let n = a.len();
    if n == 1 {
        return;
    }
    let m = n >> 1;
    let (lo, hi) = a.split_at_mut(m);

    // even indices land in lo, odd in hi
    recurse(lo, hi, w.square(), splits, config, dit_fft);

    // w^0 == 1
    let t = lo[0];
    lo[0] += hi[0];
    hi[0] = t - hi[0];

    if m == 1 {
        return;
    }

    let mut w_pow = w;
    for (x, y) in lo.iter_mut().zip(hi.iter_mut()).skip(1) {
        let t = *x;
        let tm = *y * w_pow;
        *x = t + tm;
        *y = t - tm;
        w_pow *= w;
    }
}

/// Runs `step` on both halves, forking the right half onto the pool when
/// `config` allows another split.
fn recurse<F: Field>(
    lo: &mut [F],
    hi: &mut [F],
    w: F,
    splits: usize,
    config: &FftConfig,
    step: fn(&mut [F], F, usize, &FftConfig),
) {
    if config.runs_serial(splits, lo.len()) {
        step(lo, w, splits, config);
        step(hi, w, splits, config);
    } else {
        let splits = splits << 1;
        rayon::join(
            || step(lo, w, splits, config),
            || step(hi, w, splits, config),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_reverse::bit_reverse;
    use ark_bls12_381::Fr;
    use ark_ff::FftField;
    use ark_poly::univariate::DensePolynomial;
    use ark_poly::{DenseUVPolynomial, Polynomial};
    use ark_std::{UniformRand, test_rng};

    fn get_omega(n: usize) -> Fr {
        Fr::get_root_of_unity(n as u64).unwrap()
    }

    fn random_values(n: usize) -> Vec<Fr> {
        let mut rng = test_rng();
        (0..n).map(|_| Fr::rand(&mut rng)).collect()
    }

    fn naive_evaluations(coefficients: &[Fr], omega: Fr) -> Vec<Fr> {
        let poly = DensePolynomial::from_coefficients_slice(coefficients);
        (0..coefficients.len())
            .map(|i| poly.evaluate(&omega.pow([i as u64])))
            .collect()
    }

    #[test]
    fn test_two_point_transform() {
        let minus_one = -Fr::from(1u64);
        let expected = vec![Fr::from(8u64), -Fr::from(2u64)];

        for mode in [FftMode::Dit, FftMode::Dif] {
            let mut a = vec![Fr::from(3u64), Fr::from(5u64)];
            fft(&mut a, minus_one, mode);
            assert_eq!(a, expected, "{:?}", mode);
        }
    }

    #[test]
    fn test_length_one_is_identity() {
        let omega = Fr::from(1u64);
        for mode in [FftMode::Dit, FftMode::Dif] {
            let mut a = vec![Fr::from(17u64)];
            fft(&mut a, omega, mode);
            assert_eq!(a, vec![Fr::from(17u64)]);
        }
    }

    #[test]
    fn test_dif_matches_naive_evaluation() {
        for log_n in 1..9 {
            let n = 1 << log_n;
            let omega = get_omega(n);
            let coefficients = random_values(n);

            let mut a = coefficients.clone();
            fft(&mut a, omega, FftMode::Dif);
            bit_reverse(&mut a);

            assert_eq!(a, naive_evaluations(&coefficients, omega), "n = {}", n);
        }
    }

    #[test]
    fn test_dit_matches_naive_evaluation() {
        for log_n in 1..9 {
            let n = 1 << log_n;
            let omega = get_omega(n);
            let coefficients = random_values(n);

            let mut a = coefficients.clone();
            bit_reverse(&mut a);
            fft(&mut a, omega, FftMode::Dit);

            assert_eq!(a, naive_evaluations(&coefficients, omega), "n = {}", n);
        }
    }

    #[test]
    fn test_dif_then_dit_round_trip() {
        let n = 1 << 10;
        let omega = get_omega(n);
        let n_inv = Fr::from(n as u64).inverse().unwrap();
        let original = random_values(n);

        let mut a = original.clone();
        fft(&mut a, omega, FftMode::Dif);
        // bit-reversed evaluations are exactly what DIT expects
        fft(&mut a, omega.inverse().unwrap(), FftMode::Dit);
        a.iter_mut().for_each(|x| *x *= n_inv);

        assert_eq!(a, original);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let n = 1 << 11;
        let omega = get_omega(n);
        let input = random_values(n);

        for mode in [FftMode::Dit, FftMode::Dif] {
            let mut expected = input.clone();
            fft_with_config(&mut expected, omega, mode, &FftConfig::serial());

            for max_parallelism in 1..=16 {
                for min_parallel_len in [1, 2, 8, DEFAULT_MIN_PARALLEL_LEN, n] {
                    let config =
                        FftConfig::new(max_parallelism).with_min_parallel_len(min_parallel_len);
                    let mut a = input.clone();
                    fft_with_config(&mut a, omega, mode, &config);
                    assert_eq!(a, expected, "{:?} {:?}", mode, config);
                }
            }
        }
    }

    #[test]
    fn test_zero_parallelism_runs_serially() {
        let n = 1 << 8;
        let omega = get_omega(n);
        let input = random_values(n);

        let mut a = input.clone();
        fft_with_config(&mut a, omega, FftMode::Dif, &FftConfig::new(0));
        let mut b = input;
        fft_with_config(&mut b, omega, FftMode::Dif, &FftConfig::serial());
        assert_eq!(a, b);
    }

    #[test]
    fn test_runs_serial_policy() {
        let config = FftConfig::new(4);
        assert!(!config.runs_serial(1, 128));
        assert!(!config.runs_serial(2, 128));
        assert!(config.runs_serial(4, 128));
        assert!(config.runs_serial(1, DEFAULT_MIN_PARALLEL_LEN));
        assert!(!config.runs_serial(1, DEFAULT_MIN_PARALLEL_LEN + 1));
    }
}
