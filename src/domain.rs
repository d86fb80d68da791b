//! Evaluation domains: multiplicative subgroups of power-of-two order.
//!
//! A `Domain` of cardinality `x` carries a generator `g` of the order-`x`
//! subgroup `H`, a generator `g_sqrt` of the order-`2x` subgroup with
//! `g_sqrt^2 = g`, their inverses, and `1/x`. The transforms below use `g` for
//! evaluation over `H` and `g_sqrt` as the shift of the coset `g_sqrt * H`.
//!
//! Only `x` and `g_sqrt` are serialized; everything else is rebuilt on read.

use ark_ff::{Field, PrimeField};
use ark_poly::DenseUVPolynomial;
use ark_poly::univariate::DensePolynomial;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::bit_reverse::bit_reverse;
use crate::error::{self, FftError};
use crate::fft::{FftConfig, FftMode, fft_with_config};
use crate::field::{FieldParams, RegisteredField};

/// Smallest chunk handed to a worker when scaling by powers.
const MIN_PARALLEL_CHUNK_LEN: usize = 1 << 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain<F: Field> {
    pub cardinality: usize,
    pub log_cardinality: u32,
    /// Generator of the subgroup of order `cardinality`.
    pub generator: F,
    pub generator_inv: F,
    /// Generator of the subgroup of order `2 * cardinality`.
    pub generator_sqrt: F,
    pub generator_sqrt_inv: F,
    pub cardinality_inv: F,
}

impl<F: RegisteredField> Domain<F> {
    /// Returns the smallest domain with cardinality `>= m`.
    ///
    /// Panics if the field has no root of unity of order `2 * cardinality`.
    pub fn new(m: usize) -> Self {
        match Self::try_new(m) {
            Ok(domain) => domain,
            Err(e) => panic!("cannot build evaluation domain for m = {m}: {e}"),
        }
    }

    pub fn try_new(m: usize) -> error::Result<Self> {
        Self::try_with_params(m, &F::FIELD.params())
    }
}

impl<F: PrimeField> Domain<F> {
    /// Like [`Domain::new`], with the two-adic constants supplied by the caller.
    pub fn with_params(m: usize, params: &FieldParams) -> Self {
        match Self::try_with_params(m, params) {
            Ok(domain) => domain,
            Err(e) => panic!("cannot build evaluation domain for m = {m}: {e}"),
        }
    }

    pub fn try_with_params(m: usize, params: &FieldParams) -> error::Result<Self> {
        let root: F = params.root_of_unity()?;
        Self::from_root_of_unity(m, root, params.max_order_root)
    }

    /// Builds the domain from a primitive root of unity of order `2^max_order_root`.
    pub fn from_root_of_unity(m: usize, root: F, max_order_root: u32) -> error::Result<Self> {
        let cardinality = m.checked_next_power_of_two().ok_or(FftError::SizeOverflow(m))?;
        let log_cardinality = cardinality.trailing_zeros();

        // generator_sqrt needs order 2 * cardinality
        if log_cardinality + 1 > max_order_root {
            return Err(FftError::DomainTooLarge {
                log_size: log_cardinality,
                max_order_root,
            });
        }

        // root^(2^(max_order_root - log_cardinality - 1)) has order 2 * cardinality
        let mut generator_sqrt = root;
        for _ in 0..max_order_root - log_cardinality - 1 {
            generator_sqrt.square_in_place();
        }

        let domain = Self::from_generator_sqrt(cardinality, generator_sqrt)?;
        debug!(m, cardinality, log_cardinality, "evaluation domain");
        Ok(domain)
    }
}

impl<F: Field> Domain<F> {
    /// Derives every other member from `cardinality` and a generator of the
    /// subgroup of order `2 * cardinality`. The order of `generator_sqrt` is
    /// trusted; [`Valid::check`] verifies it.
    pub fn from_generator_sqrt(cardinality: usize, generator_sqrt: F) -> error::Result<Self> {
        if !cardinality.is_power_of_two() {
            return Err(FftError::NotPowerOfTwo(cardinality));
        }
        let generator = generator_sqrt.square();

        let generator_sqrt_inv = generator_sqrt
            .inverse()
            .ok_or(FftError::NotInvertible("generator"))?;
        let generator_inv = generator
            .inverse()
            .ok_or(FftError::NotInvertible("generator"))?;
        let cardinality_inv = F::from(cardinality as u64)
            .inverse()
            .ok_or(FftError::NotInvertible("cardinality"))?;

        Ok(Self {
            cardinality,
            log_cardinality: cardinality.trailing_zeros(),
            generator,
            generator_inv,
            generator_sqrt,
            generator_sqrt_inv,
            cardinality_inv,
        })
    }

    /// Iterates over `generator^i` for `i` in `0..cardinality`.
    pub fn elements(&self) -> impl Iterator<Item = F> + '_ {
        std::iter::successors(Some(F::one()), move |x| Some(*x * self.generator))
            .take(self.cardinality)
    }

    /// Coefficients to evaluations over the domain, both in natural order.
    pub fn fft_in_place(&self, a: &mut [F]) -> error::Result<()> {
        self.fft_in_place_with_config(a, &FftConfig::default())
    }

    pub fn fft_in_place_with_config(&self, a: &mut [F], config: &FftConfig) -> error::Result<()> {
        self.check_len(a.len())?;
        fft_with_config(a, self.generator, FftMode::Dif, config);
        bit_reverse(a);
        Ok(())
    }

    /// Evaluations over the domain to coefficients, both in natural order.
    pub fn ifft_in_place(&self, a: &mut [F]) -> error::Result<()> {
        self.ifft_in_place_with_config(a, &FftConfig::default())
    }

    pub fn ifft_in_place_with_config(&self, a: &mut [F], config: &FftConfig) -> error::Result<()> {
        self.check_len(a.len())?;
        bit_reverse(a);
        fft_with_config(a, self.generator_inv, FftMode::Dit, config);
        let cardinality_inv = self.cardinality_inv;
        a.par_iter_mut().for_each(|x| *x *= cardinality_inv);
        Ok(())
    }

    /// Evaluates over the coset `generator_sqrt * H`.
    pub fn coset_fft_in_place(&self, a: &mut [F]) -> error::Result<()> {
        self.check_len(a.len())?;
        distribute_powers(a, self.generator_sqrt);
        self.fft_in_place(a)
    }

    /// Inverse of [`Domain::coset_fft_in_place`].
    pub fn coset_ifft_in_place(&self, a: &mut [F]) -> error::Result<()> {
        self.ifft_in_place(a)?;
        distribute_powers(a, self.generator_sqrt_inv);
        Ok(())
    }

    /// Evaluations of `poly` over the domain. `poly` must have at most
    /// `cardinality` coefficients.
    pub fn evaluate(&self, poly: &DensePolynomial<F>) -> error::Result<Vec<F>> {
        if poly.coeffs.len() > self.cardinality {
            return Err(FftError::LengthMismatch {
                expected: self.cardinality,
                actual: poly.coeffs.len(),
            });
        }
        let mut evals = poly.coeffs.clone();
        evals.resize(self.cardinality, F::zero());
        self.fft_in_place(&mut evals)?;
        Ok(evals)
    }

    /// The unique polynomial of degree `< cardinality` taking `evals` over the domain.
    pub fn interpolate(&self, evals: &[F]) -> error::Result<DensePolynomial<F>> {
        let mut coeffs = evals.to_vec();
        self.ifft_in_place(&mut coeffs)?;
        Ok(DensePolynomial::from_coefficients_vec(coeffs))
    }

    /// Pointwise product of two evaluation vectors over the domain.
    pub fn mul_evaluations(&self, a: &[F], b: &[F]) -> error::Result<Vec<F>> {
        self.check_len(a.len())?;
        self.check_len(b.len())?;
        Ok(a.iter().zip_eq(b).map(|(x, y)| *x * y).collect())
    }

    fn check_len(&self, len: usize) -> error::Result<()> {
        if len != self.cardinality {
            return Err(FftError::LengthMismatch {
                expected: self.cardinality,
                actual: len,
            });
        }
        Ok(())
    }
}

/// Multiplies `a[i]` by `g^i`.
fn distribute_powers<F: Field>(a: &mut [F], g: F) {
    let chunk_len = (a.len() / rayon::current_num_threads()).max(MIN_PARALLEL_CHUNK_LEN);
    a.par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(i, chunk)| {
            let mut pow = g.pow([(i * chunk_len) as u64]);
            for x in chunk.iter_mut() {
                *x *= pow;
                pow *= g;
            }
        });
}

impl<F: Field> CanonicalSerialize for Domain<F> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.cardinality.serialize_with_mode(&mut writer, compress)?;
        self.generator_sqrt.serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.cardinality.serialized_size(compress) + self.generator_sqrt.serialized_size(compress)
    }
}

impl<F: Field> Valid for Domain<F> {
    fn check(&self) -> Result<(), SerializationError> {
        let consistent = self.cardinality.is_power_of_two()
            && self.log_cardinality == self.cardinality.trailing_zeros()
            && self.generator_sqrt.square() == self.generator
            && (self.generator * self.generator_inv).is_one()
            && (self.generator_sqrt * self.generator_sqrt_inv).is_one()
            && (F::from(self.cardinality as u64) * self.cardinality_inv).is_one()
            // order of generator_sqrt is exactly 2 * cardinality
            && self.generator_sqrt.pow([self.cardinality as u64]) == -F::one();
        if consistent {
            Ok(())
        } else {
            Err(SerializationError::InvalidData)
        }
    }
}

impl<F: Field> CanonicalDeserialize for Domain<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let cardinality = usize::deserialize_with_mode(&mut reader, compress, validate)?;
        let generator_sqrt = F::deserialize_with_mode(&mut reader, compress, validate)?;
        let domain = Self::from_generator_sqrt(cardinality, generator_sqrt)
            .map_err(|_| SerializationError::InvalidData)?;
        if let Validate::Yes = validate {
            domain.check()?;
        }
        Ok(domain)
    }
}
