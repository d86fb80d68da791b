use ark_ff::PrimeField;

use crate::error::{FftError, Result};

/// Two-adic constants of a prime field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldParams {
    /// Decimal representation of a primitive root of unity of order `2^max_order_root`.
    pub primitive_root: &'static str,
    /// The field's 2-adicity.
    pub max_order_root: u32,
}

impl FieldParams {
    pub const fn new(primitive_root: &'static str, max_order_root: u32) -> Self {
        Self {
            primitive_root,
            max_order_root,
        }
    }

    /// Parses the primitive root as an element of `F`.
    pub fn root_of_unity<F: PrimeField>(&self) -> Result<F> {
        self.primitive_root
            .parse::<F>()
            .map_err(|_| FftError::InvalidRoot(self.primitive_root))
    }
}

/// Scalar fields with known two-adic constants.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    Bls12_377,
    Bls12_381,
    Bn254,
    Bw6_761,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [
        FieldId::Bls12_377,
        FieldId::Bls12_381,
        FieldId::Bn254,
        FieldId::Bw6_761,
    ];

    pub const fn params(self) -> FieldParams {
        match self {
            FieldId::Bls12_377 => FieldParams::new(
                "8065159656716812877374967518403273466521432693661810619979959746626482506078",
                47,
            ),
            FieldId::Bls12_381 => FieldParams::new(
                "10238227357739495823651030575849232062558860180284477541189508159991286009131",
                32,
            ),
            FieldId::Bn254 => FieldParams::new(
                "19103219067921713944291392827692070036145651957329286315305642004821462161904",
                28,
            ),
            FieldId::Bw6_761 => FieldParams::new(
                "32863578547254505029601261939868325669770508939375122462904745766352256812585773382134936404344547323199885654433",
                46,
            ),
        }
    }
}

/// A concrete field type that has an entry in [`FieldId`].
pub trait RegisteredField: PrimeField {
    const FIELD: FieldId;
}

impl RegisteredField for ark_bls12_377::Fr {
    const FIELD: FieldId = FieldId::Bls12_377;
}

impl RegisteredField for ark_bls12_381::Fr {
    const FIELD: FieldId = FieldId::Bls12_381;
}

impl RegisteredField for ark_bn254::Fr {
    const FIELD: FieldId = FieldId::Bn254;
}

impl RegisteredField for ark_bw6_761::Fr {
    const FIELD: FieldId = FieldId::Bw6_761;
}
