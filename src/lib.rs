//! Parallel radix-2 FFT over prime fields with large power-of-two subgroups.
//!
//! ```
//! use ark_bls12_381::Fr;
//! use radix2_fft::{Domain, FftMode, bit_reverse, fft};
//!
//! let domain = Domain::<Fr>::new(4);
//! let mut a = vec![Fr::from(1u64), Fr::from(2u64), Fr::from(3u64), Fr::from(4u64)];
//!
//! // natural order in, bit-reversed evaluations out
//! fft(&mut a, domain.generator, FftMode::Dif);
//! bit_reverse(&mut a);
//! assert_eq!(a[0], Fr::from(10u64));
//! ```

pub mod bit_reverse;
pub mod domain;
pub mod error;
pub mod fft;
pub mod field;

pub use bit_reverse::bit_reverse;
pub use domain::Domain;
pub use error::{FftError, Result};
pub use fft::{FftConfig, FftMode, fft, fft_with_config};
pub use field::{FieldId, FieldParams, RegisteredField};
