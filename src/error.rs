use thiserror::Error;

pub type Result<T> = core::result::Result<T, FftError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    #[error("domain of size 2^{log_size} is too big: largest root of unity has order 2^{max_order_root}")]
    DomainTooLarge { log_size: u32, max_order_root: u32 },
    #[error("cardinality {0} is not a power of two")]
    NotPowerOfTwo(usize),
    #[error("no power of two >= {0} fits in usize")]
    SizeOverflow(usize),
    #[error("primitive root `{0}` is not a valid field element")]
    InvalidRoot(&'static str),
    #[error("{0} is not invertible")]
    NotInvertible(&'static str),
    #[error("expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
