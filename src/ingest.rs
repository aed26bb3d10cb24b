//! Numeric ingestion: bring caller weights into the `u64` sum domain.
//!
//! The engine is written once against `u64`. Every supported element type
//! implements [`Weight`], and [`ingest`] materialises a slice of them into a
//! contiguous buffer in the original order, stopping at the first element
//! that cannot be represented.
//!
//! | element type | conversion |
//! |--------------|------------|
//! | unsigned ints | widened, `u128` checked against `u64::MAX` |
//! | signed ints | negatives rejected, then widened |
//! | `f32`/`f64` | NaN/infinite/negative rejected, rounded **up** |
//!
//! Rounding floats up keeps the capacity bound honest: a selection whose
//! rounded weights fit the capacity also fits it with the exact values.

/// Why a single element was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Negative,
    NonFinite,
    OutOfRange,
}

impl Rejection {
    pub fn reason(self) -> &'static str {
        match self {
            Rejection::Negative => "negative weight",
            Rejection::NonFinite => "non-finite weight",
            Rejection::OutOfRange => "weight out of range",
        }
    }
}

/// An element type accepted as a weight.
pub trait Weight: Copy {
    /// Convert to the integral sum domain.
    fn to_sum(self) -> Result<u64, Rejection>;
}

macro_rules! impl_weight_unsigned {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            #[inline]
            fn to_sum(self) -> Result<u64, Rejection> {
                u64::try_from(self).map_err(|_| Rejection::OutOfRange)
            }
        }
    )*};
}

macro_rules! impl_weight_signed {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            #[inline]
            fn to_sum(self) -> Result<u64, Rejection> {
                if self < 0 {
                    return Err(Rejection::Negative);
                }
                u64::try_from(self).map_err(|_| Rejection::OutOfRange)
            }
        }
    )*};
}

macro_rules! impl_weight_float {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            #[inline]
            fn to_sum(self) -> Result<u64, Rejection> {
                if !self.is_finite() {
                    return Err(Rejection::NonFinite);
                }
                if self < 0.0 {
                    return Err(Rejection::Negative);
                }
                let up = f64::from(self).ceil();
                // 2^64 is the first value that does not fit.
                if up >= 18_446_744_073_709_551_616.0 {
                    return Err(Rejection::OutOfRange);
                }
                Ok(up as u64)
            }
        }
    )*};
}

impl_weight_unsigned!(u8, u16, u32, u64, u128, usize);
impl_weight_signed!(i8, i16, i32, i64, i128, isize);
impl_weight_float!(f32, f64);

/// Convert `weights` into the sum domain, preserving order.
///
/// # Errors
/// [`SolveError::InvalidInput`](crate::SolveError::InvalidInput) naming the
/// first rejected index.
pub fn ingest<T: Weight>(weights: &[T]) -> Result<Vec<u64>, crate::SolveError> {
    weights
        .iter()
        .enumerate()
        .map(|(index, &w)| {
            w.to_sum().map_err(|r| crate::SolveError::InvalidInput {
                index,
                reason: r.reason(),
            })
        })
        .collect()
}
