//! Stereo sample type and the integer amplitude abstraction.

use num_traits::{AsPrimitive, PrimInt, Signed};
use std::fmt::Debug;

/// Signed integer amplitude stored in a [`Sample`].
///
/// Differences are taken in `i64` and scaling happens in `f64`, so no
/// arithmetic wraps before the final truncation back to the sample width.
pub trait Amplitude:
    PrimInt + Signed + AsPrimitive<f64> + AsPrimitive<i64> + Debug + Default + Send + Sync + 'static
{
    /// Bit width of the amplitude as stored in a WAV file
    const BITS: u16;

    /// Truncate toward zero and convert back to the sample width
    fn from_f64_trunc(value: f64) -> Self;

    /// Convert a widened integer back to the sample width
    fn from_i64(value: i64) -> Self;

    /// Widen to `f64`
    #[inline]
    fn as_f64(self) -> f64 {
        <Self as AsPrimitive<f64>>::as_(self)
    }

    /// Widen to `i64`
    #[inline]
    fn as_i64(self) -> i64 {
        <Self as AsPrimitive<i64>>::as_(self)
    }

    /// Full-scale magnitude, used to normalize levels
    #[inline]
    fn full_scale() -> f64 {
        Self::max_value().as_f64()
    }
}

macro_rules! impl_amplitude {
    ($type:ty, $bits:expr) => {
        impl Amplitude for $type {
            const BITS: u16 = $bits;

            #[inline]
            fn from_f64_trunc(value: f64) -> Self {
                // `as` truncates toward zero and saturates at the type bounds
                value as $type
            }

            #[inline]
            fn from_i64(value: i64) -> Self {
                value.clamp(<$type>::MIN as i64, <$type>::MAX as i64) as $type
            }
        }
    };
}

impl_amplitude!(i8, 8);
impl_amplitude!(i16, 16);
impl_amplitude!(i32, 32);

/// One instant of stereo audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample<T: Amplitude = i16> {
    /// Left channel amplitude
    pub left: T,
    /// Right channel amplitude
    pub right: T,
}

impl<T: Amplitude> Sample<T> {
    /// Create a sample from its two channel amplitudes
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// Create a sample with the same amplitude on both channels
    pub fn mono(value: T) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    /// Scale both channels by `factor`, truncating toward zero
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            left: T::from_f64_trunc(self.left.as_f64() * factor),
            right: T::from_f64_trunc(self.right.as_f64() * factor),
        }
    }
}

impl<T: Amplitude> From<(T, T)> for Sample<T> {
    fn from((left, right): (T, T)) -> Self {
        Self::new(left, right)
    }
}
