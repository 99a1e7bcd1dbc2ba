//! Bounded-integer codec.
//!
//! A [`ValueRange`] pins a value to a closed interval `[lo, hi]` and codes
//! it as an offset from `lo` in the fewest bits that cover the span. Both
//! directions validate: encoding a value outside the interval and decoding
//! a bit pattern past the span surface as
//! [`Error::OutOfRange`](crate::error::Error::OutOfRange) instead of
//! wrapping silently.

use bitstream_io::{BitRead, BitWrite};

use crate::engine::{Deserializer, Serializer};
use crate::error::{Error, Result};
use crate::ext::{CallShape, DeserializeExt, Extension, SerializeExt};

/// Minimum bits that distinguish every offset in `0..=span`.
pub fn bits_for(span: u64) -> u32 {
    if span == 0 {
        0
    } else {
        64 - span.leading_zeros()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Integers a [`ValueRange`] can code.
///
/// Offsets are computed in two's-complement, so a signed interval such as
/// `[-5, 5]` maps onto `0..=10` without any sign handling at the call site.
pub trait RangeValue: Copy + PartialOrd + sealed::Sealed {
    /// Offset of `self` above `lo`.
    fn offset_from(self, lo: Self) -> u64;

    /// Value sitting `offset` above `lo`.
    fn from_offset(lo: Self, offset: u64) -> Self;

    /// Widen for error reporting.
    fn widen(self) -> i128;
}

macro_rules! range_unsigned {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl RangeValue for $t {
            #[inline]
            fn offset_from(self, lo: Self) -> u64 {
                (self - lo) as u64
            }

            #[inline]
            fn from_offset(lo: Self, offset: u64) -> Self {
                lo + offset as $t
            }

            #[inline]
            fn widen(self) -> i128 {
                self as i128
            }
        }
    )*};
}

range_unsigned!(u8, u16, u32, u64, usize);

macro_rules! range_signed {
    ($($t:ty as $u:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl RangeValue for $t {
            #[inline]
            fn offset_from(self, lo: Self) -> u64 {
                self.wrapping_sub(lo) as $u as u64
            }

            #[inline]
            fn from_offset(lo: Self, offset: u64) -> Self {
                lo.wrapping_add(offset as $u as $t)
            }

            #[inline]
            fn widen(self) -> i128 {
                self as i128
            }
        }
    )*};
}

range_signed!(i8 as u8, i16 as u16, i32 as u32, i64 as u64, isize as usize);

/// Codec for integers confined to a closed interval.
///
/// The wire format is the offset `value - lo`, written in
/// [`bits_for`]`(hi - lo)` bits. A degenerate single-value interval costs
/// zero bits on the wire.
#[derive(Clone, Copy, Debug)]
pub struct ValueRange<T> {
    lo: T,
    hi: T,
    span: u64,
    bits: u32,
}

impl<T: RangeValue> ValueRange<T> {
    /// Build a codec for `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn new(lo: T, hi: T) -> Self {
        assert!(lo <= hi, "inverted range bounds");
        let span = hi.offset_from(lo);
        Self {
            lo,
            hi,
            span,
            bits: bits_for(span),
        }
    }

    /// Wire width of one coded value, in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Write `value` as its offset from the interval's lower bound.
    pub fn encode<W: BitWrite>(&self, ser: &mut Serializer<W>, value: T) -> Result<()> {
        if value < self.lo || self.hi < value {
            return Err(Error::OutOfRange {
                value: value.widen(),
                lo: self.lo.widen(),
                hi: self.hi.widen(),
            });
        }
        ser.bits(self.bits, value.offset_from(self.lo))
    }

    /// Read one value, rejecting bit patterns past the interval's span.
    pub fn decode<R: BitRead>(&self, de: &mut Deserializer<R>) -> Result<T> {
        let offset = de.bits(self.bits)?;
        if offset > self.span {
            return Err(Error::OutOfRange {
                value: self.lo.widen() + offset as i128,
                lo: self.lo.widen(),
                hi: self.hi.widen(),
            });
        }
        Ok(T::from_offset(self.lo, offset))
    }
}

// A range replaces the value's wire format wholesale; there is no inner
// object or closure left to fall back to.
impl<T: RangeValue> Extension for ValueRange<T> {
    fn supports(shape: CallShape) -> bool {
        matches!(shape, CallShape::Value)
    }
}

impl<T: RangeValue> SerializeExt<T> for ValueRange<T> {
    fn serialize<W, F>(&self, ser: &mut Serializer<W>, value: &T, _fallback: F) -> Result<()>
    where
        W: BitWrite,
        F: FnOnce(&mut Serializer<W>, &T) -> Result<()>,
    {
        self.encode(ser, *value)
    }
}

impl<T: RangeValue> DeserializeExt<T> for ValueRange<T> {
    fn deserialize<R, F>(&self, de: &mut Deserializer<R>, _fallback: F) -> Result<T>
    where
        R: BitRead,
        F: FnOnce(&mut Deserializer<R>) -> Result<T>,
    {
        self.decode(de)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ByteDeserializer, ByteSerializer};
    use proptest::prelude::*;

    #[test]
    fn test_bits_for_spans() {
        assert_eq!(bits_for(0), 0);
        assert_eq!(bits_for(1), 1);
        assert_eq!(bits_for(2), 2);
        assert_eq!(bits_for(3), 2);
        assert_eq!(bits_for(4), 3);
        assert_eq!(bits_for(255), 8);
        assert_eq!(bits_for(256), 9);
        assert_eq!(bits_for(u64::MAX), 64);
    }

    #[test]
    fn test_roundtrip_unsigned() {
        let range = ValueRange::new(10u32, 17);
        assert_eq!(range.bits(), 3);

        let mut ser = ByteSerializer::new_vec();
        for v in 10..=17 {
            range.encode(&mut ser, v).unwrap();
        }
        let bytes = ser.into_bytes().unwrap();
        assert_eq!(bytes.len(), 3); // 8 values x 3 bits = 24 bits

        let mut de = ByteDeserializer::from_bytes(&bytes);
        for v in 10..=17 {
            assert_eq!(range.decode(&mut de).unwrap(), v);
        }
    }

    #[test]
    fn test_roundtrip_signed() {
        let range = ValueRange::new(-5i16, 5);
        assert_eq!(range.bits(), 4);

        let mut ser = ByteSerializer::new_vec();
        for v in -5..=5 {
            range.encode(&mut ser, v).unwrap();
        }
        let bytes = ser.into_bytes().unwrap();

        let mut de = ByteDeserializer::from_bytes(&bytes);
        for v in -5..=5 {
            assert_eq!(range.decode(&mut de).unwrap(), v);
        }
    }

    #[test]
    fn test_full_width_interval() {
        let range = ValueRange::new(i64::MIN, i64::MAX);
        assert_eq!(range.bits(), 64);

        let mut ser = ByteSerializer::new_vec();
        for v in [i64::MIN, -1, 0, 1, i64::MAX] {
            range.encode(&mut ser, v).unwrap();
        }
        let bytes = ser.into_bytes().unwrap();

        let mut de = ByteDeserializer::from_bytes(&bytes);
        for v in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert_eq!(range.decode(&mut de).unwrap(), v);
        }
    }

    #[test]
    fn test_single_value_interval_costs_nothing() {
        let range = ValueRange::new(7u8, 7);
        assert_eq!(range.bits(), 0);

        let mut ser = ByteSerializer::new_vec();
        range.encode(&mut ser, 7).unwrap();
        let bytes = ser.into_bytes().unwrap();
        assert!(bytes.is_empty());

        let mut de = ByteDeserializer::from_bytes(&bytes);
        assert_eq!(range.decode(&mut de).unwrap(), 7);
    }

    #[test]
    fn test_encode_rejects_outside_interval() {
        let range = ValueRange::new(0u8, 10);
        let mut ser = ByteSerializer::new_vec();
        let err = range.encode(&mut ser, 11).unwrap_err();
        match err {
            Error::OutOfRange { value, lo, hi } => {
                assert_eq!(value, 11);
                assert_eq!(lo, 0);
                assert_eq!(hi, 10);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_pattern_past_span() {
        // Span 2 needs 2 bits, which leaves the pattern 0b11 unused.
        let range = ValueRange::new(0u8, 2);
        assert_eq!(range.bits(), 2);

        let mut ser = ByteSerializer::new_vec();
        ser.bits(2, 0b11).unwrap();
        let bytes = ser.into_bytes().unwrap();

        let mut de = ByteDeserializer::from_bytes(&bytes);
        assert!(matches!(
            range.decode(&mut de),
            Err(Error::OutOfRange { value: 3, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "inverted range bounds")]
    fn test_inverted_bounds_panic() {
        let _ = ValueRange::new(5u32, 4);
    }

    #[test]
    fn test_value_shape_dispatch() {
        let range = ValueRange::new(0u32, 100);
        assert!(<ValueRange<u32> as Extension>::supports(CallShape::Value));
        assert!(!<ValueRange<u32> as Extension>::supports(CallShape::Object));
        assert!(!<ValueRange<u32> as Extension>::supports(
            CallShape::Closure
        ));

        let mut ser = ByteSerializer::new_vec();
        ser.ext_value(&42u32, range).unwrap();
        let bytes = ser.into_bytes().unwrap();
        assert_eq!(bytes.len(), 1); // 7 bits, padded to one byte

        let mut de = ByteDeserializer::from_bytes(&bytes);
        assert_eq!(de.ext_value::<u32, _>(range).unwrap(), 42);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_offset_maps_are_inverse(a in any::<i64>(), b in any::<i64>()) {
            let lo = a.min(b);
            let v = a.max(b);
            let offset = v.offset_from(lo);
            prop_assert_eq!(<i64 as RangeValue>::from_offset(lo, offset), v);
            prop_assert_eq!(lo.offset_from(lo), 0);
        }
    }
}
