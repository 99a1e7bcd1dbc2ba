//! Bit-level serialization engine.
//!
//! [`Serializer`] and [`Deserializer`] drive a `bitstream_io` bit writer or
//! reader and host the extension entry points. Values are packed back to
//! back with no padding; a byte boundary exists only where the caller asks
//! for one (or when a finished buffer is aligned for return).

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::Result;
use crate::ext::{CallShape, DeserializeExt, SerializeExt};

/// Types with an engine-native fixed-width bit pattern.
///
/// `Packable` values are what the engine can write without any user code,
/// which makes them eligible for value-shape extension call sites.
pub trait Packable: Copy {
    /// Wire width in bits.
    const BITS: u32;

    /// The value's bit pattern, right-aligned in a `u64`.
    fn to_raw(self) -> u64;

    /// Rebuild the value from a right-aligned bit pattern.
    fn from_raw(raw: u64) -> Self;
}

macro_rules! packable_unsigned {
    ($($t:ty => $bits:expr),* $(,)?) => {$(
        impl Packable for $t {
            const BITS: u32 = $bits;

            #[inline]
            fn to_raw(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_raw(raw: u64) -> Self {
                raw as $t
            }
        }
    )*};
}

packable_unsigned!(u8 => 8, u16 => 16, u32 => 32, u64 => 64);

macro_rules! packable_signed {
    ($($t:ty as $u:ty => $bits:expr),* $(,)?) => {$(
        impl Packable for $t {
            const BITS: u32 = $bits;

            #[inline]
            fn to_raw(self) -> u64 {
                self as $u as u64
            }

            #[inline]
            fn from_raw(raw: u64) -> Self {
                raw as $u as $t
            }
        }
    )*};
}

packable_signed!(i8 as u8 => 8, i16 as u16 => 16, i32 as u32 => 32, i64 as u64 => 64);

impl Packable for bool {
    const BITS: u32 = 1;

    #[inline]
    fn to_raw(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        raw & 1 == 1
    }
}

impl Packable for f32 {
    const BITS: u32 = 32;

    #[inline]
    fn to_raw(self) -> u64 {
        u64::from(self.to_bits())
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f32::from_bits(raw as u32)
    }
}

impl Packable for f64 {
    const BITS: u32 = 64;

    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f64::from_bits(raw)
    }
}

/// Composite types encoded field by field through the engine.
///
/// Implementing `Encode` (and [`Decode`]) makes a type eligible for
/// object-shape extension call sites.
pub trait Encode {
    /// Write this value through `ser`.
    fn encode<W: BitWrite>(&self, ser: &mut Serializer<W>) -> Result<()>;
}

/// Decode-side counterpart of [`Encode`].
pub trait Decode: Sized {
    /// Read a value from `de`.
    fn decode<R: BitRead>(de: &mut Deserializer<R>) -> Result<Self>;
}

/// Serializer over a bit writer.
pub struct Serializer<W: BitWrite> {
    writer: W,
}

impl<W: BitWrite> Serializer<W> {
    /// Create a serializer over an existing bit writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the low `count` bits of `raw`. Zero-count writes are no-ops.
    ///
    /// `raw` must fit in `count` bits; the underlying writer rejects excess
    /// bits as an I/O error.
    pub fn bits(&mut self, count: u32, raw: u64) -> Result<()> {
        debug_assert!(count <= 64, "bit count {count} exceeds u64 width");
        if count == 0 {
            return Ok(());
        }
        self.writer.write(count, raw)?;
        Ok(())
    }

    /// Write a native fixed-width value.
    pub fn value<T: Packable>(&mut self, value: T) -> Result<()> {
        self.bits(T::BITS, value.to_raw())
    }

    /// Write a composite value through its [`Encode`] implementation.
    pub fn object<T: Encode>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Value-shape extension call: the native fixed-width codec is the
    /// fallback.
    pub fn ext_value<T, E>(&mut self, value: &T, ext: E) -> Result<()>
    where
        T: Packable,
        E: SerializeExt<T>,
    {
        debug_assert!(
            E::supports(CallShape::Value),
            "extension does not support value call sites"
        );
        ext.serialize(self, value, |ser, v| ser.value(*v))
    }

    /// Object-shape extension call: the value's [`Encode`] implementation
    /// is the fallback.
    pub fn ext_object<T, E>(&mut self, value: &T, ext: E) -> Result<()>
    where
        T: Encode,
        E: SerializeExt<T>,
    {
        debug_assert!(
            E::supports(CallShape::Object),
            "extension does not support object call sites"
        );
        ext.serialize(self, value, |ser, v| v.encode(ser))
    }

    /// Closure-shape extension call with a caller-supplied fallback.
    pub fn ext_with<T, E, F>(&mut self, value: &T, ext: E, fallback: F) -> Result<()>
    where
        E: SerializeExt<T>,
        F: FnOnce(&mut Self, &T) -> Result<()>,
    {
        debug_assert!(
            E::supports(CallShape::Closure),
            "extension does not support closure call sites"
        );
        ext.serialize(self, value, fallback)
    }

    /// Pad forward to the next byte boundary with zero bits.
    pub fn byte_align(&mut self) -> Result<()> {
        self.writer.byte_align()?;
        Ok(())
    }

    /// Give back the underlying bit writer.
    ///
    /// Unaligned trailing bits are discarded by the writer; call
    /// [`Serializer::byte_align`] first to keep them.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Deserializer over a bit reader.
pub struct Deserializer<R: BitRead> {
    reader: R,
}

impl<R: BitRead> Deserializer<R> {
    /// Create a deserializer over an existing bit reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read `count` bits, right-aligned. Zero-count reads are no-ops.
    pub fn bits(&mut self, count: u32) -> Result<u64> {
        debug_assert!(count <= 64, "bit count {count} exceeds u64 width");
        if count == 0 {
            return Ok(0);
        }
        Ok(self.reader.read::<u64>(count)?)
    }

    /// Read a native fixed-width value.
    pub fn value<T: Packable>(&mut self) -> Result<T> {
        Ok(T::from_raw(self.bits(T::BITS)?))
    }

    /// Read a composite value through its [`Decode`] implementation.
    pub fn object<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Value-shape extension call: the native fixed-width codec is the
    /// fallback.
    pub fn ext_value<T, E>(&mut self, ext: E) -> Result<T>
    where
        T: Packable,
        E: DeserializeExt<T>,
    {
        debug_assert!(
            E::supports(CallShape::Value),
            "extension does not support value call sites"
        );
        ext.deserialize(self, |de| de.value())
    }

    /// Object-shape extension call: the value's [`Decode`] implementation
    /// is the fallback.
    pub fn ext_object<T, E>(&mut self, ext: E) -> Result<T>
    where
        T: Decode,
        E: DeserializeExt<T>,
    {
        debug_assert!(
            E::supports(CallShape::Object),
            "extension does not support object call sites"
        );
        ext.deserialize(self, |de| de.object())
    }

    /// Closure-shape extension call with a caller-supplied fallback.
    pub fn ext_with<T, E, F>(&mut self, ext: E, fallback: F) -> Result<T>
    where
        E: DeserializeExt<T>,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        debug_assert!(
            E::supports(CallShape::Closure),
            "extension does not support closure call sites"
        );
        ext.deserialize(self, fallback)
    }

    /// Skip forward to the next byte boundary.
    pub fn byte_align(&mut self) {
        self.reader.byte_align();
    }

    /// Give back the underlying bit reader.
    pub fn into_reader(self) -> R {
        self.reader
    }
}

/// Serializer packing MSB-first into an in-memory byte buffer.
pub type ByteSerializer = Serializer<BitWriter<Vec<u8>, BigEndian>>;

/// Deserializer reading MSB-first from a borrowed byte slice.
pub type ByteDeserializer<'a> = Deserializer<BitReader<&'a [u8], BigEndian>>;

impl ByteSerializer {
    /// Create a serializer over a fresh in-memory buffer.
    pub fn new_vec() -> Self {
        Serializer::new(BitWriter::endian(Vec::new(), BigEndian))
    }

    /// Align to a byte boundary and return the packed bytes.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        self.writer.byte_align()?;
        Ok(self.writer.into_writer())
    }
}

impl<'a> ByteDeserializer<'a> {
    /// Create a deserializer over a byte slice.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Deserializer::new(BitReader::endian(bytes, BigEndian))
    }
}
