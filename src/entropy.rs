//! Dictionary coding of frequently-seen values.
//!
//! Both endpoints agree ahead of time on an ordered candidate set. Each
//! value then costs a small index: its one-based position when it appears
//! in the set, or the reserved index zero followed by the regular encoding
//! when it does not. With `N` candidates the index spans `[0, N]`, which
//! [`ValueRange`] codes in `ceil(log2(N + 1))` bits, so a hit against
//! seven known u64 timestamps costs 3 bits instead of 64.
//!
//! The index is only as good as the agreement: both endpoints must hold
//! the same candidates in the same traversal order.

use bitstream_io::{BitRead, BitWrite};

use crate::candidates::CandidateSet;
use crate::engine::{Deserializer, Serializer};
use crate::error::Result;
use crate::ext::{CallShape, DeserializeExt, Extension, SerializeExt};
use crate::range::ValueRange;

/// One-based position of `value` among `candidates`, or zero on a miss.
///
/// Duplicates resolve to the first match, so later copies are dead weight
/// in the index space.
pub fn entropy_index<C>(value: &C::Value, candidates: &C) -> usize
where
    C: CandidateSet + ?Sized,
    C::Value: PartialEq,
{
    let mut index = 1;
    for candidate in candidates.iter() {
        if candidate == value {
            return index;
        }
        index += 1;
    }
    0
}

/// Extension that spends a small index on values drawn from a shared
/// candidate set and defers to the fallback codec for everything else.
///
/// The set is borrowed for the duration of the call, so one set built at
/// startup can serve every field that shares its distribution.
pub struct Entropy<'a, C: ?Sized> {
    values: &'a C,
}

impl<'a, C: CandidateSet + ?Sized> Entropy<'a, C> {
    /// Wrap a borrowed candidate set.
    ///
    /// The set must be non-empty by the time the extension runs; an empty
    /// set has no index space to spend.
    pub const fn new(values: &'a C) -> Self {
        Self { values }
    }
}

impl<C: ?Sized> Clone for Entropy<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for Entropy<'_, C> {}

// The index wraps whatever codec handles the miss, so every call shape
// works: native values, Encode/Decode objects, and custom closures.
impl<C: ?Sized> Extension for Entropy<'_, C> {
    fn supports(_shape: CallShape) -> bool {
        true
    }
}

impl<T, C> SerializeExt<T> for Entropy<'_, C>
where
    T: PartialEq,
    C: CandidateSet<Value = T> + ?Sized,
{
    fn serialize<W, F>(&self, ser: &mut Serializer<W>, value: &T, fallback: F) -> Result<()>
    where
        W: BitWrite,
        F: FnOnce(&mut Serializer<W>, &T) -> Result<()>,
    {
        debug_assert!(
            !self.values.is_empty(),
            "entropy candidate set must be non-empty"
        );
        let index = entropy_index(value, self.values);
        ValueRange::new(0, self.values.len()).encode(ser, index)?;
        if index == 0 {
            fallback(ser, value)?;
        }
        Ok(())
    }
}

impl<T, C> DeserializeExt<T> for Entropy<'_, C>
where
    T: Clone,
    C: CandidateSet<Value = T> + ?Sized,
{
    fn deserialize<R, F>(&self, de: &mut Deserializer<R>, fallback: F) -> Result<T>
    where
        R: BitRead,
        F: FnOnce(&mut Deserializer<R>) -> Result<T>,
    {
        debug_assert!(
            !self.values.is_empty(),
            "entropy candidate set must be non-empty"
        );
        let index = ValueRange::new(0, self.values.len()).decode(de)?;
        if index > 0 {
            let hit = self
                .values
                .nth(index - 1)
                .expect("bounded index stays within the candidate set");
            Ok(hit.clone())
        } else {
            fallback(de)
        }
    }
}
