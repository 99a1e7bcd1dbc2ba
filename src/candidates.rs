//! Ordered candidate containers.
//!
//! Dictionary coding needs almost nothing from the container holding the
//! candidate values: a size query and forward traversal in a stable order.
//! [`CandidateSet`] captures exactly that, so callers can keep candidates in
//! whatever ordered collection suits them — a slice, a `Vec`, a `VecDeque`,
//! even a `BTreeSet`.

use std::collections::{BTreeSet, VecDeque};

/// Read-only view of an ordered candidate sequence.
///
/// # Contract
///
/// `iter` must yield exactly `len` items, in an order that is stable for as
/// long as the container is unchanged. That order defines the index mapping
/// and therefore the wire format: encoder and decoder must observe the same
/// sequence. A container whose `len` disagrees with its iteration violates
/// this contract and will panic inside the codec.
pub trait CandidateSet {
    /// Element type held by the container.
    type Value;

    /// Borrowing iterator over the candidates, in container order.
    type Iter<'a>: Iterator<Item = &'a Self::Value>
    where
        Self: 'a;

    /// Number of candidates.
    fn len(&self) -> usize;

    /// Iterate the candidates in order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Whether the container holds no candidates.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidate at zero-based `position`, found by forward traversal.
    ///
    /// Random-access containers may override this with a direct fetch.
    fn nth(&self, position: usize) -> Option<&Self::Value> {
        self.iter().nth(position)
    }
}

impl<T> CandidateSet for [T] {
    type Value = T;
    type Iter<'a> = std::slice::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        <[T]>::iter(self)
    }

    fn nth(&self, position: usize) -> Option<&T> {
        self.get(position)
    }
}

impl<T, const N: usize> CandidateSet for [T; N] {
    type Value = T;
    type Iter<'a> = std::slice::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        N
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }

    fn nth(&self, position: usize) -> Option<&T> {
        self.as_slice().get(position)
    }
}

impl<T> CandidateSet for Vec<T> {
    type Value = T;
    type Iter<'a> = std::slice::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }

    fn nth(&self, position: usize) -> Option<&T> {
        self.as_slice().get(position)
    }
}

impl<T> CandidateSet for VecDeque<T> {
    type Value = T;
    type Iter<'a> = std::collections::vec_deque::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        VecDeque::iter(self)
    }
}

impl<T> CandidateSet for BTreeSet<T> {
    type Value = T;
    type Iter<'a> = std::collections::btree_set::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeSet::iter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_positions() {
        let set = [10u32, 20, 30];
        assert_eq!(CandidateSet::len(&set), 3);
        assert_eq!(set.nth(0), Some(&10));
        assert_eq!(set.nth(2), Some(&30));
        assert_eq!(set.nth(3), None);
    }

    #[test]
    fn test_deque_traversal_order() {
        let mut set = VecDeque::new();
        set.push_back(2u8);
        set.push_back(3);
        set.push_front(1);
        let seen: Vec<u8> = CandidateSet::iter(&set).copied().collect();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(set.nth(1), Some(&2));
    }

    #[test]
    fn test_btree_set_is_ordered() {
        let set: BTreeSet<i32> = [30, 10, 20].into_iter().collect();
        assert_eq!(set.nth(0), Some(&10));
        assert_eq!(set.nth(2), Some(&30));
    }

    #[test]
    fn test_empty_containers() {
        let empty: Vec<u32> = Vec::new();
        assert!(CandidateSet::is_empty(&empty));
        assert_eq!(empty.nth(0), None);
    }
}
