//! # Dictionary Coding for Bit Streams
//!
//! *Known values cost a few bits; everything else costs what it always did.*
//!
//! ## Intuition First
//!
//! Imagine a nineteenth-century telegraph office. Phrases the customers send
//! all day long are printed in a codebook shared by both ends, and the
//! operator taps out a short number instead of the whole phrase. Anything
//! not in the book gets spelled out in full, prefixed by a marker that says
//! "this one is literal."
//!
//! Dictionary coding strikes the same bargain for serialization. If both
//! endpoints agree up front on a small ordered set of likely values, each
//! occurrence of one costs only its position in the set. The marker for
//! "not in the book" is index zero, after which the value is encoded the
//! way it would have been anyway.
//!
//! ## The Problem
//!
//! Fixed-width serialization spends the full width on every value, even
//! when a handful of values dominate the stream:
//!
//! - **General entropy coders** (Huffman, ANS): near-optimal rates, but
//!   they need per-symbol frequency tables and carry bit-level coder state.
//! - **Plain fixed-width fields**: zero setup, but a u64 timestamp that is
//!   almost always one of seven known constants still costs 64 bits each
//!   time it appears.
//!
//! Dictionary coding sits between the two: no frequency model, no coder
//! state, just an agreed list and a few bits of index.
//!
//! ## Historical Context
//!
//! ```text
//! 1838  Morse        Variable-length code tuned to letter frequency
//! 1845  Smith        The Secret Corresponding Vocabulary: phrases as numbers
//! 1948  Shannon      Entropy as the fundamental limit
//! 1952  Huffman      Optimal prefix codes from symbol frequencies
//! 1977  Ziv, Lempel  LZ77: dictionaries discovered on the fly
//! 1984  Welch        LZW puts dictionary coding in wide deployment
//! 1994  ITU-T        ASN.1 PER: bounded integers in minimal bits
//! 2016  Collet       zstd dictionary mode for small payloads
//! ```
//!
//! The common thread is that shared context is cheaper than repetition:
//! whatever both sides already know never has to cross the wire.
//!
//! ## Mathematical Formulation
//!
//! Given a candidate set $S = (s_1, \ldots, s_N)$ and a value $v$, the
//! coded index is
//!
//! ```text
//! index(v) = i   if s_i = v (smallest such i)
//!            0   otherwise
//! ```
//!
//! The index lives in $[0, N]$ and is written in $\lceil \log_2(N+1) \rceil$
//! bits. With hit probability $p$ and fallback width $F$ bits, the expected
//! cost per value is
//!
//! ```text
//! E[bits] = ceil(log2(N + 1)) + (1 - p) * F
//! ```
//!
//! which beats the plain encoding exactly when $p > \lceil \log_2(N+1)
//! \rceil / F$. Seven candidates for a u64 field need a 21% hit rate to
//! break even; past that, every hit saves 61 bits.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(N)$ scan per encoded value; decoding a hit is a single
//!   positional lookup, and a miss never touches the set at all.
//! - **Space**: zero allocations. The extension borrows the candidate set
//!   and carries no state of its own.
//!
//! ## Failure Modes
//!
//! 1. **Endpoint drift**: the same candidates in a different order decode
//!    into valid but wrong values, and nothing on the wire can detect it.
//! 2. **Low hit rates**: every miss pays the index on top of the full
//!    encoding, so a set nobody hits is pure overhead.
//! 3. **Bloated sets**: index width grows as $\lceil \log_2(N+1) \rceil$,
//!    so doubling the set adds one bit to every value, hit or miss.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **entropy**: the dictionary extension itself.
//! - **range**: the bounded-integer codec behind the index, usable on its
//!   own for any value confined to a closed interval.
//! - **engine**: bit-level serializer and deserializer with value, object,
//!   and closure extension entry points.
//! - **candidates**: the read-only view that lets slices, arrays, `Vec`,
//!   `VecDeque`, and `BTreeSet` all serve as candidate sets.
//!
//! ## References
//!
//! - Shannon, C. E. (1948). "A Mathematical Theory of Communication."
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Welch, T. A. (1984). "A Technique for High-Performance Data Compression."
//! - ITU-T (1994). "Recommendation X.691: ASN.1 Packed Encoding Rules (PER)."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidates;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod ext;
pub mod range;

pub use candidates::CandidateSet;
pub use engine::{
    ByteDeserializer, ByteSerializer, Decode, Deserializer, Encode, Packable, Serializer,
};
pub use entropy::{entropy_index, Entropy};
pub use error::{Error, Result};
pub use ext::{CallShape, DeserializeExt, Extension, SerializeExt};
pub use range::{bits_for, RangeValue, ValueRange};
