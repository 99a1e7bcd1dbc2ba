//! Extension dispatch contract.
//!
//! Extensions customize how a single value travels through the engine. A
//! call site hands the engine a value, an extension, and (directly or by
//! default) a fallback routine; the extension decides what actually reaches
//! the bit stream and when the fallback runs.
//!
//! Call sites come in three shapes, and not every extension can serve every
//! shape, so each extension carries a capability declaration ([`Extension`])
//! that the engine checks before dispatching.

use bitstream_io::{BitRead, BitWrite};

use crate::engine::{Deserializer, Serializer};
use crate::error::Result;

/// The shape of the call site driving an extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallShape {
    /// A bare fixed-width value; the engine supplies its native codec as
    /// the fallback.
    Value,
    /// A composite object; the engine supplies the object's own
    /// encode/decode implementation as the fallback.
    Object,
    /// A caller-supplied fallback closure.
    Closure,
}

/// Capability declaration consumed by the engine before dispatch.
pub trait Extension {
    /// Whether call sites of the given shape may drive this extension.
    fn supports(shape: CallShape) -> bool;
}

/// Encode-side extension hook.
pub trait SerializeExt<T>: Extension {
    /// Serialize `value`, delegating to `fallback` for its full
    /// representation if and when the extension needs one.
    ///
    /// The fallback reads the value through a shared borrow; extensions
    /// invoke it at most once.
    fn serialize<W, F>(&self, ser: &mut Serializer<W>, value: &T, fallback: F) -> Result<()>
    where
        W: BitWrite,
        F: FnOnce(&mut Serializer<W>, &T) -> Result<()>;
}

/// Decode-side extension hook.
pub trait DeserializeExt<T>: Extension {
    /// Deserialize a value, delegating to `fallback` to reconstruct the
    /// full representation if and when the extension needs it.
    ///
    /// The fallback produces the value; extensions invoke it at most once.
    fn deserialize<R, F>(&self, de: &mut Deserializer<R>, fallback: F) -> Result<T>
    where
        R: BitRead,
        F: FnOnce(&mut Deserializer<R>) -> Result<T>;
}
