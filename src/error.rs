//! Error types shared by the text and binary codecs.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of failures any ISLA operation can produce.
///
/// Decoders and encoders return these immediately on failure — no partial
/// [`crate::TextValue`]/[`crate::BinValue`] is ever handed back. The
/// `get*`/`parse*` accessor family swallows [`Error::TypeMismatch`],
/// [`Error::ListIndexOutOfRange`], and [`Error::MapKeyNotFound`] into
/// fallbacks instead of propagating them; see the accessor docs on
/// [`crate::TextValue`]/[`crate::BinValue`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The file header did not match the expected magic bytes/string.
    #[error("bad header: expected {expected:?}, got {got:?}")]
    BadHeader { expected: String, got: String },

    /// A text line opened more levels of indentation than the current
    /// scope allows.
    #[error("line {line}: nesting too deep (expected at most {expected_level} tabs)")]
    NestingTooDeep { expected_level: usize, line: usize },

    /// A list scope contained a line that wasn't a `-` item.
    #[error("line {line}: expected a list item starting with '-'")]
    ExpectedListItem { line: usize },

    /// A map line's `:` operator was followed by trailing, non-empty text.
    #[error("line {line}: unexpected text after ':': {trailing:?}")]
    UnexpectedAfterColon { line: usize, trailing: String },

    /// A multi-line value (`"..."`) was never closed before EOF.
    #[error("line {opening_line}: unterminated multi-line value")]
    UnterminatedMultiLineValue { opening_line: usize },

    /// Input ended while a scope was still expected to continue.
    #[error("line {line}: expected scope content before end of input")]
    ExpectedScopeBeforeEof { line: usize },

    /// A binary value header carried an unrecognized 4-bit type tag.
    #[error("invalid binary type tag: 0x{tag:X}")]
    InvalidType { tag: u8 },

    /// A binary read ran past the end of the input buffer.
    #[error("decode out of bounds reading {what}: needed {needed} bytes, {remaining} remaining")]
    DecodeOutOfBounds {
        what: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A nesting depth guard tripped while decoding (defends against stack
    /// exhaustion on adversarial input). Applies to both codecs.
    #[error("nesting too deep (max {max})")]
    NestingDepthExceeded { max: usize },

    /// A leaf or map-key length exceeded what the binary format can encode.
    #[error("{what} too long to encode: length {len} exceeds max {max}")]
    EncodeTooLong {
        what: &'static str,
        len: usize,
        max: u64,
    },

    /// Encoding was asked to serialize a value whose top-level tag can't be
    /// the root of a document (a bare leaf, or `none`).
    #[error("value not encodable at top level: {reason}")]
    NotEncodable { reason: &'static str },

    /// An accessor was asked for a payload the value's tag doesn't carry.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A list index accessor was out of range.
    #[error("list index {index} out of range (length {length})")]
    ListIndexOutOfRange { index: usize, length: usize },

    /// A map key accessor found no such key.
    #[error("map key not found: {key:?}")]
    MapKeyNotFound { key: String },
}
