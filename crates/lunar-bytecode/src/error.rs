//! Undump errors

use std::fmt;

use thiserror::Error;

/// Header field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    /// The 4-byte `\x1bLua` signature
    Signature,
    /// Format version byte
    Version,
    /// Format subtype byte
    Format,
    /// The 6-byte conversion sentinel
    Sentinel,
    /// Size of a C `int`
    IntSize,
    /// Size of a C `size_t`
    SizeTSize,
    /// Size of an instruction word
    InstructionSize,
    /// Size of a `lua_Integer`
    IntegerSize,
    /// Size of a `lua_Number`
    NumberSize,
    /// Sample integer used to detect byte order
    SampleInteger,
    /// Sample float used to detect the float representation
    SampleNumber,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::Signature => "not a binary chunk",
            Self::Version => "version mismatch",
            Self::Format => "format mismatch",
            Self::Sentinel => "corrupted chunk",
            Self::IntSize => "int size mismatch",
            Self::SizeTSize => "size_t size mismatch",
            Self::InstructionSize => "instruction size mismatch",
            Self::IntegerSize => "integer size mismatch",
            Self::NumberSize => "number size mismatch",
            Self::SampleInteger => "endianness mismatch",
            Self::SampleNumber => "float format mismatch",
        };
        f.write_str(what)
    }
}

/// Which decode guard was tripped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Nesting depth of function prototypes
    NestingDepth,
    /// Element count of a length-prefixed array
    ArrayLength,
    /// Byte length of a long-form string
    StringLength,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NestingDepth => "nesting depth",
            Self::ArrayLength => "array length",
            Self::StringLength => "string length",
        })
    }
}

/// Errors that can occur while undumping a binary chunk
#[derive(Debug, Error)]
pub enum UndumpError {
    /// Input ended in the middle of a field
    #[error("truncated binary chunk: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        /// Offset of the read that failed
        offset: usize,
        /// Bytes the read required
        needed: u64,
        /// Bytes left in the input
        available: usize,
    },

    /// A header field differs from the expected chunk format
    #[error("bad binary chunk header: {field}")]
    HeaderMismatch {
        /// The offending field
        field: HeaderField,
    },

    /// Constant pool entry with an unrecognized type tag
    #[error("unknown constant type tag {tag:#04x} at offset {offset}")]
    UnknownConstantTag {
        /// The tag byte
        tag: u8,
        /// Offset of the tag byte
        offset: usize,
    },

    /// A decode limit was exceeded
    #[error("{limit} limit exceeded: {value} > {max}")]
    LimitExceeded {
        /// The limit that tripped
        limit: Limit,
        /// Value found in the chunk
        value: u64,
        /// Configured maximum
        max: u64,
    },

    /// IO error while reading the chunk
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for undump operations
pub type Result<T> = std::result::Result<T, UndumpError>;
