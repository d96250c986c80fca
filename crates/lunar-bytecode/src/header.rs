//! Binary chunk header validation

use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::{HeaderField, Result, UndumpError};

/// Expected values of every fixed header field.
///
/// A chunk is accepted only if its preamble matches the format exactly: the
/// size fields describe the producing platform, and the sample integer and
/// float double as byte-order and float-representation checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkFormat {
    /// Leading signature bytes
    pub signature: [u8; 4],
    /// Format version (`0x54` for 5.4)
    pub version: u8,
    /// Format subtype (0 is the official format)
    pub format: u8,
    /// Sentinel that catches text-mode transfer mangling
    pub sentinel: [u8; 6],
    /// Size of a C `int`
    pub int_size: u8,
    /// Size of a C `size_t`
    pub size_t_size: u8,
    /// Size of an instruction word
    pub instruction_size: u8,
    /// Size of a `lua_Integer`
    pub integer_size: u8,
    /// Size of a `lua_Number`
    pub number_size: u8,
    /// Sample integer
    pub sample_integer: i64,
    /// Sample float
    pub sample_number: f64,
}

impl ChunkFormat {
    /// Lua 5.4 chunks from a 64-bit little-endian producer
    pub const LUA_54: ChunkFormat = ChunkFormat {
        signature: *b"\x1bLua",
        version: 0x54,
        format: 0,
        sentinel: *b"\x19\x93\r\n\x1a\n",
        int_size: 4,
        size_t_size: 8,
        instruction_size: 4,
        integer_size: 8,
        number_size: 8,
        sample_integer: 0x5678,
        sample_number: 370.5,
    };

    /// Total header length in bytes, including the upvalue count
    pub const ENCODED_LEN: usize = 4 + 1 + 1 + 6 + 5 + 8 + 8 + 1;
}

impl Default for ChunkFormat {
    fn default() -> Self {
        Self::LUA_54
    }
}

/// Header facts that vary between accepted chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Format version byte
    pub version: u8,
    /// Format subtype byte
    pub format: u8,
    /// Number of upvalues of the main function
    pub main_upvalues: u8,
}

fn check_field<T: PartialEq>(found: T, expected: T, field: HeaderField) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(UndumpError::HeaderMismatch { field })
    }
}

/// Consume and validate the chunk preamble.
///
/// Fails on the first field that differs from `expected`; nothing after
/// that field is read.
pub fn check_header(cursor: &mut Cursor<'_>, expected: &ChunkFormat) -> Result<Header> {
    check_field(
        cursor.read_bytes(4)?.as_slice(),
        &expected.signature[..],
        HeaderField::Signature,
    )?;
    let version = cursor.read_byte()?;
    check_field(version, expected.version, HeaderField::Version)?;
    let format = cursor.read_byte()?;
    check_field(format, expected.format, HeaderField::Format)?;
    check_field(
        cursor.read_bytes(6)?.as_slice(),
        &expected.sentinel[..],
        HeaderField::Sentinel,
    )?;

    check_field(cursor.read_byte()?, expected.int_size, HeaderField::IntSize)?;
    check_field(cursor.read_byte()?, expected.size_t_size, HeaderField::SizeTSize)?;
    check_field(
        cursor.read_byte()?,
        expected.instruction_size,
        HeaderField::InstructionSize,
    )?;
    check_field(cursor.read_byte()?, expected.integer_size, HeaderField::IntegerSize)?;
    check_field(cursor.read_byte()?, expected.number_size, HeaderField::NumberSize)?;

    check_field(
        cursor.read_i64()?,
        expected.sample_integer,
        HeaderField::SampleInteger,
    )?;
    // Compared bitwise: the sample checks representation, not value
    check_field(
        cursor.read_f64()?.to_bits(),
        expected.sample_number.to_bits(),
        HeaderField::SampleNumber,
    )?;

    let main_upvalues = cursor.read_byte()?;
    Ok(Header {
        version,
        format,
        main_upvalues,
    })
}
