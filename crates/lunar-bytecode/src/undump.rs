//! Chunk decoding entry points

use std::io::Read;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::header::{ChunkFormat, check_header};
use crate::limits::DecodeLimits;
use crate::prototype::Prototype;

/// Decode a binary chunk with the Lua 5.4 format and default limits.
///
/// Returns the main function; every other function of the chunk is nested
/// inside it.
pub fn undump(data: &[u8]) -> Result<Prototype> {
    Undumper::new().undump(data)
}

/// Configurable binary chunk decoder.
///
/// An `Undumper` holds no per-decode state, so one instance can decode any
/// number of chunks, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Undumper {
    format: ChunkFormat,
    limits: DecodeLimits,
}

impl Undumper {
    /// Create a decoder for Lua 5.4 chunks with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect a different header
    pub fn format(mut self, format: ChunkFormat) -> Self {
        self.format = format;
        self
    }

    /// Apply different decode limits
    pub fn limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Limits this decoder applies
    pub fn decode_limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Decode a complete chunk.
    ///
    /// Either the whole prototype tree is returned or the first error
    /// encountered; a partially decoded tree is never exposed.
    pub fn undump(&self, data: &[u8]) -> Result<Prototype> {
        let mut cursor = Cursor::with_limits(data, self.limits);
        let result = self.undump_from(&mut cursor);
        match &result {
            Ok(proto) => {
                if cursor.remaining() > 0 {
                    tracing::debug!(
                        trailing = cursor.remaining(),
                        "ignoring bytes after the main function"
                    );
                }
                tracing::debug!(
                    bytes = cursor.position(),
                    functions = proto.function_count(),
                    "chunk decoded"
                );
            }
            Err(err) => tracing::debug!(offset = cursor.position(), %err, "chunk rejected"),
        }
        result
    }

    /// Read `reader` to the end and decode the bytes as a chunk
    pub fn read_from<R: Read>(&self, reader: &mut R) -> Result<Prototype> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.undump(&bytes)
    }

    fn undump_from(&self, cursor: &mut Cursor<'_>) -> Result<Prototype> {
        let header = check_header(cursor, &self.format)?;
        tracing::debug!(
            version = header.version,
            main_upvalues = header.main_upvalues,
            "header accepted"
        );
        Prototype::read(cursor, 0)
    }
}
