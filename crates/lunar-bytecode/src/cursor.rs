//! Forward-only reader over a chunk buffer

use crate::error::{Limit, Result, UndumpError};
use crate::limits::DecodeLimits;
use crate::string::LuaString;

/// Size byte announcing a long-form string with an 8-byte length
pub const LONG_STRING_MARKER: u8 = 0xFF;

/// Sequential reader over a byte buffer.
///
/// All chunk decoding goes through a `Cursor`. There is no way to seek or
/// rewind; every read either consumes exactly the bytes it needs or fails
/// with [`UndumpError::Truncated`] without consuming anything.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    limits: DecodeLimits,
}

impl<'a> Cursor<'a> {
    /// Create a cursor with default limits
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limits(data, DecodeLimits::default())
    }

    /// Create a cursor enforcing `limits` on counts and string sizes
    pub fn with_limits(data: &'a [u8], limits: DecodeLimits) -> Self {
        Self {
            data,
            pos: 0,
            limits,
        }
    }

    /// Offset of the next unread byte
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Limits this cursor enforces
    #[inline]
    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    fn truncated(&self, needed: u64) -> UndumpError {
        UndumpError::Truncated {
            offset: self.pos,
            needed,
            available: self.remaining(),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.truncated(n as u64));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    /// Read one byte
    pub fn read_byte(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read an owned copy of the next `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.take(n).map(<[u8]>::to_vec)
    }

    /// Read a little-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a little-endian `u64`
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Read a little-endian two's-complement `i64`
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_array().map(i64::from_le_bytes)
    }

    /// Read a little-endian IEEE-754 binary64
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_array().map(f64::from_le_bytes)
    }

    /// Read a length-prefixed string.
    ///
    /// A zero size byte is the empty string. [`LONG_STRING_MARKER`] is
    /// followed by a little-endian `u64` length. Any other size byte is the
    /// content length itself.
    pub fn read_string(&mut self) -> Result<LuaString> {
        let size = match self.read_byte()? {
            0 => return Ok(LuaString::default()),
            LONG_STRING_MARKER => self.read_u64()?,
            b => u64::from(b),
        };
        if size > self.limits.max_string_len {
            return Err(UndumpError::LimitExceeded {
                limit: Limit::StringLength,
                value: size,
                max: self.limits.max_string_len,
            });
        }
        if size > self.remaining() as u64 {
            return Err(self.truncated(size));
        }
        self.take(size as usize).map(LuaString::from)
    }

    /// Read the 4-byte element count that prefixes every array field
    pub fn read_count(&mut self) -> Result<usize> {
        let count = self.read_u32()?;
        if count > self.limits.max_array_len {
            return Err(UndumpError::LimitExceeded {
                limit: Limit::ArrayLength,
                value: u64::from(count),
                max: u64::from(self.limits.max_array_len),
            });
        }
        Ok(count as usize)
    }

    /// Read a counted array, decoding each element with `read_elem`.
    ///
    /// `min_elem_size` is the smallest encoding of one element; the initial
    /// allocation never exceeds what the remaining input could hold.
    pub fn read_vec<T>(
        &mut self,
        min_elem_size: usize,
        mut read_elem: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let count = self.read_count()?;
        let capacity = count.min(self.remaining() / min_elem_size.max(1));
        let mut items = Vec::with_capacity(capacity);
        for _ in 0..count {
            items.push(read_elem(self)?);
        }
        Ok(items)
    }
}
