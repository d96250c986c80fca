//! Constant pool entries

use std::fmt;

use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::{Result, UndumpError};
use crate::string::LuaString;

/// Type tags of encoded constants
pub mod tag {
    /// `nil`
    pub const NIL: u8 = 0x00;
    /// Boolean, followed by one value byte
    pub const BOOLEAN: u8 = 0x01;
    /// Float, followed by a `lua_Number`
    pub const NUMBER: u8 = 0x03;
    /// Integer, followed by a `lua_Integer`
    pub const INTEGER: u8 = 0x13;
    /// Short string
    pub const SHORT_STRING: u8 = 0x04;
    /// Long string
    pub const LONG_STRING: u8 = 0x14;
}

/// A constant value in a prototype's constant pool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Constant {
    /// `nil`
    Nil,
    /// `true` or `false`
    Bool(bool),
    /// 64-bit integer
    Integer(i64),
    /// 64-bit float
    Float(f64),
    /// Byte string
    String(LuaString),
}

impl Constant {
    /// Decode one tagged constant
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let offset = cursor.position();
        let constant = match cursor.read_byte()? {
            tag::NIL => Self::Nil,
            tag::BOOLEAN => Self::Bool(cursor.read_byte()? != 0),
            tag::NUMBER => Self::Float(cursor.read_f64()?),
            tag::INTEGER => Self::Integer(cursor.read_i64()?),
            tag::SHORT_STRING | tag::LONG_STRING => Self::String(cursor.read_string()?),
            other => return Err(UndumpError::UnknownConstantTag { tag: other, offset }),
        };
        Ok(constant)
    }

    /// Check if this is nil
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Check if this is an integer or a float
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Check if this is a string
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Get as string if this is a string constant
    #[inline]
    pub fn as_string(&self) -> Option<&LuaString> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's type as Lua reports it
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            // Integral floats print with a trailing `.0`
            Self::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.1}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{:?}", s),
        }
    }
}
