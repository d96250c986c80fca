//! # Lunar Bytecode
//!
//! Decoder for precompiled Lua 5.4 binary chunks (the output of `luac` and
//! `string.dump`).
//!
//! A chunk is a fixed header followed by the main function's prototype,
//! which recursively contains every nested function. Decoding is a single
//! forward pass over the input that yields the whole [`Prototype`] tree or
//! the first [`UndumpError`].
//!
//! ## Design Principles
//!
//! - **Exact**: the header must match the expected [`ChunkFormat`] byte for byte
//! - **Defensive**: counts, sizes and nesting are bounded by [`DecodeLimits`]
//! - **Owned**: the decoded tree borrows nothing from the input buffer
//!
//! ```ignore
//! let proto = lunar_bytecode::undump(&std::fs::read("luac.out")?)?;
//! println!("{}", lunar_bytecode::Listing::new(&proto));
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constant;
pub mod cursor;
pub mod error;
pub mod header;
pub mod limits;
pub mod listing;
pub mod prototype;
pub mod string;
pub mod undump;

pub use constant::Constant;
pub use cursor::Cursor;
pub use error::{HeaderField, Limit, Result, UndumpError};
pub use header::{ChunkFormat, Header, check_header};
pub use limits::DecodeLimits;
pub use listing::Listing;
pub use prototype::{Descendants, LocVar, Prototype, Upvalue};
pub use string::LuaString;
pub use undump::{Undumper, undump};
