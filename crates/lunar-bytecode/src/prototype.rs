//! Function prototypes and the recursive prototype decoder

use serde::Serialize;

use crate::constant::Constant;
use crate::cursor::Cursor;
use crate::error::{Limit, Result, UndumpError};
use crate::string::LuaString;

/// Smallest possible encoding of a prototype: an empty source, the scalar
/// fields and seven zero counts.
const MIN_PROTOTYPE_SIZE: usize = 1 + 4 + 4 + 3 + 7 * 4;

/// Where a closure finds one of its upvalues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Upvalue {
    /// 1 if captured from the enclosing function's registers, 0 if taken
    /// from the enclosing function's own upvalues
    pub in_stack: u8,
    /// Register or upvalue index in the enclosing function
    pub index: u8,
}

impl Upvalue {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            in_stack: cursor.read_byte()?,
            index: cursor.read_byte()?,
        })
    }
}

/// Local variable debug entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocVar {
    /// Variable name
    pub name: LuaString,
    /// First instruction where the variable is active
    pub start_pc: u32,
    /// First instruction where the variable is dead
    pub end_pc: u32,
}

impl LocVar {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            name: cursor.read_string()?,
            start_pc: cursor.read_u32()?,
            end_pc: cursor.read_u32()?,
        })
    }

    /// Check if the variable is in scope at `pc`
    #[inline]
    pub fn is_active_at(&self, pc: u32) -> bool {
        self.start_pc <= pc && pc < self.end_pc
    }
}

/// A compiled function.
///
/// The main chunk is itself a prototype; nested functions are owned by
/// their parent through [`protos`](Prototype::protos), so a decoded chunk
/// is a plain tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Prototype {
    /// Source name (empty when stripped or inherited from the parent)
    pub source: LuaString,
    /// Line where the function definition starts (0 for the main chunk)
    pub line_defined: i32,
    /// Line where the function definition ends
    pub last_line_defined: i32,
    /// Number of fixed parameters
    pub num_params: u8,
    /// 1 if the function is variadic
    pub is_vararg: u8,
    /// Number of registers the function needs
    pub max_stack_size: u8,
    /// Instruction words
    pub code: Vec<u32>,
    /// Constant pool
    pub constants: Vec<Constant>,
    /// Upvalue descriptors
    pub upvalues: Vec<Upvalue>,
    /// Nested functions
    pub protos: Vec<Prototype>,
    /// Source line of each instruction
    pub line_info: Vec<u32>,
    /// Local variable debug info
    pub loc_vars: Vec<LocVar>,
    /// Upvalue names, parallel to `upvalues`
    pub upvalue_names: Vec<LuaString>,
}

impl Prototype {
    /// Decode one prototype and, recursively, all of its nested prototypes.
    ///
    /// `depth` is the nesting level of the prototype being read; the main
    /// function is depth 0.
    pub fn read(cursor: &mut Cursor<'_>, depth: u32) -> Result<Self> {
        let max_depth = cursor.limits().max_depth;
        if depth > max_depth {
            return Err(UndumpError::LimitExceeded {
                limit: Limit::NestingDepth,
                value: u64::from(depth),
                max: u64::from(max_depth),
            });
        }
        tracing::trace!(depth, offset = cursor.position(), "reading prototype");

        let source = cursor.read_string()?;
        let line_defined = cursor.read_u32()? as i32;
        let last_line_defined = cursor.read_u32()? as i32;
        let num_params = cursor.read_byte()?;
        let is_vararg = cursor.read_byte()?;
        let max_stack_size = cursor.read_byte()?;

        let code = cursor.read_vec(4, Cursor::read_u32)?;
        let constants = cursor.read_vec(1, Constant::read)?;
        let upvalues = cursor.read_vec(2, Upvalue::read)?;
        let protos = cursor.read_vec(MIN_PROTOTYPE_SIZE, |c| Self::read(c, depth + 1))?;
        let line_info = cursor.read_vec(4, Cursor::read_u32)?;
        let loc_vars = cursor.read_vec(9, LocVar::read)?;
        let upvalue_names = cursor.read_vec(1, Cursor::read_string)?;

        Ok(Self {
            source,
            line_defined,
            last_line_defined,
            num_params,
            is_vararg,
            max_stack_size,
            code,
            constants,
            upvalues,
            protos,
            line_info,
            loc_vars,
            upvalue_names,
        })
    }

    /// Check if the function takes variable arguments
    #[inline]
    pub fn accepts_varargs(&self) -> bool {
        self.is_vararg != 0
    }

    /// Source line of the instruction at `pc`, if line info was kept
    pub fn line_at(&self, pc: usize) -> Option<u32> {
        self.line_info.get(pc).copied()
    }

    /// Name of upvalue `index`, if debug info was kept
    pub fn upvalue_name(&self, index: usize) -> Option<&LuaString> {
        self.upvalue_names.get(index)
    }

    /// Names of the locals in scope at `pc`, in declaration order
    pub fn locals_at(&self, pc: u32) -> impl Iterator<Item = &LuaString> {
        self.loc_vars
            .iter()
            .filter(move |var| var.is_active_at(pc))
            .map(|var| &var.name)
    }

    /// Iterate over this prototype and every nested prototype, pre-order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Number of prototypes in this subtree, including `self`
    pub fn function_count(&self) -> usize {
        self.descendants().count()
    }

    /// Deepest nesting level below this prototype (0 if it has no children)
    pub fn max_depth(&self) -> usize {
        // Explicit stack: the tree may be as deep as the decode limit allows
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((proto, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(proto.protos.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

/// Pre-order iterator over a prototype tree
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Prototype>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Prototype;

    fn next(&mut self) -> Option<Self::Item> {
        let proto = self.stack.pop()?;
        self.stack.extend(proto.protos.iter().rev());
        Some(proto)
    }
}
