//! `luac -l` style listing of a decoded chunk.
//!
//! Instructions are shown as raw words; decoding opcodes is left to the
//! execution engine.

use std::fmt;

use crate::prototype::Prototype;
use crate::string::LuaString;

/// Displayable listing of a prototype tree
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    root: &'a Prototype,
    full: bool,
}

impl<'a> Listing<'a> {
    /// List function headers and instructions
    pub fn new(root: &'a Prototype) -> Self {
        Self { root, full: false }
    }

    /// Also list constants, locals and upvalues
    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    fn write_proto(
        &self,
        f: &mut fmt::Formatter<'_>,
        proto: &Prototype,
        inherited: &LuaString,
        is_main: bool,
    ) -> fmt::Result {
        // Nested functions usually leave the source empty and share the parent's
        let source = if proto.source.is_empty() {
            inherited
        } else {
            &proto.source
        };

        writeln!(
            f,
            "\n{} <{}:{},{}> ({} instruction{})",
            if is_main { "main" } else { "function" },
            display_source(source),
            proto.line_defined,
            proto.last_line_defined,
            proto.code.len(),
            plural(proto.code.len()),
        )?;
        writeln!(
            f,
            "{}{} param{}, {} slot{}, {} upvalue{}, {} local{}, {} constant{}, {} function{}",
            proto.num_params,
            if proto.accepts_varargs() { "+" } else { "" },
            plural(proto.num_params as usize),
            proto.max_stack_size,
            plural(proto.max_stack_size as usize),
            proto.upvalues.len(),
            plural(proto.upvalues.len()),
            proto.loc_vars.len(),
            plural(proto.loc_vars.len()),
            proto.constants.len(),
            plural(proto.constants.len()),
            proto.protos.len(),
            plural(proto.protos.len()),
        )?;

        for (pc, word) in proto.code.iter().enumerate() {
            match proto.line_at(pc) {
                Some(line) => writeln!(f, "\t{}\t[{line}]\t{word:#010x}", pc + 1)?,
                None => writeln!(f, "\t{}\t[-]\t{word:#010x}", pc + 1)?,
            }
        }

        if self.full {
            writeln!(f, "constants ({}):", proto.constants.len())?;
            for (i, constant) in proto.constants.iter().enumerate() {
                writeln!(f, "\t{i}\t{}\t{constant}", constant.type_name())?;
            }
            writeln!(f, "locals ({}):", proto.loc_vars.len())?;
            for (i, var) in proto.loc_vars.iter().enumerate() {
                writeln!(
                    f,
                    "\t{i}\t{}\t{}\t{}",
                    var.name,
                    u64::from(var.start_pc) + 1,
                    u64::from(var.end_pc) + 1
                )?;
            }
            writeln!(f, "upvalues ({}):", proto.upvalues.len())?;
            for (i, upvalue) in proto.upvalues.iter().enumerate() {
                let name = proto
                    .upvalue_name(i)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string());
                writeln!(f, "\t{i}\t{name}\t{}\t{}", upvalue.in_stack, upvalue.index)?;
            }
        }

        for child in &proto.protos {
            self.write_proto(f, child, source, false)?;
        }
        Ok(())
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_proto(f, self.root, &self.root.source, true)
    }
}

/// Chunk names starting with `@` or `=` are file names or literal labels;
/// anything else was loaded from a string.
fn display_source(source: &LuaString) -> String {
    match source.as_bytes().first() {
        Some(b'@' | b'=') => String::from_utf8_lossy(&source.as_bytes()[1..]).into_owned(),
        Some(0x1b) => "(bstring)".to_string(),
        Some(_) => "(string)".to_string(),
        None => "?".to_string(),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
