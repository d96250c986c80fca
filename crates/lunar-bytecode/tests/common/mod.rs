//! Chunk assembly helpers shared by the integration tests and benchmarks

#![allow(dead_code)]

use lunar_bytecode::constant::tag;
use lunar_bytecode::{ChunkFormat, Constant, Prototype};

/// A valid Lua 5.4 header
pub fn header(main_upvalues: u8) -> Vec<u8> {
    let format = ChunkFormat::LUA_54;
    let mut out = Vec::with_capacity(ChunkFormat::ENCODED_LEN);
    out.extend_from_slice(&format.signature);
    out.push(format.version);
    out.push(format.format);
    out.extend_from_slice(&format.sentinel);
    out.extend_from_slice(&[
        format.int_size,
        format.size_t_size,
        format.instruction_size,
        format.integer_size,
        format.number_size,
    ]);
    out.extend_from_slice(&format.sample_integer.to_le_bytes());
    out.extend_from_slice(&format.sample_number.to_le_bytes());
    out.push(main_upvalues);
    out
}

/// Header plus the encoding of `proto`
pub fn chunk(proto: &Prototype) -> Vec<u8> {
    let mut out = header(proto.upvalues.len() as u8);
    write_proto(&mut out, proto);
    out
}

pub fn write_count(out: &mut Vec<u8>, n: usize) {
    out.extend_from_slice(&(n as u32).to_le_bytes());
}

pub fn write_string(out: &mut Vec<u8>, s: &[u8]) {
    match s.len() {
        0 => out.push(0),
        n if n < 0xFF => out.push(n as u8),
        n => {
            out.push(0xFF);
            out.extend_from_slice(&(n as u64).to_le_bytes());
        }
    }
    out.extend_from_slice(s);
}

pub fn write_constant(out: &mut Vec<u8>, constant: &Constant) {
    match constant {
        Constant::Nil => out.push(tag::NIL),
        Constant::Bool(b) => out.extend_from_slice(&[tag::BOOLEAN, *b as u8]),
        Constant::Integer(i) => {
            out.push(tag::INTEGER);
            out.extend_from_slice(&i.to_le_bytes());
        }
        Constant::Float(n) => {
            out.push(tag::NUMBER);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Constant::String(s) => {
            out.push(if s.len() <= 40 { tag::SHORT_STRING } else { tag::LONG_STRING });
            write_string(out, s.as_bytes());
        }
    }
}

pub fn write_proto(out: &mut Vec<u8>, proto: &Prototype) {
    write_string(out, proto.source.as_bytes());
    out.extend_from_slice(&proto.line_defined.to_le_bytes());
    out.extend_from_slice(&proto.last_line_defined.to_le_bytes());
    out.extend_from_slice(&[proto.num_params, proto.is_vararg, proto.max_stack_size]);

    write_count(out, proto.code.len());
    for word in &proto.code {
        out.extend_from_slice(&word.to_le_bytes());
    }
    write_count(out, proto.constants.len());
    for constant in &proto.constants {
        write_constant(out, constant);
    }
    write_count(out, proto.upvalues.len());
    for upvalue in &proto.upvalues {
        out.extend_from_slice(&[upvalue.in_stack, upvalue.index]);
    }
    write_count(out, proto.protos.len());
    for child in &proto.protos {
        write_proto(out, child);
    }
    write_count(out, proto.line_info.len());
    for line in &proto.line_info {
        out.extend_from_slice(&line.to_le_bytes());
    }
    write_count(out, proto.loc_vars.len());
    for var in &proto.loc_vars {
        write_string(out, var.name.as_bytes());
        out.extend_from_slice(&var.start_pc.to_le_bytes());
        out.extend_from_slice(&var.end_pc.to_le_bytes());
    }
    write_count(out, proto.upvalue_names.len());
    for name in &proto.upvalue_names {
        write_string(out, name.as_bytes());
    }
}

/// Main function with `width` children, each nesting `depth` levels deep
pub fn wide_tree(width: usize, depth: usize) -> Prototype {
    fn chain(depth: usize, line: i32) -> Prototype {
        Prototype {
            line_defined: line,
            last_line_defined: line + 1,
            code: vec![0x0100_0003; 8],
            line_info: vec![line as u32; 8],
            constants: vec![
                Constant::Integer(i64::from(line)),
                Constant::Float(0.25),
                Constant::String("inner".into()),
            ],
            protos: if depth == 0 {
                Vec::new()
            } else {
                vec![chain(depth - 1, line + 1)]
            },
            ..Prototype::default()
        }
    }
    Prototype {
        source: "@bench.lua".into(),
        is_vararg: 1,
        protos: (0..width).map(|i| chain(depth, i as i32 * 10)).collect(),
        ..Prototype::default()
    }
}
