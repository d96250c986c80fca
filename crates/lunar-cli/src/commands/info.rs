//! Info command - summarize a precompiled chunk.

use anyhow::{Context, Result};
use clap::Args;
use lunar_bytecode::{ChunkFormat, Cursor, Header, Prototype, check_header};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Args)]
pub struct InfoCommand {
    /// Chunk to inspect
    pub file: PathBuf,
}

impl InfoCommand {
    pub fn run(&self, config: &Config) -> Result<()> {
        let bytes = super::read_chunk(&self.file)?;
        let header = check_header(
            &mut Cursor::with_limits(&bytes, config.limits),
            &ChunkFormat::LUA_54,
        )
        .with_context(|| format!("failed to decode {}", self.file.display()))?;
        let proto = super::decode_chunk(&self.file, &bytes, config.limits)?;

        print!("{}", render(&self.file.display().to_string(), &header, &proto));
        Ok(())
    }
}

/// Summary text for one chunk
pub fn render(name: &str, header: &Header, proto: &Prototype) -> String {
    let instructions: usize = proto.descendants().map(|p| p.code.len()).sum();
    let constants: usize = proto.descendants().map(|p| p.constants.len()).sum();

    let mut out = String::new();
    let _ = writeln!(out, "file:          {name}");
    let _ = writeln!(
        out,
        "version:       Lua {}.{} (format {})",
        header.version >> 4,
        header.version & 0x0F,
        header.format
    );
    let _ = writeln!(out, "main upvalues: {}", header.main_upvalues);
    let _ = writeln!(out, "source:        {}", proto.source);
    let _ = writeln!(out, "functions:     {}", proto.function_count());
    let _ = writeln!(out, "instructions:  {instructions}");
    let _ = writeln!(out, "constants:     {constants}");
    let _ = writeln!(out, "max nesting:   {}", proto.max_depth());
    out
}
