//! Json command - dump the decoded prototype tree as JSON.

use anyhow::Result;
use clap::Args;
use lunar_bytecode::Prototype;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Args)]
pub struct JsonCommand {
    /// Chunk to dump
    pub file: PathBuf,

    /// Emit a single line instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

impl JsonCommand {
    pub fn run(&self, config: &Config) -> Result<()> {
        let proto = super::load_chunk(&self.file, config.limits)?;
        let pretty = config.output.pretty_json && !self.compact;
        println!("{}", render(&proto, pretty)?);
        Ok(())
    }
}

/// Serialize a prototype tree
pub fn render(proto: &Prototype, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(proto)?
    } else {
        serde_json::to_string(proto)?
    };
    Ok(json)
}
