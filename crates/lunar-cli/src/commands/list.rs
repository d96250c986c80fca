//! List command - print a `luac -l` style listing.

use anyhow::Result;
use clap::Args;
use lunar_bytecode::Listing;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Args)]
pub struct ListCommand {
    /// Chunk to list
    pub file: PathBuf,

    /// Also list constants, locals and upvalues
    #[arg(long, short = 'f')]
    pub full: bool,
}

impl ListCommand {
    pub fn run(&self, config: &Config) -> Result<()> {
        let proto = super::load_chunk(&self.file, config.limits)?;
        let full = self.full || config.output.full_listing;
        print!("{}", Listing::new(&proto).full(full));
        Ok(())
    }
}
