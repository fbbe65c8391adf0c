use std::{io, path::PathBuf};

use anyhow::Result;
use threadtoc_core::Settings;
use threadtoc_dom::decorate_thread;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Thread JSON file
    pub thread: PathBuf,
}

pub fn run(args: &Args, settings: &Settings) -> Result<()> {
    let thread = super::read_thread(&args.thread)?;
    let posts = decorate_thread(&thread, settings);
    serde_json::to_writer_pretty(io::stdout().lock(), &posts)?;
    println!();
    Ok(())
}
