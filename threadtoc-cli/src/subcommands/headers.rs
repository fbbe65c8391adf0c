use std::{io, path::PathBuf};

use anyhow::Result;
use threadtoc_converters_html::topic_headers;
use threadtoc_core::Settings;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Thread JSON file
    pub thread: PathBuf,
}

pub fn run(args: &Args, settings: &Settings) -> Result<()> {
    let thread = super::read_thread(&args.thread)?;
    let headers = topic_headers(&thread, 1, settings);
    tracing::info!(headers = headers.len(), "collected thread headers");
    serde_json::to_writer_pretty(io::stdout().lock(), &headers)?;
    println!();
    Ok(())
}
