use std::path::PathBuf;

use anyhow::Result;
use threadtoc_converters_html::Processor;
use threadtoc_core::Settings;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Thread JSON file
    pub thread: PathBuf,
}

pub fn run(args: &Args, settings: &Settings) -> Result<()> {
    let thread = super::read_thread(&args.thread)?;
    let processor = Processor::new(settings.clone());
    let headers = processor.headers(&thread);
    match processor.toc(&thread, &headers)? {
        Some(toc) => print!("{toc}"),
        None => tracing::info!(
            headers = headers.len(),
            "not enough headers for a table of contents"
        ),
    }
    Ok(())
}
