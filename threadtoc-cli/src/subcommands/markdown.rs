use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use threadtoc_converters_markdown::render_markdown;
use threadtoc_core::Settings;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Markdown file, or `-` for stdin
    pub file: PathBuf,
}

pub fn run(args: &Args, settings: &Settings) -> Result<()> {
    let source = if args.file.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().lock().read_to_string(&mut source)?;
        source
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("reading {}", args.file.display()))?
    };
    print!("{}", render_markdown(&source, settings)?);
    Ok(())
}
