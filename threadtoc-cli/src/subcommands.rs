use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use threadtoc_core::Thread;

pub mod decorate;
pub mod headers;
pub mod markdown;
pub mod toc;

/// Read a thread from a JSON file of the form `{"url": ..., "posts": [{"number", "cooked"}]}`.
fn read_thread(path: &Path) -> Result<Thread> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let thread: Thread = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("reading thread from {}", path.display()))?;
    tracing::debug!(posts = thread.posts.len(), url = ?thread.url, "read thread");
    Ok(thread)
}
