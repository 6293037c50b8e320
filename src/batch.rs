//! Concurrent extraction over a directory of raw messages.
//!
//! The message store holds one file per message, named by its decimal
//! sequence number (the fetch side zero-pads to six digits). Every message
//! is extracted in its own task; results come back through the joined
//! handles and are sorted once behind the barrier. One message's failure
//! never touches the others — it is logged, recorded, and the batch moves
//! on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::article::Article;
use crate::error::ExtractError;
use crate::extract::Extractor;

/// What a batch run produced: articles sorted by id, plus every
/// per-message failure for the caller to report.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub articles: Vec<Article>,
    pub failures: Vec<ExtractError>,
}

/// Extract every message under `store_dir` concurrently.
///
/// Only the directory scan itself can fail; per-message trouble ends up in
/// [`BatchOutcome::failures`].
pub async fn run_batch(
    extractor: Arc<Extractor>,
    store_dir: &Path,
) -> std::io::Result<BatchOutcome> {
    let messages = scan_messages(store_dir).await?;
    debug!(count = messages.len(), "starting batch extraction");

    let tasks: Vec<_> = messages
        .into_iter()
        .map(|(id, path)| {
            let extractor = Arc::clone(&extractor);
            tokio::spawn(async move {
                let raw = match tokio::fs::read(&path).await {
                    Ok(raw) => raw,
                    Err(source) => return Err(ExtractError::Io { id, source }),
                };
                extractor.extract(id, &raw)
            })
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for joined in join_all(tasks).await {
        match joined {
            Ok(Ok(article)) => outcome.articles.push(article),
            Ok(Err(err)) => {
                warn!(id = err.id(), kind = err.label(), "{err}");
                outcome.failures.push(err);
            }
            Err(join_err) => warn!(error = %join_err, "extraction task panicked"),
        }
    }

    outcome.articles.sort_by_key(Article::id);
    outcome.failures.sort_by_key(ExtractError::id);
    Ok(outcome)
}

/// List message files in the store.
///
/// Subdirectories and names containing `.` belong to other tooling and are
/// skipped; remaining names must parse as decimal sequence ids (leading
/// zeros allowed).
async fn scan_messages(dir: &Path) -> std::io::Result<Vec<(u32, PathBuf)>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut found = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.contains('.') {
            continue;
        }
        if entry.file_type().await?.is_dir() {
            continue;
        }
        match name.parse::<u32>() {
            Ok(id) => found.push((id, entry.path())),
            Err(_) => debug!(file = name, "skipping non-sequence file"),
        }
    }
    Ok(found)
}
