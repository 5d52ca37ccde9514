//! Plain document command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use couchload_core::{scaffold, Config};

use crate::output::Output;

/// Create a directory of sample documents
pub fn new(dir: &Path, output: &Output) -> Result<()> {
    let files =
        scaffold::create_document_skeletons(dir).context("Failed to create sample documents")?;

    output.print_created(&format!("sample documents: {}", dir.display()), &files);
    Ok(())
}

/// Push plain document files, stopping at the first failure
pub fn push(files: &[PathBuf], config: &Config, output: &Output) -> Result<()> {
    let sync = super::synchronizer(config)?;

    output.message(&format!("Pushing {} document(s)", files.len()));

    let outcomes = sync
        .push_plain_documents(files)
        .context("Failed to push documents")?;

    output.print_pushes(&outcomes);
    Ok(())
}
