//! Design document command handlers

use std::path::Path;

use anyhow::{Context, Result};

use couchload_core::{assemble, build_design_document, scaffold, Config};

use crate::output::Output;

/// Create a skeleton design document project
pub fn new(project_dir: &Path, output: &Output) -> Result<()> {
    let files = scaffold::create_design_project(project_dir)
        .context("Failed to create design document project")?;

    output.print_created(
        &format!("design document project: {}", project_dir.display()),
        &files,
    );
    Ok(())
}

/// Push a design document project to the database
pub fn push(project_dir: &Path, config: &Config, output: &Output) -> Result<()> {
    let sync = super::synchronizer(config)?;

    output.message(&format!(
        "Pushing design document project: {}",
        project_dir.display()
    ));

    let outcome = sync
        .push_design_document(project_dir)
        .with_context(|| format!("Failed to push {}", project_dir.display()))?;

    output.print_pushes(&[outcome]);
    Ok(())
}

/// Print the assembled design document without contacting the database
pub fn show(project_dir: &Path, config: &Config, output: &Output) -> Result<()> {
    let doc = build_design_document(project_dir, &config.sync_options())
        .with_context(|| format!("Failed to build {}", project_dir.display()))?;

    output.print_document(&assemble(&doc));
    Ok(())
}
