//! Pushing documents to the store
//!
//! Every push re-reads the document's current revision right before the
//! write, so pushing an unchanged project or file again updates the same
//! document instead of conflicting or creating a duplicate.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::design::assemble;
use crate::error::{LoadError, LoadResult};
use crate::models::{DesignDocument, PlainDocument};
use crate::project::DesignProject;
use crate::store::{DocumentStore, PutOutcome};

/// Options fixed at synchronizer construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// `language` field for design documents; `None` omits it
    pub language: Option<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            language: Some("javascript".to_string()),
        }
    }
}

/// Result of a successful push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    pub id: String,
    /// Revision the document had before the push; `None` for a new document
    pub previous_revision: Option<String>,
    /// Revision reported by the store after the push
    pub revision: Option<String>,
}

impl PushOutcome {
    pub fn created(&self) -> bool {
        self.previous_revision.is_none()
    }
}

/// Pushes design documents and plain documents to a store
pub struct Synchronizer<S> {
    store: S,
    options: SyncOptions,
}

impl<S: DocumentStore> Synchronizer<S> {
    pub fn new(store: S, options: SyncOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Push the design document project at `project_dir`
    pub fn push_design_document(&self, project_dir: &Path) -> LoadResult<PushOutcome> {
        let project = DesignProject::new(project_dir);
        project.validate()?;
        let id = project.read_id()?;
        info!("Pushing design document {} from {:?}", id, project_dir);

        let revision = self.current_revision(&id)?;
        let views = project.collect_views()?;

        let doc = DesignDocument::new(id, views)
            .with_revision(revision)
            .with_language(self.options.language.clone());
        self.upsert(&doc.id, doc.revision.clone(), &assemble(&doc))
    }

    /// Push a single plain JSON document file
    pub fn push_plain_document(&self, file_path: &Path) -> LoadResult<PushOutcome> {
        let mut doc = read_plain_document(file_path)?;
        info!("Pushing document {} from {:?}", doc.id, file_path);

        doc.revision = self.current_revision(&doc.id)?;
        self.upsert(&doc.id, doc.revision.clone(), &doc.to_json())
    }

    /// Push plain documents in order, stopping at the first failure
    pub fn push_plain_documents(&self, files: &[PathBuf]) -> LoadResult<Vec<PushOutcome>> {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            outcomes.push(self.push_plain_document(file)?);
        }
        Ok(outcomes)
    }

    /// Current revision of `id`, or `None` if the store does not have it
    fn current_revision(&self, id: &str) -> LoadResult<Option<String>> {
        Ok(self.store.get(id)?.and_then(|stored| stored.revision))
    }

    fn upsert(
        &self,
        id: &str,
        previous_revision: Option<String>,
        body: &Value,
    ) -> LoadResult<PushOutcome> {
        match self.store.put(id, body)? {
            PutOutcome::Accepted { revision } => {
                info!("Stored {} at revision {:?}", id, revision);
                Ok(PushOutcome {
                    id: id.to_string(),
                    previous_revision,
                    revision,
                })
            }
            PutOutcome::Rejected { response } => {
                warn!("Store rejected {}: {}", id, response);
                Err(LoadError::StoreRejected {
                    operation: format!("PUT {}", id),
                    response,
                })
            }
        }
    }
}

/// Assemble a project's design document without contacting a store
///
/// The result carries no revision.
pub fn build_design_document(
    project_dir: &Path,
    options: &SyncOptions,
) -> LoadResult<DesignDocument> {
    let project = DesignProject::new(project_dir);
    project.validate()?;
    let id = project.read_id()?;
    let views = project.collect_views()?;
    Ok(DesignDocument::new(id, views).with_language(options.language.clone()))
}

/// Read and parse a plain document file
pub fn read_plain_document(file_path: &Path) -> LoadResult<PlainDocument> {
    let content = fs::read_to_string(file_path).map_err(|e| LoadError::from_io(e, file_path))?;

    let value: Value =
        serde_json::from_str(&content).map_err(|e| LoadError::MalformedDocument {
            path: file_path.to_path_buf(),
            details: e.to_string(),
        })?;
    let Value::Object(object) = value else {
        return Err(LoadError::MalformedDocument {
            path: file_path.to_path_buf(),
            details: "expected a JSON object".to_string(),
        });
    };

    PlainDocument::from_object(object).ok_or_else(|| LoadError::MissingId {
        path: file_path.to_path_buf(),
    })
}
