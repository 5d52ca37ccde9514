//! couchload Core Library
//!
//! Loads CouchDB design documents and plain JSON documents from local
//! files into a database.
//!
//! # Architecture
//!
//! - A design document project is a directory tree of view functions.
//!   It is collected into [`View`]s, assembled into one JSON body and
//!   upserted under its `_design/...` id.
//! - Plain documents are JSON files carrying their own `_id`.
//! - Every write first looks up the document's current revision, so
//!   repeated pushes update in place instead of conflicting.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let client = CouchClient::new("http://127.0.0.1:5984/blog", config.timeout())?;
//! let sync = Synchronizer::new(client, config.sync_options());
//!
//! sync.push_design_document(Path::new("blog"))?;
//! sync.push_plain_documents(&[PathBuf::from("docs/biking.json")])?;
//! ```
//!
//! # Modules
//!
//! - `project`: Design document project layout and view collection
//! - `design`: Design document JSON assembly
//! - `store`: Document store trait and CouchDB HTTP client
//! - `sync`: Revision lookup and upsert
//! - `scaffold`: Skeleton projects and sample documents
//! - `models`: Views, design documents and plain documents
//! - `config`: Application configuration

pub mod config;
pub mod design;
pub mod error;
pub mod models;
pub mod project;
pub mod scaffold;
pub mod store;
pub mod sync;

pub use config::Config;
pub use design::{assemble, render};
pub use error::{LoadError, LoadResult};
pub use models::{DesignDocument, PlainDocument, View};
pub use project::DesignProject;
pub use store::{redact_url, CouchClient, DocumentStore, PutOutcome, StoredDocument};
pub use sync::{build_design_document, PushOutcome, SyncOptions, Synchronizer};
