//! Data models for couchload
//!
//! Typed, in-process representations of the documents pushed to CouchDB.
//! They are built fresh for every push and never cached.

use serde_json::{Map, Value};

/// A named view: a map function and an optional reduce function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// View name, taken from its subdirectory name
    pub name: String,
    /// Raw map function source
    pub map_fn: Option<String>,
    /// Raw reduce function source
    pub reduce_fn: Option<String>,
}

impl View {
    /// Create a view with no functions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_fn: None,
            reduce_fn: None,
        }
    }

    /// Set the map function source
    pub fn with_map(mut self, source: impl Into<String>) -> Self {
        self.map_fn = Some(source.into());
        self
    }

    /// Set the reduce function source
    pub fn with_reduce(mut self, source: impl Into<String>) -> Self {
        self.reduce_fn = Some(source.into());
        self
    }
}

/// A design document assembled from a project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignDocument {
    /// Document id, conventionally `_design/<name>`
    pub id: String,
    /// Current server revision, if the document already exists
    pub revision: Option<String>,
    /// Query server language, omitted from the body when `None`
    pub language: Option<String>,
    /// Views in directory-scan order
    pub views: Vec<View>,
}

impl DesignDocument {
    pub fn new(id: impl Into<String>, views: Vec<View>) -> Self {
        Self {
            id: id.into(),
            revision: None,
            language: None,
            views,
        }
    }

    pub fn with_revision(mut self, revision: Option<String>) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

/// A plain JSON document read from a file
#[derive(Debug, Clone, PartialEq)]
pub struct PlainDocument {
    /// The `_id` field
    pub id: String,
    /// Revision to send; `None` means the document is new
    pub revision: Option<String>,
    /// Remaining fields, without `_id` and `_rev`
    pub body: Map<String, Value>,
}

impl PlainDocument {
    /// Split a JSON object into id, revision and body
    ///
    /// Returns `None` when `_id` is absent, not a string, or empty.
    pub fn from_object(mut object: Map<String, Value>) -> Option<Self> {
        let id = match object.remove("_id") {
            Some(Value::String(id)) if !id.is_empty() => id,
            _ => return None,
        };
        let revision = match object.remove("_rev") {
            Some(Value::String(rev)) => Some(rev),
            _ => None,
        };
        Some(Self {
            id,
            revision,
            body: object,
        })
    }

    /// Build the JSON body sent to the store
    ///
    /// `_rev` is present only when a revision is set.
    pub fn to_json(&self) -> Value {
        let mut object = self.body.clone();
        object.insert("_id".to_string(), Value::String(self.id.clone()));
        if let Some(ref rev) = self.revision {
            object.insert("_rev".to_string(), Value::String(rev.clone()));
        }
        Value::Object(object)
    }
}
