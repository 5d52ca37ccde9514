//! Design document assembly
//!
//! Turns a [`DesignDocument`] into the JSON body CouchDB expects:
//!
//! ```text
//! {
//!   "_id": "_design/blog",
//!   "_rev": "2-abc",              (only when a revision is known)
//!   "language": "javascript",     (only when configured)
//!   "views": {
//!     "hobbies": { "map": "function(doc){...}", "reduce": "..." }
//!   }
//! }
//! ```
//!
//! Function source is stored as a JSON string value, so serde_json does
//! all escaping. Object keys serialize in sorted order, which keeps the
//! output stable for golden-file comparisons.

use serde_json::{Map, Value};

use crate::models::{DesignDocument, View};

/// Build the JSON body for a design document
pub fn assemble(doc: &DesignDocument) -> Value {
    let mut body = Map::new();
    body.insert("_id".to_string(), Value::String(doc.id.clone()));
    if let Some(ref rev) = doc.revision {
        body.insert("_rev".to_string(), Value::String(rev.clone()));
    }
    if let Some(ref language) = doc.language {
        body.insert("language".to_string(), Value::String(language.clone()));
    }
    body.insert("views".to_string(), views_object(&doc.views));
    Value::Object(body)
}

/// Render the assembled body as pretty-printed JSON text
pub fn render(doc: &DesignDocument) -> String {
    // Serializing a Value with string keys cannot fail
    serde_json::to_string_pretty(&assemble(doc)).unwrap_or_default()
}

fn views_object(views: &[View]) -> Value {
    let mut object = Map::new();
    for view in views {
        let mut functions = Map::new();
        if let Some(ref map_fn) = view.map_fn {
            functions.insert("map".to_string(), Value::String(map_fn.clone()));
        }
        if let Some(ref reduce_fn) = view.reduce_fn {
            functions.insert("reduce".to_string(), Value::String(reduce_fn.clone()));
        }
        object.insert(view.name.clone(), Value::Object(functions));
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_views() -> Vec<View> {
        vec![
            View::new("hobbies").with_map("function(doc){emit(doc.id,1)}"),
            View::new("totals")
                .with_map("function(doc) {\n  emit(doc.date, 1);\n}\n")
                .with_reduce("_sum"),
        ]
    }

    #[test]
    fn test_assemble_view_with_map_only() {
        let doc = DesignDocument::new("_design/blog", sample_views());
        let body = assemble(&doc);

        assert_eq!(
            body["views"]["hobbies"],
            json!({"map": "function(doc){emit(doc.id,1)}"})
        );
        assert!(body["views"]["hobbies"].get("reduce").is_none());
    }

    #[test]
    fn test_assemble_one_entry_per_view() {
        for n in 0..4 {
            let views: Vec<_> = (0..n)
                .map(|i| View::new(format!("view{}", i)).with_map("function(doc){}"))
                .collect();
            let body = assemble(&DesignDocument::new("_design/n", views));
            assert_eq!(body["views"].as_object().unwrap().len(), n);
        }
    }

    #[test]
    fn test_assemble_revision_omitted_when_absent() {
        let doc = DesignDocument::new("_design/blog", sample_views());
        let body = assemble(&doc);
        assert_eq!(body["_id"], "_design/blog");
        assert!(body.get("_rev").is_none());

        let doc = doc.with_revision(Some("2-abc".to_string()));
        assert_eq!(assemble(&doc)["_rev"], "2-abc");
    }

    #[test]
    fn test_assemble_language_is_optional() {
        let doc = DesignDocument::new("_design/blog", Vec::new());
        assert!(assemble(&doc).get("language").is_none());

        let doc = doc.with_language(Some("javascript".to_string()));
        assert_eq!(assemble(&doc)["language"], "javascript");
    }

    #[test]
    fn test_function_source_survives_round_trip() {
        let source = "function(doc) {\n\tif (doc.title == \"a\\\"b\") {\r\n    emit(doc._id, '\\\\');\n  }\n}\n";
        let doc = DesignDocument::new("_design/tricky", vec![View::new("v").with_map(source)]);

        let text = render(&doc);
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed["views"]["v"]["map"].as_str().unwrap(), source);
    }

    #[test]
    fn test_render_is_deterministic() {
        let forward = DesignDocument::new("_design/blog", sample_views());
        let mut reversed_views = sample_views();
        reversed_views.reverse();
        let reversed = DesignDocument::new("_design/blog", reversed_views);

        assert_eq!(render(&forward), render(&reversed));
        assert_eq!(
            render(&forward),
            r#"{
  "_id": "_design/blog",
  "views": {
    "hobbies": {
      "map": "function(doc){emit(doc.id,1)}"
    },
    "totals": {
      "map": "function(doc) {\n  emit(doc.date, 1);\n}\n",
      "reduce": "_sum"
    }
  }
}"#
        );
    }
}
