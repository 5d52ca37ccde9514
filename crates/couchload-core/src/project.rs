//! Design document projects on disk
//!
//! A project is a directory laid out as:
//!
//! ```text
//! <root>/_design/_id                      document id, e.g. `_design/blog`
//! <root>/_design/views/<view>/map.js      optional map function
//! <root>/_design/views/<view>/reduce.js   optional reduce function
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::models::View;

/// Top-level design directory
pub const DESIGN_DIR: &str = "_design";
/// File holding the document id, relative to the design directory
pub const ID_FILE: &str = "_id";
/// Views directory, relative to the design directory
pub const VIEWS_DIR: &str = "views";
/// Map function file name inside a view directory
pub const MAP_FILE: &str = "map.js";
/// Reduce function file name inside a view directory
pub const REDUCE_FILE: &str = "reduce.js";

/// A design document project rooted at a directory
#[derive(Debug, Clone)]
pub struct DesignProject {
    root: PathBuf,
}

impl DesignProject {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn design_dir(&self) -> PathBuf {
        self.root.join(DESIGN_DIR)
    }

    pub fn id_path(&self) -> PathBuf {
        self.design_dir().join(ID_FILE)
    }

    pub fn views_dir(&self) -> PathBuf {
        self.design_dir().join(VIEWS_DIR)
    }

    /// Check the project has a `_design` directory
    pub fn validate(&self) -> LoadResult<()> {
        if self.design_dir().is_dir() {
            Ok(())
        } else {
            Err(LoadError::InvalidProject {
                path: self.root.clone(),
            })
        }
    }

    /// Read the document id from `_design/_id`
    ///
    /// Only the first line counts; surrounding whitespace is dropped.
    pub fn read_id(&self) -> LoadResult<String> {
        let path = self.id_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::MissingId { path })
            }
            Err(e) => return Err(LoadError::from_io(e, path)),
        };

        let id = content.lines().next().unwrap_or("").trim();
        if id.is_empty() {
            return Err(LoadError::MissingId { path });
        }
        Ok(id.to_string())
    }

    /// Collect the project's views, sorted by name
    ///
    /// Each subdirectory of `_design/views` becomes a view. Missing
    /// `map.js` or `reduce.js` files leave the field unset. A subdirectory
    /// whose name is not valid UTF-8 is an error.
    pub fn collect_views(&self) -> LoadResult<Vec<View>> {
        let views_dir = self.views_dir();
        if !views_dir.is_dir() {
            return Err(LoadError::NotADesignDocumentProject { path: views_dir });
        }

        let entries = fs::read_dir(&views_dir).map_err(|e| LoadError::from_io(e, &views_dir))?;

        let mut view_dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LoadError::from_io(e, &views_dir))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            // View names become JSON keys, so they must round-trip exactly
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => return Err(LoadError::InvalidViewName { path }),
            };
            view_dirs.push((name, path));
        }
        view_dirs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut views = Vec::with_capacity(view_dirs.len());
        for (name, dir) in view_dirs {
            let view = View {
                map_fn: read_function(&dir.join(MAP_FILE))?,
                reduce_fn: read_function(&dir.join(REDUCE_FILE))?,
                name,
            };
            debug!(
                "Collected view '{}' (map: {}, reduce: {})",
                view.name,
                view.map_fn.is_some(),
                view.reduce_fn.is_some()
            );
            views.push(view);
        }

        Ok(views)
    }
}

/// Read a function file verbatim, or `None` if it is not a regular file
fn read_function(path: &Path) -> LoadResult<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| LoadError::from_io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_validate_requires_design_dir() {
        let temp_dir = TempDir::new().unwrap();
        let project = DesignProject::new(temp_dir.path());

        assert!(matches!(
            project.validate(),
            Err(LoadError::InvalidProject { .. })
        ));

        fs::create_dir(temp_dir.path().join("_design")).unwrap();
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_read_id_takes_first_line() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "_design/_id", "_design/blog\n");

        let project = DesignProject::new(temp_dir.path());
        assert_eq!(project.read_id().unwrap(), "_design/blog");
    }

    #[test]
    fn test_read_id_missing_or_empty() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("_design")).unwrap();
        let project = DesignProject::new(temp_dir.path());

        assert!(matches!(project.read_id(), Err(LoadError::MissingId { .. })));

        write(temp_dir.path(), "_design/_id", "  \n");
        assert!(matches!(project.read_id(), Err(LoadError::MissingId { .. })));
    }

    #[test]
    fn test_collect_views_requires_views_dir() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "_design/_id", "_design/blog");

        let project = DesignProject::new(temp_dir.path());
        assert!(matches!(
            project.collect_views(),
            Err(LoadError::NotADesignDocumentProject { .. })
        ));
    }

    #[test]
    fn test_collect_views_empty() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("_design/views")).unwrap();

        let project = DesignProject::new(temp_dir.path());
        assert!(project.collect_views().unwrap().is_empty());
    }

    #[test]
    fn test_collect_views_sorted_and_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let map_src = "function(doc) {\n  emit(doc.date, \"x\\y\");\n}\n";
        write(root, "_design/views/zeta/map.js", map_src);
        write(root, "_design/views/zeta/reduce.js", "_count");
        write(root, "_design/views/hobbies/map.js", "function(doc){emit(doc.id,1)}");
        write(root, "_design/views/empty/notes.txt", "ignored");
        // Stray files next to view directories are not views
        write(root, "_design/views/README", "ignored");

        let views = DesignProject::new(root).collect_views().unwrap();
        let names: Vec<_> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["empty", "hobbies", "zeta"]);

        assert!(views[0].map_fn.is_none());
        assert!(views[0].reduce_fn.is_none());
        assert_eq!(
            views[1].map_fn.as_deref(),
            Some("function(doc){emit(doc.id,1)}")
        );
        assert!(views[1].reduce_fn.is_none());
        assert_eq!(views[2].map_fn.as_deref(), Some(map_src));
        assert_eq!(views[2].reduce_fn.as_deref(), Some("_count"));
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_views_rejects_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let views_dir = temp_dir.path().join("_design/views");
        let bad = views_dir.join(OsStr::from_bytes(b"bad\xffname"));
        if fs::create_dir_all(&bad).is_err() {
            // Some filesystems refuse non-UTF-8 names outright
            return;
        }

        let result = DesignProject::new(temp_dir.path()).collect_views();
        match result {
            Err(LoadError::InvalidViewName { path }) => assert_eq!(path, bad),
            other => panic!("expected InvalidViewName, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_views_ignores_directory_named_map_js() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("_design/views/odd/map.js")).unwrap();

        let views = DesignProject::new(temp_dir.path()).collect_views().unwrap();
        assert_eq!(views.len(), 1);
        assert!(views[0].map_fn.is_none());
    }
}
