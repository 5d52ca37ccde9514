//! Skeleton projects
//!
//! Creates a starter design document project or a directory of sample
//! plain documents, ready to edit and push.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{LoadError, LoadResult};
use crate::project::{DesignProject, MAP_FILE, REDUCE_FILE};

/// Name of the sample view in a new project
pub const SAMPLE_VIEW: &str = "foo";

const SAMPLE_MAP_FN: &str = r#"/* This is a sample view function */
function(doc) {
  if(doc.date && doc.title) {
    emit(doc.date, doc.title);
  }
}
"#;

const SAMPLE_REDUCE_FN: &str = r#"/* This is a sample reduce function */
function(keys, values, rereduce) {
  if(rereduce) {
    return sum(values);
  }
  return values.length;
}
"#;

const SAMPLE_DOCUMENTS: &[(&str, &str)] = &[
    (
        "biking.json",
        r#"{
  "_id": "biking",

  "title": "Biking",
  "body": "My biggest hobby is mountainbiking. The other day...",
  "date": "2009/01/30 18:04:11"
}
"#,
    ),
    (
        "bought-a-cat.json",
        r#"{
  "_id": "bought-a-cat",

  "title": "Bought a Cat",
  "body": "I went to the the pet store earlier and brought home a little kitty...",
  "date": "2009/02/17 21:13:39"
}
"#,
    ),
];

/// Create a design document project at `project_dir`
///
/// The document id is `_design/<directory name>`. Returns the files written.
/// If a write fails, the partially created directory is removed.
pub fn create_design_project(project_dir: &Path) -> LoadResult<Vec<PathBuf>> {
    ensure_absent(project_dir)?;

    let name = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| LoadError::InvalidProject {
            path: project_dir.to_path_buf(),
        })?;

    info!("Creating design document project {:?}", project_dir);

    let project = DesignProject::new(project_dir);
    let view_dir = project.views_dir().join(SAMPLE_VIEW);
    let files = vec![
        (project.id_path(), format!("_design/{}\n", name)),
        (view_dir.join(MAP_FILE), SAMPLE_MAP_FN.to_string()),
        (view_dir.join(REDUCE_FILE), SAMPLE_REDUCE_FN.to_string()),
    ];

    write_tree(project_dir, files)
}

/// Create a directory of sample plain documents at `dir`
///
/// Returns the files written. If a write fails, `dir` is removed again.
pub fn create_document_skeletons(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    ensure_absent(dir)?;
    info!("Creating sample documents in {:?}", dir);

    let files = SAMPLE_DOCUMENTS
        .iter()
        .map(|(file_name, content)| (dir.join(file_name), content.to_string()))
        .collect();
    write_tree(dir, files)
}

fn ensure_absent(path: &Path) -> LoadResult<()> {
    if path.exists() {
        return Err(LoadError::ProjectExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Write every file under `root`, removing `root` again if any write fails
///
/// `root` must not exist beforehand, so nothing else lives under it.
fn write_tree(root: &Path, files: Vec<(PathBuf, String)>) -> LoadResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for (path, content) in files {
        if let Err(e) = write_file(&path, &content) {
            if let Err(cleanup) = fs::remove_dir_all(root) {
                warn!("Could not remove partial {:?}: {}", root, cleanup);
            }
            return Err(e);
        }
        written.push(path);
    }
    Ok(written)
}

fn write_file(path: &Path, content: &str) -> LoadResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LoadError::from_io(e, parent))?;
    }
    fs::write(path, content).map_err(|e| LoadError::from_io(e, path))
}
