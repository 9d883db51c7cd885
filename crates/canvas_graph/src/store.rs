//! File-backed project store.
//!
//! Each project is one JSON file named after the slug of its name:
//! ```text
//! <root>/
//! ├── web-shop.json
//! └── data-pipeline.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{GraphError, GraphResult};
use crate::models::Project;

/// Convert a project name to a file-safe slug.
fn slugify(s: &str) -> String {
    let slug = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Saves and loads [`Project`] records without interpreting them.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path used for a project name.
    pub fn project_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", slugify(name)))
    }

    /// Save a project, replacing an earlier save under the same name.
    ///
    /// Fails with [`GraphError::NameConflict`] when the slug already belongs
    /// to a project with a different name.
    pub fn save(&self, project: &Project) -> GraphResult<PathBuf> {
        fs::create_dir_all(&self.root)?;

        let path = self.project_path(&project.name);
        if path.exists() {
            let stored = read_project(&path)?;
            if stored.name != project.name {
                return Err(GraphError::NameConflict {
                    name: project.name.clone(),
                    existing: stored.name,
                });
            }
        }

        let content = serde_json::to_string_pretty(project)?;
        fs::write(&path, content)?;

        info!("Saved project '{}' to {:?}", project.name, path);
        Ok(path)
    }

    /// Load a project by name.
    pub fn load(&self, name: &str) -> GraphResult<Project> {
        let path = self.locate(name)?;
        debug!("Loading project from {:?}", path);
        read_project(&path)
    }

    /// Names of all stored projects, sorted.
    pub fn list(&self) -> GraphResult<Vec<String>> {
        let mut names = Vec::new();

        if !self.root.exists() {
            return Ok(names);
        }

        for entry in WalkDir::new(&self.root)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            match read_project(path) {
                Ok(project) => names.push(project.name),
                Err(e) => debug!("Skipping unreadable project file {:?}: {}", path, e),
            }
        }

        names.sort();
        Ok(names)
    }

    /// Delete a project by name.
    pub fn delete(&self, name: &str) -> GraphResult<()> {
        let path = self.locate(name)?;
        fs::remove_file(&path)?;
        info!("Deleted project '{}'", name);
        Ok(())
    }

    /// Path of the file holding exactly the project `name`.
    fn locate(&self, name: &str) -> GraphResult<PathBuf> {
        let path = self.project_path(name);
        if !path.exists() || read_project(&path)?.name != name {
            return Err(GraphError::ProjectNotFound(name.to_string()));
        }
        Ok(path)
    }
}

fn read_project(path: &Path) -> GraphResult<Project> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
