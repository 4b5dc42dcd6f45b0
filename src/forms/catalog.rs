//! Sub-project catalog seam
//!
//! The automatic-translation form offers the sibling sub-projects of the
//! one being translated. Where they come from is up to the application,
//! usually a database query, so the form only sees this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::error::{FormError, FormResult};

/// A sub-project as listed in a choice field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subproject {
    pub slug: String,
    pub name: String,
}

impl Subproject {
    pub fn new(slug: &str, name: &str) -> Self {
        Subproject {
            slug: slug.to_string(),
            name: name.to_string(),
        }
    }
}

/// Identifies a sub-project within its project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubprojectRef {
    pub project: String,
    pub subproject: String,
}

impl SubprojectRef {
    pub fn new(project: &str, subproject: &str) -> Self {
        SubprojectRef {
            project: project.to_string(),
            subproject: subproject.to_string(),
        }
    }
}

/// Source of the sub-projects belonging to a project.
#[async_trait]
pub trait SubprojectCatalog: Send + Sync {
    /// Sub-projects of `project` other than `exclude`, in display order
    ///
    /// # Errors
    ///
    /// Implementations report unknown projects and lookup failures as
    /// [`FormError::Catalog`].
    async fn siblings(&self, project: &str, exclude: &str) -> FormResult<Vec<Subproject>>;

    /// Name of the catalog, for logging
    fn catalog_name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProject {
    pub slug: String,
    #[serde(default)]
    pub subprojects: Vec<Subproject>,
}

/// Catalog held in memory, loadable from JSON:
///
/// ```json
/// { "projects": [ { "slug": "weblate", "subprojects": [ { "slug": "core", "name": "Core" } ] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    pub projects: Vec<CatalogProject>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        InMemoryCatalog {
            projects: Vec::new(),
        }
    }

    pub fn with_project(mut self, slug: &str, subprojects: Vec<Subproject>) -> Self {
        self.projects.push(CatalogProject {
            slug: slug.to_string(),
            subprojects,
        });
        self
    }

    pub fn from_json(content: &str) -> FormResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| FormError::Catalog(format!("Failed to parse catalog: {}", e)))
    }

    pub fn load(path: &Path) -> FormResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FormError::Catalog(format!("Failed to read file '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }
}

#[async_trait]
impl SubprojectCatalog for InMemoryCatalog {
    async fn siblings(&self, project: &str, exclude: &str) -> FormResult<Vec<Subproject>> {
        let entry = self
            .projects
            .iter()
            .find(|p| p.slug == project)
            .ok_or_else(|| FormError::Catalog(format!("Unknown project '{}'", project)))?;

        let siblings: Vec<Subproject> = entry
            .subprojects
            .iter()
            .filter(|s| s.slug != exclude)
            .cloned()
            .collect();
        debug!(
            "Project '{}' has {} sub-projects besides '{}'",
            project,
            siblings.len(),
            exclude
        );
        Ok(siblings)
    }

    fn catalog_name(&self) -> &str {
        "In-memory catalog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new().with_project(
            "weblate",
            vec![
                Subproject::new("core", "Core"),
                Subproject::new("docs", "Documentation"),
                Subproject::new("web", "Website"),
            ],
        )
    }

    #[tokio::test]
    async fn test_siblings_exclude_current() {
        let siblings = catalog().siblings("weblate", "docs").await.unwrap();
        assert_eq!(
            siblings,
            vec![Subproject::new("core", "Core"), Subproject::new("web", "Website")]
        );
    }

    #[tokio::test]
    async fn test_siblings_unknown_project() {
        let result = catalog().siblings("phpmyadmin", "docs").await;
        assert!(matches!(result, Err(FormError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_catalog_from_json() {
        let catalog = InMemoryCatalog::from_json(
            r#"{"projects": [{"slug": "p", "subprojects": [{"slug": "a", "name": "A"}]}, {"slug": "empty"}]}"#,
        )
        .unwrap();

        assert_eq!(catalog.siblings("p", "b").await.unwrap().len(), 1);
        assert!(catalog.siblings("p", "a").await.unwrap().is_empty());
        assert!(catalog.siblings("empty", "a").await.unwrap().is_empty());
    }

    #[test]
    fn test_catalog_invalid_json() {
        assert!(matches!(
            InMemoryCatalog::from_json("{\"projects\": 3}"),
            Err(FormError::Catalog(_))
        ));
    }
}
