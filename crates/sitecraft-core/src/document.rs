//! JSON site documents: every project, page and element in one file.

use crate::element::Element;
use crate::project::{Page, Project};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document: {0}")]
    Invalid(String),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Serializable snapshot of a workspace and its elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl SiteDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the document to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate a document.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    pub fn read_from(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> DocumentResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Check references: pages belong to known projects, elements to known
    /// pages, ids are unique and each project has at most one home page.
    pub fn validate(&self) -> DocumentResult<()> {
        let projects: HashSet<_> = self.projects.iter().map(|p| p.id).collect();
        if projects.len() != self.projects.len() {
            return Err(DocumentError::Invalid("duplicate project id".into()));
        }

        let mut pages = HashSet::new();
        let mut homes = HashSet::new();
        for page in &self.pages {
            if !projects.contains(&page.project_id) {
                return Err(DocumentError::Invalid(format!(
                    "page {} refers to unknown project {}",
                    page.id, page.project_id
                )));
            }
            if !pages.insert(page.id) {
                return Err(DocumentError::Invalid(format!("duplicate page id {}", page.id)));
            }
            if page.is_home && !homes.insert(page.project_id) {
                return Err(DocumentError::Invalid(format!(
                    "project {} has more than one home page",
                    page.project_id
                )));
            }
        }

        let mut elements = HashSet::new();
        for element in &self.elements {
            if !pages.contains(&element.page_id) {
                return Err(DocumentError::Invalid(format!(
                    "element {} refers to unknown page {}",
                    element.id, element.page_id
                )));
            }
            if !elements.insert(element.id) {
                return Err(DocumentError::Invalid(format!("duplicate element id {}", element.id)));
            }
        }
        Ok(())
    }
}
