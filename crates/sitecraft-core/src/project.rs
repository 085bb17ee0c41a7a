//! Projects and their pages.

use crate::clock::now_millis;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for projects.
pub type ProjectId = Uuid;

/// Unique identifier for pages.
pub type PageId = Uuid;

/// Marker that turns button text into an intra-site link (`page:<slug>`).
pub const PAGE_LINK_PREFIX: &str = "page:";

/// A website project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    /// Milliseconds since the Unix epoch.
    pub updated_at: u64,
}

/// A page of a project. Elements refer back to it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub project_id: ProjectId,
    pub is_home: bool,
    pub order: u32,
}

/// Turn a page title into a URL slug.
///
/// Lowercases, drops anything that is not an ASCII word character or
/// whitespace, then joins whitespace runs with `-`.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Extract the target slug from link text such as `"Contact page: contact"`.
pub fn link_target(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once(PAGE_LINK_PREFIX)?;
    let slug = rest.split(PAGE_LINK_PREFIX).next().unwrap_or(rest).trim();
    (!slug.is_empty()).then_some(slug)
}

/// The set of projects and pages known to the editor, plus the current
/// project/page cursor.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    projects: Vec<Project>,
    pages: Vec<Page>,
    current_project: Option<ProjectId>,
    current_page: Option<PageId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a workspace from stored projects and pages. Nothing is current.
    pub fn from_parts(projects: Vec<Project>, pages: Vec<Page>) -> Self {
        Self {
            projects,
            pages,
            current_project: None,
            current_page: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.and_then(|id| self.project(id))
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.current_page.and_then(|id| self.page(id))
    }

    pub fn current_page_id(&self) -> Option<PageId> {
        self.current_page
    }

    /// Create a project with its home page; both become current.
    pub fn add_project(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> ProjectId {
        let now = now_millis();
        let project = Project {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            owner_id: owner_id.into(),
            created_at: now,
            updated_at: now,
        };
        let id = project.id;
        log::info!("Created project {} ({})", project.name, id);
        self.projects.push(project);
        self.current_project = Some(id);
        self.add_page(id, "Home");
        id
    }

    /// Make a project current and open its home page (or its first page).
    /// Returns false for an unknown project.
    pub fn set_current_project(&mut self, id: ProjectId) -> bool {
        if self.project(id).is_none() {
            return false;
        }
        self.current_project = Some(id);
        self.current_page = self
            .home_page(id)
            .or_else(|| self.project_pages(id).into_iter().next())
            .map(|page| page.id);
        true
    }

    /// Add a page to a project and make it current.
    ///
    /// The first page of a project becomes its home page. Returns `None`
    /// for an unknown project or a blank title.
    pub fn add_page(&mut self, project_id: ProjectId, title: &str) -> Option<PageId> {
        if self.project(project_id).is_none() || title.trim().is_empty() {
            return None;
        }
        let existing = self.pages.iter().filter(|p| p.project_id == project_id).count();
        let page = Page {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            slug: slugify(title),
            project_id,
            is_home: existing == 0,
            order: existing as u32,
        };
        let id = page.id;
        self.pages.push(page);
        self.current_page = Some(id);
        self.touch_project(project_id);
        Some(id)
    }

    /// Returns false for an unknown page.
    pub fn set_current_page(&mut self, id: PageId) -> bool {
        match self.page(id) {
            Some(page) => {
                self.current_project = Some(page.project_id);
                self.current_page = Some(id);
                true
            }
            None => false,
        }
    }

    /// Make `id` the only home page of its project.
    pub fn set_home_page(&mut self, id: PageId) -> bool {
        let Some(project_id) = self.page(id).map(|p| p.project_id) else {
            return false;
        };
        for page in self.pages.iter_mut().filter(|p| p.project_id == project_id) {
            page.is_home = page.id == id;
        }
        self.touch_project(project_id);
        true
    }

    /// Pages of a project, by `order`.
    pub fn project_pages(&self, project_id: ProjectId) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.iter().filter(|p| p.project_id == project_id).collect();
        pages.sort_by_key(|p| p.order);
        pages
    }

    pub fn home_page(&self, project_id: ProjectId) -> Option<&Page> {
        self.pages.iter().find(|p| p.project_id == project_id && p.is_home)
    }

    pub fn page_by_slug(&self, project_id: ProjectId, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.project_id == project_id && p.slug == slug)
    }

    /// Resolve a `page:<slug>` link found in button text.
    pub fn resolve_link(&self, project_id: ProjectId, text: &str) -> Option<&Page> {
        link_target(text).and_then(|slug| self.page_by_slug(project_id, slug))
    }

    /// Bump a project's `updated_at`.
    pub fn touch_project(&mut self, id: ProjectId) {
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == id) {
            project.updated_at = now_millis().max(project.updated_at);
        }
    }
}
