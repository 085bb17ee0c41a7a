//! Sitecraft Application
//!
//! Command implementations behind the `sitecraft` binary: loading site
//! documents, rendering device previews and listing shortcuts.

use anyhow::{Context, Result, anyhow};
use sitecraft_core::{EditorConfig, EditorSession, ProjectId, ShortcutRegistry, SiteDocument};
use sitecraft_render::{DeviceKind, HtmlRenderer, PreviewFrame, device_preset};
use std::path::Path;

/// Owner id written into documents created from the command line.
pub const LOCAL_OWNER: &str = "local";

/// Load the editor config, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    EditorConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

/// Open a site document as an editor session.
pub fn load_session(path: &Path, config: EditorConfig) -> Result<EditorSession> {
    let document =
        SiteDocument::read_from(path).with_context(|| format!("Failed to load document {}", path.display()))?;
    log::info!(
        "Loaded {} ({} projects, {} pages, {} elements)",
        path.display(),
        document.projects.len(),
        document.pages.len(),
        document.elements.len()
    );
    Ok(EditorSession::from_document(document, config))
}

/// Write a new document holding one project and its home page.
pub fn create_document(path: &Path, name: &str, description: &str) -> Result<SiteDocument> {
    if path.exists() {
        return Err(anyhow!("{} already exists", path.display()));
    }
    let mut session = EditorSession::default();
    session.workspace_mut().add_project(name, description, LOCAL_OWNER);
    let document = session.document();
    document
        .write_to(path)
        .with_context(|| format!("Failed to write document {}", path.display()))?;
    Ok(document)
}

/// What to preview and in which frame.
#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    pub project: Option<ProjectId>,
    /// Page slug; the project's home page when absent.
    pub page: Option<String>,
    pub device: DeviceKind,
    pub landscape: bool,
    /// Device preset name, overriding `device`.
    pub preset: Option<String>,
}

/// Select the requested project/page and render it as a standalone HTML
/// page inside a device frame.
pub fn render_preview(session: &mut EditorSession, options: &PreviewOptions) -> Result<String> {
    if let Some(project) = options.project {
        if !session.set_current_project(project) {
            return Err(anyhow!("Unknown project {project}"));
        }
    }
    let project = session
        .workspace()
        .current_project()
        .map(|p| p.id)
        .ok_or_else(|| anyhow!("Document has no project"))?;

    if let Some(slug) = &options.page {
        let page = session
            .workspace()
            .page_by_slug(project, slug)
            .map(|p| p.id)
            .ok_or_else(|| anyhow!("No page with slug '{slug}'"))?;
        session.set_current_page(page);
    }

    let mut frame = PreviewFrame::new(options.device);
    if let Some(name) = &options.preset {
        let preset = device_preset(name).ok_or_else(|| anyhow!("Unknown device preset '{name}'"))?;
        frame.apply_preset(preset);
    }
    if options.landscape {
        frame.toggle_orientation();
    }

    let body = frame.render(&mut HtmlRenderer::new(), session)?;
    let title = session
        .workspace()
        .current_page()
        .map(|page| page.title.clone())
        .unwrap_or_default();
    Ok(HtmlRenderer::page_document(&title, &body))
}

/// The shortcut table as aligned text.
pub fn shortcut_table() -> String {
    let shortcuts = ShortcutRegistry::all();
    let width = shortcuts.iter().map(|s| s.format().len()).max().unwrap_or(0);
    shortcuts
        .iter()
        .map(|s| format!("{:<width$}  {}\n", s.format(), s.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_core::ElementKind;

    #[test]
    fn test_create_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        let document = create_document(&path, "Portfolio", "My work").unwrap();
        assert_eq!(document.pages.len(), 1);
        assert!(create_document(&path, "Again", "").is_err());

        let session = load_session(&path, EditorConfig::default()).unwrap();
        assert_eq!(session.workspace().current_page().unwrap().slug, "home");
    }

    #[test]
    fn test_preview_selects_page_by_slug() {
        let mut session = EditorSession::default();
        let project = session.workspace_mut().add_project("Site", "", LOCAL_OWNER);
        session.add_from_palette(ElementKind::Hero);
        session.workspace_mut().add_page(project, "About us");

        let html = render_preview(
            &mut session,
            &PreviewOptions {
                page: Some("about-us".into()),
                device: DeviceKind::Tablet,
                ..PreviewOptions::default()
            },
        )
        .unwrap();
        assert!(html.contains("<title>About us</title>"));
        assert!(html.contains("data-device=\"tablet\""));
        assert!(!html.contains("data-type=\"hero\""));
    }

    #[test]
    fn test_preview_errors() {
        let mut session = EditorSession::default();
        assert!(render_preview(&mut session, &PreviewOptions::default()).is_err());

        session.workspace_mut().add_project("Site", "", LOCAL_OWNER);
        let missing_page = PreviewOptions {
            page: Some("nope".into()),
            ..PreviewOptions::default()
        };
        assert!(render_preview(&mut session, &missing_page).is_err());
        let missing_preset = PreviewOptions {
            preset: Some("Nokia 3310".into()),
            ..PreviewOptions::default()
        };
        assert!(render_preview(&mut session, &missing_preset).is_err());
    }

    #[test]
    fn test_landscape_preset() {
        let mut session = EditorSession::default();
        session.workspace_mut().add_project("Site", "", LOCAL_OWNER);
        let options = PreviewOptions {
            preset: Some("iPad Mini".into()),
            landscape: true,
            ..PreviewOptions::default()
        };
        let html = render_preview(&mut session, &options).unwrap();
        assert!(html.contains("width: 1024px; height: 768px;"));
    }

    #[test]
    fn test_shortcut_table() {
        let table = shortcut_table();
        assert!(table.contains("Ctrl/Cmd+Shift+Z"));
        assert_eq!(table.lines().count(), ShortcutRegistry::all().len());
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"grid_size": 10}"#).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().grid_size, 10.0);
        assert_eq!(load_config(None).unwrap(), EditorConfig::default());
        std::fs::write(&path, r#"{"grid_size": -1}"#).unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
