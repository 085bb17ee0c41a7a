//! The editor session: one owner for every piece of editor state.
//!
//! All element edits made by the UI (palette, inspector, canvas) go through
//! the tracked methods here, which mutate the [`ElementStore`] and record a
//! history [`Action`]. Undo and redo hand the store straight to [`History`].

use crate::autosave::AutoSave;
use crate::clock::{Instant, now_millis};
use crate::config::EditorConfig;
use crate::document::SiteDocument;
use crate::element::{Bounds, Element, ElementId, ElementKind, ElementUpdate, NewElement};
use crate::history::{Action, History};
use crate::inspector::{ColorTheme, StylePreset};
use crate::interaction::{CanvasSurface, InteractionState, ResizeDirection};
use crate::project::{PageId, ProjectId, Workspace};
use crate::shortcuts::{EditorCommand, Modifiers, ShortcutRegistry};
use crate::store::ElementStore;
use kurbo::{Point, Vec2};

/// Offset applied to a duplicated element.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Editor state for one user: workspace, elements, history, canvas
/// interaction and the auto-save timer.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    workspace: Workspace,
    store: ElementStore,
    history: History,
    interaction: InteractionState,
    autosave: AutoSave,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    /// An empty session. Auto-save is not running until [`Self::open`].
    pub fn new(config: EditorConfig) -> Self {
        Self::with_parts(config, Workspace::new(), Vec::new())
    }

    /// Load a session from a document. The first project (and its home
    /// page) becomes current.
    pub fn from_document(document: SiteDocument, config: EditorConfig) -> Self {
        let SiteDocument {
            projects,
            pages,
            elements,
        } = document;
        let mut workspace = Workspace::from_parts(projects, pages);
        if let Some(first) = workspace.projects().first().map(|p| p.id) {
            workspace.set_current_project(first);
        }
        Self::with_parts(config, workspace, elements)
    }

    fn with_parts(config: EditorConfig, workspace: Workspace, elements: Vec<Element>) -> Self {
        let mut store = ElementStore::new().with_min_size(config.min_element_size);
        for element in elements {
            store.push(element);
        }
        Self {
            history: History::new().with_limit(config.history_limit),
            autosave: AutoSave::new(config.autosave_interval()),
            store,
            workspace,
            interaction: InteractionState::new(),
            config,
        }
    }

    /// Snapshot the workspace and elements.
    pub fn document(&self) -> SiteDocument {
        SiteDocument {
            projects: self.workspace.projects().to_vec(),
            pages: self.workspace.pages().to_vec(),
            elements: self.store.elements().to_vec(),
        }
    }

    /// Start the session: the auto-save timer begins ticking from `now`.
    pub fn open(&mut self, now: Instant) {
        self.autosave.checkpoint(now_millis());
        self.autosave.start(now);
        log::info!(
            "Editor session opened ({} projects, {} elements)",
            self.workspace.projects().len(),
            self.store.len()
        );
    }

    /// End the session: finish any gesture and cancel auto-save.
    pub fn close(&mut self) {
        self.end_interaction();
        self.autosave.stop();
        log::info!("Editor session closed");
    }

    pub fn is_open(&self) -> bool {
        self.autosave.is_running()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Mutable access for project/page management.
    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn autosave(&self) -> &AutoSave {
        &self.autosave
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    pub fn current_page_id(&self) -> Option<PageId> {
        self.workspace.current_page_id()
    }

    /// Elements of the current page, in paint order.
    pub fn current_page_elements(&self) -> impl Iterator<Item = &Element> {
        let page = self.workspace.current_page_id();
        self.store.iter().filter(move |el| Some(el.page_id) == page)
    }

    // --- Tracked element edits ---

    // Every tracked edit first records a pending drag or resize, so the
    // history never holds a snapshot that no MOVE or RESIZE accounts for.

    /// Add an element on top of its page and select it.
    pub fn add_element(&mut self, new: NewElement) -> ElementId {
        self.end_interaction();
        let element = new.into_element();
        let id = element.id;
        let index = self.store.len();
        self.store.push(element.clone());
        self.history.record(Action::add(element, index));
        self.interaction.select(Some(id));
        self.autosave.mark_dirty();
        id
    }

    /// Add a palette element of `kind` to the current page.
    pub fn add_from_palette(&mut self, kind: ElementKind) -> Option<ElementId> {
        let page = self.workspace.current_page_id()?;
        Some(self.add_element(NewElement::from_template(kind, page)))
    }

    /// Merge a partial update into an element.
    ///
    /// A position-only update is recorded as MOVE or RESIZE; anything that
    /// touches content or style is recorded as UPDATE with the full prior
    /// element. Returns false for an unknown id.
    pub fn update_element(&mut self, id: ElementId, update: ElementUpdate) -> bool {
        self.end_interaction();
        if update.is_empty() {
            return self.store.contains(id);
        }
        let Some(old) = self.store.apply_update(id, &update) else {
            log::debug!("Ignoring update of unknown element {id}");
            return false;
        };
        let action = match self.store.get(id) {
            Some(current) if update.is_position_only() => {
                Action::reposition(id, old.kind(), old.position, current.position)
            }
            _ => Action::update(old, update),
        };
        self.history.record(action);
        self.autosave.mark_dirty();
        true
    }

    /// Delete an element. Clears the selection if it pointed there.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        self.end_interaction();
        let Some((index, element)) = self.store.remove(id) else {
            log::debug!("Ignoring removal of unknown element {id}");
            return false;
        };
        if self.interaction.selected() == Some(id) {
            self.interaction.select(None);
        }
        self.history.record(Action::remove(element, index));
        self.autosave.mark_dirty();
        true
    }

    /// Delete the selected element, if any.
    pub fn remove_selected(&mut self) -> bool {
        match self.interaction.selected() {
            Some(id) => self.remove_element(id),
            None => false,
        }
    }

    /// Add a copy of an element, shifted by [`DUPLICATE_OFFSET`], and select it.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let source = self.store.get(id)?;
        let position = Bounds {
            x: source.position.x + DUPLICATE_OFFSET.x,
            y: source.position.y + DUPLICATE_OFFSET.y,
            ..source.position
        };
        let copy = NewElement::new(source.page_id, source.content.clone(), position).with_style(source.style.clone());
        Some(self.add_element(copy))
    }

    /// Recolor an element with a theme.
    pub fn apply_theme(&mut self, id: ElementId, theme: &ColorTheme) -> bool {
        match self.store.get(id).map(Element::kind) {
            Some(kind) => self.update_element(id, theme.update_for(kind)),
            None => false,
        }
    }

    /// Merge a saved style preset into an element.
    pub fn apply_preset(&mut self, id: ElementId, preset: &StylePreset) -> bool {
        self.update_element(id, preset.update())
    }

    // --- Selection and canvas gestures ---

    /// Select an element, or clear the selection. Unknown ids are ignored.
    pub fn select_element(&mut self, id: Option<ElementId>) {
        match id {
            Some(id) if !self.store.contains(id) => log::debug!("Ignoring selection of unknown element {id}"),
            _ => self.interaction.select(id),
        }
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.interaction.selected().and_then(|id| self.store.get(id))
    }

    /// Attach or detach the canvas surface pointer positions are relative to.
    pub fn set_canvas_surface(&mut self, surface: Option<CanvasSurface>) {
        self.interaction.set_surface(surface);
    }

    /// Start dragging an element from a client-space pointer position.
    pub fn begin_drag(&mut self, id: ElementId, pointer: Point) -> bool {
        if !self.interaction.begin_drag(&self.store, id, pointer) {
            return false;
        }
        self.autosave.checkpoint(now_millis());
        true
    }

    /// Start resizing the selected element.
    pub fn begin_resize(&mut self, direction: ResizeDirection) -> bool {
        if !self.interaction.begin_resize(&self.store, direction) {
            return false;
        }
        self.autosave.checkpoint(now_millis());
        true
    }

    /// Follow the pointer during a drag or resize.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Bounds> {
        let settings = self.config.pointer_settings();
        let bounds = self.interaction.pointer_move(&mut self.store, pointer, &settings)?;
        self.autosave.mark_dirty();
        Some(bounds)
    }

    /// Finish the current gesture. A gesture that changed the element's box
    /// is recorded as one MOVE or RESIZE action; returns whether it was.
    pub fn end_interaction(&mut self) -> bool {
        let Some(gesture) = self.interaction.end_interaction() else {
            return false;
        };
        let Some(element) = self.store.get(gesture.element_id) else {
            return false;
        };
        if element.position == gesture.start_bounds {
            return false;
        }
        self.history.record(Action::reposition(
            element.id,
            element.kind(),
            gesture.start_bounds,
            element.position,
        ));
        true
    }

    // --- History ---

    /// Undo the last action. A gesture in progress is finished first.
    pub fn undo(&mut self) -> bool {
        self.end_interaction();
        let undone = self.history.undo(&mut self.store);
        if undone {
            self.after_history_step();
        }
        undone
    }

    /// Redo the last undone action.
    pub fn redo(&mut self) -> bool {
        self.end_interaction();
        let redone = self.history.redo(&mut self.store);
        if redone {
            self.after_history_step();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn after_history_step(&mut self) {
        if let Some(id) = self.interaction.selected() {
            if !self.store.contains(id) {
                self.interaction.select(None);
            }
        }
        self.autosave.mark_dirty();
    }

    // --- Pages ---

    /// Switch page; the selection does not carry over.
    pub fn set_current_page(&mut self, id: PageId) -> bool {
        if !self.workspace.set_current_page(id) {
            return false;
        }
        self.end_interaction();
        self.interaction.select(None);
        true
    }

    /// Switch project, opening its home page.
    pub fn set_current_project(&mut self, id: ProjectId) -> bool {
        if !self.workspace.set_current_project(id) {
            return false;
        }
        self.end_interaction();
        self.interaction.select(None);
        true
    }

    /// Follow a `page:<slug>` link within the current project.
    pub fn follow_link(&mut self, text: &str) -> Option<PageId> {
        let project = self.workspace.current_project()?.id;
        let page = self.workspace.resolve_link(project, text)?.id;
        self.set_current_page(page).then_some(page)
    }

    // --- Saving ---

    /// Take a manual save checkpoint.
    pub fn save(&mut self) {
        let now = now_millis();
        self.autosave.checkpoint(now);
        if let Some(project) = self.workspace.current_project().map(|p| p.id) {
            self.workspace.touch_project(project);
        }
        log::info!("Project saved at {now}");
    }

    /// Drive the auto-save timer. Returns true if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.autosave.tick(now, now_millis())
    }

    // --- Keyboard ---

    /// Run the command bound to a key press. Returns the command, if any.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<EditorCommand> {
        let command = ShortcutRegistry::resolve(key, modifiers)?;
        self.execute(command);
        Some(command)
    }

    /// Run an editor command. Returns whether it changed anything.
    pub fn execute(&mut self, command: EditorCommand) -> bool {
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::Save => {
                self.save();
                true
            }
            EditorCommand::DeleteSelection => self.remove_selected(),
            EditorCommand::Deselect => {
                let had_selection = self.interaction.selected().is_some();
                self.end_interaction();
                self.interaction.select(None);
                had_selection
            }
        }
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.autosave.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BoundsPatch, ElementContent};
    use crate::history::ActionKind;
    use crate::inspector::{COLOR_THEMES, STYLE_PRESETS};

    fn session() -> EditorSession {
        let mut session = EditorSession::default();
        session.workspace_mut().add_project("Site", "", "owner");
        session
    }

    #[test]
    fn test_add_selects_and_records() {
        let mut session = session();
        let id = session.add_from_palette(ElementKind::Text).unwrap();
        assert_eq!(session.interaction().selected(), Some(id));
        assert_eq!(session.history().undo_len(), 1);
        assert_eq!(session.history().past()[0].kind(), ActionKind::Add);
        assert!(session.autosave().is_dirty());
    }

    #[test]
    fn test_add_from_palette_needs_current_page() {
        let mut session = EditorSession::default();
        assert!(session.add_from_palette(ElementKind::Text).is_none());
    }

    #[test]
    fn test_update_classification() {
        let mut session = session();
        let id = session.add_from_palette(ElementKind::Button).unwrap();

        session.update_element(id, ElementUpdate::new().with_position(BoundsPatch::origin(70.0, 80.0)));
        assert_eq!(session.history().last_action().map(Action::kind), Some(ActionKind::Move));

        session.update_element(id, ElementUpdate::new().with_position(BoundsPatch::size(300.0, 150.0)));
        assert_eq!(session.history().last_action().map(Action::kind), Some(ActionKind::Resize));

        session.update_element(id, ElementUpdate::new().set_style("color", "red"));
        assert_eq!(session.history().last_action().map(Action::kind), Some(ActionKind::Update));

        let mixed = ElementUpdate::new()
            .with_position(BoundsPatch::origin(0.0, 0.0))
            .with_content(ElementContent::Button("Buy".into()));
        session.update_element(id, mixed);
        assert_eq!(session.history().last_action().map(Action::kind), Some(ActionKind::Update));
        session.undo();
        let el = session.element(id).unwrap();
        assert_eq!(el.position.origin(), Point::new(70.0, 80.0));
        assert_eq!(el.content.text(), Some("Button"));
    }

    #[test]
    fn test_unknown_ids_do_nothing() {
        let mut session = session();
        let ghost = uuid::Uuid::new_v4();
        assert!(!session.update_element(ghost, ElementUpdate::new().set_style("color", "red")));
        assert!(!session.remove_element(ghost));
        session.select_element(Some(ghost));
        assert!(session.interaction().selected().is_none());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_remove_clears_selection_and_undo_restores_index() {
        let mut session = session();
        let a = session.add_from_palette(ElementKind::Text).unwrap();
        let b = session.add_from_palette(ElementKind::Image).unwrap();
        let c = session.add_from_palette(ElementKind::Button).unwrap();
        session.select_element(Some(b));

        assert!(session.remove_selected());
        assert!(session.interaction().selected().is_none());
        assert_eq!(session.history().last_action().map(Action::description), Some("Removed image element"));

        session.undo();
        let order: Vec<_> = session.store().iter().map(|el| el.id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn test_duplicate_offsets_copy() {
        let mut session = session();
        let id = session.add_from_palette(ElementKind::Hero).unwrap();
        let copy = session.duplicate_element(id).unwrap();
        assert_ne!(copy, id);
        let original = session.element(id).unwrap().clone();
        let duplicated = session.element(copy).unwrap();
        assert_eq!(duplicated.position.x, original.position.x + 20.0);
        assert_eq!(duplicated.position.y, original.position.y + 20.0);
        assert_eq!(duplicated.content, original.content);
        assert_eq!(session.interaction().selected(), Some(copy));
    }

    #[test]
    fn test_theme_and_preset_are_undoable() {
        let mut session = session();
        let id = session.add_from_palette(ElementKind::Button).unwrap();
        let before = session.element(id).cloned();

        assert!(session.apply_theme(id, &COLOR_THEMES[4]));
        assert_eq!(session.element(id).unwrap().style["backgroundColor"], "#60a5fa");
        assert!(session.apply_preset(id, &STYLE_PRESETS[0]));
        assert_eq!(session.element(id).unwrap().style["padding"], "12px 24px");

        session.undo();
        session.undo();
        assert_eq!(session.element(id).cloned(), before);
    }

    #[test]
    fn test_drag_gesture_records_single_move() {
        let mut session = session();
        session.set_canvas_surface(Some(CanvasSurface::new(Point::ZERO)));
        let id = session.add_from_palette(ElementKind::Text).unwrap();
        let recorded = session.history().undo_len();

        assert!(session.begin_drag(id, Point::new(60.0, 60.0)));
        for step in 1..=5 {
            let d = step as f64 * 10.0;
            session.pointer_move(Point::new(60.0 + d, 60.0 + d));
        }
        assert!(session.end_interaction());
        assert_eq!(session.history().undo_len(), recorded + 1);
        assert_eq!(session.history().last_action().map(Action::kind), Some(ActionKind::Move));

        session.undo();
        assert_eq!(session.element(id).unwrap().position.origin(), Point::new(50.0, 50.0));
        session.redo();
        assert_eq!(session.element(id).unwrap().position.origin(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_click_without_motion_records_nothing() {
        let mut session = session();
        session.set_canvas_surface(Some(CanvasSurface::new(Point::ZERO)));
        let id = session.add_from_palette(ElementKind::Text).unwrap();
        session.begin_drag(id, Point::new(60.0, 60.0));
        assert!(!session.end_interaction());
        assert_eq!(session.history().undo_len(), 1);
    }

    #[test]
    fn test_resize_gesture_records_resize() {
        let mut session = session();
        session.set_canvas_surface(Some(CanvasSurface::new(Point::ZERO)));
        let id = session.add_from_palette(ElementKind::Container).unwrap();
        assert!(session.begin_resize(ResizeDirection::SouthEast));
        session.pointer_move(Point::new(400.0, 300.0));
        session.end_interaction();
        assert_eq!(session.element(id).unwrap().position, Bounds::new(50.0, 50.0, 350.0, 250.0));
        assert_eq!(session.history().last_action().map(Action::kind), Some(ActionKind::Resize));
    }

    #[test]
    fn test_undo_of_add_clears_selection() {
        let mut session = session();
        session.add_from_palette(ElementKind::Text).unwrap();
        session.undo();
        assert!(session.interaction().selected().is_none());
    }

    #[test]
    fn test_keyboard_commands() {
        let mut session = session();
        let id = session.add_from_palette(ElementKind::Text).unwrap();

        assert_eq!(session.handle_key("z", Modifiers::CTRL), Some(EditorCommand::Undo));
        assert!(session.element(id).is_none());
        assert_eq!(session.handle_key("y", Modifiers::META), Some(EditorCommand::Redo));
        assert!(session.element(id).is_some());

        session.select_element(Some(id));
        assert_eq!(session.handle_key("Escape", Modifiers::NONE), Some(EditorCommand::Deselect));
        assert!(session.interaction().selected().is_none());

        session.select_element(Some(id));
        session.handle_key("Delete", Modifiers::NONE);
        assert!(session.element(id).is_none());

        assert_eq!(session.handle_key("s", Modifiers::CTRL), Some(EditorCommand::Save));
        assert!(!session.autosave().is_dirty());
        assert_eq!(session.handle_key("k", Modifiers::CTRL), None);
    }

    #[test]
    fn test_open_close_controls_autosave() {
        let mut session = session();
        let start = Instant::now();
        session.open(start);
        assert!(session.is_open());
        assert!(session.tick(start + session.config().autosave_interval()));
        session.close();
        assert!(!session.is_open());
        assert!(!session.tick(start + session.config().autosave_interval() * 3));
    }

    #[test]
    fn test_page_switch_clears_selection() {
        let mut session = session();
        let project = session.workspace().current_project().unwrap().id;
        let home = session.current_page_id().unwrap();
        let id = session.add_from_palette(ElementKind::Text).unwrap();
        let about = session.workspace_mut().add_page(project, "About").unwrap();

        assert!(session.set_current_page(home));
        session.select_element(Some(id));
        assert!(session.set_current_page(about));
        assert!(session.interaction().selected().is_none());
        assert_eq!(session.current_page_elements().count(), 0);

        assert!(session.set_current_page(home));
        assert_eq!(session.follow_link("Go page:about"), Some(about));
    }

    #[test]
    fn test_document_round_trip() {
        let mut session = session();
        session.add_from_palette(ElementKind::Form).unwrap();
        let doc = session.document();

        let restored = EditorSession::from_document(doc.clone(), EditorConfig::default());
        assert_eq!(restored.document(), doc);
        assert_eq!(restored.current_page_elements().count(), 1);
        assert!(!restored.can_undo());
    }
}
