//! Renderer trait abstraction.

use kurbo::{Point, Size};
use peniko::Color;
use sitecraft_core::interaction::{HANDLE_HIT_TOLERANCE, hit_test_handles};
use sitecraft_core::{EditorSession, ElementId, ResizeDirection};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("No page to render")]
    NoPage,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid (plain background).
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only corner dots (.).
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// What the canvas is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Editing canvas: grid, guides and handles are drawn.
    #[default]
    Edit,
    /// Read-only preview; `page:` buttons are navigable.
    Preview,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The session whose current page is rendered.
    pub session: &'a EditorSession,
    /// Canvas size in CSS pixels.
    pub viewport_size: Size,
    pub mode: RenderMode,
    /// Background color.
    pub background_color: Color,
    /// Grid display style (edit mode only).
    pub grid_style: GridStyle,
    /// Grid pitch in canvas pixels.
    pub grid_size: f64,
    /// Selection outline and handle color.
    pub selection_color: Color,
    /// Alignment guide color.
    pub guide_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(session: &'a EditorSession, viewport_size: Size) -> Self {
        Self {
            session,
            viewport_size,
            mode: RenderMode::Edit,
            background_color: Color::WHITE,
            grid_style: GridStyle::Lines,
            grid_size: session.config().grid_size,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            guide_color: Color::from_rgba8(236, 72, 153, 180),
        }
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_guide_color(mut self, color: Color) -> Self {
        self.guide_color = color;
        self
    }

    pub fn is_preview(&self) -> bool {
        self.mode == RenderMode::Preview
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the output for a frame from the session's current page.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// What a pointer-down on the canvas landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasHit {
    /// A resize handle of the selected element.
    Handle(ResizeDirection),
    Element(ElementId),
}

/// Find what lies under a canvas-space point: the selected element's
/// handles first, then the topmost element of the current page.
pub fn hit_test(session: &EditorSession, point: Point) -> Option<CanvasHit> {
    if let Some(selected) = session.selected_element() {
        if let Some(direction) = hit_test_handles(selected.position, point, HANDLE_HIT_TOLERANCE) {
            return Some(CanvasHit::Handle(direction));
        }
    }
    let elements: Vec<_> = session.current_page_elements().collect();
    elements
        .into_iter()
        .rev()
        .find(|el| el.position.contains(point))
        .map(|el| CanvasHit::Element(el.id))
}

/// Route a client-space pointer-down to the session: a handle starts a
/// resize, an element is selected and starts a drag, empty canvas clears
/// the selection. Nothing happens without a canvas surface.
pub fn dispatch_pointer_down(session: &mut EditorSession, pointer: Point) -> Option<CanvasHit> {
    let surface = session.interaction().surface()?;
    let hit = hit_test(session, surface.to_canvas(pointer));
    match hit {
        Some(CanvasHit::Handle(direction)) => {
            session.begin_resize(direction);
        }
        Some(CanvasHit::Element(id)) => {
            session.select_element(Some(id));
            session.begin_drag(id, pointer);
        }
        None => session.select_element(None),
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_core::{Bounds, CanvasSurface, ElementContent, NewElement};

    fn session() -> (EditorSession, ElementId, ElementId) {
        let mut session = EditorSession::default();
        session.workspace_mut().add_project("Site", "", "owner");
        session.set_canvas_surface(Some(CanvasSurface::new(Point::new(10.0, 10.0))));
        let page = session.current_page_id().unwrap();
        let below = session.add_element(NewElement::new(
            page,
            ElementContent::Container,
            Bounds::new(0.0, 0.0, 200.0, 200.0),
        ));
        let above = session.add_element(NewElement::new(
            page,
            ElementContent::Button("Go".into()),
            Bounds::new(50.0, 50.0, 100.0, 40.0),
        ));
        session.select_element(None);
        (session, below, above)
    }

    #[test]
    fn test_grid_style_cycle() {
        assert_eq!(GridStyle::None.next(), GridStyle::Lines);
        assert_eq!(GridStyle::Dots.next(), GridStyle::None);
        assert_eq!(GridStyle::Lines.name(), "Lines");
    }

    #[test]
    fn test_hit_test_topmost() {
        let (session, below, above) = session();
        assert_eq!(hit_test(&session, Point::new(60.0, 60.0)), Some(CanvasHit::Element(above)));
        assert_eq!(hit_test(&session, Point::new(10.0, 150.0)), Some(CanvasHit::Element(below)));
        assert_eq!(hit_test(&session, Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_handles_win_for_selection() {
        let (mut session, below, _) = session();
        session.select_element(Some(below));
        assert_eq!(
            hit_test(&session, Point::new(200.0, 200.0)),
            Some(CanvasHit::Handle(ResizeDirection::SouthEast))
        );
    }

    #[test]
    fn test_pointer_down_starts_drag() {
        let (mut session, _, above) = session();
        let hit = dispatch_pointer_down(&mut session, Point::new(70.0, 70.0));
        assert_eq!(hit, Some(CanvasHit::Element(above)));
        assert_eq!(session.interaction().selected(), Some(above));
        assert!(session.interaction().is_dragging());
    }

    #[test]
    fn test_pointer_down_on_empty_canvas_deselects() {
        let (mut session, below, _) = session();
        session.select_element(Some(below));
        assert_eq!(dispatch_pointer_down(&mut session, Point::new(900.0, 900.0)), None);
        assert_eq!(session.interaction().selected(), None);
    }

    #[test]
    fn test_pointer_down_without_surface() {
        let (mut session, _, _) = session();
        session.set_canvas_surface(None);
        assert_eq!(dispatch_pointer_down(&mut session, Point::new(70.0, 70.0)), None);
        assert!(!session.interaction().is_interacting());
    }
}
