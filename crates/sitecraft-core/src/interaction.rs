//! Selection, resize handles, and the drag/resize gesture controller.

use crate::element::{Bounds, ElementId};
use crate::snap::{AlignmentGuides, SnapMode, resize_bounds, snap_position_with_mode};
use crate::store::ElementStore;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in canvas pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in canvas pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 6.0;

/// Edge or corner being dragged during a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeDirection {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "nw")]
    NorthWest,
}

impl ResizeDirection {
    /// Clockwise from north, the order handles are laid out in.
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::North,
        ResizeDirection::NorthEast,
        ResizeDirection::East,
        ResizeDirection::SouthEast,
        ResizeDirection::South,
        ResizeDirection::SouthWest,
        ResizeDirection::West,
        ResizeDirection::NorthWest,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ResizeDirection::North => "n",
            ResizeDirection::NorthEast => "ne",
            ResizeDirection::East => "e",
            ResizeDirection::SouthEast => "se",
            ResizeDirection::South => "s",
            ResizeDirection::SouthWest => "sw",
            ResizeDirection::West => "w",
            ResizeDirection::NorthWest => "nw",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.token() == token)
    }

    pub fn has_north(self) -> bool {
        matches!(self, ResizeDirection::North | ResizeDirection::NorthEast | ResizeDirection::NorthWest)
    }

    pub fn has_south(self) -> bool {
        matches!(self, ResizeDirection::South | ResizeDirection::SouthEast | ResizeDirection::SouthWest)
    }

    pub fn has_east(self) -> bool {
        matches!(self, ResizeDirection::East | ResizeDirection::NorthEast | ResizeDirection::SouthEast)
    }

    pub fn has_west(self) -> bool {
        matches!(self, ResizeDirection::West | ResizeDirection::NorthWest | ResizeDirection::SouthWest)
    }

    /// CSS cursor shown over the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeDirection::North | ResizeDirection::South => "ns-resize",
            ResizeDirection::East | ResizeDirection::West => "ew-resize",
            ResizeDirection::NorthEast | ResizeDirection::SouthWest => "nesw-resize",
            ResizeDirection::SouthEast | ResizeDirection::NorthWest => "nwse-resize",
        }
    }
}

impl std::fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// A resize handle centered on an edge midpoint or corner of a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle {
    /// Center in canvas coordinates.
    pub position: Point,
    pub direction: ResizeDirection,
}

impl ResizeHandle {
    /// Check if a point (in canvas coordinates) hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = HANDLE_SIZE / 2.0 + tolerance;
        (point.x - self.position.x).abs() <= reach && (point.y - self.position.y).abs() <= reach
    }
}

/// The eight handles of a box, clockwise from north.
pub fn resize_handles(bounds: Bounds) -> Vec<ResizeHandle> {
    let center = bounds.center();
    ResizeDirection::ALL
        .into_iter()
        .map(|direction| {
            let x = if direction.has_west() {
                bounds.x
            } else if direction.has_east() {
                bounds.right()
            } else {
                center.x
            };
            let y = if direction.has_north() {
                bounds.y
            } else if direction.has_south() {
                bounds.bottom()
            } else {
                center.y
            };
            ResizeHandle {
                position: Point::new(x, y),
                direction,
            }
        })
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(bounds: Bounds, point: Point, tolerance: f64) -> Option<ResizeDirection> {
    resize_handles(bounds)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.direction)
}

/// The canvas the elements are drawn on, located in client (window)
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSurface {
    /// Client position of the canvas top-left.
    pub origin: Point,
}

impl CanvasSurface {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }

    /// Convert a client position to canvas coordinates.
    pub fn to_canvas(&self, client: Point) -> Point {
        (client - self.origin).to_point()
    }
}

/// Element and box at the start of a drag or resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub element_id: ElementId,
    pub start_bounds: Bounds,
}

/// Snap and size settings applied while moving the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSettings {
    pub snap_mode: SnapMode,
    pub snap_tolerance: f64,
    pub grid_size: f64,
    pub min_size: f64,
}

/// Transient selection and gesture state of the canvas.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    selected: Option<ElementId>,
    dragging: bool,
    resizing: bool,
    resize_direction: Option<ResizeDirection>,
    /// Pointer offset from the element's top-left at drag start.
    drag_offset: Vec2,
    guides: AlignmentGuides,
    surface: Option<CanvasSurface>,
    gesture: Option<Gesture>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surface(mut self, surface: CanvasSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Attach, move, or detach the canvas surface.
    pub fn set_surface(&mut self, surface: Option<CanvasSurface>) {
        self.surface = surface;
    }

    pub fn surface(&self) -> Option<CanvasSurface> {
        self.surface
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn is_interacting(&self) -> bool {
        self.dragging || self.resizing
    }

    pub fn resize_direction(&self) -> Option<ResizeDirection> {
        self.resize_direction
    }

    pub fn drag_offset(&self) -> Vec2 {
        self.drag_offset
    }

    pub fn guides(&self) -> &AlignmentGuides {
        &self.guides
    }

    /// The gesture in progress, if any.
    pub fn gesture(&self) -> Option<Gesture> {
        self.gesture
    }

    /// Select an element, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// Start moving an element. `pointer` is in client coordinates.
    ///
    /// Returns false (and changes nothing) if the element or the canvas
    /// surface is missing.
    pub fn begin_drag(&mut self, store: &ElementStore, id: ElementId, pointer: Point) -> bool {
        let (Some(surface), Some(element)) = (self.surface, store.get(id)) else {
            log::debug!("Ignoring drag start on {id}: element or canvas missing");
            return false;
        };
        self.selected = Some(id);
        self.drag_offset = surface.to_canvas(pointer) - element.position.origin();
        self.dragging = true;
        self.resizing = false;
        self.resize_direction = None;
        self.guides = sibling_guides(store, id);
        self.gesture = Some(Gesture {
            element_id: id,
            start_bounds: element.position,
        });
        true
    }

    /// Start resizing the selected element from the `direction` handle.
    ///
    /// Returns false if nothing is selected or the selection is stale.
    pub fn begin_resize(&mut self, store: &ElementStore, direction: ResizeDirection) -> bool {
        let Some(element) = self.selected.and_then(|id| store.get(id)) else {
            log::debug!("Ignoring resize start: no live selection");
            return false;
        };
        self.resizing = true;
        self.dragging = false;
        self.resize_direction = Some(direction);
        self.guides = sibling_guides(store, element.id);
        self.gesture = Some(Gesture {
            element_id: element.id,
            start_bounds: element.position,
        });
        true
    }

    /// Follow the pointer (client coordinates) during a drag or resize,
    /// writing the new box straight into the store.
    ///
    /// Returns the new bounds, or `None` when nothing is in progress or a
    /// reference went stale.
    pub fn pointer_move(&mut self, store: &mut ElementStore, pointer: Point, settings: &PointerSettings) -> Option<Bounds> {
        if !self.is_interacting() {
            return None;
        }
        let surface = self.surface?;
        let id = self.selected?;
        let current = store.get(id)?.position;
        let local = surface.to_canvas(pointer);

        let next = if self.dragging {
            let candidate = local - self.drag_offset;
            let snapped = snap_position_with_mode(
                candidate,
                Size::new(current.width, current.height),
                &self.guides,
                settings.snap_mode,
                settings.snap_tolerance,
                settings.grid_size,
            );
            Bounds {
                x: snapped.point.x,
                y: snapped.point.y,
                ..current
            }
        } else {
            let direction = self.resize_direction?;
            resize_bounds(current, direction, local, settings.min_size)
        };

        store.set_bounds(id, next);
        store.get(id).map(|el| el.position)
    }

    /// Finish the current gesture and clear all gesture state.
    ///
    /// Returns the gesture that was in progress, so the caller can record
    /// it as a single history entry.
    pub fn end_interaction(&mut self) -> Option<Gesture> {
        self.dragging = false;
        self.resizing = false;
        self.resize_direction = None;
        self.guides.clear();
        self.gesture.take()
    }
}

fn sibling_guides(store: &ElementStore, id: ElementId) -> AlignmentGuides {
    let Some(page_id) = store.get(id).map(|el| el.page_id) else {
        return AlignmentGuides::new();
    };
    AlignmentGuides::from_siblings(
        store
            .page_elements(page_id)
            .filter(|el| el.id != id)
            .map(|el| &el.position),
    )
}
